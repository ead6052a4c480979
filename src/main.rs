//! Arcade Pong entry point
//!
//! The browser build is driven from JS through `platform::WebGame`. Natively
//! this runs a headless attract-mode match (CPU on both sides) and logs the
//! result, which is handy for checking tuning changes.
//!
//! Usage: `arcade-pong [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arcade_pong::Settings;
    use arcade_pong::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use arcade_pong::driver::{FrameDriver, Headless};
    use arcade_pong::sim::GameEvent;

    // One simulated hour at 60 Hz
    const MAX_FRAMES: u64 = 60 * 60 * 60;

    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
    log::info!("Arcade Pong (native, headless attract mode) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);

    let mut driver = FrameDriver::new(seed, &settings, FIELD_WIDTH, FIELD_HEIGHT);
    driver.set_autopilot(true);

    let mut hits = 0u32;
    let mut wall_bounces = 0u32;
    let mut frames = 0u64;
    while driver.state().round.running() && frames < MAX_FRAMES {
        for event in driver.step(1.0, &mut Headless) {
            match event {
                GameEvent::PaddleHit { .. } | GameEvent::RacketHit { .. } => hits += 1,
                GameEvent::WallBounce { .. } => wall_bounces += 1,
                _ => {}
            }
        }
        frames += 1;
    }

    let round = &driver.state().round;
    match round.winner() {
        Some(winner) => log::info!(
            "{:?} wins {} - {} after {} frames ({} paddle hits, {} wall bounces)",
            winner,
            round.left,
            round.right,
            frames,
            hits,
            wall_bounces
        ),
        None => log::warn!(
            "No winner after {} frames, score {} - {}",
            frames,
            round.left,
            round.right
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::WebGame, this is just to satisfy the compiler
}
