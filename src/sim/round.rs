//! Match state machine
//!
//! `Serving → Rallying → (point) → Rallying | RoundOver`, with a pause flag
//! layered on top. RoundOver is terminal until `restart`.

use serde::{Deserialize, Serialize};

use super::state::{Field, GameEvent, Side};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball placed at center with a fresh velocity, not yet advanced
    Serving,
    /// Ball in play
    Rallying,
    /// A side reached the win score
    RoundOver { winner: Side },
}

/// Scores, phase and pause flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub left: u32,
    pub right: u32,
    pub win_score: u32,
    pub phase: GamePhase,
    pub paused: bool,
}

impl MatchState {
    pub fn new(win_score: u32) -> Self {
        Self {
            left: 0,
            right: 0,
            win_score,
            phase: GamePhase::Serving,
            paused: false,
        }
    }

    /// False once the round is over
    pub fn running(&self) -> bool {
        !matches!(self.phase, GamePhase::RoundOver { .. })
    }

    /// Whether the simulation should advance this tick
    pub fn is_live(&self) -> bool {
        self.running() && !self.paused
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            GamePhase::RoundOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Flip the pause flag; ignored once the round is over
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        if !self.running() {
            return None;
        }
        self.paused = !self.paused;
        Some(GameEvent::PauseChanged {
            paused: self.paused,
        })
    }

    /// Clear the pause flag if set
    pub fn resume(&mut self) -> Option<GameEvent> {
        if !self.paused || !self.running() {
            return None;
        }
        self.paused = false;
        Some(GameEvent::PauseChanged { paused: false })
    }

    /// Zero both scores and return to Serving
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.left = 0;
        self.right = 0;
        self.phase = GamePhase::Serving;
        self.paused = false;
        log::info!("Round restarted");
        vec![
            GameEvent::Restarted,
            GameEvent::ScoreChanged { left: 0, right: 0 },
        ]
    }

    /// Mark the served ball as in play
    pub fn begin_rally(&mut self) {
        if self.phase == GamePhase::Serving {
            self.phase = GamePhase::Rallying;
        }
    }

    /// Award a point to `scorer`, entering RoundOver at the win score
    pub fn award_point(&mut self, scorer: Side) -> Vec<GameEvent> {
        match scorer {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
        log::info!("{:?} scores: {} - {}", scorer, self.left, self.right);

        let mut events = vec![GameEvent::ScoreChanged {
            left: self.left,
            right: self.right,
        }];

        if self.score(scorer) >= self.win_score {
            self.phase = GamePhase::RoundOver { winner: scorer };
            self.paused = true;
            log::info!(
                "Round over, {:?} wins {} - {}",
                scorer,
                self.left,
                self.right
            );
            events.push(GameEvent::RoundOver { winner: scorer });
        } else {
            self.phase = GamePhase::Rallying;
        }
        events
    }
}

/// Which side scores when the ball is at `x`
///
/// The ball must be strictly beyond `margin` past the side edge.
pub fn scoring_side(x: f32, field: &Field, margin: f32) -> Option<Side> {
    if x < -margin {
        Some(Side::Right)
    } else if x > field.width + margin {
        Some(Side::Left)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_scoring_side_requires_margin() {
        let field = Field::new(800.0, 600.0, PADDING);
        assert_eq!(scoring_side(-EXIT_MARGIN, &field, EXIT_MARGIN), None);
        assert_eq!(
            scoring_side(-EXIT_MARGIN - 0.1, &field, EXIT_MARGIN),
            Some(Side::Right)
        );
        assert_eq!(scoring_side(800.0 + EXIT_MARGIN, &field, EXIT_MARGIN), None);
        assert_eq!(
            scoring_side(800.0 + EXIT_MARGIN + 0.1, &field, EXIT_MARGIN),
            Some(Side::Left)
        );
        assert_eq!(scoring_side(400.0, &field, EXIT_MARGIN), None);
    }

    #[test]
    fn test_award_point_increments_one_side() {
        let mut round = MatchState::new(WIN_SCORE);
        let events = round.award_point(Side::Right);
        assert_eq!((round.left, round.right), (0, 1));
        assert_eq!(events, vec![GameEvent::ScoreChanged { left: 0, right: 1 }]);
        assert_eq!(round.phase, GamePhase::Rallying);
        assert!(round.is_live());
    }

    #[test]
    fn test_win_threshold_ends_round() {
        let mut round = MatchState::new(WIN_SCORE);
        for _ in 0..10 {
            round.award_point(Side::Left);
        }
        assert!(round.running());

        let events = round.award_point(Side::Left);
        assert_eq!(round.phase, GamePhase::RoundOver { winner: Side::Left });
        assert!(!round.running());
        assert!(round.paused);
        assert_eq!(round.winner(), Some(Side::Left));
        let over = GameEvent::RoundOver { winner: Side::Left };
        assert!(events.contains(&over));
    }

    #[test]
    fn test_round_over_ignores_pause_toggle() {
        let mut round = MatchState::new(1);
        round.award_point(Side::Right);
        assert_eq!(round.toggle_pause(), None);
        assert_eq!(round.resume(), None);
        assert!(round.paused);
        assert!(!round.is_live());
    }

    #[test]
    fn test_restart_zeroes_scores() {
        let mut round = MatchState::new(2);
        round.award_point(Side::Right);
        round.award_point(Side::Left);
        round.award_point(Side::Right);
        assert!(!round.running());

        let events = round.restart();
        assert_eq!((round.left, round.right), (0, 0));
        assert_eq!(round.phase, GamePhase::Serving);
        assert!(!round.paused);
        assert_eq!(events[1], GameEvent::ScoreChanged { left: 0, right: 0 });
    }

    #[test]
    fn test_toggle_pause() {
        let mut round = MatchState::new(WIN_SCORE);
        let paused = GameEvent::PauseChanged { paused: true };
        let resumed = GameEvent::PauseChanged { paused: false };
        assert_eq!(round.toggle_pause(), Some(paused));
        assert!(!round.is_live());
        assert_eq!(round.resume(), Some(resumed));
        assert_eq!(round.resume(), None);
    }

    #[test]
    fn test_begin_rally_only_from_serving() {
        let mut round = MatchState::new(1);
        round.begin_rally();
        assert_eq!(round.phase, GamePhase::Rallying);
        round.award_point(Side::Left);
        round.begin_rally();
        assert!(matches!(round.phase, GamePhase::RoundOver { .. }));
    }
}
