use crate::consts;
use std::time::Duration;

/// The score and tick delay for the level currently being played
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Scoring {
    /// Number of apples eaten so far
    score: u32,

    /// Time between movements of the snake
    delay: Duration,

    /// `delay` is never reduced below this
    min_delay: Duration,
}

impl Scoring {
    pub(super) fn new(initial_delay: Duration, min_delay: Duration) -> Scoring {
        Scoring {
            score: 0,
            delay: initial_delay,
            min_delay,
        }
    }

    pub(super) fn score(&self) -> u32 {
        self.score
    }

    pub(super) fn delay(&self) -> Duration {
        self.delay
    }

    /// Count an eaten apple and speed the snake up by ten percent, down to
    /// the minimum delay
    pub(super) fn apple_eaten(&mut self) {
        self.score = self.score.saturating_add(1);
        self.delay = (self.delay * consts::SPEEDUP_NUMERATOR / consts::SPEEDUP_DENOMINATOR)
            .max(self.min_delay);
    }
}
