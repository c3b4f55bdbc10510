use crate::util::mean;

/// Per-session counters kept by the game controller.
///
/// Characters are counted at keystroke time: a keystroke matching the expected
/// character is correct, a discarded mismatch is incorrect. Whole-line
/// submissions affect score, not these counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundStats {
    pub correct_chars: u64,
    pub incorrect_chars: u64,
    pub rounds_completed: u32,
    round_secs: Vec<f64>,
}

impl RoundStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_correct(&mut self) {
        self.correct_chars += 1;
    }

    pub fn record_incorrect(&mut self) {
        self.incorrect_chars += 1;
    }

    pub fn record_round(&mut self, elapsed_secs: f64) {
        self.rounds_completed += 1;
        self.round_secs.push(elapsed_secs);
    }

    /// Accuracy over all recorded keystrokes, as a percentage.
    /// Defined as 100.0 when nothing has been recorded yet.
    pub fn accuracy(&self) -> f64 {
        let total = self.correct_chars + self.incorrect_chars;
        if total == 0 {
            return 100.0;
        }
        (self.correct_chars as f64 / total as f64) * 100.0
    }

    /// Mean seconds per completed round, if any round has finished.
    pub fn avg_round_secs(&self) -> Option<f64> {
        mean(&self.round_secs)
    }

    pub fn last_round_secs(&self) -> Option<f64> {
        self.round_secs.last().copied()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
