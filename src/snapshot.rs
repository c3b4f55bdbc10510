use crate::game::Phase;

/// Pure data view of the session, emitted by the controller after each
/// transition. Rendering surfaces own all visual state; the controller
/// never touches a widget.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub tier: String,
    /// Typed prefix shown literally, remainder replaced by `_`.
    pub masked: String,
    pub typed_len: usize,
    pub sentence_len: usize,
    pub score: u32,
    pub level: u32,
    pub max_level: u32,
    /// The key cap to highlight on the virtual keyboard, if any.
    pub highlight: Option<char>,
    /// Seconds into the running round, or the just-finished round's time.
    pub elapsed_secs: Option<f64>,
    pub accuracy: f64,
    pub rounds_completed: u32,
    pub avg_round_secs: Option<f64>,
    /// True while the incorrect-submission cue should be visible.
    pub incorrect_flash: bool,
    pub phase: Phase,
}

/// A rendering surface: terminal, test recorder, anything that can show
/// a snapshot. Consumed by the front end, never by the controller itself.
pub trait DisplayAdapter {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Records every presented snapshot; used by headless tests.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    pub frames: Vec<Snapshot>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }
}

impl DisplayAdapter for RecordingAdapter {
    fn present(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(masked: &str) -> Snapshot {
        Snapshot {
            tier: "1".to_string(),
            masked: masked.to_string(),
            typed_len: 2,
            sentence_len: masked.chars().count(),
            score: 1,
            level: 2,
            max_level: 10,
            highlight: Some('l'),
            elapsed_secs: Some(3.2),
            accuracy: 100.0,
            rounds_completed: 1,
            avg_round_secs: Some(3.2),
            incorrect_flash: false,
            phase: Phase::Playing,
        }
    }

    #[test]
    fn test_recording_adapter_keeps_frames_in_order() {
        let mut recorder = RecordingAdapter::new();

        recorder.present(&sample("He____"));
        recorder.present(&sample("Hel___"));

        assert_eq!(recorder.frames.len(), 2);
        assert_eq!(recorder.last().unwrap().masked, "Hel___");
    }
}
