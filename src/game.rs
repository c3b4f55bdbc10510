use crate::bank::ContentBank;
use crate::snapshot::Snapshot;
use crate::stats::RoundStats;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::{Duration, SystemTime};
use thiserror::Error;

/// Pause between a correct submission and the next round, driven by ticks.
pub const ADVANCE_DELAY_MS: u64 = 600;
/// How long the incorrect-submission cue stays visible.
pub const FLASH_MS: u64 = 400;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("unknown tier `{0}`")]
    InvalidTier(String),
}

/// Round lifecycle. `Finished` is absorbing: the session ended at max level.
/// The display names are what the status line shows the player.
#[derive(Clone, Copy, Debug, PartialEq, strum_macros::Display)]
pub enum Phase {
    #[strum(serialize = "ready")]
    Ready,
    #[strum(serialize = "typing")]
    Playing,
    #[strum(serialize = "well done!")]
    RoundComplete,
    #[strum(serialize = "finished")]
    Finished,
}

/// A decoded key-press, as the controller sees it. The front end maps
/// terminal events to these; anything else never reaches the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Submit,
}

/// What a single keystroke did to the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Backspace,
    Complete,
    Ignored,
}

/// The typing session controller.
///
/// Owns the current sentence, typed-progress cursor, score, level, and
/// per-round timer, and advances them one keystroke at a time. The typed
/// buffer is always exactly the first `cursor` characters of the current
/// sentence; mismatched keystrokes are discarded rather than stored.
pub struct Game {
    bank: ContentBank,
    rng: Box<dyn RngCore + Send>,
    pub tier: String,
    pub sentence: String,
    pub typed: String,
    cursor: usize,
    pub score: u32,
    pub level: u32,
    pub max_level: u32,
    phase: Phase,
    pub stats: RoundStats,
    round_started_at: Option<SystemTime>,
    advance_at: Option<SystemTime>,
    flash_until: Option<SystemTime>,
    advance_delay: Duration,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("tier", &self.tier)
            .field("sentence", &self.sentence)
            .field("typed", &self.typed)
            .field("cursor", &self.cursor)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("max_level", &self.max_level)
            .field("phase", &self.phase)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(bank: ContentBank, tier: &str, max_level: u32) -> Result<Self, GameError> {
        Self::with_rng(bank, tier, max_level, Box::new(StdRng::from_entropy()))
    }

    /// Construct with an injected random source, so tests can seed selection.
    pub fn with_rng(
        bank: ContentBank,
        tier: &str,
        max_level: u32,
        rng: Box<dyn RngCore + Send>,
    ) -> Result<Self, GameError> {
        if !bank.is_valid_tier(tier) {
            return Err(GameError::InvalidTier(tier.to_string()));
        }
        Ok(Self {
            bank,
            rng,
            tier: tier.to_string(),
            sentence: String::new(),
            typed: String::new(),
            cursor: 0,
            score: 0,
            level: 1,
            max_level,
            phase: Phase::Ready,
            stats: RoundStats::new(),
            round_started_at: None,
            advance_at: None,
            flash_until: None,
            advance_delay: Duration::from_millis(ADVANCE_DELAY_MS),
        })
    }

    /// Override the auto-advance pause (used by tests to avoid waiting).
    pub fn set_advance_delay(&mut self, delay: Duration) {
        self.advance_delay = delay;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn bank(&self) -> &ContentBank {
        &self.bank
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Switch the active tier. Resets score, level, cursor, and typed buffer,
    /// then starts a new round. An unknown tier leaves all state untouched.
    pub fn set_tier(&mut self, tier: &str) -> Result<(), GameError> {
        if !self.bank.is_valid_tier(tier) {
            return Err(GameError::InvalidTier(tier.to_string()));
        }
        self.tier = tier.to_string();
        self.score = 0;
        self.level = 1;
        self.stats.reset();
        self.flash_until = None;
        self.start_new_round();
        Ok(())
    }

    /// Select a fresh sentence for the active tier and begin accepting input.
    pub fn start_new_round(&mut self) {
        self.sentence = self
            .bank
            .pick_sentence(&self.tier, &mut self.rng)
            .expect("active tier is validated on construction and tier change");
        self.typed.clear();
        self.cursor = 0;
        self.round_started_at = Some(SystemTime::now());
        self.advance_at = None;
        self.phase = Phase::Playing;
    }

    /// Return the controller to initial conditions. `tier` switches the
    /// active tier as well; `None` keeps it.
    pub fn reset_game(&mut self, tier: Option<&str>) -> Result<(), GameError> {
        if let Some(t) = tier {
            if !self.bank.is_valid_tier(t) {
                return Err(GameError::InvalidTier(t.to_string()));
            }
            self.tier = t.to_string();
        }
        self.sentence.clear();
        self.typed.clear();
        self.cursor = 0;
        self.score = 0;
        self.level = 1;
        self.stats.reset();
        self.round_started_at = None;
        self.advance_at = None;
        self.flash_until = None;
        self.phase = Phase::Ready;
        Ok(())
    }

    /// The character the player should type next, if any remains.
    pub fn highlight_target(&self) -> Option<char> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.sentence.chars().nth(self.cursor)
    }

    /// Central transition function, called once per decoded key-press.
    pub fn key(&mut self, input: KeyInput) -> Outcome {
        if self.phase != Phase::Playing {
            return Outcome::Ignored;
        }

        match input {
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.typed.pop();
                }
                Outcome::Backspace
            }
            KeyInput::Submit => {
                if self.typed == self.sentence {
                    self.complete_round();
                    Outcome::Complete
                } else {
                    self.score = self.score.saturating_sub(1);
                    self.flash_until =
                        Some(SystemTime::now() + Duration::from_millis(FLASH_MS));
                    Outcome::Incorrect
                }
            }
            KeyInput::Char(c) => {
                let expected = self.sentence.chars().nth(self.cursor);
                match expected {
                    Some(e) if e == c => {
                        self.typed.push(c);
                        self.cursor += 1;
                        self.stats.record_correct();
                        Outcome::Correct
                    }
                    Some(_) => {
                        // Mismatches are discarded, never stored: the typed
                        // buffer stays a prefix of the sentence. The discard
                        // is still surfaced and counted against accuracy.
                        self.stats.record_incorrect();
                        Outcome::Incorrect
                    }
                    None => Outcome::Ignored,
                }
            }
        }
    }

    fn complete_round(&mut self) {
        let elapsed = self
            .round_started_at
            .and_then(|t| t.elapsed().ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        self.stats.record_round(elapsed);
        self.score += 1;
        self.level += 1;

        if self.level > self.max_level {
            self.phase = Phase::Finished;
            self.advance_at = None;
        } else {
            self.phase = Phase::RoundComplete;
            self.advance_at = Some(SystemTime::now() + self.advance_delay);
        }
    }

    /// Drives the deferred round-advance and expires the incorrect flash.
    /// Called from the host tick loop; never blocks.
    pub fn on_tick(&mut self) {
        let now = SystemTime::now();

        if let Some(t) = self.flash_until {
            if now >= t {
                self.flash_until = None;
            }
        }

        if self.phase == Phase::RoundComplete {
            if let Some(t) = self.advance_at {
                if now >= t {
                    self.start_new_round();
                }
            }
        }
    }

    /// Seconds since the current round started, while one is running.
    pub fn round_elapsed_secs(&self) -> Option<f64> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.round_started_at
            .and_then(|t| t.elapsed().ok())
            .map(|d| d.as_secs_f64())
    }

    pub fn incorrect_flash(&self) -> bool {
        self.flash_until
            .is_some_and(|t| SystemTime::now() < t)
    }

    /// Pure data view for the display adapter, emitted after each transition.
    pub fn snapshot(&self) -> Snapshot {
        let masked = self
            .sentence
            .chars()
            .enumerate()
            .map(|(i, c)| if i < self.cursor { c } else { '_' })
            .collect();

        Snapshot {
            tier: self.tier.clone(),
            masked,
            typed_len: self.cursor,
            sentence_len: self.sentence.chars().count(),
            score: self.score,
            level: self.level,
            max_level: self.max_level,
            highlight: self.highlight_target(),
            elapsed_secs: self
                .round_elapsed_secs()
                .or_else(|| self.stats.last_round_secs()),
            accuracy: self.stats.accuracy(),
            rounds_completed: self.stats.rounds_completed,
            avg_round_secs: self.stats.avg_round_secs(),
            incorrect_flash: self.incorrect_flash(),
            phase: self.phase,
        }
    }
}
