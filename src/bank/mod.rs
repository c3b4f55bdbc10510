use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

static BANK_DIR: Dir = include_dir!("src/bank");

const DEFAULT_BANK: &str = "grades.json";

#[derive(Debug, Error, PartialEq)]
pub enum BankError {
    #[error("sentence bank `{0}` not found")]
    NotFound(String),
    #[error("sentence bank is not valid json: {0}")]
    Malformed(String),
    #[error("tier `{0}` has an empty sentence list")]
    EmptyTier(String),
}

/// A set of practice sentences grouped by difficulty tier.
///
/// Tiers are school-grade identifiers ("1".."6" in the bundled bank); a tier
/// is valid iff it is a key of the bank's tier map.
#[derive(Deserialize, Clone, Debug)]
pub struct ContentBank {
    pub name: String,
    tiers: HashMap<String, Vec<String>>,
}

impl ContentBank {
    /// Load the sentence bank bundled into the binary.
    pub fn load_default() -> Self {
        read_bank_from_dir(DEFAULT_BANK).expect("bundled sentence bank must parse")
    }

    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let bank: ContentBank =
            serde_json::from_str(json).map_err(|e| BankError::Malformed(e.to_string()))?;
        for (tier, sentences) in &bank.tiers {
            if sentences.is_empty() {
                return Err(BankError::EmptyTier(tier.clone()));
            }
        }
        Ok(bank)
    }

    /// All known tier identifiers, sorted.
    pub fn list_tiers(&self) -> Vec<&str> {
        self.tiers.keys().map(String::as_str).sorted().collect()
    }

    pub fn is_valid_tier(&self, tier: &str) -> bool {
        self.tiers.contains_key(tier)
    }

    /// Pick a sentence uniformly at random from the given tier.
    ///
    /// Returns `None` for an unknown tier; callers validate with
    /// [`ContentBank::is_valid_tier`] first.
    pub fn pick_sentence<R: Rng + ?Sized>(&self, tier: &str, rng: &mut R) -> Option<String> {
        let sentences = self.tiers.get(tier)?;
        let idx = rng.gen_range(0..sentences.len());
        Some(sentences[idx].clone())
    }
}

fn read_bank_from_dir(file_name: &str) -> Result<ContentBank, BankError> {
    let file = BANK_DIR
        .get_file(file_name)
        .ok_or_else(|| BankError::NotFound(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| BankError::Malformed("bank file is not utf-8".to_string()))?;

    ContentBank::from_json(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_load_default_bank() {
        let bank = ContentBank::load_default();

        assert_eq!(bank.name, "grades");
        assert_eq!(bank.list_tiers(), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_is_valid_tier() {
        let bank = ContentBank::load_default();

        assert!(bank.is_valid_tier("1"));
        assert!(bank.is_valid_tier("6"));
        assert!(!bank.is_valid_tier("0"));
        assert!(!bank.is_valid_tier("7"));
        assert!(!bank.is_valid_tier("9"));
        assert!(!bank.is_valid_tier(""));
    }

    #[test]
    fn test_pick_sentence_draws_from_tier() {
        let bank = ContentBank::load_default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let sentence = bank.pick_sentence("3", &mut rng).unwrap();
            assert!(!sentence.is_empty());
        }
    }

    #[test]
    fn test_pick_sentence_unknown_tier() {
        let bank = ContentBank::load_default();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(bank.pick_sentence("9", &mut rng), None);
    }

    #[test]
    fn test_pick_sentence_is_deterministic_with_seeded_rng() {
        let bank = ContentBank::load_default();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(
                bank.pick_sentence("5", &mut a),
                bank.pick_sentence("5", &mut b)
            );
        }
    }

    #[test]
    fn test_from_json_custom_bank() {
        let bank = ContentBank::from_json(
            r#"{ "name": "mini", "tiers": { "1": ["Hello!"], "2": ["Good morning!"] } }"#,
        )
        .unwrap();

        assert_eq!(bank.name, "mini");
        assert_eq!(bank.list_tiers(), vec!["1", "2"]);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(bank.pick_sentence("1", &mut rng).unwrap(), "Hello!");
    }

    #[test]
    fn test_from_json_rejects_empty_tier() {
        let err = ContentBank::from_json(r#"{ "name": "bad", "tiers": { "1": [] } }"#)
            .unwrap_err();
        assert_eq!(err, BankError::EmptyTier("1".to_string()));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            ContentBank::from_json("not json"),
            Err(BankError::Malformed(_))
        ));
    }

    #[test]
    fn test_bundled_sentences_fit_the_keyboard() {
        // Every bundled sentence must be typeable: printable ascii only.
        let bank = ContentBank::load_default();
        let mut rng = StdRng::seed_from_u64(1);

        for tier in bank.list_tiers() {
            for _ in 0..20 {
                let s = bank.pick_sentence(tier, &mut rng).unwrap();
                assert!(
                    s.chars().all(|c| c.is_ascii_graphic() || c == ' '),
                    "sentence {s:?} in tier {tier} contains non-typeable characters"
                );
            }
        }
    }
}
