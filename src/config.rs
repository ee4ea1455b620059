use std::env;

use crate::blockchain::{DEFAULT_DIFFICULTY, HASH_BITS};
use crate::error::{ChainError, Result};

/// Number of sample payloads the demo binary mines by default.
pub const DEFAULT_DEMO_BLOCKS: u64 = 5;

/// Runtime settings for a chain, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub difficulty: u32,
    /// Hash attempts per block before giving up; `None` searches forever.
    pub max_attempts: Option<u64>,
    pub demo_blocks: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            max_attempts: None,
            demo_blocks: DEFAULT_DEMO_BLOCKS,
        }
    }
}

impl ChainConfig {
    /// Load `.env` if present, then read `POW_DIFFICULTY`, `POW_MAX_ATTEMPTS`
    /// and `DEMO_BLOCKS`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let difficulty = match read("POW_DIFFICULTY") {
            Some(v) => parse_num::<u32>("POW_DIFFICULTY", &v)?,
            None => defaults.difficulty,
        };
        if difficulty > HASH_BITS {
            return Err(ChainError::DifficultyOutOfRange(difficulty));
        }

        let max_attempts = match read("POW_MAX_ATTEMPTS") {
            Some(v) => Some(parse_num::<u64>("POW_MAX_ATTEMPTS", &v)?).filter(|n| *n > 0),
            None => None,
        };

        let demo_blocks = match read("DEMO_BLOCKS") {
            Some(v) => parse_num::<u64>("DEMO_BLOCKS", &v)?,
            None => defaults.demo_blocks,
        };

        Ok(Self {
            difficulty,
            max_attempts,
            demo_blocks,
        })
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ChainError::Config(format!("{key} must be a non-negative integer, got {value:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ChainConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ChainConfig::default());
        assert_eq!(cfg.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(cfg.max_attempts, None);
    }

    #[test]
    fn reads_all_keys() {
        let cfg = ChainConfig::from_lookup(lookup(&[
            ("POW_DIFFICULTY", "8"),
            ("POW_MAX_ATTEMPTS", " 1000 "),
            ("DEMO_BLOCKS", "3"),
        ]))
        .unwrap();
        assert_eq!(cfg.difficulty, 8);
        assert_eq!(cfg.max_attempts, Some(1000));
        assert_eq!(cfg.demo_blocks, 3);
    }

    #[test]
    fn zero_or_blank_attempts_means_unbounded() {
        let cfg = ChainConfig::from_lookup(lookup(&[("POW_MAX_ATTEMPTS", "0")])).unwrap();
        assert_eq!(cfg.max_attempts, None);
        let cfg = ChainConfig::from_lookup(lookup(&[("POW_MAX_ATTEMPTS", "  ")])).unwrap();
        assert_eq!(cfg.max_attempts, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ChainConfig::from_lookup(lookup(&[("POW_DIFFICULTY", "hard")])),
            Err(ChainError::Config(_))
        ));
        assert!(matches!(
            ChainConfig::from_lookup(lookup(&[("POW_DIFFICULTY", "300")])),
            Err(ChainError::DifficultyOutOfRange(300))
        ));
        assert!(matches!(
            ChainConfig::from_lookup(lookup(&[("DEMO_BLOCKS", "-1")])),
            Err(ChainError::Config(_))
        ));
    }
}
