use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Deepest search the engine accepts.
pub const MAX_DEPTH: u32 = 4;

/// Checks a requested search depth against `MAX_DEPTH`.
pub fn check_depth(key: &str, depth: u32) -> Result<u32, EngineError> {
    if depth > MAX_DEPTH {
        return Err(invalid(key, &depth.to_string()));
    }
    Ok(depth)
}

/// Opponent strength, expressed as search depth in plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Entry,
    Advance,
}

impl Difficulty {
    pub fn depth(&self) -> u32 {
        match self {
            Difficulty::Entry => 1,
            Difficulty::Advance => 2,
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entry" => Ok(Difficulty::Entry),
            "advance" => Ok(Difficulty::Advance),
            _ => Err(EngineError::InvalidConfig {
                key: "difficulty".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Entry => write!(f, "entry"),
            Difficulty::Advance => write!(f, "advance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub hint_depth: u32,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Entry,
            hint_depth: 2,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub const DIFFICULTY_VAR: &'static str = "XIANGQI_DIFFICULTY";
    pub const HINT_DEPTH_VAR: &'static str = "XIANGQI_HINT_DEPTH";
    pub const SEED_VAR: &'static str = "XIANGQI_SEED";

    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::DIFFICULTY_VAR) {
            config.difficulty = value.trim().parse()?;
        }

        if let Some(value) = lookup(Self::HINT_DEPTH_VAR) {
            config.hint_depth = match value.trim().parse::<u32>() {
                Ok(depth) if (1..=MAX_DEPTH).contains(&depth) => depth,
                _ => return Err(invalid(Self::HINT_DEPTH_VAR, &value)),
            };
        }

        if let Some(value) = lookup(Self::SEED_VAR) {
            let seed = value.trim().parse::<u64>().map_err(|_| invalid(Self::SEED_VAR, &value))?;
            config.seed = Some(seed);
        }

        Ok(config)
    }
}

fn invalid(key: &str, value: &str) -> EngineError {
    EngineError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}
