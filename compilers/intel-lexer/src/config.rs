use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

bitflags! {
    /// Token kinds the matcher is allowed to propose.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MatchKinds: u16 {
        const SYSTEM = 1;
        const CHARACTER = 1 << 1;
        const SHIP = 1 << 2;
        const COUNT = 1 << 3;
        const KEYWORD = 1 << 4;
        const QUESTION = 1 << 5;
        const KILL = 1 << 6;
        const GATE = 1 << 7;
        const MOVEMENT = 1 << 8;
        const URL = 1 << 9;
    }
}

impl Default for MatchKinds {
    fn default() -> Self {
        MatchKinds::all()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be at least 1")]
    ZeroLimit { field: &'static str },
    #[error("invalid parser configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Longest character name considered, in words.
    pub max_character_words: usize,
    pub max_ship_words: usize,
    pub max_system_words: usize,
    /// Longest trailing question fragment, in words.
    pub max_question_words: usize,
    /// Suffix tokenizations kept per position and head class while enumerating.
    pub beam_width: usize,
    pub kinds: MatchKinds,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_character_words: 3,
            max_ship_words: 4,
            max_system_words: 3,
            max_question_words: 4,
            beam_width: 16,
            kinds: MatchKinds::all(),
        }
    }
}

impl ParserConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_character_words", self.max_character_words),
            ("max_ship_words", self.max_ship_words),
            ("max_system_words", self.max_system_words),
            ("max_question_words", self.max_question_words),
            ("beam_width", self.beam_width),
        ];
        match limits.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ConfigError::ZeroLimit { field: *field }),
            None => Ok(()),
        }
    }

    pub fn enables(&self, kinds: MatchKinds) -> bool {
        self.kinds.intersects(kinds)
    }
}
