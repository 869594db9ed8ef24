use serde::Serialize;

use intel_protocol::{CharacterEntry, Token, TokenFlags, TokenType};

use crate::ChosenLine;

/// One token as handed to feed and alert consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenReport {
    pub text: String,
    pub kind: &'static str,
    pub is_link: bool,
    pub flags: TokenFlags,
    pub token: TokenType,
    /// Resolved batch entry for `Character` and linked `Kill` tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    pub line: String,
    pub tokens: Vec<TokenReport>,
    /// Tokenizations the winner was chosen from.
    pub alternatives: usize,
}

impl LineReport {
    pub fn new(line: &str, chosen: &ChosenLine) -> Self {
        let tokens = chosen
            .tokenization
            .iter()
            .map(|token| TokenReport::new(token, chosen))
            .collect();
        Self {
            line: line.to_string(),
            tokens,
            alternatives: chosen.alternatives,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl TokenReport {
    fn new(token: &Token, chosen: &ChosenLine) -> Self {
        let character = match &token.kind {
            TokenType::Character(index) => chosen.characters.get(*index).cloned(),
            TokenType::Kill {
                character: Some(index),
                ..
            } => chosen.characters.get(*index).cloned(),
            _ => None,
        };
        Self {
            text: token.span.text.clone(),
            kind: token.kind.name(),
            is_link: token.is_link(),
            flags: token.flags,
            token: token.kind.clone(),
            character,
        }
    }
}
