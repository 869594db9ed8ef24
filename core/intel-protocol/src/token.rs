use bitflags::bitflags;
use thiserror::Error;

use crate::ids::CharacterIndex;
use crate::model::{ShipType, SolarSystem};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A run of consecutive words of a line, `start..end` in word indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
    /// Original text of the span, inner whitespace preserved.
    pub text: String,
}

impl WordSpan {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum KeywordKind {
    Clear,
    NoVisual,
    GateCamp,
    Bubbles,
    CombatProbes,
    Cyno,
    Spike,
    Wormhole,
    Ess,
    Skyhook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum QuestionKind {
    Location,
    ShipTypes,
    Number,
    Status,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum TokenType {
    /// Unclassified residual text.
    PlainText,
    System(SolarSystem),
    Character(CharacterIndex),
    Ship {
        ship: ShipType,
        count: u32,
        is_plural: bool,
    },
    Count {
        value: u32,
        is_plus: bool,
    },
    Keyword(KeywordKind),
    /// Trailing interrogative fragment, `text` is the fragment as typed.
    Question {
        kind: QuestionKind,
        text: String,
    },
    /// `Kill: <name> [<ticker>] (<ship>)`
    Kill {
        name: String,
        character: Option<CharacterIndex>,
        organization: Option<String>,
        target: ShipType,
    },
    Gate {
        system: SolarSystem,
        is_ansiblex: bool,
    },
    Movement {
        verb: String,
        system: SolarSystem,
        is_gate: bool,
    },
    Url,
}

impl TokenType {
    pub fn ship(ship: ShipType) -> Self {
        TokenType::Ship {
            ship,
            count: 1,
            is_plural: false,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, TokenType::PlainText)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenType::PlainText => "PlainText",
            TokenType::System(_) => "System",
            TokenType::Character(_) => "Character",
            TokenType::Ship { .. } => "Ship",
            TokenType::Count { .. } => "Count",
            TokenType::Keyword(_) => "Keyword",
            TokenType::Question { .. } => "Question",
            TokenType::Kill { .. } => "Kill",
            TokenType::Gate { .. } => "Gate",
            TokenType::Movement { .. } => "Movement",
            TokenType::Url => "Url",
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct TokenFlags: u8 {
        /// Span was pasted as an in-game link (double-space bracketed).
        const LINK = 1;
        /// Not-active character whose text also reads as ordinary words.
        const WORD_LIKE = 2;
        /// System resolved outside the active regions.
        const OUT_OF_REGION = 4;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Token {
    pub span: WordSpan,
    pub kind: TokenType,
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(span: WordSpan, kind: TokenType) -> Self {
        Self {
            span,
            kind,
            flags: TokenFlags::empty(),
        }
    }

    pub fn plain(span: WordSpan) -> Self {
        Self::new(span, TokenType::PlainText)
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_link(&self) -> bool {
        self.flags.contains(TokenFlags::LINK)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("token {index} has an empty span")]
    EmptySpan { index: usize },
    #[error("token {index} starts at word {found}, expected word {expected}")]
    Discontinuous {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("token {index} text {text:?} does not reproduce its words")]
    TextMismatch { index: usize, text: String },
    #[error("tokens cover {covered} of {total} words")]
    Incomplete { covered: usize, total: usize },
}

/// One complete segmentation of a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Tokenization {
    pub tokens: Vec<Token>,
}

impl Tokenization {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Verifies the tokens cover `words` in order with no gaps or overlaps.
    pub fn check_coverage<S: AsRef<str>>(&self, words: &[S]) -> Result<(), CoverageError> {
        let mut expected = 0;
        for (index, token) in self.tokens.iter().enumerate() {
            let span = &token.span;
            if span.is_empty() {
                return Err(CoverageError::EmptySpan { index });
            }
            if span.start != expected {
                return Err(CoverageError::Discontinuous {
                    index,
                    expected,
                    found: span.start,
                });
            }
            let reproduced = words
                .get(span.start..span.end)
                .map(|ws| span.text.split_whitespace().eq(ws.iter().map(|w| w.as_ref())))
                .unwrap_or(false);
            if !reproduced {
                return Err(CoverageError::TextMismatch {
                    index,
                    text: span.text.clone(),
                });
            }
            expected = span.end;
        }
        if expected != words.len() {
            return Err(CoverageError::Incomplete {
                covered: expected,
                total: words.len(),
            });
        }
        Ok(())
    }
}

impl IntoIterator for Tokenization {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
