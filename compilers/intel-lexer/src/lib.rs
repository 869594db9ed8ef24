pub mod candidate;
pub mod config;
pub mod matcher;
pub mod rules;
pub mod scanner;

use intel_protocol::{CharacterBatch, CharacterLookup, ReferenceData};
use tracing::{debug, instrument, trace};

pub use crate::candidate::{Candidate, CandidateSet};
pub use crate::config::{ConfigError, MatchKinds, ParserConfig};
pub use crate::matcher::MatchContext;
pub use crate::scanner::{scan, ScannedLine, Word};

use crate::rules::characters::{apply_statuses, collect_names};

/// A line with every typed candidate resolved, ready for segmentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexedLine<'l> {
    pub line: ScannedLine<'l>,
    /// Statuses of every name window; `Character` candidates index into it.
    pub characters: CharacterBatch,
    pub candidates: CandidateSet,
}

impl<'l> LexedLine<'l> {
    pub fn words(&self) -> usize {
        self.line.len()
    }
}

pub struct IntelLexer<'a> {
    reference: &'a dyn ReferenceData,
    characters: &'a dyn CharacterLookup,
    config: &'a ParserConfig,
}

impl<'a> IntelLexer<'a> {
    pub fn new(
        reference: &'a dyn ReferenceData,
        characters: &'a dyn CharacterLookup,
        config: &'a ParserConfig,
    ) -> Self {
        Self {
            reference,
            characters,
            config,
        }
    }

    /// Scans a line and proposes candidates for every word.
    ///
    /// Suspends once, on the batched character lookup, and only when the line
    /// has a plausible name in it.
    #[instrument(skip(self), fields(words = tracing::field::Empty))]
    pub async fn lex<'l>(
        &self,
        line: &'l str,
        regions: &[String],
        originator: Option<&str>,
    ) -> LexedLine<'l> {
        let scanned = scan(line);
        tracing::Span::current().record("words", scanned.len());
        if scanned.is_empty() {
            return LexedLine {
                line: scanned,
                ..LexedLine::default()
            };
        }

        let mut characters = if self.config.enables(MatchKinds::CHARACTER | MatchKinds::KILL) {
            collect_names(&scanned, self.config)
        } else {
            CharacterBatch::new()
        };
        if !characters.is_empty() {
            let names = characters.names();
            let statuses = self
                .characters
                .lookup_character_statuses(originator, &names)
                .await;
            trace!(requested = names.len(), found = statuses.len(), "character statuses");
            apply_statuses(&mut characters, &statuses);
        }

        let candidates =
            MatchContext::new(scanned.clone(), self.reference, &characters, self.config, regions).candidates();
        debug!(candidates = candidates.len(), "line lexed");

        LexedLine {
            line: scanned,
            characters,
            candidates,
        }
    }
}
