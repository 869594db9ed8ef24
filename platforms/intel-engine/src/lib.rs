pub mod report;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use intel_catalog::{from_archive, Catalog, CatalogError};
use intel_lexer::{ConfigError, IntelLexer, ParserConfig};
use intel_protocol::{CharacterBatch, CharacterIndex, CharacterLookup, ReferenceData, Tokenization};

pub use intel_solver::choose;
pub use report::{LineReport, TokenReport};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Every retained reading of one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub words: Vec<String>,
    /// Names looked up for the line; `Character` tokens index into it.
    pub characters: CharacterBatch,
    /// Best first.
    pub tokenizations: Vec<Tokenization>,
}

impl ParsedLine {
    pub fn is_empty(&self) -> bool {
        self.tokenizations.is_empty()
    }
}

/// The winning reading of one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChosenLine {
    pub words: Vec<String>,
    pub characters: CharacterBatch,
    pub tokenization: Tokenization,
    pub alternatives: usize,
}

impl ChosenLine {
    pub fn character_name(&self, index: CharacterIndex) -> Option<&str> {
        self.characters.get(index).map(|entry| entry.name.as_str())
    }
}

/// Stateless line parser over shared reference data.
///
/// Cheap to share: lines can be parsed concurrently from many tasks.
pub struct IntelEngine {
    reference: Arc<dyn ReferenceData>,
    characters: Arc<dyn CharacterLookup>,
    config: ParserConfig,
}

impl IntelEngine {
    pub fn new(
        reference: Arc<dyn ReferenceData>,
        characters: Arc<dyn CharacterLookup>,
        config: ParserConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            reference,
            characters,
            config,
        })
    }

    /// Builds the engine over a catalog archive produced by the compiler tool.
    pub fn from_archive(
        bytes: &[u8],
        characters: Arc<dyn CharacterLookup>,
        config: ParserConfig,
    ) -> Result<Self, EngineError> {
        let catalog = Catalog::from_data(&from_archive(bytes)?)?;
        Self::new(Arc::new(catalog), characters, config)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// All retained tokenizations of `line`, best first. Blank lines give none.
    pub async fn parse(&self, line: &str, regions: &[String]) -> ParsedLine {
        self.parse_from(line, regions, None).await
    }

    /// Like [`parse`](Self::parse), passing the line's author to the character lookup.
    #[instrument(skip(self, line), fields(len = line.len()))]
    pub async fn parse_from(&self, line: &str, regions: &[String], originator: Option<&str>) -> ParsedLine {
        let lexer = IntelLexer::new(&*self.reference, &*self.characters, &self.config);
        let lexed = lexer.lex(line, regions, originator).await;
        let tokenizations = intel_solver::enumerate(&lexed, self.config.beam_width);
        debug!(
            words = lexed.words(),
            tokenizations = tokenizations.len(),
            "line parsed"
        );

        ParsedLine {
            words: lexed.line.texts().into_iter().map(str::to_string).collect(),
            characters: lexed.characters,
            tokenizations,
        }
    }

    pub fn choose(&self, parsed: ParsedLine) -> ChosenLine {
        let tokenization = choose(&parsed.tokenizations);
        ChosenLine {
            words: parsed.words,
            characters: parsed.characters,
            tokenization,
            alternatives: parsed.tokenizations.len(),
        }
    }

    /// Parses and chooses in one step.
    pub async fn tokenize(&self, line: &str, regions: &[String]) -> ChosenLine {
        self.tokenize_from(line, regions, None).await
    }

    pub async fn tokenize_from(&self, line: &str, regions: &[String], originator: Option<&str>) -> ChosenLine {
        let parsed = self.parse_from(line, regions, originator).await;
        self.choose(parsed)
    }

    pub async fn report(&self, line: &str, regions: &[String], originator: Option<&str>) -> LineReport {
        let chosen = self.tokenize_from(line, regions, originator).await;
        LineReport::new(line, &chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intel_catalog::{to_archive, CatalogData, StaticCharacterDirectory};

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ParserConfig {
            beam_width: 0,
            ..ParserConfig::default()
        };
        let result = IntelEngine::new(
            Arc::new(Catalog::default()),
            Arc::new(StaticCharacterDirectory::new()),
            config,
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_from_archive() {
        let bytes = to_archive(&CatalogData::default()).unwrap();
        let engine = IntelEngine::from_archive(
            &bytes,
            Arc::new(StaticCharacterDirectory::new()),
            ParserConfig::default(),
        );
        assert!(engine.is_ok());

        let corrupt = IntelEngine::from_archive(
            &[0, 1],
            Arc::new(StaticCharacterDirectory::new()),
            ParserConfig::default(),
        );
        assert!(matches!(corrupt, Err(EngineError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_prose_is_one_plain_token() {
        let engine = IntelEngine::new(
            Arc::new(Catalog::default()),
            Arc::new(StaticCharacterDirectory::new()),
            ParserConfig::default(),
        )
        .unwrap();

        let chosen = engine.tokenize("nothing to see here", &[]).await;
        assert_eq!(chosen.tokenization.len(), 1);
        assert_eq!(chosen.tokenization.tokens[0].span.text, "nothing to see here");
        assert_eq!(chosen.words.len(), 4);
    }
}
