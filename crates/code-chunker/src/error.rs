use crate::language::Language;
use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during code chunking
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// No language was configured for a raw-text chunking call
    #[error("language must be specified")]
    LanguageNotSpecified,

    /// Language name that the registry does not know about
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Known language without a bundled grammar
    #[error("{0}: language does not support AST parsing")]
    NoAstSupport(Language),

    /// Failed to parse the source code
    #[error("{language}: failed to parse code: {reason}")]
    ParseFailed { language: Language, reason: String },

    /// The size measure rejected a span
    #[error("failed to calculate node size with the {measure} measure: {source}")]
    Measure {
        measure: String,
        #[source]
        source: anyhow::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Node range that does not address a valid slice of the source
    #[error("Invalid chunk boundaries: start={start}, end={end}")]
    InvalidBoundaries { start: usize, end: usize },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ChunkerError {
    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a parse failure for `language`
    pub fn parse_failed(language: Language, reason: impl Into<String>) -> Self {
        Self::ParseFailed {
            language,
            reason: reason.into(),
        }
    }

    /// Wrap a size measure failure with the measure's name
    pub fn measure(measure: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Measure {
            measure: measure.into(),
            source,
        }
    }
}
