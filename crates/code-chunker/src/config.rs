use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::measure::Measure;
use serde::{Deserialize, Serialize};

/// Default maximum segment size, in units of the configured measure
pub const DEFAULT_MAX_SIZE: usize = 1500;

/// Default overlap percentage between neighbouring segments
pub const DEFAULT_OVERLAP: f64 = 0.0;

/// Largest overlap percentage; larger values are clamped to it
pub const MAX_OVERLAP: f64 = 50.0;

/// Configuration for one chunking call.
///
/// Missing fields in a deserialized document fall back to [`Default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Maximum segment size as reported by `measure` (hard limit except
    /// for leaves that cannot be split further)
    pub max_size: usize,

    /// Share of each segment copied into its neighbours, in percent.
    /// Clamped to `0..=50`.
    pub overlap_percent: f64,

    /// Language of the source; required for raw-text chunking, detected
    /// from the path when chunking files
    pub language: Option<Language>,

    /// Cost model for the budget
    pub measure: Measure,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            overlap_percent: DEFAULT_OVERLAP,
            language: None,
            measure: Measure::Words,
        }
    }
}

impl ChunkerConfig {
    /// Default config for a given language
    pub fn for_language(language: Language) -> Self {
        Self {
            language: Some(language),
            ..Default::default()
        }
    }

    /// Create config optimized for embeddings (smaller, focused chunks)
    pub fn for_embeddings() -> Self {
        Self {
            max_size: 512,
            ..Default::default()
        }
    }

    /// Create config optimized for LLM context (larger, comprehensive chunks)
    pub fn for_llm_context() -> Self {
        Self {
            max_size: 2048,
            ..Default::default()
        }
    }

    /// Overlap percentage clamped to `0..=MAX_OVERLAP`
    #[must_use]
    pub fn effective_overlap(&self) -> f64 {
        if self.overlap_percent.is_nan() {
            return 0.0;
        }
        self.overlap_percent.clamp(0.0, MAX_OVERLAP)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(ChunkerError::invalid_config("max_size must be > 0"));
        }

        Ok(())
    }
}
