//! Pluggable size measures.
//!
//! The budget is expressed in whatever unit the active [`SizeMeasure`]
//! reports. Packing decisions assume the measure is pure: the same text
//! always yields the same magnitude within one call.

use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Converts a span of text into a non-negative magnitude.
///
/// Implementations must return `0` for the empty string. A measure shared
/// across threads must be safe for concurrent use, hence the `Send + Sync`
/// bound.
pub trait SizeMeasure: Send + Sync {
    /// Short identifier used in error messages
    fn name(&self) -> &str;

    /// Measure `text`
    fn measure(&self, text: &str) -> anyhow::Result<usize>;
}

/// Whitespace-delimited word count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordCount;

impl SizeMeasure for WordCount {
    fn name(&self) -> &str {
        "words"
    }

    fn measure(&self, text: &str) -> anyhow::Result<usize> {
        Ok(text.split_whitespace().count())
    }
}

/// Raw UTF-8 byte length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteCount;

impl SizeMeasure for ByteCount {
    fn name(&self) -> &str {
        "bytes"
    }

    fn measure(&self, text: &str) -> anyhow::Result<usize> {
        Ok(text.len())
    }
}

/// Line count; a trailing line without `\n` still counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCount;

impl SizeMeasure for LineCount {
    fn name(&self) -> &str {
        "lines"
    }

    fn measure(&self, text: &str) -> anyhow::Result<usize> {
        if text.is_empty() {
            return Ok(0);
        }
        let newlines = text.bytes().filter(|&b| b == b'\n').count();
        Ok(newlines + usize::from(!text.ends_with('\n')))
    }
}

/// Measure selection carried by [`crate::ChunkerConfig`].
///
/// The built-in variants serialize by name; `Custom` can only be set in code.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    #[default]
    Words,
    Bytes,
    Lines,
    /// Host-provided measure. Skipped by serde, so serializing a value
    /// (or a [`crate::ChunkerConfig`] holding one) returns an error.
    #[serde(skip)]
    Custom(Arc<dyn SizeMeasure>),
}

impl Measure {
    /// Wrap a host-provided measure
    pub fn custom(measure: impl SizeMeasure + 'static) -> Self {
        Self::Custom(Arc::new(measure))
    }

    /// Measure `text`, wrapping failures with the measure's name
    pub(crate) fn size_of(&self, text: &str) -> Result<usize> {
        self.measure(text)
            .map_err(|err| ChunkerError::measure(self.name(), err))
    }
}

impl SizeMeasure for Measure {
    fn name(&self) -> &str {
        match self {
            Self::Words => WordCount.name(),
            Self::Bytes => ByteCount.name(),
            Self::Lines => LineCount.name(),
            Self::Custom(inner) => inner.name(),
        }
    }

    fn measure(&self, text: &str) -> anyhow::Result<usize> {
        match self {
            Self::Words => WordCount.measure(text),
            Self::Bytes => ByteCount.measure(text),
            Self::Lines => LineCount.measure(text),
            Self::Custom(inner) => inner.measure(text),
        }
    }
}

impl fmt::Debug for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(inner) => f.debug_tuple("Custom").field(&inner.name()).finish(),
            builtin => f.write_str(builtin.name()),
        }
    }
}

impl FromStr for Measure {
    type Err = ChunkerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "words" => Ok(Self::Words),
            "bytes" => Ok(Self::Bytes),
            "lines" => Ok(Self::Lines),
            other => Err(ChunkerError::invalid_config(format!(
                "unknown size measure '{other}' (expected words, bytes or lines)"
            ))),
        }
    }
}
