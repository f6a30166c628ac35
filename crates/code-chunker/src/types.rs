use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Node type tag carried by segments of the line-based fallback
pub const GENERIC_NODE_TYPE: &str = "generic";

/// One bounded unit of chunker output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    /// Exact source slice (or overlap-stitched text)
    pub content: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// Start byte offset into the source (0 for line-based segments)
    pub start_byte: usize,

    /// End byte offset, exclusive (0 for line-based segments)
    pub end_byte: usize,

    /// Type tags of the nodes that make up this segment, in order
    pub node_types: Vec<String>,

    /// Language the segment was chunked as
    pub language: Language,
}

impl Segment {
    /// Get the number of lines in this segment
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Check if segment contains a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Length of the covered source range
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// True for segments produced by the line-based fallback
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.node_types.len() == 1 && self.node_types[0] == GENERIC_NODE_TYPE
    }
}
