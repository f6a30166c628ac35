//! # CAST Code Chunker
//!
//! Budget-aware, syntax-tree driven chunking of source code and text.
//!
//! ## Philosophy
//!
//! Segments are built from a syntax tree so that:
//! - Every segment fits the size budget, unless it is a leaf that cannot be split
//! - Boundaries fall between syntax nodes, never inside a subtree that fits
//! - Small neighbouring nodes are merged into well-filled segments
//! - Optional overlap repeats neighbour context at each boundary
//!
//! ## Architecture
//!
//! ```text
//! Source Code
//!     │
//!     ├──> Language (configured, or detected from the file path)
//!     │
//!     ├──> Tree-sitter Parsing → syntax tree
//!     │         (no grammar / parse failure → line packing)
//!     │
//!     ├──> Tree Packing
//!     │    ├─> Accept subtrees that fit the budget
//!     │    ├─> Greedily merge small siblings
//!     │    └─> Recurse into oversized children
//!     │
//!     └──> Overlap Stitching (optional)
//!          └─> Emit Segment[] with lines, bytes and node types
//! ```
//!
//! The budget is measured by a pluggable [`SizeMeasure`]: words by default,
//! bytes, lines, or any host-provided cost model such as a tokenizer.
//!
//! ## Example
//!
//! ```rust
//! use cast_code_chunker::{Chunker, ChunkerConfig, Language};
//!
//! let config = ChunkerConfig {
//!     max_size: 40,
//!     ..ChunkerConfig::for_language(Language::Rust)
//! };
//! let chunker = Chunker::new(config).unwrap();
//!
//! let code = r#"
//! fn process_data(input: &str) -> String {
//!     let cleaned = input.trim();
//!     cleaned.to_uppercase()
//! }
//! "#;
//!
//! let segments = chunker.chunk(code).unwrap();
//! for segment in segments {
//!     println!("Segment at lines {}-{}: {:?}",
//!              segment.start_line, segment.end_line, segment.node_types);
//! }
//! ```

mod chunker;
mod config;
mod error;
mod language;
mod lines;
mod measure;
mod node;
mod overlap;
mod packer;
mod parser;
mod types;

pub use chunker::{Chunker, ChunkingStats};
pub use config::{ChunkerConfig, DEFAULT_MAX_SIZE, DEFAULT_OVERLAP, MAX_OVERLAP};
pub use error::{ChunkerError, Result};
pub use language::Language;
pub use lines::pack_lines;
pub use measure::{ByteCount, LineCount, Measure, SizeMeasure, WordCount};
pub use node::{OwnedNode, StructuralNode};
pub use overlap::apply_overlap;
pub use packer::TreePacker;
pub use parser::{ParsedSource, SourceParser};
pub use types::{Segment, GENERIC_NODE_TYPE};
