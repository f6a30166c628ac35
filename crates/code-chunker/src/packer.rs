//! Budget-aware packing of a syntax tree into segments.
//!
//! A node that fits the budget becomes one segment. A node that does not is
//! replaced by its direct children, which are grouped greedily left to right
//! into segments; children that are themselves too large are packed
//! recursively. Leaves that still exceed the budget are emitted as they are.

use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::measure::Measure;
use crate::node::StructuralNode;
use crate::types::Segment;

/// Packs structural nodes over one source buffer
pub struct TreePacker<'a> {
    source: &'a str,
    measure: &'a Measure,
    max_size: usize,
    language: Language,
}

impl<'a> TreePacker<'a> {
    pub fn new(source: &'a str, measure: &'a Measure, max_size: usize, language: Language) -> Self {
        Self {
            source,
            measure,
            max_size,
            language,
        }
    }

    /// Pack `node` and everything below it
    pub fn pack<N: StructuralNode>(&self, node: &N) -> Result<Vec<Segment>> {
        let size = self.node_size(node)?;
        if size <= self.max_size {
            return Ok(vec![self.node_segment(node)?]);
        }

        if node.child_count() == 0 {
            log::debug!(
                "Emitting oversized {} leaf ({size} > {}) at bytes {:?}",
                node.kind(),
                self.max_size,
                node.byte_range()
            );
            return Ok(vec![self.node_segment(node)?]);
        }

        self.pack_siblings(&node.child_nodes())
    }

    /// Greedily group consecutive siblings into segments
    pub fn pack_siblings<N: StructuralNode>(&self, nodes: &[N]) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();
        let mut group: Vec<&N> = Vec::new();
        let mut group_size = 0usize;

        for node in nodes {
            let size = self.node_size(node)?;

            if size > self.max_size {
                if !group.is_empty() {
                    segments.push(self.merged_segment(&group)?);
                    group.clear();
                    group_size = 0;
                }
                segments.extend(self.pack(node)?);
                continue;
            }

            if !group.is_empty() && group_size.saturating_add(size) > self.max_size {
                segments.push(self.merged_segment(&group)?);
                group.clear();
                group_size = 0;
            }

            group.push(node);
            group_size += size;
        }

        if !group.is_empty() {
            segments.push(self.merged_segment(&group)?);
        }

        Ok(segments)
    }

    fn node_size<N: StructuralNode>(&self, node: &N) -> Result<usize> {
        let range = node.byte_range();
        self.measure.size_of(self.slice(range.start, range.end)?)
    }

    fn node_segment<N: StructuralNode>(&self, node: &N) -> Result<Segment> {
        let range = node.byte_range();
        let (start_row, end_row) = node.rows();
        Ok(Segment {
            content: self.slice(range.start, range.end)?.to_string(),
            start_line: start_row + 1,
            end_line: end_row + 1,
            start_byte: range.start,
            end_byte: range.end,
            node_types: vec![node.kind().to_string()],
            language: self.language,
        })
    }

    /// One segment spanning from the first node's start to the last node's
    /// end, including whatever separates them in the source
    fn merged_segment<N: StructuralNode>(&self, nodes: &[&N]) -> Result<Segment> {
        let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
            return Err(ChunkerError::InvalidBoundaries { start: 0, end: 0 });
        };

        let start = first.byte_range().start;
        let end = last.byte_range().end;
        Ok(Segment {
            content: self.slice(start, end)?.to_string(),
            start_line: first.rows().0 + 1,
            end_line: last.rows().1 + 1,
            start_byte: start,
            end_byte: end,
            node_types: nodes.iter().map(|node| node.kind().to_string()).collect(),
            language: self.language,
        })
    }

    fn slice(&self, start: usize, end: usize) -> Result<&'a str> {
        self.source
            .get(start..end)
            .ok_or(ChunkerError::InvalidBoundaries { start, end })
    }
}
