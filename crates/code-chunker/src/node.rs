use std::ops::Range;

/// Read-only view of one node of a syntax tree over an immutable source.
///
/// The packer only needs positions, a type tag and the ordered direct
/// children, so any parser can be plugged in behind this trait.
pub trait StructuralNode: Sized {
    /// Type tag of the node (grammar kind)
    fn kind(&self) -> &str;

    /// Half-open byte range into the source buffer
    fn byte_range(&self) -> Range<usize>;

    /// Start and end rows, 0-based
    fn rows(&self) -> (usize, usize);

    fn child_count(&self) -> usize;

    /// Direct children in source order
    fn child_nodes(&self) -> Vec<Self>;
}

impl<'tree> StructuralNode for tree_sitter::Node<'tree> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn byte_range(&self) -> Range<usize> {
        self.start_byte()..self.end_byte()
    }

    fn rows(&self) -> (usize, usize) {
        (self.start_position().row, self.end_position().row)
    }

    fn child_count(&self) -> usize {
        tree_sitter::Node::child_count(self)
    }

    fn child_nodes(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        self.children(&mut cursor).collect()
    }
}

/// Owned syntax node for hosts that bring their own parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedNode {
    kind: String,
    bytes: Range<usize>,
    rows: (usize, usize),
    children: Vec<OwnedNode>,
}

impl OwnedNode {
    /// Create a childless node with explicit positions
    pub fn new(kind: impl Into<String>, bytes: Range<usize>, rows: (usize, usize)) -> Self {
        Self {
            kind: kind.into(),
            bytes,
            rows,
            children: Vec::new(),
        }
    }

    /// Create a childless node whose rows are derived from `source`.
    ///
    /// Offsets past the end of `source` are counted up to the end.
    pub fn spanning(source: &str, kind: impl Into<String>, bytes: Range<usize>) -> Self {
        let row_at = |offset: usize| {
            source.as_bytes()[..offset.min(source.len())]
                .iter()
                .filter(|&&b| b == b'\n')
                .count()
        };
        let rows = (row_at(bytes.start), row_at(bytes.end));
        Self::new(kind, bytes, rows)
    }

    /// Builder: replace children
    #[must_use]
    pub fn with_children(mut self, children: Vec<OwnedNode>) -> Self {
        self.children = children;
        self
    }

    pub fn push_child(&mut self, child: OwnedNode) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[OwnedNode] {
        &self.children
    }
}

impl<'a> StructuralNode for &'a OwnedNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn byte_range(&self) -> Range<usize> {
        self.bytes.clone()
    }

    fn rows(&self) -> (usize, usize) {
        self.rows
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_nodes(&self) -> Vec<Self> {
        let node: &'a OwnedNode = *self;
        node.children.iter().collect()
    }
}
