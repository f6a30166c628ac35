use crate::error::{ChunkerError, Result};
use crate::language::Language;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Tree-sitter backed parser for the bundled grammars
pub struct SourceParser {
    parser: Parser,
}

/// Parsed syntax tree together with the language it was parsed as
pub struct ParsedSource {
    tree: Tree,
    language: Language,
}

impl ParsedSource {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    /// True when tree-sitter had to recover from syntax errors
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl SourceParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Parse `source` with the grammar of `language`
    pub fn parse(&mut self, source: &str, language: Language) -> Result<ParsedSource> {
        let ts_language = language.tree_sitter_language()?;
        self.parser
            .set_language(&ts_language)
            .map_err(|e| ChunkerError::parse_failed(language, format!("failed to set language: {e}")))?;

        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ChunkerError::parse_failed(language, "parser produced no tree"))?;

        Ok(ParsedSource { tree, language })
    }

    /// Parse `source`, detecting the language from `path`
    pub fn parse_file(&mut self, path: impl AsRef<Path>, source: &str) -> Result<ParsedSource> {
        self.parse(source, Language::from_path(path))
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}
