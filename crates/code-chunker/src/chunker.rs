use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::lines::pack_lines;
use crate::node::StructuralNode;
use crate::overlap::apply_overlap;
use crate::packer::TreePacker;
use crate::parser::SourceParser;
use crate::types::Segment;
use std::path::Path;

/// Main chunker interface for processing code
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker with a validated configuration
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Chunk raw text in the configured language.
    ///
    /// Fails with [`ChunkerError::LanguageNotSpecified`] when the
    /// configuration carries no language.
    pub fn chunk(&self, content: &str) -> Result<Vec<Segment>> {
        let language = self.configured_language()?;
        self.chunk_with_language(content, language)
    }

    /// Chunk code from a file, detecting the language from the path unless
    /// one is configured
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Result<Vec<Segment>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let language = self
            .config
            .language
            .unwrap_or_else(|| Language::from_path(path));

        log::debug!("Chunking {} as {language}", path.display());
        self.chunk_with_language(&content, language)
    }

    /// Chunk with a caller-provided tree; `None` selects line-based packing
    pub fn chunk_tree<N: StructuralNode>(
        &self,
        content: &str,
        root: Option<N>,
    ) -> Result<Vec<Segment>> {
        let language = self.configured_language()?;
        self.build(content, root, language)
    }

    fn chunk_with_language(&self, content: &str, language: Language) -> Result<Vec<Segment>> {
        if content.is_empty() {
            return Ok(Vec::new());
        }

        if !language.supports_ast() {
            log::debug!("No grammar for {language}, using line-based chunking");
            return self.build(content, None::<tree_sitter::Node<'_>>, language);
        }

        match SourceParser::new().parse(content, language) {
            Ok(parsed) => {
                if parsed.has_errors() {
                    log::debug!("{language} source has syntax errors, chunking recovered tree");
                }
                self.build(content, Some(parsed.root_node()), language)
            }
            Err(e) => {
                log::warn!("AST parsing failed, falling back to line-based chunking: {e}");
                self.build(content, None::<tree_sitter::Node<'_>>, language)
            }
        }
    }

    fn build<N: StructuralNode>(
        &self,
        content: &str,
        root: Option<N>,
        language: Language,
    ) -> Result<Vec<Segment>> {
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let measure = &self.config.measure;
        let max_size = self.config.max_size;
        let segments = match root {
            Some(root) => TreePacker::new(content, measure, max_size, language).pack(&root)?,
            None => pack_lines(content, measure, max_size, language)?,
        };

        Ok(apply_overlap(segments, self.config.effective_overlap()))
    }

    fn configured_language(&self) -> Result<Language> {
        self.config
            .language
            .ok_or(ChunkerError::LanguageNotSpecified)
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Measure every segment with the configured measure and summarize
    pub fn stats(&self, segments: &[Segment]) -> Result<ChunkingStats> {
        let sizes = segments
            .iter()
            .map(|segment| self.config.measure.size_of(&segment.content))
            .collect::<Result<Vec<_>>>()?;

        let total_size: usize = sizes.iter().sum();
        Ok(ChunkingStats {
            total_segments: segments.len(),
            total_lines: segments.iter().map(Segment::line_count).sum(),
            total_size,
            avg_size: if sizes.is_empty() {
                0
            } else {
                total_size / sizes.len()
            },
            min_size: sizes.iter().copied().min().unwrap_or(0),
            max_size: sizes.iter().copied().max().unwrap_or(0),
            over_budget: sizes
                .iter()
                .filter(|&&size| size > self.config.max_size)
                .count(),
        })
    }
}

/// Statistics about chunking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkingStats {
    pub total_segments: usize,
    pub total_lines: usize,
    pub total_size: usize,
    pub avg_size: usize,
    pub min_size: usize,
    pub max_size: usize,
    /// Segments larger than the budget (unsplittable leaves, or overlap)
    pub over_budget: usize,
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Segments: {} | Lines: {} | Size: {} | Avg: {} | Range: {}-{} | Over budget: {}",
            self.total_segments,
            self.total_lines,
            self.total_size,
            self.avg_size,
            self.min_size,
            self.max_size,
            self.over_budget
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{Measure, SizeMeasure};
    use crate::node::OwnedNode;
    use pretty_assertions::assert_eq;

    const GO_CODE: &str = r#"package main

func add(a, b int) int {
	return a + b
}

func subtract(a, b int) int {
	return a - b
}

func multiply(a, b int) int {
	return a * b
}
"#;

    struct SemicolonCount;

    impl SizeMeasure for SemicolonCount {
        fn name(&self) -> &str {
            "semicolons"
        }

        fn measure(&self, text: &str) -> anyhow::Result<usize> {
            Ok(text.matches(';').count())
        }
    }

    fn chunker(config: ChunkerConfig) -> Chunker {
        Chunker::new(config).unwrap()
    }

    #[test]
    fn small_function_fits_in_one_segment() {
        let code = "func hello() { return 1 }";
        let chunker = chunker(ChunkerConfig::for_language(Language::Go));

        let segments = chunker.chunk(code).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!((segments[0].start_line, segments[0].end_line), (1, 1));
        assert_eq!(segments[0].language, Language::Go);
        assert!(!segments[0].is_generic());
    }

    #[test]
    fn missing_language_is_a_configuration_error() {
        let chunker = chunker(ChunkerConfig::default());
        assert!(matches!(
            chunker.chunk("func test() {}"),
            Err(ChunkerError::LanguageNotSpecified)
        ));
        assert!(matches!(
            chunker.chunk_tree::<&OwnedNode>("text", None),
            Err(ChunkerError::LanguageNotSpecified)
        ));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = ChunkerConfig {
            max_size: 0,
            ..ChunkerConfig::for_language(Language::Go)
        };
        assert!(matches!(
            Chunker::new(config),
            Err(ChunkerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_input_yields_no_segments() {
        for language in [Language::Go, Language::Generic, Language::Sql] {
            let chunker = chunker(ChunkerConfig::for_language(language));
            assert!(chunker.chunk("").unwrap().is_empty(), "{language}");
        }
    }

    #[test]
    fn splits_at_function_boundaries() {
        let chunker = chunker(ChunkerConfig {
            max_size: 15,
            ..ChunkerConfig::for_language(Language::Go)
        });

        let segments = chunker.chunk(GO_CODE).unwrap();

        assert!(segments.len() >= 2);
        for segment in &segments {
            assert_eq!(
                segment.content.matches('{').count(),
                segment.content.matches('}').count(),
                "unbalanced braces in {:?}",
                segment.content
            );
        }
    }

    #[test]
    fn custom_measure_drives_the_budget() {
        let code = r#"fmt.Println("1"); fmt.Println("2"); fmt.Println("3");"#;
        let chunker = chunker(ChunkerConfig {
            max_size: 2,
            measure: Measure::custom(SemicolonCount),
            ..ChunkerConfig::for_language(Language::Go)
        });

        let segments = chunker.chunk(code).unwrap();

        assert!(segments.len() >= 2, "got {segments:?}");
    }

    #[test]
    fn generic_language_uses_line_packing() {
        let chunker = chunker(ChunkerConfig {
            max_size: 3,
            ..ChunkerConfig::for_language(Language::Generic)
        });

        let segments = chunker
            .chunk("Line 1\nLine 2\nLine 3\nLine 4\nLine 5")
            .unwrap();

        assert_eq!(segments.len(), 5);
        assert!(segments.iter().all(Segment::is_generic));
        assert!(segments.iter().all(|s| s.language == Language::Generic));
    }

    #[test]
    fn grammar_less_language_falls_back_silently() {
        let chunker = chunker(ChunkerConfig {
            max_size: 4,
            ..ChunkerConfig::for_language(Language::Sql)
        });

        let segments = chunker
            .chunk("SELECT id, name\nFROM users\nWHERE active = 1;\n")
            .unwrap();

        assert!(!segments.is_empty());
        assert!(segments.iter().all(Segment::is_generic));
        assert!(segments.iter().all(|s| s.language == Language::Sql));
    }

    #[test]
    fn caller_tree_is_packed_and_none_falls_back() {
        let source = "a b c\nd e f\ng h i";
        let root = OwnedNode::spanning(source, "doc", 0..source.len()).with_children(vec![
            OwnedNode::spanning(source, "para", 0..5),
            OwnedNode::spanning(source, "para", 6..11),
            OwnedNode::spanning(source, "para", 12..17),
        ]);
        let chunker = chunker(ChunkerConfig {
            max_size: 6,
            ..ChunkerConfig::for_language(Language::Markdown)
        });

        let segments = chunker.chunk_tree(source, Some(&root)).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].node_types, ["para", "para"]);
        assert_eq!(segments[1].content, "g h i");

        let lines = chunker.chunk_tree::<&OwnedNode>(source, None).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(Segment::is_generic));
    }

    #[test]
    fn overlap_is_applied_after_packing() {
        let base = chunker(ChunkerConfig {
            max_size: 10,
            ..ChunkerConfig::for_language(Language::Go)
        });
        let overlapped = chunker(ChunkerConfig {
            overlap_percent: 20.0,
            ..base.config().clone()
        });

        let plain = base.chunk(GO_CODE).unwrap();
        let stitched = overlapped.chunk(GO_CODE).unwrap();

        assert_eq!(plain.len(), stitched.len());
        assert!(plain.len() > 1);
        let plain_len: usize = plain.iter().map(|s| s.content.len()).sum();
        let stitched_len: usize = stitched.iter().map(|s| s.content.len()).sum();
        assert!(stitched_len > plain_len);
        for (before, after) in plain.iter().zip(&stitched) {
            assert!(after.content.contains(&before.content));
        }
    }

    #[test]
    fn chunking_is_deterministic() {
        let chunker = chunker(ChunkerConfig {
            max_size: 12,
            overlap_percent: 15.0,
            ..ChunkerConfig::for_language(Language::Go)
        });

        assert_eq!(chunker.chunk(GO_CODE).unwrap(), chunker.chunk(GO_CODE).unwrap());
    }

    #[test]
    fn chunk_file_detects_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("math.go");
        std::fs::write(&path, GO_CODE).unwrap();

        let segments = chunker(ChunkerConfig::default()).chunk_file(&path).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].language, Language::Go);
        assert_eq!(segments[0].node_types, ["source_file"]);
    }

    #[test]
    fn chunk_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = chunker(ChunkerConfig::default())
            .chunk_file(dir.path().join("missing.rs"))
            .unwrap_err();
        assert!(matches!(err, ChunkerError::IoError(_)));
    }

    #[test]
    fn stats_count_over_budget_segments() {
        let chunker = chunker(ChunkerConfig {
            max_size: 3,
            ..ChunkerConfig::for_language(Language::Generic)
        });
        let segments = chunker.chunk("a b\nc d e f g\nh").unwrap();

        let stats = chunker.stats(&segments).unwrap();

        assert_eq!(stats.total_segments, 3);
        assert_eq!(stats.total_size, 8);
        assert_eq!(stats.min_size, 1);
        assert_eq!(stats.max_size, 5);
        assert_eq!(stats.over_budget, 1);
        assert!(stats.to_string().contains("Over budget: 1"));
    }
}
