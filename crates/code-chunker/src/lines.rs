use crate::error::Result;
use crate::language::Language;
use crate::measure::Measure;
use crate::types::{Segment, GENERIC_NODE_TYPE};

/// Group consecutive lines of `content` into segments of at most `max_size`.
///
/// A single line larger than the budget becomes its own segment. Byte
/// offsets are not tracked and are reported as 0.
pub fn pack_lines(
    content: &str,
    measure: &Measure,
    max_size: usize,
    language: Language,
) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_size = 0usize;
    let mut start_line = 1;

    for line in content.split('\n') {
        let line_size = measure.size_of(line)?;

        if !current.is_empty() && current_size.saturating_add(line_size) > max_size {
            segments.push(line_segment(&current, start_line, language));
            start_line += current.len();
            current.clear();
            current_size = 0;
        }

        current.push(line);
        current_size += line_size;
    }

    if !current.is_empty() {
        segments.push(line_segment(&current, start_line, language));
    }

    Ok(segments)
}

fn line_segment(lines: &[&str], start_line: usize, language: Language) -> Segment {
    Segment {
        content: lines.join("\n"),
        start_line,
        end_line: start_line + lines.len() - 1,
        start_byte: 0,
        end_byte: 0,
        node_types: vec![GENERIC_NODE_TYPE.to_string()],
        language,
    }
}
