//! Overlap stitching between neighbouring segments.
//!
//! Each segment receives the tail of its predecessor and the head of its
//! successor, both taken from the un-stitched sequence. The amount copied is
//! a percentage of the receiving segment's own length in bytes. Line numbers
//! of stitched segments are best effort.

use crate::config::MAX_OVERLAP;
use crate::types::Segment;

const SEPARATOR: &str = "\n";

/// Stitch neighbour context into every segment.
///
/// No-op for fewer than two segments or a non-positive percentage.
/// Percentages above [`MAX_OVERLAP`] are clamped.
#[must_use]
pub fn apply_overlap(segments: Vec<Segment>, percent: f64) -> Vec<Segment> {
    if segments.len() <= 1 || percent.is_nan() || percent <= 0.0 {
        return segments;
    }
    let percent = percent.min(MAX_OVERLAP);

    segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            let prev = idx.checked_sub(1).map(|i| &segments[i]);
            let next = segments.get(idx + 1);
            stitch(segment, prev, next, overlap_size(segment.content.len(), percent))
        })
        .collect()
}

fn stitch(segment: &Segment, prev: Option<&Segment>, next: Option<&Segment>, size: usize) -> Segment {
    let mut out = segment.clone();
    if size == 0 {
        return out;
    }
    // line-packed segments carry no byte offsets to adjust
    let tracks_bytes = !segment.is_generic();

    if let Some(prev) = prev {
        let split = ceil_char_boundary(&prev.content, prev.content.len().saturating_sub(size));
        let (skipped, taken) = prev.content.split_at(split);

        out.content = format!("{taken}{SEPARATOR}{}", segment.content);
        if tracks_bytes {
            out.start_byte = out.start_byte.saturating_sub(taken.len());
        }
        out.start_line = prev.start_line + newlines(skipped);
    }

    if let Some(next) = next {
        let split = floor_char_boundary(&next.content, size.min(next.content.len()));
        let taken = &next.content[..split];

        out.content.push_str(SEPARATOR);
        out.content.push_str(taken);
        if tracks_bytes {
            out.end_byte += taken.len();
        }
        out.end_line = next.start_line + newlines(taken);
    }

    out
}

/// `floor(len * percent / 100)`
fn overlap_size(len: usize, percent: f64) -> usize {
    (len as f64 * percent / 100.0).floor() as usize
}

fn newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx.min(text.len())
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
