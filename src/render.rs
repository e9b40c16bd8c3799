//! Escape sequence insertion
//!
//! Rewrites a line by wrapping every span in its palette's start and reset
//! codes. Span offsets refer to the original line; each insertion moves
//! the rest of the line, so the pending spans are shifted as we go.

use crate::palette::Palette;
use crate::span::ColorSpan;

/// Render `line` with the given spans colored.
///
/// `spans` must be sorted and disjoint, with every offset inside the line.
pub fn render(line: &[u8], spans: &[ColorSpan], palette: &Palette, total_colors: usize) -> Vec<u8> {
    if spans.is_empty() {
        return line.to_vec();
    }

    let mut buf = line.to_vec();
    let mut pending = spans.to_vec();

    for i in 0..pending.len() {
        let entry = palette.resolve(pending[i].color_id, total_colors);

        insert_at(&mut buf, pending[i].start, entry.start.as_bytes());
        shift_all(&mut pending[i..], entry.start.len());

        insert_at(&mut buf, pending[i].end, entry.reset.as_bytes());
        shift_all(&mut pending[i..], entry.reset.len());
    }

    buf
}

fn insert_at(buf: &mut Vec<u8>, index: usize, bytes: &[u8]) {
    assert!(
        index <= buf.len(),
        "insertion offset {} out of bounds for line of {} bytes",
        index,
        buf.len()
    );
    buf.splice(index..index, bytes.iter().copied());
}

fn shift_all(spans: &mut [ColorSpan], offset: usize) {
    for span in spans {
        span.shift(offset);
    }
}
