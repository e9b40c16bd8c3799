//! Colored spans and the interval set that keeps them disjoint
//!
//! Spans are collected per line. When two spans overlap, the one that
//! was added first keeps the overlapping bytes and the newcomer is
//! trimmed or split around it.

/// A colored span of text within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpan {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Abstract color identity, resolved against the palette at render time
    pub color_id: usize,
}

impl ColorSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize, color_id: usize) -> Self {
        Self {
            start,
            end,
            color_id,
        }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Move both ends forward by `offset` bytes
    pub fn shift(&mut self, offset: usize) {
        self.start += offset;
        self.end += offset;
    }
}

/// Ordered, non-overlapping spans for a single line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    spans: Vec<ColorSpan>,
}

impl IntervalSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a span; spans already present win every overlapping byte
    pub fn add(&mut self, span: ColorSpan) {
        self.spans = add_span(&self.spans, span);
    }

    /// Spans in ascending order of start offset
    pub fn spans(&self) -> &[ColorSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }
}

/// Insert `candidate` into an ordered list of disjoint spans.
///
/// Bytes already covered by `spans` are carved out of the candidate, which
/// may end up dropped entirely or split into several pieces. Every piece
/// keeps the candidate's color identity.
pub fn add_span(spans: &[ColorSpan], candidate: ColorSpan) -> Vec<ColorSpan> {
    if candidate.is_empty() {
        return spans.to_vec();
    }

    let mut result = Vec::with_capacity(spans.len() + 2);
    let mut remaining = candidate;
    let mut placed = false;

    for &existing in spans {
        if placed {
            result.push(existing);
        } else if remaining.end <= existing.start {
            // Entirely before the existing span
            result.push(remaining);
            result.push(existing);
            placed = true;
        } else if remaining.start >= existing.end {
            // Entirely after the existing span
            result.push(existing);
        } else {
            if remaining.start < existing.start {
                result.push(ColorSpan::new(
                    remaining.start,
                    existing.start,
                    remaining.color_id,
                ));
            }
            result.push(existing);
            if remaining.end > existing.end {
                remaining.start = existing.end;
            } else {
                placed = true;
            }
        }
    }

    if !placed && !remaining.is_empty() {
        result.push(remaining);
    }

    result
}
