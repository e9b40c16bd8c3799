//! Line-by-line highlighting
//!
//! Ties the pieces together: each input line goes through pattern
//! matching, span resolution and rendering before the next one is read.

use std::io::{BufRead, ErrorKind, Read, Write};

use tracing::{debug, trace};

use crate::error::{ColorexpError, Result};
use crate::matcher::PatternSet;
use crate::palette::Palette;
use crate::render::render;

/// Default cap on a single input line, in bytes
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Everything needed to highlight lines, fixed for the whole run
pub struct Highlighter {
    patterns: PatternSet,
    palette: Palette,
    matching_lines_only: bool,
}

impl Highlighter {
    pub fn new(patterns: PatternSet, palette: Palette, matching_lines_only: bool) -> Self {
        Self {
            patterns,
            palette,
            matching_lines_only,
        }
    }

    /// Highlight one line (without its terminator)
    ///
    /// Returns `None` when only matching lines are wanted and this one has
    /// nothing to color.
    pub fn highlight_line(&self, line: &[u8]) -> Option<Vec<u8>> {
        let spans = self.patterns.collect(line);
        trace!(spans = ?spans.spans(), "collected spans");

        if spans.is_empty() && self.matching_lines_only {
            return None;
        }
        Some(render(
            line,
            spans.spans(),
            &self.palette,
            self.patterns.total_colors(),
        ))
    }

    /// Highlight every line of `input`, writing the results to `output`
    ///
    /// Every written line ends in `\n`. Returns the number of lines read.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W, max_line_length: usize) -> Result<usize> {
        let mut lines = LineReader::new(input, max_line_length);
        let mut count = 0;

        while let Some(line) = lines.next_line()? {
            count += 1;
            if let Some(rendered) = self.highlight_line(line) {
                output
                    .write_all(&rendered)
                    .and_then(|()| output.write_all(b"\n"))
                    .map_err(ColorexpError::Output)?;
            }
        }
        output.flush().map_err(ColorexpError::Output)?;

        debug!(lines = count, "finished input");
        Ok(count)
    }
}

/// Splits a byte stream into lines with a length cap
///
/// Lines end at `\n`; a trailing `\r` is dropped. The last line may lack a
/// terminator.
pub struct LineReader<R> {
    reader: R,
    max_len: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, max_len: usize) -> Self {
        Self {
            reader,
            max_len,
            buf: Vec::new(),
        }
    }

    /// Read the next line, or `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<&[u8]>> {
        self.buf.clear();

        // Room for the newline; anything longer is over the cap
        let limit = (self.max_len as u64).saturating_add(1);
        let read = loop {
            match (&mut self.reader).take(limit).read_until(b'\n', &mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.len() > self.max_len {
            return Err(ColorexpError::LineTooLong {
                limit: self.max_len,
            });
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        Ok(Some(self.buf.as_slice()))
    }
}
