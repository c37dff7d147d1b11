//! Writer that indents every line after the first.
//!
//! Custom render hooks write plain source; wrapping their writer in an
//! [`IndentWriter`] places each continuation line inside the class body.

use std::io;

/// Indents lines lazily: the indentation for a new line is written with its
/// first byte, so output ending in a newline leaves no indent-only line.
#[derive(Debug)]
pub struct IndentWriter<W> {
    inner: W,
    indent: Vec<u8>,
    at_line_start: bool,
}

impl<W: io::Write> IndentWriter<W> {
    /// Wrap `inner`; the first line is written as is.
    pub fn new(inner: W, indent: &str) -> Self {
        Self {
            inner,
            indent: indent.as_bytes().to_vec(),
            at_line_start: false,
        }
    }

    /// Indent the next line, as if a line had just started.
    pub fn start_line(&mut self) {
        self.at_line_start = true;
    }

    /// Whether the last byte written ended a line.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }
}

impl<W: io::Write> io::Write for IndentWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for line in buf.split_inclusive(|b| *b == b'\n') {
            if self.at_line_start && line != b"\n" {
                self.inner.write_all(&self.indent)?;
            }
            self.inner.write_all(line)?;
            self.at_line_start = line.ends_with(b"\n");
        }
        // Indentation is not counted against the caller's bytes.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
