//! Line Scanner
//!
//! The single definition of a "line" shared by the parser, the section
//! extractor and the writer, so that syntax-error line numbers and rewrite
//! boundaries always agree.
//!
//! ## Rules
//! - Lines are split on `\n`; a trailing `\r` is not part of the text
//! - Numbering is 1-based
//! - Bytes that are not valid UTF-8 are replaced in the text only
//! - The raw bytes (terminator included) are kept so the writer can copy
//!   untouched lines verbatim

use std::io::{self, BufRead};

/// One line of a configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,

    /// Line bytes including the terminator (if any)
    raw: Vec<u8>,

    /// Decoded content without the terminator; invalid UTF-8 becomes U+FFFD
    text: String,
}

impl Line {
    pub fn new(number: usize, raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let body = raw.strip_suffix(b"\n").unwrap_or(raw.as_slice());
        let body = body.strip_suffix(b"\r").unwrap_or(body);
        let text = String::from_utf8_lossy(body).into_owned();

        Self { number, raw, text }
    }

    /// Line bytes exactly as read, terminator included
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Line content without the `\n` / `\r\n` terminator
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the line ends in `\n` (only the last line of a file may not)
    pub fn has_terminator(&self) -> bool {
        self.raw.ends_with(b"\n")
    }

    /// Zero-length line
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Empty or whitespace-only line
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    /// First non-whitespace character is `#`
    pub fn is_comment(&self) -> bool {
        self.text().trim_start().starts_with('#')
    }

    /// First non-whitespace character is `[`
    pub fn is_header(&self) -> bool {
        self.text().trim_start().starts_with('[')
    }

    /// Neither blank nor a comment
    pub fn is_significant(&self) -> bool {
        !self.is_blank() && !self.is_comment()
    }

    /// Case-folded section name of a well-formed `[name]` line
    pub fn header_name(&self) -> Option<String> {
        let inner = self
            .text()
            .trim()
            .strip_prefix('[')?
            .strip_suffix(']')?;

        if inner.contains(['[', ']']) {
            return None;
        }
        Some(crate::parser::fold(inner))
    }
}

/// Iterator over the lines of a buffered reader
pub struct LineScanner<R> {
    reader: R,
    number: usize,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, number: 0 }
    }

    /// Number of lines yielded so far
    pub fn lines_read(&self) -> usize {
        self.number
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = Vec::new();
        match self.reader.read_until(b'\n', &mut raw) {
            Ok(0) => None,
            Ok(_) => {
                self.number += 1;
                Some(Ok(Line::new(self.number, raw)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
