//! Lexer
//!
//! Per-character state machine driven one line at a time.

use std::mem;
use std::path::Path;

use crate::error::{CfgError, Result};
use crate::lines::Line;

/// Orthogonal mode flags of the state machine
#[derive(Debug, Default, Clone, Copy)]
struct Mode {
    /// A section header has been seen
    header: bool,
    /// `=` consumed, values pending
    key: bool,
    /// Last value ended with a comma; a continuation line is expected
    comma: bool,
    /// Next character is taken literally
    escape: bool,
}

/// Something the lexer completed on a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    /// `[name]`, already case-folded
    Header(String),

    /// A committed assignment
    Entry { key: String, values: Vec<String> },
}

pub(crate) struct Lexer<'a> {
    file: &'a Path,
    mode: Mode,
    /// Key or value being accumulated
    buf: String,
    /// Pending key name
    key: String,
    /// Values flushed so far for the pending key
    values: Vec<String>,
    /// Last line that changed state; used for errors spanning lines
    last: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a Path) -> Self {
        Self {
            file,
            mode: Mode::default(),
            buf: String::new(),
            key: String::new(),
            values: Vec::new(),
            last: 0,
        }
    }

    /// Feed one line; returns the header or entry it completed, if any
    pub fn feed(&mut self, line: &Line) -> Result<Option<Event>> {
        if line.is_empty() || line.is_comment() {
            return Ok(None);
        }
        if line.is_blank() {
            if !self.mode.key {
                return Ok(None);
            }
            // Ends a continuation run with an empty final value
            self.mode.comma = false;
            return self.end_line(line.number);
        }

        let number = line.number;

        for ch in line.text().chars() {
            if self.mode.escape {
                self.buf.push(ch);
                self.mode.escape = false;
                continue;
            }

            match ch {
                '[' => return self.open_header(line).map(Some),
                '=' => {
                    if self.mode.key || !self.mode.header {
                        return Err(self.error(number));
                    }
                    self.key = super::fold(&self.take_buf());
                    self.mode.key = true;
                    self.last = number;
                }
                ',' => {
                    if !self.mode.key {
                        return Err(self.error(number));
                    }
                    let value = self.take_buf();
                    self.values.push(value);
                    self.mode.comma = true;
                    self.last = number;
                }
                ' ' | '\t' if self.buf.is_empty() => {}
                '\\' => {
                    self.mode.escape = true;
                    self.mode.comma = false;
                    self.buf.push(ch);
                }
                _ => {
                    self.mode.comma = false;
                    self.buf.push(ch);
                }
            }
        }

        self.end_line(number)
    }

    /// Check the state at end of input
    pub fn finish(&self) -> Result<()> {
        if self.mode.key {
            return Err(self.error(self.last));
        }
        Ok(())
    }

    fn open_header(&mut self, line: &Line) -> Result<Event> {
        if self.mode.key {
            return Err(self.error(self.last));
        }
        if !self.buf.is_empty() {
            return Err(self.error(line.number));
        }
        let name = line
            .header_name()
            .ok_or_else(|| self.error(line.number))?;

        self.mode.header = true;
        self.last = line.number;
        Ok(Event::Header(name))
    }

    fn end_line(&mut self, number: usize) -> Result<Option<Event>> {
        if self.mode.escape || !self.mode.key {
            return Err(self.error(number));
        }
        if self.mode.comma {
            self.mode.comma = false;
            return Ok(None);
        }

        let value = self.take_buf();
        self.values.push(value);
        self.mode.key = false;
        self.last = number;

        Ok(Some(Event::Entry {
            key: mem::take(&mut self.key),
            values: mem::take(&mut self.values),
        }))
    }

    fn take_buf(&mut self) -> String {
        let trimmed = self.buf.trim().to_string();
        self.buf.clear();
        trimmed
    }

    fn error(&self, line: usize) -> CfgError {
        CfgError::syntax(self.file, line)
    }
}
