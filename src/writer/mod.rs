//! Writer Module
//!
//! Surgical in-place updates of a configuration file.
//!
//! ## Responsibilities
//! - Reject values and names that the format cannot represent
//! - Locate the line range to replace (existing key, insertion point in its
//!   section, or end of file for a brand-new section)
//! - Stage prefix + replacement + suffix in a temporary file
//! - Replace the original's contents and remove the staging file
//!
//! ## Rewrite Layout
//! ```text
//! ┌─────────────────────────────┐
//! │ lines 1..=upper   (verbatim)│
//! ├─────────────────────────────┤
//! │ [section]        (if new)   │
//! │ key = value0,               │
//! │       value1                │
//! ├─────────────────────────────┤
//! │ lines lower..=EOF (verbatim)│
//! └─────────────────────────────┘
//! ```

mod file;
mod region;
mod splice;

pub use file::{write_file, write_file_with};
pub(crate) use file::persist;
pub use region::{locate, Region};
pub use splice::render_block;

use crate::error::{CfgError, Result};
use crate::parser::fold;

/// Characters a value may not contain
pub const RESERVED_VALUE_CHARS: [char; 6] = ['[', ']', ',', '=', '\n', '\r'];

/// Characters a key may not contain
const RESERVED_KEY_CHARS: [char; 6] = ['[', ']', '=', ',', '\n', '\r'];

/// Characters a section name may not contain
const RESERVED_SECTION_CHARS: [char; 4] = ['[', ']', '\n', '\r'];

/// A validated, normalized `key = values` under `[section]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub section: String,
    pub key: String,
    /// Trimmed values; never empty
    pub values: Vec<String>,
}

impl Assignment {
    /// Validate and normalize a write request
    ///
    /// Nothing is touched on disk; a rejected request leaves no trace.
    pub fn new<V: AsRef<str>>(section: &str, key: &str, values: &[V]) -> Result<Self> {
        check_name(section, &RESERVED_SECTION_CHARS)?;
        check_name(key, &RESERVED_KEY_CHARS)?;
        if key.trim_start().starts_with('#') {
            return Err(CfgError::InvalidName {
                ch: '#',
                name: key.to_string(),
            });
        }

        let mut normalized = Vec::with_capacity(values.len().max(1));
        for (i, value) in values.iter().enumerate() {
            let value = value.as_ref();
            if let Some(ch) = value.chars().find(|ch| RESERVED_VALUE_CHARS.contains(ch)) {
                return Err(CfgError::InvalidValue {
                    ch,
                    value: value.to_string(),
                });
            }
            // Would read back as a comment line on a continuation
            if i > 0 && value.trim_start().starts_with('#') {
                return Err(CfgError::InvalidValue {
                    ch: '#',
                    value: value.to_string(),
                });
            }
            let trimmed = value.trim();
            // An unpaired trailing backslash would escape the line structure
            if trailing_backslashes(trimmed) % 2 == 1 {
                return Err(CfgError::InvalidValue {
                    ch: '\\',
                    value: value.to_string(),
                });
            }
            normalized.push(trimmed.to_string());
        }
        if normalized.is_empty() {
            normalized.push(String::new());
        }

        Ok(Self {
            section: fold(section),
            key: fold(key),
            values: normalized,
        })
    }
}

pub(crate) fn trailing_backslashes(text: &str) -> usize {
    text.chars().rev().take_while(|ch| *ch == '\\').count()
}

fn check_name(name: &str, reserved: &[char]) -> Result<()> {
    match name.chars().find(|ch| reserved.contains(ch)) {
        Some(ch) => Err(CfgError::InvalidName {
            ch,
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}
