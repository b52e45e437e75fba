//! Parser Module
//!
//! Hand-written character-level parser for the configuration format.
//!
//! ## Responsibilities
//! - Recognize comments, section headers, `key = value` assignments,
//!   comma-separated values, continuation lines and backslash escapes
//! - Build the nested section → key → values mapping
//! - Report the first grammar violation with file name and line number
//! - Extract a single section without materializing the whole file
//!
//! ## File Format
//! ```text
//! # comment line
//! [section]
//! key = value
//! key2 = value1, value2
//! key3 = value1,
//!        value2,
//!        value3
//! ```
//!
//! Section and key names are case-insensitive and stored lower-cased.
//! Values keep their escape markers (`\,` stays `\,`); stripping them is the
//! job of the reader-facing accessors.

mod document;
mod lexer;
mod section;

use std::collections::HashMap;

pub use document::{load_file, parse_reader};
pub(crate) use lexer::{Event, Lexer};
pub use section::{read_section, read_section_from};

/// Keys of one section mapped to their ordered values
pub type Section = HashMap<String, Vec<String>>;

/// All sections of a file, keyed by case-folded name
pub type Sections = HashMap<String, Section>;

/// Normalize a section or key name for use as a map key
pub fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}
