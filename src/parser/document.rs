//! Full-file parsing
//!
//! Builds the complete section mapping of a file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::lines::LineScanner;

use super::{Event, Lexer, Section, Sections};

/// Parse an entire configuration file
pub fn load_file(path: &Path) -> Result<Sections> {
    let file = File::open(path)?;
    let sections = parse_reader(BufReader::new(file), path)?;

    tracing::debug!("Loaded {} sections from {}", sections.len(), path.display());
    Ok(sections)
}

/// Parse configuration text from any buffered reader
///
/// `file` is only used to label syntax errors.
pub fn parse_reader<R: BufRead>(reader: R, file: &Path) -> Result<Sections> {
    let mut lexer = Lexer::new(file);
    let mut sections = Sections::new();
    let mut current: Option<String> = None;

    for line in LineScanner::new(reader) {
        let line = line?;

        match lexer.feed(&line)? {
            Some(Event::Header(name)) => {
                // A repeated header starts the section over
                sections.insert(name.clone(), Section::new());
                current = Some(name);
            }
            Some(Event::Entry { key, values }) => {
                // The lexer rejects `=` before any header, so `current` is set
                if let Some(name) = current.as_ref() {
                    tracing::trace!("[{}] {} = {:?}", name, key, values);
                    sections.entry(name.clone()).or_default().insert(key, values);
                }
            }
            None => {}
        }
    }

    lexer.finish()?;
    Ok(sections)
}
