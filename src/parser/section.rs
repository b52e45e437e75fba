//! Section extraction
//!
//! Parses a single named section, skipping everything before it and
//! stopping at the next header.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::lines::LineScanner;

use super::{fold, Event, Lexer, Section};

/// Read one section of a file without loading the rest
///
/// A section that never appears yields an empty map.
pub fn read_section(path: &Path, section: &str) -> Result<Section> {
    let file = File::open(path)?;
    read_section_from(BufReader::new(file), path, section)
}

/// Read one section from any buffered reader
pub fn read_section_from<R: BufRead>(reader: R, file: &Path, section: &str) -> Result<Section> {
    let target = fold(section);
    let mut lexer = Lexer::new(file);
    let mut out = Section::new();
    let mut found = false;

    for line in LineScanner::new(reader) {
        let line = line?;

        if !found {
            // Lines outside the requested section are not validated
            if line.header_name().as_deref() == Some(target.as_str()) {
                lexer.feed(&line)?;
                found = true;
            }
            continue;
        }

        if line.is_header() {
            lexer.finish()?;
            tracing::debug!("Read section [{}] ({} keys) from {}", target, out.len(), file.display());
            return Ok(out);
        }

        if let Some(Event::Entry { key, values }) = lexer.feed(&line)? {
            out.insert(key, values);
        }
    }

    if found {
        lexer.finish()?;
    } else {
        tracing::debug!("Section [{}] not found in {}", target, file.display());
    }
    Ok(out)
}
