//! Region location
//!
//! Finds the line range of an existing file that a write replaces.

use std::io::{self, BufRead};

use crate::lines::LineScanner;

use super::trailing_backslashes;

/// Line range to overwrite, expressed as the untouched prefix and suffix
///
/// Lines `1..=upper` are kept before the replacement block and lines
/// `lower..` after it. For a pure insertion `lower == upper + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Last line of the untouched prefix (0 = empty prefix)
    pub upper: usize,

    /// First line of the untouched suffix
    pub lower: usize,

    /// The section header already exists in the file
    pub section_found: bool,

    /// The key already exists in the section
    pub key_found: bool,
}

/// One `[section]` occurrence matching the target
#[derive(Debug, Clone, Copy)]
struct Occurrence {
    /// Last significant line belonging to the section
    tail: usize,
    /// First and last line of the target key's continuation run
    key: Option<(usize, usize)>,
}

/// Scan a file for the region holding `key` under `section`
///
/// Both names must already be case-folded. When a section or key occurs more
/// than once the last occurrence wins, matching how the parser loads it.
pub fn locate<R: BufRead>(reader: R, section: &str, key: &str) -> io::Result<Region> {
    let mut total = 0;
    let mut current: Option<Occurrence> = None;
    let mut matched: Option<Occurrence> = None;
    // Inside a continuation run of the target section; true for the target key
    let mut run: Option<bool> = None;

    for line in LineScanner::new(reader) {
        let line = line?;
        total = line.number;

        if let Some(is_target) = run {
            // The parser skips these inside a run without closing the key
            if line.is_empty() || line.is_comment() {
                continue;
            }
            if let Some(occ) = current.as_mut() {
                occ.tail = line.number;
                if let (true, Some(span)) = (is_target, occ.key.as_mut()) {
                    span.1 = line.number;
                }
            }
            if !ends_with_open_comma(line.text()) {
                run = None;
            }
            continue;
        }

        if !line.is_significant() {
            continue;
        }

        if line.is_header() {
            if let Some(occ) = current.take() {
                matched = Some(occ);
            }
            if line.header_name().as_deref() == Some(section) {
                current = Some(Occurrence {
                    tail: line.number,
                    key: None,
                });
            }
            continue;
        }

        if let Some(occ) = current.as_mut() {
            occ.tail = line.number;
            let is_target = key_name(line.text()).as_deref() == Some(key);
            if is_target {
                occ.key = Some((line.number, line.number));
            }
            if ends_with_open_comma(line.text()) {
                run = Some(is_target);
            }
        }
    }

    if let Some(occ) = current.take() {
        matched = Some(occ);
    }

    let region = match matched {
        None => Region {
            upper: total,
            lower: total + 1,
            section_found: false,
            key_found: false,
        },
        Some(Occurrence {
            key: Some((start, end)),
            ..
        }) => Region {
            upper: start - 1,
            lower: end + 1,
            section_found: true,
            key_found: true,
        },
        Some(Occurrence { tail, key: None }) => Region {
            upper: tail,
            lower: tail + 1,
            section_found: true,
            key_found: false,
        },
    };

    Ok(region)
}

/// Case-folded name left of the first `=`, if the line is an assignment
fn key_name(text: &str) -> Option<String> {
    text.split_once('=').map(|(name, _)| crate::parser::fold(name))
}

/// Line ends in a comma that is not escaped by a backslash
pub(crate) fn ends_with_open_comma(text: &str) -> bool {
    match text.trim_end().strip_suffix(',') {
        Some(rest) => trailing_backslashes(rest) % 2 == 0,
        None => false,
    }
}
