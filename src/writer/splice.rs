//! Splicing
//!
//! Renders the replacement block and interleaves it with the untouched lines
//! of the original file.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::lines::LineScanner;

use super::{Assignment, Region};

/// Render the lines that replace a region
///
/// ```text
/// key = value0,
///       value1,
///       value2
/// ```
/// A new section is preceded by a blank line and its `[section]` header.
pub fn render_block(assignment: &Assignment, section_found: bool) -> String {
    let mut block = String::new();

    if !section_found {
        block.push('\n');
        block.push('[');
        block.push_str(&assignment.section);
        block.push_str("]\n");
    }

    let lead = format!("{} = ", assignment.key);
    let indent = " ".repeat(lead.chars().count());
    let last = assignment.values.len().saturating_sub(1);

    for (i, value) in assignment.values.iter().enumerate() {
        block.push_str(if i == 0 { &lead } else { &indent });
        block.push_str(value);
        if i < last {
            block.push(',');
        }
        block.push('\n');
    }

    block
}

/// Copy `source` into `out`, swapping the region for `block`
pub(crate) fn splice<R: BufRead, W: Write>(
    source: R,
    out: &mut W,
    region: &Region,
    block: &str,
) -> Result<()> {
    let mut block_written = false;
    // Prefix so far ends in a newline (vacuously true when empty)
    let mut terminated = true;

    for line in LineScanner::new(source) {
        let line = line?;

        if line.number > region.upper && !block_written {
            write_block(out, block, terminated)?;
            block_written = true;
        }

        if line.number <= region.upper || line.number >= region.lower {
            out.write_all(line.raw())?;
            terminated = line.has_terminator();
        }
    }

    if !block_written {
        write_block(out, block, terminated)?;
    }

    Ok(())
}

fn write_block<W: Write>(out: &mut W, block: &str, terminated: bool) -> Result<()> {
    if !terminated {
        out.write_all(b"\n")?;
    }
    out.write_all(block.as_bytes())?;
    Ok(())
}
