//! File rewriting
//!
//! Stages the spliced output in a temporary file, then replaces the original.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Seek, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::Result;

use super::splice::{render_block, splice};
use super::{locate, Assignment};

/// Write `key = values` under `[section]` to a file, using default settings
pub fn write_file<V: AsRef<str>>(path: &Path, section: &str, key: &str, values: &[V]) -> Result<()> {
    write_file_with(path, section, key, values, &Config::default())
}

/// Write `key = values` under `[section]` to a file
///
/// Values are validated before the file is opened.
pub fn write_file_with<V: AsRef<str>>(
    path: &Path,
    section: &str,
    key: &str,
    values: &[V],
    config: &Config,
) -> Result<()> {
    let assignment = Assignment::new(section, key, values)?;
    persist(path, &assignment, config)
}

/// Rewrite `path` so that it holds `assignment`
///
/// Steps:
/// 1. Locate the region to replace
/// 2. Stage prefix + block + suffix in a uniquely named temp file
/// 3. Sync the staged file
/// 4. Truncate the original and copy the staged content into it
/// 5. Remove the staged file
pub(crate) fn persist(path: &Path, assignment: &Assignment, config: &Config) -> Result<()> {
    let mut source = File::open(path)?;

    // Step 1: Locate the region
    let region = locate(BufReader::new(&source), &assignment.section, &assignment.key)?;
    tracing::debug!(
        "Rewriting {} [{}] {}: upper={} lower={} section_found={} key_found={}",
        path.display(),
        assignment.section,
        assignment.key,
        region.upper,
        region.lower,
        region.section_found,
        region.key_found
    );

    // Step 2: Stage the new content
    let prefix = format!("{}.temp_conf.", config.temp_prefix);
    let staged = tempfile::Builder::new()
        .prefix(&prefix)
        .tempfile_in(&config.temp_dir)?;
    tracing::trace!("Staging rewrite in {}", staged.path().display());

    source.rewind()?;
    let block = render_block(assignment, region.section_found);
    {
        let mut out = BufWriter::new(staged.as_file());
        splice(BufReader::new(&source), &mut out, &region, &block)?;
        out.flush()?;
    }

    // Step 3: Make the staged copy durable
    if config.should_sync() {
        staged.as_file().sync_all()?;
    }
    drop(source);

    // Step 4: Replace the original's contents
    let mut staged_reader = staged.reopen()?;
    let mut dest = OpenOptions::new().write(true).truncate(true).open(path)?;
    let copied = io::copy(&mut staged_reader, &mut dest)?;
    if config.should_sync() {
        dest.sync_all()?;
    }
    tracing::trace!("Copied {} bytes into {}", copied, path.display());

    // Step 5: Remove the staged file
    drop(staged_reader);
    staged.close()?;

    Ok(())
}
