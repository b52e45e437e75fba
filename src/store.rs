//! Store Module
//!
//! In-memory view of a configuration file that stays in sync with disk.
//!
//! ## Responsibilities
//! - Create or load a file into a nested section → key → values map
//! - Serve concurrent reads under a shared lock
//! - Persist every `set` to disk before committing it to memory

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::config::Config;
use crate::error::{CfgError, Result};
use crate::parser::{self, fold, Sections};
use crate::writer::{self, Assignment};

/// Sorted, owned copy of a store's contents
pub type Snapshot = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// JSON shape of [`Store::to_json`]
#[derive(Serialize)]
struct Dump<'a> {
    file: &'a Path,
    sections: Snapshot,
}

/// A configuration file and its parsed contents
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Reads** (get/list/exists): take the `sections` read lock; any number
///   run together
/// - **Writes** (set/reload): serialized by `write_lock`, so two threads
///   never rewrite the file at once. The file I/O runs without holding the
///   `sections` lock; only the final in-memory commit takes it exclusively.
///
/// No locking is done across processes.
pub struct Store {
    /// File backing this store
    path: PathBuf,

    /// Staging and sync settings for rewrites
    config: Config,

    /// Parsed contents (case-folded names)
    sections: RwLock<Sections>,

    /// Serializes write operations (set/reload)
    write_lock: Mutex<()>,
}

impl Store {
    /// Create an empty file (overwriting any existing one) and an empty store
    ///
    /// Each comment is written as a `# comment` line.
    pub fn create<C: AsRef<str>>(path: impl AsRef<Path>, comments: &[C]) -> Result<Self> {
        Self::create_with(path, comments, Config::default())
    }

    /// Create with explicit settings
    pub fn create_with<C: AsRef<str>>(
        path: impl AsRef<Path>,
        comments: &[C],
        config: Config,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;

        let mut out = BufWriter::new(&file);
        for comment in comments {
            writeln!(out, "# {}", comment.as_ref())?;
        }
        out.flush()?;
        drop(out);

        if config.should_sync() {
            file.sync_all()?;
        }

        tracing::debug!("Created {} with {} comment lines", path.display(), comments.len());

        Ok(Self::from_parts(path, Sections::new(), config))
    }

    /// Parse an existing file into a store
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, Config::default())
    }

    /// Load with explicit settings
    pub fn load_with(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let sections = parser::load_file(&path)?;
        Ok(Self::from_parts(path, sections, config))
    }

    fn from_parts(path: PathBuf, sections: Sections, config: Config) -> Self {
        Self {
            path,
            config,
            sections: RwLock::new(sections),
            write_lock: Mutex::new(()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Values of `key` in `section`, with escape markers removed
    ///
    /// Returns `[""]` when the key is absent.
    pub fn get(&self, section: &str, key: &str) -> Vec<String> {
        let sections = self.sections.read();

        match sections.get(&fold(section)).and_then(|keys| keys.get(&fold(key))) {
            Some(values) if !values.is_empty() => {
                values.iter().map(|value| value.replace('\\', "")).collect()
            }
            _ => vec![String::new()],
        }
    }

    /// Names of all sections, in no particular order
    pub fn list_sections(&self) -> Vec<String> {
        self.sections.read().keys().cloned().collect()
    }

    /// Names of all keys in `section`, or `None` if it does not exist
    pub fn list_keys(&self, section: &str) -> Option<Vec<String>> {
        self.sections
            .read()
            .get(&fold(section))
            .map(|keys| keys.keys().cloned().collect())
    }

    /// `[section]` → section exists; `[section, key]` → key exists
    ///
    /// An empty slice is always false; names past the second are ignored.
    pub fn exists(&self, names: &[&str]) -> bool {
        let sections = self.sections.read();

        match names {
            [] => false,
            [section] => sections.contains_key(&fold(section)),
            [section, key, ..] => sections
                .get(&fold(section))
                .is_some_and(|keys| keys.contains_key(&fold(key))),
        }
    }

    /// Sorted deep copy of the raw contents (escape markers kept)
    pub fn snapshot(&self) -> Snapshot {
        self.sections
            .read()
            .iter()
            .map(|(section, keys)| {
                let keys = keys
                    .iter()
                    .map(|(key, values)| (key.clone(), values.clone()))
                    .collect();
                (section.clone(), keys)
            })
            .collect()
    }

    /// Pretty-printed JSON object holding the file path and [`snapshot`](Self::snapshot)
    pub fn to_json(&self) -> Result<String> {
        let dump = Dump {
            file: &self.path,
            sections: self.snapshot(),
        };
        serde_json::to_string_pretty(&dump).map_err(|e| CfgError::Serialization(e.to_string()))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Set `key = values` under `[section]` on disk, then in memory
    ///
    /// Steps:
    /// 1. Validate (nothing is touched on failure)
    /// 2. Acquire write lock
    /// 3. Rewrite the file
    /// 4. Commit to memory under the exclusive lock
    pub fn set<V: AsRef<str>>(&self, section: &str, key: &str, values: &[V]) -> Result<()> {
        // Step 1: Validate
        let assignment = Assignment::new(section, key, values)?;

        // Step 2: Serialize writers
        let _write_guard = self.write_lock.lock();

        // Step 3: Durable write first
        writer::persist(&self.path, &assignment, &self.config)?;

        // Step 4: Commit to memory
        let Assignment {
            section,
            key,
            values,
        } = assignment;
        tracing::debug!("Set [{}] {} ({} values)", section, key, values.len());

        self.sections
            .write()
            .entry(section)
            .or_default()
            .insert(key, values);

        Ok(())
    }

    /// Re-parse the file, replacing the in-memory contents
    ///
    /// On a parse error the current contents are kept.
    pub fn reload(&self) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        let sections = parser::load_file(&self.path)?;
        *self.sections.write() = sections;

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settings used for rewrites
    pub fn config(&self) -> &Config {
        &self.config
    }
}
