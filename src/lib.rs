//! # cfgstore
//!
//! An INI-style configuration store with:
//! - Multi-value keys and comma continuation lines
//! - Case-insensitive section and key names
//! - Backslash escaping of reserved characters on read
//! - Surgical in-place updates that leave unrelated lines byte-identical
//! - Single-writer/multi-reader concurrency model
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Store                                │
//! │          (RwLock sections / Mutex write path)                │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │ load / reload                │ set
//!                ▼                              ▼
//!         ┌─────────────┐                ┌─────────────┐
//!         │   Parser    │                │   Writer    │
//!         │ (mode flags)│                │ (splice +   │
//!         └──────┬──────┘                │  staging)   │
//!                │                       └──────┬──────┘
//!                │                              │
//!                └──────────┬───────────────────┘
//!                           ▼
//!                   ┌──────────────┐
//!                   │ Line Scanner │
//!                   │ (1-based)    │
//!                   └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod lines;
pub mod parser;
pub mod writer;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CfgError, Result};
pub use config::{Config, SyncStrategy};
pub use parser::{read_section, Section, Sections};
pub use store::{Snapshot, Store};
pub use writer::{write_file, write_file_with};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of cfgstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
