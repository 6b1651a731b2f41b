//! Save/load persistence
//!
//! Features:
//! - Fixed 76-byte save record, XOR-obfuscated on disk
//! - Temp-file write then rename
//! - JSON helpers shared by settings, tuning and high scores
//!
//! Errors stay internal: collaborators get a `bool` and a log line.

pub mod json;
pub mod record;
pub mod store;

pub use json::{read_json, write_json};
pub use record::{NAME_LEN, SaveRecord};
pub use store::SaveStore;

use thiserror::Error;

/// Errors raised while reading or writing persisted data
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file is {actual} bytes, expected {expected}")]
    Truncated { expected: usize, actual: usize },

    #[error("save record rejected: {0}")]
    Corrupt(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
