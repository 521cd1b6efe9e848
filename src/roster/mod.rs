//! Doctor roster: the fixed list of doctors available for recommendation.
//!
//! Stored as a small CSV file in the working directory. On first run the file
//! does not exist yet; the built-in seed roster is written out and used.

pub mod csv;
pub mod seed;
pub mod store;

pub use seed::*;
pub use store::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster file not found: {0}")]
    NotFound(PathBuf),

    #[error("Roster file is missing the header row")]
    MissingHeader,

    #[error("Roster header mismatch: expected '{expected}', found '{found}'")]
    InvalidHeader { expected: String, found: String },

    #[error("Malformed roster row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
