use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type for extraction, selection and query operations.
pub type NthMinResult<T> = Result<T, NthMinError>;

/// Error type returned by every fallible operation in this crate.
///
/// Variants map one-to-one onto [`ErrorKind`]; use [`NthMinError::kind`] when only the
/// classification matters.
#[derive(Debug, Error)]
pub enum NthMinError {
    /// The source does not exist or cannot be read.
    #[error("file not found or not readable: {} ({source})", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source exists but is not a readable spreadsheet.
    #[error("failed to read spreadsheet {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Extraction succeeded but produced no numeric values.
    #[error("the first column contains no numeric values")]
    EmptyInput,

    /// Rank below 1.
    #[error("rank must be >= 1 (got {rank})")]
    InvalidRank { rank: i64 },

    /// Rank above the number of extracted values.
    #[error("rank {rank} exceeds the number of available values ({len})")]
    RankOutOfRange { rank: i64, len: usize },

    /// Any failure not covered above.
    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

impl NthMinError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NthMinError::NotFound { .. } => ErrorKind::NotFound,
            NthMinError::ReadError { .. } => ErrorKind::ReadError,
            NthMinError::EmptyInput => ErrorKind::EmptyInput,
            NthMinError::InvalidRank { .. } => ErrorKind::InvalidRank,
            NthMinError::RankOutOfRange { .. } => ErrorKind::RankOutOfRange,
            NthMinError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// Shorthand for `self.kind().class()`.
    pub fn class(&self) -> ErrorClass {
        self.kind().class()
    }
}

/// Closed set of failure kinds, independent of the error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    ReadError,
    EmptyInput,
    InvalidRank,
    RankOutOfRange,
    Unexpected,
}

impl ErrorKind {
    /// Whether the caller or the serving process is at fault.
    ///
    /// Everything except [`ErrorKind::Unexpected`] is caused by the request itself (a bad path, an
    /// unreadable file, a rank that does not fit the data).
    pub fn class(self) -> ErrorClass {
        match self {
            ErrorKind::Unexpected => ErrorClass::ServerFault,
            _ => ErrorClass::BadInput,
        }
    }
}

/// Caller-visible failure class, for transports that map failures onto status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The request cannot succeed as given.
    BadInput,
    /// The serving process failed.
    ServerFault,
}
