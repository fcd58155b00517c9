//! Error types for clash-engine operations.

use thiserror::Error;

/// Caller-input errors, raised before any interval work starts.
///
/// Each precondition has its own variant and fixed message so callers can
/// tell which rule was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClashError {
    #[error("daysBack cannot be negative.")]
    NegativeWindow(i64),

    #[error("Medicine Names is null.")]
    NullMedicineNameSet,

    #[error("Medicine Names contains Empty String.")]
    EmptyStringInNameSet,

    #[error("Medicine Names contains a NULL value.")]
    NullEntryInNameSet,

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
}

pub type Result<T> = std::result::Result<T, ClashError>;
