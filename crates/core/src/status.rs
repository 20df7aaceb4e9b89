//! Operation status taxonomy
//!
//! Per-key outcomes reported by the store. These codes are frozen and must
//! not change:
//!
//! | Code | Status | Meaning |
//! |------|--------|---------|
//! | 0 | Success | No error |
//! | 1 | NoKey | Key not found |
//! | 3 | UniqueKeyViolation | Duplicate key on create |
//! | 4 | RecordLocked | Record locked by another request |
//! | 5 | IllegalArgument | Input failed validation |
//! | 6 | ConditionViolation | Version condition in the request violated |
//! | 7 | InternalError | Store-side internal error |
//! | 11 | ResponseTimeout | Response timed out |
//! | 12 | ConnectionError | Connection error |
//!
//! Business outcomes (`NoKey`, `ConditionViolation`, `UniqueKeyViolation`)
//! are normal responses, never errors. Only statuses with `is_ok() == false`
//! indicate the operation itself could not be evaluated.

use serde::{Deserialize, Serialize};

/// Status of a single per-key operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Operation succeeded.
    Success,
    /// Key not found.
    NoKey,
    /// Create on a key that already holds a live record.
    UniqueKeyViolation,
    /// Record is locked by a concurrent request.
    RecordLocked,
    /// Input failed validation.
    IllegalArgument,
    /// Supplied version does not match the store's current version.
    ConditionViolation,
    /// Store-side internal error.
    InternalError,
    /// No response arrived within the per-call deadline.
    ResponseTimeout,
    /// Connection-level failure.
    ConnectionError,
}

impl OperationStatus {
    /// Numeric wire code for this status.
    pub fn code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NoKey => 1,
            Self::UniqueKeyViolation => 3,
            Self::RecordLocked => 4,
            Self::IllegalArgument => 5,
            Self::ConditionViolation => 6,
            Self::InternalError => 7,
            Self::ResponseTimeout => 11,
            Self::ConnectionError => 12,
        }
    }

    /// Look up a status by wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::NoKey),
            3 => Some(Self::UniqueKeyViolation),
            4 => Some(Self::RecordLocked),
            5 => Some(Self::IllegalArgument),
            6 => Some(Self::ConditionViolation),
            7 => Some(Self::InternalError),
            11 => Some(Self::ResponseTimeout),
            12 => Some(Self::ConnectionError),
            _ => None,
        }
    }

    /// Stable, human-readable error text.
    pub fn error_text(&self) -> &'static str {
        match self {
            Self::Success => "No error",
            Self::NoKey => "Key not found",
            Self::UniqueKeyViolation => "Duplicate key",
            Self::RecordLocked => "Record locked",
            Self::IllegalArgument => "Illegal argument",
            Self::ConditionViolation => "Condition in the request violated",
            Self::InternalError => "Internal error",
            Self::ResponseTimeout => "Response timed out",
            Self::ConnectionError => "Connection error",
        }
    }

    /// Whether the store evaluated the operation.
    ///
    /// Business outcomes like `NoKey` or `ConditionViolation` are `true`:
    /// the store made a decision about the key. `false` means the outcome is
    /// unknown or the input never reached evaluation.
    pub fn is_ok(&self) -> bool {
        matches!(
            self,
            Self::Success
                | Self::NoKey
                | Self::UniqueKeyViolation
                | Self::RecordLocked
                | Self::ConditionViolation
        )
    }

    /// Whether a retry may produce a different outcome.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::RecordLocked | Self::InternalError)
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error_text())
    }
}
