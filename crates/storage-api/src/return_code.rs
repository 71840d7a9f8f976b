//! # Return Codes
//!
//! Result status carried by every storage reply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome category of a storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResultCode {
    #[default]
    Ok,
    NotReady,
    Timeout,
    Aborted,
    BucketNotFound,
    BucketDeleted,
    Rejected,
    InternalFailure,
}

impl ResultCode {
    /// Whether the caller may retry the operation later.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ResultCode::NotReady | ResultCode::Timeout | ResultCode::Aborted
        )
    }
}

/// A result code together with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReturnCode {
    pub code: ResultCode,
    pub message: String,
}

impl ReturnCode {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn new(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == ResultCode::Ok
    }

    pub fn failed(&self) -> bool {
        !self.success()
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "ReturnCode({:?})", self.code)
        } else {
            write!(f, "ReturnCode({:?}, {})", self.code, self.message)
        }
    }
}
