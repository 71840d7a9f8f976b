//! # Bus Errors
//!
//! Errors the transport attaches to replies or returns from `send`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Transport-level error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// No handler is registered for the destination route.
    NoAddressForService,
    /// The destination handler failed to produce a reply.
    HandlerFailed,
    /// The message could not manufacture its own reply.
    ReplyFactoryFailed,
    /// The message ran out of time before a reply was produced.
    Timeout,
    /// The bus is shutting down.
    Shutdown,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NoAddressForService => "no_address_for_service",
            ErrorCode::HandlerFailed => "handler_failed",
            ErrorCode::ReplyFactoryFailed => "reply_factory_failed",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error code with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("[{code}] {message}")]
pub struct BusError {
    pub code: ErrorCode,
    pub message: String,
}

impl BusError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
