//! # Error Types
//!
//! Errors raised by storage commands while producing their replies.

use crate::entities::BucketId;
use crate::message_type::MessageType;
use thiserror::Error;

/// Failure of a command's reply factory.
///
/// The protocol adapter never inspects or rewrites these; they reach the
/// caller of `make_reply` exactly as the command produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The command kind has no reply kind.
    #[error("No reply type exists for {message_type}")]
    ReplyNotSupported { message_type: MessageType },

    /// The command targets a bucket that is not set.
    #[error("Invalid bucket: {bucket}")]
    InvalidBucket { bucket: BucketId },

    /// The storage layer failed while building the reply.
    #[error("Internal storage error: {0}")]
    Internal(String),
}
