//! # Storage Commands
//!
//! The command side of the storage object model.

use crate::entities::{BucketId, MessageId, Priority};
use crate::errors::StorageError;
use crate::message_type::MessageType;
use crate::reply::StorageReply;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity fields shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandHeader {
    pub message_type: MessageType,
    pub msg_id: MessageId,
    pub priority: Priority,
}

impl CommandHeader {
    /// Create a header with a freshly allocated `MessageId`.
    pub fn new(message_type: MessageType) -> Self {
        Self {
            message_type,
            msg_id: MessageId::next(),
            priority: Priority::default(),
        }
    }
}

/// A request addressed to a storage node.
///
/// Every command owns its reply factory. Implementations must return a
/// fresh reply on each call to [`StorageCommand::make_reply`]; the reply
/// must not share mutable state with the command or with earlier replies.
pub trait StorageCommand: fmt::Debug + Send + Sync {
    fn header(&self) -> &CommandHeader;

    fn message_type(&self) -> MessageType {
        self.header().message_type
    }

    fn msg_id(&self) -> MessageId {
        self.header().msg_id
    }

    fn priority(&self) -> Priority {
        self.header().priority
    }

    /// The bucket this command operates on, if it targets a single bucket.
    fn bucket(&self) -> Option<BucketId> {
        None
    }

    /// Produce the reply matching this command.
    ///
    /// # Errors
    ///
    /// Whatever the command's own reply construction fails with.
    fn make_reply(&self) -> Result<Box<dyn StorageReply>, StorageError>;
}

/// Reject commands addressed to the invalid bucket before building a reply.
pub(crate) fn require_bucket(bucket: BucketId) -> Result<BucketId, StorageError> {
    if bucket.is_set() {
        Ok(bucket)
    } else {
        Err(StorageError::InvalidBucket { bucket })
    }
}
