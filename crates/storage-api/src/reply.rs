//! # Storage Replies
//!
//! The reply side of the storage object model, including the bucket-info
//! capability.

use crate::command::CommandHeader;
use crate::entities::{BucketId, BucketInfo, MessageId, Priority};
use crate::errors::StorageError;
use crate::message_type::MessageType;
use crate::return_code::ReturnCode;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Identity and status fields shared by every reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyHeader {
    pub message_type: MessageType,
    pub msg_id: MessageId,
    pub priority: Priority,
    pub result: ReturnCode,
}

impl ReplyHeader {
    /// Build the header of a reply answering `command`.
    ///
    /// The message id and priority are inherited; the result starts as OK.
    ///
    /// # Errors
    ///
    /// `ReplyNotSupported` if the command's type has no reply kind.
    pub fn for_command(command: &CommandHeader) -> Result<Self, StorageError> {
        let message_type = command
            .message_type
            .reply_type()
            .ok_or(StorageError::ReplyNotSupported {
                message_type: command.message_type,
            })?;

        Ok(Self {
            message_type,
            msg_id: command.msg_id,
            priority: command.priority,
            result: ReturnCode::ok(),
        })
    }
}

/// A result object produced by a [`StorageCommand`](crate::StorageCommand).
pub trait StorageReply: fmt::Debug + Send + Sync {
    fn header(&self) -> &ReplyHeader;

    fn header_mut(&mut self) -> &mut ReplyHeader;

    fn message_type(&self) -> MessageType {
        self.header().message_type
    }

    fn msg_id(&self) -> MessageId {
        self.header().msg_id
    }

    fn priority(&self) -> Priority {
        self.header().priority
    }

    fn result(&self) -> &ReturnCode {
        &self.header().result
    }

    fn set_result(&mut self, result: ReturnCode) {
        self.header_mut().result = result;
    }

    /// Narrow to the bucket-info capability.
    ///
    /// Returns `None` unless the reply carries a bucket summary.
    fn as_bucket_info_reply(&self) -> Option<&dyn BucketInfoReply> {
        None
    }

    /// Mutable counterpart of [`StorageReply::as_bucket_info_reply`].
    fn as_bucket_info_reply_mut(&mut self) -> Option<&mut dyn BucketInfoReply> {
        None
    }

    /// Access to the concrete reply, for storage-layer code that knows it.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Replies that carry a summary of the bucket they operated on.
pub trait BucketInfoReply: Send + Sync {
    fn bucket(&self) -> BucketId;

    fn bucket_info(&self) -> BucketInfo;

    fn set_bucket_info(&mut self, info: BucketInfo);
}
