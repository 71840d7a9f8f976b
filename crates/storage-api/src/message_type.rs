//! # Message Types
//!
//! Numeric identities of the storage command and reply kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every storage message kind known to this crate.
///
/// Commands use even ids and their replies the following odd id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Get,
    GetReply,
    Put,
    PutReply,
    Remove,
    RemoveReply,
    CreateBucket,
    CreateBucketReply,
    RequestBucketInfo,
    RequestBucketInfoReply,
}

impl MessageType {
    /// Numeric id used by the transport to tag messages.
    pub fn id(self) -> u32 {
        match self {
            MessageType::Get => 4,
            MessageType::GetReply => 5,
            MessageType::Put => 10,
            MessageType::PutReply => 11,
            MessageType::Remove => 12,
            MessageType::RemoveReply => 13,
            MessageType::CreateBucket => 26,
            MessageType::CreateBucketReply => 27,
            MessageType::RequestBucketInfo => 30,
            MessageType::RequestBucketInfoReply => 31,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageType::Get => "Get",
            MessageType::GetReply => "GetReply",
            MessageType::Put => "Put",
            MessageType::PutReply => "PutReply",
            MessageType::Remove => "Remove",
            MessageType::RemoveReply => "RemoveReply",
            MessageType::CreateBucket => "CreateBucket",
            MessageType::CreateBucketReply => "CreateBucketReply",
            MessageType::RequestBucketInfo => "RequestBucketInfo",
            MessageType::RequestBucketInfoReply => "RequestBucketInfoReply",
        }
    }

    pub fn is_reply(self) -> bool {
        self.id() % 2 == 1
    }

    /// The reply kind answering this command kind, or `None` for replies.
    pub fn reply_type(self) -> Option<MessageType> {
        match self {
            MessageType::Get => Some(MessageType::GetReply),
            MessageType::Put => Some(MessageType::PutReply),
            MessageType::Remove => Some(MessageType::RemoveReply),
            MessageType::CreateBucket => Some(MessageType::CreateBucketReply),
            MessageType::RequestBucketInfo => Some(MessageType::RequestBucketInfoReply),
            _ => None,
        }
    }

    pub fn from_id(id: u32) -> Option<MessageType> {
        [
            MessageType::Get,
            MessageType::GetReply,
            MessageType::Put,
            MessageType::PutReply,
            MessageType::Remove,
            MessageType::RemoveReply,
            MessageType::CreateBucket,
            MessageType::CreateBucketReply,
            MessageType::RequestBucketInfo,
            MessageType::RequestBucketInfoReply,
        ]
        .into_iter()
        .find(|t| t.id() == id)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.id())
    }
}
