//! Bucket operations: creation and bucket-info requests.

use crate::command::{require_bucket, CommandHeader, StorageCommand};
use crate::entities::{BucketId, BucketInfo, Priority};
use crate::errors::StorageError;
use crate::message_type::MessageType;
use crate::reply::{BucketInfoReply, ReplyHeader, StorageReply};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Create an empty bucket on the receiving node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBucketCommand {
    header: CommandHeader,
    pub bucket: BucketId,
    /// Whether the new bucket should be active (searchable).
    pub active: bool,
}

impl CreateBucketCommand {
    pub fn new(bucket: BucketId) -> Self {
        Self {
            header: CommandHeader::new(MessageType::CreateBucket),
            bucket,
            active: false,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.header.priority = priority;
        self
    }
}

impl StorageCommand for CreateBucketCommand {
    fn header(&self) -> &CommandHeader {
        &self.header
    }

    fn bucket(&self) -> Option<BucketId> {
        Some(self.bucket)
    }

    fn make_reply(&self) -> Result<Box<dyn StorageReply>, StorageError> {
        let bucket = require_bucket(self.bucket)?;
        Ok(Box::new(CreateBucketReply {
            header: ReplyHeader::for_command(&self.header)?,
            bucket,
            bucket_info: BucketInfo::default(),
        }))
    }
}

/// Reply to [`CreateBucketCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBucketReply {
    header: ReplyHeader,
    pub bucket: BucketId,
    pub bucket_info: BucketInfo,
}

impl StorageReply for CreateBucketReply {
    fn header(&self) -> &ReplyHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ReplyHeader {
        &mut self.header
    }

    fn as_bucket_info_reply(&self) -> Option<&dyn BucketInfoReply> {
        Some(self)
    }

    fn as_bucket_info_reply_mut(&mut self) -> Option<&mut dyn BucketInfoReply> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl BucketInfoReply for CreateBucketReply {
    fn bucket(&self) -> BucketId {
        self.bucket
    }

    fn bucket_info(&self) -> BucketInfo {
        self.bucket_info
    }

    fn set_bucket_info(&mut self, info: BucketInfo) {
        self.bucket_info = info;
    }
}

/// One bucket's summary inside a [`RequestBucketInfoReply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfoEntry {
    pub bucket: BucketId,
    pub info: BucketInfo,
}

/// Ask a node for the state of a set of buckets.
///
/// An empty bucket list asks for every bucket the node owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBucketInfoCommand {
    header: CommandHeader,
    pub buckets: Vec<BucketId>,
    /// Index of the distributor asking.
    pub distributor: u16,
}

impl RequestBucketInfoCommand {
    pub fn new(buckets: Vec<BucketId>, distributor: u16) -> Self {
        Self {
            header: CommandHeader::new(MessageType::RequestBucketInfo),
            buckets,
            distributor,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.header.priority = priority;
        self
    }
}

impl StorageCommand for RequestBucketInfoCommand {
    fn header(&self) -> &CommandHeader {
        &self.header
    }

    fn make_reply(&self) -> Result<Box<dyn StorageReply>, StorageError> {
        Ok(Box::new(RequestBucketInfoReply {
            header: ReplyHeader::for_command(&self.header)?,
            entries: Vec::new(),
        }))
    }
}

/// Reply to [`RequestBucketInfoCommand`].
///
/// Carries many bucket summaries, so it does not offer the single-bucket
/// `BucketInfoReply` capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBucketInfoReply {
    header: ReplyHeader,
    pub entries: Vec<BucketInfoEntry>,
}

impl StorageReply for RequestBucketInfoReply {
    fn header(&self) -> &ReplyHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ReplyHeader {
        &mut self.header
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
