//! Document operations: put, get and remove.

use crate::command::{require_bucket, CommandHeader, StorageCommand};
use crate::entities::{BucketId, BucketInfo, DocumentId, Priority};
use crate::errors::StorageError;
use crate::message_type::MessageType;
use crate::reply::{BucketInfoReply, ReplyHeader, StorageReply};
use serde::{Deserialize, Serialize};
use std::any::Any;

// =============================================================================
// PUT
// =============================================================================

/// Store a document in a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutCommand {
    header: CommandHeader,
    pub bucket: BucketId,
    pub document_id: DocumentId,
    /// Timestamp the document is written with.
    pub timestamp: u64,
}

impl PutCommand {
    pub fn new(bucket: BucketId, document_id: DocumentId, timestamp: u64) -> Self {
        Self {
            header: CommandHeader::new(MessageType::Put),
            bucket,
            document_id,
            timestamp,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.header.priority = priority;
        self
    }
}

impl StorageCommand for PutCommand {
    fn header(&self) -> &CommandHeader {
        &self.header
    }

    fn bucket(&self) -> Option<BucketId> {
        Some(self.bucket)
    }

    fn make_reply(&self) -> Result<Box<dyn StorageReply>, StorageError> {
        let bucket = require_bucket(self.bucket)?;
        Ok(Box::new(PutReply {
            header: ReplyHeader::for_command(&self.header)?,
            bucket,
            document_id: self.document_id.clone(),
            timestamp: self.timestamp,
            bucket_info: BucketInfo::default(),
            was_found: false,
        }))
    }
}

/// Reply to [`PutCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutReply {
    header: ReplyHeader,
    pub bucket: BucketId,
    pub document_id: DocumentId,
    pub timestamp: u64,
    pub bucket_info: BucketInfo,
    /// Whether an older version of the document was replaced.
    pub was_found: bool,
}

impl StorageReply for PutReply {
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

impl BucketInfoReply for PutReply {
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

// =============================================================================
// GET
// =============================================================================

/// Fetch a document from a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCommand {
    header: CommandHeader,
    pub bucket: BucketId,
    pub document_id: DocumentId,
    /// Comma separated list of fields to return, `[all]` for every field.
    pub field_set: String,
    /// Only versions older than this timestamp are visible. 0 means latest.
    pub before_timestamp: u64,
}

impl GetCommand {
    pub fn new(bucket: BucketId, document_id: DocumentId, field_set: impl Into<String>) -> Self {
        Self {
            header: CommandHeader::new(MessageType::Get),
            bucket,
            document_id,
            field_set: field_set.into(),
            before_timestamp: 0,
        }
    }

    pub fn with_before_timestamp(mut self, before_timestamp: u64) -> Self {
        self.before_timestamp = before_timestamp;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.header.priority = priority;
        self
    }
}

impl StorageCommand for GetCommand {
    fn header(&self) -> &CommandHeader {
        &self.header
    }

    fn bucket(&self) -> Option<BucketId> {
        Some(self.bucket)
    }

    fn make_reply(&self) -> Result<Box<dyn StorageReply>, StorageError> {
        let bucket = require_bucket(self.bucket)?;
        Ok(Box::new(GetReply {
            header: ReplyHeader::for_command(&self.header)?,
            bucket,
            document_id: self.document_id.clone(),
            field_set: self.field_set.clone(),
            last_modified: 0,
            bucket_info: BucketInfo::default(),
        }))
    }
}

/// Reply to [`GetCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReply {
    header: ReplyHeader,
    pub bucket: BucketId,
    pub document_id: DocumentId,
    pub field_set: String,
    /// Timestamp of the returned version, 0 if not found.
    pub last_modified: u64,
    pub bucket_info: BucketInfo,
}

impl GetReply {
    pub fn was_found(&self) -> bool {
        self.last_modified != 0
    }
}

impl StorageReply for GetReply {
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

impl BucketInfoReply for GetReply {
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

// =============================================================================
// REMOVE
// =============================================================================

/// Remove a document from a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveCommand {
    header: CommandHeader,
    pub bucket: BucketId,
    pub document_id: DocumentId,
    pub timestamp: u64,
}

impl RemoveCommand {
    pub fn new(bucket: BucketId, document_id: DocumentId, timestamp: u64) -> Self {
        Self {
            header: CommandHeader::new(MessageType::Remove),
            bucket,
            document_id,
            timestamp,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.header.priority = priority;
        self
    }
}

impl StorageCommand for RemoveCommand {
    fn header(&self) -> &CommandHeader {
        &self.header
    }

    fn bucket(&self) -> Option<BucketId> {
        Some(self.bucket)
    }

    fn make_reply(&self) -> Result<Box<dyn StorageReply>, StorageError> {
        let bucket = require_bucket(self.bucket)?;
        Ok(Box::new(RemoveReply {
            header: ReplyHeader::for_command(&self.header)?,
            bucket,
            document_id: self.document_id.clone(),
            timestamp: self.timestamp,
            old_timestamp: 0,
            bucket_info: BucketInfo::default(),
        }))
    }
}

/// Reply to [`RemoveCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveReply {
    header: ReplyHeader,
    pub bucket: BucketId,
    pub document_id: DocumentId,
    pub timestamp: u64,
    /// Timestamp of the removed version, 0 if nothing was removed.
    pub old_timestamp: u64,
    pub bucket_info: BucketInfo,
}

impl StorageReply for RemoveReply {
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

impl BucketInfoReply for RemoveReply {
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
