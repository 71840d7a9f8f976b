//! # Storage Entities
//!
//! Value types shared by every storage command and reply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a storage bucket.
///
/// The raw value 0 is reserved for "no bucket".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BucketId(pub u64);

impl BucketId {
    /// The invalid (unset) bucket.
    pub const INVALID: BucketId = BucketId(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BucketId(0x{:016x})", self.0)
    }
}

/// Summary of a bucket's state as attached to bucket-info replies.
///
/// The adapter treats this as an opaque triple; only the storage layer
/// interprets the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Checksum over the bucket contents.
    pub checksum: u32,
    /// Number of documents in the bucket.
    pub doc_count: u32,
    /// Total size of all documents in bytes.
    pub total_size: u32,
}

impl BucketInfo {
    pub const fn new(checksum: u32, doc_count: u32, total_size: u32) -> Self {
        Self {
            checksum,
            doc_count,
            total_size,
        }
    }

    /// A bucket info is valid once the storage layer has computed a checksum.
    pub fn is_valid(&self) -> bool {
        self.checksum != 0
    }
}

impl fmt::Display for BucketInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BucketInfo(crc 0x{:08x}, docs {}, size {})",
            self.checksum, self.doc_count, self.total_size
        )
    }
}

/// Process-unique message identifier.
///
/// Commands draw a fresh id at construction; replies copy it from the
/// command that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Allocate the next id from the process-wide counter.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message priority. Lower values are served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Priority(pub u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(0);
    pub const NORMAL: Priority = Priority(127);
    pub const LOWEST: Priority = Priority(255);
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Identifier of a stored document (e.g. `id:music:song::1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
