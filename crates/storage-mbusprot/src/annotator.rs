//! # Reply Annotators
//!
//! Strategies applied to a freshly produced storage reply before it is
//! wrapped for the bus.

use storage_api::{BucketInfo, StorageReply};
use storage_telemetry::metrics::BUCKET_INFO_OVERWRITTEN;
use tracing::{error, trace};

/// Bucket summary written by [`PlaceholderBucketInfo`].
pub const PLACEHOLDER_BUCKET_INFO: BucketInfo = BucketInfo::new(1, 1, 1);

/// Hook run on every reply a command envelope produces.
///
/// Implementations may narrow the reply to a more specific capability and
/// mutate it. They must not replace it.
pub trait ReplyAnnotator: Send + Sync {
    fn annotate(&self, reply: &mut dyn StorageReply);

    /// Label used in logs and metrics.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Leaves the reply exactly as the command produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassThrough;

impl ReplyAnnotator for PassThrough {
    fn annotate(&self, _reply: &mut dyn StorageReply) {}

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

/// Overwrites the bucket summary of every reply with a fixed value.
///
/// Every reply passed through this annotator must offer the bucket-info
/// capability. A reply that does not is a caller bug: it is logged and the
/// annotator panics rather than returning the reply unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderBucketInfo {
    info: BucketInfo,
}

impl PlaceholderBucketInfo {
    pub fn new() -> Self {
        Self {
            info: PLACEHOLDER_BUCKET_INFO,
        }
    }

    pub fn with_info(info: BucketInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> BucketInfo {
        self.info
    }
}

impl Default for PlaceholderBucketInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyAnnotator for PlaceholderBucketInfo {
    fn annotate(&self, reply: &mut dyn StorageReply) {
        let message_type = reply.message_type();
        let msg_id = reply.msg_id();

        match reply.as_bucket_info_reply_mut() {
            Some(bucket_reply) => {
                trace!(
                    msg_id = %msg_id,
                    bucket = %bucket_reply.bucket(),
                    replaced = %bucket_reply.bucket_info(),
                    "Overwriting bucket info with placeholder"
                );
                bucket_reply.set_bucket_info(self.info);
                BUCKET_INFO_OVERWRITTEN.inc();
            }
            None => {
                error!(
                    msg_id = %msg_id,
                    message_type = %message_type,
                    "Reply does not carry bucket info"
                );
                panic!(
                    "contract violation: {message_type} reply to message {msg_id} is not a bucket-info reply"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "augment"
    }
}

impl<F> ReplyAnnotator for F
where
    F: Fn(&mut dyn StorageReply) + Send + Sync,
{
    fn annotate(&self, reply: &mut dyn StorageReply) {
        self(reply)
    }
}
