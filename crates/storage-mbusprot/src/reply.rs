//! # Storage Reply Envelope
//!
//! Presents a storage reply as a bus reply. Pure wrapper.

use crate::STORAGE_PROTOCOL;
use message_bus::{Reply, ReplyContext};
use storage_api::StorageReply;

/// Bus reply wrapping exactly one storage reply.
#[derive(Debug)]
pub struct StorageReplyEnvelope {
    context: ReplyContext,
    reply: Box<dyn StorageReply>,
}

impl StorageReplyEnvelope {
    pub fn new(reply: Box<dyn StorageReply>) -> Self {
        Self::with_context(reply, ReplyContext::default())
    }

    pub fn with_context(reply: Box<dyn StorageReply>, context: ReplyContext) -> Self {
        Self { context, reply }
    }

    /// The wrapped storage reply.
    pub fn reply(&self) -> &dyn StorageReply {
        self.reply.as_ref()
    }

    /// Mutable access for the transport or storage layer that owns the
    /// envelope.
    pub fn reply_mut(&mut self) -> &mut dyn StorageReply {
        self.reply.as_mut()
    }

    pub fn into_reply(self) -> Box<dyn StorageReply> {
        self.reply
    }
}

impl Reply for StorageReplyEnvelope {
    fn protocol(&self) -> &'static str {
        STORAGE_PROTOCOL
    }

    fn reply_type(&self) -> u32 {
        self.reply.message_type().id()
    }

    fn context(&self) -> &ReplyContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ReplyContext {
        &mut self.context
    }
}
