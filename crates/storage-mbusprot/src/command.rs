//! # Storage Command Envelope
//!
//! Presents a storage command as a bus message and is the one place where
//! the matching bus reply is built.

use crate::annotator::ReplyAnnotator;
use crate::config::AdapterConfig;
use crate::reply::StorageReplyEnvelope;
use crate::STORAGE_PROTOCOL;
use message_bus::{Message, MessageContext};
use std::fmt;
use std::sync::Arc;
use storage_api::{StorageCommand, StorageError};
use storage_telemetry::metrics::{REPLIES_MADE, REPLY_FACTORY_FAILURES};
use tracing::debug;

/// Whether an envelope has produced a reply yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Holding its command; no reply made yet.
    Holding,
    /// At least one reply has been made.
    Spent,
}

/// Bus message wrapping exactly one storage command.
///
/// The command is moved in at construction and stays owned by the envelope
/// until the envelope is dropped or [`into_command`](Self::into_command)
/// hands it back.
pub struct StorageCommandEnvelope {
    context: MessageContext,
    command: Box<dyn StorageCommand>,
    annotator: Arc<dyn ReplyAnnotator>,
    replies_made: u32,
}

impl StorageCommandEnvelope {
    /// Wrap `command` using the default reply mode.
    pub fn new(command: Box<dyn StorageCommand>) -> Self {
        Self::from_config(command, &AdapterConfig::default())
    }

    /// Wrap `command`, taking reply mode and trace level from `config`.
    pub fn from_config(command: Box<dyn StorageCommand>, config: &AdapterConfig) -> Self {
        let mut envelope = Self::with_annotator(command, config.annotator());
        envelope.context.trace.set_level(config.trace_level);
        envelope
    }

    /// Wrap `command` with a caller-supplied annotator.
    pub fn with_annotator(
        command: Box<dyn StorageCommand>,
        annotator: Arc<dyn ReplyAnnotator>,
    ) -> Self {
        Self {
            context: MessageContext::new(),
            command,
            annotator,
            replies_made: 0,
        }
    }

    pub fn command(&self) -> &dyn StorageCommand {
        self.command.as_ref()
    }

    /// Give up the envelope and return the command it owned.
    pub fn into_command(self) -> Box<dyn StorageCommand> {
        self.command
    }

    pub fn state(&self) -> EnvelopeState {
        if self.replies_made == 0 {
            EnvelopeState::Holding
        } else {
            EnvelopeState::Spent
        }
    }

    pub fn replies_made(&self) -> u32 {
        self.replies_made
    }

    pub fn annotator_name(&self) -> &'static str {
        self.annotator.name()
    }

    /// Build the bus reply for this command.
    ///
    /// Asks the command for its reply, runs the envelope's annotator on it,
    /// and wraps the result. Each call yields an independent reply.
    ///
    /// # Errors
    ///
    /// Any error from the command's reply factory, returned as-is. The
    /// envelope stays in its current state.
    ///
    /// # Panics
    ///
    /// If the annotator rejects the reply (the augmenting mode panics on
    /// replies without bucket info).
    pub fn make_reply(&mut self) -> Result<StorageReplyEnvelope, StorageError> {
        let mut reply = self.command.make_reply().map_err(|e| {
            REPLY_FACTORY_FAILURES.inc();
            debug!(
                msg_id = %self.command.msg_id(),
                message_type = %self.command.message_type(),
                error = %e,
                "Storage command failed to produce reply"
            );
            e
        })?;

        self.annotator.annotate(reply.as_mut());

        if self.replies_made > 0 {
            debug!(
                msg_id = %self.command.msg_id(),
                replies_made = self.replies_made,
                "Making another reply for a spent envelope"
            );
        }
        self.replies_made = self.replies_made.saturating_add(1);
        REPLIES_MADE
            .with_label_values(&[self.annotator.name()])
            .inc();

        debug!(
            msg_id = %reply.msg_id(),
            reply_type = %reply.message_type(),
            mode = self.annotator.name(),
            "Reply made"
        );

        let mut context = self.context.for_reply();
        context
            .trace
            .trace(1, format!("Reply {} made", reply.message_type()));
        Ok(StorageReplyEnvelope::with_context(reply, context))
    }
}

impl Message for StorageCommandEnvelope {
    type Reply = StorageReplyEnvelope;
    type Error = StorageError;

    fn protocol(&self) -> &'static str {
        STORAGE_PROTOCOL
    }

    fn message_type(&self) -> u32 {
        self.command.message_type().id()
    }

    fn priority(&self) -> u8 {
        self.command.priority().0
    }

    fn context(&self) -> &MessageContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut MessageContext {
        &mut self.context
    }

    fn make_reply(&mut self) -> Result<StorageReplyEnvelope, StorageError> {
        StorageCommandEnvelope::make_reply(self)
    }
}

impl fmt::Debug for StorageCommandEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCommandEnvelope")
            .field("context", &self.context)
            .field("command", &self.command)
            .field("annotator", &self.annotator.name())
            .field("replies_made", &self.replies_made)
            .finish()
    }
}
