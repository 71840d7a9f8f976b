//! # Message and Reply Capabilities
//!
//! The shapes the bus expects. Protocol adapters implement these on their
//! own envelope types; the bus never sees the payload behind them.

use crate::context::{MessageContext, ReplyContext};
use crate::error::BusError;

/// Something that can travel on the bus and produce its own reply.
pub trait Message: Send {
    /// The reply type this message manufactures.
    type Reply: Reply;

    /// Error raised by the message's reply factory.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name of the protocol the message belongs to.
    fn protocol(&self) -> &'static str;

    /// Protocol-specific numeric message type.
    fn message_type(&self) -> u32;

    /// Scheduling priority. Lower values are served first.
    fn priority(&self) -> u8 {
        127
    }

    fn context(&self) -> &MessageContext;

    fn context_mut(&mut self) -> &mut MessageContext;

    /// Manufacture the reply matching this message.
    ///
    /// Used both by handlers answering the message and by the bus when it
    /// has to synthesize a reply itself.
    fn make_reply(&mut self) -> Result<Self::Reply, Self::Error>;
}

/// Something the bus can hand back to the sender of a message.
pub trait Reply: Send {
    fn protocol(&self) -> &'static str;

    fn reply_type(&self) -> u32;

    fn context(&self) -> &ReplyContext;

    fn context_mut(&mut self) -> &mut ReplyContext;

    fn errors(&self) -> &[BusError] {
        &self.context().errors
    }

    fn add_error(&mut self, error: BusError) {
        self.context_mut().errors.push(error);
    }

    fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}
