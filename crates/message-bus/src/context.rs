//! # Message Context
//!
//! Transport state every message and reply carries alongside its payload.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Level-filtered trace of what happened to a message on its trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    level: u8,
    entries: Vec<String>,
}

impl Trace {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            entries: Vec::new(),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, level: u8) {
        self.level = level;
    }

    /// Record `note` if `level` is at or below the configured level.
    ///
    /// Returns whether the note was recorded. Level 0 disables tracing.
    pub fn trace(&mut self, level: u8, note: impl Into<String>) -> bool {
        if level == 0 || level > self.level {
            return false;
        }
        self.entries.push(note.into());
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Transport state attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContext {
    /// Identifies the request/reply pair. Replies copy it.
    pub correlation_id: Uuid,
    pub trace: Trace,
    /// Number of times the transport has resent this message.
    pub retry: u32,
    /// Time the transport still allows for a reply. `None` means unbounded.
    pub time_remaining: Option<Duration>,
}

impl MessageContext {
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            trace: Trace::default(),
            retry: 0,
            time_remaining: None,
        }
    }

    pub fn with_trace_level(mut self, level: u8) -> Self {
        self.trace.set_level(level);
        self
    }

    pub fn with_time_remaining(mut self, time_remaining: Duration) -> Self {
        self.time_remaining = Some(time_remaining);
        self
    }

    /// Start the context of a reply to this message.
    ///
    /// Carries over the correlation id and trace level; trace entries and
    /// retry bookkeeping stay with the message.
    pub fn for_reply(&self) -> ReplyContext {
        ReplyContext {
            correlation_id: self.correlation_id,
            trace: Trace::new(self.trace.level()),
            errors: Vec::new(),
        }
    }
}

impl Default for MessageContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport state attached to a reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyContext {
    pub correlation_id: Uuid,
    pub trace: Trace,
    pub errors: Vec<crate::error::BusError>,
}
