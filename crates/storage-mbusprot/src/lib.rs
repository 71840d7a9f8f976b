//! # Storage Message-Bus Protocol (storage-mbusprot)
//!
//! Bridges the storage engine's command/reply object model onto the
//! message-bus `Message`/`Reply` capabilities.
//!
//! ## Flow
//!
//! ```text
//! StorageCommand ──new()──→ StorageCommandEnvelope ──send──→ [Bus]
//!                                   │
//!                           make_reply()  (handler or bus fast path)
//!                                   │
//!                   command.make_reply() → ReplyAnnotator
//!                                   ↓
//!                         StorageReplyEnvelope ──→ [Bus] ──→ sender
//! ```
//!
//! ## Ownership
//!
//! | Envelope | Owns | Created by |
//! |----------|------|------------|
//! | `StorageCommandEnvelope` | exactly one `Box<dyn StorageCommand>` | caller |
//! | `StorageReplyEnvelope` | exactly one `Box<dyn StorageReply>` | `make_reply` only |
//!
//! Neither envelope is `Clone`; both move between owners.
//!
//! ## Reply Modes
//!
//! The reply produced by the command can be annotated before it is wrapped:
//!
//! - `ReplyMode::Augment` (default): bucket-info replies get their summary
//!   overwritten with the `(1, 1, 1)` placeholder. Replies without the
//!   bucket-info capability are a contract violation and panic.
//! - `ReplyMode::PassThrough`: the reply is wrapped untouched.
//! - Any `Fn(&mut dyn StorageReply) + Send + Sync` can be supplied as a
//!   custom [`ReplyAnnotator`].
//!
//! ## Usage
//!
//! ```ignore
//! use storage_api::{BucketId, DocumentId, PutCommand};
//! use storage_mbusprot::StorageCommandEnvelope;
//!
//! let cmd = PutCommand::new(BucketId::new(1), DocumentId::new("id:ns:type::1"), 10);
//! let mut envelope = StorageCommandEnvelope::new(Box::new(cmd));
//! let reply = envelope.make_reply()?;
//! assert_eq!(reply.reply().as_bucket_info_reply().unwrap().bucket_info().doc_count, 1);
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod annotator;
pub mod command;
pub mod config;
pub mod reply;

pub use annotator::{PassThrough, PlaceholderBucketInfo, ReplyAnnotator, PLACEHOLDER_BUCKET_INFO};
pub use command::{EnvelopeState, StorageCommandEnvelope};
pub use config::{AdapterConfig, ConfigError, ReplyMode};
pub use reply::StorageReplyEnvelope;

/// Protocol name reported to the bus by both envelopes.
pub const STORAGE_PROTOCOL: &str = "StorageProtocol";
