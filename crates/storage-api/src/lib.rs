//! # Storage API Crate
//!
//! The storage-domain object model consumed by the message-bus protocol
//! adapter: commands, replies, bucket summaries and result codes.
//!
//! ## Design Principles
//!
//! - **Commands own their reply factory**: every `StorageCommand` knows how to
//!   manufacture its matching `StorageReply`.
//! - **Capability narrowing, not downcasting**: replies that carry a bucket
//!   summary expose it through `StorageReply::as_bucket_info_reply_mut`, which
//!   returns `None` for every other reply kind.
//! - **Replies inherit identity**: a reply carries the `MessageId` and
//!   `Priority` of the command that produced it.

pub mod command;
pub mod commands;
pub mod entities;
pub mod errors;
pub mod message_type;
pub mod reply;
pub mod return_code;

pub use command::{CommandHeader, StorageCommand};
pub use commands::*;
pub use entities::*;
pub use errors::StorageError;
pub use message_type::MessageType;
pub use reply::{BucketInfoReply, ReplyHeader, StorageReply};
pub use return_code::{ResultCode, ReturnCode};
