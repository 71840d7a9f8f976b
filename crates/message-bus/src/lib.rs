//! # Message Bus - Transport Capabilities for Storage Messages
//!
//! The transport-side half of the storage protocol adapter. It defines what a
//! message and a reply look like to the bus, and provides an in-process
//! dispatcher for delivering them.
//!
//! ## Capabilities
//!
//! ```text
//! ┌──────────────┐   send(route, msg)   ┌──────────────┐
//! │    Caller    │ ───────────────────→ │   LocalBus   │
//! └──────────────┘                      └──────┬───────┘
//!        ↑                                     │ handler registered?
//!        │                          yes ┌──────┴──────┐ no
//!        │                              ▼             ▼
//!        │                   MessageHandler   msg.make_reply()
//!        │                              │     + NoAddressForService
//!        └────────────── M::Reply ──────┴─────────────┘
//! ```
//!
//! - `Message`: anything that can travel on the bus and manufacture its own
//!   reply.
//! - `Reply`: anything the bus can hand back to a sender, with error list.
//! - Both are composed with a `MessageContext` / `ReplyContext` rather than
//!   inheriting transport state.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod context;
pub mod error;
pub mod local_bus;
pub mod message;

// Re-export main types
pub use context::{MessageContext, ReplyContext, Trace};
pub use error::{BusError, ErrorCode};
pub use local_bus::{LocalBus, MessageHandler};
pub use message::{Message, Reply};

/// Trace level at which the bus records its own routing decisions.
pub const BUS_TRACE_LEVEL: u8 = 1;
