//! # Integration Flows
//!
//! End-to-end tests of the protocol adapter riding on the local bus.

pub mod flows;
