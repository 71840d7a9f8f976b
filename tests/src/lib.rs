//! # Storage Message-Bus Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Envelope throughput
//! └── src/integration/  # Command envelope → local bus → reply envelope
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p storage-tests
//! cargo bench -p storage-tests
//! ```

pub mod integration;
