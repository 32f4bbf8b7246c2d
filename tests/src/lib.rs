//! # Mini App Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── fixtures.rs       # Signed payloads shared by tests and benches
//! │   └── integration/      # Real sockets: API server, bot against a fake Bot API
//! └── benches/
//!     └── verification_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p miniapp-tests
//! cargo bench -p miniapp-tests
//! ```

pub mod fixtures;
pub mod integration;
