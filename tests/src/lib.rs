//! # MiniApp Bridge Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end bridge choreography
//!     ├── bridge_flows.rs    # Full request/response round trips
//!     └── concurrency.rs     # In-flight multiplexing and races
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bridge-tests
//!
//! # By category
//! cargo test -p bridge-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]
