//! Shared test utilities for servolink.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`mock`] - In-memory recording transport with injectable failures
//! - [`logging`] - Test-scoped `tracing` subscriber
//! - [`prelude`] - Convenience re-exports
//!
//! ```rust,ignore
//! use servolink_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic, reason = "test-only crate")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;
pub mod must;
pub mod prelude;

#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub mod mock;

pub use must::*;

#[cfg(feature = "mock")]
pub use mock::MockTransport;
