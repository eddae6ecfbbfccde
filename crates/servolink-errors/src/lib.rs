//! Status codes and error types shared across the servolink crates.
//!
//! Every control operation reports one of four outcomes: it succeeded, there
//! was nothing to do, it failed, or the actuator was not switched on. The
//! first two are carried by [`Outcome`] in the `Ok` arm; the failures are
//! [`ControlError`] variants. [`StatusCode`] flattens both into the four-code
//! view used by callers that only need the classification.
//!
//! - [`transport`]: errors raised by a bus transport
//! - [`protocol`]: malformed frames
//! - [`control`]: actuator and motion-profile failures
//! - [`config`]: motor configuration loading
//! - [`status`]: [`Outcome`] and [`StatusCode`]
//!
//! No error is ever retried inside the library; retry policy belongs to the
//! caller.
//!
//! # Example
//!
//! ```
//! use servolink_errors::prelude::*;
//!
//! fn arm(active: bool) -> ControlResult {
//!     if active {
//!         return Ok(Outcome::AlreadyDone);
//!     }
//!     Err(TransportError::WriteFailed("bus off".into()).into())
//! }
//!
//! assert_eq!(StatusCode::from_result(&arm(true)), StatusCode::AlreadyDone);
//! assert_eq!(StatusCode::from_result(&arm(false)), StatusCode::Fail);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod control;
pub mod prelude;
pub mod protocol;
pub mod status;
pub mod transport;

pub use config::ConfigError;
pub use control::ControlError;
pub use protocol::ProtocolError;
pub use status::{Outcome, StatusCode};
pub use transport::TransportError;

/// Result of a control operation that can legitimately be a no-op.
pub type ControlResult = std::result::Result<Outcome, ControlError>;

/// Result of a raw transport call.
pub type TransportResult<T = ()> = std::result::Result<T, TransportError>;

/// Result of decoding a frame.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Result of loading or validating configuration.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
