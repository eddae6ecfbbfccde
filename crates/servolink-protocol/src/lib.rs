//! Wire protocol for impedance-controlled rotary actuators on a CAN-like bus.
//!
//! This crate is I/O-free: it defines the [`Frame`] exchanged with a bus, the
//! [`Transport`] contract implemented elsewhere, and pure functions that pack
//! five physical setpoints into an 8-byte quantized command and unpack the
//! 6-byte feedback reply.
//!
//! ```
//! use servolink_protocol::{InputParameters, MotorLimits, encode_command};
//!
//! let bytes = encode_command(&InputParameters::zeroed(), &MotorLimits::GENERIC);
//! assert_eq!(bytes, [0x80, 0x00, 0x80, 0x00, 0x00, 0x00, 0x08, 0x00]);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod codec;
pub mod frame;
pub mod params;
pub mod quantize;
pub mod transport;

pub use codec::{
    COMMAND_LEN, CommandEncoder, FEEDBACK_PAYLOAD_LEN, FeedbackFrame, ModeCommand,
    TorqueFeedbackRange, decode_command, decode_feedback, encode_command, encode_feedback,
};
pub use frame::{FRAME_DATA_LEN, Frame};
pub use params::{InputParameters, MotorLimits, OutputParameters};
pub use quantize::{
    CHANNEL_BITS, POSITION_BITS, dequantize, dequantize_quantity, quantize, quantize_quantity,
    resolution,
};
pub use transport::Transport;
