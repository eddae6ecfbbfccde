//! Command and feedback frame encoding.
//!
//! Command frame (eight bytes, fields MSB first):
//!
//! | byte | content |
//! |------|---------|
//! | 0 | `pos[15:8]` |
//! | 1 | `pos[7:0]` |
//! | 2 | `vel[11:4]` |
//! | 3 | `vel[3:0] << 4 \| kp[11:8]` |
//! | 4 | `kp[7:0]` |
//! | 5 | `kd[11:4]` |
//! | 6 | `kd[3:0] << 4 \| torque[11:8]` |
//! | 7 | `torque[7:0]` |
//!
//! Feedback payload (six bytes): motor id, 16-bit position, 12-bit velocity,
//! 12-bit torque.

use servolink_errors::{ProtocolError, ProtocolResult};
use servolink_units::{Limits, dims};

use crate::frame::{FRAME_DATA_LEN, Frame};
use crate::params::{InputParameters, MotorLimits, OutputParameters};
use crate::quantize::{CHANNEL_BITS, POSITION_BITS, dequantize_quantity, quantize_quantity};

/// Length of an encoded command.
pub const COMMAND_LEN: usize = FRAME_DATA_LEN;
/// Minimum payload length of a feedback frame.
pub const FEEDBACK_PAYLOAD_LEN: usize = 6;

const MODE_PREFIX: u8 = 0xFF;

/// Fixed mode-change commands; each is seven `0xFF` bytes followed by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeCommand {
    EnterMotorMode,
    ExitMotorMode,
    SetOrigin,
}

impl ModeCommand {
    /// Trailing byte identifying the command.
    pub const fn marker(self) -> u8 {
        match self {
            ModeCommand::EnterMotorMode => 0xFC,
            ModeCommand::ExitMotorMode => 0xFD,
            ModeCommand::SetOrigin => 0xFE,
        }
    }

    pub const fn payload(self) -> [u8; COMMAND_LEN] {
        let mut out = [MODE_PREFIX; COMMAND_LEN];
        out[COMMAND_LEN - 1] = self.marker();
        out
    }

    /// Recognize a mode-change payload.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let (marker, prefix) = payload.split_last()?;
        if payload.len() != COMMAND_LEN || prefix.iter().any(|b| *b != MODE_PREFIX) {
            return None;
        }
        match *marker {
            0xFC => Some(ModeCommand::EnterMotorMode),
            0xFD => Some(ModeCommand::ExitMotorMode),
            0xFE => Some(ModeCommand::SetOrigin),
            _ => None,
        }
    }
}

/// Range used to dequantize the torque channel of a feedback frame.
///
/// `Symmetric` decodes over `[min, max]`, the same range used for encoding.
/// `Mirrored` decodes over `[min, -max]`, reproducing firmware tooling that
/// shipped with that range. With symmetric hardware limits the mirrored range
/// is empty and every reply decodes to `min`; only select it when verified
/// against a real actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TorqueFeedbackRange {
    #[default]
    Symmetric,
    Mirrored,
}

impl TorqueFeedbackRange {
    fn limits(self, torque: &Limits<dims::Torque>) -> Limits<dims::Torque> {
        match self {
            TorqueFeedbackRange::Symmetric => *torque,
            TorqueFeedbackRange::Mirrored => Limits::new(torque.min, -torque.max),
        }
    }
}

/// Pack `params` into a command payload. Every channel is clamped to `limits`
/// before quantization.
pub fn encode_command(params: &InputParameters, limits: &MotorLimits) -> [u8; COMMAND_LEN] {
    let p = params.clamped(limits);

    let pos = quantize_quantity(p.position, &limits.position, POSITION_BITS);
    let vel = quantize_quantity(p.velocity, &limits.velocity, CHANNEL_BITS);
    let kp = quantize_quantity(p.stiffness, &limits.stiffness, CHANNEL_BITS);
    let kd = quantize_quantity(p.damper, &limits.damper, CHANNEL_BITS);
    let torque = quantize_quantity(p.torque, &limits.torque, CHANNEL_BITS);

    let [pos_hi, pos_lo] = pos.to_be_bytes();
    [
        pos_hi,
        pos_lo,
        (vel >> 4) as u8,
        (((vel & 0x0F) << 4) | ((kp >> 8) & 0x0F)) as u8,
        (kp & 0xFF) as u8,
        (kd >> 4) as u8,
        (((kd & 0x0F) << 4) | ((torque >> 8) & 0x0F)) as u8,
        (torque & 0xFF) as u8,
    ]
}

/// Reverse of [`encode_command`], up to one quantization step per channel.
pub fn decode_command(payload: &[u8], limits: &MotorLimits) -> ProtocolResult<InputParameters> {
    let [b0, b1, b2, b3, b4, b5, b6, b7, ..] = *payload else {
        return Err(ProtocolError::Truncated {
            expected: COMMAND_LEN,
            actual: payload.len(),
        });
    };
    let pos = u16::from_be_bytes([b0, b1]);
    let vel = (u16::from(b2) << 4) | (u16::from(b3) >> 4);
    let kp = (u16::from(b3 & 0x0F) << 8) | u16::from(b4);
    let kd = (u16::from(b5) << 4) | (u16::from(b6) >> 4);
    let torque = (u16::from(b6 & 0x0F) << 8) | u16::from(b7);

    Ok(InputParameters {
        position: dequantize_quantity(pos, &limits.position, POSITION_BITS),
        velocity: dequantize_quantity(vel, &limits.velocity, CHANNEL_BITS),
        torque: dequantize_quantity(torque, &limits.torque, CHANNEL_BITS),
        stiffness: dequantize_quantity(kp, &limits.stiffness, CHANNEL_BITS),
        damper: dequantize_quantity(kd, &limits.damper, CHANNEL_BITS),
    })
}

/// A decoded feedback frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackFrame {
    /// Id of the replying actuator.
    pub motor_id: u8,
    pub params: OutputParameters,
}

/// Decode a feedback payload.
///
/// # Errors
///
/// Returns [`ProtocolError::Truncated`] when fewer than
/// [`FEEDBACK_PAYLOAD_LEN`] bytes are present.
pub fn decode_feedback(
    payload: &[u8],
    limits: &MotorLimits,
    torque_range: TorqueFeedbackRange,
) -> ProtocolResult<FeedbackFrame> {
    let [motor_id, p_hi, p_lo, v_hi, v_lo_c_hi, c_lo, ..] = *payload else {
        return Err(ProtocolError::Truncated {
            expected: FEEDBACK_PAYLOAD_LEN,
            actual: payload.len(),
        });
    };
    let pos = u16::from_be_bytes([p_hi, p_lo]);
    let vel = (u16::from(v_hi) << 4) | (u16::from(v_lo_c_hi) >> 4);
    let cur = (u16::from(v_lo_c_hi & 0x0F) << 8) | u16::from(c_lo);

    let torque_limits = torque_range.limits(&limits.torque);
    Ok(FeedbackFrame {
        motor_id,
        params: OutputParameters {
            position: dequantize_quantity(pos, &limits.position, POSITION_BITS),
            velocity: dequantize_quantity(vel, &limits.velocity, CHANNEL_BITS),
            torque: dequantize_quantity(cur, &torque_limits, CHANNEL_BITS),
        },
    })
}

/// Build a feedback payload; the inverse of [`decode_feedback`] with the
/// symmetric torque range. Used by simulators and tests.
pub fn encode_feedback(
    motor_id: u8,
    params: &OutputParameters,
    limits: &MotorLimits,
) -> [u8; FEEDBACK_PAYLOAD_LEN] {
    let pos = quantize_quantity(params.position, &limits.position, POSITION_BITS);
    let vel = quantize_quantity(params.velocity, &limits.velocity, CHANNEL_BITS);
    let cur = quantize_quantity(params.torque, &limits.torque, CHANNEL_BITS);
    let [pos_hi, pos_lo] = pos.to_be_bytes();
    [
        motor_id,
        pos_hi,
        pos_lo,
        (vel >> 4) as u8,
        (((vel & 0x0F) << 4) | ((cur >> 8) & 0x0F)) as u8,
        (cur & 0xFF) as u8,
    ]
}

/// Builds addressed frames for one actuator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandEncoder {
    can_id: u8,
    master_id: u8,
    limits: MotorLimits,
}

impl CommandEncoder {
    pub fn new(can_id: u8, master_id: u8, limits: MotorLimits) -> Self {
        Self {
            can_id,
            master_id,
            limits,
        }
    }

    pub fn can_id(&self) -> u8 {
        self.can_id
    }

    pub fn master_id(&self) -> u8 {
        self.master_id
    }

    pub fn limits(&self) -> &MotorLimits {
        &self.limits
    }

    /// Command frame for `params`.
    pub fn command(&self, params: &InputParameters) -> Frame {
        Frame::full(
            self.can_id,
            self.master_id,
            encode_command(params, &self.limits),
        )
    }

    /// Mode-change frame.
    pub fn mode(&self, command: ModeCommand) -> Frame {
        Frame::full(self.can_id, self.master_id, command.payload())
    }
}
