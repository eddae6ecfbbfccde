//! Actuator activation state and command channel.

use servolink_errors::{ControlError, ControlResult, Outcome, ProtocolError};
use servolink_protocol::{
    CommandEncoder, Frame, InputParameters, ModeCommand, MotorLimits, OutputParameters,
    TorqueFeedbackRange, Transport, decode_feedback,
};
use servolink_units::{
    Angle, AngularVelocity, Limits, Quantity, RotationalDamping, RotationalStiffness, Torque,
    dims,
};
use tracing::{debug, info, warn};

use crate::config::MotorInfo;

/// Whether the actuator accepts motion commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivationState {
    Active,
    #[default]
    NotActive,
}

/// One actuator on a bus.
///
/// The motor owns its transport and the commanded setpoints. Setters only
/// update local state; [`Motor::send_command`] transmits. Activation changes
/// only after the mode-change frame was written.
#[derive(Debug)]
pub struct Motor<T> {
    transport: T,
    encoder: CommandEncoder,
    info: MotorInfo,
    state: ActivationState,
    input: InputParameters,
    output: OutputParameters,
    torque_feedback: TorqueFeedbackRange,
}

fn assign<D>(slot: &mut Quantity<D>, value: Quantity<D>, limits: &Limits<D>) -> Outcome {
    if value == *slot {
        return Outcome::AlreadyDone;
    }
    *slot = limits.clamp(value);
    Outcome::Success
}

impl<T> Motor<T> {
    pub fn new(transport: T, can_id: u8, master_id: u8, info: MotorInfo) -> Self {
        Self {
            transport,
            encoder: CommandEncoder::new(can_id, master_id, info.limits),
            info,
            state: ActivationState::NotActive,
            input: InputParameters::zeroed(),
            output: OutputParameters::zeroed(),
            torque_feedback: TorqueFeedbackRange::default(),
        }
    }

    /// Select the torque range used when decoding feedback.
    pub fn with_torque_feedback_range(mut self, range: TorqueFeedbackRange) -> Self {
        self.torque_feedback = range;
        self
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ActivationState::Active
    }

    pub fn info(&self) -> &MotorInfo {
        &self.info
    }

    /// Hardware limits.
    pub fn limits(&self) -> &MotorLimits {
        &self.info.limits
    }

    pub fn can_id(&self) -> u8 {
        self.encoder.can_id()
    }

    pub fn master_id(&self) -> u8 {
        self.encoder.master_id()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn input_parameters(&self) -> &InputParameters {
        &self.input
    }

    pub fn output_parameters(&self) -> &OutputParameters {
        &self.output
    }

    /// Commanded position.
    pub fn position(&self) -> Angle {
        self.input.position
    }

    pub fn velocity(&self) -> AngularVelocity {
        self.input.velocity
    }

    pub fn torque(&self) -> Torque {
        self.input.torque
    }

    pub fn stiffness(&self) -> RotationalStiffness {
        self.input.stiffness
    }

    pub fn damper(&self) -> RotationalDamping {
        self.input.damper
    }

    /// Last decoded position.
    pub fn actual_position(&self) -> Angle {
        self.output.position
    }

    pub fn actual_velocity(&self) -> AngularVelocity {
        self.output.velocity
    }

    pub fn actual_torque(&self) -> Torque {
        self.output.torque
    }

    // Setters: `AlreadyDone` when the value equals the current setpoint,
    // otherwise clamp, store and report `Success`. Nothing is transmitted.

    pub fn set_position(&mut self, position: Angle) -> Outcome {
        assign(&mut self.input.position, position, &self.info.limits.position)
    }

    pub fn set_velocity(&mut self, velocity: AngularVelocity) -> Outcome {
        assign(&mut self.input.velocity, velocity, &self.info.limits.velocity)
    }

    pub fn set_torque(&mut self, torque: Torque) -> Outcome {
        assign(&mut self.input.torque, torque, &self.info.limits.torque)
    }

    pub fn set_stiffness(&mut self, stiffness: RotationalStiffness) -> Outcome {
        assign(&mut self.input.stiffness, stiffness, &self.info.limits.stiffness)
    }

    pub fn set_damper(&mut self, damper: RotationalDamping) -> Outcome {
        assign(&mut self.input.damper, damper, &self.info.limits.damper)
    }

    /// Like [`Motor::set_position`] but clamped against caller-supplied limits,
    /// which may be wider or narrower than the hardware range.
    pub fn set_position_within(&mut self, position: Angle, limits: &Limits<dims::Angle>) -> Outcome {
        assign(&mut self.input.position, position, limits)
    }

    pub fn set_velocity_within(
        &mut self,
        velocity: AngularVelocity,
        limits: &Limits<dims::AngularVelocity>,
    ) -> Outcome {
        assign(&mut self.input.velocity, velocity, limits)
    }

    pub fn set_torque_within(&mut self, torque: Torque, limits: &Limits<dims::Torque>) -> Outcome {
        assign(&mut self.input.torque, torque, limits)
    }

    pub fn set_stiffness_within(
        &mut self,
        stiffness: RotationalStiffness,
        limits: &Limits<dims::RotationalStiffness>,
    ) -> Outcome {
        assign(&mut self.input.stiffness, stiffness, limits)
    }

    pub fn set_damper_within(
        &mut self,
        damper: RotationalDamping,
        limits: &Limits<dims::RotationalDamping>,
    ) -> Outcome {
        assign(&mut self.input.damper, damper, limits)
    }

    fn require_active(&self) -> Result<(), ControlError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(ControlError::MotorNotSwitchedOn)
        }
    }
}

impl<T: Transport> Motor<T> {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), ControlError> {
        self.transport.write(frame).map_err(|e| {
            warn!(can_id = frame.id, error = %e, "Frame write failed");
            ControlError::from(e)
        })
    }

    fn send_mode(&mut self, command: ModeCommand) -> Result<(), ControlError> {
        let frame = self.encoder.mode(command);
        debug!(can_id = frame.id, ?command, "Sending mode command");
        self.write_frame(&frame)
    }

    /// Arm the actuator.
    ///
    /// # Errors
    ///
    /// [`ControlError::Transport`] if the frame could not be written; the
    /// state is left unchanged.
    pub fn enter_mode(&mut self) -> ControlResult {
        if self.is_active() {
            return Ok(Outcome::AlreadyDone);
        }
        self.send_mode(ModeCommand::EnterMotorMode)?;
        self.state = ActivationState::Active;
        info!(can_id = self.can_id(), "Motor mode entered");
        Ok(Outcome::Success)
    }

    /// Disarm the actuator.
    ///
    /// # Errors
    ///
    /// [`ControlError::Transport`] if the frame could not be written; the
    /// state is left unchanged.
    pub fn exit_mode(&mut self) -> ControlResult {
        if !self.is_active() {
            return Ok(Outcome::AlreadyDone);
        }
        self.send_mode(ModeCommand::ExitMotorMode)?;
        self.state = ActivationState::NotActive;
        info!(can_id = self.can_id(), "Motor mode exited");
        Ok(Outcome::Success)
    }

    /// Make the current shaft position the new zero. Allowed in either state.
    ///
    /// # Errors
    ///
    /// [`ControlError::Transport`] if the frame could not be written.
    pub fn set_origin(&mut self) -> ControlResult {
        self.send_mode(ModeCommand::SetOrigin)?;
        info!(can_id = self.can_id(), "Origin set");
        Ok(Outcome::Success)
    }

    /// Zero every setpoint and the decoded feedback, then send the command.
    ///
    /// # Errors
    ///
    /// [`ControlError::MotorNotSwitchedOn`] when disarmed (nothing is reset),
    /// [`ControlError::Transport`] if the frame could not be written.
    pub fn reset_parameters(&mut self) -> ControlResult {
        self.require_active()?;
        self.input = InputParameters::zeroed();
        self.output = OutputParameters::zeroed();
        debug!(can_id = self.can_id(), "Parameters reset");
        self.send_command()
    }

    /// Encode the current setpoints and transmit them.
    ///
    /// # Errors
    ///
    /// [`ControlError::MotorNotSwitchedOn`] when disarmed,
    /// [`ControlError::Transport`] if the frame could not be written.
    pub fn send_command(&mut self) -> ControlResult {
        self.require_active()?;
        let frame = self.encoder.command(&self.input);
        debug!(
            can_id = frame.id,
            position = self.input.position.value(),
            velocity = self.input.velocity.value(),
            torque = self.input.torque.value(),
            "Sending command"
        );
        self.write_frame(&frame)?;
        Ok(Outcome::Success)
    }

    /// Read one frame and decode it into the output parameters.
    ///
    /// # Errors
    ///
    /// [`ControlError::NoFeedback`] when no frame is pending,
    /// [`ControlError::Protocol`] for a short payload or a reply from another
    /// actuator, [`ControlError::Transport`] if reading failed.
    pub fn refresh_feedback(&mut self) -> ControlResult {
        let Some(frame) = self.transport.read()? else {
            return Err(ControlError::NoFeedback);
        };
        let reply = decode_feedback(frame.payload(), &self.info.limits, self.torque_feedback)?;
        if reply.motor_id != self.can_id() {
            return Err(ProtocolError::UnexpectedId {
                expected: self.can_id(),
                actual: reply.motor_id,
            }
            .into());
        }
        self.output = reply.params;
        debug!(
            can_id = reply.motor_id,
            position = self.output.position.value(),
            velocity = self.output.velocity.value(),
            torque = self.output.torque.value(),
            "Feedback decoded"
        );
        Ok(Outcome::Success)
    }
}
