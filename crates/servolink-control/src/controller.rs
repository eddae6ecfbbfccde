//! Switch-on/off contract shared by every controller.

use servolink_errors::{ControlError, ControlResult, Outcome};
use servolink_motor::{ActivationState, Motor};
use servolink_protocol::Transport;
use tracing::{info, warn};

/// How the actuator is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwitchOnMode {
    /// Enter motor mode, make the current position zero and reset every
    /// setpoint. All three steps are attempted even if one fails.
    #[default]
    SetNewZero,
    /// Enter motor mode keeping the previous origin.
    ReturnToPreviousZero,
}

/// A controller owns one motor and drives it through a fixed set of channels.
pub trait Controller {
    type Transport: Transport;

    fn motor(&self) -> &Motor<Self::Transport>;

    fn motor_mut(&mut self) -> &mut Motor<Self::Transport>;

    /// Return the controller and the channels it drives to their zero state.
    ///
    /// # Errors
    ///
    /// Depends on the controller; see each implementation.
    fn reset(&mut self) -> ControlResult;

    fn state(&self) -> ActivationState {
        self.motor().state()
    }

    /// Arm the actuator.
    ///
    /// # Errors
    ///
    /// The first failure among the steps of `mode`.
    fn switch_on(&mut self, mode: SwitchOnMode) -> ControlResult {
        switch_on(self.motor_mut(), mode)
    }

    /// Disarm the actuator.
    ///
    /// # Errors
    ///
    /// [`ControlError::Transport`] if the exit frame could not be written.
    fn switch_off(&mut self) -> ControlResult {
        self.motor_mut().exit_mode()
    }

    /// Switch off when armed, otherwise switch on with the default mode.
    ///
    /// # Errors
    ///
    /// See [`Controller::switch_on`] and [`Controller::switch_off`].
    fn toggle_state(&mut self) -> ControlResult {
        match self.state() {
            ActivationState::Active => self.switch_off(),
            ActivationState::NotActive => self.switch_on(SwitchOnMode::default()),
        }
    }
}

/// Arm `motor` according to `mode`.
///
/// # Errors
///
/// The first failure among the attempted steps.
pub fn switch_on<T: Transport>(motor: &mut Motor<T>, mode: SwitchOnMode) -> ControlResult {
    if motor.is_active() {
        return Ok(Outcome::AlreadyDone);
    }
    match mode {
        SwitchOnMode::ReturnToPreviousZero => motor.enter_mode(),
        SwitchOnMode::SetNewZero => {
            let steps = [
                motor.enter_mode(),
                motor.set_origin(),
                motor.reset_parameters(),
            ];
            let failures = steps.iter().filter(|step| step.is_err()).count();
            match steps.into_iter().find_map(Result::err) {
                Some(err) => {
                    warn!(can_id = motor.can_id(), failures, error = %err, "Switch-on incomplete");
                    Err(err)
                }
                None => {
                    info!(can_id = motor.can_id(), "Switched on with new zero");
                    Ok(Outcome::Success)
                }
            }
        }
    }
}

/// `Err(MotorNotSwitchedOn)` unless the motor is armed.
pub(crate) fn ensure_active<T>(motor: &Motor<T>) -> Result<(), ControlError> {
    if motor.is_active() {
        Ok(())
    } else {
        Err(ControlError::MotorNotSwitchedOn)
    }
}
