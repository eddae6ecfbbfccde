//! Single-setpoint controllers: clamp, store, send.

use servolink_errors::{ControlResult, Outcome};
use servolink_motor::Motor;
use servolink_protocol::Transport;
use servolink_units::{
    Angle, AngularVelocity, Limits, Quantity, RotationalDamping, RotationalStiffness, Torque,
    dims,
};

use crate::controller::{Controller, ensure_active};

/// Shared body of every single-channel setter: armed check, no-op check on
/// the raw value, clamp-and-store through `assign`, then one command frame.
pub(crate) fn set_and_send<T: Transport, D>(
    motor: &mut Motor<T>,
    value: Quantity<D>,
    current: fn(&Motor<T>) -> Quantity<D>,
    assign: impl FnOnce(&mut Motor<T>, Quantity<D>) -> Outcome,
) -> ControlResult {
    ensure_active(motor)?;
    if value == current(motor) {
        return Ok(Outcome::AlreadyDone);
    }
    assign(motor, value);
    motor.send_command()
}

/// Optional caller bounds for [`DirectPositionController`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionUserLimits {
    pub position: Option<Limits<dims::Angle>>,
    pub stiffness: Option<Limits<dims::RotationalStiffness>>,
    pub damper: Option<Limits<dims::RotationalDamping>>,
}

/// Optional caller bounds for [`DirectVelocityController`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityUserLimits {
    pub velocity: Option<Limits<dims::AngularVelocity>>,
    pub damper: Option<Limits<dims::RotationalDamping>>,
}

/// Optional caller bounds for [`DirectTorqueController`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TorqueUserLimits {
    pub torque: Option<Limits<dims::Torque>>,
    pub stiffness: Option<Limits<dims::RotationalStiffness>>,
    pub damper: Option<Limits<dims::RotationalDamping>>,
}

/// Impedance position control: position, stiffness and damper.
#[derive(Debug)]
pub struct DirectPositionController<T> {
    motor: Motor<T>,
    limits: PositionUserLimits,
}

impl<T: Transport> DirectPositionController<T> {
    pub fn new(motor: Motor<T>, limits: PositionUserLimits) -> Self {
        Self { motor, limits }
    }

    pub fn user_limits(&self) -> &PositionUserLimits {
        &self.limits
    }

    pub fn into_motor(self) -> Motor<T> {
        self.motor
    }

    pub fn position(&self) -> Angle {
        self.motor.position()
    }

    pub fn stiffness(&self) -> RotationalStiffness {
        self.motor.stiffness()
    }

    pub fn damper(&self) -> RotationalDamping {
        self.motor.damper()
    }

    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn set_position(&mut self, position: Angle) -> ControlResult {
        let limits = self.limits.position.unwrap_or(self.motor.limits().position);
        set_and_send(&mut self.motor, position, Motor::position, |m, v| {
            m.set_position_within(v, &limits)
        })
    }

    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn set_stiffness(&mut self, stiffness: RotationalStiffness) -> ControlResult {
        let limits = self.limits.stiffness.unwrap_or(self.motor.limits().stiffness);
        set_and_send(&mut self.motor, stiffness, Motor::stiffness, |m, v| {
            m.set_stiffness_within(v, &limits)
        })
    }

    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn set_damper(&mut self, damper: RotationalDamping) -> ControlResult {
        let limits = self.limits.damper.unwrap_or(self.motor.limits().damper);
        set_and_send(&mut self.motor, damper, Motor::damper, |m, v| {
            m.set_damper_within(v, &limits)
        })
    }
}

impl<T: Transport> Controller for DirectPositionController<T> {
    type Transport = T;

    fn motor(&self) -> &Motor<T> {
        &self.motor
    }

    fn motor_mut(&mut self) -> &mut Motor<T> {
        &mut self.motor
    }

    /// Zeroes position, stiffness and damper locally; nothing is sent.
    fn reset(&mut self) -> ControlResult {
        self.motor.set_position(Angle::zero());
        self.motor.set_stiffness(RotationalStiffness::zero());
        self.motor.set_damper(RotationalDamping::zero());
        Ok(Outcome::Success)
    }
}

/// Velocity control with damping.
#[derive(Debug)]
pub struct DirectVelocityController<T> {
    motor: Motor<T>,
    limits: VelocityUserLimits,
}

impl<T: Transport> DirectVelocityController<T> {
    pub fn new(motor: Motor<T>, limits: VelocityUserLimits) -> Self {
        Self { motor, limits }
    }

    pub fn user_limits(&self) -> &VelocityUserLimits {
        &self.limits
    }

    pub fn into_motor(self) -> Motor<T> {
        self.motor
    }

    pub fn velocity(&self) -> AngularVelocity {
        self.motor.velocity()
    }

    pub fn damper(&self) -> RotationalDamping {
        self.motor.damper()
    }

    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn set_velocity(&mut self, velocity: AngularVelocity) -> ControlResult {
        let limits = self.limits.velocity.unwrap_or(self.motor.limits().velocity);
        set_and_send(&mut self.motor, velocity, Motor::velocity, |m, v| {
            m.set_velocity_within(v, &limits)
        })
    }

    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn set_damper(&mut self, damper: RotationalDamping) -> ControlResult {
        let limits = self.limits.damper.unwrap_or(self.motor.limits().damper);
        set_and_send(&mut self.motor, damper, Motor::damper, |m, v| {
            m.set_damper_within(v, &limits)
        })
    }

    /// Zero velocity immediately.
    ///
    /// # Errors
    ///
    /// See [`DirectVelocityController::set_velocity`].
    pub fn stop(&mut self) -> ControlResult {
        self.set_velocity(AngularVelocity::zero())
    }
}

impl<T: Transport> Controller for DirectVelocityController<T> {
    type Transport = T;

    fn motor(&self) -> &Motor<T> {
        &self.motor
    }

    fn motor_mut(&mut self) -> &mut Motor<T> {
        &mut self.motor
    }

    /// Zeroes velocity and damper locally; nothing is sent.
    fn reset(&mut self) -> ControlResult {
        self.motor.set_velocity(AngularVelocity::zero());
        self.motor.set_damper(RotationalDamping::zero());
        Ok(Outcome::Success)
    }
}

/// Feed-forward torque control, optionally with stiffness and damping.
#[derive(Debug)]
pub struct DirectTorqueController<T> {
    motor: Motor<T>,
    limits: TorqueUserLimits,
}

impl<T: Transport> DirectTorqueController<T> {
    pub fn new(motor: Motor<T>, limits: TorqueUserLimits) -> Self {
        Self { motor, limits }
    }

    pub fn user_limits(&self) -> &TorqueUserLimits {
        &self.limits
    }

    pub fn into_motor(self) -> Motor<T> {
        self.motor
    }

    pub fn torque(&self) -> Torque {
        self.motor.torque()
    }

    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn set_torque(&mut self, torque: Torque) -> ControlResult {
        let limits = self.limits.torque.unwrap_or(self.motor.limits().torque);
        set_and_send(&mut self.motor, torque, Motor::torque, |m, v| {
            m.set_torque_within(v, &limits)
        })
    }

    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn set_stiffness(&mut self, stiffness: RotationalStiffness) -> ControlResult {
        let limits = self.limits.stiffness.unwrap_or(self.motor.limits().stiffness);
        set_and_send(&mut self.motor, stiffness, Motor::stiffness, |m, v| {
            m.set_stiffness_within(v, &limits)
        })
    }

    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn set_damper(&mut self, damper: RotationalDamping) -> ControlResult {
        let limits = self.limits.damper.unwrap_or(self.motor.limits().damper);
        set_and_send(&mut self.motor, damper, Motor::damper, |m, v| {
            m.set_damper_within(v, &limits)
        })
    }
}

impl<T: Transport> Controller for DirectTorqueController<T> {
    type Transport = T;

    fn motor(&self) -> &Motor<T> {
        &self.motor
    }

    fn motor_mut(&mut self) -> &mut Motor<T> {
        &mut self.motor
    }

    /// Zeroes torque locally; nothing is sent.
    fn reset(&mut self) -> ControlResult {
        self.motor.set_torque(Torque::zero());
        Ok(Outcome::Success)
    }
}
