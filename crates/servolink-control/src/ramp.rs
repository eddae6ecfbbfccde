//! Velocity ramp at constant acceleration.
//!
//! The ramp from the current commanded velocity `v0` to a target `v1` takes
//! `delta_t = |v1 - v0| / |accel|` and is split into `floor(delta_t * freq)`
//! setpoints `v0 + accel * t_i`, evenly spaced in time. Consecutive sends are
//! separated by `delta_t / n - ONE_SENDING_TIME`.

use std::time::Duration;

use servolink_errors::{ControlError, ControlResult, Outcome};
use servolink_motor::Motor;
use servolink_protocol::Transport;
use servolink_units::{
    AngularAcceleration, AngularVelocity, Frequency, Limits, RotationalDamping, Time, clamp_optional,
    dims,
};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::controller::{Controller, ensure_active};
use crate::direct::set_and_send;
use crate::pacing::{FREQ_10HZ, ONE_SENDING_TIME, Pacer, ThreadPacer, seconds};

/// Default acceleration magnitude, 1 rad/s².
pub const DEFAULT_ACCELERATION: AngularAcceleration = AngularAcceleration::new(1.0);
/// Default update rate.
pub const DEFAULT_RAMP_FREQUENCY: Frequency = FREQ_10HZ;

/// Setpoint schedule of one ramp, computed before any I/O.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampPlan {
    start: AngularVelocity,
    target: AngularVelocity,
    acceleration: AngularAcceleration,
    duration: Time,
    steps: u32,
    delay: Duration,
}

impl RampPlan {
    /// Plan a ramp from `start` to `target`. The sign of `acceleration` is
    /// ignored; direction follows `target - start`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-positive frequency, a zero or non-finite
    /// acceleration, or a non-finite target.
    pub fn new(
        start: AngularVelocity,
        target: AngularVelocity,
        acceleration: AngularAcceleration,
        frequency: Frequency,
    ) -> Result<Self, ControlError> {
        if !(frequency.value() > 0.0) {
            return Err(ControlError::invalid("frequency", "must be positive"));
        }
        if acceleration.is_zero() || !acceleration.is_finite() {
            return Err(ControlError::invalid("acceleration", "must be finite and non-zero"));
        }
        if !target.is_finite() {
            return Err(ControlError::invalid("velocity", "must be finite"));
        }

        let direction = (target - start).signum();
        let acceleration = acceleration.abs() * direction;
        let duration: Time = (target - start).abs() / acceleration.abs();
        let count = f64::from((duration * frequency).value()).floor();
        let steps = if count.is_finite() && count > 0.0 {
            count.min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        let delay = if steps == 0 {
            Duration::ZERO
        } else {
            seconds(
                f64::from(duration.value()) / f64::from(steps)
                    - f64::from(ONE_SENDING_TIME.value()),
            )
        };

        Ok(Self {
            start,
            target,
            acceleration,
            duration,
            steps,
            delay,
        })
    }

    pub fn start(&self) -> AngularVelocity {
        self.start
    }

    pub fn target(&self) -> AngularVelocity {
        self.target
    }

    /// Signed acceleration.
    pub fn acceleration(&self) -> AngularAcceleration {
        self.acceleration
    }

    pub fn duration(&self) -> Time {
        self.duration
    }

    /// `floor(duration * frequency)`. Zero means the ramp is shorter than one
    /// period; nothing is sent.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Number of frames the ramp sends; equal to [`RampPlan::steps`].
    pub fn sends(&self) -> u32 {
        self.steps
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Setpoint `i` in `1..=sends()`. The last one is the target itself.
    pub fn setpoint(&self, i: u32) -> AngularVelocity {
        if i >= self.steps {
            return self.target;
        }
        let t = self.duration * (i as f32 / self.steps as f32);
        self.start + self.acceleration * t
    }

    pub fn setpoints(&self) -> impl Iterator<Item = AngularVelocity> + '_ {
        (1..=self.sends()).map(|i| self.setpoint(i))
    }
}

/// Optional caller bounds for [`VelocityRampController`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RampUserLimits {
    pub acceleration: Option<Limits<dims::AngularAcceleration>>,
    pub frequency: Option<Limits<dims::Frequency>>,
    pub velocity: Option<Limits<dims::AngularVelocity>>,
    pub damper: Option<Limits<dims::RotationalDamping>>,
}

/// Ramps the commanded velocity at a bounded acceleration.
///
/// Ramps block the caller for their whole duration; see
/// [`ProfileTask`](crate::ProfileTask) for a cancellable background run.
#[derive(Debug)]
pub struct VelocityRampController<T, P = ThreadPacer> {
    motor: Motor<T>,
    limits: RampUserLimits,
    acceleration: AngularAcceleration,
    frequency: Frequency,
    pacer: P,
    cancel: CancelToken,
}

impl<T: Transport> VelocityRampController<T, ThreadPacer> {
    /// Controller with the default acceleration and frequency.
    pub fn new(motor: Motor<T>, limits: RampUserLimits) -> Self {
        Self::with_parameters(motor, limits, DEFAULT_ACCELERATION, DEFAULT_RAMP_FREQUENCY)
    }

    pub fn with_parameters(
        motor: Motor<T>,
        limits: RampUserLimits,
        acceleration: AngularAcceleration,
        frequency: Frequency,
    ) -> Self {
        Self {
            motor,
            acceleration: clamp_optional(acceleration, limits.acceleration.as_ref()),
            frequency: clamp_optional(frequency, limits.frequency.as_ref()),
            limits,
            pacer: ThreadPacer,
            cancel: CancelToken::new(),
        }
    }
}

impl<T: Transport, P: Pacer> VelocityRampController<T, P> {
    /// Replace the pacer, e.g. with a [`RecordingPacer`](crate::RecordingPacer).
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> VelocityRampController<T, Q> {
        VelocityRampController {
            motor: self.motor,
            limits: self.limits,
            acceleration: self.acceleration,
            frequency: self.frequency,
            pacer,
            cancel: self.cancel,
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn user_limits(&self) -> &RampUserLimits {
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

    pub fn acceleration(&self) -> AngularAcceleration {
        self.acceleration
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Store the acceleration used by [`VelocityRampController::ramp_to`],
    /// clamped to the user limit if any.
    pub fn set_acceleration(&mut self, acceleration: AngularAcceleration) -> Outcome {
        self.acceleration = clamp_optional(acceleration, self.limits.acceleration.as_ref());
        Outcome::Success
    }

    /// Store the update frequency, clamped to the user limit if any.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `frequency <= 0`; the stored value is kept.
    pub fn set_frequency(&mut self, frequency: Frequency) -> ControlResult {
        if !(frequency.value() > 0.0) {
            return Err(ControlError::invalid("frequency", "must be positive"));
        }
        self.frequency = clamp_optional(frequency, self.limits.frequency.as_ref());
        Ok(Outcome::Success)
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

    fn velocity_limits(&self) -> Limits<dims::AngularVelocity> {
        self.limits.velocity.unwrap_or(self.motor.limits().velocity)
    }

    /// Plan a ramp from the current velocity without sending anything.
    /// `Ok(None)` when the target equals the current velocity.
    ///
    /// # Errors
    ///
    /// See [`RampPlan::new`].
    pub fn plan(
        &self,
        target: AngularVelocity,
        acceleration: AngularAcceleration,
        frequency: Frequency,
    ) -> Result<Option<RampPlan>, ControlError> {
        let start = self.motor.velocity();
        if target == start {
            return Ok(None);
        }
        if !(frequency.value() > 0.0) {
            return Err(ControlError::invalid("frequency", "must be positive"));
        }
        let target = self.velocity_limits().clamp(target);
        let acceleration = clamp_optional(acceleration, self.limits.acceleration.as_ref());
        let frequency = clamp_optional(frequency, self.limits.frequency.as_ref());
        if target == start {
            return Ok(None);
        }
        RampPlan::new(start, target, acceleration, frequency).map(Some)
    }

    /// Ramp to `target` with the stored acceleration and frequency.
    ///
    /// # Errors
    ///
    /// See [`VelocityRampController::ramp_to_with`].
    pub fn ramp_to(&mut self, target: AngularVelocity) -> ControlResult {
        self.ramp_to_with(target, self.acceleration, self.frequency)
    }

    /// Ramp to `target`, blocking until the last setpoint was sent.
    ///
    /// # Errors
    ///
    /// - `MotorNotSwitchedOn` when disarmed
    /// - `InvalidParameter` for a non-positive frequency or zero acceleration
    /// - `Transport` on the first failed send; the ramp stops there
    /// - `Cancelled` when the cancel token fired between two sends
    pub fn ramp_to_with(
        &mut self,
        target: AngularVelocity,
        acceleration: AngularAcceleration,
        frequency: Frequency,
    ) -> ControlResult {
        ensure_active(&self.motor)?;
        let Some(plan) = self.plan(target, acceleration, frequency)? else {
            return Ok(Outcome::AlreadyDone);
        };
        self.run(&plan)
    }

    /// Execute a plan. The motor must be armed.
    ///
    /// # Errors
    ///
    /// Same as [`VelocityRampController::ramp_to_with`] minus the planning errors.
    pub fn run(&mut self, plan: &RampPlan) -> ControlResult {
        ensure_active(&self.motor)?;
        let limits = self.velocity_limits();
        debug!(
            can_id = self.motor.can_id(),
            from = plan.start().value(),
            to = plan.target().value(),
            setpoints = plan.sends(),
            delay_us = plan.delay().as_micros() as u64,
            "Starting velocity ramp"
        );

        let mut sent = 0u32;
        for velocity in plan.setpoints() {
            if self.cancel.is_cancelled() {
                info!(can_id = self.motor.can_id(), sent, "Velocity ramp cancelled");
                return Err(ControlError::Cancelled { sent });
            }
            self.motor.set_velocity_within(velocity, &limits);
            if let Err(err) = self.motor.send_command() {
                warn!(can_id = self.motor.can_id(), sent, error = %err, "Velocity ramp aborted");
                return Err(err);
            }
            sent += 1;
            self.pacer.pause(plan.delay());
        }
        debug!(can_id = self.motor.can_id(), sent, "Velocity ramp complete");
        Ok(Outcome::Success)
    }

    /// Command zero velocity immediately.
    ///
    /// # Errors
    ///
    /// `MotorNotSwitchedOn` when disarmed, `Transport` when the send fails.
    pub fn stop(&mut self) -> ControlResult {
        let limits = self.velocity_limits();
        set_and_send(&mut self.motor, AngularVelocity::zero(), Motor::velocity, |m, v| {
            m.set_velocity_within(v, &limits)
        })
    }
}

impl<T: Transport, P: Pacer> Controller for VelocityRampController<T, P> {
    type Transport = T;

    fn motor(&self) -> &Motor<T> {
        &self.motor
    }

    fn motor_mut(&mut self) -> &mut Motor<T> {
        &mut self.motor
    }

    /// Zero velocity, damper, acceleration and frequency, then send. A ramp
    /// after reset fails until acceleration and frequency are set again.
    fn reset(&mut self) -> ControlResult {
        self.motor.set_velocity(AngularVelocity::zero());
        self.motor.set_damper(RotationalDamping::zero());
        self.acceleration = AngularAcceleration::zero();
        self.frequency = Frequency::zero();
        self.motor.send_command()
    }
}
