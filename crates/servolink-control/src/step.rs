//! Position moves in fixed increments.
//!
//! A move of `delta` with step `s` sends `floor(|delta| / |s|)` setpoints,
//! each `s` further along, then one corrective setpoint at the target when
//! the leftover exceeds [`ACCEPTABLE_POSITION_ERROR`].

use std::time::Duration;

use servolink_errors::{ControlError, ControlResult, Outcome};
use servolink_motor::Motor;
use servolink_protocol::Transport;
use servolink_units::{
    Angle, DEGREES_PER_RADIAN, Frequency, Limits, RotationalDamping, RotationalStiffness,
    clamp_optional, deg, dims,
};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::controller::{Controller, ensure_active};
use crate::direct::set_and_send;
use crate::pacing::{FREQ_1KHZ, ONE_SENDING_TIME, Pacer, ThreadPacer};

/// Leftover below which no corrective setpoint is sent (0.01°).
pub const ACCEPTABLE_POSITION_ERROR: Angle = Angle::new(0.01 / DEGREES_PER_RADIAN);

/// Default update rate.
pub const DEFAULT_STEP_FREQUENCY: Frequency = FREQ_1KHZ;

/// Default step, 0.1°.
pub fn default_step() -> Angle {
    deg(0.1)
}

/// Setpoint schedule of one stepped move, computed before any I/O.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    start: Angle,
    target: Angle,
    step: Angle,
    direction: f32,
    steps: u32,
    remainder: Angle,
    delay: Duration,
}

impl StepPlan {
    /// Plan a move from `start` to `target`. The sign of `step` is ignored.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a zero or non-finite step, a non-positive
    /// frequency, or a non-finite target.
    pub fn new(
        start: Angle,
        target: Angle,
        step: Angle,
        frequency: Frequency,
    ) -> Result<Self, ControlError> {
        if step.is_zero() || !step.is_finite() {
            return Err(ControlError::invalid("step", "must be finite and non-zero"));
        }
        if !(frequency.value() > 0.0) {
            return Err(ControlError::invalid("frequency", "must be positive"));
        }
        if !target.is_finite() {
            return Err(ControlError::invalid("position", "must be finite"));
        }

        let delta = target - start;
        let step = step.abs();
        let distance = delta.abs();
        let count = f64::from((distance / step).value()).floor();
        let steps = if count.is_finite() && count > 0.0 {
            count.min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        let remainder = distance - step * steps as f32;

        let delay = if steps == 0 {
            Duration::ZERO
        } else {
            let n = f64::from(steps);
            let total = n / f64::from(frequency.value()) - n * f64::from(ONE_SENDING_TIME.value());
            let delay_us = (total * 1e6 / n).floor();
            if delay_us > 0.0 {
                Duration::from_micros(delay_us as u64)
            } else {
                Duration::ZERO
            }
        };

        Ok(Self {
            start,
            target,
            step,
            direction: delta.signum(),
            steps,
            remainder,
            delay,
        })
    }

    pub fn start(&self) -> Angle {
        self.start
    }

    pub fn target(&self) -> Angle {
        self.target
    }

    /// Step magnitude.
    pub fn step(&self) -> Angle {
        self.step
    }

    /// Full steps.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// `|delta| - |step| * steps`.
    pub fn remainder(&self) -> Angle {
        self.remainder
    }

    /// Pause after each full step, whole microseconds.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn needs_correction(&self) -> bool {
        self.remainder > ACCEPTABLE_POSITION_ERROR
    }

    /// Total frames the move sends.
    pub fn sends(&self) -> u32 {
        self.steps + u32::from(self.needs_correction())
    }

    /// Position after full step `i`.
    pub fn setpoint(&self, i: u32) -> Angle {
        self.start + self.step * (self.direction * i as f32)
    }

    /// Full-step setpoints, then the target when a correction is due.
    pub fn setpoints(&self) -> impl Iterator<Item = Angle> + '_ {
        (1..=self.steps)
            .map(|i| self.setpoint(i))
            .chain(self.needs_correction().then_some(self.target))
    }
}

/// Optional caller bounds for [`PositionStepController`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepUserLimits {
    pub step: Option<Limits<dims::Angle>>,
    pub frequency: Option<Limits<dims::Frequency>>,
    pub position: Option<Limits<dims::Angle>>,
    pub stiffness: Option<Limits<dims::RotationalStiffness>>,
    pub damper: Option<Limits<dims::RotationalDamping>>,
}

/// Moves the commanded position in discrete increments.
#[derive(Debug)]
pub struct PositionStepController<T, P = ThreadPacer> {
    motor: Motor<T>,
    limits: StepUserLimits,
    step: Angle,
    frequency: Frequency,
    pacer: P,
    cancel: CancelToken,
}

impl<T: Transport> PositionStepController<T, ThreadPacer> {
    /// Controller with a 0.1° step at 1 kHz.
    pub fn new(motor: Motor<T>, limits: StepUserLimits) -> Self {
        Self::with_parameters(motor, limits, default_step(), DEFAULT_STEP_FREQUENCY)
    }

    pub fn with_parameters(
        motor: Motor<T>,
        limits: StepUserLimits,
        step: Angle,
        frequency: Frequency,
    ) -> Self {
        Self {
            motor,
            step: clamp_optional(step, limits.step.as_ref()),
            frequency: clamp_optional(frequency, limits.frequency.as_ref()),
            limits,
            pacer: ThreadPacer,
            cancel: CancelToken::new(),
        }
    }
}

impl<T: Transport, P: Pacer> PositionStepController<T, P> {
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> PositionStepController<T, Q> {
        PositionStepController {
            motor: self.motor,
            limits: self.limits,
            step: self.step,
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

    pub fn user_limits(&self) -> &StepUserLimits {
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

    pub fn step(&self) -> Angle {
        self.step
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn set_step(&mut self, step: Angle) -> Outcome {
        self.step = clamp_optional(step, self.limits.step.as_ref());
        Outcome::Success
    }

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

    fn position_limits(&self) -> Limits<dims::Angle> {
        self.limits.position.unwrap_or(self.motor.limits().position)
    }

    /// Plan a move from the current commanded position without sending.
    /// `Ok(None)` when there is nothing to send: the target equals the current
    /// position, or lies closer than one step plus the acceptable error.
    ///
    /// # Errors
    ///
    /// See [`StepPlan::new`].
    pub fn plan(
        &self,
        target: Angle,
        step: Angle,
        frequency: Frequency,
    ) -> Result<Option<StepPlan>, ControlError> {
        let start = self.motor.position();
        if target == start {
            return Ok(None);
        }
        if step.is_zero() {
            return Err(ControlError::invalid("step", "must be finite and non-zero"));
        }
        if frequency.is_zero() {
            return Err(ControlError::invalid("frequency", "must be positive"));
        }
        let target = self.position_limits().clamp(target);
        let step = clamp_optional(step, self.limits.step.as_ref());
        let frequency = clamp_optional(frequency, self.limits.frequency.as_ref());
        let plan = StepPlan::new(start, target, step, frequency)?;
        Ok((plan.sends() > 0).then_some(plan))
    }

    /// Move to `target` with the stored step and frequency.
    ///
    /// # Errors
    ///
    /// See [`PositionStepController::move_to_with`].
    pub fn move_to(&mut self, target: Angle) -> ControlResult {
        self.move_to_with(target, self.step, self.frequency)
    }

    /// Move to `target`, blocking until the last setpoint was sent.
    ///
    /// # Errors
    ///
    /// - `MotorNotSwitchedOn` when disarmed
    /// - `InvalidParameter` for a zero step or non-positive frequency
    /// - `Transport` on the first failed send; no correction follows
    /// - `Cancelled` when the cancel token fired between two sends
    pub fn move_to_with(&mut self, target: Angle, step: Angle, frequency: Frequency) -> ControlResult {
        ensure_active(&self.motor)?;
        let Some(plan) = self.plan(target, step, frequency)? else {
            return Ok(Outcome::AlreadyDone);
        };
        self.run(&plan)
    }

    /// Execute a plan. The motor must be armed.
    ///
    /// # Errors
    ///
    /// Same as [`PositionStepController::move_to_with`] minus the planning errors.
    pub fn run(&mut self, plan: &StepPlan) -> ControlResult {
        ensure_active(&self.motor)?;
        let limits = self.position_limits();
        debug!(
            can_id = self.motor.can_id(),
            from = plan.start().value(),
            to = plan.target().value(),
            steps = plan.steps(),
            correction = plan.needs_correction(),
            delay_us = plan.delay().as_micros() as u64,
            "Starting position steps"
        );

        let mut sent = 0u32;
        for (i, position) in plan.setpoints().enumerate() {
            if self.cancel.is_cancelled() {
                info!(can_id = self.motor.can_id(), sent, "Position steps cancelled");
                return Err(ControlError::Cancelled { sent });
            }
            self.motor.set_position_within(position, &limits);
            if let Err(err) = self.motor.send_command() {
                warn!(can_id = self.motor.can_id(), sent, error = %err, "Position steps aborted");
                return Err(err);
            }
            sent += 1;
            // the corrective setpoint is not followed by a pause
            if (i as u64) < u64::from(plan.steps()) {
                self.pacer.pause(plan.delay());
            }
        }
        debug!(can_id = self.motor.can_id(), sent, "Position steps complete");
        Ok(Outcome::Success)
    }
}

impl<T: Transport, P: Pacer> Controller for PositionStepController<T, P> {
    type Transport = T;

    fn motor(&self) -> &Motor<T> {
        &self.motor
    }

    fn motor_mut(&mut self) -> &mut Motor<T> {
        &mut self.motor
    }

    /// Zero position, stiffness, damper, step and frequency locally; nothing
    /// is sent. Moves fail until step and frequency are set again.
    fn reset(&mut self) -> ControlResult {
        self.motor.set_position(Angle::zero());
        self.motor.set_stiffness(RotationalStiffness::zero());
        self.motor.set_damper(RotationalDamping::zero());
        self.step = Angle::zero();
        self.frequency = Frequency::zero();
        Ok(Outcome::Success)
    }
}
