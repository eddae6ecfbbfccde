//! Velocity-ramp and position-step profiles against a recording transport.

use servolink_control::ACCEPTABLE_POSITION_ERROR;
use servolink_control::prelude::*;
use servolink_motor::{Motor, MotorInfo};
use servolink_protocol::{MotorLimits, decode_command};
use servolink_test_helpers::prelude::*;
use servolink_units::{
    Angle, AngularAcceleration, AngularVelocity, Frequency, Limits, RotationalStiffness,
};

fn armed_motor(transport: &MockTransport) -> Result<Motor<MockTransport>, ControlError> {
    let mut motor = Motor::new(transport.clone(), 1, 0, MotorInfo::generic());
    motor.enter_mode()?;
    transport.clear();
    Ok(motor)
}

fn ramp(
    transport: &MockTransport,
    limits: RampUserLimits,
) -> Result<VelocityRampController<MockTransport, RecordingPacer>, ControlError> {
    Ok(VelocityRampController::new(armed_motor(transport)?, limits).with_pacer(RecordingPacer::new()))
}

fn stepper(
    transport: &MockTransport,
    limits: StepUserLimits,
) -> Result<PositionStepController<MockTransport, RecordingPacer>, ControlError> {
    Ok(PositionStepController::new(armed_motor(transport)?, limits).with_pacer(RecordingPacer::new()))
}

fn sent_velocities(transport: &MockTransport) -> Vec<f32> {
    transport
        .command_frames()
        .iter()
        .map(|f| must(decode_command(f.payload(), &MotorLimits::GENERIC)).velocity.value())
        .collect()
}

fn sent_positions(transport: &MockTransport) -> Vec<f32> {
    transport
        .command_frames()
        .iter()
        .map(|f| must(decode_command(f.payload(), &MotorLimits::GENERIC)).position.value())
        .collect()
}

#[test]
fn test_ramp_sends_every_setpoint_then_target() -> TestResult {
    init_test_tracing();
    let transport = MockTransport::new();
    let mut ctrl = ramp(&transport, RampUserLimits::default())?;

    // 3 rad/s at 1 rad/s², 10 Hz: 30 setpoints
    let outcome = ctrl.ramp_to(AngularVelocity::new(3.0))?;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(transport.write_count(), 30);
    assert_eq!(ctrl.pacer().pauses().len(), 30);

    let sent = sent_velocities(&transport);
    assert!(sent.windows(2).all(|w| w[0] <= w[1]));
    let last = must_some(sent.last().copied(), "no frames");
    assert!((last - 3.0).abs() < 0.03);
    assert_eq!(ctrl.velocity().value(), 3.0);
    Ok(())
}

#[test]
fn test_ramp_to_current_velocity_is_already_done() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = ramp(&transport, RampUserLimits::default())?;

    assert_eq!(ctrl.ramp_to(AngularVelocity::zero())?, Outcome::AlreadyDone);
    assert_eq!(transport.write_count(), 0);
    Ok(())
}

#[test]
fn test_ramp_zero_frequency_is_rejected_without_writing() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = ramp(&transport, RampUserLimits::default())?;

    let err = must_err(ctrl.ramp_to_with(
        AngularVelocity::new(2.0),
        AngularAcceleration::new(1.0),
        Frequency::zero(),
    ));
    assert!(matches!(err, ControlError::InvalidParameter { .. }));
    assert_eq!(transport.write_count(), 0);
    Ok(())
}

#[test]
fn test_ramp_requires_armed_motor() {
    let transport = MockTransport::new();
    let motor = Motor::new(transport.clone(), 1, 0, MotorInfo::generic());
    let mut ctrl = VelocityRampController::new(motor, RampUserLimits::default())
        .with_pacer(RecordingPacer::new());

    let err = must_err(ctrl.ramp_to(AngularVelocity::new(1.0)));
    assert_eq!(err, ControlError::MotorNotSwitchedOn);
    assert_eq!(transport.write_count(), 0);
}

#[test]
fn test_ramp_down_reverses_direction() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = ramp(&transport, RampUserLimits::default())?;
    ctrl.ramp_to(AngularVelocity::new(1.0))?;
    transport.clear();

    ctrl.ramp_to(AngularVelocity::new(-1.0))?;
    let sent = sent_velocities(&transport);
    assert_eq!(sent.len(), 20);
    assert!(sent.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(ctrl.velocity().value(), -1.0);
    Ok(())
}

#[test]
fn test_ramp_shorter_than_one_period_sends_nothing() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = ramp(&transport, RampUserLimits::default())?;

    // 0.05 rad/s at 1 rad/s² is half a 10 Hz period: no whole setpoint fits
    let outcome = ctrl.ramp_to(AngularVelocity::new(0.05))?;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(transport.write_count(), 0);
    assert!(ctrl.pacer().pauses().is_empty());
    assert!(ctrl.velocity().is_zero());
    Ok(())
}

#[test]
fn test_ramp_target_clamped_by_user_limit() -> TestResult {
    let transport = MockTransport::new();
    let limits = RampUserLimits {
        velocity: Some(Limits::from_values(-2.0, 2.0)),
        ..RampUserLimits::default()
    };
    let mut ctrl = ramp(&transport, limits)?;

    ctrl.ramp_to(AngularVelocity::new(40.0))?;
    assert_eq!(ctrl.velocity().value(), 2.0);
    assert_eq!(transport.write_count(), 20);
    Ok(())
}

#[test]
fn test_ramp_user_limit_wider_than_hardware_saturates_on_wire() -> TestResult {
    let transport = MockTransport::new();
    let limits = RampUserLimits {
        velocity: Some(Limits::from_values(-100.0, 100.0)),
        ..RampUserLimits::default()
    };
    let mut ctrl = ramp(&transport, limits)?;

    ctrl.ramp_to_with(
        AngularVelocity::new(80.0),
        AngularAcceleration::new(80.0),
        Frequency::new(10.0),
    )?;
    assert_eq!(ctrl.velocity().value(), 80.0);
    let last = must_some(sent_velocities(&transport).last().copied(), "no frames");
    assert!((last - 50.0).abs() < 1e-3);
    Ok(())
}

#[test]
fn test_ramp_stops_at_first_transport_failure() -> TestResult {
    let transport = MockTransport::failing_after(1);
    let mut motor = Motor::new(transport.clone(), 1, 0, MotorInfo::generic());
    motor.enter_mode()?;
    let mut ctrl = VelocityRampController::new(motor, RampUserLimits::default())
        .with_pacer(RecordingPacer::new());

    let err = must_err(ctrl.ramp_to(AngularVelocity::new(2.0)));
    assert!(err.is_transport());
    // the enter frame succeeded, the first ramp frame failed
    assert_eq!(transport.write_count(), 1);
    assert_eq!(transport.attempted_writes(), 2);
    assert!(ctrl.pacer().pauses().is_empty());
    Ok(())
}

#[test]
fn test_cancelled_ramp_reports_sent_frames() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = ramp(&transport, RampUserLimits::default())?;
    ctrl.cancel_token().cancel();

    let err = must_err(ctrl.ramp_to(AngularVelocity::new(2.0)));
    assert_eq!(err, ControlError::Cancelled { sent: 0 });
    assert_eq!(transport.write_count(), 0);
    Ok(())
}

#[test]
fn test_ramp_reset_clears_profile_parameters() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = ramp(&transport, RampUserLimits::default())?;
    ctrl.ramp_to(AngularVelocity::new(0.5))?;
    transport.clear();

    ctrl.reset()?;
    assert_eq!(transport.write_count(), 1);
    assert!(ctrl.velocity().is_zero());
    assert!(ctrl.acceleration().is_zero());

    let err = must_err(ctrl.ramp_to(AngularVelocity::new(1.0)));
    assert!(matches!(err, ControlError::InvalidParameter { .. }));
    Ok(())
}

#[test]
fn test_step_move_sends_steps_and_correction() -> TestResult {
    init_test_tracing();
    let transport = MockTransport::new();
    let mut ctrl = stepper(&transport, StepUserLimits::default())?;

    let outcome = ctrl.move_to_with(Angle::new(1.0), Angle::new(0.3), Frequency::new(1_000.0))?;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(transport.write_count(), 4);
    // no pause after the correction
    assert_eq!(ctrl.pacer().pauses().len(), 3);

    let sent = sent_positions(&transport);
    let expected = [0.3, 0.6, 0.9, 1.0];
    for (got, want) in sent.iter().zip(expected) {
        assert!((got - want).abs() < 1e-3, "{got} != {want}");
    }
    assert_eq!(ctrl.position().value(), 1.0);
    Ok(())
}

#[test]
fn test_step_move_exact_multiple_has_no_correction() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = stepper(&transport, StepUserLimits::default())?;

    ctrl.move_to_with(Angle::new(-1.0), Angle::new(0.25), Frequency::new(1_000.0))?;
    assert_eq!(transport.write_count(), 4);
    let last = must_some(sent_positions(&transport).last().copied(), "no frames");
    assert!((last + 1.0).abs() < 1e-3);
    Ok(())
}

#[test]
fn test_step_move_within_tolerance_is_already_done() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = stepper(&transport, StepUserLimits::default())?;

    let tiny = ACCEPTABLE_POSITION_ERROR * 0.5;
    assert_eq!(ctrl.move_to(tiny)?, Outcome::AlreadyDone);
    assert_eq!(transport.write_count(), 0);
    Ok(())
}

#[test]
fn test_step_failure_skips_correction() -> TestResult {
    let transport = MockTransport::failing_after(3);
    let mut motor = Motor::new(transport.clone(), 1, 0, MotorInfo::generic());
    motor.enter_mode()?;
    let mut ctrl =
        PositionStepController::new(motor, StepUserLimits::default()).with_pacer(RecordingPacer::new());

    let err = must_err(ctrl.move_to_with(Angle::new(1.0), Angle::new(0.3), Frequency::new(1_000.0)));
    assert!(err.is_transport());
    // enter + two steps went out, the third step failed
    assert_eq!(transport.write_count(), 3);
    assert_eq!(transport.attempted_writes(), 4);
    Ok(())
}

#[test]
fn test_step_user_position_limit_clamps_target() -> TestResult {
    let transport = MockTransport::new();
    let limits = StepUserLimits {
        position: Some(Limits::from_values(-0.5, 0.5)),
        ..StepUserLimits::default()
    };
    let mut ctrl = stepper(&transport, limits)?;

    ctrl.move_to_with(Angle::new(3.0), Angle::new(0.2), Frequency::new(1_000.0))?;
    assert_eq!(ctrl.position().value(), 0.5);
    // 0.5 / 0.2: two steps and a correction
    assert_eq!(transport.write_count(), 3);
    Ok(())
}

#[test]
fn test_step_user_step_limit_caps_step_size() -> TestResult {
    let transport = MockTransport::new();
    let limits = StepUserLimits {
        step: Some(Limits::from_values(0.0, 0.1)),
        ..StepUserLimits::default()
    };
    let mut ctrl = stepper(&transport, limits)?;

    ctrl.move_to_with(Angle::new(0.5), Angle::new(1.0), Frequency::new(1_000.0))?;
    let sent = sent_positions(&transport);
    assert!(sent.len() >= 5);
    assert!(sent.windows(2).all(|w| w[1] - w[0] <= 0.1 + 1e-3));
    Ok(())
}

#[test]
fn test_step_stiffness_and_damper_reach_the_wire() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = stepper(&transport, StepUserLimits::default())?;

    ctrl.set_stiffness(RotationalStiffness::new(10.0))?;
    let frame = must_some(transport.last_frame(), "no frame");
    let params = must(decode_command(frame.payload(), &MotorLimits::GENERIC));
    assert!((params.stiffness.value() - 10.0).abs() < 0.2);
    Ok(())
}
