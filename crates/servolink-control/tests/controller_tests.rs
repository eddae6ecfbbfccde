//! Switch-on/off behaviour shared through the `Controller` trait.

use servolink_control::prelude::*;
use servolink_motor::{ActivationState, Motor, MotorInfo};
use servolink_protocol::{ModeCommand, MotorLimits, decode_command};
use servolink_test_helpers::prelude::*;
use servolink_units::{Angle, AngularVelocity, Limits, Torque};

fn motor(transport: &MockTransport) -> Motor<MockTransport> {
    Motor::new(transport.clone(), 1, 0, MotorInfo::generic())
}

#[test]
fn test_switch_on_new_zero_sends_enter_origin_reset() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = DirectPositionController::new(motor(&transport), PositionUserLimits::default());

    assert_eq!(ctrl.switch_on(SwitchOnMode::SetNewZero)?, Outcome::Success);
    assert_eq!(ctrl.state(), ActivationState::Active);
    assert_eq!(
        transport.mode_commands(),
        vec![ModeCommand::EnterMotorMode, ModeCommand::SetOrigin]
    );
    assert_eq!(transport.command_frames().len(), 1);
    Ok(())
}

#[test]
fn test_switch_on_previous_zero_only_enters() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = DirectTorqueController::new(motor(&transport), TorqueUserLimits::default());

    ctrl.switch_on(SwitchOnMode::ReturnToPreviousZero)?;
    assert_eq!(transport.write_count(), 1);
    assert_eq!(ctrl.switch_on(SwitchOnMode::SetNewZero)?, Outcome::AlreadyDone);
    assert_eq!(transport.write_count(), 1);
    Ok(())
}

#[test]
fn test_toggle_state_alternates() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = DirectVelocityController::new(motor(&transport), VelocityUserLimits::default());

    ctrl.toggle_state()?;
    assert_eq!(ctrl.state(), ActivationState::Active);
    ctrl.toggle_state()?;
    assert_eq!(ctrl.state(), ActivationState::NotActive);
    assert_eq!(
        transport.mode_commands().last().copied(),
        Some(ModeCommand::ExitMotorMode)
    );
    Ok(())
}

#[test]
fn test_switch_on_failure_leaves_motor_inactive() {
    let transport = MockTransport::with_failure();
    let mut ctrl = DirectPositionController::new(motor(&transport), PositionUserLimits::default());

    let err = must_err(ctrl.switch_on(SwitchOnMode::SetNewZero));
    assert!(err.is_transport());
    assert_eq!(ctrl.state(), ActivationState::NotActive);
    // every step was still attempted
    assert_eq!(transport.attempted_writes(), 2);
}

#[test]
fn test_direct_setters_require_armed_motor() {
    let transport = MockTransport::new();
    let mut ctrl = DirectPositionController::new(motor(&transport), PositionUserLimits::default());

    let err = must_err(ctrl.set_position(Angle::new(1.0)));
    assert_eq!(err, ControlError::MotorNotSwitchedOn);
    assert_eq!(transport.write_count(), 0);
}

#[test]
fn test_direct_position_user_limit_narrower_than_hardware() -> TestResult {
    let transport = MockTransport::new();
    let limits = PositionUserLimits {
        position: Some(Limits::from_values(-1.0, 1.0)),
        ..PositionUserLimits::default()
    };
    let mut ctrl = DirectPositionController::new(motor(&transport), limits);
    ctrl.switch_on(SwitchOnMode::ReturnToPreviousZero)?;

    ctrl.set_position(Angle::new(5.0))?;
    assert_eq!(ctrl.position().value(), 1.0);
    assert_eq!(ctrl.set_position(Angle::new(1.0))?, Outcome::AlreadyDone);
    Ok(())
}

#[test]
fn test_direct_torque_wire_saturates_at_hardware_limit() -> TestResult {
    let transport = MockTransport::new();
    let limits = TorqueUserLimits {
        torque: Some(Limits::from_values(-30.0, 30.0)),
        ..TorqueUserLimits::default()
    };
    let mut ctrl = DirectTorqueController::new(motor(&transport), limits);
    ctrl.switch_on(SwitchOnMode::ReturnToPreviousZero)?;

    ctrl.set_torque(Torque::new(25.0))?;
    assert_eq!(ctrl.torque().value(), 25.0);
    let frame = must_some(transport.last_frame(), "no frame");
    let sent = must(decode_command(frame.payload(), &MotorLimits::GENERIC));
    assert!((sent.torque.value() - 16.0).abs() < 1e-3);
    Ok(())
}

#[test]
fn test_direct_velocity_stop_sends_zero() -> TestResult {
    let transport = MockTransport::new();
    let mut ctrl = DirectVelocityController::new(motor(&transport), VelocityUserLimits::default());
    ctrl.switch_on(SwitchOnMode::ReturnToPreviousZero)?;
    ctrl.set_velocity(AngularVelocity::new(3.0))?;

    assert_eq!(ctrl.stop()?, Outcome::Success);
    assert!(ctrl.velocity().is_zero());
    assert_eq!(ctrl.stop()?, Outcome::AlreadyDone);
    Ok(())
}
