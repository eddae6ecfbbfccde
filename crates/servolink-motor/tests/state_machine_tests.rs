//! Activation state machine against a mock bus.

use servolink_errors::{ControlError, Outcome, StatusCode};
use servolink_motor::{ActivationState, Motor, MotorInfo};
use servolink_protocol::ModeCommand;
use servolink_test_helpers::prelude::*;
use servolink_units::{Angle, Torque};

#[test]
fn enter_mode_on_healthy_bus_activates() {
    init_test_tracing();
    let bus = MockTransport::new();
    let mut motor = Motor::new(bus.clone(), 3, 0, MotorInfo::generic());

    assert_eq!(must(motor.enter_mode()), Outcome::Success);
    assert_eq!(motor.state(), ActivationState::Active);
    let frame = must_some(bus.last_frame(), "enter frame");
    assert_eq!(frame.id, 3);
    assert_eq!(frame.data, ModeCommand::EnterMotorMode.payload());
}

#[test]
fn second_enter_is_noop_without_io() {
    let bus = MockTransport::new();
    let mut motor = Motor::new(bus.clone(), 1, 0, MotorInfo::generic());
    must(motor.enter_mode());
    let before = bus.attempted_writes();

    let result = motor.enter_mode();
    assert_eq!(StatusCode::from_result(&result), StatusCode::AlreadyDone);
    assert_eq!(bus.attempted_writes(), before);
}

#[test]
fn enter_mode_on_failing_bus_stays_inactive() {
    let bus = MockTransport::with_failure();
    let mut motor = Motor::new(bus.clone(), 1, 0, MotorInfo::generic());

    let result = motor.enter_mode();
    assert_eq!(StatusCode::from_result(&result), StatusCode::Fail);
    assert!(must_err(result).is_transport());
    assert_eq!(motor.state(), ActivationState::NotActive);
}

#[test]
fn set_origin_keeps_activation_state() {
    let bus = MockTransport::new();
    let mut motor = Motor::new(bus.clone(), 1, 0, MotorInfo::generic());
    must(motor.set_origin());
    assert_eq!(motor.state(), ActivationState::NotActive);
    must(motor.enter_mode());
    must(motor.set_origin());
    assert!(motor.is_active());
    assert_eq!(
        bus.mode_commands(),
        vec![
            ModeCommand::SetOrigin,
            ModeCommand::EnterMotorMode,
            ModeCommand::SetOrigin
        ]
    );
}

#[test]
fn disarmed_channel_reports_not_switched_on() {
    let bus = MockTransport::new();
    let mut motor = Motor::new(bus.clone(), 1, 0, MotorInfo::generic());
    motor.set_position(Angle::new(1.0));

    let result = motor.send_command();
    assert_eq!(result, Err(ControlError::MotorNotSwitchedOn));
    assert_eq!(StatusCode::from_result(&result), StatusCode::MotorNotSwitchedOn);
    assert_eq!(bus.attempted_writes(), 0);
}

#[test]
fn command_frame_carries_clamped_setpoints() {
    let bus = MockTransport::new();
    let mut motor = Motor::new(bus.clone(), 1, 0, MotorInfo::cubemars_ak70_10());
    must(motor.enter_mode());
    motor.set_torque(Torque::new(100.0));
    must(motor.send_command());

    assert_eq!(motor.torque().value(), 24.5);
    let frame = must_some(bus.command_frames().pop(), "command frame");
    assert_eq!(frame.data[6] & 0x0F, 0x0F);
    assert_eq!(frame.data[7], 0xFF);
}

#[test]
fn transport_failure_mid_session_surfaces_without_retry() {
    let bus = MockTransport::failing_after(1);
    let mut motor = Motor::new(bus.clone(), 1, 0, MotorInfo::generic());
    must(motor.enter_mode());

    assert!(motor.send_command().is_err());
    assert_eq!(bus.attempted_writes(), 2);
    assert!(motor.is_active());
}
