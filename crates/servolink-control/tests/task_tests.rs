//! Profiles running on tokio's blocking pool.

use std::time::Duration;

use servolink_control::ACCEPTABLE_POSITION_ERROR;
use servolink_control::prelude::*;
use servolink_motor::{Motor, MotorInfo};
use servolink_test_helpers::prelude::*;
use servolink_units::{Angle, AngularAcceleration, AngularVelocity, Frequency};

fn armed(transport: &MockTransport) -> Result<Motor<MockTransport>, ControlError> {
    let mut motor = Motor::new(transport.clone(), 1, 0, MotorInfo::generic());
    motor.enter_mode()?;
    transport.clear();
    Ok(motor)
}

#[tokio::test]
async fn test_spawned_ramp_returns_controller() -> TestResult {
    let transport = MockTransport::new();
    let ctrl = VelocityRampController::new(armed(&transport)?, RampUserLimits::default())
        .with_pacer(RecordingPacer::new());

    let task = ctrl.spawn_ramp(AngularVelocity::new(1.0))?;
    let (ctrl, result) = task.join().await?;
    assert_eq!(result?, Outcome::Success);
    assert_eq!(ctrl.velocity().value(), 1.0);
    assert_eq!(transport.write_count(), 10);
    Ok(())
}

#[tokio::test]
async fn test_cancel_stops_long_ramp() -> TestResult {
    let transport = MockTransport::new();
    // 100 setpoints roughly 10 ms apart
    let ctrl = VelocityRampController::with_parameters(
        armed(&transport)?,
        RampUserLimits::default(),
        AngularAcceleration::new(1.0),
        Frequency::new(100.0),
    );

    let task = ctrl.spawn_ramp(AngularVelocity::new(1.0))?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    task.cancel();
    let (ctrl, result) = task.join().await?;

    match must_err(result) {
        ControlError::Cancelled { sent } => assert!(sent > 0 && sent < 100, "sent {sent}"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(ctrl.velocity().value() < 1.0);
    assert!(ctrl.cancel_token().is_cancelled());
    Ok(())
}

#[tokio::test]
async fn test_spawned_move_with_custom_profile() -> TestResult {
    let transport = MockTransport::new();
    let ctrl = PositionStepController::new(armed(&transport)?, StepUserLimits::default())
        .with_pacer(RecordingPacer::new());

    let task = ProfileTask::spawn(ctrl, |c| {
        c.move_to_with(Angle::new(0.5), Angle::new(0.1), Frequency::new(1_000.0))?;
        c.move_to_with(Angle::zero(), Angle::new(0.1), Frequency::new(1_000.0))
    })?;
    let (ctrl, result) = task.join().await?;
    result?;
    assert!(ctrl.position().abs() < ACCEPTABLE_POSITION_ERROR);
    assert_eq!(transport.write_count(), 10);
    Ok(())
}

#[test]
fn test_spawn_outside_runtime_is_an_error() -> TestResult {
    let transport = MockTransport::new();
    let ctrl = PositionStepController::new(armed(&transport)?, StepUserLimits::default());

    let err = must_err(ctrl.spawn_move(Angle::new(1.0)));
    assert!(matches!(err, ControlError::Task(_)));
    assert_eq!(transport.write_count(), 0);
    Ok(())
}
