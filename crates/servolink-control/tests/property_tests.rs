//! Property-based tests for ramp and step planning.

use proptest::prelude::*;
use servolink_control::{ACCEPTABLE_POSITION_ERROR, RampPlan, StepPlan};
use servolink_units::{Angle, AngularAcceleration, AngularVelocity, Frequency};

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    #[test]
    fn prop_ramp_is_monotonic_and_ends_on_target(
        v0 in -50.0f32..50.0,
        v1 in -50.0f32..50.0,
        accel in 0.5f32..50.0,
        freq in 1.0f32..200.0,
    ) {
        prop_assume!(v0 != v1);
        let plan = RampPlan::new(
            AngularVelocity::new(v0),
            AngularVelocity::new(v1),
            AngularAcceleration::new(accel),
            Frequency::new(freq),
        );
        prop_assert!(plan.is_ok());
        let Ok(plan) = plan else { return Ok(()) };

        let points: Vec<f32> = plan.setpoints().map(|v| v.value()).collect();
        prop_assert_eq!(points.len() as u32, plan.sends());
        if plan.steps() > 0 {
            prop_assert_eq!(points.last().copied(), Some(v1));
        }
        let rising = v1 > v0;
        for pair in points.windows(2) {
            if let [a, b] = pair {
                let ordered = if rising { a <= b } else { a >= b };
                prop_assert!(ordered, "{} then {}", a, b);
            }
        }
    }

    #[test]
    fn prop_ramp_step_count_matches_duration(
        dv in 0.1f32..40.0,
        accel in 0.5f32..20.0,
        freq in 1.0f32..100.0,
    ) {
        let plan = RampPlan::new(
            AngularVelocity::zero(),
            AngularVelocity::new(dv),
            AngularAcceleration::new(-accel),
            Frequency::new(freq),
        );
        prop_assert!(plan.is_ok());
        let Ok(plan) = plan else { return Ok(()) };
        let expected = (dv / accel * freq).floor();
        prop_assert!((plan.steps() as f32 - expected).abs() <= 1.0);
        prop_assert!(plan.acceleration().value() > 0.0);
    }

    #[test]
    fn prop_step_covers_distance(
        p0 in -10.0f32..10.0,
        p1 in -10.0f32..10.0,
        step in 0.01f32..1.0,
    ) {
        prop_assume!((p1 - p0).abs() > step);
        let plan = StepPlan::new(Angle::new(p0), Angle::new(p1), Angle::new(step), Frequency::new(1_000.0));
        prop_assert!(plan.is_ok());
        let Ok(plan) = plan else { return Ok(()) };

        let points: Vec<Angle> = plan.setpoints().collect();
        prop_assert_eq!(points.len() as u32, plan.sends());
        prop_assert!(plan.remainder() < Angle::new(step) + ACCEPTABLE_POSITION_ERROR);
        let last = points.last().copied().unwrap_or(Angle::new(p0));
        let slack = ACCEPTABLE_POSITION_ERROR + Angle::new(1e-4 * p0.abs().max(p1.abs()).max(1.0));
        prop_assert!((last - Angle::new(p1)).abs() <= slack);
        for pair in points.windows(2) {
            if let [a, b] = pair {
                prop_assert!((*b - *a).abs() <= Angle::new(step * 1.001));
            }
        }
    }
}
