use mruv_kinematics::{
    ExtremumKind, KinematicsError, Mode, Scenario, build_equations, evaluate_at, explain,
    find_extremum, find_stop_time, from_velocity, total_distance,
};
use mruv_symbolic::{Expression, differentiate};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn position_mode_derives_velocity_and_checks_acceleration() {
    let scenario = Scenario::position(50.0, -20.0, 10.0, 3.0);
    let eq = build_equations(&scenario).unwrap();
    let position = eq.position.as_ref().unwrap();
    let velocity = eq.velocity.as_ref().unwrap();
    assert_eq!(position.to_string(), "5*t^2 - 20*t + 50");
    assert_eq!(velocity.to_string(), "10*t - 20");
    assert_close(evaluate_at(velocity, 3.0).unwrap(), 10.0);
    assert_close(evaluate_at(position, 3.0).unwrap(), 35.0);
    assert_eq!(eq.acceleration, 10.0);
}

#[test]
fn velocity_mode_skips_position() {
    let eq = build_equations(&Scenario::velocity(4.0, -2.0, 1.5)).unwrap();
    assert_eq!(eq.mode, Mode::Velocity);
    assert!(eq.position.is_none());
    let eval = eq.evaluate(1.5).unwrap();
    assert_eq!(eval.position, None);
    assert_close(eval.velocity.unwrap(), 1.0);
}

#[test]
fn stop_time_of_vertical_throw() {
    let s = Expression::polynomial(&[0.0, 19.6, -4.9]);
    let stop = find_stop_time(&s).unwrap().unwrap();
    assert_close(stop.time, 2.0);
    assert_close(stop.position, 19.6);
}

#[test]
fn object_that_never_stops() {
    // v(t) = 3 > 0 for every t
    let s = Expression::polynomial(&[1.0, 3.0]);
    assert_eq!(find_stop_time(&s).unwrap(), None);
    // v(t) = 2t + 4 vanishes only at t = -2
    let s = Expression::polynomial(&[0.0, 4.0, 1.0]);
    assert_eq!(find_stop_time(&s).unwrap(), None);
}

#[test]
fn slow_deceleration_stops_far_in_the_future() {
    // v(t) = 1 - 1e-10 t vanishes at t = 1e10
    let s = Expression::polynomial(&[0.0, 1.0, -0.5e-10]);
    let stop = find_stop_time(&s).unwrap().expect("object stops");
    assert!((stop.time - 1.0e10).abs() / 1.0e10 < 1e-9, "got {}", stop.time);
    assert!((stop.position - 0.5e10).abs() / 0.5e10 < 1e-9);
}

#[test]
fn stop_time_of_resting_object_is_invalid() {
    let s = Expression::constant(3.0);
    assert!(matches!(
        find_stop_time(&s),
        Err(KinematicsError::Symbolic(_))
    ));
}

#[test]
fn extremum_kind_follows_leading_coefficient() {
    let projectile = Expression::polynomial(&[10.0, 30.0, -4.9]);
    let top = find_extremum(&projectile).unwrap();
    assert_eq!(top.kind, ExtremumKind::Maximum);
    assert_close(top.time, 30.0 / 9.8);
    assert_close(top.position, 10.0 + 900.0 / 19.6);

    let valley = Expression::polynomial(&[20.0, -12.0, 3.0]);
    let bottom = find_extremum(&valley).unwrap();
    assert_eq!(bottom.kind, ExtremumKind::Minimum);
    assert_close(bottom.time, 2.0);
    assert_close(bottom.position, 8.0);
}

#[test]
fn zero_acceleration_has_no_extremum() {
    let s = Expression::polynomial(&[5.0, 2.0]);
    assert_eq!(find_extremum(&s), Err(KinematicsError::NoExtremum));
}

#[test]
fn total_distance_differs_from_displacement() {
    let s = Expression::polynomial(&[0.0, 19.6, -4.9]);
    let report = total_distance(&s, 0.0, 4.0).unwrap();
    assert_eq!(report.critical_points.len(), 1);
    assert_close(report.critical_points[0], 2.0);
    assert_close(report.total, 39.2);
    assert_close(report.displacement, 0.0);
}

#[test]
fn total_distance_counts_each_segment_once() {
    let s = Expression::polynomial(&[20.0, -12.0, 3.0]);
    let report = total_distance(&s, 0.0, 4.0).unwrap();
    assert_eq!(report.segments.len(), 2);
    assert_close(report.segments[0].distance, 12.0);
    assert_close(report.segments[1].distance, 12.0);
    assert_close(report.total, 24.0);
}

#[test]
fn known_velocity_integrates_with_caller_constant() {
    let v = Expression::polynomial(&[-16.0, 8.0]);
    let eq = from_velocity(&v, 5.0).unwrap();
    assert_eq!(eq.acceleration, 8.0);
    let position = eq.position.as_ref().unwrap();
    assert_eq!(position.to_string(), "4*t^2 - 16*t + 5");
    assert_eq!(differentiate(position), v.simplify());
}

#[test]
fn explanations_round_to_two_decimals() {
    let eq = build_equations(&Scenario::position(0.0, 1.0, 1.0 / 3.0, 1.0)).unwrap();
    let eval = eq.evaluate(1.0).unwrap();
    let text = explain::calculation(&eq, Some(&eval));
    assert!(text.contains("Step 3: evaluate at t = 1.00"), "{text}");
    assert!(text.ends_with("Position: 1.17 m, Velocity: 1.33 m/s"), "{text}");

    let accel = build_equations(&Scenario::acceleration(9.81)).unwrap();
    assert_eq!(
        explain::calculation(&accel, None),
        "Acceleration is constant: a = 9.81 m/s²"
    );
}

#[test]
fn distance_explanation_lists_segments() {
    let s = Expression::polynomial(&[20.0, -12.0, 3.0]);
    let report = total_distance(&s, 0.0, 4.0).unwrap();
    let text = explain::distance(&s, 0.0, 4.0, &report);
    assert!(text.contains("[0, 4]: [2.00]"), "{text}");
    assert!(text.contains("between t=0.00 and t=2.00: 12.00 m"), "{text}");
    assert!(text.ends_with("Total distance travelled: 24.00 m"), "{text}");
}

proptest! {
    #[test]
    fn monotonic_distance_equals_absolute_displacement(
        x0 in -100.0..100.0f64,
        v0 in 0.5..50.0f64,
        a in 0.0..10.0f64,
        hi in 0.1..20.0f64,
    ) {
        // v0 > 0 and a >= 0 keep the velocity positive on [0, hi]
        let s = Expression::polynomial(&[x0, v0, 0.5 * a]);
        let report = total_distance(&s, 0.0, hi).unwrap();
        prop_assert!(report.critical_points.is_empty());
        let tolerance = 1e-9 * report.total.max(1.0);
        prop_assert!((report.total - report.displacement.abs()).abs() < tolerance);
    }

    #[test]
    fn total_distance_never_below_displacement(
        c0 in -50.0..50.0f64,
        c1 in -50.0..50.0f64,
        c2 in -10.0..10.0f64,
        lo in -10.0..0.0f64,
        span in 0.0..20.0f64,
    ) {
        let s = Expression::polynomial(&[c0, c1, c2]);
        let report = total_distance(&s, lo, lo + span).unwrap();
        prop_assert!(report.total >= 0.0);
        prop_assert!(report.total + 1e-9 >= report.displacement.abs());
    }
}
