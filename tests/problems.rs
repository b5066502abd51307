use mruv_calculator::problems::{self, TITLES};
use mruv_calculator::session::SessionError;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn velocity_at_three_seconds() {
    let solution = problems::solve(1).unwrap();
    assert_eq!(solution.title, TITLES[0]);
    assert_close(solution.answer, 10.0);
    assert!(solution.message.contains("s(t) = 5*t^2 - 20*t + 50"));
    assert!(solution.message.contains("v(t) = 10*t - 20"));
    assert!(solution.message.ends_with("Velocity: 10.00 m/s"));
    assert_eq!(solution.plot.series[0].points.len(), 51);
    assert_eq!(solution.plot.highlights[0].label, "s(3.0)");
}

#[test]
fn object_stops_at_two_seconds() {
    let solution = problems::solve(2).unwrap();
    assert_close(solution.answer, 2.0);
    assert!(
        solution
            .message
            .ends_with("The object stops at t = 2.00 s (s = 19.60 m)"),
        "{}",
        solution.message
    );
    assert_eq!(solution.plot.highlights[1].label, "v(2.0)");
    assert_close(solution.plot.highlights[1].value, 0.0);
}

#[test]
fn projectile_reaches_maximum() {
    let solution = problems::solve(3).unwrap();
    assert_close(solution.answer, 10.0 + 900.0 / 19.6);
    assert!(solution.message.contains("locate the maximum"));
    assert!(solution.message.ends_with("Position maximum: 55.92 m"));
}

#[test]
fn position_from_constant_acceleration() {
    let solution = problems::solve(4).unwrap();
    assert_close(solution.answer, 8.0);
    assert!(
        solution
            .message
            .ends_with("Position equation: s(t) = 4*t^2 - 16*t + 5")
    );
    assert!(solution.plot.highlights.is_empty());
}

#[test]
fn distance_counts_each_leg_once() {
    let solution = problems::solve(5).unwrap();
    assert_close(solution.answer, 24.0);
    assert!(solution.message.contains("[0, 4]: [2.00]"));
    assert!(solution.message.ends_with("Total distance travelled: 24.00 m"));
}

#[test]
fn unknown_problems_are_rejected() {
    for number in [0, 6, 255] {
        assert!(matches!(
            problems::solve(number),
            Err(SessionError::UnknownProblem(n)) if n == number
        ));
    }
}
