use mruv_symbolic::{Expression, SymbolicError, differentiate, evaluate, integrate, solve_zeros};
use proptest::prelude::*;

fn position(x0: f64, v0: f64, a: f64) -> Expression {
    let t = Expression::t;
    x0 + v0 * t() + 0.5 * a * t().powi(2)
}

#[test]
fn derivative_of_worked_position() {
    // s(t) = 5t^2 - 20t + 50
    let s = Expression::polynomial(&[50.0, -20.0, 5.0]);
    let v = differentiate(&s);
    assert_eq!(v.to_string(), "10*t - 20");
    assert_eq!(evaluate(&v, 3.0).unwrap(), 10.0);
    assert_eq!(evaluate(&s, 3.0).unwrap(), 35.0);
}

#[test]
fn derivative_of_constant_is_zero() {
    let c = Expression::constant(42.0);
    assert_eq!(differentiate(&c), Expression::zero());
    assert_eq!(differentiate(&c).to_string(), "0");
}

#[test]
fn integration_leaves_constant_to_caller() {
    let v = Expression::polynomial(&[-16.0, 8.0]);
    let s = integrate(&v).unwrap() + 5.0;
    assert_eq!(s.simplify().to_string(), "4*t^2 - 16*t + 5");
    assert_eq!(evaluate(&s, 0.0).unwrap(), 5.0);
}

#[test]
fn evaluation_fails_on_zero_denominator() {
    let e = Expression::constant(1.0) / (Expression::t() - 2.0 * Expression::constant(1.0));
    let err = evaluate(&e, 2.0).unwrap_err();
    assert!(matches!(err, SymbolicError::Evaluation { at, .. } if at == 2.0));
    assert_eq!(evaluate(&e, 3.0).unwrap(), 1.0);
}

#[test]
fn zeros_of_nonzero_constant_are_empty() {
    let c = Expression::constant(-3.5);
    assert!(solve_zeros(&c, -100.0, 100.0).unwrap().is_empty());
}

#[test]
fn zeros_of_zero_expression_are_rejected() {
    let zero = Expression::t() - Expression::t();
    assert!(matches!(
        solve_zeros(&zero, 0.0, 1.0),
        Err(SymbolicError::InvalidExpression(_))
    ));
}

#[test]
fn zeros_are_filtered_sorted_and_inclusive() {
    // (t - 1)(t - 4) = t^2 - 5t + 4
    let e = Expression::polynomial(&[4.0, -5.0, 1.0]);
    assert_eq!(solve_zeros(&e, 0.0, 10.0).unwrap(), vec![1.0, 4.0]);
    assert_eq!(solve_zeros(&e, 1.0, 4.0).unwrap(), vec![1.0, 4.0]);
    assert_eq!(solve_zeros(&e, 2.0, 3.0).unwrap(), Vec::<f64>::new());
    assert_eq!(solve_zeros(&e, 2.0, 10.0).unwrap(), vec![4.0]);
}

#[test]
fn cubic_root_solving_is_unsupported() {
    let e = Expression::t().powi(3);
    assert!(matches!(
        solve_zeros(&e, -1.0, 1.0),
        Err(SymbolicError::Unsupported(_))
    ));
}

#[test]
fn display_of_projectile() {
    let s = position(10.0, 30.0, -9.8);
    assert_eq!(s.to_display_string(), "-4.9*t^2 + 30*t + 10");
}

proptest! {
    #[test]
    fn derivative_of_position_is_velocity(
        x0 in -1.0e3..1.0e3f64,
        v0 in -1.0e3..1.0e3f64,
        a in -1.0e2..1.0e2f64,
    ) {
        prop_assume!(a != 0.0);
        let v = differentiate(&position(x0, v0, a));
        let expected = (v0 + a * Expression::t()).simplify();
        prop_assert_eq!(&v, &expected);
        prop_assert_eq!(differentiate(&v), Expression::constant(a));
    }

    #[test]
    fn linear_roots_vanish(c0 in -50.0..50.0f64, c1 in 0.5..20.0f64) {
        let e = Expression::polynomial(&[c0, c1]);
        let roots = solve_zeros(&e, -1.0e3, 1.0e3).unwrap();
        prop_assert_eq!(roots.len(), 1);
        prop_assert!(evaluate(&e, roots[0]).unwrap().abs() < 1e-9);
    }
}
