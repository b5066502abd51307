//! Differentiation, integration, evaluation and root solving with respect to `t`.

use mruv_core::constants::ROOT_TOLERANCE;
use tracing::debug;

use crate::error::SymbolicError;
use crate::expression::Expression;

/// First derivative with respect to `t`, simplified. Constants map to zero.
pub fn differentiate(expr: &Expression) -> Expression {
    derive(expr).simplify()
}

fn derive(expr: &Expression) -> Expression {
    match expr {
        Expression::Const(_) => Expression::zero(),
        Expression::Time => Expression::constant(1.0),
        Expression::Neg(inner) => -derive(inner),
        Expression::Add(a, b) => derive(a) + derive(b),
        Expression::Sub(a, b) => derive(a) - derive(b),
        // product rule
        Expression::Mul(a, b) => derive(a) * (**b).clone() + (**a).clone() * derive(b),
        // quotient rule
        Expression::Div(a, b) => {
            (derive(a) * (**b).clone() - (**a).clone() * derive(b)) / (**b).clone().powi(2)
        }
        Expression::Pow(_, 0) => Expression::zero(),
        Expression::Pow(base, n) => {
            f64::from(*n) * (**base).clone().powi(n - 1) * derive(base)
        }
    }
}

/// Antiderivative with respect to `t` without a constant of integration.
///
/// Polynomials always integrate; other trees integrate through linearity and
/// constant factors, anything else is reported as unsupported.
pub fn integrate(expr: &Expression) -> Result<Expression, SymbolicError> {
    if let Some(poly) = expr.to_polynomial() {
        return Ok(poly.antiderivative().to_expression());
    }
    let result = match expr {
        Expression::Neg(inner) => -integrate(inner)?,
        Expression::Add(a, b) => integrate(a)? + integrate(b)?,
        Expression::Sub(a, b) => integrate(a)? - integrate(b)?,
        Expression::Mul(a, b) if !a.contains_time() => (**a).clone() * integrate(b)?,
        Expression::Mul(a, b) if !b.contains_time() => integrate(a)? * (**b).clone(),
        Expression::Div(a, b) if !b.contains_time() => integrate(a)? / (**b).clone(),
        other => {
            return Err(SymbolicError::Unsupported(format!(
                "no closed-form antiderivative for `{other}`"
            )));
        }
    };
    Ok(result.simplify())
}

/// Substitute `t` and reduce to a scalar.
pub fn evaluate(expr: &Expression, t: f64) -> Result<f64, SymbolicError> {
    expr.evaluate(t)
}

/// Real roots of `expr(t) = 0` inside the closed interval `[lo, hi]`,
/// ascending and deduplicated.
///
/// The zero expression is rejected with `InvalidExpression` rather than
/// reporting every point of the interval.
pub fn solve_zeros(expr: &Expression, lo: f64, hi: f64) -> Result<Vec<f64>, SymbolicError> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(SymbolicError::InvalidInterval { lo, hi });
    }
    let poly = expr.to_polynomial().ok_or_else(|| {
        SymbolicError::Unsupported(format!("root solving for non-polynomial `{expr}`"))
    })?;

    let mut roots: Vec<f64> = poly
        .real_roots()?
        .into_iter()
        .filter(|r| r.is_finite() && *r >= lo - ROOT_TOLERANCE && *r <= hi + ROOT_TOLERANCE)
        // normalises -0.0 as well
        .map(|r| r.clamp(lo, hi) + 0.0)
        .collect();
    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() <= ROOT_TOLERANCE);

    debug!(expression = %expr, lo, hi, count = roots.len(), "solved zeros");
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_rule_through_powers() {
        // d/dt (2t + 1)^2 = 4(2t + 1) = 8t + 4
        let e = (2.0 * Expression::t() + 1.0).powi(2);
        assert_eq!(differentiate(&e), Expression::polynomial(&[4.0, 8.0]));
    }

    #[test]
    fn quotient_rule_for_reciprocal() {
        // d/dt 1/t = -1/t^2
        let e = Expression::constant(1.0) / Expression::t();
        let d = differentiate(&e);
        assert!((d.evaluate(2.0).unwrap() + 0.25).abs() < 1e-12);
    }

    #[test]
    fn integrate_non_polynomial_with_constant_factor() {
        let e = Expression::constant(3.0) * Expression::t().powi(-2);
        assert!(matches!(integrate(&e), Err(SymbolicError::Unsupported(_))));
    }

    #[test]
    fn double_root_reported_once() {
        // (t - 2)^2
        let e = Expression::polynomial(&[4.0, -4.0, 1.0]);
        assert_eq!(solve_zeros(&e, 0.0, 10.0).unwrap(), vec![2.0]);
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let e = Expression::t();
        assert!(matches!(
            solve_zeros(&e, 1.0, 0.0),
            Err(SymbolicError::InvalidInterval { .. })
        ));
    }
}
