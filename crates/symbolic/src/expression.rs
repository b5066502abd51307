//! Immutable expression trees over the single variable `t`.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use mruv_core::format::compact;

use crate::error::SymbolicError;
use crate::polynomial::Polynomial;

/// Scalar-valued function of time built from constants and `t`.
///
/// Transformations never mutate an expression; they return a new one.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Const(f64),
    Time,
    Neg(Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Sub(Box<Expression>, Box<Expression>),
    Mul(Box<Expression>, Box<Expression>),
    Div(Box<Expression>, Box<Expression>),
    /// Integer power of a sub-expression.
    Pow(Box<Expression>, i32),
}

impl Expression {
    pub fn constant(value: f64) -> Self {
        Expression::Const(value)
    }

    /// The time variable `t`.
    pub fn t() -> Self {
        Expression::Time
    }

    pub fn zero() -> Self {
        Expression::Const(0.0)
    }

    pub fn powi(self, exponent: i32) -> Self {
        Expression::Pow(Box::new(self), exponent)
    }

    /// `c0 + c1*t + c2*t^2 + ...` in canonical form.
    pub fn polynomial(coeffs: &[f64]) -> Self {
        Polynomial::new(coeffs.to_vec()).to_expression()
    }

    /// True when `t` appears anywhere in the tree.
    pub fn contains_time(&self) -> bool {
        match self {
            Expression::Const(_) => false,
            Expression::Time => true,
            Expression::Neg(inner) | Expression::Pow(inner, _) => inner.contains_time(),
            Expression::Add(a, b)
            | Expression::Sub(a, b)
            | Expression::Mul(a, b)
            | Expression::Div(a, b) => a.contains_time() || b.contains_time(),
        }
    }

    /// Fold into a dense polynomial when the tree is polynomial in `t`.
    ///
    /// Division is only accepted by a nonzero constant; negative powers and
    /// division by anything involving `t` yield `None`.
    pub fn to_polynomial(&self) -> Option<Polynomial> {
        match self {
            Expression::Const(c) => Some(Polynomial::constant(*c)),
            Expression::Time => Some(Polynomial::time()),
            Expression::Neg(inner) => Some(inner.to_polynomial()?.scale(-1.0)),
            Expression::Add(a, b) => Some(a.to_polynomial()?.add(&b.to_polynomial()?)),
            Expression::Sub(a, b) => Some(a.to_polynomial()?.sub(&b.to_polynomial()?)),
            Expression::Mul(a, b) => Some(a.to_polynomial()?.mul(&b.to_polynomial()?)),
            Expression::Div(a, b) => {
                let divisor = b.to_polynomial()?.as_constant()?;
                if divisor == 0.0 {
                    return None;
                }
                Some(a.to_polynomial()?.scale(1.0 / divisor))
            }
            Expression::Pow(base, exponent) => {
                let exponent = u32::try_from(*exponent).ok()?;
                Some(base.to_polynomial()?.powi(exponent))
            }
        }
    }

    /// Constant value when the expression does not depend on `t`.
    pub fn as_constant(&self) -> Option<f64> {
        if self.contains_time() {
            return None;
        }
        self.evaluate(0.0).ok()
    }

    /// Canonical form: polynomials are rebuilt from their coefficients,
    /// everything else gets constant folding and identity removal.
    pub fn simplify(&self) -> Expression {
        if let Some(poly) = self.to_polynomial() {
            return poly.to_expression();
        }
        if let Some(value) = self.as_constant() {
            return Expression::Const(value);
        }
        match self {
            Expression::Const(_) | Expression::Time => self.clone(),
            Expression::Neg(inner) => -inner.simplify(),
            Expression::Add(a, b) => match (a.simplify(), b.simplify()) {
                (Expression::Const(z), other) | (other, Expression::Const(z)) if z == 0.0 => other,
                (a, b) => a + b,
            },
            Expression::Sub(a, b) => match (a.simplify(), b.simplify()) {
                (a, Expression::Const(z)) if z == 0.0 => a,
                (a, b) => a - b,
            },
            Expression::Mul(a, b) => match (a.simplify(), b.simplify()) {
                (Expression::Const(z), _) | (_, Expression::Const(z)) if z == 0.0 => {
                    Expression::zero()
                }
                (Expression::Const(one), other) | (other, Expression::Const(one))
                    if one == 1.0 =>
                {
                    other
                }
                (a, b) => a * b,
            },
            Expression::Div(a, b) => match (a.simplify(), b.simplify()) {
                (a, Expression::Const(one)) if one == 1.0 => a,
                (a, b) => a / b,
            },
            Expression::Pow(base, exponent) => match *exponent {
                0 => Expression::Const(1.0),
                1 => base.simplify(),
                n => base.simplify().powi(n),
            },
        }
    }

    /// Substitute `t` and reduce to a finite scalar.
    pub fn evaluate(&self, t: f64) -> Result<f64, SymbolicError> {
        let undefined = || SymbolicError::Evaluation {
            expression: self.to_string(),
            at: t,
        };
        if !t.is_finite() {
            return Err(undefined());
        }
        let value = self.eval_raw(t).ok_or_else(undefined)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(undefined())
        }
    }

    fn eval_raw(&self, t: f64) -> Option<f64> {
        match self {
            Expression::Const(c) => Some(*c),
            Expression::Time => Some(t),
            Expression::Neg(inner) => Some(-inner.eval_raw(t)?),
            Expression::Add(a, b) => Some(a.eval_raw(t)? + b.eval_raw(t)?),
            Expression::Sub(a, b) => Some(a.eval_raw(t)? - b.eval_raw(t)?),
            Expression::Mul(a, b) => Some(a.eval_raw(t)? * b.eval_raw(t)?),
            Expression::Div(a, b) => {
                let denominator = b.eval_raw(t)?;
                if denominator == 0.0 {
                    None
                } else {
                    Some(a.eval_raw(t)? / denominator)
                }
            }
            Expression::Pow(base, exponent) => {
                let base = base.eval_raw(t)?;
                if base == 0.0 && *exponent < 0 {
                    None
                } else {
                    Some(base.powi(*exponent))
                }
            }
        }
    }

    /// Human-readable rendering, the same text as `Display`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    fn is_atomic(&self) -> bool {
        matches!(self, Expression::Const(c) if *c >= 0.0) || matches!(self, Expression::Time)
    }
}

impl Polynomial {
    /// Rebuild the canonical expression tree, highest power first.
    pub fn to_expression(&self) -> Expression {
        let mut terms = self
            .coefficients()
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| **c != 0.0);

        let term = |power: usize, coeff: f64| {
            let factor = match power {
                0 => return Expression::Const(coeff),
                1 => Expression::Time,
                p => Expression::Time.powi(p as i32),
            };
            if coeff == 1.0 {
                factor
            } else {
                Expression::Const(coeff) * factor
            }
        };

        let Some((power, coeff)) = terms.next() else {
            return Expression::zero();
        };
        terms.fold(term(power, *coeff), |acc, (power, coeff)| {
            if *coeff < 0.0 {
                acc - term(power, -coeff)
            } else {
                acc + term(power, *coeff)
            }
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(poly) = self.to_polynomial() {
            return write!(f, "{poly}");
        }
        match self {
            Expression::Const(c) => write!(f, "{}", compact(*c)),
            Expression::Time => write!(f, "t"),
            Expression::Neg(inner) => write!(f, "-({inner})"),
            Expression::Add(a, b) => write!(f, "{a} + {b}"),
            Expression::Sub(a, b) => write!(f, "{a} - ({b})"),
            Expression::Mul(a, b) => write!(f, "({a})*({b})"),
            Expression::Div(a, b) => write!(f, "({a}) / ({b})"),
            Expression::Pow(base, exponent) if base.is_atomic() => write!(f, "{base}^{exponent}"),
            Expression::Pow(base, exponent) => write!(f, "({base})^{exponent}"),
        }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Const(value)
    }
}

impl Add for Expression {
    type Output = Expression;

    fn add(self, rhs: Self) -> Self::Output {
        Expression::Add(Box::new(self), Box::new(rhs))
    }
}

impl Sub for Expression {
    type Output = Expression;

    fn sub(self, rhs: Self) -> Self::Output {
        Expression::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Mul for Expression {
    type Output = Expression;

    fn mul(self, rhs: Self) -> Self::Output {
        Expression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl Div for Expression {
    type Output = Expression;

    fn div(self, rhs: Self) -> Self::Output {
        Expression::Div(Box::new(self), Box::new(rhs))
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Self::Output {
        Expression::Neg(Box::new(self))
    }
}

impl Mul<Expression> for f64 {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Self::Output {
        Expression::Const(self) * rhs
    }
}

impl Mul<f64> for Expression {
    type Output = Expression;

    fn mul(self, rhs: f64) -> Self::Output {
        self * Expression::Const(rhs)
    }
}

impl Add<f64> for Expression {
    type Output = Expression;

    fn add(self, rhs: f64) -> Self::Output {
        self + Expression::Const(rhs)
    }
}

impl Add<Expression> for f64 {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Self::Output {
        Expression::Const(self) + rhs
    }
}
