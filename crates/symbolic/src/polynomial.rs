//! Dense polynomials in `t` with ascending coefficients.
//!
//! Every expression built from constants, `t`, sums, products, non-negative
//! integer powers and division by constants folds into this form, which is
//! what the calculus and root-solving operations work on.

use std::fmt;

use mruv_core::constants::ROOT_TOLERANCE;
use mruv_core::format::compact;

use crate::error::SymbolicError;

/// Coefficients below this fraction of the largest one are treated as zero when solving.
const LEADING_EPSILON: f64 = 1.0e-12;

/// `c0 + c1*t + c2*t^2 + ...`, trailing zero coefficients removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Self {
        let mut poly = Self { coeffs };
        poly.trim();
        poly
    }

    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// The identity polynomial `t`.
    pub fn time() -> Self {
        Self::new(vec![0.0, 1.0])
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Coefficient of `t^power`, zero beyond the degree.
    pub fn coefficient(&self, power: usize) -> f64 {
        self.coeffs.get(power).copied().unwrap_or(0.0)
    }

    /// Degree of the polynomial; the zero polynomial reports `None`.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Constant value when the degree is at most zero.
    pub fn as_constant(&self) -> Option<f64> {
        match self.coeffs.len() {
            0 => Some(0.0),
            1 => Some(self.coeffs[0]),
            _ => None,
        }
    }

    fn trim(&mut self) {
        while matches!(self.coeffs.last(), Some(c) if *c == 0.0) {
            self.coeffs.pop();
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| self.coefficient(i) + other.coefficient(i))
            .collect();
        Self::new(coeffs)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.scale(-1.0))
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * factor).collect())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![0.0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Self::new(coeffs)
    }

    pub fn powi(&self, exponent: u32) -> Self {
        (0..exponent).fold(Self::constant(1.0), |acc, _| acc.mul(self))
    }

    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, c)| c * power as f64)
            .collect();
        Self::new(coeffs)
    }

    /// Antiderivative with a zero constant term.
    pub fn antiderivative(&self) -> Self {
        let mut coeffs = Vec::with_capacity(self.coeffs.len() + 1);
        coeffs.push(0.0);
        coeffs.extend(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(power, c)| c / (power as f64 + 1.0)),
        );
        Self::new(coeffs)
    }

    /// Horner evaluation.
    pub fn eval(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    /// All real roots, unsorted and unfiltered.
    ///
    /// The zero polynomial vanishes everywhere and is rejected; degrees above
    /// two are not supported.
    pub fn real_roots(&self) -> Result<Vec<f64>, SymbolicError> {
        let scale = self.coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
        let significant: Vec<f64> = self
            .coeffs
            .iter()
            .map(|c| if c.abs() <= LEADING_EPSILON * scale { 0.0 } else { *c })
            .collect();
        let reduced = Self::new(significant);

        match reduced.degree() {
            None => Err(SymbolicError::InvalidExpression(
                "the zero expression vanishes at every point".to_string(),
            )),
            Some(0) => Ok(Vec::new()),
            Some(1) => Ok(vec![-reduced.coeffs[0] / reduced.coeffs[1]]),
            Some(2) => Ok(quadratic_roots(
                reduced.coeffs[2],
                reduced.coeffs[1],
                reduced.coeffs[0],
            )),
            Some(degree) => Err(SymbolicError::Unsupported(format!(
                "root solving for degree {degree} polynomials"
            ))),
        }
    }
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let disc = b * b - 4.0 * a * c;
    let scale = (b * b).max((4.0 * a * c).abs()).max(f64::MIN_POSITIVE);
    if disc.abs() <= ROOT_TOLERANCE * scale {
        return vec![-b / (2.0 * a)];
    }
    if disc < 0.0 {
        return Vec::new();
    }
    // cancellation-free form
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    vec![q / a, c / q]
}

impl fmt::Display for Polynomial {
    /// Highest power first: `5*t^2 - 20*t + 50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (power, &coeff) in self.coeffs.iter().enumerate().rev() {
            if coeff == 0.0 {
                continue;
            }
            let magnitude = coeff.abs();
            if first {
                if coeff < 0.0 {
                    write!(f, "-")?;
                }
            } else if coeff < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            first = false;

            let factor = match power {
                0 => String::new(),
                1 => "t".to_string(),
                p => format!("t^{p}"),
            };
            if power == 0 {
                write!(f, "{}", compact(magnitude))?;
            } else if magnitude == 1.0 {
                write!(f, "{factor}")?;
            } else {
                write!(f, "{}*{factor}", compact(magnitude))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_zeros() {
        let p = Polynomial::new(vec![1.0, 0.0, 0.0]);
        assert_eq!(p.degree(), Some(0));
        assert!(Polynomial::new(vec![0.0]).is_zero());
    }

    #[test]
    fn derivative_and_antiderivative() {
        let s = Polynomial::new(vec![50.0, -20.0, 5.0]);
        assert_eq!(s.derivative(), Polynomial::new(vec![-20.0, 10.0]));
        let v = Polynomial::new(vec![-16.0, 8.0]);
        assert_eq!(v.antiderivative(), Polynomial::new(vec![0.0, -16.0, 4.0]));
    }

    #[test]
    fn quadratic_roots_are_accurate() {
        // t^2 - 3t + 2 = (t - 1)(t - 2)
        let mut roots = Polynomial::new(vec![2.0, -3.0, 1.0]).real_roots().unwrap();
        roots.sort_by(f64::total_cmp);
        assert!((roots[0] - 1.0).abs() < 1e-12);
        assert!((roots[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn pure_square_roots() {
        let mut roots = Polynomial::new(vec![-4.0, 0.0, 1.0]).real_roots().unwrap();
        roots.sort_by(f64::total_cmp);
        assert_eq!(roots, vec![-2.0, 2.0]);
    }

    #[test]
    fn complex_roots_are_dropped() {
        let roots = Polynomial::new(vec![1.0, 0.0, 1.0]).real_roots().unwrap();
        assert!(roots.is_empty());
    }

    #[test]
    fn zero_polynomial_is_rejected() {
        assert!(matches!(
            Polynomial::zero().real_roots(),
            Err(SymbolicError::InvalidExpression(_))
        ));
    }

    #[test]
    fn display_orders_by_power() {
        let p = Polynomial::new(vec![50.0, -20.0, 5.0]);
        assert_eq!(p.to_string(), "5*t^2 - 20*t + 50");
        let q = Polynomial::new(vec![0.0, 19.6, -4.9]);
        assert_eq!(q.to_string(), "-4.9*t^2 + 19.6*t");
        assert_eq!(Polynomial::new(vec![-1.0, 1.0]).to_string(), "t - 1");
    }
}
