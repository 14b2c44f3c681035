//! Forward-mode automatic differentiation via dual numbers.
//!
//! A dual number `Dual { val, dot }` carries a value and its derivative with
//! respect to one seeded variable. A gradient over `n` parameters takes `n`
//! evaluations, seeding one parameter per pass.

use crate::scalar::Scalar;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A dual number for forward-mode AD.
///
/// Equality and ordering look at `val` only, so branching on data behaves the
/// same as it does for plain floats.
#[derive(Debug, Clone, Copy)]
pub struct Dual {
    /// Primal value.
    pub val: f64,
    /// Tangent.
    pub dot: f64,
}

impl Dual {
    #[inline]
    pub fn constant(val: f64) -> Self {
        Self { val, dot: 0.0 }
    }

    /// An independent variable (tangent 1).
    #[inline]
    pub fn var(val: f64) -> Self {
        Self { val, dot: 1.0 }
    }

    #[inline]
    pub fn new(val: f64, dot: f64) -> Self {
        Self { val, dot }
    }

    /// d/dx ln(x) = 1/x
    #[inline]
    pub fn ln(self) -> Self {
        Self {
            val: self.val.ln(),
            dot: self.dot / self.val,
        }
    }

    /// d/dx exp(x) = exp(x)
    #[inline]
    pub fn exp(self) -> Self {
        let e = self.val.exp();
        Self {
            val: e,
            dot: self.dot * e,
        }
    }
}

impl PartialEq for Dual {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl PartialOrd for Dual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.val.partial_cmp(&other.val)
    }
}

impl Add for Dual {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            val: self.val + rhs.val,
            dot: self.dot + rhs.dot,
        }
    }
}

impl Sub for Dual {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            val: self.val - rhs.val,
            dot: self.dot - rhs.dot,
        }
    }
}

impl Mul for Dual {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            val: self.val * rhs.val,
            dot: self.dot * rhs.val + self.val * rhs.dot,
        }
    }
}

impl Div for Dual {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self {
            val: self.val / rhs.val,
            dot: (self.dot * rhs.val - self.val * rhs.dot) / (rhs.val * rhs.val),
        }
    }
}

impl Neg for Dual {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            val: -self.val,
            dot: -self.dot,
        }
    }
}

impl Add<f64> for Dual {
    type Output = Self;
    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self {
            val: self.val + rhs,
            dot: self.dot,
        }
    }
}

impl Sub<f64> for Dual {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: f64) -> Self {
        Self {
            val: self.val - rhs,
            dot: self.dot,
        }
    }
}

impl Mul<f64> for Dual {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            val: self.val * rhs,
            dot: self.dot * rhs,
        }
    }
}

impl Div<f64> for Dual {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self {
            val: self.val / rhs,
            dot: self.dot / rhs,
        }
    }
}

impl Mul<Dual> for f64 {
    type Output = Dual;
    #[inline]
    fn mul(self, rhs: Dual) -> Dual {
        Dual {
            val: self * rhs.val,
            dot: self * rhs.dot,
        }
    }
}

impl Sub<Dual> for f64 {
    type Output = Dual;
    #[inline]
    fn sub(self, rhs: Dual) -> Dual {
        Dual {
            val: self - rhs.val,
            dot: -rhs.dot,
        }
    }
}

impl Sum for Dual {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dual::constant(0.0), |acc, x| acc + x)
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Dual::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.val == 0.0 && self.dot == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Dual::constant(1.0)
    }
}

impl Scalar for Dual {
    #[inline]
    fn from_f64(v: f64) -> Self {
        Dual::constant(v)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.val
    }

    #[inline]
    fn ln(self) -> Self {
        Dual::ln(self)
    }

    #[inline]
    fn exp(self) -> Self {
        Dual::exp(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.val.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn finite_diff<F: Fn(f64) -> f64>(f: F, x: f64, h: f64) -> f64 {
        (f(x + h) - f(x - h)) / (2.0 * h)
    }

    #[test]
    fn quotient_rule() {
        // d/dx x / (1 + x) = 1 / (1 + x)^2
        let x = Dual::var(2.0);
        let y = x / (x + 1.0);
        assert_relative_eq!(y.val, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(y.dot, 1.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn chain_rule_exp_of_exp() {
        // d/dx exp(exp(x)) = exp(exp(x)) * exp(x)
        let x = Dual::var(0.3);
        let y = x.exp().exp();
        let expected = 0.3f64.exp().exp() * 0.3f64.exp();
        assert_relative_eq!(y.dot, expected, epsilon = 1e-12);
    }

    #[test]
    fn constants_have_no_tangent() {
        let c = Dual::constant(4.0);
        let y = c.ln() * c.exp();
        assert_eq!(y.dot, 0.0);
    }

    #[test]
    fn comparisons_ignore_tangent() {
        assert_eq!(Dual::new(1.0, 0.0), Dual::new(1.0, 5.0));
        assert!(Dual::new(1.0, 9.0) < Dual::new(2.0, -9.0));
        assert!(Dual::new(f64::NAN, 0.0) != Dual::new(f64::NAN, 0.0));
    }

    #[test]
    fn finiteness_follows_value() {
        assert!(Scalar::is_finite(Dual::var(3.0)));
        assert!(!Scalar::is_finite(Dual::constant(f64::INFINITY)));
        assert!(!Scalar::is_finite(Dual::new(f64::NAN, 1.0)));
    }

    #[test]
    fn sum_iterator() {
        let x = Dual::var(1.0);
        let y: Dual = vec![x, x * 2.0, 3.0 * x].into_iter().sum();
        assert_relative_eq!(y.val, 6.0, epsilon = 1e-12);
        assert_relative_eq!(y.dot, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn complex_expression_vs_finite_diff() {
        // f(x) = ln(1 - exp(-(exp(x) - 1)))
        let f_scalar = |x: f64| (1.0 - (-(x.exp() - 1.0)).exp()).ln();
        let f_dual = |x: Dual| (1.0 - (-(x.exp() - 1.0)).exp()).ln();

        let x = 0.7;
        let result = f_dual(Dual::var(x));
        assert_relative_eq!(result.val, f_scalar(x), epsilon = 1e-12);
        assert_relative_eq!(result.dot, finite_diff(f_scalar, x, 1e-6), epsilon = 1e-6);
    }
}
