//! The numeric interface the likelihood is written against.
//!
//! Plain floats and [`Dual`](crate::dual::Dual) numbers both implement
//! [`Scalar`], so the same code evaluates the objective and propagates
//! derivatives through it.

use num_traits::{Float, NumCast, One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub trait Scalar:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + PartialOrd
    + Zero
    + One
{
    /// Lift a constant. Derivative-carrying types get a zero tangent.
    fn from_f64(v: f64) -> Self;

    /// The primal value.
    fn value(&self) -> f64;

    fn ln(self) -> Self;

    fn exp(self) -> Self;

    /// `false` for NaN and both infinities.
    fn is_finite(self) -> bool;
}

impl<F> Scalar for F
where
    F: Float + Debug,
{
    #[inline]
    fn from_f64(v: f64) -> Self {
        <F as NumCast>::from(v).unwrap_or_else(F::nan)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    #[inline]
    fn ln(self) -> Self {
        Float::ln(self)
    }

    #[inline]
    fn exp(self) -> Self {
        Float::exp(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        Float::is_finite(self)
    }
}
