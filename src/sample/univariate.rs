use super::{IntervalCensored, LogLikelihood, PointwiseLogLikelihood, Weighted};
use crate::distribution::{CumulativeDensity, LogDensity};
use crate::scalar::Scalar;
use log::trace;
use ndarray::{Array1, Data, Ix1, Zip};

/// Log likelihood of a single observation bounded by `[left, right]`.
///
/// Exact values (`left == right`) use the log density. Censored values
/// (`left < right`) use the log of the probability mass between the bounds,
/// where a zero `left` has mass 0 below it and a non-finite `right` has mass 1
/// below it. Anything else, such as `left > right` or a NaN bound, falls in
/// neither case and yields `None`.
///
/// A censored interval whose mass rounds to zero or below gives a non-finite
/// log likelihood, which is returned as is.
pub fn observation_log_likelihood<D, S>(distribution: &D, left: S, right: S) -> Option<S>
where
    D: LogDensity<S, S> + CumulativeDensity<S, S>,
    S: Scalar,
{
    if left == right {
        return Some(distribution.log_density(&left));
    }

    if left < right {
        let p_left = if left > S::zero() {
            distribution.cumulative_density(&left)
        } else {
            S::zero()
        };
        let p_right = if right.is_finite() {
            distribution.cumulative_density(&right)
        } else {
            S::one()
        };

        let mass = p_right - p_left;
        if !(mass > S::zero()) {
            trace!(
                "non-positive probability mass {:?} between {:?} and {:?}",
                mass,
                left,
                right
            );
        }

        return Some(mass.ln());
    }

    None
}

impl<D, S, T> PointwiseLogLikelihood<D, S> for IntervalCensored<T, Ix1>
where
    D: LogDensity<S, S> + CumulativeDensity<S, S>,
    S: Scalar,
    T: Data<Elem = S>,
{
    /// Zero where no case applies.
    ///
    /// Panics if `left` and `right` differ in length.
    fn pointwise_log_likelihood(&self, distribution: &D) -> Array1<S> {
        Zip::from(&self.left)
            .and(&self.right)
            .map_collect(|&left, &right| {
                observation_log_likelihood(distribution, left, right).unwrap_or_else(S::zero)
            })
    }
}

impl<D, S, T> LogLikelihood<D, S> for IntervalCensored<T, Ix1>
where
    D: LogDensity<S, S> + CumulativeDensity<S, S>,
    S: Scalar,
    T: Data<Elem = S>,
{
    fn log_likelihood(&self, distribution: &D) -> S {
        Zip::from(&self.left)
            .and(&self.right)
            .fold(S::zero(), |total, &left, &right| {
                match observation_log_likelihood(distribution, left, right) {
                    Some(log_likelihood) => total + log_likelihood,
                    None => total,
                }
            })
    }
}

impl<D, S, T, W> PointwiseLogLikelihood<D, S> for Weighted<IntervalCensored<T, Ix1>, W, Ix1>
where
    D: LogDensity<S, S> + CumulativeDensity<S, S>,
    S: Scalar,
    T: Data<Elem = S>,
    W: Data<Elem = S>,
{
    /// Zero where no case applies.
    ///
    /// Panics if the bounds and weights differ in length.
    fn pointwise_log_likelihood(&self, distribution: &D) -> Array1<S> {
        let Weighted { time, weight } = self;

        Zip::from(&time.left)
            .and(&time.right)
            .and(weight)
            .map_collect(|&left, &right, &weight| {
                match observation_log_likelihood(distribution, left, right) {
                    Some(log_likelihood) => weight * log_likelihood,
                    None => S::zero(),
                }
            })
    }
}

impl<D, S, T, W> LogLikelihood<D, S> for Weighted<IntervalCensored<T, Ix1>, W, Ix1>
where
    D: LogDensity<S, S> + CumulativeDensity<S, S>,
    S: Scalar,
    T: Data<Elem = S>,
    W: Data<Elem = S>,
{
    /// Weighted log likelihood, accumulated in observation order.
    fn log_likelihood(&self, distribution: &D) -> S {
        let Weighted { time, weight } = self;

        Zip::from(&time.left)
            .and(&time.right)
            .and(weight)
            .fold(S::zero(), |total, &left, &right, &weight| {
                match observation_log_likelihood(distribution, left, right) {
                    Some(log_likelihood) => total + weight * log_likelihood,
                    None => total,
                }
            })
    }
}
