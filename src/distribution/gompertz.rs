use super::{
    CumulativeDensity, CumulativeHazard, LogCumulativeDensity, LogDensity, LogHazard, Survival,
};
use crate::error::Error;
use crate::scalar::Scalar;
use ndarray::{Array, ArrayBase, Data, Dimension};
use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Gompertz distribution on `y >= 0` with
/// `P(Y <= y) = 1 - exp(-location / shape * (exp(y * shape) - 1))`.
///
/// Other libraries scale these parameters differently; the form above is the
/// one every formula in this crate reproduces exactly.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GompertzDistribution<S> {
    pub location: S,
    pub shape: S,
}

impl<S: Scalar> GompertzDistribution<S> {
    /// Build from unconstrained parameters, `location = exp(log_location)` and
    /// `shape = exp(log_shape)`.
    pub fn from_log_parameters(log_location: S, log_shape: S) -> Self {
        GompertzDistribution {
            location: log_location.exp(),
            shape: log_shape.exp(),
        }
    }

    /// `exp(y * shape) - 1`, shared by every formula.
    #[inline]
    fn growth(&self, y: S) -> S {
        (y * self.shape).exp() - S::one()
    }
}

impl<S> From<GompertzDistribution<S>> for Vec<S> {
    fn from(distribution: GompertzDistribution<S>) -> Self {
        vec![distribution.location, distribution.shape]
    }
}

impl<'a, S> TryFrom<&'a [S]> for GompertzDistribution<S>
where
    S: Copy,
{
    type Error = Error;

    fn try_from(array: &'a [S]) -> Result<Self, Self::Error> {
        if array.len() != 2 {
            return Err(Error::IncompatibleDistributionParameterCount(
                array.len(),
                2,
            ));
        }

        Ok(GompertzDistribution {
            location: array[0],
            shape: array[1],
        })
    }
}

impl<S: Scalar> LogHazard<S, S> for GompertzDistribution<S> {
    fn log_hazard(&self, input: &S) -> S {
        self.location.ln() + *input * self.shape
    }
}

impl<S: Scalar> CumulativeHazard<S, S> for GompertzDistribution<S> {
    fn cumulative_hazard(&self, input: &S) -> S {
        self.location / self.shape * self.growth(*input)
    }
}

impl<S: Scalar> Survival<S, S> for GompertzDistribution<S> {
    fn survival(&self, input: &S) -> S {
        let cumulative_hazard: S = self.cumulative_hazard(input);
        (-cumulative_hazard).exp()
    }
}

impl<S: Scalar> CumulativeDensity<S, S> for GompertzDistribution<S> {
    fn cumulative_density(&self, input: &S) -> S {
        let survival: S = self.survival(input);
        S::one() - survival
    }
}

impl<S: Scalar> LogCumulativeDensity<S, S> for GompertzDistribution<S> {
    fn log_cumulative_density(&self, input: &S) -> S {
        let cumulative_density: S = self.cumulative_density(input);
        cumulative_density.ln()
    }
}

impl<S: Scalar> LogDensity<S, S> for GompertzDistribution<S> {
    fn log_density(&self, input: &S) -> S {
        // log f(y) = log h(y) - H(y)
        let log_hazard: S = self.log_hazard(input);
        let cumulative_hazard: S = self.cumulative_hazard(input);
        log_hazard - cumulative_hazard
    }
}

macro_rules! impl_elementwise {
    ($trait:ident, $method:ident) => {
        impl<T, D, S> $trait<ArrayBase<T, D>, Array<S, D>> for GompertzDistribution<S>
        where
            T: Data<Elem = S>,
            D: Dimension,
            S: Scalar,
        {
            fn $method(&self, input: &ArrayBase<T, D>) -> Array<S, D> {
                input.mapv(|y| $trait::<S, S>::$method(self, &y))
            }
        }
    };
}

impl_elementwise!(LogHazard, log_hazard);
impl_elementwise!(CumulativeHazard, cumulative_hazard);
impl_elementwise!(Survival, survival);
impl_elementwise!(CumulativeDensity, cumulative_density);
impl_elementwise!(LogCumulativeDensity, log_cumulative_density);
impl_elementwise!(LogDensity, log_density);
