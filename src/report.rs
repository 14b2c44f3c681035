//! Derived quantities handed back to the host alongside the objective.
//!
//! Every evaluation returns a [`Report`] with `shape` and `location` on the
//! natural scale. [`standard_errors`] propagates a covariance over the log
//! parameters to those quantities with the delta method.

use crate::distribution::gompertz::GompertzDistribution;
use crate::dual::Dual;
use crate::error::Error;
use crate::objective::Parameters;
use crate::scalar::Scalar;
use ndarray::{arr1, Array1, Array2};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report<S> {
    pub shape: S,
    pub location: S,
}

impl<S: Copy> Report<S> {
    /// Quantities by name, in reporting order.
    pub fn named(&self) -> [(&'static str, S); 2] {
        [("shape", self.shape), ("location", self.location)]
    }
}

impl<'a, S: Scalar> From<&'a GompertzDistribution<S>> for Report<S> {
    fn from(distribution: &'a GompertzDistribution<S>) -> Self {
        Report {
            shape: distribution.shape,
            location: distribution.location,
        }
    }
}

impl<'a, S: Scalar> From<&'a Parameters<S>> for Report<S> {
    fn from(parameters: &'a Parameters<S>) -> Self {
        Report::from(&GompertzDistribution::from(parameters))
    }
}

/// A reported quantity with its delta-method standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportedQuantity {
    pub name: &'static str,
    pub value: f64,
    pub std_error: f64,
}

/// Jacobian of `(shape, location)` with respect to `(log_location, log_shape)`,
/// one row per reported quantity.
fn report_jacobian(parameters: &Parameters<f64>) -> (Report<f64>, Array2<f64>) {
    let seeded = |location_dot: f64, shape_dot: f64| -> Report<Dual> {
        let dual_parameters = Parameters {
            log_location: Dual::new(parameters.log_location, location_dot),
            log_shape: Dual::new(parameters.log_shape, shape_dot),
        };
        Report::from(&dual_parameters)
    };

    let by_location = seeded(1.0, 0.0);
    let by_shape = seeded(0.0, 1.0);

    let estimate = Report {
        shape: by_location.shape.val,
        location: by_location.location.val,
    };

    let mut jacobian = Array2::zeros((2, 2));
    for (row, ((_, d_location), (_, d_shape))) in by_location
        .named()
        .iter()
        .zip(by_shape.named().iter())
        .enumerate()
    {
        jacobian[[row, 0]] = d_location.dot;
        jacobian[[row, 1]] = d_shape.dot;
    }

    (estimate, jacobian)
}

/// Delta-method standard errors of the reported quantities.
///
/// `covariance` is over `(log_location, log_shape)` in that order, typically
/// the inverse Hessian of the objective at the optimum.
pub fn standard_errors(
    parameters: &Parameters<f64>,
    covariance: &Array2<f64>,
) -> Result<Vec<ReportedQuantity>, Error> {
    let (rows, cols) = covariance.dim();
    if rows != 2 || cols != 2 {
        return Err(Error::IncompatibleCovarianceShape(rows, cols));
    }

    let (estimate, jacobian) = report_jacobian(parameters);

    let quantities = estimate
        .named()
        .iter()
        .zip(jacobian.outer_iter())
        .map(|(&(name, value), gradient)| {
            let gradient: Array1<f64> = gradient.to_owned();
            let variance = gradient.dot(&covariance.dot(&gradient));
            ReportedQuantity {
                name,
                value,
                std_error: variance.sqrt(),
            }
        })
        .collect();

    Ok(quantities)
}

impl Report<f64> {
    /// Values as an array in reporting order.
    pub fn to_array(&self) -> Array1<f64> {
        arr1(&[self.shape, self.location])
    }
}
