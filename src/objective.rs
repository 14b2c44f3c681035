//! The negative log-likelihood callback a host optimizer drives.
//!
//! Parameters live in log space, `[log_location, log_shape]`, and every
//! evaluation is a pure function of the data and those two values. Numerical
//! trouble such as an interval with no probability mass shows up as a
//! non-finite `nll`, never as an error.

use crate::distribution::gompertz::GompertzDistribution;
use crate::dual::Dual;
use crate::error::Error;
use crate::report::Report;
use crate::sample::{IntervalCensored, LogLikelihood, PointwiseLogLikelihood, Weighted};
use crate::scalar::Scalar;
use log::debug;
use ndarray::{Array1, ArrayBase, Data, Ix1, OwnedRepr};
use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Free parameters, in the order the host passes them.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters<S> {
    pub log_location: S,
    pub log_shape: S,
}

impl<S> From<Parameters<S>> for Vec<S> {
    fn from(parameters: Parameters<S>) -> Self {
        vec![parameters.log_location, parameters.log_shape]
    }
}

impl<'a, S> TryFrom<&'a [S]> for Parameters<S>
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

        Ok(Parameters {
            log_location: array[0],
            log_shape: array[1],
        })
    }
}

impl<'a, S: Scalar> From<&'a Parameters<S>> for GompertzDistribution<S> {
    fn from(parameters: &'a Parameters<S>) -> Self {
        GompertzDistribution::from_log_parameters(parameters.log_location, parameters.log_shape)
    }
}

/// Result of one objective evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation<S> {
    pub nll: S,
    pub report: Report<S>,
}

fn evaluate_weighted<S, T, W>(
    data: &Weighted<IntervalCensored<T, Ix1>, W, Ix1>,
    log_location: S,
    log_shape: S,
) -> Evaluation<S>
where
    S: Scalar,
    T: Data<Elem = S>,
    W: Data<Elem = S>,
{
    let distribution = GompertzDistribution::from_log_parameters(log_location, log_shape);
    let log_likelihood: S = data.log_likelihood(&distribution);

    Evaluation {
        nll: -log_likelihood,
        report: Report::from(&distribution),
    }
}

/// Negative log-likelihood of a weighted, interval-censored Gompertz sample.
///
/// `left[i] == right[i]` is an exact observation, `left[i] < right[i]` an
/// interval, with `right[i] = inf` for no upper limit. Inputs are not
/// validated.
///
/// # Panics
///
/// If `left`, `right` and `weight` are not the same length.
pub fn nll<S, T, W>(
    left: &ArrayBase<T, Ix1>,
    right: &ArrayBase<T, Ix1>,
    weight: &ArrayBase<W, Ix1>,
    log_location: S,
    log_shape: S,
) -> Evaluation<S>
where
    S: Scalar,
    T: Data<Elem = S>,
    W: Data<Elem = S>,
{
    let data = Weighted {
        time: IntervalCensored {
            left: left.view(),
            right: right.view(),
        },
        weight: weight.view(),
    };

    evaluate_weighted(&data, log_location, log_shape)
}

/// A sample bound to the objective, ready for repeated evaluation.
pub struct GompertzObjective<S> {
    data: Weighted<IntervalCensored<OwnedRepr<S>, Ix1>, OwnedRepr<S>, Ix1>,
}

impl<S: Scalar> GompertzObjective<S> {
    pub fn new(left: Array1<S>, right: Array1<S>, weight: Array1<S>) -> Result<Self, Error> {
        let time = IntervalCensored::new(left, right)?;
        let data = Weighted::new(time, weight)?;
        Ok(GompertzObjective { data })
    }

    pub fn len(&self) -> usize {
        self.data.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.time.is_empty()
    }

    pub fn left(&self) -> &Array1<S> {
        &self.data.time.left
    }

    pub fn right(&self) -> &Array1<S> {
        &self.data.time.right
    }

    pub fn weight(&self) -> &Array1<S> {
        &self.data.weight
    }

    pub fn evaluate(&self, parameters: &Parameters<S>) -> Evaluation<S> {
        let evaluation =
            evaluate_weighted(&self.data, parameters.log_location, parameters.log_shape);
        debug!(
            "nll {:?} at log_location {:?}, log_shape {:?}",
            evaluation.nll, parameters.log_location, parameters.log_shape
        );
        evaluation
    }

    /// Evaluate at a flat `[log_location, log_shape]` vector.
    pub fn evaluate_slice(&self, parameters: &[S]) -> Result<Evaluation<S>, Error> {
        let parameters = Parameters::try_from(parameters)?;
        Ok(self.evaluate(&parameters))
    }

    /// Per-observation negative log-likelihood contributions. They sum to
    /// the evaluated `nll`.
    pub fn contributions(&self, parameters: &Parameters<S>) -> Array1<S> {
        let distribution = GompertzDistribution::from(parameters);
        self.data
            .pointwise_log_likelihood(&distribution)
            .mapv_into(|x| -x)
    }
}

impl GompertzObjective<f64> {
    /// Objective value and its gradient with respect to
    /// `[log_location, log_shape]`, by forward-mode differentiation.
    pub fn gradient(&self, parameters: &Parameters<f64>) -> (Evaluation<f64>, [f64; 2]) {
        let data = Weighted {
            time: IntervalCensored {
                left: self.data.time.left.mapv(Dual::constant),
                right: self.data.time.right.mapv(Dual::constant),
            },
            weight: self.data.weight.mapv(Dual::constant),
        };

        let by_location = evaluate_weighted(
            &data,
            Dual::var(parameters.log_location),
            Dual::constant(parameters.log_shape),
        );
        let by_shape = evaluate_weighted(
            &data,
            Dual::constant(parameters.log_location),
            Dual::var(parameters.log_shape),
        );

        let evaluation = Evaluation {
            nll: by_location.nll.val,
            report: Report {
                shape: by_location.report.shape.val,
                location: by_location.report.location.val,
            },
        };
        debug!(
            "nll {:?} with gradient [{:?}, {:?}]",
            evaluation.nll, by_location.nll.dot, by_shape.nll.dot
        );

        (evaluation, [by_location.nll.dot, by_shape.nll.dot])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::CumulativeDensity;
    use crate::sample::univariate::observation_log_likelihood;
    use approx::assert_relative_eq;
    use ndarray::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn objective() -> GompertzObjective<f64> {
        GompertzObjective::new(
            array![1., 0., 0.5, 2., 0.2],
            array![1., 3., 2., f64::INFINITY, 0.2],
            array![1., 2., 1., 0.5, 3.],
        )
        .unwrap()
    }

    #[test]
    fn exact_observation() {
        init_logging();

        let evaluation = nll(
            &array![1.],
            &array![1.],
            &array![1.],
            2.0f64.ln(),
            0.5f64.ln(),
        );
        let log_density = 2.0f64.ln() + 0.5 - 4. * (0.5f64.exp() - 1.);

        assert!((evaluation.nll + log_density).abs() < TOLERANCE);
        assert!((evaluation.nll - 1.4017379022405674).abs() < TOLERANCE);
    }

    #[test]
    fn left_censored_at_zero() {
        let (location, shape) = (2.0f64, 0.5f64);
        let evaluation = nll(
            &array![0.],
            &array![3.],
            &array![1.5],
            location.ln(),
            shape.ln(),
        );

        let p_right = 1. - (-(location / shape) * ((3. * shape).exp() - 1.)).exp();
        assert!((evaluation.nll + 1.5 * p_right.ln()).abs() < TOLERANCE);
    }

    #[test]
    fn infinite_right_bound_routes_to_unit_mass() {
        // location underflows to zero, so a CDF taken at infinity is 0 * inf
        let distribution = GompertzDistribution::from_log_parameters(-800.0f64, 0.0);
        let at_infinity: f64 = distribution.cumulative_density(&f64::INFINITY);
        assert!(at_infinity.is_nan());

        let evaluation = nll(
            &array![0., 1.],
            &array![f64::INFINITY, f64::INFINITY],
            &array![1., 1.],
            -800.0f64,
            0.0f64,
        );

        assert_eq!(evaluation.nll, 0.);
    }

    #[test]
    fn matches_observation_by_observation_sum() {
        let objective = objective();
        let parameters = Parameters {
            log_location: -0.4f64,
            log_shape: 0.2,
        };
        let distribution = GompertzDistribution::from(&parameters);

        let mut manual = 0.;
        for i in 0..objective.len() {
            let single = nll(
                &objective.left().slice(s![i..i + 1]),
                &objective.right().slice(s![i..i + 1]),
                &objective.weight().slice(s![i..i + 1]),
                parameters.log_location,
                parameters.log_shape,
            );
            let direct = -objective.weight()[i]
                * observation_log_likelihood(&distribution, objective.left()[i], objective.right()[i])
                    .unwrap();
            assert!((single.nll - direct).abs() < TOLERANCE);
            manual += single.nll;
        }

        let evaluation = objective.evaluate(&parameters);
        assert!((evaluation.nll - manual).abs() < TOLERANCE);
        assert!((objective.contributions(&parameters).sum() - manual).abs() < TOLERANCE);
    }

    #[test]
    fn doubling_weight_doubles_contribution() {
        let parameters = Parameters {
            log_location: 0.1,
            log_shape: -0.3,
        };
        let base = objective().contributions(&parameters);

        let mut weight = objective().weight().clone();
        weight[1] *= 2.;
        let doubled = GompertzObjective::new(
            objective().left().clone(),
            objective().right().clone(),
            weight,
        )
        .unwrap()
        .contributions(&parameters);

        assert_eq!(doubled[1], 2. * base[1]);
        assert_eq!(doubled[0], base[0]);
    }

    #[test]
    fn degenerate_interval_is_non_finite() {
        let evaluation = nll(
            &array![0.5, 40.],
            &array![0.5, 40. + 1e-12],
            &array![1., 1.],
            0.0f64,
            0.0f64,
        );

        assert!(!evaluation.nll.is_finite());
        assert!(evaluation.nll.is_nan() || evaluation.nll == f64::INFINITY);
    }

    #[test]
    fn report_carries_natural_parameters() {
        let evaluation = objective().evaluate(&Parameters {
            log_location: 2.0f64.ln(),
            log_shape: 0.5f64.ln(),
        });

        assert_relative_eq!(evaluation.report.location, 2., epsilon = 1e-12);
        assert_relative_eq!(evaluation.report.shape, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn f32_matches_f64() {
        let evaluation = nll(
            &array![1.0f32, 0.],
            &array![1.0f32, 3.],
            &array![1.0f32, 1.],
            0.2f32,
            -0.5f32,
        );
        let reference = nll(
            &array![1.0f64, 0.],
            &array![1.0f64, 3.],
            &array![1.0f64, 1.],
            0.2f64,
            -0.5f64,
        );

        assert!((f64::from(evaluation.nll) - reference.nll).abs() < 1e-4);
    }

    #[test]
    fn gradient_matches_finite_differences() {
        init_logging();

        let objective = objective();
        let parameters = Parameters {
            log_location: -0.4,
            log_shape: 0.2,
        };
        let (evaluation, gradient) = objective.gradient(&parameters);
        assert_eq!(evaluation, objective.evaluate(&parameters));

        let h = 1e-6;
        let at = |log_location: f64, log_shape: f64| {
            objective
                .evaluate(&Parameters {
                    log_location,
                    log_shape,
                })
                .nll
        };
        let d_location = (at(-0.4 + h, 0.2) - at(-0.4 - h, 0.2)) / (2. * h);
        let d_shape = (at(-0.4, 0.2 + h) - at(-0.4, 0.2 - h)) / (2. * h);

        assert_relative_eq!(gradient[0], d_location, epsilon = 1e-5);
        assert_relative_eq!(gradient[1], d_shape, epsilon = 1e-5);
    }

    #[test]
    fn evaluate_slice_checks_parameter_count() {
        let objective = objective();

        let evaluation = objective.evaluate_slice(&[-0.4, 0.2]).unwrap();
        assert_eq!(
            evaluation,
            objective.evaluate(&Parameters {
                log_location: -0.4,
                log_shape: 0.2
            })
        );

        let err = objective.evaluate_slice(&[0.1]).unwrap_err();
        assert_eq!(err, Error::IncompatibleDistributionParameterCount(1, 2));
    }

    #[test]
    fn new_rejects_mismatched_lengths() {
        let err = GompertzObjective::new(array![1., 2.], array![1., 2.], array![1.])
            .err()
            .unwrap();
        assert_eq!(
            err,
            Error::MismatchedLengths {
                field: "weight",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn parameters_deserialize_from_json() {
        let parameters: Parameters<f64> =
            serde_json::from_str(r#"{"log_location": -0.4, "log_shape": 0.2}"#).unwrap();
        assert_eq!(Vec::from(parameters), vec![-0.4, 0.2]);
    }
}
