#[cfg(doctest)]
use doc_comment::doctest;


pub mod distribution;
pub mod dual;
pub mod error;
pub mod objective;
pub mod report;
pub mod sample;
pub mod scalar;

pub use distribution::gompertz::GompertzDistribution;
pub use dual::Dual;
pub use error::Error;
pub use objective::{nll, Evaluation, GompertzObjective, Parameters};
pub use report::{standard_errors, Report, ReportedQuantity};
pub use sample::{IntervalCensored, LogLikelihood, PointwiseLogLikelihood, Weighted};
pub use scalar::Scalar;

#[cfg(doctest)]
doctest!("../README.md");
