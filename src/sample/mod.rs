use crate::error::Error;
use ndarray::{Array1, ArrayBase, Data, Ix1, OwnedRepr, RawData};

pub mod univariate;

/// The log likelihood of a data based on a distribution.
pub trait LogLikelihood<Distribution, F> {
    fn log_likelihood(&self, distribution: &Distribution) -> F;
}

/// The log likelihood of each observation, in sample order.
pub trait PointwiseLogLikelihood<Distribution, F> {
    fn pointwise_log_likelihood(&self, distribution: &Distribution) -> Array1<F>;
}

/// Observations known to lie in `[left, right]`.
///
/// `left == right` is an exact value, `left < right` is interval censored.
/// A `left` of zero has no lower limit and a `right` of positive infinity has
/// no upper limit. Values are taken as given; only the lengths are checked.
pub struct IntervalCensored<T: RawData, D> {
    pub left: ArrayBase<T, D>,
    pub right: ArrayBase<T, D>,
}

/// A wrapper around data to apply weights to log likelihoods.
///
/// Each observation's log likelihood is multiplied by its weight. The weights
/// are not normalised, so a weight of 1 everywhere is the ordinary likelihood.
pub struct Weighted<T, W: RawData, D> {
    pub time: T,
    pub weight: ArrayBase<W, D>,
}

impl<T, F> IntervalCensored<T, Ix1>
where
    T: Data<Elem = F>,
{
    pub fn new(left: ArrayBase<T, Ix1>, right: ArrayBase<T, Ix1>) -> Result<Self, Error> {
        if left.len() != right.len() {
            return Err(Error::MismatchedLengths {
                field: "right",
                expected: left.len(),
                actual: right.len(),
            });
        }

        Ok(IntervalCensored { left, right })
    }

    /// Sample size.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

impl<F: Copy> IntervalCensored<OwnedRepr<F>, Ix1> {
    /// Build from `(left, right)` pairs.
    pub fn from_events(events: &[(F, F)]) -> Self {
        let (left, right): (Vec<F>, Vec<F>) = events.iter().copied().unzip();

        IntervalCensored {
            left: Array1::from(left),
            right: Array1::from(right),
        }
    }
}

impl<T, W, F> Weighted<IntervalCensored<T, Ix1>, W, Ix1>
where
    T: Data<Elem = F>,
    W: Data<Elem = F>,
{
    pub fn new(time: IntervalCensored<T, Ix1>, weight: ArrayBase<W, Ix1>) -> Result<Self, Error> {
        if time.len() != weight.len() {
            return Err(Error::MismatchedLengths {
                field: "weight",
                expected: time.len(),
                actual: weight.len(),
            });
        }

        Ok(Weighted { time, weight })
    }
}
