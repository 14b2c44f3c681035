pub mod gompertz;

pub trait Survival<Input, Output> {
    fn survival(&self, input: &Input) -> Output;
}

pub trait LogHazard<Input, Output> {
    fn log_hazard(&self, input: &Input) -> Output;
}

pub trait CumulativeHazard<Input, Output> {
    fn cumulative_hazard(&self, input: &Input) -> Output;
}

/// `P(Y <= y)`.
pub trait CumulativeDensity<Input, Output> {
    fn cumulative_density(&self, input: &Input) -> Output;
}

pub trait LogCumulativeDensity<Input, Output> {
    fn log_cumulative_density(&self, input: &Input) -> Output;
}

/// Log of the probability density.
pub trait LogDensity<Input, Output> {
    fn log_density(&self, input: &Input) -> Output;
}
