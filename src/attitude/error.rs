use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AttitudeError {
    #[error("query time {et} outside attitude coverage [{start}, {end}]")]
    OutOfRange { et: f64, start: f64, end: f64 },
    #[error("attitude table needs at least two samples, got {0}")]
    TooFewSamples(usize),
    #[error("attitude sample {index} at {et} does not follow the previous sample in time")]
    NonMonotonic { index: usize, et: f64 },
}
