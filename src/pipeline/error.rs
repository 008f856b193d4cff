use thiserror::Error;

use crate::attitude::AttitudeError;
use crate::config::ConfigError;
use crate::ephemeris::EphemerisError;
use crate::geometry::GeometryError;
use crate::records::RecordError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("attitude error: {0}")]
    Attitude(#[from] AttitudeError),
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error("record error: {0}")]
    Records(#[from] RecordError),
    #[error("pointing sample {index} (et {et}): {source}")]
    Sample {
        index: usize,
        et: f64,
        #[source]
        source: Box<PipelineError>,
    },
}
