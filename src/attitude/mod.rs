mod error;
mod interpolate;
mod table;

pub use error::AttitudeError;
pub use interpolate::{Compatibility, Interpolator};
pub use table::{bracket_index, AngleTable, AttitudeSample};
