//! Positions, frame orientations and time conversion consumed by the
//! pointing pipeline.

mod bodies;
mod error;
mod tabulated;
pub mod time;

use nalgebra::Vector3;

use crate::geometry::{Frame, FrameRotation};

pub use bodies::BodyOrientation;
pub use error::EphemerisError;
pub use tabulated::{TabulatedEphemeris, Trajectory};

pub trait Ephemeris {
    /// Position of `body` relative to `relative_to`, in km, expressed in `frame`.
    fn state_vector(
        &self,
        body: i32,
        et: f64,
        frame: &Frame,
        relative_to: i32,
    ) -> Result<Vector3<f64>, EphemerisError>;

    fn frame_rotation(
        &self,
        from: &Frame,
        to: &Frame,
        et: f64,
    ) -> Result<FrameRotation, EphemerisError>;

    fn body_id_to_name(&self, id: i32) -> Result<String, EphemerisError>;

    /// UTC time tag to ephemeris seconds past J2000.
    fn time_to_epoch(&self, tag: &str) -> Result<f64, EphemerisError> {
        time::utc_to_et(tag)
    }

    fn time_of_day_hours(&self, et: f64) -> f64 {
        time::time_of_day_hours(et)
    }
}
