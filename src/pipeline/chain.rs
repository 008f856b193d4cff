use nalgebra::Vector3;

use super::error::PipelineError;
use crate::ephemeris::Ephemeris;
use crate::geometry::{attitude_matrix, Frame, FrameRotation, GeometryError};

/// Rotations taking a spacecraft-frame vector through FK4 and J2000 into a
/// body-fixed frame, all evaluated at one sample time.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameChain {
    pub spacecraft_to_fk4: FrameRotation,
    pub fk4_to_j2000: FrameRotation,
    pub j2000_to_target: FrameRotation,
}

impl FrameChain {
    pub fn compose<E: Ephemeris + ?Sized>(
        ephemeris: &E,
        ra: f64,
        dec: f64,
        twist: f64,
        et: f64,
        target: &Frame,
    ) -> Result<Self, PipelineError> {
        let fk4_to_spacecraft = FrameRotation::new(
            Frame::Fk4,
            Frame::Spacecraft,
            et,
            attitude_matrix(ra, dec, twist),
        );

        let chain = Self {
            spacecraft_to_fk4: fk4_to_spacecraft.transpose(),
            fk4_to_j2000: ephemeris.frame_rotation(&Frame::Fk4, &Frame::J2000, et)?,
            j2000_to_target: ephemeris.frame_rotation(&Frame::J2000, target, et)?,
        };
        chain.combined()?;

        Ok(chain)
    }

    /// Single rotation equivalent to the whole chain.
    pub fn combined(&self) -> Result<FrameRotation, GeometryError> {
        self.spacecraft_to_fk4
            .then(&self.fk4_to_j2000)?
            .then(&self.j2000_to_target)
    }

    /// Applies each link in turn: spacecraft, FK4, J2000, target.
    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let fk4 = self.spacecraft_to_fk4.apply(v);
        let j2000 = self.fk4_to_j2000.apply(&fk4);
        self.j2000_to_target.apply(&j2000)
    }
}
