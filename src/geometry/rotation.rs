use nalgebra::{Matrix3, Vector3};
use std::fmt;
use std::str::FromStr;

use super::error::GeometryError;

/// Reference frames the pointing chain passes through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Spacecraft-fixed frame of the instrument's mechanical pointing.
    Spacecraft,
    /// Mean equator and equinox of B1950 (EME50).
    Fk4,
    J2000,
    /// Body-fixed frame of a named body, e.g. `IAU_GANYMEDE`.
    BodyFixed(String),
}

impl Frame {
    pub fn body_fixed(body_name: &str) -> Self {
        Frame::BodyFixed(body_name.trim().to_uppercase())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Frame::Spacecraft => write!(f, "SPACECRAFT"),
            Frame::Fk4 => write!(f, "FK4"),
            Frame::J2000 => write!(f, "J2000"),
            Frame::BodyFixed(body) => write!(f, "IAU_{}", body),
        }
    }
}

impl FromStr for Frame {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_uppercase();
        match name.as_str() {
            "SPACECRAFT" => Ok(Frame::Spacecraft),
            "FK4" | "EME50" => Ok(Frame::Fk4),
            "J2000" | "EME2000" => Ok(Frame::J2000),
            _ => match name.strip_prefix("IAU_") {
                Some(body) if !body.is_empty() => Ok(Frame::BodyFixed(body.to_string())),
                _ => Err(GeometryError::UnknownFrame(s.to_string())),
            },
        }
    }
}

/// A passive rotation taking vector components in `from` to components in
/// `to` at ephemeris time `et`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRotation {
    pub from: Frame,
    pub to: Frame,
    pub et: f64,
    pub dcm: Matrix3<f64>,
}

impl FrameRotation {
    pub fn new(from: Frame, to: Frame, et: f64, dcm: Matrix3<f64>) -> Self {
        Self { from, to, et, dcm }
    }

    pub fn identity(frame: Frame, et: f64) -> Self {
        Self::new(frame.clone(), frame, et, Matrix3::identity())
    }

    pub fn transpose(&self) -> Self {
        Self::new(
            self.to.clone(),
            self.from.clone(),
            self.et,
            self.dcm.transpose(),
        )
    }

    /// Rotation equivalent to applying `self` and then `next`.
    pub fn then(&self, next: &FrameRotation) -> Result<FrameRotation, GeometryError> {
        if next.from != self.to {
            return Err(GeometryError::FrameMismatch {
                expected: self.to.to_string(),
                found: next.from.to_string(),
            });
        }
        Ok(Self::new(
            self.from.clone(),
            next.to.clone(),
            self.et,
            next.dcm * self.dcm,
        ))
    }

    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.dcm * v
    }
}

/// FK4 to spacecraft rotation from right ascension `a`, declination `d` and
/// twist `t` of the spin axis, all in radians.
pub fn attitude_matrix(a: f64, d: f64, t: f64) -> Matrix3<f64> {
    let (sin_a, cos_a) = a.sin_cos();
    let (sin_d, cos_d) = d.sin_cos();
    let (sin_t, cos_t) = t.sin_cos();

    Matrix3::new(
        cos_t * sin_d * cos_a - sin_t * sin_a,
        cos_t * sin_d * sin_a + sin_t * cos_a,
        -cos_t * cos_d,
        -sin_t * sin_d * cos_a - cos_t * sin_a,
        -sin_t * sin_d * sin_a + cos_t * cos_a,
        sin_t * cos_d,
        cos_d * cos_a,
        cos_d * sin_a,
        sin_d,
    )
}

/// Passive rotation about the X axis.
pub fn r1(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Passive rotation about the Z axis.
pub fn r3(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// FK4 (B1950, no E-terms) to J2000 precession matrix.
pub fn fk4_to_j2000() -> Matrix3<f64> {
    Matrix3::new(
        0.999_925_679_495_687_7,
        -0.011_181_483_220_466_2,
        -0.004_859_003_815_359_2,
        0.011_181_483_239_171_7,
        0.999_937_484_893_313_5,
        -0.000_027_162_594_714_2,
        0.004_859_003_772_314_3,
        -0.000_027_170_293_744_0,
        0.999_988_194_602_374_2,
    )
}
