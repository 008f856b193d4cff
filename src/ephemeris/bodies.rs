use nalgebra::Matrix3;
use serde::Deserialize;
use std::f64::consts::FRAC_PI_2;

use crate::geometry::{r1, r3, Frame};

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// IAU rotation model of a body, linear terms only.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BodyOrientation {
    pub naif_id: i32,
    pub name: String,
    /// Pole right ascension: degrees, degrees per Julian century.
    pub pole_ra: [f64; 2],
    /// Pole declination: degrees, degrees per Julian century.
    pub pole_dec: [f64; 2],
    /// Prime meridian: degrees, degrees per day.
    pub prime_meridian: [f64; 2],
}

impl BodyOrientation {
    pub fn frame(&self) -> Frame {
        Frame::body_fixed(&self.name)
    }

    pub fn j2000_to_body_fixed(&self, et: f64) -> Matrix3<f64> {
        let days = et / SECONDS_PER_DAY;
        let centuries = days / DAYS_PER_CENTURY;

        let ra = (self.pole_ra[0] + self.pole_ra[1] * centuries).to_radians();
        let dec = (self.pole_dec[0] + self.pole_dec[1] * centuries).to_radians();
        let w = (self.prime_meridian[0] + self.prime_meridian[1] * days)
            .rem_euclid(360.0)
            .to_radians();

        r3(w) * r1(FRAC_PI_2 - dec) * r3(FRAC_PI_2 + ra)
    }
}
