use nalgebra::Vector3;
use std::f64::consts::PI;

use super::error::GeometryError;
use crate::attitude::Compatibility;

/// Motor step positions in degrees from the spin axis. Step 0 parks the
/// detector behind its shield.
pub const MOTOR_ANGLES_DEG: [f64; 8] = [315.0, 0.0, 30.6, 61.2, 91.8, 122.4, 153.0, 183.6];

/// Sector azimuths in degrees. Index 0 is a sentinel, only accepted in
/// legacy mode.
pub const SECTOR_ANGLES_DEG: [f64; 17] = [
    -1.0, 0.0, 22.5, 45.0, 67.5, 90.0, 112.5, 135.0, 157.5, 180.0, 202.5, 225.0, 247.5, 270.0,
    292.5, 315.0, 337.5,
];

/// Azimuth of sector 1 relative to the spacecraft X axis.
pub const BORESIGHT_OFFSET: f64 = PI / 16.0;

/// π as used by historical reductions.
const LEGACY_PI: f64 = 3.14159;

pub const OCCLUDED_STEP: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookState {
    Occluded,
    /// Unit boresight in the spacecraft frame.
    Visible(Vector3<f64>),
}

pub fn look_state(
    motor_step: u8,
    sector: u8,
    compatibility: Compatibility,
) -> Result<LookState, GeometryError> {
    if motor_step == OCCLUDED_STEP {
        return Ok(LookState::Occluded);
    }

    let (deg_to_rad, offset) = match compatibility {
        Compatibility::Strict => (PI / 180.0, BORESIGHT_OFFSET),
        Compatibility::Legacy => (LEGACY_PI / 180.0, LEGACY_PI / 16.0),
    };

    let polar = deg_to_rad
        * MOTOR_ANGLES_DEG
            .get(usize::from(motor_step))
            .ok_or(GeometryError::InvalidMotorStep(motor_step))?;
    if sector == 0 && compatibility == Compatibility::Strict {
        return Err(GeometryError::InvalidSector(sector));
    }
    let azimuth = deg_to_rad
        * SECTOR_ANGLES_DEG
            .get(usize::from(sector))
            .ok_or(GeometryError::InvalidSector(sector))?
        + offset;

    Ok(LookState::Visible(Vector3::new(
        azimuth.cos() * polar.sin(),
        azimuth.sin() * polar.sin(),
        polar.cos(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn shielded_step_is_occluded_for_any_sector() {
        for sector in 0..=16 {
            assert_eq!(
                look_state(0, sector, Compatibility::Strict),
                Ok(LookState::Occluded)
            );
        }
    }

    #[test]
    fn every_visible_look_is_unit_length() {
        for step in 1..=7 {
            for sector in 1..=16 {
                match look_state(step, sector, Compatibility::Strict).unwrap() {
                    LookState::Visible(look) => {
                        assert_abs_diff_eq!(look.norm(), 1.0, epsilon = 1e-12)
                    }
                    LookState::Occluded => panic!("step {step} sector {sector} occluded"),
                }
            }
        }
    }

    #[test]
    fn step_one_looks_along_the_spin_axis() {
        assert_eq!(
            look_state(1, 5, Compatibility::Strict),
            Ok(LookState::Visible(Vector3::z()))
        );
    }

    #[test]
    fn sector_one_is_offset_from_x() {
        let LookState::Visible(look) = look_state(4, 1, Compatibility::Strict).unwrap() else {
            panic!("expected a visible look");
        };
        let polar = 91.8_f64.to_radians();
        assert_abs_diff_eq!(look.x, BORESIGHT_OFFSET.cos() * polar.sin(), epsilon = 1e-15);
        assert_abs_diff_eq!(look.y, BORESIGHT_OFFSET.sin() * polar.sin(), epsilon = 1e-15);
    }

    #[test]
    fn out_of_table_indices_are_rejected() {
        let strict = |step, sector| look_state(step, sector, Compatibility::Strict);
        assert_eq!(strict(8, 1), Err(GeometryError::InvalidMotorStep(8)));
        assert_eq!(strict(3, 0), Err(GeometryError::InvalidSector(0)));
        assert_eq!(strict(3, 17), Err(GeometryError::InvalidSector(17)));
    }

    #[test]
    fn legacy_looks_use_historical_pi() {
        let LookState::Visible(look) = look_state(4, 3, Compatibility::Legacy).unwrap() else {
            panic!("expected a visible look");
        };
        let polar = LEGACY_PI / 180.0 * 91.8;
        let azimuth = LEGACY_PI / 180.0 * 45.0 + LEGACY_PI / 16.0;
        assert_eq!(look.x, azimuth.cos() * polar.sin());
        assert_eq!(look.y, azimuth.sin() * polar.sin());
        assert_eq!(look.z, polar.cos());

        let LookState::Visible(strict) = look_state(4, 3, Compatibility::Strict).unwrap() else {
            panic!("expected a visible look");
        };
        assert!((look - strict).norm() > 1e-7);
    }

    #[test]
    fn legacy_accepts_the_sector_sentinel() {
        let LookState::Visible(look) = look_state(2, 0, Compatibility::Legacy).unwrap() else {
            panic!("expected a visible look");
        };
        let polar = 30.6 * LEGACY_PI / 180.0;
        let azimuth = LEGACY_PI / 16.0 - LEGACY_PI / 180.0;
        assert_abs_diff_eq!(look.x, azimuth.cos() * polar.sin(), epsilon = 1e-15);
        assert_abs_diff_eq!(look.y, azimuth.sin() * polar.sin(), epsilon = 1e-15);
        assert_eq!(
            look_state(2, 17, Compatibility::Legacy),
            Err(GeometryError::InvalidSector(17))
        );
    }
}
