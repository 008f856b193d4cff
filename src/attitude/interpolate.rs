use serde::Deserialize;
use std::f64::consts::TAU;

use super::error::AttitudeError;
use super::table::{AngleTable, AttitudeSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Channel {
    RightAscension,
    Declination,
    Twist,
}

impl Channel {
    fn value(self, sample: &AttitudeSample) -> f64 {
        match self {
            Channel::RightAscension => sample.right_ascension,
            Channel::Declination => sample.declination,
            Channel::Twist => sample.twist,
        }
    }
}

/// `Increasing` channels roll over from 2π back to 0 between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleMode {
    Increasing,
    NonWrapping,
}

/// How out-of-range queries, the slope and the look geometry are handled.
///
/// `Legacy` reproduces historical reductions: a query outside the table
/// silently uses the first bracket, the slope is applied backward from the
/// lower sample, no channel wraps, and every result is rounded to `f32`.
/// The look direction uses the historical π (see `geometry::look_state`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Compatibility {
    #[default]
    Strict,
    Legacy,
}

pub struct Interpolator<'a> {
    table: &'a AngleTable,
    compatibility: Compatibility,
}

impl<'a> Interpolator<'a> {
    pub fn new(table: &'a AngleTable, compatibility: Compatibility) -> Self {
        Self {
            table,
            compatibility,
        }
    }

    pub fn interpolate(
        &self,
        channel: Channel,
        mode: AngleMode,
        et: f64,
    ) -> Result<f64, AttitudeError> {
        let lower = match self.compatibility {
            Compatibility::Strict => self.table.find_bracket(et)?,
            Compatibility::Legacy => self.table.find_bracket(et).unwrap_or(0),
        };
        let (a, b) = self.table.bracket(lower);

        let (t1, t2) = (a.et, b.et);
        let v1 = channel.value(a);
        let v2 = channel.value(b);

        match self.compatibility {
            Compatibility::Strict => {
                let wraps = mode == AngleMode::Increasing;
                let v2 = if wraps && v2 < v1 { v2 + TAU } else { v2 };
                let value = v1 + (v2 - v1) / (t2 - t1) * (et - t1);
                Ok(if wraps && value > TAU { value - TAU } else { value })
            }
            Compatibility::Legacy => {
                let value = v1 + (v2 - v1) / (t2 - t1) * (t1 - et);
                Ok(f64::from(value as f32))
            }
        }
    }

    pub fn right_ascension(&self, et: f64) -> Result<f64, AttitudeError> {
        self.interpolate(Channel::RightAscension, AngleMode::Increasing, et)
    }

    pub fn declination(&self, et: f64) -> Result<f64, AttitudeError> {
        self.interpolate(Channel::Declination, AngleMode::NonWrapping, et)
    }

    /// Twist as recorded in the attitude stream, for comparison with the
    /// derived twist.
    pub fn recorded_twist(&self, et: f64) -> Result<f64, AttitudeError> {
        self.interpolate(Channel::Twist, AngleMode::NonWrapping, et)
    }
}
