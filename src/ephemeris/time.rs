use chrono::{Datelike, NaiveDateTime, Timelike};
use hifitime::Epoch;

use super::error::EphemerisError;

const DAY_OF_YEAR_FORMAT: &str = "%Y-%jT%H:%M:%S%.f";

/// Converts a UTC tag, either calendar (`1997-04-05T06:44:40.320`) or day of
/// year (`1997-095T06:44:40.320`), to ephemeris seconds past J2000.
pub fn utc_to_et(tag: &str) -> Result<f64, EphemerisError> {
    let trimmed = tag.trim().trim_end_matches('Z');
    let invalid = |message: String| EphemerisError::InvalidTime {
        tag: tag.to_string(),
        message,
    };

    if let Ok(epoch) = Epoch::from_gregorian_str(trimmed) {
        return Ok(epoch.to_et_seconds());
    }

    let parsed = NaiveDateTime::parse_from_str(trimmed, DAY_OF_YEAR_FORMAT)
        .map_err(|e| invalid(e.to_string()))?;
    let epoch = Epoch::maybe_from_gregorian_utc(
        parsed.year(),
        parsed.month() as u8,
        parsed.day() as u8,
        parsed.hour() as u8,
        parsed.minute() as u8,
        parsed.second() as u8,
        parsed.nanosecond(),
    )
    .map_err(|e| invalid(e.to_string()))?;

    Ok(epoch.to_et_seconds())
}

/// UTC hour of day, with minutes and seconds as fractions of an hour.
pub fn time_of_day_hours(et: f64) -> f64 {
    let (_, _, _, hour, minute, second, nanos) = Epoch::from_et_seconds(et).to_gregorian_utc();
    let seconds = f64::from(second) + f64::from(nanos) * 1e-9;
    f64::from(hour) + f64::from(minute) / 60.0 + seconds / 3600.0
}
