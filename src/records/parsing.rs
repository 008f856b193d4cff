use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::error::RecordError;
use super::types::{PointingSample, RATE_CHANNELS};
use crate::attitude::AttitudeSample;
use crate::ephemeris::Ephemeris;

/// `UTC SCLK Bx By Bz |B| ra dec twist spin`
const ATTITUDE_FIELDS: usize = 10;
/// `UTC step sector pitch phase` followed by the rate channels.
const POINTING_FIELDS: usize = 5 + RATE_CHANNELS;

fn field<T: FromStr>(fields: &[&str], index: usize, name: &str) -> Result<T, String> {
    fields[index]
        .parse()
        .map_err(|_| format!("invalid {} '{}'", name, fields[index]))
}

fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(format!(
            "expected {} fields, found {}",
            expected,
            fields.len()
        ));
    }
    Ok(fields)
}

pub fn parse_attitude_line<E: Ephemeris + ?Sized>(
    line: &str,
    ephemeris: &E,
) -> Result<AttitudeSample, String> {
    let fields = split_fields(line, ATTITUDE_FIELDS)?;
    let et = ephemeris
        .time_to_epoch(fields[0])
        .map_err(|e| e.to_string())?;

    Ok(AttitudeSample {
        et,
        right_ascension: field(&fields, 6, "right ascension")?,
        declination: field(&fields, 7, "declination")?,
        twist: field(&fields, 8, "twist")?,
    })
}

pub fn parse_pointing_line<E: Ephemeris + ?Sized>(
    line: &str,
    ephemeris: &E,
) -> Result<PointingSample, String> {
    let fields = split_fields(line, POINTING_FIELDS)?;
    let et = ephemeris
        .time_to_epoch(fields[0])
        .map_err(|e| e.to_string())?;

    let mut rates = [0.0; RATE_CHANNELS];
    for (channel, rate) in rates.iter_mut().enumerate() {
        *rate = field(&fields, 5 + channel, "rate")?;
    }

    Ok(PointingSample {
        et,
        motor_step: field(&fields, 1, "motor step")?,
        sector: field(&fields, 2, "sector")?,
        pitch: field(&fields, 3, "pitch")?,
        phase: field(&fields, 4, "phase")?,
        rates,
    })
}

fn parse_records<T>(
    content: &str,
    source: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Vec<T>, RecordError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse(line).map_err(|message| RecordError::Malformed {
                file: source.to_string(),
                line: index + 1,
                message,
            })
        })
        .collect()
}

pub fn parse_attitude_records<E: Ephemeris + ?Sized>(
    content: &str,
    source: &str,
    ephemeris: &E,
) -> Result<Vec<AttitudeSample>, RecordError> {
    parse_records(content, source, |line| parse_attitude_line(line, ephemeris))
}

pub fn parse_pointing_records<E: Ephemeris + ?Sized>(
    content: &str,
    source: &str,
    ephemeris: &E,
) -> Result<Vec<PointingSample>, RecordError> {
    parse_records(content, source, |line| parse_pointing_line(line, ephemeris))
}

fn read(path: &Path) -> Result<(String, String), RecordError> {
    let file = path.display().to_string();
    match fs::read_to_string(path) {
        Ok(content) => Ok((content, file)),
        Err(source) => Err(RecordError::Io { file, source }),
    }
}

/// Reads the magnetometer attitude table of an encounter.
pub fn load_attitude_file<E: Ephemeris + ?Sized>(
    path: &Path,
    ephemeris: &E,
) -> Result<Vec<AttitudeSample>, RecordError> {
    let (content, file) = read(path)?;
    let samples = parse_attitude_records(&content, &file, ephemeris)?;
    log::info!("Loaded {} attitude records from {}", samples.len(), file);
    Ok(samples)
}

/// Reads the detector step/sector table of an encounter.
pub fn load_pointing_file<E: Ephemeris + ?Sized>(
    path: &Path,
    ephemeris: &E,
) -> Result<Vec<PointingSample>, RecordError> {
    let (content, file) = read(path)?;
    let samples = parse_pointing_records(&content, &file, ephemeris)?;
    log::info!("Loaded {} pointing records from {}", samples.len(), file);
    Ok(samples)
}
