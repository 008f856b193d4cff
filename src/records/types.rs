use serde::Serialize;

/// Count-rate channels in one detector record.
pub const RATE_CHANNELS: usize = 64;

/// Rate channel carried through to the output as the auxiliary count.
pub const AUXILIARY_CHANNEL: usize = 1;

/// One mechanical-pointing record of the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct PointingSample {
    pub et: f64,
    pub motor_step: u8,
    pub sector: u8,
    pub pitch: f64,
    pub phase: f64,
    pub rates: [f64; RATE_CHANNELS],
}

impl PointingSample {
    pub fn auxiliary_count(&self) -> f64 {
        self.rates[AUXILIARY_CHANNEL]
    }
}

/// Fields in output order: time of day, motor step, sector, look vector,
/// spacecraft position, auxiliary count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    /// UTC hour of day.
    pub time_of_day: f64,
    pub motor_step: u8,
    pub sector: u8,
    pub look: [f64; 3],
    /// Spacecraft position relative to the target, km, body-fixed.
    pub position: [f64; 3],
    pub auxiliary_count: f64,
}
