mod error;
mod parsing;
mod types;
mod writer;

pub use error::RecordError;
pub use parsing::{load_attitude_file, load_pointing_file};
pub use types::{OutputRecord, PointingSample};
pub use writer::{OutputFormat, RecordWriter};

#[cfg(test)]
pub use types::RATE_CHANNELS;
