use std::io::Write;

use super::error::RecordError;
use super::types::OutputRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    /// Space-separated columns, six decimals.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

pub struct RecordWriter<W: Write> {
    inner: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self {
            inner,
            format,
            written: 0,
        }
    }

    pub fn write(&mut self, record: &OutputRecord) -> Result<(), RecordError> {
        match self.format {
            OutputFormat::Text => writeln!(
                self.inner,
                " {:.6} {} {} {:.6} {:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
                record.time_of_day,
                record.motor_step,
                record.sector,
                record.look[0],
                record.look[1],
                record.look[2],
                record.position[0],
                record.position[1],
                record.position[2],
                record.auxiliary_count,
            )?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.inner, record)?;
                writeln!(self.inner)?;
            }
        }
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> Result<W, RecordError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
