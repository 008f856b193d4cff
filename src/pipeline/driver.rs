use nalgebra::Vector3;

use super::chain::FrameChain;
use super::error::PipelineError;
use crate::attitude::{AngleTable, Compatibility, Interpolator};
use crate::ephemeris::Ephemeris;
use crate::geometry::{derive_twist, look_state, Frame, LookState, REFERENCE_POLE};
use crate::records::{OutputRecord, PointingSample};

/// Attitude and frame chain reconstructed at one sample time.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGeometry {
    pub right_ascension: f64,
    pub declination: f64,
    pub twist: f64,
    /// Twist carried by the attitude stream, defined for another instrument.
    pub recorded_twist: f64,
    pub chain: FrameChain,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub emitted: usize,
    pub occluded: usize,
}

/// Turns pointing samples into body-fixed look directions for one encounter.
pub struct Pipeline<'a, E: Ephemeris + ?Sized> {
    table: AngleTable,
    ephemeris: &'a E,
    compatibility: Compatibility,
    spacecraft: i32,
    target: i32,
    target_frame: Frame,
    pole: Vector3<f64>,
}

impl<'a, E: Ephemeris + ?Sized> Pipeline<'a, E> {
    pub fn new(
        table: AngleTable,
        ephemeris: &'a E,
        spacecraft: i32,
        target: i32,
    ) -> Result<Self, PipelineError> {
        let target_name = ephemeris.body_id_to_name(target)?;
        Ok(Self {
            table,
            ephemeris,
            compatibility: Compatibility::default(),
            spacecraft,
            target,
            target_frame: Frame::body_fixed(&target_name),
            pole: Vector3::from(REFERENCE_POLE),
        })
    }

    pub fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = compatibility;
        self
    }

    pub fn target_frame(&self) -> &Frame {
        &self.target_frame
    }

    pub fn geometry(&self, et: f64) -> Result<SampleGeometry, PipelineError> {
        let interpolator = Interpolator::new(&self.table, self.compatibility);
        let right_ascension = interpolator.right_ascension(et)?;
        let declination = interpolator.declination(et)?;
        let twist = derive_twist(right_ascension, declination, &self.pole);
        let recorded_twist = interpolator.recorded_twist(et)?;
        let chain = FrameChain::compose(
            self.ephemeris,
            right_ascension,
            declination,
            twist,
            et,
            &self.target_frame,
        )?;

        Ok(SampleGeometry {
            right_ascension,
            declination,
            twist,
            recorded_twist,
            chain,
        })
    }

    /// Output record for one sample, or `None` when the detector is behind
    /// its shield.
    pub fn process(
        &self,
        sample: &PointingSample,
    ) -> Result<Option<OutputRecord>, PipelineError> {
        let geometry = self.geometry(sample.et)?;

        let look = match look_state(sample.motor_step, sample.sector, self.compatibility)? {
            LookState::Occluded => return Ok(None),
            LookState::Visible(look) => geometry.chain.apply(&look),
        };
        let position = self.ephemeris.state_vector(
            self.spacecraft,
            sample.et,
            &self.target_frame,
            self.target,
        )?;

        log::debug!(
            "et {:.3}: ra {:.6} dec {:.6} twist {:.6} (recorded {:.6}) look [{:.6}, {:.6}, {:.6}]",
            sample.et,
            geometry.right_ascension,
            geometry.declination,
            geometry.twist,
            geometry.recorded_twist,
            look.x,
            look.y,
            look.z
        );

        Ok(Some(OutputRecord {
            time_of_day: self.ephemeris.time_of_day_hours(sample.et),
            motor_step: sample.motor_step,
            sector: sample.sector,
            look: look.into(),
            position: position.into(),
            auxiliary_count: sample.auxiliary_count(),
        }))
    }

    /// Processes samples in order, handing each record to `sink`. Stops at
    /// the first failing sample.
    pub fn run<F>(
        &self,
        samples: &[PointingSample],
        mut sink: F,
    ) -> Result<RunSummary, PipelineError>
    where
        F: FnMut(OutputRecord) -> Result<(), PipelineError>,
    {
        let (start, end) = self.table.span();
        log::info!(
            "Reducing {} pointing samples against {} attitude samples ({:.3} .. {:.3}) in {}",
            samples.len(),
            self.table.len(),
            start,
            end,
            self.target_frame
        );

        let mut summary = RunSummary::default();
        for (index, sample) in samples.iter().enumerate() {
            let record = self.process(sample).map_err(|e| PipelineError::Sample {
                index,
                et: sample.et,
                source: Box::new(e),
            })?;

            summary.processed += 1;
            match record {
                Some(record) => {
                    sink(record)?;
                    summary.emitted += 1;
                }
                None => summary.occluded += 1,
            }
        }

        log::info!(
            "Processed {} samples: {} records, {} occluded",
            summary.processed,
            summary.emitted,
            summary.occluded
        );
        Ok(summary)
    }
}
