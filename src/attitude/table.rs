use super::error::AttitudeError;

/// One record of the coarse attitude stream. Angles are radians in the
/// EME50 (FK4) frame, `et` is ephemeris seconds past J2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeSample {
    pub et: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub twist: f64,
}

/// Attitude samples in source order, read-only once built.
#[derive(Debug, Clone)]
pub struct AngleTable {
    samples: Vec<AttitudeSample>,
}

impl AngleTable {
    pub fn new(samples: Vec<AttitudeSample>) -> Result<Self, AttitudeError> {
        if samples.len() < 2 {
            return Err(AttitudeError::TooFewSamples(samples.len()));
        }

        if let Some(index) = samples
            .windows(2)
            .position(|pair| pair[1].et <= pair[0].et)
        {
            return Err(AttitudeError::NonMonotonic {
                index: index + 1,
                et: samples[index + 1].et,
            });
        }

        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// First and last sample times.
    pub fn span(&self) -> (f64, f64) {
        (self.samples[0].et, self.samples[self.samples.len() - 1].et)
    }

    /// Lower index `k` with `table[k].et < et <= table[k + 1].et`. The first
    /// sample time itself is covered by the first bracket.
    pub fn find_bracket(&self, et: f64) -> Result<usize, AttitudeError> {
        let (start, end) = self.span();
        if et == start {
            return Ok(0);
        }
        bracket_index(&self.samples, et, |s| s.et)
            .ok_or(AttitudeError::OutOfRange { et, start, end })
    }

    pub fn bracket(&self, lower: usize) -> (&AttitudeSample, &AttitudeSample) {
        (&self.samples[lower], &self.samples[lower + 1])
    }
}

/// Linear scan for the first consecutive pair straddling `et`; earliest
/// match wins.
pub fn bracket_index<T>(items: &[T], et: f64, time_of: impl Fn(&T) -> f64) -> Option<usize> {
    items
        .windows(2)
        .position(|pair| et > time_of(&pair[0]) && et <= time_of(&pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(et: f64) -> AttitudeSample {
        AttitudeSample {
            et,
            right_ascension: 0.0,
            declination: 0.0,
            twist: 0.0,
        }
    }

    #[test]
    fn bracket_upper_bound_is_inclusive() {
        let table = AngleTable::new(vec![sample(0.0), sample(10.0), sample(20.0)]).unwrap();
        assert_eq!(table.find_bracket(5.0), Ok(0));
        assert_eq!(table.find_bracket(10.0), Ok(0));
        assert_eq!(table.find_bracket(10.5), Ok(1));
        assert_eq!(table.find_bracket(20.0), Ok(1));
    }

    #[test]
    fn first_sample_time_is_covered() {
        let table = AngleTable::new(vec![sample(3.0), sample(4.0)]).unwrap();
        assert_eq!(table.find_bracket(3.0), Ok(0));
    }

    #[test]
    fn out_of_range_reports_span() {
        let table = AngleTable::new(vec![sample(0.0), sample(10.0)]).unwrap();
        assert_eq!(
            table.find_bracket(10.1),
            Err(AttitudeError::OutOfRange {
                et: 10.1,
                start: 0.0,
                end: 10.0
            })
        );
        assert!(table.find_bracket(-1.0).is_err());
    }

    #[test]
    fn rejects_unsorted_and_short_tables() {
        assert_eq!(
            AngleTable::new(vec![sample(0.0)]).unwrap_err(),
            AttitudeError::TooFewSamples(1)
        );
        assert_eq!(
            AngleTable::new(vec![sample(0.0), sample(5.0), sample(5.0)]).unwrap_err(),
            AttitudeError::NonMonotonic { index: 2, et: 5.0 }
        );
    }

    #[test]
    fn bracket_index_on_plain_times() {
        let times = [1.0, 2.0, 4.0, 8.0];
        assert_eq!(bracket_index(&times, 3.0, |t| *t), Some(1));
        assert_eq!(bracket_index(&times, 1.0, |t| *t), None);
        assert_eq!(bracket_index(&times, 9.0, |t| *t), None);
    }
}
