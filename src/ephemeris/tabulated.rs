use nalgebra::{Matrix3, Vector3};
use std::fs;
use std::path::Path;

use super::bodies::BodyOrientation;
use super::error::EphemerisError;
use super::{time, Ephemeris};
use crate::attitude::bracket_index;
use crate::geometry::{fk4_to_j2000, Frame, FrameRotation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub et: f64,
    /// J2000 position, km.
    pub position: Vector3<f64>,
}

/// Sampled position of one body relative to another.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub body: i32,
    pub relative_to: i32,
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Points must be in increasing time order; at least two are needed to
    /// interpolate.
    pub fn new(
        body: i32,
        relative_to: i32,
        points: Vec<TrajectoryPoint>,
    ) -> Result<Self, EphemerisError> {
        if points.len() < 2 {
            return Err(EphemerisError::SparseTrajectory {
                body,
                relative_to,
                points: points.len(),
            });
        }
        Ok(Self {
            body,
            relative_to,
            points,
        })
    }

    pub fn from_file(path: &Path, body: i32, relative_to: i32) -> Result<Self, EphemerisError> {
        let content = fs::read_to_string(path)?;
        let filename = path.display().to_string();
        let trajectory = Self::parse(&content, &filename, body, relative_to)?;
        log::debug!(
            "Loaded {} trajectory points from {}",
            trajectory.points.len(),
            filename
        );
        Ok(trajectory)
    }

    /// Parses `UTC x y z` lines. Blank lines and `#` comments are skipped.
    pub fn parse(
        content: &str,
        source: &str,
        body: i32,
        relative_to: i32,
    ) -> Result<Self, EphemerisError> {
        let mut points: Vec<TrajectoryPoint> = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = |message: String| EphemerisError::MalformedTrajectory {
                file: source.to_string(),
                line: index + 1,
                message,
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 4 {
                return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
            }

            let et = time::utc_to_et(fields[0]).map_err(|e| malformed(e.to_string()))?;
            let mut xyz = [0.0; 3];
            for (slot, field) in xyz.iter_mut().zip(&fields[1..]) {
                *slot = field
                    .parse()
                    .map_err(|_| malformed(format!("invalid coordinate '{}'", field)))?;
            }

            if let Some(last) = points.last() {
                if et <= last.et {
                    return Err(malformed("time tags must increase".into()));
                }
            }
            points.push(TrajectoryPoint {
                et,
                position: Vector3::from(xyz),
            });
        }

        Self::new(body, relative_to, points).map_err(|e| EphemerisError::MalformedTrajectory {
            file: source.to_string(),
            line: 0,
            message: e.to_string(),
        })
    }

    pub fn span(&self) -> (f64, f64) {
        (self.points[0].et, self.points[self.points.len() - 1].et)
    }

    /// Linearly interpolated J2000 position at `et`.
    pub fn position(&self, et: f64) -> Result<Vector3<f64>, EphemerisError> {
        let (start, end) = self.span();
        let lower = if et == start {
            0
        } else {
            bracket_index(&self.points, et, |p| p.et)
                .ok_or(EphemerisError::OutOfRange { et, start, end })?
        };

        let (a, b) = (&self.points[lower], &self.points[lower + 1]);
        let fraction = (et - a.et) / (b.et - a.et);
        Ok(a.position + (b.position - a.position) * fraction)
    }
}

/// Ephemeris backed by configured body rotation models and sampled
/// trajectories.
#[derive(Debug, Clone, Default)]
pub struct TabulatedEphemeris {
    bodies: Vec<BodyOrientation>,
    trajectories: Vec<Trajectory>,
}

impl TabulatedEphemeris {
    pub fn new(bodies: Vec<BodyOrientation>) -> Self {
        Self {
            bodies,
            trajectories: Vec::new(),
        }
    }

    pub fn add_trajectory(&mut self, trajectory: Trajectory) {
        self.trajectories.push(trajectory);
    }

    fn body(&self, id: i32) -> Result<&BodyOrientation, EphemerisError> {
        self.bodies
            .iter()
            .find(|b| b.naif_id == id)
            .ok_or(EphemerisError::UnknownBody(id))
    }

    /// Rotation taking J2000 components into `frame`.
    fn j2000_to(&self, frame: &Frame, et: f64) -> Result<Matrix3<f64>, EphemerisError> {
        match frame {
            Frame::J2000 => Ok(Matrix3::identity()),
            Frame::Fk4 => Ok(fk4_to_j2000().transpose()),
            Frame::BodyFixed(_) => self
                .bodies
                .iter()
                .find(|b| b.frame() == *frame)
                .map(|b| b.j2000_to_body_fixed(et))
                .ok_or_else(|| EphemerisError::UnknownFrame(frame.to_string())),
            Frame::Spacecraft => Err(EphemerisError::UnsupportedRotation {
                from: Frame::J2000.to_string(),
                to: frame.to_string(),
            }),
        }
    }
}

impl Ephemeris for TabulatedEphemeris {
    fn state_vector(
        &self,
        body: i32,
        et: f64,
        frame: &Frame,
        relative_to: i32,
    ) -> Result<Vector3<f64>, EphemerisError> {
        let j2000 = if let Some(t) = self
            .trajectories
            .iter()
            .find(|t| t.body == body && t.relative_to == relative_to)
        {
            t.position(et)?
        } else if let Some(t) = self
            .trajectories
            .iter()
            .find(|t| t.body == relative_to && t.relative_to == body)
        {
            -t.position(et)?
        } else {
            return Err(EphemerisError::NoTrajectory { body, relative_to });
        };

        Ok(self.j2000_to(frame, et)? * j2000)
    }

    fn frame_rotation(
        &self,
        from: &Frame,
        to: &Frame,
        et: f64,
    ) -> Result<FrameRotation, EphemerisError> {
        if from == to {
            return Ok(FrameRotation::identity(from.clone(), et));
        }
        // spacecraft attitude comes from telemetry, not from the ephemeris
        if *from == Frame::Spacecraft || *to == Frame::Spacecraft {
            return Err(EphemerisError::UnsupportedRotation {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let from_dcm = self.j2000_to(from, et)?;
        let to_dcm = self.j2000_to(to, et)?;

        Ok(FrameRotation::new(
            from.clone(),
            to.clone(),
            et,
            to_dcm * from_dcm.transpose(),
        ))
    }

    fn body_id_to_name(&self, id: i32) -> Result<String, EphemerisError> {
        self.body(id).map(|b| b.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EUROPA: i32 = 502;
    const GALILEO: i32 = -77;

    fn europa() -> BodyOrientation {
        BodyOrientation {
            naif_id: EUROPA,
            name: "Europa".into(),
            pole_ra: [268.08, -0.009],
            pole_dec: [64.51, 0.003],
            prime_meridian: [36.022, 101.3747235],
        }
    }

    fn ephemeris() -> TabulatedEphemeris {
        let mut eph = TabulatedEphemeris::new(vec![europa()]);
        eph.add_trajectory(Trajectory::new(
            GALILEO,
            EUROPA,
            vec![
                TrajectoryPoint {
                    et: 100.0,
                    position: Vector3::new(1000.0, 0.0, 0.0),
                },
                TrajectoryPoint {
                    et: 200.0,
                    position: Vector3::new(2000.0, -500.0, 40.0),
                },
            ],
        )
        .unwrap());
        eph
    }

    #[test]
    fn position_is_interpolated_in_j2000() {
        let eph = ephemeris();
        let pos = eph.state_vector(GALILEO, 150.0, &Frame::J2000, EUROPA).unwrap();
        assert_abs_diff_eq!(pos, Vector3::new(1500.0, -250.0, 20.0), epsilon = 1e-9);

        let reversed = eph.state_vector(EUROPA, 150.0, &Frame::J2000, GALILEO).unwrap();
        assert_abs_diff_eq!(reversed, -pos, epsilon = 1e-9);
    }

    #[test]
    fn position_in_body_frame_uses_the_frame_rotation() {
        let eph = ephemeris();
        let frame = Frame::body_fixed("Europa");
        let j2000 = eph.state_vector(GALILEO, 120.0, &Frame::J2000, EUROPA).unwrap();
        let fixed = eph.state_vector(GALILEO, 120.0, &frame, EUROPA).unwrap();
        let rot = eph.frame_rotation(&Frame::J2000, &frame, 120.0).unwrap();
        assert_abs_diff_eq!(fixed, rot.apply(&j2000), epsilon = 1e-9);
        assert_abs_diff_eq!(fixed.norm(), j2000.norm(), epsilon = 1e-9);
    }

    #[test]
    fn positions_outside_coverage_fail() {
        let eph = ephemeris();
        assert!(matches!(
            eph.state_vector(GALILEO, 250.0, &Frame::J2000, EUROPA),
            Err(EphemerisError::OutOfRange { .. })
        ));
        assert!(matches!(
            eph.state_vector(GALILEO, 150.0, &Frame::J2000, 501),
            Err(EphemerisError::NoTrajectory { .. })
        ));
    }

    #[test]
    fn fk4_to_body_fixed_goes_through_j2000() {
        let eph = ephemeris();
        let frame = Frame::body_fixed("Europa");
        let direct = eph.frame_rotation(&Frame::Fk4, &frame, 10.0).unwrap();
        let chained = eph
            .frame_rotation(&Frame::Fk4, &Frame::J2000, 10.0)
            .unwrap()
            .then(&eph.frame_rotation(&Frame::J2000, &frame, 10.0).unwrap())
            .unwrap();
        assert_abs_diff_eq!(direct.dcm, chained.dcm, epsilon = 1e-12);
        assert_abs_diff_eq!(
            eph.frame_rotation(&Frame::Fk4, &Frame::J2000, 0.0).unwrap().dcm,
            fk4_to_j2000(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn unknown_identifiers_are_reported() {
        let eph = ephemeris();
        assert!(matches!(
            eph.frame_rotation(&Frame::J2000, &Frame::body_fixed("Titan"), 0.0),
            Err(EphemerisError::UnknownFrame(_))
        ));
        assert!(matches!(
            eph.frame_rotation(&Frame::Spacecraft, &Frame::J2000, 0.0),
            Err(EphemerisError::UnsupportedRotation { .. })
        ));
        assert!(matches!(eph.body_id_to_name(599), Err(EphemerisError::UnknownBody(599))));
        assert_eq!(eph.body_id_to_name(EUROPA).unwrap(), "Europa");
    }

    #[test]
    fn trajectory_records_parse_with_line_numbers() {
        let content = "\
# utc x y z
1997-04-05T06:00:00.000 100.0 0.0 0.0

1997-04-05T06:01:00.000 200.0 10.0 -5.0
";
        let traj = Trajectory::parse(content, "orb07.traj", GALILEO, 503).unwrap();
        let (start, end) = traj.span();
        assert_abs_diff_eq!(end - start, 60.0, epsilon = 1e-6);

        let bad = "1997-04-05T06:00:00.000 100.0 0.0 0.0\n1997-04-05T06:01:00.000 x 1 2\n";
        match Trajectory::parse(bad, "orb07.traj", GALILEO, 503) {
            Err(EphemerisError::MalformedTrajectory { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn trajectories_need_two_points() {
        let single = vec![TrajectoryPoint {
            et: 0.0,
            position: Vector3::zeros(),
        }];
        assert!(matches!(
            Trajectory::new(GALILEO, EUROPA, single),
            Err(EphemerisError::SparseTrajectory { points: 1, .. })
        ));
        assert!(matches!(
            Trajectory::new(GALILEO, EUROPA, Vec::new()),
            Err(EphemerisError::SparseTrajectory { points: 0, .. })
        ));

        let header_only = "# utc x y z\n1997-04-05T06:00:00.000 100.0 0.0 0.0\n";
        assert!(matches!(
            Trajectory::parse(header_only, "orb07.traj", GALILEO, 503),
            Err(EphemerisError::MalformedTrajectory { line: 0, .. })
        ));
    }
}
