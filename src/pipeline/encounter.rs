use super::error::PipelineError;
use crate::attitude::AngleTable;
use crate::config::{Config, EncounterConfig};
use crate::ephemeris::{Ephemeris, TabulatedEphemeris, Trajectory};
use crate::records::{load_attitude_file, load_pointing_file, PointingSample};

/// Inputs of one encounter, loaded once and held for the whole run.
pub struct EncounterData {
    pub encounter: EncounterConfig,
    pub target_name: String,
    pub ephemeris: TabulatedEphemeris,
    pub attitude: AngleTable,
    pub pointing: Vec<PointingSample>,
}

impl EncounterData {
    pub fn load(config: &Config, id: &str) -> Result<Self, PipelineError> {
        let encounter = config.find_encounter(id)?.clone();
        let mut ephemeris = TabulatedEphemeris::new(config.bodies.clone());
        let target_name = ephemeris.body_id_to_name(encounter.target)?;
        log::info!(
            "Encounter {}: {} flyby of {}",
            encounter.id,
            config.spacecraft.name,
            target_name
        );

        ephemeris.add_trajectory(Trajectory::from_file(
            &config.resolve(&encounter.trajectory),
            config.spacecraft.naif_id,
            encounter.target,
        )?);

        let attitude = AngleTable::new(load_attitude_file(
            &config.resolve(&encounter.attitude),
            &ephemeris,
        )?)?;
        let pointing = load_pointing_file(&config.resolve(&encounter.pointing), &ephemeris)?;

        Ok(Self {
            encounter,
            target_name,
            ephemeris,
            attitude,
            pointing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use crate::records::RATE_CHANNELS;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "flyby-pointing-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn epd_line(time: &str, step: u8, sector: u8) -> String {
        let rates = vec!["2.0"; RATE_CHANNELS].join(" ");
        format!("{} {} {} 45.0 90.0 {}", time, step, sector, rates)
    }

    #[test]
    fn loads_and_reduces_an_encounter_from_disk() {
        let dir = scratch_dir("g7");
        fs::write(
            dir.join("mag.tab"),
            "1997-04-05T07:00:00.000 X 1 2 3 4 1.50 0.40 0.0 0.0\n\
             1997-04-05T07:01:00.000 X 1 2 3 4 1.60 0.42 0.0 0.0\n\
             1997-04-05T07:02:00.000 X 1 2 3 4 1.70 0.44 0.0 0.0\n",
        )
        .unwrap();
        fs::write(
            dir.join("epd.tab"),
            format!(
                "{}\n{}\n",
                epd_line("1997-04-05T07:00:30.000", 0, 4),
                epd_line("1997-04-05T07:01:30.000", 5, 9)
            ),
        )
        .unwrap();
        fs::write(
            dir.join("traj.tab"),
            "1997-04-05T06:59:00.000 3000.0 0.0 0.0\n\
             1997-04-05T07:03:00.000 3000.0 400.0 0.0\n",
        )
        .unwrap();

        let yaml = format!(
            "data_dir: {}
bodies:
  - naif_id: 503
    name: Ganymede
    pole_ra: [268.20, -0.009]
    pole_dec: [64.57, 0.003]
    prime_meridian: [44.064, 50.3176081]
encounters:
  - id: G7
    target: 503
    attitude: mag.tab
    pointing: epd.tab
    trajectory: traj.tab
",
            dir.display()
        );
        let config = Config::from_str(&yaml).unwrap();
        let data = EncounterData::load(&config, "G7").unwrap();
        assert_eq!(data.target_name, "Ganymede");
        assert_eq!(data.attitude.len(), 3);
        assert_eq!(data.pointing.len(), 2);

        let pipeline = Pipeline::new(data.attitude, &data.ephemeris, -77, 503).unwrap();
        let mut records = Vec::new();
        let summary = pipeline
            .run(&data.pointing, |record| {
                records.push(record);
                Ok(())
            })
            .unwrap();

        assert_eq!(summary.emitted, 1);
        assert_eq!(summary.occluded, 1);
        let record = &records[0];
        assert_eq!((record.motor_step, record.sector), (5, 9));
        assert_abs_diff_eq!(Vector3::from(record.look).norm(), 1.0, epsilon = 1e-12);
        // 150 s into a 240 s leg from (3000, 0, 0) to (3000, 400, 0)
        let expected = (3000.0_f64.powi(2) + 250.0_f64.powi(2)).sqrt();
        assert_abs_diff_eq!(Vector3::from(record.position).norm(), expected, epsilon = 1e-6);
        assert_abs_diff_eq!(
            record.time_of_day,
            7.0 + 1.0 / 60.0 + 30.0 / 3600.0,
            epsilon = 1e-6
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_input_file_is_reported() {
        let dir = scratch_dir("missing");
        fs::write(
            dir.join("traj.tab"),
            "1997-04-05T06:59:00.000 1 0 0\n1997-04-05T07:03:00.000 2 0 0\n",
        )
        .unwrap();
        let yaml = format!(
            "data_dir: {}
bodies:
  - naif_id: 504
    name: Callisto
    pole_ra: [268.72, -0.009]
    pole_dec: [64.83, 0.003]
    prime_meridian: [259.51, 21.5710715]
encounters:
  - id: C9
    target: 504
    attitude: nowhere.tab
    pointing: epd.tab
    trajectory: traj.tab
",
            dir.display()
        );
        let config = Config::from_str(&yaml).unwrap();
        assert!(matches!(
            EncounterData::load(&config, "C9"),
            Err(PipelineError::Records(_))
        ));
        fs::remove_dir_all(&dir).ok();
    }
}
