mod attitude;
mod config;
mod ephemeris;
mod geometry;
mod pipeline;
mod records;

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Config;
use crate::ephemeris::Ephemeris;
use crate::pipeline::{EncounterData, Pipeline, PipelineError, RunSummary};
use crate::records::{OutputFormat, RecordError, RecordWriter};

const DEFAULT_CONFIG: &str = "config/encounters.yaml";

#[derive(Parser)]
#[command(name = "flyby-pointing")]
#[command(about = "Detector look directions in moon-fixed frames for Galileo flybys")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured encounters
    List {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Load an encounter's input files and report what they cover
    Validate {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        #[arg(short, long)]
        encounter: String,
    },
    /// Compute look directions and spacecraft positions for an encounter
    Run {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        #[arg(short, long)]
        encounter: String,
        #[arg(short, long, default_value = "out.txt")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { config } => list(&config),
        Commands::Validate { config, encounter } => validate(&config, &encounter),
        Commands::Run {
            config,
            encounter,
            out,
            format,
        } => run(&config, &encounter, &out, format),
    }
}

fn list(path: &Path) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} encounters:", config.encounters.len());
    for encounter in &config.encounters {
        let target = config
            .bodies
            .iter()
            .find(|b| b.naif_id == encounter.target)
            .map(|b| b.name.as_str())
            .unwrap_or("?");
        println!("  {:>4}: {} ({})", encounter.id, target, encounter.target);
    }
    ExitCode::SUCCESS
}

fn validate(path: &Path, encounter: &str) -> ExitCode {
    let data = match Config::from_file(path)
        .map_err(PipelineError::from)
        .and_then(|config| EncounterData::load(&config, encounter))
    {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Validation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (start, end) = data.attitude.span();
    let occluded = data
        .pointing
        .iter()
        .filter(|s| s.motor_step == geometry::OCCLUDED_STEP)
        .count();
    let outside = data
        .pointing
        .iter()
        .filter(|s| data.attitude.find_bracket(s.et).is_err())
        .count();

    println!(
        "Encounter {} ({}) is valid",
        data.encounter.id, data.target_name
    );
    println!(
        "  attitude: {} samples, {:.3} h .. {:.3} h UTC",
        data.attitude.len(),
        data.ephemeris.time_of_day_hours(start),
        data.ephemeris.time_of_day_hours(end)
    );
    println!(
        "  pointing: {} samples, {} occluded, {} outside attitude coverage",
        data.pointing.len(),
        occluded,
        outside
    );
    ExitCode::SUCCESS
}

fn run(path: &Path, encounter: &str, out: &Path, format: OutputFormat) -> ExitCode {
    match run_encounter(path, encounter, out, format) {
        Ok(summary) => {
            println!(
                "Wrote {} records to {} ({} occluded samples skipped)",
                summary.emitted,
                out.display(),
                summary.occluded
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_encounter(
    path: &Path,
    encounter: &str,
    out: &Path,
    format: OutputFormat,
) -> Result<RunSummary, PipelineError> {
    let config = Config::from_file(path)?;
    let data = EncounterData::load(&config, encounter)?;

    let file = File::create(out).map_err(|source| RecordError::Io {
        file: out.display().to_string(),
        source,
    })?;
    let mut writer = RecordWriter::new(BufWriter::new(file), format);

    let pipeline = Pipeline::new(
        data.attitude,
        &data.ephemeris,
        config.spacecraft.naif_id,
        data.encounter.target,
    )?
    .with_compatibility(config.compatibility);
    log::info!(
        "Compatibility mode {}, output frame {}",
        config.compatibility,
        pipeline.target_frame()
    );

    let summary = pipeline.run(&data.pointing, |record| Ok(writer.write(&record)?))?;
    log::debug!("{} records written", writer.written());
    writer.finish()?;

    Ok(summary)
}
