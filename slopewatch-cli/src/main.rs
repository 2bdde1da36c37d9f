//! Slopewatch CLI - landslide susceptibility assessment

#![deny(warnings)]

// Global invariants enforced:
// - Output order matches input order
// - Identical input and seed yield byte-for-byte identical output
// - stdout carries only rendered results; status and logs go to stderr

use anyhow::Context;
use clap::{Parser, Subcommand};
use slopewatch_core::config::{self, ResolvedConfig};
use slopewatch_core::presets::{DEFAULT_CENTER, LOCATIONS, SCENARIOS};
use slopewatch_core::report::{render_soil_profiles, render_zone_table};
use slopewatch_core::{
    assess_batch, render_json, render_text, AssessmentOptions, AssessmentReport, RawSample,
    SoilCategory,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slopewatch")]
#[command(about = "Landslide susceptibility scoring from rainfall, terrain, soil and location")]
#[command(version = env!("SLOPEWATCH_VERSION"))]
struct Cli {
    /// Log pipeline stages to stderr (overrides RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one sample from flags, or records from a JSON file
    Assess {
        /// Annual rainfall in mm
        #[arg(long)]
        rainfall: Option<f64>,

        /// Recent precipitation in mm
        #[arg(long)]
        precipitation: Option<f64>,

        /// Slope in degrees
        #[arg(long)]
        slope: Option<f64>,

        /// Elevation in meters
        #[arg(long)]
        elevation: Option<f64>,

        /// Free-text soil description (e.g. "Clay soil")
        #[arg(long)]
        soil: Option<String>,

        /// Typed soil category (overrides keyword matching on --soil)
        #[arg(long)]
        soil_category: Option<SoilArg>,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        /// JSON file holding one record or an array of records
        #[arg(long, conflicts_with_all = ["rainfall", "precipitation", "slope", "elevation", "soil", "soil_category", "lat", "lng"])]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Add bounded random noise to the score (overrides config file)
        #[arg(long)]
        jitter: bool,

        /// Jitter seed for reproducible runs (implies --jitter)
        #[arg(long)]
        seed: Option<u64>,

        /// Include the per-factor score breakdown and matched zone
        #[arg(long)]
        explain: bool,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run the built-in sample scenarios at one location
    Scenarios {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_CENTER.0)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_CENTER.1)]
        lng: f64,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the active zone table, or locate a point in it
    Zones {
        /// Latitude of a point to locate
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,

        /// Longitude of a point to locate
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,

        /// Classify the built-in sample locations and list their recorded incidents
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        sample_locations: bool,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List soil profiles
    Soils,
    /// Validate or show a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without assessing anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SoilArg {
    Clay,
    Silt,
    Loam,
    Sand,
    Rock,
}

impl From<SoilArg> for SoilCategory {
    fn from(arg: SoilArg) -> Self {
        match arg {
            SoilArg::Clay => SoilCategory::Clay,
            SoilArg::Silt => SoilCategory::Silt,
            SoilArg::Loam => SoilCategory::Loam,
            SoilArg::Sand => SoilCategory::Sand,
            SoilArg::Rock => SoilCategory::Rock,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Assess {
            rainfall,
            precipitation,
            slope,
            elevation,
            soil,
            soil_category,
            lat,
            lng,
            input,
            format,
            jitter,
            seed,
            explain,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;

            let records = match input {
                Some(path) => load_records(&path)?,
                None => {
                    let mut raw = RawSample::from_numbers(
                        rainfall,
                        precipitation,
                        slope,
                        elevation,
                        soil,
                        lat,
                        lng,
                    );
                    raw.soil_category = soil_category.map(SoilCategory::from);
                    vec![raw]
                }
            };

            // --seed alone is enough to ask for jitter
            let jitter_seed = resolved.effective_jitter_seed(jitter || seed.is_some(), seed);
            if let Some(s) = jitter_seed {
                eprintln!("Jitter seed: {}", s);
            }
            let options = AssessmentOptions::from_config(&resolved, jitter_seed);

            let results = assess_batch(&records, &options);
            let total = results.len();

            let mut reports = Vec::with_capacity(total);
            let mut failures = Vec::new();
            for (i, (raw, result)) in records.iter().zip(results).enumerate() {
                match result {
                    Ok((assessment, breakdown)) => {
                        let mut report = AssessmentReport::new(assessment);
                        if explain {
                            report = report.explained(breakdown, zone_name(&resolved, raw));
                        }
                        reports.push(report);
                    }
                    Err(e) => failures.push((i, e)),
                }
            }

            if !reports.is_empty() {
                emit(&reports, format);
            }

            match failures.as_slice() {
                [] => {}
                [(_, e)] if total == 1 => anyhow::bail!("{}", e),
                _ => {
                    for (i, e) in &failures {
                        eprintln!("record {}: {}", i, e);
                    }
                    anyhow::bail!(
                        "{} of {} records failed validation",
                        failures.len(),
                        total
                    );
                }
            }
        }
        Commands::Scenarios {
            lat,
            lng,
            format,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let options = AssessmentOptions::from_config(&resolved, None);

            let records: Vec<RawSample> = SCENARIOS.iter().map(|s| s.to_raw(lat, lng)).collect();
            let results = assess_batch(&records, &options);

            let mut reports = Vec::with_capacity(results.len());
            for (scenario, result) in SCENARIOS.iter().zip(results) {
                let (assessment, _) = result
                    .with_context(|| format!("scenario '{}' failed validation", scenario.name))?;
                reports.push(AssessmentReport::new(assessment).with_title(format!(
                    "{} - {} (expected: {})",
                    scenario.name, scenario.terrain, scenario.expected
                )));
            }
            emit(&reports, format);
        }
        Commands::Zones {
            lat,
            lng,
            sample_locations,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;

            if let (Some(lat), Some(lng)) = (lat, lng) {
                println!("{}", locate_line(&resolved, lat, lng));
            } else if sample_locations {
                for location in &LOCATIONS {
                    println!(
                        "{:<28} {}",
                        location.name,
                        locate_line(&resolved, location.latitude, location.longitude)
                    );
                    for incident in location.incidents() {
                        println!(
                            "{:<28}   {} {} ({} casualties, {} sq km): {}",
                            "",
                            incident.date,
                            incident.severity,
                            incident.casualties,
                            incident.area_affected_sq_km,
                            incident.cause
                        );
                    }
                }
            } else {
                print!("{}", render_zone_table(&resolved.zones));
            }
        }
        Commands::Soils => {
            print!("{}", render_soil_profiles());
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("Jitter:");
                println!("  enabled: {}", resolved.jitter_enabled);
                println!("  amplitude: {}", resolved.jitter_amplitude);
                println!(
                    "  seed: {}",
                    resolved
                        .jitter_seed
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "random".to_string())
                );
                println!();
                println!(
                    "Zones ({}):",
                    if resolved.zones.is_builtin() {
                        "built-in"
                    } else {
                        "custom"
                    }
                );
                println!("  allow_ambiguous_overlap: {}", resolved.allow_ambiguous_overlap);
                for line in render_zone_table(&resolved.zones).lines() {
                    println!("  {}", line);
                }
            }
        },
    }

    Ok(())
}

/// Install the stderr subscriber; `--verbose` wins over `RUST_LOG`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

/// Load config from the working directory or an explicit path
fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let project_root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&project_root, config_path)
        .context("failed to load configuration")?;

    if let Some(path) = &resolved.config_path {
        eprintln!("Using config: {}", path.display());
    }
    Ok(resolved)
}

/// Read one JSON record or an array of records
fn load_records(path: &Path) -> anyhow::Result<Vec<RawSample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse input file: {}", path.display()))?;

    let parsed: serde_json::Result<Vec<RawSample>> = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value),
        _ => serde_json::from_value::<RawSample>(value).map(|raw| vec![raw]),
    };
    let records = parsed
        .with_context(|| format!("input file is not a sample record: {}", path.display()))?;

    if records.is_empty() {
        anyhow::bail!("input file contains no records: {}", path.display());
    }
    Ok(records)
}

fn zone_name(resolved: &ResolvedConfig, raw: &RawSample) -> Option<String> {
    let sample = raw.validate().ok()?;
    resolved
        .zones
        .locate(sample.latitude, sample.longitude)
        .map(|z| z.name.to_string())
}

fn locate_line(resolved: &ResolvedConfig, lat: f64, lng: f64) -> String {
    match resolved.zones.locate(lat, lng) {
        Some(zone) => format!("({}, {}) -> {} ({})", lat, lng, zone.name, zone.base_risk),
        None => format!(
            "({}, {}) -> outside all zones ({})",
            lat,
            lng,
            resolved.zones.classify(lat, lng)
        ),
    }
}

fn emit(reports: &[AssessmentReport], format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(reports)),
        OutputFormat::Json => println!("{}", render_json(reports)),
    }
}
