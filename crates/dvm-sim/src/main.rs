//! Offline harness: runs the migration engine on command-line scenarios and
//! prints the results as JSON on stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dvm_core::coords::LatLon;
use dvm_core::fleet::{FleetSimulator, FleetSnapshot, FleetSummary};
use dvm_core::impact::DvmStatus;
use dvm_core::light::{light_at_depth_for, OceanZone, Wavelength};
use dvm_core::site::SiteRecord;
use dvm_core::sources::{SourceCatalog, SourceType};
use dvm_core::species::{EnergyBalance, FeedingResult};
use dvm_core::{
    dvm_status, feeding_probability, light_profile, DayCycle, DvmModel, MigrationResult, ModelParams, Region,
    Scenario, Severity, SpeciesCatalog, WaterClarity,
};
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "dvm-sim", about = "Diel vertical migration engine, command-line runner")]
struct Args {
    /// Model parameters JSON file (any subset of fields).
    #[arg(short, long, global = true)]
    params: Option<PathBuf>,

    /// Species catalog JSON file. Defaults to the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate 24 hours for one species, or a single hour with --hour.
    Day {
        /// Species id, e.g. copepods.
        #[arg(required_unless_present = "scenario")]
        species: Option<String>,

        /// Scenario JSON file; replaces the positional arguments.
        #[arg(long, conflicts_with = "species")]
        scenario: Option<PathBuf>,

        /// Artificial surface light (lux).
        #[arg(short, long, default_value_t = 0.0)]
        lux: f64,

        #[arg(short, long, default_value = "moderate")]
        clarity: WaterClarity,

        #[arg(long)]
        hour: Option<f64>,
    },
    /// Sample light against depth.
    Profile {
        /// Surface light (lux).
        surface: f64,

        #[arg(short, long, default_value_t = 1000.0)]
        max_depth: f64,

        #[arg(short, long, default_value_t = 50.0)]
        step: f64,

        #[arg(short, long, default_value = "moderate")]
        clarity: WaterClarity,

        /// Attenuate a single colour instead of white light.
        #[arg(short, long)]
        wavelength: Option<Wavelength>,
    },
    /// Biodiversity score discount for a light level.
    Impact {
        lux: f64,

        #[arg(short, long, default_value_t = 100.0)]
        score: f64,

        #[arg(long, default_value_t = 12.0)]
        hours: f64,
    },
    /// Carbon transport lost to reduced migration.
    Carbon {
        /// Reduction in migration (%).
        reduction: f64,

        #[arg(short, long, default_value_t = 1.0)]
        area_km2: f64,
    },
    /// List catalog species, optionally for one region.
    Species {
        #[arg(short, long)]
        region: Option<Region>,
    },
    /// List light sources, or the combined pollution at --lat/--lon.
    Sources {
        #[arg(short = 't', long = "type")]
        kind: Option<SourceType>,

        #[arg(short, long)]
        impact: Option<Severity>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Run the monitoring fleet for a number of reporting intervals.
    Fleet {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        #[arg(short, long, default_value_t = 12)]
        ticks: u64,
    },
    /// Assess site records from a JSON file against their regional species.
    Site {
        file: PathBuf,

        #[arg(long, default_value_t = 0.0)]
        hour: f64,
    },
}

// ── Reports ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayReport<'a> {
    species: &'a str,
    clarity: WaterClarity,
    artificial_lux: f64,
    migration_distance: f64,
    energy: Option<EnergyBalance>,
    #[serde(flatten)]
    day: DayCycle,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstantReport<'a> {
    species: &'a str,
    hour: f64,
    migration: MigrationResult,
    feeding: FeedingResult,
    status: DvmStatus,
}

#[derive(Serialize)]
struct FleetReport<'a> {
    summary: FleetSummary,
    snapshot: &'a FleetSnapshot,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColourSample {
    depth: f64,
    light: f64,
    zone: OceanZone,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_params(path: Option<&Path>) -> Result<ModelParams> {
    match path {
        Some(p) => ModelParams::from_file(p).with_context(|| format!("loading params from {}", p.display())),
        None => Ok(ModelParams::default()),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<SpeciesCatalog> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            let catalog = SpeciesCatalog::from_json(&text).with_context(|| format!("parsing {}", p.display()))?;
            eprintln!("Loaded {} species from {}", catalog.len(), p.display());
            Ok(catalog)
        }
        None => Ok(SpeciesCatalog::builtin()),
    }
}

fn run_day(
    model: &DvmModel,
    catalog: &SpeciesCatalog,
    species_id: &str,
    lux: f64,
    clarity: WaterClarity,
    hour: Option<f64>,
) -> Result<()> {
    let species = catalog.require(species_id)?;

    if let Some(hour) = hour {
        let migration = model.migration_depth(hour, lux, species, clarity);
        let feeding = feeding_probability(migration.current_depth, migration.light_at_depth, species, hour);
        return emit(&InstantReport {
            species: &species.id,
            hour,
            status: dvm_status(&migration),
            migration,
            feeding,
        });
    }

    let day = model.simulate_day(species, lux, clarity);
    let energy = day
        .energy_balance(species)
        .map_err(|e| log::warn!("no energy balance for {}: {e}", species.id))
        .ok();
    if day.summary.is_disrupted {
        eprintln!(
            "{}: disrupted, max suppression {:.0} m",
            species.id, day.summary.max_suppression_depth
        );
    }
    emit(&DayReport {
        species: &species.id,
        clarity,
        artificial_lux: lux,
        migration_distance: day.migration_distance(),
        energy,
        day,
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let params = load_params(args.params.as_deref())?;
    let model = DvmModel::new(params)?;

    match args.command {
        Command::Day { species, scenario, lux, clarity, hour } => {
            let catalog = load_catalog(args.catalog.as_deref())?;
            match (scenario, species) {
                (Some(path), _) => {
                    let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
                    let sc = Scenario::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
                    let model = match &sc.params {
                        Some(p) => DvmModel::new(p.clone())?,
                        None => model,
                    };
                    run_day(&model, &catalog, &sc.species, sc.artificial_lux, sc.clarity, sc.hour.or(hour))
                }
                (None, Some(id)) => run_day(&model, &catalog, &id, lux, clarity, hour),
                (None, None) => bail!("either a species id or --scenario is required"),
            }
        }

        Command::Profile { surface, max_depth, step, clarity, wavelength } => match wavelength {
            None => emit(&light_profile(surface, max_depth, step, clarity)?),
            Some(w) => {
                let samples: Vec<ColourSample> = light_profile(surface, max_depth, step, clarity)?
                    .into_iter()
                    .map(|s| ColourSample {
                        depth: s.depth,
                        light: light_at_depth_for(surface, s.depth, clarity, w),
                        zone: s.zone,
                    })
                    .collect();
                emit(&samples)
            }
        },

        Command::Impact { lux, score, hours } => emit(&dvm_core::biodiversity_impact(lux, score, hours)),

        Command::Carbon { reduction, area_km2 } => emit(&dvm_core::carbon_impact(reduction, area_km2)),

        Command::Species { region } => {
            let catalog = load_catalog(args.catalog.as_deref())?;
            match region {
                Some(r) => emit(&catalog.by_region(r)),
                None => emit(&catalog.as_slice()),
            }
        }

        Command::Sources { kind, impact, lat, lon } => {
            let catalog = SourceCatalog::builtin();
            if let (Some(lat), Some(lon)) = (lat, lon) {
                return emit(&catalog.total_light_pollution(LatLon::new(lat, lon)));
            }
            let selected: Vec<_> = catalog
                .all()
                .iter()
                .filter(|s| kind.map_or(true, |k| s.kind == k))
                .filter(|s| impact.map_or(true, |i| s.impact == i))
                .collect();
            eprintln!("{} of {} sources", selected.len(), catalog.all().len());
            emit(&selected)
        }

        Command::Fleet { seed, ticks } => {
            let mut sim = FleetSimulator::builtin(seed);
            eprintln!("Running fleet for {ticks} ticks (seed {seed}) ...");
            let snapshot = sim.run(ticks);
            let summary = snapshot.summary();
            eprintln!(
                "{} devices: {} active, {} warning, {} offline",
                summary.total_devices, summary.active_devices, summary.warning_devices, summary.offline_devices
            );
            emit(&FleetReport { summary, snapshot: &snapshot })
        }

        Command::Site { file, hour } => {
            let catalog = load_catalog(args.catalog.as_deref())?;
            let text = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let sites: Vec<SiteRecord> =
                serde_json::from_str(&text).with_context(|| format!("parsing sites in {}", file.display()))?;
            let assessments: Vec<_> = sites
                .iter()
                .map(|site| model.assess_site_by_region(&catalog, site, hour))
                .collect();
            emit(&assessments)
        }
    }
}
