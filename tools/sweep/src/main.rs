//! Sensitivity sweep: simulates a full day for every catalog species at each
//! artificial light level and water clarity, then aggregates how many species
//! are disrupted per condition. Output: data/sweep.json

use anyhow::{bail, Context, Result};
use clap::Parser;
use dvm_core::impact::DisruptionLevel;
use dvm_core::{DvmModel, ModelParams, Region, Species, SpeciesCatalog, WaterClarity};
use rayon::prelude::*;
use serde::Serialize;
use std::{fs, path::Path};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sweep", about = "Sweep artificial light x clarity x species and summarise disruption")]
struct Args {
    /// Comma-separated artificial light levels (lux).
    #[arg(short, long, default_value = "0,0.01,0.1,1,10,100,1000")]
    lux: String,

    /// Restrict to the species of one region.
    #[arg(short, long)]
    region: Option<Region>,

    /// Model parameters JSON file.
    #[arg(short, long)]
    params: Option<String>,

    /// Output JSON file.
    #[arg(short, long, default_value = "data/sweep.json")]
    output: String,
}

// ── Output types ──────────────────────────────────────────────────────────────

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct SweepRow {
    species: String,
    clarity: WaterClarity,
    artificial_lux: f64,
    effective_feeding_hours: u32,
    average_depth: f64,
    max_suppression_depth: f64,
    level: DisruptionLevel,
    is_disrupted: bool,
    light_limited_hours: usize,
    net_energy: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConditionSummary {
    clarity: WaterClarity,
    artificial_lux: f64,
    n_species: usize,
    n_disrupted: usize,
    mean_suppression: f64,
    mean_feeding_hours: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepOutput {
    params: ModelParams,
    conditions: Vec<ConditionSummary>,
    rows: Vec<SweepRow>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_lux_list(s: &str) -> Result<Vec<f64>> {
    let levels = s
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f64>().with_context(|| format!("bad lux value `{t}`")))
        .collect::<Result<Vec<f64>>>()?;
    if levels.is_empty() {
        bail!("no lux levels given");
    }
    if let Some(neg) = levels.iter().find(|&&v| v < 0.0) {
        bail!("lux levels must be non-negative, got {neg}");
    }
    Ok(levels)
}

fn run_one(model: &DvmModel, species: &Species, clarity: WaterClarity, lux: f64) -> SweepRow {
    let day = model.simulate_day(species, lux, clarity);
    let net_energy = day.energy_balance(species).ok().map(|e| e.net_energy);
    SweepRow {
        species: species.id.clone(),
        clarity,
        artificial_lux: lux,
        effective_feeding_hours: day.summary.effective_feeding_hours,
        average_depth: day.summary.average_depth,
        max_suppression_depth: day.summary.max_suppression_depth,
        level: DisruptionLevel::from_suppression(day.summary.max_suppression_depth),
        is_disrupted: day.summary.is_disrupted,
        light_limited_hours: day.hourly_data.iter().filter(|h| h.migration.light_limited).count(),
        net_energy,
    }
}

fn summarise(rows: &[SweepRow], clarity: WaterClarity, lux: f64) -> ConditionSummary {
    let group: Vec<&SweepRow> = rows
        .iter()
        .filter(|r| r.clarity == clarity && r.artificial_lux == lux)
        .collect();
    let n = group.len().max(1) as f64;
    ConditionSummary {
        clarity,
        artificial_lux: lux,
        n_species: group.len(),
        n_disrupted: group.iter().filter(|r| r.is_disrupted).count(),
        mean_suppression: group.iter().map(|r| r.max_suppression_depth).sum::<f64>() / n,
        mean_feeding_hours: group.iter().map(|r| r.effective_feeding_hours as f64).sum::<f64>() / n,
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let levels = parse_lux_list(&args.lux)?;
    let params = match &args.params {
        Some(p) => ModelParams::from_file(Path::new(p)).with_context(|| format!("loading {p}"))?,
        None => ModelParams::default(),
    };
    let model = DvmModel::new(params.clone())?;

    let catalog = SpeciesCatalog::builtin();
    let species: Vec<&Species> = match args.region {
        Some(r) => catalog.by_region(r),
        None => catalog.dvm_participants(),
    };

    let levels_ref = &levels;
    let jobs: Vec<(&Species, WaterClarity, f64)> = species
        .iter()
        .flat_map(|&s| {
            WaterClarity::ALL
                .into_iter()
                .flat_map(move |c| levels_ref.iter().map(move |&l| (s, c, l)))
        })
        .collect();

    eprintln!(
        "Sweeping {} species x {} clarities x {} light levels ({} runs) ...",
        species.len(),
        WaterClarity::ALL.len(),
        levels.len(),
        jobs.len()
    );

    let rows: Vec<SweepRow> = jobs
        .par_iter()
        .map(|&(s, c, l)| run_one(&model, s, c, l))
        .collect();

    eprintln!("\n{:<12} {:>10} {:>10} {:>12} {:>10}", "Clarity", "Lux", "Disrupted", "MeanSupp(m)", "FeedHrs");
    eprintln!("{}", "-".repeat(58));

    let mut conditions = Vec::new();
    for clarity in WaterClarity::ALL {
        for &lux in &levels {
            let c = summarise(&rows, clarity, lux);
            eprintln!(
                "{:<12} {:>10} {:>6}/{:<3} {:>12.1} {:>10.1}",
                clarity.key(),
                lux,
                c.n_disrupted,
                c.n_species,
                c.mean_suppression,
                c.mean_feeding_hours
            );
            conditions.push(c);
        }
    }

    let out_path = Path::new(&args.output);
    if let Some(dir) = out_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let output = SweepOutput { params, conditions, rows };
    fs::write(out_path, serde_json::to_string_pretty(&output)?)?;
    eprintln!("\nDone. {} rows -> {}", output.rows.len(), out_path.display());
    Ok(())
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lux_list() {
        assert_eq!(parse_lux_list("0, 1.5,100").unwrap(), vec![0.0, 1.5, 100.0]);
        assert!(parse_lux_list("").is_err());
        assert!(parse_lux_list("1,abc").is_err());
        assert!(parse_lux_list("-3").is_err());
    }

    #[test]
    fn test_dark_sweep_has_no_disruption() {
        let model = DvmModel::default();
        let catalog = SpeciesCatalog::builtin();
        let rows: Vec<SweepRow> = catalog
            .dvm_participants()
            .into_iter()
            .map(|s| run_one(&model, s, WaterClarity::Clear, 0.0))
            .collect();
        let c = summarise(&rows, WaterClarity::Clear, 0.0);
        assert_eq!(c.n_species, rows.len());
        assert_eq!(c.n_disrupted, 0);
        assert_eq!(c.mean_suppression, 0.0);
    }

    #[test]
    fn test_bright_light_disrupts_more() {
        let model = DvmModel::default();
        let catalog = SpeciesCatalog::builtin();
        let count = |lux: f64| {
            catalog
                .dvm_participants()
                .into_iter()
                .map(|s| run_one(&model, s, WaterClarity::VeryTurbid, lux))
                .filter(|r| r.is_disrupted)
                .count()
        };
        assert!(count(1000.0) >= count(0.01), "disruption fell with more light");
    }
}
