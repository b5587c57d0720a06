//! Full 24-hour migration trace for one species under fixed conditions.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::light::WaterClarity;
use crate::params::ModelParams;
use crate::species::behavior::migration_depth_with;
use crate::species::{energy_balance, feeding_probability, EnergyBalance, MigrationPhase, MigrationResult, Species};

pub const HOURS_PER_DAY: usize = 24;

/// Migration and feeding state at one integer hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRecord {
    pub hour: u32,
    #[serde(flatten)]
    pub migration: MigrationResult,
    pub feeding_probability: f64,
    pub feeding_phase: MigrationPhase,
    pub in_optimal_zone: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    /// Hours whose feeding probability exceeds the effective-feeding threshold.
    pub effective_feeding_hours: u32,
    /// Mean target depth over the 24 hours (m).
    pub average_depth: f64,
    pub max_suppression_depth: f64,
    pub is_disrupted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCycle {
    pub hourly_data: Vec<HourlyRecord>,
    pub summary: DaySummary,
}

impl DayCycle {
    /// Total vertical distance travelled over the day, including the move
    /// from hour 23 back to hour 0.
    pub fn migration_distance(&self) -> f64 {
        let depths: Vec<f64> = self.hourly_data.iter().map(|h| h.migration.current_depth).collect();
        let Some((&first, &last)) = depths.first().zip(depths.last()) else {
            return 0.0;
        };
        let within: f64 = depths.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
        within + (first - last).abs()
    }

    /// Energy budget of the simulated day for `species`.
    pub fn energy_balance(&self, species: &Species) -> Result<EnergyBalance> {
        energy_balance(
            self.summary.effective_feeding_hours as f64,
            self.migration_distance(),
            species,
        )
    }
}

/// Simulate hours 0..23 with default model parameters.
pub fn simulate_day(species: &Species, artificial_lux: f64, clarity: WaterClarity) -> DayCycle {
    simulate_day_with(&ModelParams::default(), species, artificial_lux, clarity)
}

pub fn simulate_day_with(
    params: &ModelParams,
    species: &Species,
    artificial_lux: f64,
    clarity: WaterClarity,
) -> DayCycle {
    let hourly_data: Vec<HourlyRecord> = (0..HOURS_PER_DAY as u32)
        .map(|hour| {
            let h = hour as f64;
            let migration = migration_depth_with(params, h, artificial_lux, species, clarity);
            let feeding = feeding_probability(migration.current_depth, migration.light_at_depth, species, h);
            HourlyRecord {
                hour,
                migration,
                feeding_probability: feeding.probability,
                feeding_phase: feeding.phase,
                in_optimal_zone: feeding.in_optimal_zone,
            }
        })
        .collect();

    let effective_feeding_hours = hourly_data
        .iter()
        .filter(|h| h.feeding_probability > params.effective_feeding_probability)
        .count() as u32;
    let average_depth = hourly_data.iter().map(|h| h.migration.current_depth).sum::<f64>()
        / HOURS_PER_DAY as f64;
    let max_suppression_depth = hourly_data
        .iter()
        .map(|h| h.migration.suppression_depth)
        .fold(0.0, f64::max);

    DayCycle {
        summary: DaySummary {
            effective_feeding_hours,
            average_depth,
            max_suppression_depth,
            is_disrupted: max_suppression_depth > params.day_disruption_threshold_m,
        },
        hourly_data,
    }
}

/// One simulated day per species id, in input order, with default model
/// parameters.
pub fn simulate_catalog(species: &[&Species], artificial_lux: f64, clarity: WaterClarity) -> Vec<(String, DayCycle)> {
    simulate_catalog_with(&ModelParams::default(), species, artificial_lux, clarity)
}

/// Runs on the rayon pool when the `threading` feature is enabled.
pub fn simulate_catalog_with(
    params: &ModelParams,
    species: &[&Species],
    artificial_lux: f64,
    clarity: WaterClarity,
) -> Vec<(String, DayCycle)> {
    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        species
            .par_iter()
            .map(|&s| (s.id.clone(), simulate_day_with(params, s, artificial_lux, clarity)))
            .collect()
    }
    #[cfg(not(feature = "threading"))]
    {
        species
            .iter()
            .map(|&s| (s.id.clone(), simulate_day_with(params, s, artificial_lux, clarity)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesCatalog;

    #[test]
    fn copepods_clear_water_no_pollution_not_disrupted() {
        let cat = SpeciesCatalog::builtin();
        let day = simulate_day(cat.require("copepods").unwrap(), 0.0, WaterClarity::Clear);
        assert_eq!(day.hourly_data.len(), 24);
        assert_eq!(day.summary.max_suppression_depth, 0.0);
        assert!(!day.summary.is_disrupted);
    }

    #[test]
    fn hours_are_in_order() {
        let cat = SpeciesCatalog::builtin();
        let day = simulate_day(cat.require("krill").unwrap(), 5.0, WaterClarity::Moderate);
        let hours: Vec<u32> = day.hourly_data.iter().map(|h| h.hour).collect();
        assert_eq!(hours, (0..24).collect::<Vec<u32>>());
    }

    /// Heavy pollution in turbid water pushes jellyfish far below their
    /// natural night refuge.
    #[test]
    fn strong_light_disrupts_the_day() {
        let cat = SpeciesCatalog::builtin();
        let day = simulate_day(cat.require("jellyfishSmall").unwrap(), 100.0, WaterClarity::VeryTurbid);
        assert!(day.summary.max_suppression_depth > 50.0);
        assert!(day.summary.is_disrupted);
    }

    #[test]
    fn summary_matches_hourly_records() {
        let cat = SpeciesCatalog::builtin();
        let day = simulate_day(cat.require("salps").unwrap(), 2.0, WaterClarity::Turbid);
        let mean = day.hourly_data.iter().map(|h| h.migration.current_depth).sum::<f64>() / 24.0;
        assert!((day.summary.average_depth - mean).abs() < 1e-9);
        let feeding = day.hourly_data.iter().filter(|h| h.feeding_probability > 0.5).count() as u32;
        assert_eq!(day.summary.effective_feeding_hours, feeding);
    }

    #[test]
    fn migration_distance_closes_the_loop() {
        let cat = SpeciesCatalog::builtin();
        let krill = cat.require("krill").unwrap();
        let day = simulate_day(krill, 0.0, WaterClarity::Moderate);
        let d = day.migration_distance();
        // A closed loop covers every excursion twice.
        let max = day.hourly_data.iter().map(|h| h.migration.current_depth).fold(0.0, f64::max);
        let min = day.hourly_data.iter().map(|h| h.migration.current_depth).fold(f64::INFINITY, f64::min);
        assert!(d >= 2.0 * (max - min) - 1e-9);
        assert!(day.energy_balance(krill).is_ok());
    }

    #[test]
    fn catalog_run_preserves_order() {
        let cat = SpeciesCatalog::builtin();
        let species: Vec<&Species> = cat.iter().collect();
        let runs = simulate_catalog(&species, 1.0, WaterClarity::Clear);
        assert_eq!(runs.len(), cat.len());
        for ((id, day), expected) in runs.iter().zip(cat.iter()) {
            assert_eq!(*id, expected.id);
            assert_eq!(*day, simulate_day(expected, 1.0, WaterClarity::Clear));
        }
    }
}
