//! Where an organism sits in the water column, and how well it feeds there.
//!
//! Organisms seek the shallowest depth at which light falls to their
//! sensitivity threshold. Artificial light raises the surface budget and so
//! pushes that refuge deeper; the difference from the natural refuge is the
//! suppression depth.

use serde::{Deserialize, Serialize};

use crate::error::{DvmError, Result};
use crate::light::{light_at_depth, penetration_depth, LightEnvironment, WaterClarity};
use crate::params::{DepthSearch, ModelParams};

use super::phase::MigrationPhase;
use super::Species;

// ── Results ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    /// Phase-adjusted target depth (m).
    pub current_depth: f64,
    /// Refuge depth under natural light only (m).
    pub natural_depth: f64,
    /// Refuge depth under natural plus artificial light (m).
    pub optimal_depth: f64,
    /// `optimal_depth − natural_depth`, never negative.
    pub suppression_depth: f64,
    pub phase: MigrationPhase,
    pub light_at_surface: f64,
    pub light_at_depth: f64,
    pub is_disrupted: bool,
    /// The polluted search hit the bottom of the species' range without
    /// finding darkness. Suppression may read 0 in this state when the natural
    /// search saturated too.
    pub light_limited: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingResult {
    /// In [0, 1].
    pub probability: f64,
    pub base_probability: f64,
    pub light_penalty: f64,
    pub depth_penalty: f64,
    pub phase: MigrationPhase,
    /// Depth lies within the species' night feeding band.
    pub in_optimal_zone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyStatus {
    Thriving,
    Surviving,
    Stressed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyBalance {
    pub energy_gained: f64,
    pub migration_cost: f64,
    pub basal_cost: f64,
    pub net_energy: f64,
    pub efficiency: f64,
    pub sustainable: bool,
    pub status: EnergyStatus,
}

// ── Refuge search ─────────────────────────────────────────────────────────────

/// Outcome of looking for the first dark-enough depth.
#[derive(Debug, Clone, Copy)]
struct Refuge {
    depth: f64,
    found: bool,
}

/// Scans longer than this fall back to the closed form.
const MAX_SCAN_STEPS: usize = 100_000;

fn find_refuge(
    surface_lux: f64,
    species: &Species,
    clarity: WaterClarity,
    params: &ModelParams,
) -> Refuge {
    let threshold = species.light_sensitivity;
    let max_depth = species.day_depth.max;

    if params.depth_search == DepthSearch::Scan {
        let step = params.scan_step_m;
        let steps = max_depth.max(0.0) / step + 1e-9;
        if step > 0.0 && steps.is_finite() && steps < MAX_SCAN_STEPS as f64 {
            let n = steps.floor() as usize;
            let mut last = 0.0;
            for i in 0..=n {
                let depth = i as f64 * step;
                if light_at_depth(surface_lux, depth, clarity) <= threshold {
                    return Refuge { depth, found: true };
                }
                last = depth;
            }
            return Refuge { depth: last, found: false };
        }
        log::debug!("scan step {step} m unusable over {max_depth} m, using closed form");
    }

    match penetration_depth(surface_lux, threshold, clarity) {
        Ok(z) if z <= max_depth => Refuge { depth: z, found: true },
        _ => Refuge { depth: max_depth.max(0.0), found: false },
    }
}

// ── Operations ────────────────────────────────────────────────────────────────

/// Migration state of `species` at `hour` with default model parameters.
pub fn migration_depth(
    hour: f64,
    artificial_lux: f64,
    species: &Species,
    clarity: WaterClarity,
) -> MigrationResult {
    migration_depth_with(&ModelParams::default(), hour, artificial_lux, species, clarity)
}

/// Migration state of `species` at `hour`.
///
/// 1. Find the refuge depth under natural + artificial light and under
///    natural light alone.
/// 2. At night (ascending/surface) the target is the refuge clamped into the
///    night band; by day it is the refuge floored at the day band minimum,
///    with no upper limit.
pub fn migration_depth_with(
    params: &ModelParams,
    hour: f64,
    artificial_lux: f64,
    species: &Species,
    clarity: WaterClarity,
) -> MigrationResult {
    debug_assert!(species.is_well_formed(), "malformed species `{}`", species.id);

    let env = LightEnvironment::at(hour, params.moon_phase, artificial_lux);
    let total = env.total_lux();

    let optimal = find_refuge(total, species, clarity, params);
    let natural = find_refuge(env.natural_lux, species, clarity, params);
    if !optimal.found {
        log::debug!(
            "{}: no refuge within {} m at {total:.3} lux surface",
            species.id,
            species.day_depth.max
        );
    }

    let phase = MigrationPhase::from_hour(hour);
    let current_depth = if phase.is_night() {
        species.night_depth.clamp(optimal.depth)
    } else {
        optimal.depth.max(species.day_depth.min)
    };

    let suppression_depth = (optimal.depth - natural.depth).max(0.0);

    MigrationResult {
        current_depth,
        natural_depth: natural.depth,
        optimal_depth: optimal.depth,
        suppression_depth,
        phase,
        light_at_surface: total,
        light_at_depth: light_at_depth(total, current_depth, clarity),
        is_disrupted: suppression_depth > params.disruption_threshold_m,
        light_limited: !optimal.found,
    }
}

/// Probability that `species` feeds successfully at `depth` under
/// `light_lux`.
///
/// Base 0.9 inside the night band at night, 0.3 outside it, 0.1 by day; minus
/// a light penalty (≤ 0.5) and a depth penalty (≤ 0.4); floored at 0.
pub fn feeding_probability(depth: f64, light_lux: f64, species: &Species, hour: f64) -> FeedingResult {
    let phase = MigrationPhase::from_hour(hour);
    let in_optimal_zone = species.night_depth.contains(depth);

    let base_probability = match (phase.is_night(), in_optimal_zone) {
        (true, true)  => 0.9,
        (true, false) => 0.3,
        (false, _)    => 0.1,
    };

    // Too much light raises predation risk.
    let light_penalty = (light_lux.max(0.0) / species.light_sensitivity * 0.01).min(0.5);
    // Food becomes scarcer with depth.
    let depth_penalty = (depth.max(0.0) / 500.0).min(0.4);

    let probability = (base_probability - light_penalty - depth_penalty).clamp(0.0, 1.0);

    FeedingResult {
        probability,
        base_probability,
        light_penalty,
        depth_penalty,
        phase,
        in_optimal_zone,
    }
}

/// Daily energy budget in arbitrary units.
///
/// Fails when the species has zero metabolic rate and no migration cost,
/// since efficiency would be a division by zero.
pub fn energy_balance(feeding_hours: f64, migration_distance_m: f64, species: &Species) -> Result<EnergyBalance> {
    let energy_gained = feeding_hours * species.feeding_rate * 100.0;
    let migration_cost = migration_distance_m * species.metabolic_rate * 0.5;
    let basal_cost = 24.0 * species.metabolic_rate * 10.0;
    let total_cost = migration_cost + basal_cost;

    if total_cost == 0.0 {
        return Err(DvmError::ZeroEnergyCost { species: species.id.clone() });
    }

    let net_energy = energy_gained - total_cost;
    let status = if net_energy > 20.0 {
        EnergyStatus::Thriving
    } else if net_energy > 0.0 {
        EnergyStatus::Surviving
    } else {
        EnergyStatus::Stressed
    };

    Ok(EnergyBalance {
        energy_gained,
        migration_cost,
        basal_cost,
        net_energy,
        efficiency: energy_gained / total_cost,
        sustainable: net_energy > 0.0,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesCatalog;
    use approx::assert_relative_eq;

    fn species(id: &str) -> Species {
        SpeciesCatalog::builtin().require(id).unwrap().clone()
    }

    #[test]
    fn no_artificial_light_means_no_suppression() {
        let cat = SpeciesCatalog::builtin();
        for s in cat.iter() {
            for clarity in WaterClarity::ALL {
                for h in 0..24 {
                    let m = migration_depth(h as f64, 0.0, s, clarity);
                    assert_eq!(m.suppression_depth, 0.0, "{} {clarity} {h}h", s.id);
                    assert!(!m.is_disrupted);
                }
            }
        }
    }

    /// Turbid water at night lets moonlight fade within the first metres.
    #[test]
    fn night_refuge_found_in_turbid_water() {
        let jelly = species("jellyfishSmall");
        let m = migration_depth(0.0, 0.0, &jelly, WaterClarity::VeryTurbid);
        // 0.3 lux → 0.02 lux needs ln(15)/0.04 ≈ 67.7 m; scan lands on 70 m.
        assert_eq!(m.natural_depth, 70.0);
        assert_eq!(m.optimal_depth, 70.0);
        assert_eq!(m.phase, MigrationPhase::Surface);
        assert_eq!(m.current_depth, 70.0);
        assert!(!m.light_limited);
    }

    #[test]
    fn artificial_light_pushes_refuge_deeper() {
        let jelly = species("jellyfishSmall");
        let m = migration_depth(0.0, 100.0, &jelly, WaterClarity::VeryTurbid);
        // 100.3 lux → 0.02 lux needs ln(5015)/0.04 ≈ 213 m; scan lands on 215 m.
        assert_eq!(m.optimal_depth, 215.0);
        assert_eq!(m.suppression_depth, 145.0);
        assert!(m.is_disrupted);
        // Night target is clamped to the night band.
        assert_eq!(m.current_depth, 100.0);
    }

    #[test]
    fn day_target_is_floored_at_day_band_minimum() {
        let jelly = species("jellyfishSmall");
        let m = migration_depth(12.0, 0.0, &jelly, WaterClarity::VeryTurbid);
        assert_eq!(m.phase, MigrationPhase::Deep);
        assert!(m.current_depth >= jelly.day_depth.min);
    }

    #[test]
    fn saturated_search_reports_band_maximum() {
        let copepods = species("copepods");
        let m = migration_depth(12.0, 0.0, &copepods, WaterClarity::Clear);
        assert_eq!(m.optimal_depth, 400.0);
        assert_eq!(m.natural_depth, 400.0);
        assert_eq!(m.suppression_depth, 0.0);
        assert!(m.light_limited);
    }

    #[test]
    fn closed_form_search_is_continuous() {
        let jelly = species("jellyfishSmall");
        let params = ModelParams { depth_search: DepthSearch::ClosedForm, ..ModelParams::default() };
        let m = migration_depth_with(&params, 0.0, 0.0, &jelly, WaterClarity::VeryTurbid);
        assert_relative_eq!(m.natural_depth, (0.3_f64 / 0.02).ln() / 0.04, max_relative = 1e-9);
        assert!(m.natural_depth < 70.0);
    }

    /// A step too fine (or zero) to scan the day band resolves like the
    /// closed-form search instead of stalling.
    #[test]
    fn degenerate_scan_step_uses_closed_form() {
        let copepods = species("copepods");
        let closed = ModelParams { depth_search: DepthSearch::ClosedForm, ..ModelParams::default() };
        let expected = migration_depth_with(&closed, 12.0, 50.0, &copepods, WaterClarity::Clear);
        for step in [1e-9, 0.0, -1.0, f64::NAN] {
            let params = ModelParams { scan_step_m: step, ..ModelParams::default() };
            let m = migration_depth_with(&params, 12.0, 50.0, &copepods, WaterClarity::Clear);
            assert_eq!(m, expected, "step {step}");
        }
    }

    #[test]
    fn suppression_never_negative() {
        let cat = SpeciesCatalog::builtin();
        for s in cat.iter() {
            for lux in [0.0, 0.01, 1.0, 50.0, 10_000.0] {
                for h in [0.0, 5.5, 6.5, 12.0, 17.5, 21.0] {
                    let m = migration_depth(h, lux, s, WaterClarity::Turbid);
                    assert!(m.suppression_depth >= 0.0);
                }
            }
        }
    }

    #[test]
    fn feeding_base_probabilities() {
        let krill = species("krill");
        let night_in = feeding_probability(40.0, 0.0, &krill, 22.0);
        assert_eq!(night_in.base_probability, 0.9);
        assert!(night_in.in_optimal_zone);
        let night_out = feeding_probability(120.0, 0.0, &krill, 22.0);
        assert_eq!(night_out.base_probability, 0.3);
        let day = feeding_probability(40.0, 0.0, &krill, 12.0);
        assert_eq!(day.base_probability, 0.1);
    }

    #[test]
    fn feeding_penalties_are_capped_and_probability_bounded() {
        let krill = species("krill");
        let f = feeding_probability(1000.0, 1.0e6, &krill, 12.0);
        assert_eq!(f.light_penalty, 0.5);
        assert_eq!(f.depth_penalty, 0.4);
        assert_eq!(f.probability, 0.0);

        let f = feeding_probability(50.0, 0.005, &krill, 23.0);
        assert_relative_eq!(f.light_penalty, 0.01);
        assert_relative_eq!(f.depth_penalty, 0.1);
        assert_relative_eq!(f.probability, 0.79);
    }

    #[test]
    fn energy_balance_statuses() {
        let copepods = species("copepods");
        // gained 8·0.8·100 = 640; migration 400·0.02·0.5 = 4; basal 24·0.02·10 = 4.8
        let e = energy_balance(8.0, 400.0, &copepods).unwrap();
        assert_relative_eq!(e.energy_gained, 640.0);
        assert_relative_eq!(e.migration_cost, 4.0);
        assert_relative_eq!(e.basal_cost, 4.8);
        assert_relative_eq!(e.efficiency, 640.0 / 8.8);
        assert_eq!(e.status, EnergyStatus::Thriving);

        let e = energy_balance(0.0, 400.0, &copepods).unwrap();
        assert_eq!(e.status, EnergyStatus::Stressed);
        assert!(!e.sustainable);
    }

    #[test]
    fn energy_balance_rejects_zero_cost() {
        let mut s = species("salps");
        s.metabolic_rate = 0.0;
        assert!(matches!(energy_balance(5.0, 100.0, &s), Err(DvmError::ZeroEnergyCost { .. })));
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let squid = species("squid");
        let a = migration_depth(18.5, 42.0, &squid, WaterClarity::Clear);
        let b = migration_depth(18.5, 42.0, &squid, WaterClarity::Clear);
        assert_eq!(a, b);
    }
}
