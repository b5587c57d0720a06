//! Browser bindings. Inputs arrive as JSON strings or plain numbers; results
//! go back as `JsValue` objects with camelCase fields.

use anyhow::{Context, Result};
use dvm_core::cycle::DayCycle;
use dvm_core::fleet::FleetSimulator;
use dvm_core::light::ProfileSample;
use dvm_core::{DvmModel, MigrationResult, Scenario, SpeciesCatalog, WaterClarity};
use js_sys::Float64Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(result: Result<T>) -> Result<JsValue, JsValue> {
    let value = result.map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    serde_wasm_bindgen::to_value(&value).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ── Scenario runs ─────────────────────────────────────────────────────────────

fn run_day(catalog: &SpeciesCatalog, scenario_json: &str) -> Result<DayCycle> {
    let scenario = Scenario::from_json(scenario_json).context("invalid scenario")?;
    let model = DvmModel::new(scenario.params_or_default())?;
    let species = catalog.require(&scenario.species)?;
    Ok(model.simulate_day(species, scenario.artificial_lux, scenario.clarity))
}

fn run_instant(catalog: &SpeciesCatalog, scenario_json: &str) -> Result<MigrationResult> {
    let scenario = Scenario::from_json(scenario_json).context("invalid scenario")?;
    let hour = scenario.hour.context("scenario has no `hour`")?;
    let model = DvmModel::new(scenario.params_or_default())?;
    let species = catalog.require(&scenario.species)?;
    Ok(model.migration_depth(hour, scenario.artificial_lux, species, scenario.clarity))
}

fn run_profile(surface_lux: f64, max_depth: f64, step: f64, clarity: &str) -> Result<Vec<ProfileSample>> {
    let clarity = WaterClarity::from_key_or_default(clarity);
    Ok(dvm_core::light_profile(surface_lux, max_depth, step, clarity)?)
}

/// 24-hour trace for `{species, artificialLux, clarity, params?}`.
#[wasm_bindgen]
pub fn simulate_day(scenario_json: &str) -> Result<JsValue, JsValue> {
    to_js(run_day(&SpeciesCatalog::builtin(), scenario_json))
}

/// Migration state at the scenario's `hour`.
#[wasm_bindgen]
pub fn migration_at(scenario_json: &str) -> Result<JsValue, JsValue> {
    to_js(run_instant(&SpeciesCatalog::builtin(), scenario_json))
}

#[wasm_bindgen]
pub fn light_profile(surface_lux: f64, max_depth: f64, step: f64, clarity: &str) -> Result<JsValue, JsValue> {
    to_js(run_profile(surface_lux, max_depth, step, clarity))
}

/// Light values only, for canvas plotting.
#[wasm_bindgen]
pub fn light_curve(surface_lux: f64, max_depth: f64, step: f64, clarity: &str) -> Result<Float64Array, JsValue> {
    let samples = run_profile(surface_lux, max_depth, step, clarity).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    let values: Vec<f64> = samples.iter().map(|s| s.light).collect();
    Ok(Float64Array::from(values.as_slice()))
}

#[wasm_bindgen]
pub fn biodiversity_impact(light_pollution_lux: f64, original_score: f64, duration_hours: f64) -> Result<JsValue, JsValue> {
    to_js(Ok(dvm_core::biodiversity_impact(light_pollution_lux, original_score, duration_hours)))
}

#[wasm_bindgen]
pub fn carbon_impact(dvm_reduction_percent: f64, area_km2: f64) -> Result<JsValue, JsValue> {
    to_js(Ok(dvm_core::carbon_impact(dvm_reduction_percent, area_km2)))
}

#[wasm_bindgen]
pub fn species_catalog() -> Result<JsValue, JsValue> {
    to_js(Ok(SpeciesCatalog::builtin().as_slice().to_vec()))
}

// ── Fleet session ─────────────────────────────────────────────────────────────

/// One dashboard's private fleet simulation.
#[wasm_bindgen]
pub struct FleetSession {
    sim: FleetSimulator,
}

#[wasm_bindgen]
impl FleetSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> FleetSession {
        FleetSession { sim: FleetSimulator::builtin(seed) }
    }

    /// Advance one reporting interval and return the new snapshot.
    pub fn tick(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self.sim.tick();
        to_js(Ok(&*snapshot))
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(Ok(self.sim.snapshot().summary()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_from_scenario_json() {
        let cat = SpeciesCatalog::builtin();
        let day = run_day(&cat, r#"{"species": "krill", "artificialLux": 5, "clarity": "clear"}"#).unwrap();
        assert_eq!(day.hourly_data.len(), 24);
    }

    #[test]
    fn unknown_species_is_reported() {
        let cat = SpeciesCatalog::builtin();
        let err = run_day(&cat, r#"{"species": "kraken"}"#).unwrap_err();
        assert!(format!("{err:#}").contains("kraken"), "{err:#}");
    }

    #[test]
    fn instant_needs_an_hour() {
        let cat = SpeciesCatalog::builtin();
        assert!(run_instant(&cat, r#"{"species": "krill"}"#).is_err());
        let m = run_instant(&cat, r#"{"species": "krill", "hour": 13}"#).unwrap();
        assert!(m.current_depth >= 150.0);
    }

    #[test]
    fn profile_accepts_unknown_clarity() {
        let samples = run_profile(1000.0, 100.0, 10.0, "muddy").unwrap();
        assert_eq!(samples.len(), 11);
        assert!(run_profile(1000.0, 100.0, 0.0, "clear").is_err());
    }

    #[test]
    fn profile_rejects_unbounded_depth() {
        let err = run_profile(1.0, f64::INFINITY, 1.0, "clear").unwrap_err();
        assert!(format!("{err:#}").contains("finite"), "{err:#}");
    }

    #[test]
    fn scenario_rejects_tiny_scan_step() {
        let cat = SpeciesCatalog::builtin();
        let json = r#"{"species": "copepods", "hour": 12, "params": {"scanStepM": 1e-9}}"#;
        assert!(run_instant(&cat, json).is_err());
        assert!(run_day(&cat, json).is_err());
    }
}
