//! Tunable model parameters and scenario descriptions.
//!
//! Defaults reproduce the reference behaviour exactly; a JSON file can
//! override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DvmError, Result};
use crate::light::{WaterClarity, DEFAULT_MOON_PHASE};

/// How the refuge depth (first depth dark enough for the organism) is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DepthSearch {
    /// Fixed-step scan from the surface. Coarse, matches existing visuals.
    #[default]
    Scan,
    /// Analytic inverse of the attenuation law, clamped to the species range.
    ClosedForm,
}

/// Finest refuge scan step accepted from configuration (m).
pub const MIN_SCAN_STEP_M: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelParams {
    /// Depth increment of the refuge scan (m). Default 5.
    pub scan_step_m: f64,
    /// Suppression above which a single migration result counts as disrupted (m).
    pub disruption_threshold_m: f64,
    /// Maximum daily suppression above which a simulated day counts as disrupted (m).
    pub day_disruption_threshold_m: f64,
    /// Feeding probability above which an hour counts as an effective feeding hour.
    pub effective_feeding_probability: f64,
    /// 0 = new, 0.5 = full, 1 = new.
    pub moon_phase: f64,
    pub depth_search: DepthSearch,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            scan_step_m: 5.0,
            disruption_threshold_m: 20.0,
            day_disruption_threshold_m: 50.0,
            effective_feeding_probability: 0.5,
            moon_phase: DEFAULT_MOON_PHASE,
            depth_search: DepthSearch::Scan,
        }
    }
}

impl ModelParams {
    pub fn from_json(json: &str) -> Result<Self> {
        let params: ModelParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DvmError::InvalidParams(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.scan_step_m >= MIN_SCAN_STEP_M && self.scan_step_m.is_finite()) {
            return Err(DvmError::InvalidParams(format!(
                "scanStepM must be at least {MIN_SCAN_STEP_M}, got {}",
                self.scan_step_m
            )));
        }
        if !(0.0..=1.0).contains(&self.moon_phase) {
            return Err(DvmError::InvalidParams(format!(
                "moonPhase must lie in [0, 1], got {}",
                self.moon_phase
            )));
        }
        if !(0.0..=1.0).contains(&self.effective_feeding_probability) {
            return Err(DvmError::InvalidParams(format!(
                "effectiveFeedingProbability must lie in [0, 1], got {}",
                self.effective_feeding_probability
            )));
        }
        Ok(())
    }
}

/// A single run request as sent by the browser UI or read from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub species: String,
    #[serde(default)]
    pub artificial_lux: f64,
    #[serde(default)]
    pub clarity: WaterClarity,
    /// Hour of day for single-instant queries.
    #[serde(default)]
    pub hour: Option<f64>,
    #[serde(default)]
    pub params: Option<ModelParams>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        if let Some(p) = &scenario.params {
            p.validate()?;
        }
        Ok(scenario)
    }

    pub fn params_or_default(&self) -> ModelParams {
        self.params.clone().unwrap_or_default()
    }
}
