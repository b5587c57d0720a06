//! Species reference data and behaviour model.
//!
//! A [`Species`] carries the light sensitivity and depth bands that drive the
//! migration search; everything else on it is descriptive metadata for the UI.

pub mod behavior;
pub mod catalog;
pub mod phase;

use serde::{Deserialize, Serialize};

pub use behavior::{
    energy_balance, feeding_probability, migration_depth, EnergyBalance, EnergyStatus,
    FeedingResult, MigrationResult,
};
pub use catalog::{Region, SpeciesCatalog};
pub use phase::MigrationPhase;

/// Closed depth interval `[min, max]` in metres.
///
/// Serialised as a two-element array to match the external catalog shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct DepthBand {
    pub min: f64,
    pub max: f64,
}

impl DepthBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, depth: f64) -> bool {
        depth >= self.min && depth <= self.max
    }

    /// Clamp `depth` into the band. Does not panic on an inverted band.
    pub fn clamp(&self, depth: f64) -> f64 {
        depth.max(self.min).min(self.max)
    }

    pub fn is_well_formed(&self) -> bool {
        self.min >= 0.0 && self.min <= self.max
    }
}

impl From<[f64; 2]> for DepthBand {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<DepthBand> for [f64; 2] {
    fn from(b: DepthBand) -> Self {
        [b.min, b.max]
    }
}

/// One migrating organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default = "default_true")]
    pub dvm_participant: bool,
    /// Lux below which the organism behaves as if in darkness.
    pub light_sensitivity: f64,
    /// Daytime refuge band.
    pub day_depth: DepthBand,
    /// Nighttime feeding band.
    pub night_depth: DepthBand,
    /// Vertical speed (m/h). Informational.
    #[serde(default)]
    pub migration_speed: f64,
    /// Relative feeding efficiency.
    pub feeding_rate: f64,
    /// Relative metabolic cost.
    pub metabolic_rate: f64,

    // Descriptive metadata, not used in computation.
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub feeding_guild: String,
    #[serde(default)]
    pub predators: Vec<String>,
    #[serde(default)]
    pub importance: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub distribution: String,
}

fn default_true() -> bool {
    true
}

impl Species {
    /// Sensitivity and both bands are physically meaningful.
    pub fn is_well_formed(&self) -> bool {
        self.light_sensitivity > 0.0
            && self.day_depth.is_well_formed()
            && self.night_depth.is_well_formed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_clamp_and_contains() {
        let b = DepthBand::new(20.0, 100.0);
        assert_eq!(b.clamp(5.0), 20.0);
        assert_eq!(b.clamp(50.0), 50.0);
        assert_eq!(b.clamp(400.0), 100.0);
        assert!(b.contains(20.0) && b.contains(100.0));
        assert!(!b.contains(100.5));
    }

    #[test]
    fn inverted_band_clamp_does_not_panic() {
        let b = DepthBand::new(100.0, 20.0);
        assert!(!b.is_well_formed());
        assert_eq!(b.clamp(50.0), 20.0);
    }

    #[test]
    fn deserialises_external_catalog_shape() {
        let json = r#"{
            "id": "copepods",
            "name": "Copepods",
            "scientificName": "Calanus finmarchicus",
            "lightSensitivity": 0.001,
            "dayDepth": [200, 400],
            "nightDepth": [0, 50],
            "migrationSpeed": 50,
            "feedingRate": 0.8,
            "metabolicRate": 0.02,
            "predators": ["small fish"]
        }"#;
        let s: Species = serde_json::from_str(json).unwrap();
        assert_eq!(s.day_depth, DepthBand::new(200.0, 400.0));
        assert!(s.dvm_participant);
        assert!(s.is_well_formed());

        let back = serde_json::to_value(&s).unwrap();
        assert_eq!(back["nightDepth"], serde_json::json!([0.0, 50.0]));
    }
}
