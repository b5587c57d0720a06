//! Presentation bucket for a single migration result.

use serde::{Deserialize, Serialize};

use crate::species::{MigrationPhase, MigrationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisruptionLevel {
    Natural,
    Minor,
    Moderate,
    Severe,
    Critical,
}

impl DisruptionLevel {
    /// Bucket a suppression depth: 0 / <30 / <100 / <200 / ≥200 m.
    pub fn from_suppression(suppression_m: f64) -> Self {
        if suppression_m <= 0.0 {
            DisruptionLevel::Natural
        } else if suppression_m < 30.0 {
            DisruptionLevel::Minor
        } else if suppression_m < 100.0 {
            DisruptionLevel::Moderate
        } else if suppression_m < 200.0 {
            DisruptionLevel::Severe
        } else {
            DisruptionLevel::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisruptionLevel::Natural  => "Natural",
            DisruptionLevel::Minor    => "Minor Disruption",
            DisruptionLevel::Moderate => "Moderate Disruption",
            DisruptionLevel::Severe   => "Severe Disruption",
            DisruptionLevel::Critical => "Critical Disruption",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            DisruptionLevel::Natural  => "#3BE8B0",
            DisruptionLevel::Minor    => "#58B1F0",
            DisruptionLevel::Moderate => "#FFA500",
            DisruptionLevel::Severe   => "#FF6B35",
            DisruptionLevel::Critical => "#F25C54",
        }
    }

    fn describe(self, suppression_m: f64) -> String {
        match self {
            DisruptionLevel::Natural  => "DVM occurring at natural depths".to_string(),
            DisruptionLevel::Minor    => format!("Organisms pushed {suppression_m}m deeper than normal"),
            DisruptionLevel::Moderate => format!("Significant depth change of {suppression_m}m affecting feeding"),
            DisruptionLevel::Severe   => format!("Major disruption: {suppression_m}m suppression reducing food access"),
            DisruptionLevel::Critical => format!("Extreme {suppression_m}m suppression, DVM effectively blocked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DvmStatus {
    pub level: DisruptionLevel,
    pub status: String,
    pub description: String,
    pub color: String,
    pub phase: MigrationPhase,
}

pub fn dvm_status(migration: &MigrationResult) -> DvmStatus {
    let level = DisruptionLevel::from_suppression(migration.suppression_depth);
    DvmStatus {
        level,
        status: level.label().to_string(),
        description: level.describe(migration.suppression_depth),
        color: level.color().to_string(),
        phase: migration.phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::WaterClarity;
    use crate::species::{migration_depth, SpeciesCatalog};

    #[test]
    fn bucket_edges() {
        assert_eq!(DisruptionLevel::from_suppression(0.0), DisruptionLevel::Natural);
        assert_eq!(DisruptionLevel::from_suppression(25.0), DisruptionLevel::Minor);
        assert_eq!(DisruptionLevel::from_suppression(30.0), DisruptionLevel::Moderate);
        assert_eq!(DisruptionLevel::from_suppression(100.0), DisruptionLevel::Severe);
        assert_eq!(DisruptionLevel::from_suppression(200.0), DisruptionLevel::Critical);
    }

    #[test]
    fn description_interpolates_suppression() {
        let cat = SpeciesCatalog::builtin();
        let jelly = cat.require("jellyfishSmall").unwrap();
        let m = migration_depth(0.0, 100.0, jelly, WaterClarity::VeryTurbid);
        let s = dvm_status(&m);
        assert_eq!(s.level, DisruptionLevel::Severe);
        assert_eq!(s.status, "Severe Disruption");
        assert_eq!(s.description, "Major disruption: 145m suppression reducing food access");
        assert_eq!(s.color, "#FF6B35");
        assert_eq!(s.phase, MigrationPhase::Surface);
    }

    #[test]
    fn undisturbed_is_natural() {
        let cat = SpeciesCatalog::builtin();
        let krill = cat.require("krill").unwrap();
        let s = dvm_status(&migration_depth(3.0, 0.0, krill, WaterClarity::Clear));
        assert_eq!(s.level, DisruptionLevel::Natural);
        assert_eq!(s.description, "DVM occurring at natural depths");
    }
}
