//! Biodiversity score discount from light-pollution exposure.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DvmError;
use crate::light::{suppression_radius, DEFAULT_SENSITIVITY_LUX};

/// Exposure duration assumed when none is given: one night (h).
pub const DEFAULT_EXPOSURE_HOURS: f64 = 12.0;

/// Cap on the exposure-duration multiplier.
const MAX_DURATION_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Severity::Low, Severity::Moderate, Severity::High, Severity::Critical];

    pub fn key(self) -> &'static str {
        match self {
            Severity::Low      => "low",
            Severity::Moderate => "moderate",
            Severity::High     => "high",
            Severity::Critical => "critical",
        }
    }

    fn from_total_impact(total: f64) -> Self {
        if total > 0.3 {
            Severity::Critical
        } else if total > 0.15 {
            Severity::High
        } else if total > 0.05 {
            Severity::Moderate
        } else {
            Severity::Low
        }
    }
}

impl FromStr for Severity {
    type Err = DvmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|v| v.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DvmError::UnknownKey { kind: "severity", key: s.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessment {
    pub original_score: f64,
    /// Rounded to the nearest integer.
    pub adjusted_score: f64,
    /// Total impact as a rounded percentage.
    pub impact_percentage: f64,
    pub severity: Severity,
    /// Migration suppression expected at this light level (m).
    pub dvm_suppression_depth: f64,
    /// Horizontal radius affected for a maximally sensitive organism (m).
    pub affected_radius: f64,
}

/// Fractional score reduction for a light level, before duration scaling.
fn impact_factor(lux: f64) -> f64 {
    if lux > 100.0 {
        0.4
    } else if lux > 10.0 {
        0.25
    } else if lux > 1.0 {
        0.15
    } else if lux > 0.1 {
        0.08
    } else if lux > 0.01 {
        0.03
    } else {
        0.0
    }
}

/// Typical migration suppression depth (m) for an artificial light level.
pub fn dvm_suppression_from_light(lux: f64) -> f64 {
    if lux > 100.0 {
        400.0
    } else if lux > 10.0 {
        200.0
    } else if lux > 1.0 {
        100.0
    } else if lux > 0.1 {
        50.0
    } else if lux > 0.01 {
        20.0
    } else {
        0.0
    }
}

/// Discount `original_score` (0-100) for `duration_hours` of exposure to
/// `light_pollution_lux`.
pub fn biodiversity_impact(light_pollution_lux: f64, original_score: f64, duration_hours: f64) -> ImpactAssessment {
    let duration_multiplier = (duration_hours.max(0.0) / DEFAULT_EXPOSURE_HOURS).min(MAX_DURATION_MULTIPLIER);
    let total_impact = impact_factor(light_pollution_lux) * duration_multiplier;

    ImpactAssessment {
        original_score,
        adjusted_score: (original_score * (1.0 - total_impact)).round(),
        impact_percentage: (total_impact * 100.0).round(),
        severity: Severity::from_total_impact(total_impact),
        dvm_suppression_depth: dvm_suppression_from_light(light_pollution_lux),
        affected_radius: suppression_radius(light_pollution_lux, DEFAULT_SENSITIVITY_LUX),
    }
}
