//! Carbon transport lost when migration is suppressed.
//!
//! Migrators carry roughly 1-2 g C m⁻² day⁻¹ from the surface to depth; the
//! model uses 1.5. Results are illustrative and do not drive any decision.

use serde::{Deserialize, Serialize};

const TRANSPORT_G_PER_M2_DAY: f64 = 1.5;
const M2_PER_KM2: f64 = 1.0e6;
const G_PER_TONNE: f64 = 1.0e6;
/// Annual CO2 emissions of an average passenger car (t).
const CAR_TONNES_PER_YEAR: f64 = 4.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonImpact {
    pub normal_daily_transport_kg: f64,
    pub reduced_daily_transport_kg: f64,
    pub daily_loss_kg: f64,
    /// Rounded to whole tonnes.
    pub annual_loss_tons: f64,
    pub percent_reduction: f64,
    /// Rounded.
    pub equivalent_cars: f64,
}

/// Carbon transport lost over `area_km2` when migration activity drops by
/// `dvm_reduction_percent`.
pub fn carbon_impact(dvm_reduction_percent: f64, area_km2: f64) -> CarbonImpact {
    let normal_g = TRANSPORT_G_PER_M2_DAY * area_km2 * M2_PER_KM2;
    let reduced_g = normal_g * (1.0 - dvm_reduction_percent / 100.0);
    let lost_g = normal_g - reduced_g;

    let annual_loss_tons = lost_g / G_PER_TONNE * 365.0;

    CarbonImpact {
        normal_daily_transport_kg: normal_g / 1000.0,
        reduced_daily_transport_kg: reduced_g / 1000.0,
        daily_loss_kg: lost_g / 1000.0,
        annual_loss_tons: annual_loss_tons.round(),
        percent_reduction: dvm_reduction_percent,
        equivalent_cars: (annual_loss_tons / CAR_TONNES_PER_YEAR).round(),
    }
}
