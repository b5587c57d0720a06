//! Disruption and impact aggregation: turns light exposure and migration
//! results into ecological severity and headline metrics.

pub mod biodiversity;
pub mod carbon;
pub mod status;

pub use biodiversity::{
    biodiversity_impact, dvm_suppression_from_light, ImpactAssessment, Severity, DEFAULT_EXPOSURE_HOURS,
};
pub use carbon::{carbon_impact, CarbonImpact};
pub use status::{dvm_status, DisruptionLevel, DvmStatus};
