//! Diel vertical migration under artificial light.
//!
//! Models how surface light (sun, moon, ships, ports, cities) attenuates
//! through the water column, where each zooplankton species settles in
//! response, and what the resulting migration suppression costs in feeding,
//! energy, biodiversity and carbon transport.
//!
//! All operations are pure functions of their inputs. Catalogs are built once
//! and passed by reference; [`fleet::FleetSimulator`] is the one stateful type.

pub mod coords;
pub mod cycle;
pub mod error;
pub mod fleet;
pub mod impact;
pub mod light;
pub mod model;
pub mod params;
pub mod site;
pub mod sources;
pub mod species;

pub use cycle::{simulate_catalog, simulate_day, DayCycle, DaySummary, HourlyRecord};
pub use error::{DvmError, Result};
pub use impact::{biodiversity_impact, carbon_impact, dvm_status, CarbonImpact, DvmStatus, ImpactAssessment, Severity};
pub use light::{light_at_depth, light_profile, penetration_depth, WaterClarity, Wavelength};
pub use model::DvmModel;
pub use params::{DepthSearch, ModelParams, Scenario};
pub use species::{
    energy_balance, feeding_probability, migration_depth, MigrationPhase, MigrationResult, Region, Species,
    SpeciesCatalog,
};
