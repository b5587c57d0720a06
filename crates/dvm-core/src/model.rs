//! Behaviour model bound to one parameter set.

use crate::cycle::{simulate_catalog_with, simulate_day_with, DayCycle};
use crate::error::Result;
use crate::light::WaterClarity;
use crate::params::ModelParams;
use crate::site::{assess_site_by_region_with, assess_site_with, SiteAssessment, SiteRecord};
use crate::species::SpeciesCatalog;
use crate::species::behavior::migration_depth_with;
use crate::species::{EnergyBalance, MigrationResult, Species};

/// Runs every behaviour operation with the parameters it was built with.
#[derive(Debug, Clone, Default)]
pub struct DvmModel {
    params: ModelParams,
}

impl DvmModel {
    /// Validates `params` before accepting them.
    pub fn new(params: ModelParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn migration_depth(
        &self,
        hour: f64,
        artificial_lux: f64,
        species: &Species,
        clarity: WaterClarity,
    ) -> MigrationResult {
        migration_depth_with(&self.params, hour, artificial_lux, species, clarity)
    }

    pub fn simulate_day(&self, species: &Species, artificial_lux: f64, clarity: WaterClarity) -> DayCycle {
        simulate_day_with(&self.params, species, artificial_lux, clarity)
    }

    pub fn simulate_catalog(
        &self,
        species: &[&Species],
        artificial_lux: f64,
        clarity: WaterClarity,
    ) -> Vec<(String, DayCycle)> {
        simulate_catalog_with(&self.params, species, artificial_lux, clarity)
    }

    /// Energy budget of one simulated day.
    pub fn daily_energy(&self, species: &Species, artificial_lux: f64, clarity: WaterClarity) -> Result<EnergyBalance> {
        self.simulate_day(species, artificial_lux, clarity).energy_balance(species)
    }

    pub fn assess_site(&self, site: &SiteRecord, species: &[&Species], hour: f64) -> SiteAssessment {
        assess_site_with(&self.params, site, species, hour)
    }

    /// Assess `site` against the catalog species of its recorded region.
    pub fn assess_site_by_region(&self, catalog: &SpeciesCatalog, site: &SiteRecord, hour: f64) -> SiteAssessment {
        assess_site_by_region_with(&self.params, catalog, site, hour)
    }
}
