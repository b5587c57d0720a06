//! External location records and per-site assessment.
//!
//! Site records come from map layers and survey sheets, so the light and
//! clarity fields are loosely typed. Unknown clarity or region keys fall back
//! to their defaults here and nowhere else.

use serde::{Deserialize, Serialize};

use crate::coords::LatLon;
use crate::impact::{biodiversity_impact, dvm_status, DvmStatus, ImpactAssessment, DEFAULT_EXPOSURE_HOURS};
use crate::light::WaterClarity;
use crate::params::ModelParams;
use crate::species::behavior::migration_depth_with;
use crate::species::{MigrationResult, Region, Species, SpeciesCatalog};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDvmData {
    #[serde(default)]
    pub light_pollution_lux: f64,
    #[serde(default)]
    pub water_clarity: String,
    #[serde(default)]
    pub region: Option<String>,
}

impl SiteDvmData {
    pub fn clarity(&self) -> WaterClarity {
        WaterClarity::from_key_or_default(&self.water_clarity)
    }

    pub fn region(&self) -> Region {
        self.region.as_deref().map(Region::from_key_or_default).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub name: String,
    pub coords: LatLon,
    /// 0-100 composite health indicator.
    pub biodiversity_score: f64,
    #[serde(default)]
    pub dvm_data: Option<SiteDvmData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesAtSite {
    pub species_id: String,
    pub migration: MigrationResult,
    pub status: DvmStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAssessment {
    pub site: String,
    pub clarity: WaterClarity,
    pub impact: ImpactAssessment,
    pub species: Vec<SpeciesAtSite>,
}

/// Assess `site` for each of `species` at `hour` with default parameters.
pub fn assess_site(site: &SiteRecord, species: &[&Species], hour: f64) -> SiteAssessment {
    assess_site_with(&ModelParams::default(), site, species, hour)
}

/// Sites without `dvm_data` are assessed as unlit moderate water.
pub fn assess_site_with(
    params: &ModelParams,
    site: &SiteRecord,
    species: &[&Species],
    hour: f64,
) -> SiteAssessment {
    let (lux, clarity) = match &site.dvm_data {
        Some(d) => (d.light_pollution_lux.max(0.0), d.clarity()),
        None => (0.0, WaterClarity::default()),
    };

    let impact = biodiversity_impact(lux, site.biodiversity_score, DEFAULT_EXPOSURE_HOURS);
    let species = species
        .iter()
        .map(|s| {
            let migration = migration_depth_with(params, hour, lux, s, clarity);
            SpeciesAtSite {
                species_id: s.id.clone(),
                status: dvm_status(&migration),
                migration,
            }
        })
        .collect();

    SiteAssessment { site: site.name.clone(), clarity, impact, species }
}

/// Assess `site` against the species of its region.
pub fn assess_site_by_region(catalog: &SpeciesCatalog, site: &SiteRecord, hour: f64) -> SiteAssessment {
    assess_site_by_region_with(&ModelParams::default(), catalog, site, hour)
}

pub fn assess_site_by_region_with(
    params: &ModelParams,
    catalog: &SpeciesCatalog,
    site: &SiteRecord,
    hour: f64,
) -> SiteAssessment {
    let region = site.dvm_data.as_ref().map(SiteDvmData::region).unwrap_or_default();
    assess_site_with(params, site, &catalog.by_region(region), hour)
}
