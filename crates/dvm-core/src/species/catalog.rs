//! Species store: built once at startup, then shared read-only.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DvmError, Result};

use super::{DepthBand, Species};

// ── Regions ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Mediterranean,
    Atlantic,
    Pacific,
    Antarctic,
    Coastal,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Mediterranean,
        Region::Atlantic,
        Region::Pacific,
        Region::Antarctic,
        Region::Coastal,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Region::Mediterranean => "mediterranean",
            Region::Atlantic      => "atlantic",
            Region::Pacific       => "pacific",
            Region::Antarctic     => "antarctic",
            Region::Coastal       => "coastal",
        }
    }

    /// Species ids present in the region, in display order.
    pub fn species_ids(self) -> &'static [&'static str] {
        match self {
            Region::Mediterranean => &[
                "copepods", "lanternfish", "jellyfishSmall", "squid", "medusae", "larvaefish", "pteropods",
            ],
            Region::Atlantic  => &["copepods", "krill", "lanternfish", "squid", "amphipods", "siphonophores"],
            Region::Pacific   => &["copepods", "lanternfish", "squid", "salps", "pteropods", "siphonophores"],
            Region::Antarctic => &["krill", "copepods", "amphipods", "salps"],
            Region::Coastal   => &["mysids", "decapodLarvae", "jellyfishSmall", "copepods"],
        }
    }

    /// Lenient parse for external data: unknown keys become `Mediterranean`.
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            log::warn!("unknown region `{key}`, falling back to mediterranean");
            Region::default()
        })
    }
}

impl FromStr for Region {
    type Err = DvmError;

    fn from_str(s: &str) -> Result<Self> {
        Region::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DvmError::UnknownKey { kind: "region", key: s.to_string() })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ── Built-in reference table ──────────────────────────────────────────────────

struct Builtin {
    id: &'static str,
    name: &'static str,
    scientific_name: &'static str,
    light_sensitivity: f64,
    day: (f64, f64),
    night: (f64, f64),
    migration_speed: f64,
    size: &'static str,
    feeding_guild: &'static str,
    feeding_rate: f64,
    metabolic_rate: f64,
    predators: &'static [&'static str],
    importance: &'static str,
    icon: &'static str,
    color: &'static str,
    distribution: &'static str,
}

const BUILTIN: &[Builtin] = &[
    Builtin {
        id: "copepods", name: "Copepods", scientific_name: "Calanus finmarchicus",
        light_sensitivity: 0.001, day: (200.0, 400.0), night: (0.0, 50.0), migration_speed: 50.0,
        size: "1-5mm", feeding_guild: "herbivore", feeding_rate: 0.8, metabolic_rate: 0.02,
        predators: &["small fish", "jellyfish", "larval fish"],
        importance: "Keystone DVM species, primary food source for many fish",
        icon: "🦐", color: "#FF6B9D", distribution: "global",
    },
    Builtin {
        id: "krill", name: "Antarctic Krill", scientific_name: "Euphausia superba",
        light_sensitivity: 0.005, day: (150.0, 300.0), night: (0.0, 80.0), migration_speed: 60.0,
        size: "6cm", feeding_guild: "herbivore", feeding_rate: 1.0, metabolic_rate: 0.03,
        predators: &["whales", "seals", "penguins", "fish"],
        importance: "Critical to Antarctic food web, supports whale populations",
        icon: "🦐", color: "#FF8C94", distribution: "antarctic",
    },
    Builtin {
        id: "lanternfish", name: "Lanternfish", scientific_name: "Myctophidae family",
        light_sensitivity: 0.01, day: (300.0, 600.0), night: (50.0, 150.0), migration_speed: 100.0,
        size: "5-15cm", feeding_guild: "carnivore", feeding_rate: 0.7, metabolic_rate: 0.05,
        predators: &["tuna", "sharks", "dolphins"],
        importance: "Most abundant vertebrate on Earth, major carbon transporters",
        icon: "🐟", color: "#FFD93D", distribution: "global",
    },
    Builtin {
        id: "jellyfishSmall", name: "Small Jellyfish", scientific_name: "Various hydromedusae",
        light_sensitivity: 0.02, day: (100.0, 250.0), night: (0.0, 100.0), migration_speed: 30.0,
        size: "1-10cm", feeding_guild: "carnivore", feeding_rate: 0.5, metabolic_rate: 0.01,
        predators: &["fish", "sea turtles"],
        importance: "Gelatinous zooplankton, increasing with ocean warming",
        icon: "🪼", color: "#A8E6CF", distribution: "global",
    },
    Builtin {
        id: "squid", name: "Market Squid", scientific_name: "Doryteuthis opalescens",
        light_sensitivity: 0.05, day: (200.0, 400.0), night: (20.0, 100.0), migration_speed: 120.0,
        size: "15-25cm", feeding_guild: "carnivore", feeding_rate: 0.9, metabolic_rate: 0.08,
        predators: &["sharks", "tuna", "seals", "whales"],
        importance: "Commercial fishery species, preys on DVM organisms",
        icon: "🦑", color: "#B4A7D6", distribution: "temperate",
    },
    Builtin {
        id: "larvaefish", name: "Fish Larvae", scientific_name: "Various teleost larvae",
        light_sensitivity: 0.008, day: (50.0, 150.0), night: (0.0, 40.0), migration_speed: 20.0,
        size: "2-10mm", feeding_guild: "carnivore", feeding_rate: 0.6, metabolic_rate: 0.04,
        predators: &["jellyfish", "small fish", "copepods"],
        importance: "Early life stage of most fish species, vulnerable to disruption",
        icon: "🐠", color: "#88CCF1", distribution: "global",
    },
    Builtin {
        id: "salps", name: "Salps", scientific_name: "Salpa fusiformis",
        light_sensitivity: 0.015, day: (100.0, 200.0), night: (0.0, 80.0), migration_speed: 40.0,
        size: "1-10cm", feeding_guild: "herbivore", feeding_rate: 0.7, metabolic_rate: 0.015,
        predators: &["fish", "sea turtles"],
        importance: "Efficient filter feeders, form massive blooms",
        icon: "🫧", color: "#C7CEEA", distribution: "global",
    },
    Builtin {
        id: "chaetognaths", name: "Arrow Worms", scientific_name: "Sagitta elegans",
        light_sensitivity: 0.003, day: (150.0, 300.0), night: (20.0, 100.0), migration_speed: 45.0,
        size: "5-10mm", feeding_guild: "carnivore", feeding_rate: 0.65, metabolic_rate: 0.025,
        predators: &["small fish", "jellyfish"],
        importance: "Important predators of copepods and larvae",
        icon: "🪱", color: "#FFDAC1", distribution: "global",
    },
    Builtin {
        id: "pteropods", name: "Sea Butterflies", scientific_name: "Limacina helicina",
        light_sensitivity: 0.006, day: (100.0, 250.0), night: (0.0, 60.0), migration_speed: 35.0,
        size: "3-8mm", feeding_guild: "herbivore", feeding_rate: 0.55, metabolic_rate: 0.018,
        predators: &["fish", "whales"],
        importance: "Vulnerable to ocean acidification, food for salmon",
        icon: "🦋", color: "#B5EAD7", distribution: "polar/temperate",
    },
    Builtin {
        id: "amphipods", name: "Amphipods", scientific_name: "Various gammarid species",
        light_sensitivity: 0.004, day: (150.0, 350.0), night: (10.0, 70.0), migration_speed: 55.0,
        size: "5-20mm", feeding_guild: "omnivore", feeding_rate: 0.7, metabolic_rate: 0.022,
        predators: &["fish", "seabirds"],
        importance: "Scavengers and detritivores in marine food web",
        icon: "🦐", color: "#FFB7B2", distribution: "global",
    },
    Builtin {
        id: "medusae", name: "Jellyfish Medusae", scientific_name: "Pelagia noctiluca",
        light_sensitivity: 0.025, day: (80.0, 180.0), night: (0.0, 90.0), migration_speed: 35.0,
        size: "5-20cm", feeding_guild: "carnivore", feeding_rate: 0.6, metabolic_rate: 0.012,
        predators: &["sea turtles", "ocean sunfish"],
        importance: "Bioluminescent, affected by light pollution",
        icon: "🪼", color: "#E2B0FF", distribution: "mediterranean/atlantic",
    },
    Builtin {
        id: "siphonophores", name: "Siphonophores", scientific_name: "Nanomia bijuga",
        light_sensitivity: 0.012, day: (200.0, 500.0), night: (50.0, 150.0), migration_speed: 40.0,
        size: "10-40cm colonies", feeding_guild: "carnivore", feeding_rate: 0.75, metabolic_rate: 0.02,
        predators: &["fish", "sea turtles"],
        importance: "Colonial organisms, important deep-sea predators",
        icon: "🎐", color: "#CFBAF0", distribution: "global",
    },
    Builtin {
        id: "mysids", name: "Mysid Shrimp", scientific_name: "Mysis mixta",
        light_sensitivity: 0.007, day: (100.0, 200.0), night: (0.0, 50.0), migration_speed: 50.0,
        size: "5-15mm", feeding_guild: "omnivore", feeding_rate: 0.65, metabolic_rate: 0.024,
        predators: &["fish", "seabirds"],
        importance: "Coastal DVM species, estuarine importance",
        icon: "🦐", color: "#FFE5B4", distribution: "coastal",
    },
    Builtin {
        id: "decapodLarvae", name: "Crab/Lobster Larvae", scientific_name: "Various decapod larvae",
        light_sensitivity: 0.009, day: (80.0, 180.0), night: (0.0, 60.0), migration_speed: 30.0,
        size: "2-8mm", feeding_guild: "omnivore", feeding_rate: 0.6, metabolic_rate: 0.03,
        predators: &["fish", "jellyfish", "other larvae"],
        importance: "Larval stage of commercially important crustaceans",
        icon: "🦀", color: "#FF9AA2", distribution: "global",
    },
    Builtin {
        id: "ctenophores", name: "Comb Jellies", scientific_name: "Mnemiopsis leidyi",
        light_sensitivity: 0.018, day: (60.0, 150.0), night: (0.0, 70.0), migration_speed: 25.0,
        size: "3-10cm", feeding_guild: "carnivore", feeding_rate: 0.7, metabolic_rate: 0.015,
        predators: &["fish", "sea turtles"],
        importance: "Bioluminescent, invasive in some regions",
        icon: "✨", color: "#C7F0DB", distribution: "global",
    },
];

impl Builtin {
    fn to_species(&self) -> Species {
        Species {
            id: self.id.to_string(),
            name: self.name.to_string(),
            scientific_name: self.scientific_name.to_string(),
            dvm_participant: true,
            light_sensitivity: self.light_sensitivity,
            day_depth: DepthBand::new(self.day.0, self.day.1),
            night_depth: DepthBand::new(self.night.0, self.night.1),
            migration_speed: self.migration_speed,
            feeding_rate: self.feeding_rate,
            metabolic_rate: self.metabolic_rate,
            size: self.size.to_string(),
            feeding_guild: self.feeding_guild.to_string(),
            predators: self.predators.iter().map(|p| p.to_string()).collect(),
            importance: self.importance.to_string(),
            icon: self.icon.to_string(),
            color: self.color.to_string(),
            distribution: self.distribution.to_string(),
        }
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Accepted JSON shapes: a list of species, or an id → species map.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Species>),
    Map(HashMap<String, Species>),
}

/// Immutable species store. Preserves insertion order for iteration.
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    species: Vec<Species>,
    index: HashMap<String, usize>,
}

impl SpeciesCatalog {
    /// The 15 reference species.
    pub fn builtin() -> Self {
        Self::from_species(BUILTIN.iter().map(Builtin::to_species).collect())
    }

    /// Build from a list. A later entry with a duplicate id replaces the
    /// earlier one in lookups.
    pub fn from_species(species: Vec<Species>) -> Self {
        let index = species
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        Self { species, index }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let species = match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::List(list) => list,
            CatalogFile::Map(map) => {
                let mut list: Vec<Species> = map.into_values().collect();
                list.sort_by(|a, b| a.id.cmp(&b.id));
                list
            }
        };
        for s in species.iter().filter(|s| !s.is_well_formed()) {
            log::warn!("species `{}` has inverted depth bands or non-positive sensitivity", s.id);
        }
        Ok(Self::from_species(species))
    }

    pub fn get(&self, id: &str) -> Option<&Species> {
        self.index.get(id).map(|&i| &self.species[i])
    }

    /// Like [`get`](Self::get) but reports unknown ids as an error.
    pub fn require(&self, id: &str) -> Result<&Species> {
        self.get(id).ok_or_else(|| DvmError::UnknownSpecies(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    pub fn as_slice(&self) -> &[Species] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn dvm_participants(&self) -> Vec<&Species> {
        self.species.iter().filter(|s| s.dvm_participant).collect()
    }

    /// Species of a region that are present in this catalog.
    pub fn by_region(&self, region: Region) -> Vec<&Species> {
        region.species_ids().iter().filter_map(|id| self.get(id)).collect()
    }
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_fifteen_well_formed_species() {
        let cat = SpeciesCatalog::builtin();
        assert_eq!(cat.len(), 15);
        for s in cat.iter() {
            assert!(s.is_well_formed(), "{} is not well formed", s.id);
            assert!(s.dvm_participant);
        }
        assert_eq!(cat.dvm_participants().len(), 15);
    }

    #[test]
    fn lookup_by_id() {
        let cat = SpeciesCatalog::builtin();
        let krill = cat.get("krill").unwrap();
        assert_eq!(krill.light_sensitivity, 0.005);
        assert_eq!(krill.day_depth, DepthBand::new(150.0, 300.0));
        assert!(cat.get("kraken").is_none());
        assert!(matches!(cat.require("kraken"), Err(DvmError::UnknownSpecies(_))));
    }

    /// Every id referenced by a region resolves in the built-in catalog.
    #[test]
    fn region_lists_resolve() {
        let cat = SpeciesCatalog::builtin();
        for region in Region::ALL {
            let found = cat.by_region(region);
            assert_eq!(found.len(), region.species_ids().len(), "region {region}");
        }
        let antarctic: Vec<&str> = cat.by_region(Region::Antarctic).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(antarctic, vec!["krill", "copepods", "amphipods", "salps"]);
    }

    #[test]
    fn unknown_region_falls_back_to_mediterranean() {
        assert_eq!(Region::from_key_or_default("arctic"), Region::Mediterranean);
        assert_eq!(Region::from_key_or_default("Pacific"), Region::Pacific);
        assert!("arctic".parse::<Region>().is_err());
    }

    #[test]
    fn json_list_and_map_shapes() {
        let entry = r#"{"id":"x","name":"X","lightSensitivity":0.01,"dayDepth":[100,200],
                        "nightDepth":[0,50],"feedingRate":0.5,"metabolicRate":0.01}"#;
        let list = SpeciesCatalog::from_json(&format!("[{entry}]")).unwrap();
        assert_eq!(list.len(), 1);
        let map = SpeciesCatalog::from_json(&format!(r#"{{"x": {entry}}}"#)).unwrap();
        assert!(map.get("x").is_some());
        assert!(SpeciesCatalog::from_json("[{}]").is_err());
    }
}
