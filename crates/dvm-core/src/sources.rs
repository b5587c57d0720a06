//! Catalog of artificial light-pollution sources along the coast.
//!
//! Lebanese coastal sources plus major Mediterranean hotspots. Each source
//! has an at-source intensity and an effective radius; the combined
//! pollution at a point sums an exponential falloff over every source whose
//! radius reaches it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coords::LatLon;
use crate::error::DvmError;
use crate::impact::Severity;

/// Search radius for sources that may contribute at a point (km).
pub const POLLUTION_SEARCH_RADIUS_KM: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Port,
    Fishing,
    Shipping,
    OilPlatform,
    CoastalCity,
    Cruise,
}

/// Display and typical-value metadata for a source type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTypeInfo {
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub avg_intensity: f64,
    pub avg_radius: f64,
}

impl SourceType {
    pub const ALL: [SourceType; 6] = [
        SourceType::Port,
        SourceType::Fishing,
        SourceType::Shipping,
        SourceType::OilPlatform,
        SourceType::CoastalCity,
        SourceType::Cruise,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SourceType::Port        => "port",
            SourceType::Fishing     => "fishing",
            SourceType::Shipping    => "shipping",
            SourceType::OilPlatform => "oil_platform",
            SourceType::CoastalCity => "coastal_city",
            SourceType::Cruise      => "cruise",
        }
    }

    pub fn info(self) -> SourceTypeInfo {
        match self {
            SourceType::Port => SourceTypeInfo {
                icon: "⚓", color: "#FF6B35",
                description: "Commercial and cargo ports with 24/7 operations",
                avg_intensity: 80_000.0, avg_radius: 3000.0,
            },
            SourceType::Fishing => SourceTypeInfo {
                icon: "🎣", color: "#FFD93D",
                description: "Fishing vessels using lights to attract catch",
                avg_intensity: 100_000.0, avg_radius: 2500.0,
            },
            SourceType::Shipping => SourceTypeInfo {
                icon: "🚢", color: "#F25C54",
                description: "Major shipping lanes with constant vessel traffic",
                avg_intensity: 80_000.0, avg_radius: 4000.0,
            },
            SourceType::OilPlatform => SourceTypeInfo {
                icon: "🛢️", color: "#C44569",
                description: "Offshore oil/gas platforms with intense lighting",
                avg_intensity: 200_000.0, avg_radius: 5000.0,
            },
            SourceType::CoastalCity => SourceTypeInfo {
                icon: "🏙️", color: "#58B1F0",
                description: "Coastal urban areas with street and building lights",
                avg_intensity: 30_000.0, avg_radius: 2000.0,
            },
            SourceType::Cruise => SourceTypeInfo {
                icon: "🛳️", color: "#A8E6CF",
                description: "Cruise ships with extensive deck and cabin lighting",
                avg_intensity: 60_000.0, avg_radius: 1500.0,
            },
        }
    }
}

impl FromStr for SourceType {
    type Err = DvmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().replace('-', "_");
        SourceType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(&key))
            .ok_or_else(|| DvmError::UnknownKey { kind: "source type", key: s.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSource {
    pub id: String,
    pub name: String,
    pub coords: LatLon,
    #[serde(rename = "type")]
    pub kind: SourceType,
    /// Lux at the source.
    pub intensity: f64,
    /// Effective radius (m).
    pub radius: f64,
    /// Operating hours, e.g. `24/7` or `18:00-06:00`.
    pub operational: String,
    pub impact: Severity,
    pub description: String,
}

/// One source's share of the pollution at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContribution {
    pub source_id: String,
    pub name: String,
    pub distance_m: f64,
    /// Lux contributed at the point.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointPollution {
    pub total_light: f64,
    pub contributing_sources: Vec<SourceContribution>,
    pub dominant_source: Option<SourceContribution>,
}

// ── Built-in tables ───────────────────────────────────────────────────────────

type Row = (&'static str, &'static str, f64, f64, SourceType, f64, f64, &'static str, Severity, &'static str);

const LEBANON: &[Row] = &[
    ("beirut-port", "Beirut Port", 33.9010, 35.5200, SourceType::Port, 80_000.0, 3000.0, "24/7",
     Severity::Critical, "Major commercial port with extensive nighttime operations"),
    ("tripoli-port", "Tripoli Port", 34.4492, 35.8217, SourceType::Port, 60_000.0, 2500.0, "24/7",
     Severity::High, "Second largest port, significant industrial lighting"),
    ("beirut-corniche", "Beirut Corniche", 33.8938, 35.4818, SourceType::CoastalCity, 30_000.0, 2000.0, "18:00-06:00",
     Severity::High, "Popular waterfront promenade with extensive street lighting"),
    ("jounieh-bay", "Jounieh Bay", 33.9808, 35.6178, SourceType::CoastalCity, 25_000.0, 1800.0, "18:00-02:00",
     Severity::Moderate, "Tourist area with restaurants, clubs, and marina lighting"),
    ("tyre-fishing", "Tyre Fishing Port", 33.2720, 35.2030, SourceType::Fishing, 45_000.0, 1500.0, "20:00-04:00",
     Severity::Moderate, "Active fishing port with boat lights attracting fish"),
    ("sidon-port", "Sidon Port", 33.5630, 35.3730, SourceType::Port, 50_000.0, 2000.0, "24/7",
     Severity::High, "Historical port with modern cargo operations"),
    ("batroun-coast", "Batroun Coastal Strip", 34.2553, 35.6583, SourceType::CoastalCity, 15_000.0, 1000.0, "19:00-01:00",
     Severity::Low, "Growing tourist destination with beach clubs"),
    ("byblos-harbor", "Byblos Old Harbor", 34.1213, 35.6483, SourceType::Fishing, 20_000.0, 800.0, "18:00-23:00",
     Severity::Low, "Ancient harbor, now tourist attraction with ambient lighting"),
];

const GLOBAL: &[Row] = &[
    ("suez-canal", "Suez Canal Shipping Route", 30.0, 32.5, SourceType::Shipping, 100_000.0, 5000.0, "24/7",
     Severity::Critical, "One of busiest shipping routes, constant ship traffic"),
    ("gibraltar", "Strait of Gibraltar", 36.0, -5.5, SourceType::Shipping, 90_000.0, 4000.0, "24/7",
     Severity::Critical, "Major maritime chokepoint with heavy traffic"),
    ("marseille", "Port of Marseille", 43.3, 5.4, SourceType::Port, 120_000.0, 4000.0, "24/7",
     Severity::Critical, "Largest port in France and Mediterranean"),
    ("barcelona", "Barcelona Port", 41.38, 2.18, SourceType::Port, 100_000.0, 3500.0, "24/7",
     Severity::Critical, "Major cruise and cargo port"),
    ("haifa", "Haifa Port", 32.82, 34.98, SourceType::Port, 95_000.0, 3500.0, "24/7",
     Severity::Critical, "Major Mediterranean port with refinery"),
    ("egypt-offshore", "Egyptian Gas Fields", 31.5, 33.0, SourceType::OilPlatform, 200_000.0, 6000.0, "24/7",
     Severity::Critical, "Offshore gas extraction platforms with intense lighting"),
    ("cyprus-drilling", "Cyprus Offshore Drilling", 34.5, 33.0, SourceType::OilPlatform, 180_000.0, 5000.0, "24/7",
     Severity::Critical, "Natural gas exploration platforms"),
    ("sicily-fishing", "Sicilian Fishing Fleet", 37.0, 14.0, SourceType::Fishing, 150_000.0, 4000.0, "20:00-04:00",
     Severity::High, "Large-scale commercial fishing with light attraction"),
    ("libya-fishing", "Libyan Coast Fishing", 32.5, 22.0, SourceType::Fishing, 130_000.0, 3500.0, "19:00-05:00",
     Severity::High, "Industrial fishing operations"),
];

fn from_rows(rows: &[Row]) -> Vec<LightSource> {
    rows.iter()
        .map(|&(id, name, lat, lon, kind, intensity, radius, operational, impact, description)| LightSource {
            id: id.to_string(),
            name: name.to_string(),
            coords: LatLon::new(lat, lon),
            kind,
            intensity,
            radius,
            operational: operational.to_string(),
            impact,
            description: description.to_string(),
        })
        .collect()
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Immutable source store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceCatalog {
    sources: Vec<LightSource>,
}

impl SourceCatalog {
    /// Lebanese coastal sources followed by the Mediterranean hotspots.
    pub fn builtin() -> Self {
        let mut sources = from_rows(LEBANON);
        sources.extend(from_rows(GLOBAL));
        Self { sources }
    }

    pub fn lebanon() -> Self {
        Self { sources: from_rows(LEBANON) }
    }

    pub fn new(sources: Vec<LightSource>) -> Self {
        Self { sources }
    }

    pub fn all(&self) -> &[LightSource] {
        &self.sources
    }

    pub fn by_type(&self, kind: SourceType) -> Vec<&LightSource> {
        self.sources.iter().filter(|s| s.kind == kind).collect()
    }

    pub fn by_impact(&self, impact: Severity) -> Vec<&LightSource> {
        self.sources.iter().filter(|s| s.impact == impact).collect()
    }

    /// Sources whose position lies within `radius_km` of `point`.
    pub fn near(&self, point: LatLon, radius_km: f64) -> Vec<&LightSource> {
        self.sources
            .iter()
            .filter(|s| point.distance_km(s.coords) <= radius_km)
            .collect()
    }

    /// Combined artificial light at `point`.
    ///
    /// A source contributes `intensity · exp(−d / radius)` when the point is
    /// within its own radius.
    pub fn total_light_pollution(&self, point: LatLon) -> PointPollution {
        let contributing_sources: Vec<SourceContribution> = self
            .near(point, POLLUTION_SEARCH_RADIUS_KM)
            .into_iter()
            .filter_map(|s| {
                let distance_m = point.distance_km(s.coords) * 1000.0;
                (distance_m <= s.radius).then(|| SourceContribution {
                    source_id: s.id.clone(),
                    name: s.name.clone(),
                    distance_m,
                    contribution: s.intensity * (-distance_m / s.radius).exp(),
                })
            })
            .collect();

        let total_light = contributing_sources.iter().map(|c| c.contribution).sum();
        let dominant_source = contributing_sources
            .iter()
            .fold(None::<&SourceContribution>, |best, c| match best {
                Some(b) if b.contribution >= c.contribution => Some(b),
                _ => Some(c),
            })
            .cloned();

        PointPollution { total_light, contributing_sources, dominant_source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_counts() {
        let cat = SourceCatalog::builtin();
        assert_eq!(cat.all().len(), 17);
        assert_eq!(SourceCatalog::lebanon().all().len(), 8);
        assert_eq!(cat.by_type(SourceType::OilPlatform).len(), 2);
        assert_eq!(cat.by_impact(Severity::Low).len(), 2);
        assert!(cat.by_type(SourceType::Cruise).is_empty());
    }

    #[test]
    fn near_beirut_finds_lebanese_sources_only() {
        let cat = SourceCatalog::builtin();
        let ids: Vec<&str> = cat.near(LatLon::new(33.90, 35.50), 20.0).iter().map(|s| s.id.as_str()).collect();
        assert!(ids.contains(&"beirut-port"));
        assert!(ids.contains(&"beirut-corniche"));
        assert!(!ids.contains(&"haifa"));
    }

    #[test]
    fn pollution_at_a_source_is_its_intensity() {
        let cat = SourceCatalog::builtin();
        let p = cat.total_light_pollution(LatLon::new(33.9010, 35.5200));
        let port = p.contributing_sources.iter().find(|c| c.source_id == "beirut-port").unwrap();
        assert!((port.contribution - 80_000.0).abs() < 1e-6);
        assert_eq!(p.dominant_source.as_ref().unwrap().source_id, "beirut-port");
        assert!(p.total_light >= 80_000.0);
    }

    #[test]
    fn open_sea_is_dark() {
        let cat = SourceCatalog::builtin();
        let p = cat.total_light_pollution(LatLon::new(35.0, 20.0));
        assert_eq!(p.total_light, 0.0);
        assert!(p.contributing_sources.is_empty());
        assert!(p.dominant_source.is_none());
    }

    #[test]
    fn parses_type_keys() {
        assert_eq!("oil-platform".parse::<SourceType>().unwrap(), SourceType::OilPlatform);
        assert_eq!("Port".parse::<SourceType>().unwrap(), SourceType::Port);
        assert!("lighthouse".parse::<SourceType>().is_err());
    }

    #[test]
    fn serialises_type_key() {
        let cat = SourceCatalog::lebanon();
        let v = serde_json::to_value(&cat.all()[2]).unwrap();
        assert_eq!(v["type"], "coastal_city");
        assert_eq!(v["impact"], "high");
        assert_eq!(v["coords"], serde_json::json!([33.8938, 35.4818]));
    }
}
