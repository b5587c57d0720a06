//! Descriptive ocean depth zones.

use serde::{Deserialize, Serialize};

/// Pelagic zone by depth: 200 / 1000 / 4000 / 6000 m boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OceanZone {
    Epipelagic,
    Mesopelagic,
    Bathypelagic,
    Abyssopelagic,
    Hadopelagic,
}

/// Qualitative natural light available in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneLight {
    High,
    Low,
    None,
}

impl OceanZone {
    pub fn from_depth(depth_m: f64) -> Self {
        if depth_m < 200.0 {
            OceanZone::Epipelagic
        } else if depth_m < 1000.0 {
            OceanZone::Mesopelagic
        } else if depth_m < 4000.0 {
            OceanZone::Bathypelagic
        } else if depth_m < 6000.0 {
            OceanZone::Abyssopelagic
        } else {
            OceanZone::Hadopelagic
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OceanZone::Epipelagic    => "Epipelagic",
            OceanZone::Mesopelagic   => "Mesopelagic",
            OceanZone::Bathypelagic  => "Bathypelagic",
            OceanZone::Abyssopelagic => "Abyssopelagic",
            OceanZone::Hadopelagic   => "Hadopelagic",
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            OceanZone::Epipelagic    => "Sunlight Zone",
            OceanZone::Mesopelagic   => "Twilight Zone",
            OceanZone::Bathypelagic  => "Midnight Zone",
            OceanZone::Abyssopelagic => "Abyssal Zone",
            OceanZone::Hadopelagic   => "Hadal Zone",
        }
    }

    pub fn light_level(self) -> ZoneLight {
        match self {
            OceanZone::Epipelagic  => ZoneLight::High,
            OceanZone::Mesopelagic => ZoneLight::Low,
            _ => ZoneLight::None,
        }
    }

    /// Display colour for depth-chart backgrounds.
    pub fn color(self) -> &'static str {
        match self {
            OceanZone::Epipelagic    => "#58B1F0",
            OceanZone::Mesopelagic   => "#1a4a6e",
            OceanZone::Bathypelagic  => "#0a1929",
            OceanZone::Abyssopelagic => "#050d14",
            OceanZone::Hadopelagic   => "#000000",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OceanZone::Epipelagic    => "Photosynthesis occurs, most marine life",
            OceanZone::Mesopelagic   => "DVM organisms spend daytime here",
            OceanZone::Bathypelagic  => "No sunlight, bioluminescence only",
            OceanZone::Abyssopelagic => "Near-freezing, extreme pressure",
            OceanZone::Hadopelagic   => "Ocean trenches, deepest areas",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_the_deeper_zone() {
        assert_eq!(OceanZone::from_depth(0.0), OceanZone::Epipelagic);
        assert_eq!(OceanZone::from_depth(199.9), OceanZone::Epipelagic);
        assert_eq!(OceanZone::from_depth(200.0), OceanZone::Mesopelagic);
        assert_eq!(OceanZone::from_depth(1000.0), OceanZone::Bathypelagic);
        assert_eq!(OceanZone::from_depth(4000.0), OceanZone::Abyssopelagic);
        assert_eq!(OceanZone::from_depth(6000.0), OceanZone::Hadopelagic);
        assert_eq!(OceanZone::from_depth(10_994.0), OceanZone::Hadopelagic);
    }

    #[test]
    fn only_upper_zones_have_sunlight() {
        assert_eq!(OceanZone::Epipelagic.light_level(), ZoneLight::High);
        assert_eq!(OceanZone::Mesopelagic.light_level(), ZoneLight::Low);
        assert_eq!(OceanZone::Hadopelagic.light_level(), ZoneLight::None);
    }
}
