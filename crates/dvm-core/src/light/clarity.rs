//! Water clarity and wavelength tables.
//!
//! Both are closed enums with a total mapping to their coefficient. External
//! data arrives as string keys; `from_key_or_default` is the only place an
//! unknown key is tolerated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DvmError;

/// Optical clarity class of the water column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaterClarity {
    /// Very clear oceanic water.
    Crystal,
    /// Clear coastal water.
    Clear,
    #[default]
    Moderate,
    Turbid,
    /// River mouths, polluted embayments.
    VeryTurbid,
}

impl WaterClarity {
    pub const ALL: [WaterClarity; 5] = [
        WaterClarity::Crystal,
        WaterClarity::Clear,
        WaterClarity::Moderate,
        WaterClarity::Turbid,
        WaterClarity::VeryTurbid,
    ];

    /// Attenuation coefficient k (per metre).
    pub fn coefficient(self) -> f64 {
        match self {
            WaterClarity::Crystal    => 0.02,
            WaterClarity::Clear      => 0.05,
            WaterClarity::Moderate   => 0.1,
            WaterClarity::Turbid     => 0.2,
            WaterClarity::VeryTurbid => 0.4,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            WaterClarity::Crystal    => "crystal",
            WaterClarity::Clear      => "clear",
            WaterClarity::Moderate   => "moderate",
            WaterClarity::Turbid     => "turbid",
            WaterClarity::VeryTurbid => "veryTurbid",
        }
    }

    /// Lenient parse for catalog ingestion: unknown keys become `Moderate`.
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            log::warn!("unknown water clarity `{key}`, falling back to moderate");
            WaterClarity::default()
        })
    }
}

impl FromStr for WaterClarity {
    type Err = DvmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaterClarity::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .or_else(|| match s.trim().to_ascii_lowercase().as_str() {
                "very_turbid" | "very-turbid" => Some(WaterClarity::VeryTurbid),
                _ => None,
            })
            .ok_or_else(|| DvmError::UnknownKey { kind: "water clarity", key: s.to_string() })
    }
}

impl fmt::Display for WaterClarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Dominant light colour. Short wavelengths penetrate further than red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Wavelength {
    /// Absorbed within the top ~10 m.
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    #[default]
    White,
}

impl Wavelength {
    pub const ALL: [Wavelength; 7] = [
        Wavelength::Red,
        Wavelength::Orange,
        Wavelength::Yellow,
        Wavelength::Green,
        Wavelength::Blue,
        Wavelength::Violet,
        Wavelength::White,
    ];

    /// Relative attenuation factor applied on top of the clarity coefficient.
    pub fn factor(self) -> f64 {
        match self {
            Wavelength::Red    => 0.5,
            Wavelength::Orange => 0.3,
            Wavelength::Yellow => 0.15,
            Wavelength::Green  => 0.08,
            Wavelength::Blue   => 0.06,
            Wavelength::Violet => 0.1,
            Wavelength::White  => 0.1,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Wavelength::Red    => "red",
            Wavelength::Orange => "orange",
            Wavelength::Yellow => "yellow",
            Wavelength::Green  => "green",
            Wavelength::Blue   => "blue",
            Wavelength::Violet => "violet",
            Wavelength::White  => "white",
        }
    }

    /// Lenient parse for catalog ingestion: unknown keys become `White`.
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            log::warn!("unknown wavelength `{key}`, falling back to white");
            Wavelength::default()
        })
    }
}

impl FromStr for Wavelength {
    type Err = DvmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Wavelength::ALL
            .into_iter()
            .find(|w| w.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DvmError::UnknownKey { kind: "wavelength", key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_increase_with_turbidity() {
        let ks: Vec<f64> = WaterClarity::ALL.iter().map(|c| c.coefficient()).collect();
        for pair in ks.windows(2) {
            assert!(pair[0] < pair[1], "coefficients must be ordered: {ks:?}");
        }
    }

    #[test]
    fn parse_accepts_catalog_keys() {
        assert_eq!("veryTurbid".parse::<WaterClarity>().unwrap(), WaterClarity::VeryTurbid);
        assert_eq!("Clear".parse::<WaterClarity>().unwrap(), WaterClarity::Clear);
        assert_eq!("blue".parse::<Wavelength>().unwrap(), Wavelength::Blue);
    }

    #[test]
    fn unknown_keys_fail_strict_and_fall_back_lenient() {
        assert!("muddy".parse::<WaterClarity>().is_err());
        assert_eq!(WaterClarity::from_key_or_default("muddy"), WaterClarity::Moderate);
        assert!("infrared".parse::<Wavelength>().is_err());
        assert_eq!(Wavelength::from_key_or_default("infrared"), Wavelength::White);
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let json = serde_json::to_string(&WaterClarity::VeryTurbid).unwrap();
        assert_eq!(json, "\"veryTurbid\"");
        let back: WaterClarity = serde_json::from_str("\"crystal\"").unwrap();
        assert_eq!(back, WaterClarity::Crystal);
    }
}
