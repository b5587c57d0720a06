//! Water-column light model.
//!
//! Surface illumination (sun, moon, artificial sources) attenuated with depth
//! by a clarity- and wavelength-dependent Beer-Lambert law, plus the inverse
//! query and sampled depth profiles.

pub mod attenuation;
pub mod clarity;
pub mod profile;
pub mod surface;
pub mod zones;

use serde::{Deserialize, Serialize};

pub use attenuation::{
    artificial_light_at_point, light_at_depth, light_at_depth_for, penetration_depth,
    suppression_radius, DEFAULT_SENSITIVITY_LUX, MAX_SUPPRESSION_RADIUS_M,
};
pub use clarity::{WaterClarity, Wavelength};
pub use profile::{light_profile, ProfileSample};
pub use surface::{natural_surface_light, wrap_hour, LightEnvironment, DEFAULT_MOON_PHASE};
pub use zones::{OceanZone, ZoneLight};

/// Typical artificial sources with their at-source intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtificialSourceKind {
    CargoShip,
    /// Lights used to attract catch.
    FishingVessel,
    OilPlatform,
    CoastalCity,
    PortFacility,
    CruiseShip,
}

impl ArtificialSourceKind {
    pub const ALL: [ArtificialSourceKind; 6] = [
        ArtificialSourceKind::CargoShip,
        ArtificialSourceKind::FishingVessel,
        ArtificialSourceKind::OilPlatform,
        ArtificialSourceKind::CoastalCity,
        ArtificialSourceKind::PortFacility,
        ArtificialSourceKind::CruiseShip,
    ];

    /// Intensity at the source (lux).
    pub fn intensity_lux(self) -> f64 {
        match self {
            ArtificialSourceKind::CargoShip     => 50_000.0,
            ArtificialSourceKind::FishingVessel => 100_000.0,
            ArtificialSourceKind::OilPlatform   => 200_000.0,
            ArtificialSourceKind::CoastalCity   => 30_000.0,
            ArtificialSourceKind::PortFacility  => 80_000.0,
            ArtificialSourceKind::CruiseShip    => 60_000.0,
        }
    }
}
