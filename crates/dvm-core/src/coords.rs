/// Geographic coordinates and great-circle distance.
/// All coordinate math uses f64 for precision.

use serde::{Deserialize, Serialize};

/// Mean Earth radius (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the sphere in geographic coordinates.
///
/// Serialised as `[lat, lon]` to match the external catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLon {
    /// Latitude in degrees, -90 to +90.
    pub lat: f64,
    /// Longitude in degrees, -180 to +180.
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to radians.
    pub fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lon.to_radians())
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: LatLon) -> f64 {
        let (lat1, lon1) = self.to_radians();
        let (lat2, lon2) = other.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = lon2 - lon1;
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

impl From<[f64; 2]> for LatLon {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(p: LatLon) -> Self {
        [p.lat, p.lon]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = LatLon::new(33.9, 35.5);
        assert!(p.distance_km(p).abs() < 1e-9);
    }

    /// One degree of latitude is ~111.2 km everywhere.
    #[test]
    fn one_degree_of_latitude() {
        let d = LatLon::new(10.0, 20.0).distance_km(LatLon::new(11.0, 20.0));
        assert!((d - 111.19).abs() < 0.05, "got {d:.3} km");
    }

    #[test]
    fn symmetric() {
        let mut rng_state: u64 = 42;
        for _ in 0..200 {
            // LCG for deterministic pseudo-random
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let lat = (rng_state as f64 / u64::MAX as f64) * 170.0 - 85.0;
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let lon = (rng_state as f64 / u64::MAX as f64) * 360.0 - 180.0;

            let a = LatLon::new(lat, lon);
            let b = LatLon::new(33.9, 35.5);
            assert!((a.distance_km(b) - b.distance_km(a)).abs() < 1e-9);
            assert!(a.distance_km(b) <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
