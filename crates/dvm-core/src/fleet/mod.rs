//! Monitoring fleet: floating L1 buoys and land reference stations.
//!
//! Devices report health and sensor readings; [`simulator::FleetSimulator`]
//! advances them and publishes immutable snapshots.

pub mod simulator;

use serde::{Deserialize, Serialize};

use crate::coords::LatLon;

pub use simulator::{FleetSimulator, FleetSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Water,
    Land,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Normal,
    Warning,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollutionIndex {
    Low,
    Medium,
    High,
    Critical,
}

impl PollutionIndex {
    /// Index for an underwater sensor reading (lux).
    pub fn from_water_lux(lux: f64) -> Self {
        if lux < 0.1 {
            PollutionIndex::Low
        } else if lux < 0.3 {
            PollutionIndex::Medium
        } else if lux < 1.0 {
            PollutionIndex::High
        } else {
            PollutionIndex::Critical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtectionStatus {
    Protected,
    AtRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceHealth {
    pub battery_voltage: f64,
    pub battery_percent: f64,
    /// `None` for stations without a thruster.
    pub motor_active: Option<bool>,
    pub solar_charging: bool,
    pub uptime_minutes: u64,
    pub signal_strength_dbm: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReadings {
    pub co2_ppm: f64,
    pub co2_trend: Trend,
    pub light_intensity_lux: f64,
    /// Dominant wavelength (nm).
    pub light_wavelength_nm: f64,
    pub is_night: bool,
    pub light_direction: String,
    pub light_pollution_index: PollutionIndex,

    // Sonar, water devices only.
    pub biomass_density: Option<f64>,
    pub dvm_migration_active: Option<bool>,
    pub dvm_depth: Option<f64>,
    /// `Rising` is an ascent toward the surface.
    pub vertical_movement: Option<Trend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceImpact {
    pub dvm_protection_status: Option<ProtectionStatus>,
    /// Tons per day.
    pub carbon_removal_daily: Option<f64>,
    pub fishery_health: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub location: String,
    pub coords: LatLon,
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    pub health: DeviceHealth,
    pub sensors: SensorReadings,
    pub impact: DeviceImpact,
}

/// Aggregates over one snapshot. Battery and carbon figures cover water
/// devices only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_devices: usize,
    pub water_devices: usize,
    pub land_devices: usize,
    pub active_devices: usize,
    pub warning_devices: usize,
    pub offline_devices: usize,
    pub total_carbon_removal: f64,
    pub average_battery: f64,
    pub dvm_protected_sites: usize,
}

impl FleetSummary {
    pub fn of(devices: &[Device]) -> Self {
        let water: Vec<&Device> = devices.iter().filter(|d| d.kind == DeviceKind::Water).collect();
        let count_status = |s: DeviceStatus| devices.iter().filter(|d| d.status == s).count();

        let average_battery = if water.is_empty() {
            0.0
        } else {
            water.iter().map(|d| d.health.battery_percent).sum::<f64>() / water.len() as f64
        };

        Self {
            total_devices: devices.len(),
            water_devices: water.len(),
            land_devices: devices.len() - water.len(),
            active_devices: count_status(DeviceStatus::Normal),
            warning_devices: count_status(DeviceStatus::Warning),
            offline_devices: count_status(DeviceStatus::Offline),
            total_carbon_removal: water.iter().filter_map(|d| d.impact.carbon_removal_daily).sum(),
            average_battery,
            dvm_protected_sites: water
                .iter()
                .filter(|d| d.impact.dvm_protection_status == Some(ProtectionStatus::Protected))
                .count(),
        }
    }
}

// ── Built-in deployment ───────────────────────────────────────────────────────

struct BuoyRow {
    id: &'static str,
    location: &'static str,
    lat: f64,
    lon: f64,
    status: DeviceStatus,
    voltage: f64,
    battery: f64,
    solar: bool,
    uptime_minutes: u64,
    signal: i32,
    co2: f64,
    co2_trend: Trend,
    lux: f64,
    wavelength: f64,
    direction: &'static str,
    biomass: f64,
    migrating: bool,
    dvm_depth: f64,
    movement: Trend,
    carbon: f64,
    fishery: &'static str,
}

const BUOYS: &[BuoyRow] = &[
    BuoyRow {
        id: "L1-001", location: "Beirut Marina", lat: 33.9010, lon: 35.36, status: DeviceStatus::Normal,
        voltage: 12.4, battery: 87.0, solar: true, uptime_minutes: 47 * 60 + 23, signal: -45,
        co2: 412.0, co2_trend: Trend::Stable, lux: 0.08, wavelength: 520.0, direction: "NW",
        biomass: 245.0, migrating: true, dvm_depth: 180.0, movement: Trend::Rising, carbon: 2.4, fishery: "good",
    },
    BuoyRow {
        id: "L1-002", location: "Jounieh Bay", lat: 33.9808, lon: 35.47, status: DeviceStatus::Normal,
        voltage: 12.1, battery: 82.0, solar: true, uptime_minutes: 52 * 60 + 11, signal: -52,
        co2: 418.0, co2_trend: Trend::Rising, lux: 0.12, wavelength: 515.0, direction: "N",
        biomass: 198.0, migrating: true, dvm_depth: 165.0, movement: Trend::Rising, carbon: 1.9, fishery: "good",
    },
    BuoyRow {
        id: "L1-003", location: "Byblos Coast", lat: 34.1184, lon: 35.52, status: DeviceStatus::Warning,
        voltage: 11.2, battery: 64.0, solar: false, uptime_minutes: 28 * 60 + 45, signal: -68,
        co2: 428.0, co2_trend: Trend::Rising, lux: 0.35, wavelength: 510.0, direction: "NE",
        biomass: 142.0, migrating: false, dvm_depth: 95.0, movement: Trend::Stable, carbon: 0.8, fishery: "moderate",
    },
    BuoyRow {
        id: "L1-004", location: "Tripoli Harbor", lat: 34.4360, lon: 35.69, status: DeviceStatus::Normal,
        voltage: 12.6, battery: 91.0, solar: true, uptime_minutes: 96 * 60 + 2, signal: -41,
        co2: 408.0, co2_trend: Trend::Stable, lux: 0.05, wavelength: 525.0, direction: "W",
        biomass: 312.0, migrating: true, dvm_depth: 220.0, movement: Trend::Rising, carbon: 3.2, fishery: "excellent",
    },
    BuoyRow {
        id: "L1-005", location: "Tyre Coast", lat: 33.2704, lon: 35.07, status: DeviceStatus::Normal,
        voltage: 12.3, battery: 85.0, solar: true, uptime_minutes: 63 * 60 + 17, signal: -49,
        co2: 415.0, co2_trend: Trend::Stable, lux: 0.09, wavelength: 518.0, direction: "NW",
        biomass: 267.0, migrating: true, dvm_depth: 195.0, movement: Trend::Rising, carbon: 2.7, fishery: "good",
    },
];

fn buoy(b: &BuoyRow) -> Device {
    let index = PollutionIndex::from_water_lux(b.lux);
    Device {
        id: b.id.to_string(),
        name: format!("Lumenet {}", b.id),
        location: b.location.to_string(),
        coords: LatLon::new(b.lat, b.lon),
        kind: DeviceKind::Water,
        status: b.status,
        health: DeviceHealth {
            battery_voltage: b.voltage,
            battery_percent: b.battery,
            motor_active: Some(true),
            solar_charging: b.solar,
            uptime_minutes: b.uptime_minutes,
            signal_strength_dbm: b.signal,
        },
        sensors: SensorReadings {
            co2_ppm: b.co2,
            co2_trend: b.co2_trend,
            light_intensity_lux: b.lux,
            light_wavelength_nm: b.wavelength,
            is_night: true,
            light_direction: b.direction.to_string(),
            light_pollution_index: index,
            biomass_density: Some(b.biomass),
            dvm_migration_active: Some(b.migrating),
            dvm_depth: Some(b.dvm_depth),
            vertical_movement: Some(b.movement),
        },
        impact: DeviceImpact {
            dvm_protection_status: Some(protection_for(index)),
            carbon_removal_daily: Some(b.carbon),
            fishery_health: Some(b.fishery.to_string()),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn station(
    id: &str,
    name: &str,
    location: &str,
    coords: LatLon,
    voltage: f64,
    battery: f64,
    uptime_minutes: u64,
    signal: i32,
    co2: f64,
    lux: f64,
    wavelength: f64,
    index: PollutionIndex,
) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        coords,
        kind: DeviceKind::Land,
        status: DeviceStatus::Normal,
        health: DeviceHealth {
            battery_voltage: voltage,
            battery_percent: battery,
            motor_active: None,
            solar_charging: true,
            uptime_minutes,
            signal_strength_dbm: signal,
        },
        sensors: SensorReadings {
            co2_ppm: co2,
            co2_trend: Trend::Stable,
            light_intensity_lux: lux,
            light_wavelength_nm: wavelength,
            is_night: true,
            light_direction: "ambient".to_string(),
            light_pollution_index: index,
            biomass_density: None,
            dvm_migration_active: None,
            dvm_depth: None,
            vertical_movement: None,
        },
        impact: DeviceImpact { dvm_protection_status: None, carbon_removal_daily: None, fishery_health: None },
    }
}

/// Buoys under high or critical light lose their protected status.
pub(crate) fn protection_for(index: PollutionIndex) -> ProtectionStatus {
    if index >= PollutionIndex::High {
        ProtectionStatus::AtRisk
    } else {
        ProtectionStatus::Protected
    }
}

/// Five buoys along the Lebanese coast plus two beach reference stations.
pub fn builtin_devices() -> Vec<Device> {
    let mut devices: Vec<Device> = BUOYS.iter().map(buoy).collect();
    devices.push(station(
        "REF-001", "Beach Station - Beirut", "Ramlet al-Baida", LatLon::new(33.8938, 35.35),
        13.1, 95.0, 120 * 60 + 45, -38, 425.0, 42.5, 580.0, PollutionIndex::Critical,
    ));
    devices.push(station(
        "REF-002", "Beach Station - Jounieh", "Jounieh Beach", LatLon::new(33.9782, 35.49),
        12.9, 92.0, 108 * 60 + 22, -42, 422.0, 38.2, 575.0, PollutionIndex::High,
    ));
    devices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn builtin_summary() {
        let s = FleetSummary::of(&builtin_devices());
        assert_eq!(s.total_devices, 7);
        assert_eq!(s.water_devices, 5);
        assert_eq!(s.land_devices, 2);
        assert_eq!(s.active_devices, 6);
        assert_eq!(s.warning_devices, 1);
        assert_eq!(s.offline_devices, 0);
        assert_relative_eq!(s.total_carbon_removal, 11.0, epsilon = 1e-9);
        assert_relative_eq!(s.average_battery, 81.8, epsilon = 1e-9);
        assert_eq!(s.dvm_protected_sites, 4);
    }

    #[test]
    fn pollution_index_matches_readings() {
        let devices = builtin_devices();
        let byblos = devices.iter().find(|d| d.id == "L1-003").unwrap();
        assert_eq!(byblos.sensors.light_pollution_index, PollutionIndex::High);
        assert_eq!(byblos.impact.dvm_protection_status, Some(ProtectionStatus::AtRisk));
        let jounieh = devices.iter().find(|d| d.id == "L1-002").unwrap();
        assert_eq!(jounieh.sensors.light_pollution_index, PollutionIndex::Medium);
    }

    #[test]
    fn empty_fleet_summary() {
        let s = FleetSummary::of(&[]);
        assert_eq!(s.total_devices, 0);
        assert_eq!(s.average_battery, 0.0);
    }

    #[test]
    fn serialises_status_keys() {
        let v = serde_json::to_value(ProtectionStatus::AtRisk).unwrap();
        assert_eq!(v, "at-risk");
    }
}
