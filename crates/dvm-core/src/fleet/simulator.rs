//! Live fleet updates.
//!
//! The simulator is the sole writer of device state. Each `tick` advances
//! every device by one reporting interval and publishes a fresh
//! `Arc<FleetSnapshot>`; readers hold on to whichever snapshot they cloned.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::{builtin_devices, protection_for, Device, DeviceKind, DeviceStatus, FleetSummary, PollutionIndex, Trend};

/// Minutes between device reports.
pub const REPORT_INTERVAL_MIN: u64 = 5;

const LOW_BATTERY_PERCENT: f64 = 20.0;

/// Immutable view of the fleet after `tick` updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub tick: u64,
    pub devices: Vec<Device>,
}

impl FleetSnapshot {
    pub fn summary(&self) -> FleetSummary {
        FleetSummary::of(&self.devices)
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }
}

pub struct FleetSimulator {
    devices: Vec<Device>,
    rng: StdRng,
    tick: u64,
    current: Arc<FleetSnapshot>,
}

impl FleetSimulator {
    pub fn new(devices: Vec<Device>, seed: u64) -> Self {
        let current = Arc::new(FleetSnapshot { tick: 0, devices: devices.clone() });
        Self { devices, rng: StdRng::seed_from_u64(seed), tick: 0, current }
    }

    /// Simulator over the built-in Lebanese deployment.
    pub fn builtin(seed: u64) -> Self {
        Self::new(builtin_devices(), seed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<FleetSnapshot> {
        Arc::clone(&self.current)
    }

    /// Advance every device one reporting interval and publish the result.
    pub fn tick(&mut self) -> Arc<FleetSnapshot> {
        self.tick += 1;
        for device in &mut self.devices {
            step_device(device, &mut self.rng);
        }

        let snapshot = Arc::new(FleetSnapshot { tick: self.tick, devices: self.devices.clone() });
        let summary = snapshot.summary();
        log::debug!(
            "fleet tick {}: {} active, {} warning, {} offline",
            self.tick,
            summary.active_devices,
            summary.warning_devices,
            summary.offline_devices
        );
        self.current = Arc::clone(&snapshot);
        snapshot
    }

    pub fn run(&mut self, ticks: u64) -> Arc<FleetSnapshot> {
        for _ in 0..ticks {
            self.tick();
        }
        self.snapshot()
    }
}

fn trend(delta: f64, dead_band: f64) -> Trend {
    if delta > dead_band {
        Trend::Rising
    } else if delta < -dead_band {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

fn step_device(d: &mut Device, rng: &mut StdRng) {
    if d.status == DeviceStatus::Offline {
        return;
    }

    // ── Health ──
    let h = &mut d.health;
    h.uptime_minutes += REPORT_INTERVAL_MIN;
    let drain = if h.solar_charging { rng.gen_range(-0.2_f64..=0.1_f64) } else { rng.gen_range(0.1_f64..=0.4_f64) };
    h.battery_percent = (h.battery_percent - drain).clamp(0.0, 100.0);
    h.battery_voltage = 10.5 + 2.6 * h.battery_percent / 100.0;
    h.signal_strength_dbm = (h.signal_strength_dbm + rng.gen_range(-2..=2)).clamp(-110, -30);

    if h.battery_percent <= 0.0 {
        d.status = DeviceStatus::Offline;
        log::warn!("{} went offline: battery depleted", d.id);
        return;
    }
    if h.battery_percent < LOW_BATTERY_PERCENT && d.status == DeviceStatus::Normal {
        d.status = DeviceStatus::Warning;
        log::warn!("{} battery low ({:.0}%)", d.id, h.battery_percent);
    }

    // ── Sensors ──
    let s = &mut d.sensors;
    let co2_delta = rng.gen_range(-1.5_f64..=1.5_f64);
    s.co2_ppm += co2_delta;
    s.co2_trend = trend(co2_delta, 0.5);
    s.light_intensity_lux = (s.light_intensity_lux * rng.gen_range(0.9_f64..=1.1_f64)).max(0.0);

    if d.kind == DeviceKind::Water {
        s.light_pollution_index = PollutionIndex::from_water_lux(s.light_intensity_lux);
        if let Some(depth) = s.dvm_depth.as_mut() {
            let delta = rng.gen_range(-5.0_f64..=5.0_f64);
            *depth = (*depth + delta).max(0.0);
            // Depth grows downward; a shrinking depth is an ascent.
            s.vertical_movement = Some(trend(-delta, 1.0));
        }
        if let Some(b) = s.biomass_density.as_mut() {
            *b = (*b * rng.gen_range(0.97_f64..=1.03_f64)).max(0.0);
        }
        d.impact.dvm_protection_status = Some(protection_for(s.light_pollution_index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_snapshots_are_unchanged_by_ticks() {
        let mut sim = FleetSimulator::builtin(7);
        let before = sim.snapshot();
        let copy = (*before).clone();
        sim.run(10);
        assert_eq!(*before, copy);
        assert_eq!(before.tick, 0);
        assert_eq!(sim.snapshot().tick, 10);
    }

    #[test]
    fn same_seed_same_fleet() {
        let a = FleetSimulator::builtin(42).run(25);
        let b = FleetSimulator::builtin(42).run(25);
        assert_eq!(*a, *b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = FleetSimulator::builtin(1).run(5);
        let b = FleetSimulator::builtin(2).run(5);
        assert_ne!(*a, *b);
    }

    #[test]
    fn land_stations_keep_sonar_empty() {
        let snap = FleetSimulator::builtin(3).run(20);
        let station = snap.device("REF-001").unwrap();
        assert!(station.sensors.dvm_depth.is_none());
        assert!(station.impact.dvm_protection_status.is_none());
        assert_eq!(snap.summary().land_devices, 2);
    }

    #[test]
    fn drained_device_goes_offline_and_stays_there() {
        let mut devices = builtin_devices();
        devices[2].health.battery_percent = 0.2;
        let mut sim = FleetSimulator::new(devices, 9);
        let snap = sim.run(5);
        let byblos = snap.device("L1-003").unwrap();
        assert_eq!(byblos.status, DeviceStatus::Offline);
        assert_eq!(snap.summary().offline_devices, 1);
    }

    #[test]
    fn uptime_advances_per_tick() {
        let mut sim = FleetSimulator::builtin(0);
        let start = sim.snapshot().devices[0].health.uptime_minutes;
        let snap = sim.run(3);
        assert_eq!(snap.devices[0].health.uptime_minutes, start + 3 * REPORT_INTERVAL_MIN);
    }
}
