//! Sampled light-versus-depth curves for the simulator's water column view.

use serde::{Deserialize, Serialize};

use crate::error::{DvmError, Result};

use super::attenuation::light_at_depth;
use super::clarity::WaterClarity;
use super::zones::OceanZone;

/// `light_log` value reported where no light remains.
const DARK_LOG10: f64 = -10.0;

/// Largest number of samples a single profile may hold.
pub const MAX_PROFILE_SAMPLES: usize = 1_000_000;

/// One sample of a light profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    pub depth: f64,
    pub light: f64,
    /// log10 of `light`, or −10 when light is zero.
    pub light_log: f64,
    pub zone: OceanZone,
}

/// Sample the attenuation curve at 0, step, 2·step … up to `max_depth`
/// inclusive.
pub fn light_profile(
    surface_lux: f64,
    max_depth: f64,
    step: f64,
    clarity: WaterClarity,
) -> Result<Vec<ProfileSample>> {
    if !(step > 0.0) {
        return Err(DvmError::InvalidStep { step });
    }
    if !max_depth.is_finite() {
        return Err(DvmError::NonFiniteDepth { depth: max_depth });
    }
    if max_depth < 0.0 {
        return Ok(Vec::new());
    }

    // Index-based stepping avoids accumulated float drift at the last sample.
    let steps = (max_depth / step + 1e-9).floor();
    if !(steps < MAX_PROFILE_SAMPLES as f64) {
        return Err(DvmError::TooManySamples { samples: steps + 1.0, limit: MAX_PROFILE_SAMPLES });
    }
    let n = steps as usize;
    let samples = (0..=n)
        .map(|i| {
            let depth = i as f64 * step;
            let light = light_at_depth(surface_lux, depth, clarity);
            ProfileSample {
                depth,
                light,
                light_log: if light > 0.0 { light.log10() } else { DARK_LOG10 },
                zone: OceanZone::from_depth(depth),
            }
        })
        .collect();
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_both_endpoints() {
        let p = light_profile(1000.0, 500.0, 10.0, WaterClarity::Moderate).unwrap();
        assert_eq!(p.len(), 51);
        assert_eq!(p.first().unwrap().depth, 0.0);
        assert_eq!(p.last().unwrap().depth, 500.0);
    }

    #[test]
    fn non_multiple_max_stops_below_it() {
        let p = light_profile(1000.0, 25.0, 10.0, WaterClarity::Moderate).unwrap();
        let depths: Vec<f64> = p.iter().map(|s| s.depth).collect();
        assert_eq!(depths, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn light_decreases_and_zones_are_tagged() {
        let p = light_profile(100_000.0, 1200.0, 100.0, WaterClarity::Clear).unwrap();
        for pair in p.windows(2) {
            assert!(pair[1].light < pair[0].light);
        }
        assert_eq!(p[0].zone, OceanZone::Epipelagic);
        assert_eq!(p[2].zone, OceanZone::Mesopelagic);
        assert_eq!(p[12].zone, OceanZone::Bathypelagic);
    }

    #[test]
    fn dark_surface_reports_sentinel_log() {
        let p = light_profile(0.0, 20.0, 10.0, WaterClarity::Clear).unwrap();
        assert!(p.iter().all(|s| s.light_log == -10.0));
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(light_profile(1.0, 10.0, 0.0, WaterClarity::Clear).is_err());
        assert!(light_profile(1.0, 10.0, -5.0, WaterClarity::Clear).is_err());
    }

    #[test]
    fn rejects_unbounded_depth() {
        for depth in [f64::INFINITY, f64::NAN] {
            let err = light_profile(1.0, depth, 1.0, WaterClarity::Clear).unwrap_err();
            assert!(matches!(err, DvmError::NonFiniteDepth { .. }), "{depth}: {err}");
        }
    }

    #[test]
    fn rejects_oversized_sample_count() {
        let err = light_profile(1.0, 1e12, 1.0, WaterClarity::Clear).unwrap_err();
        assert!(matches!(err, DvmError::TooManySamples { limit: MAX_PROFILE_SAMPLES, .. }));
        let tiny_step = light_profile(1.0, 10.0, 1e-300, WaterClarity::Clear);
        assert!(tiny_step.is_err());
        let at_limit = light_profile(1.0, (MAX_PROFILE_SAMPLES - 1) as f64, 1.0, WaterClarity::Clear).unwrap();
        assert_eq!(at_limit.len(), MAX_PROFILE_SAMPLES);
    }

    #[test]
    fn is_restartable() {
        let a = light_profile(5000.0, 300.0, 7.5, WaterClarity::Turbid).unwrap();
        let b = light_profile(5000.0, 300.0, 7.5, WaterClarity::Turbid).unwrap();
        assert_eq!(a, b);
    }
}
