//! Beer-Lambert attenuation through the water column.
//!
//! I(z) = I₀ · exp(−(k · wf · 10) · z / 10)
//!
//! where k is the clarity coefficient and wf the wavelength factor. With the
//! default white light (wf = 0.1) the effective decay rate is k / 10 per metre.

use crate::error::{DvmError, Result};

use super::clarity::{WaterClarity, Wavelength};

/// Scale applied to the inverse-square horizontal term before vertical decay.
const ARTIFICIAL_SOURCE_SCALE: f64 = 1000.0;

/// Hard cap on the horizontal suppression radius (m).
pub const MAX_SUPPRESSION_RADIUS_M: f64 = 5000.0;

/// Sensitivity used when no organism-specific threshold is given (lux).
pub const DEFAULT_SENSITIVITY_LUX: f64 = 0.001;

/// Light at `depth_m` for white light.
pub fn light_at_depth(surface_lux: f64, depth_m: f64, clarity: WaterClarity) -> f64 {
    light_at_depth_for(surface_lux, depth_m, clarity, Wavelength::White)
}

/// Light at `depth_m` for the given wavelength.
///
/// Negative inputs are treated as zero, so the result is never negative and
/// never increases with depth.
pub fn light_at_depth_for(
    surface_lux: f64,
    depth_m: f64,
    clarity: WaterClarity,
    wavelength: Wavelength,
) -> f64 {
    let total_attenuation = clarity.coefficient() * wavelength.factor() * 10.0;
    surface_lux.max(0.0) * (-total_attenuation * depth_m.max(0.0) / 10.0).exp()
}

/// Effective per-metre decay rate for white light.
fn white_decay_rate(clarity: WaterClarity) -> f64 {
    clarity.coefficient() * Wavelength::White.factor()
}

/// Depth (m) at which white light from `surface_lux` falls to `threshold_lux`.
///
/// Exact inverse of [`light_at_depth`]. Returns 0 when the surface is already
/// at or below the threshold.
pub fn penetration_depth(surface_lux: f64, threshold_lux: f64, clarity: WaterClarity) -> Result<f64> {
    if !(threshold_lux > 0.0) {
        return Err(DvmError::NonPositiveThreshold { threshold: threshold_lux });
    }
    if surface_lux <= threshold_lux {
        return Ok(0.0);
    }
    Ok((surface_lux / threshold_lux).ln() / white_decay_rate(clarity))
}

/// Light reaching a point `horizontal_distance_m` away from an artificial
/// source and `depth_m` below the surface.
///
/// Inverse-square horizontal falloff (distance floored at 1 m) followed by
/// vertical attenuation.
pub fn artificial_light_at_point(
    source_lux: f64,
    horizontal_distance_m: f64,
    depth_m: f64,
    clarity: WaterClarity,
) -> f64 {
    let distance = horizontal_distance_m.max(1.0);
    let horizontal = source_lux / (distance * distance);
    light_at_depth(horizontal * ARTIFICIAL_SOURCE_SCALE, depth_m, clarity)
}

/// Horizontal radius (m) within which a source suppresses migration of an
/// organism with the given sensitivity. Capped at 5 km.
pub fn suppression_radius(source_lux: f64, sensitivity_lux: f64) -> f64 {
    if source_lux <= 0.0 {
        return 0.0;
    }
    if sensitivity_lux <= 0.0 {
        return MAX_SUPPRESSION_RADIUS_M;
    }
    ((source_lux / sensitivity_lux).sqrt() * 0.5).min(MAX_SUPPRESSION_RADIUS_M)
}
