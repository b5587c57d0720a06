//! Natural surface illumination over a 24-hour day.
//!
//! Simplified solar model: sunrise at 06:00, sunset at 18:00, one-hour linear
//! twilight ramps, cosine-like daylight peaking at noon, and a moonlit night
//! floored at starlight.

use serde::{Deserialize, Serialize};

// ── Reference surface levels (lux) ───────────────────────────────────────────

pub const FULL_SUN_LUX: f64 = 100_000.0;
pub const OVERCAST_LUX: f64 = 10_000.0;
pub const SUNSET_LUX: f64 = 400.0;
pub const CIVIL_TWILIGHT_LUX: f64 = 10.0;
pub const NAUTICAL_TWILIGHT_LUX: f64 = 1.0;
pub const FULL_MOON_LUX: f64 = 0.3;
pub const QUARTER_MOON_LUX: f64 = 0.05;
pub const STARLIGHT_LUX: f64 = 0.001;
pub const OVERCAST_NIGHT_LUX: f64 = 0.0001;

const SUNRISE_HOUR: f64 = 6.0;
const SUNSET_HOUR: f64 = 18.0;

/// Moon phase used when none is given: 0 = new, 0.5 = full, 1 = new.
pub const DEFAULT_MOON_PHASE: f64 = 0.5;

/// Wrap any hour value into [0, 24).
pub fn wrap_hour(hour: f64) -> f64 {
    let h = hour.rem_euclid(24.0);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs.
    if h >= 24.0 { 0.0 } else { h }
}

/// Natural surface light (lux) at `hour` for the given moon phase.
///
/// Always at least [`STARLIGHT_LUX`].
pub fn natural_surface_light(hour: f64, moon_phase: f64) -> f64 {
    let hour = wrap_hour(hour);

    if hour >= SUNRISE_HOUR + 1.0 && hour <= SUNSET_HOUR - 1.0 {
        let midday = (SUNRISE_HOUR + SUNSET_HOUR) / 2.0;
        let max_from_midday = (SUNSET_HOUR - SUNRISE_HOUR) / 2.0;
        let sun_angle_factor = 1.0 - ((hour - midday).abs() / max_from_midday) * 0.5;
        FULL_SUN_LUX * sun_angle_factor
    } else if hour >= SUNRISE_HOUR && hour < SUNRISE_HOUR + 1.0 {
        let progress = hour - SUNRISE_HOUR;
        CIVIL_TWILIGHT_LUX + progress * (OVERCAST_LUX - CIVIL_TWILIGHT_LUX)
    } else if hour > SUNSET_HOUR - 1.0 && hour <= SUNSET_HOUR {
        let progress = SUNSET_HOUR - hour;
        CIVIL_TWILIGHT_LUX + progress * (OVERCAST_LUX - CIVIL_TWILIGHT_LUX)
    } else {
        let moonlight = FULL_MOON_LUX * (moon_phase * std::f64::consts::PI).sin();
        moonlight.max(STARLIGHT_LUX)
    }
}

/// Surface light budget at one instant: natural plus additive artificial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightEnvironment {
    pub natural_lux: f64,
    pub artificial_lux: f64,
}

impl LightEnvironment {
    pub fn at(hour: f64, moon_phase: f64, artificial_lux: f64) -> Self {
        Self {
            natural_lux: natural_surface_light(hour, moon_phase),
            artificial_lux: artificial_lux.max(0.0),
        }
    }

    pub fn total_lux(&self) -> f64 {
        self.natural_lux + self.artificial_lux
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn noon_is_full_sun() {
        assert_relative_eq!(natural_surface_light(12.0, DEFAULT_MOON_PHASE), FULL_SUN_LUX);
    }

    #[test]
    fn morning_and_afternoon_are_symmetric() {
        for dh in [1.0, 2.5, 4.0, 5.0] {
            let am = natural_surface_light(12.0 - dh, 0.5);
            let pm = natural_surface_light(12.0 + dh, 0.5);
            assert_relative_eq!(am, pm, max_relative = 1e-12);
        }
    }

    #[test]
    fn twilight_ramps_start_at_civil_twilight() {
        assert_relative_eq!(natural_surface_light(6.0, 0.5), CIVIL_TWILIGHT_LUX);
        assert_relative_eq!(natural_surface_light(18.0, 0.5), CIVIL_TWILIGHT_LUX);
        let mid_dawn = natural_surface_light(6.5, 0.5);
        assert!(mid_dawn > CIVIL_TWILIGHT_LUX && mid_dawn < OVERCAST_LUX);
    }

    #[test]
    fn night_depends_on_moon_and_floors_at_starlight() {
        assert_relative_eq!(natural_surface_light(0.0, 0.5), FULL_MOON_LUX);
        assert_eq!(natural_surface_light(0.0, 0.0), STARLIGHT_LUX);
        assert_eq!(natural_surface_light(23.0, 1.0), STARLIGHT_LUX);
    }

    #[test]
    fn hours_wrap_around_the_day() {
        assert_eq!(natural_surface_light(36.0, 0.5), natural_surface_light(12.0, 0.5));
        assert_eq!(natural_surface_light(-1.0, 0.5), natural_surface_light(23.0, 0.5));
    }

    #[test]
    fn output_never_below_starlight() {
        for i in 0..480 {
            let h = i as f64 * 0.05;
            for phase in [0.0, 0.25, 0.5, 1.0] {
                assert!(natural_surface_light(h, phase) >= STARLIGHT_LUX);
            }
        }
    }

    #[test]
    fn environment_sums_sources() {
        let env = LightEnvironment::at(0.0, 0.5, 12.0);
        assert_relative_eq!(env.total_lux(), FULL_MOON_LUX + 12.0);
    }
}
