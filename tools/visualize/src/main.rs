//! Diagnostic visualizer: writes PNG charts of one species' day to data/debug/.
//!
//! 1. migration_day.png: light field over 24 h x depth, with the natural
//!    (green) and polluted (red) depth traces on top.
//! 2. light_profile.png: ocean zones beside the attenuated light gradient.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use dvm_core::light::{light_at_depth, LightEnvironment, OceanZone};
use dvm_core::{simulate_day, DayCycle, SpeciesCatalog, WaterClarity};

/// Pixels per simulated hour.
const HOUR_PX: usize = 20;
const W: usize = 24 * HOUR_PX;
const H: usize = 400;

const PROFILE_W: usize = 96;
const PROFILE_H: usize = 500;

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render a species' migration day and a light profile to PNG")]
struct Args {
    #[arg(short, long, default_value = "copepods")]
    species: String,

    /// Artificial surface light (lux).
    #[arg(short, long, default_value_t = 100.0)]
    lux: f64,

    #[arg(short, long, default_value = "moderate")]
    clarity: WaterClarity,

    /// Depth covered by the light-profile strip (m).
    #[arg(long, default_value_t = 1000.0)]
    profile_depth: f64,

    #[arg(short, long, default_value = "data/debug")]
    output: String,
}

// ── Colour helpers ────────────────────────────────────────────────────────────

/// `#RRGGBB` → RGB. Malformed input renders magenta.
fn hex_rgb(hex: &str) -> [u8; 3] {
    let h = hex.trim_start_matches('#');
    let channel = |i: usize| h.get(i..i + 2).and_then(|s| u8::from_str_radix(s, 16).ok());
    match (h.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => [r, g, b],
        _ => [255, 0, 255],
    }
}

/// Light relative to a threshold → navy (dark) through cyan to yellow.
/// Six decades above the threshold saturate.
fn light_rgb(light: f64, threshold: f64) -> [u8; 3] {
    if light <= threshold {
        return [8, 16, 40];
    }
    let t = ((light / threshold).log10() / 6.0).clamp(0.0, 1.0);
    if t < 0.5 {
        let u = t * 2.0;
        [(20.0 * (1.0 - u)) as u8, (60.0 + 140.0 * u) as u8, (120.0 + 100.0 * u) as u8]
    } else {
        let u = (t - 0.5) * 2.0;
        [(240.0 * u) as u8, (200.0 + 40.0 * u) as u8, (220.0 * (1.0 - u)) as u8]
    }
}

/// Depth (m) → row, clamped into the image.
fn depth_row(depth: f64, max_depth: f64, height: usize) -> usize {
    let r = (depth / max_depth * (height - 1) as f64).round();
    r.clamp(0.0, (height - 1) as f64) as usize
}

fn draw_trace(img: &mut image::RgbImage, day: &DayCycle, max_depth: f64, color: [u8; 3]) {
    let depths: Vec<f64> = day.hourly_data.iter().map(|h| h.migration.current_depth).collect();
    for c in 0..W {
        // Linear interpolation between hourly samples, wrapping 23 → 0.
        let x = c as f64 / HOUR_PX as f64;
        let i = x.floor() as usize % depths.len();
        let j = (i + 1) % depths.len();
        let f = x - x.floor();
        let d = depths[i] * (1.0 - f) + depths[j] * f;
        let r = depth_row(d, max_depth, H);
        for rr in r.saturating_sub(1)..=(r + 1).min(H - 1) {
            img.put_pixel(c as u32, rr as u32, image::Rgb(color));
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let catalog = SpeciesCatalog::builtin();
    let species = catalog.require(&args.species)?;
    let clarity = args.clarity;

    let out_dir = Path::new(&args.output);
    fs::create_dir_all(out_dir).with_context(|| format!("cannot create {}", out_dir.display()))?;

    println!("Simulating {} at {} lux in {clarity} water…", species.id, args.lux);
    let natural = simulate_day(species, 0.0, clarity);
    let polluted = simulate_day(species, args.lux, clarity);
    let max_depth = (species.day_depth.max * 1.1).max(50.0);

    // ── 1. migration_day.png ─────────────────────────────────────────────────
    {
        let mut img = image::RgbImage::new(W as u32, H as u32);
        for c in 0..W {
            let hour = c as f64 / HOUR_PX as f64;
            let surface = LightEnvironment::at(hour, dvm_core::light::DEFAULT_MOON_PHASE, args.lux).total_lux();
            for r in 0..H {
                let depth = r as f64 / (H - 1) as f64 * max_depth;
                let px = light_rgb(light_at_depth(surface, depth, clarity), species.light_sensitivity);
                img.put_pixel(c as u32, r as u32, image::Rgb(px));
            }
        }
        // Hour ticks every 6 h.
        for c in (0..W).step_by(6 * HOUR_PX) {
            for r in 0..H {
                img.put_pixel(c as u32, r as u32, image::Rgb([90, 90, 90]));
            }
        }
        draw_trace(&mut img, &natural, max_depth, [40, 220, 90]);
        draw_trace(&mut img, &polluted, max_depth, [230, 40, 40]);

        let path = out_dir.join("migration_day.png");
        img.save(&path).with_context(|| format!("failed to save {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    // ── 2. light_profile.png ─────────────────────────────────────────────────
    {
        let surface = LightEnvironment::at(0.0, dvm_core::light::DEFAULT_MOON_PHASE, args.lux).total_lux();
        let mut img = image::RgbImage::new(PROFILE_W as u32, PROFILE_H as u32);
        for r in 0..PROFILE_H {
            let depth = r as f64 / (PROFILE_H - 1) as f64 * args.profile_depth;
            let zone = hex_rgb(OceanZone::from_depth(depth).color());
            let light = light_rgb(light_at_depth(surface, depth, clarity), species.light_sensitivity);
            for c in 0..PROFILE_W {
                let px = if c < PROFILE_W / 3 { zone } else { light };
                img.put_pixel(c as u32, r as u32, image::Rgb(px));
            }
        }
        let path = out_dir.join("light_profile.png");
        img.save(&path).with_context(|| format!("failed to save {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!(
        "Max suppression {:.0} m (natural day {:.0} m).",
        polluted.summary.max_suppression_depth, natural.summary.max_suppression_depth
    );
    println!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_rgb("#58B1F0"), [0x58, 0xB1, 0xF0]);
        assert_eq!(hex_rgb("000000"), [0, 0, 0]);
        assert_eq!(hex_rgb("#12"), [255, 0, 255]);
    }

    #[test]
    fn dark_below_threshold() {
        assert_eq!(light_rgb(0.0005, 0.001), [8, 16, 40]);
        assert_ne!(light_rgb(1.0, 0.001), [8, 16, 40]);
    }

    #[test]
    fn depth_rows_clamp() {
        assert_eq!(depth_row(0.0, 400.0, H), 0);
        assert_eq!(depth_row(400.0, 400.0, H), H - 1);
        assert_eq!(depth_row(9_999.0, 400.0, H), H - 1);
    }
}
