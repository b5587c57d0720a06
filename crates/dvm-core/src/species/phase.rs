use std::fmt;

use serde::{Deserialize, Serialize};

use crate::light::wrap_hour;

/// Time-of-day behavioural state. A pure function of the wall-clock hour.
///
/// ```text
/// 05:00 ─ descending ─ 07:00 ─ deep ─ 17:00 ─ ascending ─ 19:00 ─ surface ─ 05:00
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationPhase {
    /// Dawn descent.
    Descending,
    /// Daytime refuge at depth.
    Deep,
    /// Dusk ascent.
    Ascending,
    /// Nighttime feeding near the surface.
    Surface,
}

impl MigrationPhase {
    pub fn from_hour(hour: f64) -> Self {
        let h = wrap_hour(hour);
        if (5.0..7.0).contains(&h) {
            MigrationPhase::Descending
        } else if (7.0..17.0).contains(&h) {
            MigrationPhase::Deep
        } else if (17.0..19.0).contains(&h) {
            MigrationPhase::Ascending
        } else {
            MigrationPhase::Surface
        }
    }

    /// True for the phases in which organisms occupy their night band.
    pub fn is_night(self) -> bool {
        matches!(self, MigrationPhase::Ascending | MigrationPhase::Surface)
    }

    pub fn key(self) -> &'static str {
        match self {
            MigrationPhase::Descending => "descending",
            MigrationPhase::Deep       => "deep",
            MigrationPhase::Ascending  => "ascending",
            MigrationPhase::Surface    => "surface",
        }
    }
}

impl fmt::Display for MigrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
