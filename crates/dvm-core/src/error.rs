//! Domain errors for the engine.
//!
//! Every core operation is total over well-formed input. The variants below
//! cover the few numeric inputs for which a formula is undefined, plus the
//! catalog and parameter parsing boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DvmError {
    /// `ln(threshold / surface)` has no value for a threshold at or below zero.
    #[error("penetration depth is undefined for non-positive threshold {threshold} lux")]
    NonPositiveThreshold { threshold: f64 },

    /// Migration plus basal cost is zero, so efficiency has no finite value.
    #[error("energy efficiency is undefined when total energy cost is zero (species `{species}`)")]
    ZeroEnergyCost { species: String },

    #[error("profile step must be positive, got {step} m")]
    InvalidStep { step: f64 },

    #[error("profile depth must be finite, got {depth} m")]
    NonFiniteDepth { depth: f64 },

    #[error("profile would need {samples} samples, more than the limit of {limit}")]
    TooManySamples { samples: f64, limit: usize },

    #[error("unknown species `{0}`")]
    UnknownSpecies(String),

    #[error("unknown {kind} key `{key}`")]
    UnknownKey { kind: &'static str, key: String },

    #[error("invalid model parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DvmError>;
