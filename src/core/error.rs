//! Error types for tree generation and editing

use glam::DVec3;
use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "No direction within {min_angle}..={max_angle} degrees of {reference} after {attempts} samples"
    )]
    SamplingExhausted {
        reference: DVec3,
        min_angle: f64,
        max_angle: f64,
        attempts: u32,
    },

    #[error("Cannot normalize a zero-length vector")]
    ZeroVector,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems found while reading the host parameter mapping.
///
/// Always raised before any voxel is touched.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing option \"{0}\"")]
    Missing(String),

    #[error("option \"{key}\" must be {expected}")]
    WrongType { key: String, expected: &'static str },

    #[error("option \"{key}\" is out of range: {reason}")]
    OutOfRange { key: String, reason: String },

    #[error("unknown operation \"{0}\"")]
    UnknownOperation(String),
}
