use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for lanemap.
#[derive(Debug, Error)]
pub enum LanemapError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors caused by an invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("transform scale must be finite and non-zero, got {0}")]
    ZeroScale(f64),

    #[error("invalid warp: {0}")]
    InvalidWarp(String),

    #[error("rotation must be finite, got {0}")]
    InvalidRotation(f64),

    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("lane spacing must be finite, got {0}")]
    InvalidLaneSpacing(f64),

    #[error("switch distance must be finite and non-negative, got {0}")]
    InvalidSwitchDistance(f64),

    #[error("corner at ({x}, {y}) could not be resolved to a finite point")]
    CornerUnresolved { x: f64, y: f64 },
}

/// Precondition failures when tracing a route.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("route {route:?} has {points} points, at least 3 are required")]
    InsufficientPoints { route: String, points: usize },
}

/// Errors while parsing route data or configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid {column} value {value:?}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for results using [`LanemapError`].
pub type Result<T> = std::result::Result<T, LanemapError>;
