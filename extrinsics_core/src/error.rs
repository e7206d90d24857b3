//! Error types for loading, decomposing and writing calibration data

use crate::tf::TransformError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while processing a calibration file
#[derive(Debug, Error)]
pub enum ExtrinsicsError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Calibration root must be a mapping of sensor entries")]
    InvalidRoot,

    #[error("Sensor '{sensor}' has no 'extrinsics' mapping")]
    MissingExtrinsics { sensor: String },

    #[error("Sensor '{sensor}' must have exactly one direction label, found {count}")]
    DirectionLabelCount { sensor: String, count: usize },

    #[error("Sensor '{sensor}' uses unknown direction label '{label}' (expected 'cTv' or 'vTc')")]
    UnknownDirectionLabel { sensor: String, label: String },

    #[error("Sensor '{sensor}' has a malformed matrix: {reason}")]
    MalformedMatrix { sensor: String, reason: String },

    #[error("Sensor '{sensor}' is not a rigid transform: {source}")]
    InvalidTransform {
        sensor: String,
        #[source]
        source: TransformError,
    },
}

/// Result type for calibration processing
pub type ExtrinsicsResult<T> = Result<T, ExtrinsicsError>;
