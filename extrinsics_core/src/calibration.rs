//! Calibration input model
//!
//! The input is a mapping from sensor identifier to an object holding an
//! `extrinsics` mapping. That mapping carries exactly one direction label
//! whose value is a row-major 4x4 matrix:
//!
//! ```json
//! {
//!     "state": { ... },
//!     "cam_front": { "extrinsics": { "cTv": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]] } }
//! }
//! ```
//!
//! The top-level `state` key is bookkeeping from the calibration tool and is
//! skipped. JSON and YAML inputs decode into the same tree, and sensor order
//! follows the file.

use crate::error::{ExtrinsicsError, ExtrinsicsResult};
use nalgebra::Matrix4;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Top-level key that does not describe a sensor
pub const RESERVED_STATE_KEY: &str = "state";

/// Key of the per-sensor extrinsics mapping
pub const EXTRINSICS_KEY: &str = "extrinsics";

/// Direction in which an extrinsic transform is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `cTv`: maps vehicle coordinates into the sensor frame
    SensorFromVehicle,
    /// `vTc`: maps sensor coordinates into the vehicle frame (canonical)
    VehicleFromSensor,
}

impl Direction {
    pub const SENSOR_FROM_VEHICLE_LABEL: &'static str = "cTv";
    pub const VEHICLE_FROM_SENSOR_LABEL: &'static str = "vTc";

    /// Parse one of the two short codes
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            Self::SENSOR_FROM_VEHICLE_LABEL => Some(Self::SensorFromVehicle),
            Self::VEHICLE_FROM_SENSOR_LABEL => Some(Self::VehicleFromSensor),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SensorFromVehicle => Self::SENSOR_FROM_VEHICLE_LABEL,
            Self::VehicleFromSensor => Self::VEHICLE_FROM_SENSOR_LABEL,
        }
    }

    /// Whether the transform must be inverted to reach the canonical direction
    pub fn needs_inversion(self) -> bool {
        matches!(self, Self::SensorFromVehicle)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// `.yaml` / `.yml` select YAML, everything else is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// One sensor's extrinsic transform as found in the input
#[derive(Debug, Clone, PartialEq)]
pub struct SensorExtrinsics {
    pub sensor: String,
    pub direction: Direction,
    pub matrix: Matrix4<f64>,
}

/// All sensor entries of a calibration file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationSource {
    entries: Vec<SensorExtrinsics>,
}

impl CalibrationSource {
    /// Read and parse a calibration file
    pub fn load(path: impl AsRef<Path>) -> ExtrinsicsResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ExtrinsicsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let format = InputFormat::from_path(path);
        debug!("Parsing {} as {:?}", path.display(), format);
        Self::parse(&text, format)
    }

    /// Parse calibration text in the given format
    pub fn parse(text: &str, format: InputFormat) -> ExtrinsicsResult<Self> {
        let root: Value = match format {
            InputFormat::Json => serde_json::from_str(text)?,
            InputFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Self::from_value(root)
    }

    /// Build from an already decoded tree
    pub fn from_value(root: Value) -> ExtrinsicsResult<Self> {
        let Value::Object(sensors) = root else {
            return Err(ExtrinsicsError::InvalidRoot);
        };

        let mut entries = Vec::with_capacity(sensors.len());
        for (sensor, value) in sensors {
            if sensor == RESERVED_STATE_KEY {
                debug!("Skipping reserved key '{}'", sensor);
                continue;
            }
            entries.push(parse_sensor(sensor, value)?);
        }

        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<SensorExtrinsics>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SensorExtrinsics] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_sensor(sensor: String, value: Value) -> ExtrinsicsResult<SensorExtrinsics> {
    let extrinsics = match value {
        Value::Object(mut fields) => fields.remove(EXTRINSICS_KEY),
        _ => None,
    };
    let Some(Value::Object(extrinsics)) = extrinsics else {
        return Err(ExtrinsicsError::MissingExtrinsics { sensor });
    };

    let count = extrinsics.len();
    let mut labels = extrinsics.into_iter();
    let (label, matrix) = match (labels.next(), labels.next()) {
        (Some(only), None) => only,
        _ => return Err(ExtrinsicsError::DirectionLabelCount { sensor, count }),
    };

    let Some(direction) = Direction::from_label(&label) else {
        return Err(ExtrinsicsError::UnknownDirectionLabel { sensor, label });
    };

    let matrix = parse_matrix(&sensor, matrix)?;
    Ok(SensorExtrinsics {
        sensor,
        direction,
        matrix,
    })
}

fn parse_matrix(sensor: &str, value: Value) -> ExtrinsicsResult<Matrix4<f64>> {
    let malformed = |reason: String| ExtrinsicsError::MalformedMatrix {
        sensor: sensor.to_string(),
        reason,
    };

    let rows: Vec<Vec<f64>> = serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
    if rows.len() != 4 {
        return Err(malformed(format!("expected 4 rows, found {}", rows.len())));
    }
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != 4) {
        return Err(malformed(format!(
            "row {} has {} columns, expected 4",
            index,
            row.len()
        )));
    }

    Ok(Matrix4::from_fn(|row, col| rows[row][col]))
}
