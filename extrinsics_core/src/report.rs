//! Calibration report
//!
//! Serialized as a single top-level vehicle key holding one pose per record:
//!
//! ```json
//! {
//!     "Audi Q8": {
//!         "vTc_cam0": {
//!             "x": -1.0,
//!             "y": -2.0,
//!             "z": -3.0,
//!             "roll": 0.0,
//!             "pitch": -0.0,
//!             "yaw": 0.0
//!         }
//!     }
//! }
//! ```

use crate::error::{ExtrinsicsError, ExtrinsicsResult};
use crate::pose::Pose;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fs;
use std::path::Path;
use tracing::info;

/// Indentation of the written report
const REPORT_INDENT: &[u8] = b"    ";

/// Named pose
#[derive(Debug, Clone, PartialEq)]
pub struct PoseRecord {
    pub name: String,
    pub pose: Pose,
}

/// Ordered set of pose records under one vehicle identifier
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationReport {
    vehicle: String,
    records: Vec<PoseRecord>,
}

impl CalibrationReport {
    pub fn new(vehicle: impl Into<String>) -> Self {
        Self {
            vehicle: vehicle.into(),
            records: Vec::new(),
        }
    }

    /// Add a record, replacing an existing one with the same name in place
    pub fn insert(&mut self, record: PoseRecord) {
        match self.records.iter_mut().find(|r| r.name == record.name) {
            Some(existing) => existing.pose = record.pose,
            None => self.records.push(record),
        }
    }

    pub fn vehicle(&self) -> &str {
        &self.vehicle
    }

    pub fn records(&self) -> &[PoseRecord] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&Pose> {
        self.records.iter().find(|r| r.name == name).map(|r| &r.pose)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render as indented JSON
    pub fn to_pretty_json(&self) -> ExtrinsicsResult<String> {
        let bytes = self.render()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write the report, overwriting any existing file.
    ///
    /// The whole document is rendered before the file is touched, so a
    /// serialization failure leaves no partial output behind.
    pub fn write(&self, path: impl AsRef<Path>) -> ExtrinsicsResult<()> {
        let path = path.as_ref();
        let bytes = self.render()?;
        fs::write(path, bytes).map_err(|source| ExtrinsicsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "Wrote {} record(s) for '{}' to {}",
            self.records.len(),
            self.vehicle,
            path.display()
        );
        Ok(())
    }

    fn render(&self) -> ExtrinsicsResult<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(REPORT_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(buffer)
    }
}

struct RecordMap<'a>(&'a [PoseRecord]);

impl Serialize for RecordMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for record in self.0 {
            map.serialize_entry(&record.name, &record.pose)?;
        }
        map.end()
    }
}

impl Serialize for CalibrationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.vehicle, &RecordMap(&self.records))?;
        map.end()
    }
}
