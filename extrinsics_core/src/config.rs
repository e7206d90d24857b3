//! Run configuration
//!
//! Paths are always explicit; the library carries no default input or output
//! location.

use std::path::PathBuf;

/// Top-level identifier written above all records
pub const DEFAULT_VEHICLE_ID: &str = "Audi Q8";

/// Whether transforms are checked for rigidity before use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Reject non-rigid matrices with a descriptive error
    #[default]
    Checked,
    /// Trust the input; non-rigid matrices decompose into meaningless angles
    Unchecked,
}

/// Configuration for a single decomposition run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposeConfig {
    /// Calibration file to read (JSON or YAML)
    pub input_path: PathBuf,
    /// Report file to write; overwritten if it exists
    pub output_path: PathBuf,
    /// Key the records are nested under in the report
    ///
    /// Default: [`DEFAULT_VEHICLE_ID`]
    pub vehicle_id: String,
    /// Default: [`ValidationMode::Checked`]
    pub validation: ValidationMode,
}

impl DecomposeConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            vehicle_id: DEFAULT_VEHICLE_ID.to_string(),
            validation: ValidationMode::default(),
        }
    }

    pub fn with_vehicle_id(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = vehicle_id.into();
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }
}
