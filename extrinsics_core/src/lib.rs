//! # Extrinsics Core
//!
//! Decomposes the extrinsic calibration of a vehicle's sensor suite into
//! translation and roll/pitch/yaw.
//!
//! A calibration file maps each sensor to one 4x4 rigid transform, stored
//! either as `cTv` (vehicle into sensor) or `vTc` (sensor into vehicle).
//! Every transform is normalized to `vTc`, split into `{x, y, z, roll,
//! pitch, yaw}` and written to a single indented JSON report.
//!
//! - **tf**: rigid transform inverse and Euler decomposition
//! - **calibration**: input model for JSON / YAML calibration files
//! - **converter**: per-sensor direction handling and decomposition
//! - **report**: ordered pose records and the JSON writer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use extrinsics_core::{run, DecomposeConfig};
//!
//! let config = DecomposeConfig::new("calibration_AudiQ8.json", "calibration_AudiQ8_xyzrpy.json");
//! let report = run(&config)?;
//! println!("{} records", report.len());
//! # Ok::<(), extrinsics_core::ExtrinsicsError>(())
//! ```

pub mod calibration;
pub mod config;
pub mod converter;
pub mod error;
pub mod pose;
pub mod report;
pub mod tf;

pub use calibration::{CalibrationSource, Direction, InputFormat, SensorExtrinsics, RESERVED_STATE_KEY};
pub use config::{DecomposeConfig, ValidationMode, DEFAULT_VEHICLE_ID};
pub use converter::{decompose_calibration, decompose_entry, record_name, run};
pub use error::{ExtrinsicsError, ExtrinsicsResult};
pub use pose::Pose;
pub use report::{CalibrationReport, PoseRecord};
pub use tf::{rpy_from_rotation, EulerAngles, RigidTransform};
