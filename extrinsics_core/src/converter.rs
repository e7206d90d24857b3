//! Calibration-record transformer
//!
//! Turns every sensor entry into a pose record expressed in the canonical
//! vehicle-from-sensor direction, then hands the collection to the report
//! writer.

use crate::calibration::{CalibrationSource, Direction, SensorExtrinsics};
use crate::config::{DecomposeConfig, ValidationMode};
use crate::error::{ExtrinsicsError, ExtrinsicsResult};
use crate::pose::Pose;
use crate::report::{CalibrationReport, PoseRecord};
use crate::tf::RigidTransform;
use tracing::{debug, info, warn};

/// Record name for a sensor entry.
///
/// Inverted entries are renamed to the canonical prefix; canonical entries
/// keep their own label.
pub fn record_name(entry: &SensorExtrinsics) -> String {
    let prefix = if entry.direction.needs_inversion() {
        Direction::VEHICLE_FROM_SENSOR_LABEL
    } else {
        entry.direction.label()
    };
    format!("{}_{}", prefix, entry.sensor)
}

/// Decompose one sensor entry into a named pose
pub fn decompose_entry(
    entry: &SensorExtrinsics,
    mode: ValidationMode,
) -> ExtrinsicsResult<PoseRecord> {
    let transform = match mode {
        ValidationMode::Checked => RigidTransform::try_from_matrix(entry.matrix).map_err(
            |source| ExtrinsicsError::InvalidTransform {
                sensor: entry.sensor.clone(),
                source,
            },
        )?,
        ValidationMode::Unchecked => RigidTransform::from_matrix_unchecked(entry.matrix),
    };

    let transform = if entry.direction.needs_inversion() {
        transform.inverse()
    } else {
        transform
    };

    let record = PoseRecord {
        name: record_name(entry),
        pose: Pose::from_transform(&transform),
    };
    debug!(
        "{} ({}) -> {}: {:?}",
        entry.sensor, entry.direction, record.name, record.pose
    );
    Ok(record)
}

/// Decompose every entry of a calibration source.
///
/// Fails on the first bad entry; no partial report is returned.
pub fn decompose_calibration(
    source: &CalibrationSource,
    vehicle_id: &str,
    mode: ValidationMode,
) -> ExtrinsicsResult<CalibrationReport> {
    let mut report = CalibrationReport::new(vehicle_id);
    for entry in source.entries() {
        report.insert(decompose_entry(entry, mode)?);
    }
    Ok(report)
}

/// Load, decompose and write in one pass
pub fn run(config: &DecomposeConfig) -> ExtrinsicsResult<CalibrationReport> {
    if config.validation == ValidationMode::Unchecked {
        warn!("Rigidity checks disabled; non-rigid transforms will decompose silently");
    }

    let source = CalibrationSource::load(&config.input_path)?;
    info!(
        "Loaded {} sensor(s) from {}",
        source.len(),
        config.input_path.display()
    );

    let report = decompose_calibration(&source, &config.vehicle_id, config.validation)?;
    report.write(&config.output_path)?;
    Ok(report)
}
