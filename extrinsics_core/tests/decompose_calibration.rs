// End-to-end tests: calibration file in, report file out
use approx::assert_abs_diff_eq;
use extrinsics_core::{run, DecomposeConfig, ExtrinsicsError, ValidationMode};
use serde_json::Value;
use std::f64::consts::FRAC_PI_2;
use std::fs;
use std::path::{Path, PathBuf};

const TOLERANCE: f64 = 1e-6;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_report(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("report should exist");
    serde_json::from_str(&text).expect("report should be valid JSON")
}

fn assert_pose(record: &Value, expected: [f64; 6]) {
    let fields = ["x", "y", "z", "roll", "pitch", "yaw"];
    assert_eq!(record.as_object().map(|o| o.len()), Some(6));
    for (field, want) in fields.iter().zip(expected) {
        let got = record[*field].as_f64().expect("numeric field");
        assert_abs_diff_eq!(got, want, epsilon = TOLERANCE);
    }
}

#[test]
fn test_json_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("calibration_AudiQ8_xyzrpy.json");
    let config = DecomposeConfig::new(fixture("calibration_sample.json"), &output);

    let report = run(&config).unwrap();
    assert_eq!(report.len(), 3);

    let value = read_report(&output);
    let vehicle = value["Audi Q8"].as_object().expect("vehicle key");
    let names: Vec<_> = vehicle.keys().map(String::as_str).collect();
    assert_eq!(names, ["vTc_lidar_top", "vTc_camera_front", "vTc_radar_front"]);

    assert_pose(&vehicle["vTc_lidar_top"], [1.25, 0.0, 1.95, 0.02, -0.01, 0.005]);
    assert_pose(
        &vehicle["vTc_camera_front"],
        [1.9, 0.0, 1.4, -FRAC_PI_2 + 0.01, 0.02, -FRAC_PI_2 - 0.015],
    );
    assert_pose(&vehicle["vTc_radar_front"], [3.6, 0.0, 0.55, 0.0, 0.0, 0.0]);
}

#[test]
fn test_yaml_matches_json() {
    let dir = tempfile::tempdir().unwrap();
    let json_out = dir.path().join("from_json.json");
    let yaml_out = dir.path().join("from_yaml.json");

    let from_json = run(&DecomposeConfig::new(fixture("calibration_sample.json"), &json_out)).unwrap();
    let from_yaml = run(&DecomposeConfig::new(fixture("calibration_sample.yaml"), &yaml_out)).unwrap();

    assert_eq!(from_json.len(), from_yaml.len());
    for (a, b) in from_json.records().iter().zip(from_yaml.records()) {
        assert_eq!(a.name, b.name);
        let expected = [a.pose.x, a.pose.y, a.pose.z, a.pose.roll, a.pose.pitch, a.pose.yaw];
        assert_pose(&serde_json::to_value(b.pose).unwrap(), expected);
    }
}

#[test]
fn test_pure_translation_camera() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("calibration.json");
    let output = dir.path().join("report.json");
    fs::write(
        &input,
        r#"{"cam0": {"extrinsics": {"cTv": [[1,0,0,1],[0,1,0,2],[0,0,1,3],[0,0,0,1]]}}}"#,
    )
    .unwrap();

    run(&DecomposeConfig::new(&input, &output)).unwrap();

    let value = read_report(&output);
    assert_pose(&value["Audi Q8"]["vTc_cam0"], [-1.0, -2.0, -3.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_state_key_is_never_a_record() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("calibration.json");
    let output = dir.path().join("report.json");
    fs::write(
        &input,
        r#"{
            "state": {"extrinsics": {"vTc": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}},
            "cam0": {"extrinsics": {"vTc": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}},
            "cam1": {"extrinsics": {"cTv": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}}
        }"#,
    )
    .unwrap();

    let report = run(&DecomposeConfig::new(&input, &output)).unwrap();
    assert_eq!(report.len(), 2);

    let value = read_report(&output);
    let vehicle = value["Audi Q8"].as_object().unwrap();
    assert_eq!(vehicle.len(), 2);
    assert!(!vehicle.keys().any(|k| k.contains("state")));
}

#[test]
fn test_custom_vehicle_id() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.json");
    let config = DecomposeConfig::new(fixture("calibration_sample.yaml"), &output)
        .with_vehicle_id("Test Rig 7");

    run(&config).unwrap();

    let value = read_report(&output);
    let root = value.as_object().unwrap();
    assert_eq!(root.len(), 1);
    assert!(root.contains_key("Test Rig 7"));
}

#[test]
fn test_existing_report_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.json");
    fs::write(&output, "old report").unwrap();

    run(&DecomposeConfig::new(fixture("calibration_sample.json"), &output)).unwrap();

    let value = read_report(&output);
    assert_eq!(value["Audi Q8"].as_object().unwrap().len(), 3);
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.json");
    let config = DecomposeConfig::new(dir.path().join("does_not_exist.json"), &output);

    let err = run(&config).unwrap_err();
    assert!(matches!(err, ExtrinsicsError::Io { .. }));
    assert!(!output.exists());
}

#[test]
fn test_bad_entry_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("calibration.json");
    let output = dir.path().join("report.json");
    fs::write(
        &input,
        r#"{
            "cam0": {"extrinsics": {"vTc": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}},
            "cam1": {"extrinsics": {"vTc": [[2,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}}
        }"#,
    )
    .unwrap();

    let err = run(&DecomposeConfig::new(&input, &output)).unwrap_err();
    assert!(matches!(err, ExtrinsicsError::InvalidTransform { ref sensor, .. } if sensor == "cam1"));
    assert!(!output.exists());
}

#[test]
fn test_unchecked_mode_accepts_non_rigid() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("calibration.json");
    let output = dir.path().join("report.json");
    fs::write(
        &input,
        r#"{"cam1": {"extrinsics": {"vTc": [[2,0,0,5],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}}}"#,
    )
    .unwrap();

    let config = DecomposeConfig::new(&input, &output).with_validation(ValidationMode::Unchecked);
    run(&config).unwrap();

    let value = read_report(&output);
    assert_eq!(value["Audi Q8"]["vTc_cam1"]["x"].as_f64(), Some(5.0));
}
