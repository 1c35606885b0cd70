//! ---
//! gpr_section: "02-protection-engine"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Protection rule evaluation and event logging for generator relaying."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use std::{fs, path::Path};

use crate::{
    errors::{RelayError, Result},
    measurement::SnapshotReading,
    orchestrator::ThresholdProfile,
};

pub fn load_snapshot_reading(path: impl AsRef<Path>) -> Result<SnapshotReading> {
    let data = fs::read_to_string(path)?;
    let reading = if data.trim_start().starts_with('{') {
        serde_json::from_str(&data)?
    } else {
        serde_yaml::from_str(&data).map_err(RelayError::YamlSerializationFailed)?
    };
    Ok(reading)
}

pub fn load_threshold_profile(path: impl AsRef<Path>) -> Result<ThresholdProfile> {
    let data = fs::read_to_string(path)?;
    let profile = if data.trim_start().starts_with('{') {
        serde_json::from_str(&data)?
    } else {
        serde_yaml::from_str(&data).map_err(RelayError::YamlSerializationFailed)?
    };
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_snapshot_reading_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "snapshot.json",
            r#"{
                "current": 1200.0,
                "voltage": 1.05,
                "frequency": 50.0,
                "excitation": 1.0,
                "rotor_current": 50.0,
                "power": -0.01,
                "impedance": 0.6,
                "power_angle": 130.0,
                "zero_seq_voltage": 0.06,
                "rotor_leakage": 0.12,
                "v_per_hz": 1.3
            }"#,
        );

        let reading = load_snapshot_reading(&path).unwrap();
        assert_eq!(reading.current, 1200.0);
        assert_eq!(reading.ct_ratio, 1000.0);
    }

    #[test]
    fn loads_snapshot_reading_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "snapshot.yaml",
            "current: 1200.0\nvoltage: 1.05\nfrequency: 50.0\nexcitation: 1.0\nrotor_current: 50.0\npower: -0.01\nimpedance: 0.6\npower_angle: 130.0\nzero_seq_voltage: 0.06\nrotor_leakage: 0.12\nv_per_hz: 1.3\nct_ratio: 800.0\n",
        );

        let reading = load_snapshot_reading(&path).unwrap();
        assert_eq!(reading.ct_ratio, 800.0);
    }

    #[test]
    fn loads_partial_profile_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "profile.yaml",
            "out_of_step:\n  limit_deg: 110.0\nvoltage:\n  overvoltage_limit: 1.15\n",
        );

        let profile = load_threshold_profile(&path).unwrap();
        assert_eq!(profile.out_of_step.limit_deg, 110.0);
        assert_eq!(profile.voltage.overvoltage_limit, 1.15);
        assert_eq!(profile.voltage.undervoltage_limit, 0.9);
        assert_eq!(profile.reverse_power.threshold, 0.05);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(matches!(
            load_snapshot_reading(&missing),
            Err(RelayError::Io(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "broken.json", "{\"current\": ");
        assert!(matches!(
            load_snapshot_reading(&path),
            Err(RelayError::SerializationFailed(_))
        ));
    }
}
