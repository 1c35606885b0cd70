//! ---
//! gpr_section: "02-protection-engine"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Protection rule evaluation and event logging for generator relaying."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::errors::{RelayError, Result};

pub const DEFAULT_CT_RATIO: f64 = 1000.0;

fn default_ct_ratio() -> f64 {
    DEFAULT_CT_RATIO
}

/// Raw electrical readings as they arrive from operators or input files.
///
/// Field units: current/rotor_current/rotor_leakage in amperes, voltage and
/// impedance and zero_seq_voltage and excitation in per-unit, frequency in
/// hertz, power in megawatts, power_angle in degrees, v_per_hz dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReading {
    pub current: f64,
    pub voltage: f64,
    pub frequency: f64,
    pub excitation: f64,
    pub rotor_current: f64,
    pub power: f64,
    pub impedance: f64,
    pub power_angle: f64,
    pub zero_seq_voltage: f64,
    pub rotor_leakage: f64,
    pub v_per_hz: f64,
    #[serde(default = "default_ct_ratio")]
    pub ct_ratio: f64,
}

/// Validated instantaneous generator state. Immutable once built; every
/// constructor path, serde included, runs the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotReading", into = "SnapshotReading")]
pub struct MeasurementSnapshot {
    current: f64,
    voltage: f64,
    frequency: f64,
    excitation: f64,
    rotor_current: f64,
    power: f64,
    impedance: f64,
    power_angle: f64,
    zero_seq_voltage: f64,
    rotor_leakage: f64,
    v_per_hz: f64,
    ct_ratio: f64,
}

impl MeasurementSnapshot {
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn excitation(&self) -> f64 {
        self.excitation
    }

    pub fn rotor_current(&self) -> f64 {
        self.rotor_current
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn impedance(&self) -> f64 {
        self.impedance
    }

    pub fn power_angle(&self) -> f64 {
        self.power_angle
    }

    pub fn zero_seq_voltage(&self) -> f64 {
        self.zero_seq_voltage
    }

    pub fn rotor_leakage(&self) -> f64 {
        self.rotor_leakage
    }

    pub fn v_per_hz(&self) -> f64 {
        self.v_per_hz
    }

    pub fn ct_ratio(&self) -> f64 {
        self.ct_ratio
    }
}

impl TryFrom<SnapshotReading> for MeasurementSnapshot {
    type Error = RelayError;

    fn try_from(reading: SnapshotReading) -> Result<Self> {
        // A NaN would make every strict comparison downstream silently false.
        let fields = [
            ("current", reading.current),
            ("voltage", reading.voltage),
            ("frequency", reading.frequency),
            ("excitation", reading.excitation),
            ("rotor_current", reading.rotor_current),
            ("power", reading.power),
            ("impedance", reading.impedance),
            ("power_angle", reading.power_angle),
            ("zero_seq_voltage", reading.zero_seq_voltage),
            ("rotor_leakage", reading.rotor_leakage),
            ("v_per_hz", reading.v_per_hz),
            ("ct_ratio", reading.ct_ratio),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(RelayError::NonFiniteSnapshotField { field, value });
            }
        }

        if reading.ct_ratio <= 0.0 {
            return Err(RelayError::NonPositiveCtRatio(reading.ct_ratio));
        }

        let magnitudes = [
            ("current", reading.current),
            ("impedance", reading.impedance),
            ("zero_seq_voltage", reading.zero_seq_voltage),
            ("rotor_leakage", reading.rotor_leakage),
            ("v_per_hz", reading.v_per_hz),
        ];
        for (field, value) in magnitudes {
            if value < 0.0 {
                return Err(RelayError::NegativeSnapshotField { field, value });
            }
        }

        Ok(Self {
            current: reading.current,
            voltage: reading.voltage,
            frequency: reading.frequency,
            excitation: reading.excitation,
            rotor_current: reading.rotor_current,
            power: reading.power,
            impedance: reading.impedance,
            power_angle: reading.power_angle,
            zero_seq_voltage: reading.zero_seq_voltage,
            rotor_leakage: reading.rotor_leakage,
            v_per_hz: reading.v_per_hz,
            ct_ratio: reading.ct_ratio,
        })
    }
}

impl From<MeasurementSnapshot> for SnapshotReading {
    fn from(snapshot: MeasurementSnapshot) -> Self {
        Self {
            current: snapshot.current,
            voltage: snapshot.voltage,
            frequency: snapshot.frequency,
            excitation: snapshot.excitation,
            rotor_current: snapshot.rotor_current,
            power: snapshot.power,
            impedance: snapshot.impedance,
            power_angle: snapshot.power_angle,
            zero_seq_voltage: snapshot.zero_seq_voltage,
            rotor_leakage: snapshot.rotor_leakage,
            v_per_hz: snapshot.v_per_hz,
            ct_ratio: snapshot.ct_ratio,
        }
    }
}
