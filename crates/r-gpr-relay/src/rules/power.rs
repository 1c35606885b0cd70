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

use crate::errors::Result;
use crate::measurement::MeasurementSnapshot;
use crate::rules::{ensure_finite, ensure_positive, RuleId};

fn default_reverse_power_threshold() -> f64 {
    0.05
}

fn default_out_of_step_limit() -> f64 {
    120.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReversePowerSettings {
    #[serde(default = "default_reverse_power_threshold")]
    pub threshold: f64,
}

impl Default for ReversePowerSettings {
    fn default() -> Self {
        Self {
            threshold: default_reverse_power_threshold(),
        }
    }
}

/// Reverse power check. The threshold sits slightly above zero, so low
/// forward power trips alongside genuine motoring; kept as the commissioned
/// relay computes it. A negative threshold is a valid motoring margin.
pub fn reverse_power(
    snapshot: &MeasurementSnapshot,
    settings: &ReversePowerSettings,
) -> Result<bool> {
    let threshold = ensure_finite(RuleId::ReversePower, "threshold", settings.threshold)?;
    Ok(snapshot.power() < threshold)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutOfStepSettings {
    #[serde(default = "default_out_of_step_limit")]
    pub limit_deg: f64,
}

impl Default for OutOfStepSettings {
    fn default() -> Self {
        Self {
            limit_deg: default_out_of_step_limit(),
        }
    }
}

/// Pole-slip check on the rotor angle magnitude, either direction of swing.
pub fn out_of_step(snapshot: &MeasurementSnapshot, settings: &OutOfStepSettings) -> Result<bool> {
    let limit = ensure_positive(RuleId::OutOfStep, "limit_deg", settings.limit_deg)?;
    Ok(snapshot.power_angle().abs() > limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RelayError;
    use crate::measurement::SnapshotReading;

    fn snapshot(update: impl FnOnce(&mut SnapshotReading)) -> MeasurementSnapshot {
        let mut reading = SnapshotReading {
            current: 1200.0,
            voltage: 1.05,
            frequency: 50.0,
            excitation: 1.0,
            rotor_current: 50.0,
            power: -0.01,
            impedance: 0.6,
            power_angle: 130.0,
            zero_seq_voltage: 0.06,
            rotor_leakage: 0.12,
            v_per_hz: 1.3,
            ct_ratio: 1000.0,
        };
        update(&mut reading);
        MeasurementSnapshot::try_from(reading).unwrap()
    }

    #[test]
    fn reverse_power_trips_below_threshold() {
        let settings = ReversePowerSettings::default();
        assert!(reverse_power(&snapshot(|_| {}), &settings).unwrap());
        assert!(reverse_power(&snapshot(|r| r.power = 0.04), &settings).unwrap());
        assert!(!reverse_power(&snapshot(|r| r.power = 0.06), &settings).unwrap());
    }

    #[test]
    fn reverse_power_boundary_does_not_trip() {
        let settings = ReversePowerSettings::default();
        assert!(!reverse_power(&snapshot(|r| r.power = 0.05), &settings).unwrap());
    }

    #[test]
    fn reverse_power_accepts_negative_margin() {
        let settings = ReversePowerSettings { threshold: -0.5 };
        assert!(!reverse_power(&snapshot(|r| r.power = -0.2), &settings).unwrap());
        assert!(reverse_power(&snapshot(|r| r.power = -0.8), &settings).unwrap());
    }

    #[test]
    fn reverse_power_rejects_nan_threshold() {
        let settings = ReversePowerSettings {
            threshold: f64::NAN,
        };
        assert!(matches!(
            reverse_power(&snapshot(|_| {}), &settings),
            Err(RelayError::NonFiniteParameter {
                rule: RuleId::ReversePower,
                ..
            })
        ));
    }

    #[test]
    fn out_of_step_uses_angle_magnitude() {
        let settings = OutOfStepSettings::default();
        assert!(out_of_step(&snapshot(|_| {}), &settings).unwrap());
        assert!(out_of_step(&snapshot(|r| r.power_angle = -130.0), &settings).unwrap());
        assert!(!out_of_step(&snapshot(|r| r.power_angle = 110.0), &settings).unwrap());
    }

    #[test]
    fn out_of_step_boundary_does_not_trip() {
        let settings = OutOfStepSettings::default();
        assert!(!out_of_step(&snapshot(|r| r.power_angle = 120.0), &settings).unwrap());
        assert!(out_of_step(&snapshot(|r| r.power_angle = 121.0), &settings).unwrap());
    }

    #[test]
    fn out_of_step_rejects_non_positive_limit() {
        let settings = OutOfStepSettings { limit_deg: 0.0 };
        assert!(matches!(
            out_of_step(&snapshot(|_| {}), &settings),
            Err(RelayError::NonPositiveParameter {
                rule: RuleId::OutOfStep,
                ..
            })
        ));
    }
}
