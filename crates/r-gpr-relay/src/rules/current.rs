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
use crate::rules::{ensure_finite, ensure_non_negative, ensure_positive, RuleId};

fn default_pickup_factor() -> f64 {
    1.2
}

fn default_negative_sequence_threshold() -> f64 {
    0.1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvercurrentSettings {
    #[serde(default = "default_pickup_factor")]
    pub pickup_factor: f64,
}

impl Default for OvercurrentSettings {
    fn default() -> Self {
        Self {
            pickup_factor: default_pickup_factor(),
        }
    }
}

/// Instantaneous overcurrent check.
///
/// The pickup current is scaled from the measured current itself rather than
/// a separate rated current, so with the stock settings any positive current
/// trips as long as `pickup_factor` stays below the CT ratio. Kept as the
/// commissioned relay computes it.
pub fn overcurrent(snapshot: &MeasurementSnapshot, settings: &OvercurrentSettings) -> Result<bool> {
    let pickup_factor = ensure_positive(
        RuleId::Overcurrent,
        "pickup_factor",
        settings.pickup_factor,
    )?;
    let pickup_current = pickup_factor * snapshot.current() / snapshot.ct_ratio();
    Ok(snapshot.current() > pickup_current)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferentialInputs {
    pub terminal_current_1: f64,
    pub terminal_current_2: f64,
}

/// Differential check across the two stator terminals. Restraint is fixed at
/// 20 % of generator current.
pub fn differential(snapshot: &MeasurementSnapshot, inputs: DifferentialInputs) -> Result<bool> {
    let terminal_1 = ensure_finite(
        RuleId::Differential,
        "terminal_current_1",
        inputs.terminal_current_1,
    )?;
    let terminal_2 = ensure_finite(
        RuleId::Differential,
        "terminal_current_2",
        inputs.terminal_current_2,
    )?;
    let differential_current = (terminal_1 - terminal_2).abs();
    Ok(differential_current > 0.2 * snapshot.current())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegativeSequenceSettings {
    #[serde(default = "default_negative_sequence_threshold")]
    pub threshold: f64,
}

impl Default for NegativeSequenceSettings {
    fn default() -> Self {
        Self {
            threshold: default_negative_sequence_threshold(),
        }
    }
}

pub fn negative_sequence(
    snapshot: &MeasurementSnapshot,
    unbalanced_current: f64,
    settings: &NegativeSequenceSettings,
) -> Result<bool> {
    let threshold = ensure_positive(RuleId::NegativeSequence, "threshold", settings.threshold)?;
    let unbalanced = ensure_non_negative(
        RuleId::NegativeSequence,
        "unbalanced_current",
        unbalanced_current,
    )?;
    Ok(unbalanced > threshold * snapshot.current())
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
    fn overcurrent_trips_for_any_positive_current_at_stock_settings() {
        let tripped = overcurrent(&snapshot(|_| {}), &OvercurrentSettings::default()).unwrap();
        assert!(tripped);
        let tripped = overcurrent(
            &snapshot(|r| r.current = 0.001),
            &OvercurrentSettings::default(),
        )
        .unwrap();
        assert!(tripped);
    }

    #[test]
    fn overcurrent_holds_at_zero_current() {
        // 0 > 1.2 * 0 / 1000 is false.
        let tripped = overcurrent(
            &snapshot(|r| r.current = 0.0),
            &OvercurrentSettings::default(),
        )
        .unwrap();
        assert!(!tripped);
    }

    #[test]
    fn overcurrent_holds_when_factor_reaches_ct_ratio() {
        let settings = OvercurrentSettings {
            pickup_factor: 1000.0,
        };
        let tripped = overcurrent(&snapshot(|_| {}), &settings).unwrap();
        assert!(!tripped);
        let settings = OvercurrentSettings {
            pickup_factor: 999.9,
        };
        assert!(overcurrent(&snapshot(|_| {}), &settings).unwrap());
    }

    #[test]
    fn overcurrent_rejects_non_positive_pickup_factor() {
        let settings = OvercurrentSettings { pickup_factor: 0.0 };
        assert!(matches!(
            overcurrent(&snapshot(|_| {}), &settings),
            Err(RelayError::NonPositiveParameter {
                rule: RuleId::Overcurrent,
                ..
            })
        ));
    }

    #[test]
    fn differential_compares_against_restraint() {
        let inputs = DifferentialInputs {
            terminal_current_1: 100.0,
            terminal_current_2: 50.0,
        };
        // |100 - 50| = 50 against 0.2 * 1200 = 240.
        assert!(!differential(&snapshot(|_| {}), inputs).unwrap());
        // Same spread against 0.2 * 200 = 40.
        assert!(differential(&snapshot(|r| r.current = 200.0), inputs).unwrap());
    }

    #[test]
    fn differential_boundary_does_not_trip() {
        let inputs = DifferentialInputs {
            terminal_current_1: 240.0,
            terminal_current_2: 0.0,
        };
        assert!(!differential(&snapshot(|_| {}), inputs).unwrap());
        let inputs = DifferentialInputs {
            terminal_current_1: 241.0,
            terminal_current_2: 0.0,
        };
        assert!(differential(&snapshot(|_| {}), inputs).unwrap());
    }

    #[test]
    fn differential_is_symmetric_in_terminals() {
        let spread = DifferentialInputs {
            terminal_current_1: 10.0,
            terminal_current_2: 300.0,
        };
        assert!(differential(&snapshot(|_| {}), spread).unwrap());
    }

    #[test]
    fn differential_rejects_nan_terminal() {
        let inputs = DifferentialInputs {
            terminal_current_1: f64::NAN,
            terminal_current_2: 50.0,
        };
        assert!(matches!(
            differential(&snapshot(|_| {}), inputs),
            Err(RelayError::NonFiniteParameter {
                rule: RuleId::Differential,
                ..
            })
        ));
    }

    #[test]
    fn negative_sequence_trips_above_scaled_threshold() {
        let settings = NegativeSequenceSettings::default();
        // Threshold is 0.1 * 1200 = 120.
        assert!(!negative_sequence(&snapshot(|_| {}), 120.0, &settings).unwrap());
        assert!(negative_sequence(&snapshot(|_| {}), 121.0, &settings).unwrap());
    }

    #[test]
    fn negative_sequence_rejects_negative_unbalance() {
        let settings = NegativeSequenceSettings::default();
        assert!(matches!(
            negative_sequence(&snapshot(|_| {}), -1.0, &settings),
            Err(RelayError::NegativeInput {
                rule: RuleId::NegativeSequence,
                ..
            })
        ));
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let parsed: OvercurrentSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.pickup_factor, 1.2);
        let parsed: NegativeSequenceSettings =
            serde_json::from_str("{\"threshold\": 0.25}").unwrap();
        assert_eq!(parsed.threshold, 0.25);
    }
}
