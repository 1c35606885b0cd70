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
use crate::rules::{ensure_positive, RuleId};

fn default_loss_of_excitation_threshold() -> f64 {
    0.5
}

fn default_rotor_earth_fault_threshold() -> f64 {
    0.1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossOfExcitationSettings {
    #[serde(default = "default_loss_of_excitation_threshold")]
    pub threshold: f64,
}

impl Default for LossOfExcitationSettings {
    fn default() -> Self {
        Self {
            threshold: default_loss_of_excitation_threshold(),
        }
    }
}

/// Field-failure check: an under-excited machine presents a large apparent
/// impedance at the terminals.
pub fn loss_of_excitation(
    snapshot: &MeasurementSnapshot,
    settings: &LossOfExcitationSettings,
) -> Result<bool> {
    let threshold = ensure_positive(RuleId::LossOfExcitation, "threshold", settings.threshold)?;
    Ok(snapshot.impedance() > threshold)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotorEarthFaultSettings {
    #[serde(default = "default_rotor_earth_fault_threshold")]
    pub threshold: f64,
}

impl Default for RotorEarthFaultSettings {
    fn default() -> Self {
        Self {
            threshold: default_rotor_earth_fault_threshold(),
        }
    }
}

pub fn rotor_earth_fault(
    snapshot: &MeasurementSnapshot,
    settings: &RotorEarthFaultSettings,
) -> Result<bool> {
    let threshold = ensure_positive(RuleId::RotorEarthFault, "threshold", settings.threshold)?;
    Ok(snapshot.rotor_leakage() > threshold)
}
