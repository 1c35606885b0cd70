//! ---
//! gpr_section: "02-protection-engine"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Protection rule evaluation and event logging for generator relaying."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{RelayError, Result};

pub mod current;
pub mod excitation;
pub mod frequency;
pub mod power;
pub mod voltage;

pub use current::{
    differential, negative_sequence, overcurrent, DifferentialInputs, NegativeSequenceSettings,
    OvercurrentSettings,
};
pub use excitation::{
    loss_of_excitation, rotor_earth_fault, LossOfExcitationSettings, RotorEarthFaultSettings,
};
pub use frequency::{frequency, FrequencySettings};
pub use power::{out_of_step, reverse_power, OutOfStepSettings, ReversePowerSettings};
pub use voltage::{
    overfluxing, stator_earth_fault, voltage, OverfluxingSettings, StatorEarthFaultSettings,
    VoltageSettings,
};

/// Catalogue of the eleven protection functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Overcurrent,
    Differential,
    Voltage,
    ReversePower,
    NegativeSequence,
    Frequency,
    LossOfExcitation,
    StatorEarthFault,
    RotorEarthFault,
    OutOfStep,
    Overfluxing,
}

impl RuleId {
    pub const ALL: [RuleId; 11] = [
        RuleId::Overcurrent,
        RuleId::Differential,
        RuleId::Voltage,
        RuleId::ReversePower,
        RuleId::NegativeSequence,
        RuleId::Frequency,
        RuleId::LossOfExcitation,
        RuleId::StatorEarthFault,
        RuleId::RotorEarthFault,
        RuleId::OutOfStep,
        RuleId::Overfluxing,
    ];
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleId::Overcurrent => write!(f, "overcurrent"),
            RuleId::Differential => write!(f, "differential"),
            RuleId::Voltage => write!(f, "voltage"),
            RuleId::ReversePower => write!(f, "reverse_power"),
            RuleId::NegativeSequence => write!(f, "negative_sequence"),
            RuleId::Frequency => write!(f, "frequency"),
            RuleId::LossOfExcitation => write!(f, "loss_of_excitation"),
            RuleId::StatorEarthFault => write!(f, "stator_earth_fault"),
            RuleId::RotorEarthFault => write!(f, "rotor_earth_fault"),
            RuleId::OutOfStep => write!(f, "out_of_step"),
            RuleId::Overfluxing => write!(f, "overfluxing"),
        }
    }
}

pub(crate) fn ensure_finite(rule: RuleId, name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(RelayError::NonFiniteParameter { rule, name, value });
    }
    Ok(value)
}

pub(crate) fn ensure_positive(rule: RuleId, name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(rule, name, value)?;
    if value <= 0.0 {
        return Err(RelayError::NonPositiveParameter { rule, name, value });
    }
    Ok(value)
}

pub(crate) fn ensure_non_negative(rule: RuleId, name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(rule, name, value)?;
    if value < 0.0 {
        return Err(RelayError::NegativeInput { rule, name, value });
    }
    Ok(value)
}

pub(crate) fn ensure_ordered_band(rule: RuleId, upper: f64, lower: f64) -> Result<()> {
    if upper <= lower {
        return Err(RelayError::InvertedLimits { rule, upper, lower });
    }
    Ok(())
}
