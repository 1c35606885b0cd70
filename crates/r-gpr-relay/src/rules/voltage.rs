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
use crate::rules::{ensure_ordered_band, ensure_positive, RuleId};
use crate::verdict::VoltageBand;

fn default_overvoltage_limit() -> f64 {
    1.1
}

fn default_undervoltage_limit() -> f64 {
    0.9
}

fn default_stator_earth_fault_threshold() -> f64 {
    0.05
}

fn default_overfluxing_limit() -> f64 {
    1.2
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageSettings {
    #[serde(default = "default_overvoltage_limit")]
    pub overvoltage_limit: f64,
    #[serde(default = "default_undervoltage_limit")]
    pub undervoltage_limit: f64,
}

impl Default for VoltageSettings {
    fn default() -> Self {
        Self {
            overvoltage_limit: default_overvoltage_limit(),
            undervoltage_limit: default_undervoltage_limit(),
        }
    }
}

/// Banded voltage check. The overvoltage branch is tested first; a reading
/// exactly at either limit classifies as normal.
pub fn voltage(snapshot: &MeasurementSnapshot, settings: &VoltageSettings) -> Result<VoltageBand> {
    let upper = ensure_positive(
        RuleId::Voltage,
        "overvoltage_limit",
        settings.overvoltage_limit,
    )?;
    let lower = ensure_positive(
        RuleId::Voltage,
        "undervoltage_limit",
        settings.undervoltage_limit,
    )?;
    ensure_ordered_band(RuleId::Voltage, upper, lower)?;

    if snapshot.voltage() > upper {
        Ok(VoltageBand::OvervoltageTrip)
    } else if snapshot.voltage() < lower {
        Ok(VoltageBand::UndervoltageTrip)
    } else {
        Ok(VoltageBand::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatorEarthFaultSettings {
    #[serde(default = "default_stator_earth_fault_threshold")]
    pub threshold: f64,
}

impl Default for StatorEarthFaultSettings {
    fn default() -> Self {
        Self {
            threshold: default_stator_earth_fault_threshold(),
        }
    }
}

pub fn stator_earth_fault(
    snapshot: &MeasurementSnapshot,
    settings: &StatorEarthFaultSettings,
) -> Result<bool> {
    let threshold = ensure_positive(RuleId::StatorEarthFault, "threshold", settings.threshold)?;
    Ok(snapshot.zero_seq_voltage() > threshold)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverfluxingSettings {
    #[serde(default = "default_overfluxing_limit")]
    pub limit: f64,
}

impl Default for OverfluxingSettings {
    fn default() -> Self {
        Self {
            limit: default_overfluxing_limit(),
        }
    }
}

pub fn overfluxing(
    snapshot: &MeasurementSnapshot,
    settings: &OverfluxingSettings,
) -> Result<bool> {
    let limit = ensure_positive(RuleId::Overfluxing, "limit", settings.limit)?;
    Ok(snapshot.v_per_hz() > limit)
}
