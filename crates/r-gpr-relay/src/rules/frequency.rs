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
use crate::verdict::FrequencyBand;

fn default_overfreq_limit() -> f64 {
    51.0
}

fn default_underfreq_limit() -> f64 {
    49.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySettings {
    #[serde(default = "default_overfreq_limit")]
    pub overfreq_limit: f64,
    #[serde(default = "default_underfreq_limit")]
    pub underfreq_limit: f64,
}

impl Default for FrequencySettings {
    fn default() -> Self {
        Self {
            overfreq_limit: default_overfreq_limit(),
            underfreq_limit: default_underfreq_limit(),
        }
    }
}

/// Banded frequency check around nominal 50 Hz. Same branch order and
/// boundary behaviour as the voltage band.
pub fn frequency(
    snapshot: &MeasurementSnapshot,
    settings: &FrequencySettings,
) -> Result<FrequencyBand> {
    let upper = ensure_positive(RuleId::Frequency, "overfreq_limit", settings.overfreq_limit)?;
    let lower = ensure_positive(
        RuleId::Frequency,
        "underfreq_limit",
        settings.underfreq_limit,
    )?;
    ensure_ordered_band(RuleId::Frequency, upper, lower)?;

    if snapshot.frequency() > upper {
        Ok(FrequencyBand::OverfrequencyTrip)
    } else if snapshot.frequency() < lower {
        Ok(FrequencyBand::UnderfrequencyTrip)
    } else {
        Ok(FrequencyBand::Normal)
    }
}
