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

/// Three-way classification produced by voltage protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoltageBand {
    OvervoltageTrip,
    UndervoltageTrip,
    Normal,
}

impl VoltageBand {
    pub fn is_trip(&self) -> bool {
        !matches!(self, VoltageBand::Normal)
    }
}

impl fmt::Display for VoltageBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoltageBand::OvervoltageTrip => write!(f, "Overvoltage Trip"),
            VoltageBand::UndervoltageTrip => write!(f, "Undervoltage Trip"),
            VoltageBand::Normal => write!(f, "Voltage Normal"),
        }
    }
}

/// Three-way classification produced by frequency protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyBand {
    OverfrequencyTrip,
    UnderfrequencyTrip,
    Normal,
}

impl FrequencyBand {
    pub fn is_trip(&self) -> bool {
        !matches!(self, FrequencyBand::Normal)
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyBand::OverfrequencyTrip => write!(f, "Overfrequency Trip"),
            FrequencyBand::UnderfrequencyTrip => write!(f, "Underfrequency Trip"),
            FrequencyBand::Normal => write!(f, "Frequency Normal"),
        }
    }
}

/// Unified per-rule outcome collected by plan evaluation. Produced fresh on
/// every call; never cached against the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Trip,
    Clear,
    Voltage(VoltageBand),
    Frequency(FrequencyBand),
}

impl Verdict {
    pub fn is_trip(&self) -> bool {
        match self {
            Verdict::Trip => true,
            Verdict::Clear => false,
            Verdict::Voltage(band) => band.is_trip(),
            Verdict::Frequency(band) => band.is_trip(),
        }
    }
}

impl From<bool> for Verdict {
    fn from(tripped: bool) -> Self {
        if tripped {
            Verdict::Trip
        } else {
            Verdict::Clear
        }
    }
}

impl From<VoltageBand> for Verdict {
    fn from(band: VoltageBand) -> Self {
        Verdict::Voltage(band)
    }
}

impl From<FrequencyBand> for Verdict {
    fn from(band: FrequencyBand) -> Self {
        Verdict::Frequency(band)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Trip => write!(f, "Trip"),
            Verdict::Clear => write!(f, "Clear"),
            Verdict::Voltage(band) => band.fmt(f),
            Verdict::Frequency(band) => band.fmt(f),
        }
    }
}
