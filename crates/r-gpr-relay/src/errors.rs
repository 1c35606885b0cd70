//! ---
//! gpr_section: "02-protection-engine"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Protection rule evaluation and event logging for generator relaying."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use thiserror::Error;

use crate::rules::RuleId;

pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("ct ratio must be strictly positive, got {0}")]
    NonPositiveCtRatio(f64),
    #[error("snapshot field {field} must be non-negative, got {value}")]
    NegativeSnapshotField { field: &'static str, value: f64 },
    #[error("snapshot field {field} must be finite, got {value}")]
    NonFiniteSnapshotField { field: &'static str, value: f64 },
    #[error("{rule} parameter {name} must be strictly positive, got {value}")]
    NonPositiveParameter {
        rule: RuleId,
        name: &'static str,
        value: f64,
    },
    #[error("{rule} parameter {name} must be finite, got {value}")]
    NonFiniteParameter {
        rule: RuleId,
        name: &'static str,
        value: f64,
    },
    #[error("{rule} input {name} must be non-negative, got {value}")]
    NegativeInput {
        rule: RuleId,
        name: &'static str,
        value: f64,
    },
    #[error("{rule} upper limit {upper} must be strictly greater than lower limit {lower}")]
    InvertedLimits { rule: RuleId, upper: f64, lower: f64 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationFailed(#[from] serde_json::Error),
    #[error("yaml serialization error: {0}")]
    YamlSerializationFailed(#[from] serde_yaml::Error),
}
