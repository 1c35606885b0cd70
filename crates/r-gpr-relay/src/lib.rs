//! ---
//! gpr_section: "02-protection-engine"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Protection rule evaluation and event logging for generator relaying."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
pub mod errors;
pub mod event_log;
pub mod io;
pub mod measurement;
pub mod orchestrator;
pub mod relay;
pub mod rules;
pub mod verdict;

pub use errors::{RelayError, Result};
pub use event_log::{EventLog, EventRecord};
pub use measurement::{MeasurementSnapshot, SnapshotReading, DEFAULT_CT_RATIO};
pub use orchestrator::{evaluate, ProtectionSummary, RulePlan, RuleRequest, ThresholdProfile};
pub use relay::GeneratorRelay;
pub use rules::RuleId;
pub use verdict::{FrequencyBand, Verdict, VoltageBand};

/// Evaluates the nine snapshot-only protection functions at stock settings.
///
/// For custom settings or the externally fed functions (differential,
/// negative sequence), build a [`RulePlan`] and call [`evaluate`].
pub fn evaluate_standard(relay: &GeneratorRelay) -> Result<ProtectionSummary> {
    orchestrator::evaluate(relay, &RulePlan::standard())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_evaluation_end_to_end() {
        let reading = SnapshotReading {
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
        let relay = GeneratorRelay::new(reading).unwrap();
        let summary = evaluate_standard(&relay).unwrap();

        assert_eq!(summary.verdicts.len(), 9);
        assert_eq!(summary.trip_count(), 7);
        assert_eq!(relay.event_log().len(), 7);
    }
}
