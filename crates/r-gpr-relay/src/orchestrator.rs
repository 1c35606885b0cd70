//! ---
//! gpr_section: "02-protection-engine"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Protection rule evaluation and event logging for generator relaying."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::Result;
use crate::relay::GeneratorRelay;
use crate::rules::{
    DifferentialInputs, FrequencySettings, LossOfExcitationSettings, NegativeSequenceSettings,
    OutOfStepSettings, OvercurrentSettings, OverfluxingSettings, ReversePowerSettings,
    RotorEarthFaultSettings, RuleId, StatorEarthFaultSettings, VoltageSettings,
};
use crate::verdict::Verdict;

/// One protection function to run, together with everything it needs beyond
/// the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleRequest {
    Overcurrent(OvercurrentSettings),
    Differential(DifferentialInputs),
    Voltage(VoltageSettings),
    ReversePower(ReversePowerSettings),
    NegativeSequence {
        unbalanced_current: f64,
        settings: NegativeSequenceSettings,
    },
    Frequency(FrequencySettings),
    LossOfExcitation(LossOfExcitationSettings),
    StatorEarthFault(StatorEarthFaultSettings),
    RotorEarthFault(RotorEarthFaultSettings),
    OutOfStep(OutOfStepSettings),
    Overfluxing(OverfluxingSettings),
}

impl RuleRequest {
    pub fn rule(&self) -> RuleId {
        match self {
            RuleRequest::Overcurrent(_) => RuleId::Overcurrent,
            RuleRequest::Differential(_) => RuleId::Differential,
            RuleRequest::Voltage(_) => RuleId::Voltage,
            RuleRequest::ReversePower(_) => RuleId::ReversePower,
            RuleRequest::NegativeSequence { .. } => RuleId::NegativeSequence,
            RuleRequest::Frequency(_) => RuleId::Frequency,
            RuleRequest::LossOfExcitation(_) => RuleId::LossOfExcitation,
            RuleRequest::StatorEarthFault(_) => RuleId::StatorEarthFault,
            RuleRequest::RotorEarthFault(_) => RuleId::RotorEarthFault,
            RuleRequest::OutOfStep(_) => RuleId::OutOfStep,
            RuleRequest::Overfluxing(_) => RuleId::Overfluxing,
        }
    }
}

/// Settings bundle for every rule, loadable from partial override files;
/// anything absent falls back to the stock values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdProfile {
    pub overcurrent: OvercurrentSettings,
    pub voltage: VoltageSettings,
    pub reverse_power: ReversePowerSettings,
    pub negative_sequence: NegativeSequenceSettings,
    pub frequency: FrequencySettings,
    pub loss_of_excitation: LossOfExcitationSettings,
    pub stator_earth_fault: StatorEarthFaultSettings,
    pub rotor_earth_fault: RotorEarthFaultSettings,
    pub out_of_step: OutOfStepSettings,
    pub overfluxing: OverfluxingSettings,
}

/// Ordered list of protection functions to evaluate against one relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulePlan {
    requests: Vec<RuleRequest>,
}

impl RulePlan {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// The nine functions needing nothing beyond the snapshot, at stock
    /// settings.
    pub fn standard() -> Self {
        Self::from_profile(&ThresholdProfile::default())
    }

    /// All eleven functions at stock settings. Differential terminal
    /// currents and the unbalanced current cannot come from the snapshot and
    /// must be supplied.
    pub fn full(differential: DifferentialInputs, unbalanced_current: f64) -> Self {
        let profile = ThresholdProfile::default();
        let mut plan = Self::new();
        plan.push(RuleRequest::Overcurrent(profile.overcurrent));
        plan.push(RuleRequest::Differential(differential));
        plan.push(RuleRequest::Voltage(profile.voltage));
        plan.push(RuleRequest::ReversePower(profile.reverse_power));
        plan.push(RuleRequest::NegativeSequence {
            unbalanced_current,
            settings: profile.negative_sequence,
        });
        plan.push(RuleRequest::Frequency(profile.frequency));
        plan.push(RuleRequest::LossOfExcitation(profile.loss_of_excitation));
        plan.push(RuleRequest::StatorEarthFault(profile.stator_earth_fault));
        plan.push(RuleRequest::RotorEarthFault(profile.rotor_earth_fault));
        plan.push(RuleRequest::OutOfStep(profile.out_of_step));
        plan.push(RuleRequest::Overfluxing(profile.overfluxing));
        plan
    }

    /// The nine snapshot-only functions at the profile's settings.
    pub fn from_profile(profile: &ThresholdProfile) -> Self {
        let mut plan = Self::new();
        plan.push(RuleRequest::Overcurrent(profile.overcurrent));
        plan.push(RuleRequest::Voltage(profile.voltage));
        plan.push(RuleRequest::ReversePower(profile.reverse_power));
        plan.push(RuleRequest::Frequency(profile.frequency));
        plan.push(RuleRequest::LossOfExcitation(profile.loss_of_excitation));
        plan.push(RuleRequest::StatorEarthFault(profile.stator_earth_fault));
        plan.push(RuleRequest::RotorEarthFault(profile.rotor_earth_fault));
        plan.push(RuleRequest::OutOfStep(profile.out_of_step));
        plan.push(RuleRequest::Overfluxing(profile.overfluxing));
        plan
    }

    pub fn push(&mut self, request: RuleRequest) {
        self.requests.push(request);
    }

    pub fn requests(&self) -> &[RuleRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl Default for RulePlan {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-rule verdicts of one plan evaluation, in plan order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionSummary {
    pub relay_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub verdicts: IndexMap<RuleId, Verdict>,
}

impl ProtectionSummary {
    pub fn trip_count(&self) -> usize {
        self.verdicts.values().filter(|v| v.is_trip()).count()
    }

    pub fn tripped(&self) -> Vec<RuleId> {
        self.verdicts
            .iter()
            .filter(|(_, verdict)| verdict.is_trip())
            .map(|(rule, _)| *rule)
            .collect()
    }

    pub fn all_clear(&self) -> bool {
        self.verdicts.values().all(|v| !v.is_trip())
    }
}

/// Run every request in plan order and collect the verdicts. Evaluation
/// stops at the first invalid request; trips recorded before the failure
/// stay in the relay's event log. A rule listed twice is evaluated twice and
/// keeps the later verdict.
pub fn evaluate(relay: &GeneratorRelay, plan: &RulePlan) -> Result<ProtectionSummary> {
    let mut verdicts: IndexMap<RuleId, Verdict> = IndexMap::with_capacity(plan.len());

    for request in plan.requests() {
        let verdict: Verdict = match request {
            RuleRequest::Overcurrent(settings) => relay.overcurrent_protection(settings)?.into(),
            RuleRequest::Differential(inputs) => relay.differential_protection(*inputs)?.into(),
            RuleRequest::Voltage(settings) => relay.voltage_protection(settings)?.into(),
            RuleRequest::ReversePower(settings) => {
                relay.reverse_power_protection(settings)?.into()
            }
            RuleRequest::NegativeSequence {
                unbalanced_current,
                settings,
            } => relay
                .negative_sequence_protection(*unbalanced_current, settings)?
                .into(),
            RuleRequest::Frequency(settings) => relay.frequency_protection(settings)?.into(),
            RuleRequest::LossOfExcitation(settings) => {
                relay.loss_of_excitation_protection(settings)?.into()
            }
            RuleRequest::StatorEarthFault(settings) => {
                relay.stator_earth_fault_protection(settings)?.into()
            }
            RuleRequest::RotorEarthFault(settings) => {
                relay.rotor_earth_fault_protection(settings)?.into()
            }
            RuleRequest::OutOfStep(settings) => relay.out_of_step_protection(settings)?.into(),
            RuleRequest::Overfluxing(settings) => relay.overfluxing_protection(settings)?.into(),
        };
        verdicts.insert(request.rule(), verdict);
    }

    let summary = ProtectionSummary {
        relay_id: relay.relay_id(),
        timestamp: relay.clock_now(),
        verdicts,
    };
    info!(
        relay_id = %summary.relay_id,
        rules = summary.verdicts.len(),
        trips = summary.trip_count(),
        "protection plan evaluated"
    );
    Ok(summary)
}
