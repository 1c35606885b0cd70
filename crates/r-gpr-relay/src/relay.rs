//! ---
//! gpr_section: "02-protection-engine"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Protection rule evaluation and event logging for generator relaying."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::warn;
use uuid::Uuid;

use r_gpr_common::clock::{Clock, SystemClock};

use crate::errors::Result;
use crate::event_log::{EventLog, EventRecord};
use crate::measurement::{MeasurementSnapshot, SnapshotReading};
use crate::rules::{
    self, DifferentialInputs, FrequencySettings, LossOfExcitationSettings,
    NegativeSequenceSettings, OutOfStepSettings, OvercurrentSettings, OverfluxingSettings,
    ReversePowerSettings, RotorEarthFaultSettings, RuleId, StatorEarthFaultSettings,
    VoltageSettings,
};
use crate::verdict::{FrequencyBand, VoltageBand};

/// One protection relay armed with a single validated snapshot.
///
/// The snapshot is immutable for the relay's lifetime; the event log is the
/// only mutable state and is guarded by one lock, so a relay may be shared
/// across threads behind an `Arc`.
pub struct GeneratorRelay {
    relay_id: Uuid,
    snapshot: MeasurementSnapshot,
    clock: Arc<dyn Clock>,
    log: Mutex<EventLog>,
}

impl GeneratorRelay {
    /// Arm a relay on the given reading, stamping log entries from the
    /// system wall clock. Validation failures surface here; a bad reading is
    /// never silently replaced with defaults.
    pub fn new(reading: SnapshotReading) -> Result<Self> {
        Self::with_clock(reading, Arc::new(SystemClock))
    }

    /// Arm a relay with an explicit time source for log timestamps.
    pub fn with_clock(reading: SnapshotReading, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self {
            relay_id: Uuid::new_v4(),
            snapshot: MeasurementSnapshot::try_from(reading)?,
            clock: clock.clone(),
            log: Mutex::new(EventLog::with_clock(clock)),
        })
    }

    pub fn relay_id(&self) -> Uuid {
        self.relay_id
    }

    pub(crate) fn clock_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn snapshot(&self) -> &MeasurementSnapshot {
        &self.snapshot
    }

    pub fn overcurrent_protection(&self, settings: &OvercurrentSettings) -> Result<bool> {
        let tripped = rules::overcurrent(&self.snapshot, settings)?;
        if tripped {
            self.record_trip(RuleId::Overcurrent, "Overcurrent Trip Activated");
        }
        Ok(tripped)
    }

    pub fn differential_protection(&self, inputs: DifferentialInputs) -> Result<bool> {
        let tripped = rules::differential(&self.snapshot, inputs)?;
        if tripped {
            self.record_trip(RuleId::Differential, "Differential Protection Trip");
        }
        Ok(tripped)
    }

    pub fn voltage_protection(&self, settings: &VoltageSettings) -> Result<VoltageBand> {
        let band = rules::voltage(&self.snapshot, settings)?;
        match band {
            VoltageBand::OvervoltageTrip => self.record_trip(RuleId::Voltage, "Overvoltage Trip"),
            VoltageBand::UndervoltageTrip => {
                self.record_trip(RuleId::Voltage, "Undervoltage Trip")
            }
            VoltageBand::Normal => {}
        }
        Ok(band)
    }

    pub fn reverse_power_protection(&self, settings: &ReversePowerSettings) -> Result<bool> {
        let tripped = rules::reverse_power(&self.snapshot, settings)?;
        if tripped {
            self.record_trip(RuleId::ReversePower, "Reverse Power Trip");
        }
        Ok(tripped)
    }

    pub fn negative_sequence_protection(
        &self,
        unbalanced_current: f64,
        settings: &NegativeSequenceSettings,
    ) -> Result<bool> {
        let tripped = rules::negative_sequence(&self.snapshot, unbalanced_current, settings)?;
        if tripped {
            self.record_trip(RuleId::NegativeSequence, "Negative Sequence Trip");
        }
        Ok(tripped)
    }

    pub fn frequency_protection(&self, settings: &FrequencySettings) -> Result<FrequencyBand> {
        let band = rules::frequency(&self.snapshot, settings)?;
        match band {
            FrequencyBand::OverfrequencyTrip => {
                self.record_trip(RuleId::Frequency, "Overfrequency Trip")
            }
            FrequencyBand::UnderfrequencyTrip => {
                self.record_trip(RuleId::Frequency, "Underfrequency Trip")
            }
            FrequencyBand::Normal => {}
        }
        Ok(band)
    }

    pub fn loss_of_excitation_protection(
        &self,
        settings: &LossOfExcitationSettings,
    ) -> Result<bool> {
        let tripped = rules::loss_of_excitation(&self.snapshot, settings)?;
        if tripped {
            self.record_trip(RuleId::LossOfExcitation, "Loss of Excitation Trip");
        }
        Ok(tripped)
    }

    pub fn stator_earth_fault_protection(
        &self,
        settings: &StatorEarthFaultSettings,
    ) -> Result<bool> {
        let tripped = rules::stator_earth_fault(&self.snapshot, settings)?;
        if tripped {
            self.record_trip(RuleId::StatorEarthFault, "Stator Earth Fault Trip");
        }
        Ok(tripped)
    }

    pub fn rotor_earth_fault_protection(&self, settings: &RotorEarthFaultSettings) -> Result<bool> {
        let tripped = rules::rotor_earth_fault(&self.snapshot, settings)?;
        if tripped {
            self.record_trip(RuleId::RotorEarthFault, "Rotor Earth Fault Trip");
        }
        Ok(tripped)
    }

    pub fn out_of_step_protection(&self, settings: &OutOfStepSettings) -> Result<bool> {
        let tripped = rules::out_of_step(&self.snapshot, settings)?;
        if tripped {
            self.record_trip(RuleId::OutOfStep, "Out-of-Step Trip");
        }
        Ok(tripped)
    }

    pub fn overfluxing_protection(&self, settings: &OverfluxingSettings) -> Result<bool> {
        let tripped = rules::overfluxing(&self.snapshot, settings)?;
        if tripped {
            self.record_trip(RuleId::Overfluxing, "Overfluxing Trip");
        }
        Ok(tripped)
    }

    /// Ordered copy of every recorded activation.
    pub fn event_log(&self) -> Vec<EventRecord> {
        self.log.lock().records().to_vec()
    }

    /// The activation log rendered as `<timestamp> - <message>` lines.
    pub fn rendered_event_log(&self) -> Vec<String> {
        self.log.lock().rendered()
    }

    fn record_trip(&self, rule: RuleId, message: &str) {
        let sequence = self.log.lock().log_event(message);
        warn!(relay_id = %self.relay_id, rule = %rule, sequence, "{}", message);
    }
}
