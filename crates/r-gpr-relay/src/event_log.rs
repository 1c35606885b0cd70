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
use serde::{Deserialize, Serialize};

use r_gpr_common::clock::{Clock, SystemClock};

/// Display format for rendered log lines, second resolution.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trip notification captured in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Sequential identifier assigned when appending, starting at 1.
    pub sequence: u64,
    /// Timestamp when the trip was recorded.
    pub timestamp: DateTime<Utc>,
    /// Fixed message of the protection function that tripped.
    pub message: String,
}

impl EventRecord {
    /// Render the entry as `<timestamp> - <message>`.
    pub fn render(&self) -> String {
        format!("{} - {}", self.timestamp.format(TIMESTAMP_FORMAT), self.message)
    }
}

/// Append-only, in-memory record of relay activations.
///
/// Entries are ordered by append time and never evicted; a long-lived relay
/// instance accumulates every trip it has ever recorded. Deployments that
/// evaluate continuously should recreate the relay per evaluation cycle.
pub struct EventLog {
    records: Vec<EventRecord>,
    next_sequence: u64,
    clock: Arc<dyn Clock>,
}

impl EventLog {
    /// Empty log stamping entries from the system wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Empty log stamping entries from the supplied clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            next_sequence: 0,
            clock,
        }
    }

    /// Append a trip message, stamping it with the clock's current time.
    /// Returns the assigned sequence number.
    pub fn log_event(&mut self, message: impl Into<String>) -> u64 {
        self.next_sequence += 1;
        self.records.push(EventRecord {
            sequence: self.next_sequence,
            timestamp: self.clock.now(),
            message: message.into(),
        });
        self.next_sequence
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the whole log as ordered display lines.
    pub fn rendered(&self) -> Vec<String> {
        self.records.iter().map(EventRecord::render).collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use r_gpr_common::clock::ManualClock;

    #[test]
    fn appends_preserve_order_and_sequence() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        let first = log.log_event("Overcurrent Trip Activated");
        let second = log.log_event("Reverse Power Trip");

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].message, "Overcurrent Trip Activated");
        assert_eq!(log.records()[1].message, "Reverse Power Trip");
    }

    #[test]
    fn rendered_lines_use_second_resolution() {
        let clock = Arc::new(ManualClock::fixed());
        let mut log = EventLog::with_clock(clock.clone());
        log.log_event("Overfluxing Trip");

        assert_eq!(
            log.rendered(),
            vec!["2024-05-01 12:00:00 - Overfluxing Trip".to_owned()]
        );
    }

    #[test]
    fn entries_carry_the_clock_time_at_append() {
        let clock = Arc::new(ManualClock::fixed());
        let mut log = EventLog::with_clock(clock.clone());

        log.log_event("Out-of-Step Trip");
        clock.advance(Duration::seconds(90));
        log.log_event("Loss of Excitation Trip");

        let lines = log.rendered();
        assert_eq!(lines[0], "2024-05-01 12:00:00 - Out-of-Step Trip");
        assert_eq!(lines[1], "2024-05-01 12:01:30 - Loss of Excitation Trip");
    }

    #[test]
    fn record_serializes_with_sequence() {
        let clock = Arc::new(ManualClock::fixed());
        let mut log = EventLog::with_clock(clock);
        log.log_event("Stator Earth Fault Trip");

        let json = serde_json::to_string(&log.records()[0]).unwrap();
        let back: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log.records()[0]);
        assert_eq!(back.sequence, 1);
    }
}
