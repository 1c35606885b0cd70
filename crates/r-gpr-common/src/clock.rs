//! ---
//! gpr_section: "01-core-functionality"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Shared primitives and utilities for the relay runtime."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;

/// Source of wall-clock time for event timestamping.
///
/// The relay stamps every event-log entry through this trait so that
/// tests can substitute a deterministic source while production code
/// keeps reading the system clock.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic tests.
///
/// The instant only moves when `set` or `advance` is called.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at the supplied instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Create a clock frozen at an arbitrary but fixed reference instant.
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("reference instant is unambiguous");
        Self::new(start)
    }

    /// Jump the clock to the supplied instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock() = instant;
    }

    /// Move the clock forward by the supplied duration.
    pub fn advance(&self, step: Duration) {
        let mut current = self.current.lock();
        *current += step;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}
