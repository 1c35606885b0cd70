//! ---
//! gpr_section: "01-core-functionality"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Shared primitives and utilities for the relay runtime."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
//! Shared primitives for the R-GPR workspace.
//! This crate exposes the time-source abstraction used for event
//! timestamping and the tracing bootstrap consumed by the binaries.

pub mod clock;
pub mod logging;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{init, init_with_format, LogFormat};
