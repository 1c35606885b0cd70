//! ---
//! gpr_section: "01-core-functionality"
//! gpr_subsection: "module"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Shared primitives and utilities for the relay runtime."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

const LOG_ENV: &str = "R-GPR_LOG";

/// Available log formats for the tooling binaries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    StructuredJson,
    Pretty,
}

/// Initialize a baseline tracing subscriber suitable for interactive use.
///
/// Equivalent to [`init_with_format`] with [`LogFormat::Pretty`].
pub fn init() {
    init_with_format(LogFormat::Pretty);
}

/// Initialize the tracing subscriber with an explicit output format.
///
/// The filter honours the `R-GPR_LOG` directive first, then the standard
/// `RUST_LOG` variable, and finally defaults to `info`. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init_with_format(format: LogFormat) {
    let filter = env_filter();
    match format {
        LogFormat::StructuredJson => {
            let _ = Registry::default()
                .with(filter)
                .with(fmt::layer().with_target(false).json())
                .try_init();
        }
        LogFormat::Pretty => {
            let _ = Registry::default().with(filter).with(fmt::layer()).try_init();
        }
    }
}

// Honour the custom `R-GPR_LOG` directive first, then fall back to the
// standard `RUST_LOG` environment variable, then to `info`.
fn env_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to info logging",
                LOG_ENV, err
            );
            EnvFilter::new("info")
        }),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}
