//! ---
//! gpr_section: "03-operator-tooling"
//! gpr_subsection: "binary"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Operator CLI for evaluating generator protection snapshots."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use anyhow::Result;
use clap::{Args, ValueEnum};

use r_gpr_relay::ThresholdProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DefaultsFormat {
    Yaml,
    Json,
}

#[derive(Debug, Args)]
pub struct DefaultsArgs {
    /// Output format for the stock threshold profile.
    #[arg(long, value_enum, default_value_t = DefaultsFormat::Yaml)]
    pub format: DefaultsFormat,
}

/// Print the stock threshold profile. The output is a valid `--profile`
/// file for `evaluate`, so operators can dump it, edit a limit, and feed
/// it straight back in.
pub fn run(args: DefaultsArgs) -> Result<()> {
    let profile = ThresholdProfile::default();
    match args.format {
        DefaultsFormat::Yaml => print!("{}", serde_yaml::to_string(&profile)?),
        DefaultsFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
    }
    Ok(())
}
