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
use clap::{Parser, Subcommand};
use r_gpr_common::logging;

mod defaults;
mod evaluate;
mod sweep;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generator protection relay control utility",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Evaluate a protection plan against a snapshot file")]
    Evaluate(evaluate::EvaluateArgs),
    #[command(subcommand, about = "Generate illustrative trip-curve sweeps as CSV")]
    Sweep(sweep::SweepCommand),
    #[command(about = "Print the stock threshold profile")]
    Defaults(defaults::DefaultsArgs),
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Evaluate(args) => evaluate::run(args)?,
        Commands::Sweep(cmd) => sweep::run(cmd)?,
        Commands::Defaults(args) => defaults::run(args)?,
    }
    Ok(())
}
