//! ---
//! gpr_section: "03-operator-tooling"
//! gpr_subsection: "binary"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Operator CLI for evaluating generator protection snapshots."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use r_gpr_relay::{
    evaluate,
    io::{load_snapshot_reading, load_threshold_profile},
    orchestrator::{ProtectionSummary, RulePlan, RuleRequest, ThresholdProfile},
    rules::DifferentialInputs,
    GeneratorRelay,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Options for one-shot plan evaluation.
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Snapshot reading file (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Threshold profile file overriding stock settings (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// First terminal current for differential protection, in amperes.
    #[arg(long, value_name = "AMPS", requires = "terminal_current_2")]
    pub terminal_current_1: Option<f64>,

    /// Second terminal current for differential protection, in amperes.
    #[arg(long, value_name = "AMPS", requires = "terminal_current_1")]
    pub terminal_current_2: Option<f64>,

    /// Unbalanced current for negative sequence protection, in amperes.
    #[arg(long, value_name = "AMPS")]
    pub unbalanced_current: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Execute the supplied evaluate command.
pub fn run(args: EvaluateArgs) -> Result<()> {
    let reading = load_snapshot_reading(&args.snapshot)
        .with_context(|| format!("failed to load snapshot {}", args.snapshot.display()))?;
    let profile = match &args.profile {
        Some(path) => load_threshold_profile(path)
            .with_context(|| format!("failed to load profile {}", path.display()))?,
        None => ThresholdProfile::default(),
    };

    let plan = build_plan(&args, &profile);
    let relay = GeneratorRelay::new(reading)?;
    let summary = evaluate(&relay, &plan)?;

    match args.format {
        OutputFormat::Table => render_table(&summary, &relay.rendered_event_log()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn build_plan(args: &EvaluateArgs, profile: &ThresholdProfile) -> RulePlan {
    let mut plan = RulePlan::from_profile(profile);
    if let (Some(terminal_current_1), Some(terminal_current_2)) =
        (args.terminal_current_1, args.terminal_current_2)
    {
        plan.push(RuleRequest::Differential(DifferentialInputs {
            terminal_current_1,
            terminal_current_2,
        }));
    }
    if let Some(unbalanced_current) = args.unbalanced_current {
        plan.push(RuleRequest::NegativeSequence {
            unbalanced_current,
            settings: profile.negative_sequence,
        });
    }
    plan
}

fn render_table(summary: &ProtectionSummary, log_lines: &[String]) {
    println!("relay: {}", summary.relay_id);
    println!(
        "evaluated: {}",
        summary.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    for (rule, verdict) in &summary.verdicts {
        println!("{rule:<20} {verdict}");
    }
    println!();
    println!("Event Log:");
    for line in log_lines {
        println!("{line}");
    }
}
