//! ---
//! gpr_section: "03-operator-tooling"
//! gpr_subsection: "binary"
//! gpr_type: "source"
//! gpr_scope: "code"
//! gpr_description: "Operator CLI for evaluating generator protection snapshots."
//! gpr_version: "v0.0.0-prealpha"
//! gpr_owner: "tbd"
//! ---
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use r_gpr_relay::{
    rules::{frequency, out_of_step, FrequencySettings, OutOfStepSettings},
    FrequencyBand, MeasurementSnapshot, SnapshotReading,
};

const NOMINAL_FREQUENCY_HZ: f64 = 50.0;

/// Trip-curve sweeps over synthetic readings. Consumes the pure rule
/// functions only; nothing here touches a relay's event log.
#[derive(Debug, Subcommand)]
pub enum SweepCommand {
    /// Overfrequency and underfrequency trip signals across a frequency range.
    Frequency(FrequencySweep),
    /// Out-of-step trip signal across a power angle range.
    PowerAngle(PowerAngleSweep),
}

#[derive(Debug, Args)]
pub struct FrequencySweep {
    /// Sweep start in hertz.
    #[arg(long, default_value_t = 48.0)]
    pub start_hz: f64,

    /// Sweep end in hertz.
    #[arg(long, default_value_t = 52.0)]
    pub end_hz: f64,

    #[command(flatten)]
    pub common: SweepOptions,
}

#[derive(Debug, Args)]
pub struct PowerAngleSweep {
    /// Sweep start in degrees.
    #[arg(long, default_value_t = 0.0)]
    pub start_deg: f64,

    /// Sweep end in degrees.
    #[arg(long, default_value_t = 180.0)]
    pub end_deg: f64,

    #[command(flatten)]
    pub common: SweepOptions,
}

/// Shared options for sweep generation.
#[derive(Debug, Args)]
pub struct SweepOptions {
    /// Output CSV path. Use '-' for stdout.
    #[arg(long, default_value = "-")]
    pub output: PathBuf,

    /// Number of evenly spaced points, endpoints included.
    #[arg(long, default_value_t = 100)]
    pub points: usize,
}

#[derive(Debug, Serialize)]
struct FrequencyRow {
    frequency_hz: f64,
    overfrequency_trip: u8,
    underfrequency_trip: u8,
    nominal_hz: f64,
}

#[derive(Debug, Serialize)]
struct PowerAngleRow {
    power_angle_deg: f64,
    out_of_step_trip: u8,
    limit_deg: f64,
}

/// Execute the supplied sweep command.
pub fn run(command: SweepCommand) -> Result<()> {
    match command {
        SweepCommand::Frequency(sweep) => {
            let rows = frequency_rows(sweep.start_hz, sweep.end_hz, sweep.common.points)?;
            write_rows(&sweep.common.output, &rows)?;
            report(&sweep.common.output, rows.len());
        }
        SweepCommand::PowerAngle(sweep) => {
            let rows = power_angle_rows(sweep.start_deg, sweep.end_deg, sweep.common.points)?;
            write_rows(&sweep.common.output, &rows)?;
            report(&sweep.common.output, rows.len());
        }
    }
    Ok(())
}

fn frequency_rows(start_hz: f64, end_hz: f64, points: usize) -> Result<Vec<FrequencyRow>> {
    let settings = FrequencySettings::default();
    let mut rows = Vec::with_capacity(points);
    for frequency_hz in linspace(start_hz, end_hz, points)? {
        let snapshot = synthetic_snapshot(|reading| reading.frequency = frequency_hz)?;
        let band = frequency(&snapshot, &settings)?;
        rows.push(FrequencyRow {
            frequency_hz,
            overfrequency_trip: u8::from(band == FrequencyBand::OverfrequencyTrip),
            underfrequency_trip: u8::from(band == FrequencyBand::UnderfrequencyTrip),
            nominal_hz: NOMINAL_FREQUENCY_HZ,
        });
    }
    Ok(rows)
}

fn power_angle_rows(start_deg: f64, end_deg: f64, points: usize) -> Result<Vec<PowerAngleRow>> {
    let settings = OutOfStepSettings::default();
    let mut rows = Vec::with_capacity(points);
    for power_angle_deg in linspace(start_deg, end_deg, points)? {
        let snapshot = synthetic_snapshot(|reading| reading.power_angle = power_angle_deg)?;
        let tripped = out_of_step(&snapshot, &settings)?;
        rows.push(PowerAngleRow {
            power_angle_deg,
            out_of_step_trip: u8::from(tripped),
            limit_deg: settings.limit_deg,
        });
    }
    Ok(rows)
}

/// Healthy baseline reading; sweeps vary one field at a time.
fn synthetic_snapshot(
    update: impl FnOnce(&mut SnapshotReading),
) -> Result<MeasurementSnapshot> {
    let mut reading = SnapshotReading {
        current: 1000.0,
        voltage: 1.0,
        frequency: NOMINAL_FREQUENCY_HZ,
        excitation: 1.0,
        rotor_current: 0.0,
        power: 1.0,
        impedance: 0.1,
        power_angle: 0.0,
        zero_seq_voltage: 0.0,
        rotor_leakage: 0.0,
        v_per_hz: 1.0,
        ct_ratio: 1000.0,
    };
    update(&mut reading);
    Ok(MeasurementSnapshot::try_from(reading)?)
}

fn linspace(start: f64, end: f64, points: usize) -> Result<impl Iterator<Item = f64>> {
    if points < 2 {
        return Err(anyhow!("points must be at least 2"));
    }
    let step = (end - start) / (points - 1) as f64;
    Ok((0..points).map(move |index| start + step * index as f64))
}

fn write_rows<T: Serialize>(output: &Path, rows: &[T]) -> Result<()> {
    let writer: Box<dyn Write> = if output.as_os_str() == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            File::create(output)
                .with_context(|| format!("failed to create output file {}", output.display()))?,
        )
    };
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn report(output: &Path, points: usize) {
    if output.as_os_str() != "-" {
        eprintln!("wrote {} points -> {}", points, output.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_endpoints() {
        let values: Vec<f64> = linspace(48.0, 52.0, 100).unwrap().collect();
        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 48.0);
        assert!((values[99] - 52.0).abs() < 1e-9);
    }

    #[test]
    fn linspace_rejects_degenerate_grids() {
        assert!(linspace(0.0, 1.0, 1).is_err());
        assert!(linspace(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn frequency_sweep_flags_the_band_tails() {
        let rows = frequency_rows(48.0, 52.0, 100).unwrap();
        assert_eq!(rows.len(), 100);

        let over: u32 = rows.iter().map(|r| u32::from(r.overfrequency_trip)).sum();
        let under: u32 = rows.iter().map(|r| u32::from(r.underfrequency_trip)).sum();
        assert_eq!(over, 25);
        assert_eq!(under, 25);

        // No point flags both directions at once.
        assert!(rows
            .iter()
            .all(|r| r.overfrequency_trip + r.underfrequency_trip <= 1));
        assert!(rows.iter().all(|r| r.nominal_hz == NOMINAL_FREQUENCY_HZ));
    }

    #[test]
    fn power_angle_sweep_trips_past_the_limit() {
        let rows = power_angle_rows(0.0, 180.0, 100).unwrap();
        assert_eq!(rows.len(), 100);

        let tripped: u32 = rows.iter().map(|r| u32::from(r.out_of_step_trip)).sum();
        assert_eq!(tripped, 33);
        for row in &rows {
            assert_eq!(row.out_of_step_trip == 1, row.power_angle_deg > 120.0);
            assert_eq!(row.limit_deg, 120.0);
        }
    }

    #[test]
    fn sweep_rows_write_as_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.csv");
        let rows = frequency_rows(48.0, 52.0, 10).unwrap();
        write_rows(&path, &rows).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("frequency_hz,overfrequency_trip,underfrequency_trip,nominal_hz")
        );
        assert_eq!(contents.lines().count(), 11);
    }
}
