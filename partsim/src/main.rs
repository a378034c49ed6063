/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use partsim::config::{Overrides, SimulationFile};
use partsim::export::{outcome_to_json, write_csv};
use partsim::replay::Replay;
use partsim::simulator::Simulator;
use partsim::SimTime;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Partitioned multi-core real-time scheduling simulator.
///
/// Example:
///   partsim tasks.yaml -c 2 -t 20 --csv simulation_logs.csv
#[derive(Debug, Parser)]
#[command(
    name = "partsim",
    about = "Partitioned multi-core real-time scheduling simulator",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML simulation file (task set, optional core count and horizon).
    file: PathBuf,

    /// Number of cores; overrides `simulation.num_cores`.
    #[arg(short = 'c', long = "cores")]
    cores: Option<usize>,

    /// Simulation horizon; overrides `simulation.total_time`.
    #[arg(short = 't', long = "total-time")]
    total_time: Option<SimTime>,

    /// Write the log rows as CSV to this path.
    #[arg(long = "csv")]
    csv: Option<PathBuf>,

    /// Print the full outcome (schedule, logs, stats) as JSON.
    #[arg(long = "json", default_value_t = false)]
    json: bool,

    /// Print what every core is doing at this time.
    #[arg(long = "at")]
    at: Option<SimTime>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        file       = %cli.file.display(),
        cores      = ?cli.cores,
        total_time = ?cli.total_time,
        csv        = ?cli.csv,
        json       = cli.json,
        at         = ?cli.at,
        "Configuration"
    );

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (tasks, config) = SimulationFile::load_from_file(&cli.file)?.resolve(Overrides {
        num_cores: cli.cores,
        total_time: cli.total_time,
    })?;

    let simulator = Simulator::new(tasks, config).context("Invalid simulation configuration")?;
    let outcome = simulator.simulate();

    if cli.json {
        println!("{}", outcome_to_json(&outcome)?);
    } else {
        println!(
            "Simulated {} task(s) on {} core(s) over {} time units",
            simulator.tasks().len(),
            config.num_cores,
            config.total_time
        );
        println!("{}", outcome.stats);
    }

    if let Some(time) = cli.at {
        let snapshot = Replay::new(&outcome.schedule, config).snapshot(time);
        println!("--- t = {} ---", snapshot.time);
        for core in &snapshot.cores {
            match core.running {
                Some(entry) => println!(
                    "  Core {}: {} [{}-{}]  done={} pending={}",
                    core.core_id,
                    entry.task_id,
                    entry.start_time,
                    entry.end_time,
                    core.completed,
                    core.pending
                ),
                None => println!(
                    "  Core {}: idle  done={} pending={}",
                    core.core_id, core.completed, core.pending
                ),
            }
        }
    }

    if let Some(path) = &cli.csv {
        write_csv(&outcome.logs, path)?;
    }

    Ok(())
}
