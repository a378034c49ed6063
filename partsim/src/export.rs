/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Serialization of simulation results.
//!
//! The CSV export joins fields with `,` and rows with `\n`.  Nothing is
//! quoted or escaped, so a task id containing a comma or newline produces a
//! malformed file.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::simulator::SimulationOutcome;
use crate::task::LogEntry;

/// Header row of the CSV export.
pub const CSV_HEADER: [&str; 7] = [
    "Task ID",
    "Core Assigned",
    "Start Time",
    "Duration",
    "End Time",
    "Deadline",
    "Missed Deadline",
];

/// Field delimiter.  Not escaped inside fields.
pub const CSV_DELIMITER: &str = ",";

/// Render `logs` as CSV: header row, then one row per entry, no trailing
/// newline.
pub fn logs_to_csv(logs: &[LogEntry]) -> String {
    let header = CSV_HEADER.join(CSV_DELIMITER);
    let rows = logs.iter().map(|log| {
        [
            log.task_id.clone(),
            log.core_assigned.to_string(),
            log.start_time.to_string(),
            log.duration.to_string(),
            log.end_time.to_string(),
            log.deadline.map(|d| d.to_string()).unwrap_or_default(),
            (if log.missed_deadline { "Yes" } else { "No" }).to_string(),
        ]
        .join(CSV_DELIMITER)
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the CSV export of `logs` to `path`.
pub fn write_csv(logs: &[LogEntry], path: &Path) -> Result<()> {
    std::fs::write(path, logs_to_csv(logs))
        .with_context(|| format!("Cannot write CSV export: {}", path.display()))?;
    info!(rows = logs.len(), path = %path.display(), "CSV export written");
    Ok(())
}

/// Pretty-printed JSON of a whole outcome (schedule, logs and stats).
pub fn outcome_to_json(outcome: &SimulationOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("Failed to serialize simulation outcome")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
