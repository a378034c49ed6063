/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Summary statistics over one simulation's log.
//!
//! Everything here is derived from the [`LogEntry`] rows alone, so dropped
//! (over-horizon) instances never count: `total_tasks` is the number of
//! *placed* instances, not generated ones.

use std::fmt;

use serde::Serialize;

use crate::task::{CoreId, LogEntry, SimTime};

/// Busy time and utilization of one core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreUtilization {
    pub core_id: CoreId,
    /// Sum of the durations of every entry placed on this core.
    pub busy_time: SimTime,
    /// `busy_time / total_time * 100`, rounded to two decimals.
    pub utilization: f64,
}

/// Read-only summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStats {
    /// One entry per declared core, in core order.  Idle cores report 0 %.
    pub core_utilizations: Vec<CoreUtilization>,
    pub total_deadline_misses: usize,
    /// Mean of `end_time - start_time` over all logged entries, rounded to
    /// two decimals; `0.0` when nothing was logged.
    pub average_response_time: f64,
    /// Number of logged instances.
    pub total_tasks: usize,
}

/// Round to two decimal places.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl SimulationStats {
    /// Aggregate `logs` over `num_cores` cores and a horizon of `total_time`.
    ///
    /// Entries naming a core outside `[0, num_cores)` are ignored for the
    /// per-core figures.  Per-core busy time saturates at `SimTime::MAX`,
    /// which a simulator-built log never reaches since a core's entries are
    /// disjoint within the horizon.
    pub fn from_logs(logs: &[LogEntry], num_cores: usize, total_time: SimTime) -> Self {
        let mut busy: Vec<SimTime> = vec![0; num_cores];
        for log in logs {
            if let Some(b) = busy.get_mut(log.core_assigned) {
                *b = b.saturating_add(log.duration);
            }
        }

        let core_utilizations = busy
            .into_iter()
            .enumerate()
            .map(|(core_id, busy_time)| CoreUtilization {
                core_id,
                busy_time,
                utilization: if total_time == 0 {
                    0.0
                } else {
                    round2(busy_time as f64 / total_time as f64 * 100.0)
                },
            })
            .collect();

        let total_deadline_misses = logs.iter().filter(|l| l.missed_deadline).count();

        let average_response_time = if logs.is_empty() {
            0.0
        } else {
            // Widened: response times on different cores may sum past `SimTime::MAX`.
            let sum: u128 = logs.iter().map(|l| u128::from(l.response_time())).sum();
            round2(sum as f64 / logs.len() as f64)
        };

        Self {
            core_utilizations,
            total_deadline_misses,
            average_response_time,
            total_tasks: logs.len(),
        }
    }

    /// Share of logged instances that missed their deadline, in percent.
    ///
    /// `0.0` when nothing was logged.
    pub fn deadline_miss_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            0.0
        } else {
            self.total_deadline_misses as f64 / self.total_tasks as f64 * 100.0
        }
    }

    /// Mean of the per-core utilization percentages.
    pub fn average_utilization(&self) -> f64 {
        if self.core_utilizations.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.core_utilizations.iter().map(|c| c.utilization).sum();
        sum / self.core_utilizations.len() as f64
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Statistics ===")?;
        writeln!(f, "--- Core Utilization ---")?;
        for core in &self.core_utilizations {
            writeln!(
                f,
                "  Core {}: {}% (busy {})",
                core.core_id, core.utilization, core.busy_time
            )?;
        }
        writeln!(f, "--- Summary ---")?;
        write!(f, "  Deadline misses: {}", self.total_deadline_misses)?;
        if self.total_deadline_misses > 0 {
            write!(f, " ({:.1}%)", self.deadline_miss_rate())?;
        }
        writeln!(f)?;
        writeln!(f, "  Average response time: {}", self.average_response_time)?;
        writeln!(f, "  Total tasks: {}", self.total_tasks)?;
        write!(f, "  Average utilization: {:.1}%", self.average_utilization())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
