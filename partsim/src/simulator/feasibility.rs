/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-core demand check against the Liu & Layland bound.
//!
//! Informational only: the simulator logs a warning when the tasks
//! partitioned onto one core exceed the bound, but the timeline is built the
//! same way regardless.
//!
//! **Liu & Layland (1973)**: `n` independent periodic tasks are guaranteed
//! schedulable under rate-monotonic priorities on one core if
//!
//! $$U = \sum_{i=1}^{n} \frac{C_i}{T_i} \leq n \left(2^{1/n} - 1\right)$$
//!
//! The partitioned simulator is non-preemptive FIFO-by-arrival, not RM, so a
//! core below the bound can still miss deadlines; a core above `1.0` always
//! will eventually.

use crate::task::Task;

/// Liu & Layland bound for `n` tasks: `n × (2^(1/n) − 1)`.
///
/// `1.0` for one task, `0.0` for none.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (2.0_f64.powf(1.0 / nf) - 1.0)
}

/// Total demand of the tasks on one core, if it exceeds the bound.
///
/// Returns `None` when the set is within the bound (or empty).  Tasks with a
/// zero period contribute nothing.
pub fn check_core_demand(tasks_on_core: &[&Task]) -> Option<f64> {
    let counted: Vec<&&Task> = tasks_on_core.iter().filter(|t| t.period > 0).collect();
    if counted.is_empty() {
        return None;
    }

    let total: f64 = counted.iter().map(|t| t.utilization()).sum();
    (total > liu_layland_bound(counted.len())).then_some(total)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
