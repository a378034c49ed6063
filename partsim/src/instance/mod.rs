/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Periodic instance generation.
//!
//! A task with period `p` arrives at `0, p, 2p, ...` for every arrival
//! strictly below the horizon.  An arrival landing exactly on the horizon is
//! not generated.
//!
//! [`Instances`] is a plain iterator: it holds no state shared between tasks,
//! and building it twice from the same inputs yields the same sequence.

use crate::simulator::SimulationError;
use crate::task::{SimTime, Task, TaskInstance};

/// Iterator over the arrivals of one task within `[0, horizon)`.
#[derive(Debug, Clone)]
pub struct Instances<'a> {
    task: &'a Task,
    task_index: usize,
    horizon: SimTime,
    next_arrival: Option<SimTime>,
}

/// Build the arrival iterator for `task`, which sits at `task_index` in the
/// input list.
///
/// # Errors
/// [`SimulationError::InvalidPeriod`] when `task.period == 0`; a zero period
/// would never advance.
pub fn instances(
    task_index: usize,
    task: &Task,
    horizon: SimTime,
) -> Result<Instances<'_>, SimulationError> {
    if task.period == 0 {
        return Err(SimulationError::InvalidPeriod {
            task: task.id.clone(),
        });
    }
    Ok(Instances {
        task,
        task_index,
        horizon,
        next_arrival: Some(0),
    })
}

/// Number of arrivals a task with `period` has in `[0, horizon)`:
/// `ceil(horizon / period)`.  Zero for a zero period.
pub fn arrival_count(period: SimTime, horizon: SimTime) -> u64 {
    if period == 0 {
        return 0;
    }
    horizon.div_ceil(period)
}

impl Iterator for Instances<'_> {
    type Item = TaskInstance;

    fn next(&mut self) -> Option<TaskInstance> {
        let arrival = self.next_arrival.filter(|&a| a < self.horizon)?;
        self.next_arrival = arrival.checked_add(self.task.period);

        Some(TaskInstance {
            task_index: self.task_index,
            task_id: self.task.id.clone(),
            arrival,
            deadline: arrival.saturating_add(self.task.relative_deadline()),
            execution_time: self.task.execution_time,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next_arrival {
            Some(a) if a < self.horizon => arrival_count(self.task.period, self.horizon - a),
            _ => 0,
        };
        let n = usize::try_from(remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
