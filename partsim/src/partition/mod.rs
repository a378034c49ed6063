/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Static task-to-core partitioning.
//!
//! The policy is round-robin on list position: the task at index `i` runs on
//! core `i mod num_cores` for the whole simulation.  Execution time and period
//! are ignored, so imbalance between cores is possible and expected.  The
//! mapping depends only on the order of the input list.

use std::collections::HashMap;

use tracing::debug;

use crate::simulator::SimulationError;
use crate::task::{CoreId, Task};

/// Result of partitioning a task list onto `num_cores` cores.
///
/// Holds both a positional view (used by the simulator's hot loop) and an
/// id-keyed view (used by callers that only know task ids).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreAssignment {
    num_cores: usize,
    by_position: Vec<CoreId>,
    by_id: HashMap<String, CoreId>,
}

impl CoreAssignment {
    /// Assign every task in `tasks` to a core, round-robin by list position.
    ///
    /// # Errors
    /// [`SimulationError::InvalidCoreCount`] when `num_cores == 0`.
    pub fn round_robin(tasks: &[Task], num_cores: usize) -> Result<Self, SimulationError> {
        if num_cores == 0 {
            return Err(SimulationError::InvalidCoreCount);
        }

        let by_position: Vec<CoreId> = (0..tasks.len()).map(|i| i % num_cores).collect();
        let by_id = tasks
            .iter()
            .zip(&by_position)
            .map(|(task, &core)| {
                debug!(task = %task.id, core, "partitioned");
                (task.id.clone(), core)
            })
            .collect();

        Ok(Self {
            num_cores,
            by_position,
            by_id,
        })
    }

    /// Number of declared cores.
    pub fn num_cores(&self) -> usize {
        self.num_cores
    }

    /// Core of the task at `index` in the input list.
    pub fn core_at(&self, index: usize) -> Option<CoreId> {
        self.by_position.get(index).copied()
    }

    /// Core of the task with identifier `task_id`.
    pub fn core_of(&self, task_id: &str) -> Option<CoreId> {
        self.by_id.get(task_id).copied()
    }

    /// Cores in input-list order.
    pub fn as_slice(&self) -> &[CoreId] {
        &self.by_position
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
