/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the simulator.
//!
//! Only configuration errors exist.  Two other conditions look like failures
//! but are not:
//!
//! * an empty task list, or a run that places nothing, yields an empty
//!   outcome with zero-valued statistics;
//! * an instance that cannot finish before the horizon is dropped silently
//!   (see [`Simulator::simulate`](super::Simulator::simulate)).
//!
//! Every variant names the offending field or task so a caller can point the
//! user at the exact input that was rejected.

use thiserror::Error;

/// Validation failure raised before any simulation state is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// `num_cores` was zero.
    #[error("num_cores must be at least 1")]
    InvalidCoreCount,

    /// `total_time` was zero.
    #[error("total_time must be greater than 0")]
    InvalidHorizon,

    /// The task at `index` has an empty identifier.
    #[error("task at position {index} has an empty id")]
    EmptyTaskId { index: usize },

    /// A task declared a zero execution time.
    #[error("task '{task}' has execution_time 0 — must be greater than 0")]
    InvalidExecutionTime { task: String },

    /// A task declared a zero period.  Also returned by the instance
    /// generator, which refuses to expand such a task.
    #[error("task '{task}' has period 0 — must be greater than 0")]
    InvalidPeriod { task: String },

    /// Two tasks share the same identifier.
    #[error("duplicate task id '{task}' — task ids must be unique")]
    DuplicateTaskId { task: String },
}
