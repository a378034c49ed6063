/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the partitioned scheduling simulator.
//!
//! Two distinct types model the two sides of the simulation pipeline:
//!
//! ```text
//! YAML / caller ──►  Task  ──(instance generator)──►  TaskInstance  ──(simulator)──►  ScheduleEntry / LogEntry
//!                     ↑ input                           ↑ one per arrival
//!                     immutable during a run            consumed exactly once
//! ```
//!
//! # Ownership model
//! `Task` is **owned** by the [`Simulator`](crate::simulator::Simulator) for
//! its whole lifetime and never mutated after validation.  Every call to
//! `simulate()` generates a fresh `Vec<TaskInstance>` that is dropped at the
//! end of the call.

use serde::{Deserialize, Serialize};

// ── Units ─────────────────────────────────────────────────────────────────────

/// Abstract simulated time unit.
///
/// The simulator is not cycle-accurate; one unit means whatever the caller
/// decides (milliseconds, typically).
pub type SimTime = u64;

/// Zero-based core index in `[0, num_cores)`.
pub type CoreId = usize;

// ── Task (input) ──────────────────────────────────────────────────────────────

/// A periodic real-time task.
///
/// # Lifecycle
/// Parsed from a simulation file (or built by the caller), **moved** into
/// [`Simulator::new`](crate::simulator::Simulator::new) which validates it,
/// then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    // ── Identity ──────────────────────────────────────────────────────────────
    /// Unique task identifier within one task set.
    pub id: String,

    // ── Timing (abstract units) ───────────────────────────────────────────────
    /// Execution time of every instance.  Must be non-zero.
    pub execution_time: SimTime,

    /// Distance between two successive arrivals.  Must be non-zero.
    pub period: SimTime,

    /// Relative deadline.  `None` (or `Some(0)`) means "equal to the period".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<SimTime>,

    // ── Reserved ──────────────────────────────────────────────────────────────
    /// Static priority.  Carried through but unused by the partitioned policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl Task {
    /// Build a task with an implicit deadline (equal to `period`).
    pub fn new(id: impl Into<String>, execution_time: SimTime, period: SimTime) -> Self {
        Self {
            id: id.into(),
            execution_time,
            period,
            deadline: None,
            priority: None,
        }
    }

    /// Returns the task with an explicit relative deadline.
    pub fn with_deadline(self, deadline: SimTime) -> Self {
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    /// Returns the task with a (reserved) priority.
    pub fn with_priority(self, priority: i32) -> Self {
        Self {
            priority: Some(priority),
            ..self
        }
    }

    /// Relative deadline actually applied to each instance.
    ///
    /// A declared deadline of zero falls back to the period, the same as an
    /// absent one.
    pub fn relative_deadline(&self) -> SimTime {
        match self.deadline {
            Some(d) if d > 0 => d,
            _ => self.period,
        }
    }

    /// Processor demand fraction: `execution_time / period`.
    ///
    /// Returns `0.0` when `period` is zero to avoid division by zero.
    pub fn utilization(&self) -> f64 {
        if self.period == 0 {
            0.0
        } else {
            self.execution_time as f64 / self.period as f64
        }
    }
}

// ── TaskInstance (one arrival) ────────────────────────────────────────────────

/// One periodic arrival of a [`Task`] inside the simulated horizon.
///
/// Instances are never mutated; the simulator visits each one exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInstance {
    /// Position of the owning task in the input list.  Used to look up the
    /// core assignment and color without a string hash per instance.
    pub task_index: usize,

    /// Identifier of the owning task.
    pub task_id: String,

    /// Release time.
    pub arrival: SimTime,

    /// Absolute deadline: `arrival + relative deadline`.
    pub deadline: SimTime,

    /// Copied from the owning task.
    pub execution_time: SimTime,
}

// ── ScheduleEntry / LogEntry (output) ─────────────────────────────────────────

/// A successfully placed instance, as laid out on a per-core time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub task_id: String,
    pub core_id: CoreId,
    pub start_time: SimTime,
    /// Always equal to the task's execution time (no preemption, no overhead).
    pub duration: SimTime,
    pub end_time: SimTime,
    /// Display color from [`palette`](crate::palette).
    pub color: &'static str,
}

/// The same placement facts as a [`ScheduleEntry`], plus deadline accounting.
///
/// One-to-one with `ScheduleEntry`, in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub task_id: String,
    pub core_assigned: CoreId,
    pub start_time: SimTime,
    pub duration: SimTime,
    pub end_time: SimTime,
    /// Absolute deadline of the instance.  The simulator always fills this;
    /// `None` renders as an empty CSV field.
    pub deadline: Option<SimTime>,
    /// `end_time > deadline`.
    pub missed_deadline: bool,
}

impl LogEntry {
    /// Build the log row for a placed instance.
    pub fn for_placement(entry: &ScheduleEntry, deadline: SimTime) -> Self {
        Self {
            task_id: entry.task_id.clone(),
            core_assigned: entry.core_id,
            start_time: entry.start_time,
            duration: entry.duration,
            end_time: entry.end_time,
            deadline: Some(deadline),
            missed_deadline: entry.end_time > deadline,
        }
    }

    /// `end_time - start_time`.  Reported as "response time" in the summary
    /// even though it never includes queueing delay.
    pub fn response_time(&self) -> SimTime {
        self.end_time.saturating_sub(self.start_time)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
