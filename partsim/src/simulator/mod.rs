//! Partitioned, non-preemptive timeline simulation.
//!
//! [`Simulator`] takes a validated task list, partitions it round-robin onto
//! the configured cores, and builds each core's timeline in a single greedy
//! pass over all arrivals.  The result is a [`SimulationOutcome`]: the
//! placed [`ScheduleEntry`]s, their [`LogEntry`] twins, and
//! [`SimulationStats`].
//!
//! # Placement rules
//!
//! 1. Every task's instances are concatenated in task-list order, then
//!    **stably** sorted by arrival.  Among simultaneous arrivals, the task
//!    earlier in the input list is visited first.
//! 2. Each instance is visited exactly once.  On its core:
//!    `start = max(arrival, next_free)`, `end = start + execution_time`.
//! 3. If `end <= total_time` the instance is placed and the core's
//!    `next_free` advances to `end`.  Otherwise it is **dropped**: no entry,
//!    no log row, and the core timeline does not move.
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless `simulate()`: core timelines and entry vectors are local to the call |
//! | Tie-break | Stable sort on arrival; input order decides |
//! | Horizon overrun | Drop the whole instance, never truncate |
//! | Thread safety | `Send + Sync` (no interior mutability) |
//!
//! # Example
//! ```rust
//! use partsim::simulator::{SimulationConfig, Simulator};
//! use partsim::task::Task;
//!
//! let tasks = vec![Task::new("T1", 2, 5)];
//! let sim = Simulator::new(tasks, SimulationConfig { num_cores: 1, total_time: 20 }).unwrap();
//! let outcome = sim.simulate();
//! assert_eq!(outcome.schedule.len(), 4);
//! assert_eq!(outcome.stats.core_utilizations[0].utilization, 40.0);
//! ```

pub mod error;
pub mod feasibility;

pub use error::SimulationError;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

use crate::instance::instances;
use crate::palette::task_color;
use crate::partition::CoreAssignment;
use crate::stats::SimulationStats;
use crate::task::{CoreId, LogEntry, ScheduleEntry, SimTime, Task, TaskInstance};

use feasibility::{check_core_demand, liu_layland_bound};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Machine shape and horizon for one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of cores; tasks are partitioned onto `[0, num_cores)`.
    pub num_cores: usize,
    /// Horizon.  Nothing may run past it.
    pub total_time: SimTime,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_cores: 2,
            total_time: 20,
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Everything one `simulate()` call produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    /// Placed instances, in visit (≈ arrival) order.
    pub schedule: Vec<ScheduleEntry>,
    /// One row per `schedule` entry, same order.
    pub logs: Vec<LogEntry>,
    pub stats: SimulationStats,
}

// ── Per-run core state ────────────────────────────────────────────────────────

/// "Next free time" of every core.  Starts at zero for each run and only
/// moves forward.
#[derive(Debug)]
struct CoreTimelines(Vec<SimTime>);

impl CoreTimelines {
    fn new(num_cores: usize) -> Self {
        Self(vec![0; num_cores])
    }

    fn next_free(&self, core: CoreId) -> SimTime {
        self.0[core]
    }

    fn advance(&mut self, core: CoreId, to: SimTime) {
        debug_assert!(to >= self.0[core], "core timeline must not move backwards");
        self.0[core] = to;
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// A validated simulation setup.
///
/// Construction does all validation; [`simulate`](Self::simulate) cannot
/// fail.  All per-run state is allocated inside `simulate()` and dropped at
/// the end of the call, so repeated or concurrent runs never interfere.
#[derive(Debug, Clone)]
pub struct Simulator {
    tasks: Vec<Task>,
    config: SimulationConfig,
    assignment: CoreAssignment,
}

impl Simulator {
    /// Validate `tasks` and `config` and partition the tasks onto cores.
    ///
    /// An empty task list is accepted and simulates to an empty outcome.
    ///
    /// # Errors
    /// The first configuration error found, checking `config` first and then
    /// the tasks in list order.
    pub fn new(tasks: Vec<Task>, config: SimulationConfig) -> Result<Self, SimulationError> {
        validate(&tasks, &config)?;
        let assignment = CoreAssignment::round_robin(&tasks, config.num_cores)?;

        Ok(Self {
            tasks,
            config,
            assignment,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// The static task → core mapping used by every run.
    pub fn assignment(&self) -> &CoreAssignment {
        &self.assignment
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Run the simulation and return its outcome.
    ///
    /// Pure: two calls on the same `Simulator` return equal outcomes.
    pub fn simulate(&self) -> SimulationOutcome {
        let SimulationConfig {
            num_cores,
            total_time,
        } = self.config;

        info!(
            task_count = self.tasks.len(),
            num_cores,
            total_time,
            "=== Simulator::simulate() ==="
        );

        let pending = self.collect_instances();
        let generated = pending.len();

        let mut timelines = CoreTimelines::new(num_cores);
        let mut schedule = Vec::with_capacity(generated);
        let mut logs = Vec::with_capacity(generated);

        for instance in &pending {
            let Some(core) = self.assignment.core_at(instance.task_index) else {
                continue;
            };

            let start = instance.arrival.max(timelines.next_free(core));
            // `None` means the end is past `SimTime::MAX`, hence past any horizon.
            let end = match start.checked_add(instance.execution_time) {
                Some(end) if end <= total_time => end,
                end => {
                    trace!(
                        task = %instance.task_id,
                        core,
                        arrival = instance.arrival,
                        start,
                        end = ?end,
                        total_time,
                        "instance does not fit before horizon — dropped"
                    );
                    continue;
                }
            };

            let entry = ScheduleEntry {
                task_id: instance.task_id.clone(),
                core_id: core,
                start_time: start,
                duration: instance.execution_time,
                end_time: end,
                color: task_color(instance.task_index),
            };
            let log = LogEntry::for_placement(&entry, instance.deadline);

            debug!(
                task = %entry.task_id,
                core,
                arrival = instance.arrival,
                start,
                end,
                deadline = instance.deadline,
                missed = log.missed_deadline,
                "placed"
            );

            timelines.advance(core, end);
            schedule.push(entry);
            logs.push(log);
        }

        self.run_demand_check();

        let stats = SimulationStats::from_logs(&logs, num_cores, total_time);

        info!(
            generated,
            placed = logs.len(),
            dropped = generated - logs.len(),
            deadline_misses = stats.total_deadline_misses,
            "=== Simulation complete ==="
        );

        SimulationOutcome {
            schedule,
            logs,
            stats,
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// All instances of all tasks, stably sorted by arrival.
    ///
    /// Concatenation is in task-list order, so the stable sort keeps that
    /// order among equal arrivals.
    /// `validate` already ran the generator for every task, so a generation
    /// error here is a broken invariant, not a user error.
    fn collect_instances(&self) -> Vec<TaskInstance> {
        let mut all: Vec<TaskInstance> = Vec::new();
        for (i, task) in self.tasks.iter().enumerate() {
            match instances(i, task, self.config.total_time) {
                Ok(generated) => all.extend(generated),
                Err(e) => {
                    error!(task = %task.id, error = %e, "instance generation failed after validation");
                    debug_assert!(false, "validated task {} failed instance generation: {e}", task.id);
                }
            }
        }
        all.sort_by_key(|inst| inst.arrival);
        all
    }

    /// Warn for every core whose partitioned demand exceeds the Liu & Layland
    /// bound.
    fn run_demand_check(&self) {
        let mut by_core: BTreeMap<CoreId, Vec<&Task>> = BTreeMap::new();
        for (task, &core) in self.tasks.iter().zip(self.assignment.as_slice()) {
            by_core.entry(core).or_default().push(task);
        }

        for (core, core_tasks) in &by_core {
            if let Some(total) = check_core_demand(core_tasks) {
                warn!(
                    core,
                    demand = total,
                    bound = liu_layland_bound(core_tasks.len()),
                    task_count = core_tasks.len(),
                    "core demand exceeds Liu & Layland bound — deadline misses likely"
                );
            }
        }
    }
}

/// Reject every configuration error before any state is built.
fn validate(tasks: &[Task], config: &SimulationConfig) -> Result<(), SimulationError> {
    if config.num_cores == 0 {
        return Err(SimulationError::InvalidCoreCount);
    }
    if config.total_time == 0 {
        return Err(SimulationError::InvalidHorizon);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        if task.id.is_empty() {
            return Err(SimulationError::EmptyTaskId { index });
        }
        if task.execution_time == 0 {
            return Err(SimulationError::InvalidExecutionTime {
                task: task.id.clone(),
            });
        }
        // The generator owns the period rule (zero never advances).
        instances(index, task, config.total_time)?;
        if !seen.insert(&task.id) {
            return Err(SimulationError::DuplicateTaskId {
                task: task.id.clone(),
            });
        }
    }
    Ok(())
}

/// Validate, partition and simulate in one call.
pub fn simulate(
    tasks: Vec<Task>,
    config: SimulationConfig,
) -> Result<SimulationOutcome, SimulationError> {
    Ok(Simulator::new(tasks, config)?.simulate())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::arrival_count;
    use proptest::prelude::*;

    // ── Test helpers ──────────────────────────────────────────────────────────

    fn config(num_cores: usize, total_time: SimTime) -> SimulationConfig {
        SimulationConfig {
            num_cores,
            total_time,
        }
    }

    fn spans(outcome: &SimulationOutcome, task: &str) -> Vec<(SimTime, SimTime)> {
        outcome
            .schedule
            .iter()
            .filter(|e| e.task_id == task)
            .map(|e| (e.start_time, e.end_time))
            .collect()
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn zero_cores_is_rejected() {
        let err = Simulator::new(vec![Task::new("T1", 1, 2)], config(0, 10)).unwrap_err();
        assert_eq!(err, SimulationError::InvalidCoreCount);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let err = Simulator::new(vec![Task::new("T1", 1, 2)], config(1, 0)).unwrap_err();
        assert_eq!(err, SimulationError::InvalidHorizon);
    }

    #[test]
    fn zero_execution_time_is_rejected() {
        let err = Simulator::new(vec![Task::new("T1", 0, 2)], config(1, 10)).unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvalidExecutionTime { task: "T1".into() }
        );
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = Simulator::new(vec![Task::new("T1", 1, 0)], config(1, 10)).unwrap_err();
        assert_eq!(err, SimulationError::InvalidPeriod { task: "T1".into() });
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tasks = vec![Task::new("A", 1, 2), Task::new("B", 1, 2), Task::new("A", 1, 3)];
        let err = Simulator::new(tasks, config(2, 10)).unwrap_err();
        assert_eq!(err, SimulationError::DuplicateTaskId { task: "A".into() });
    }

    #[test]
    fn empty_id_is_rejected_with_position() {
        let tasks = vec![Task::new("A", 1, 2), Task::new("", 1, 2)];
        let err = Simulator::new(tasks, config(1, 10)).unwrap_err();
        assert_eq!(err, SimulationError::EmptyTaskId { index: 1 });
    }

    #[test]
    fn config_errors_win_over_task_errors() {
        let err = Simulator::new(vec![Task::new("", 0, 0)], config(0, 0)).unwrap_err();
        assert_eq!(err, SimulationError::InvalidCoreCount);
    }

    // ── Placement ─────────────────────────────────────────────────────────────

    #[test]
    fn single_task_runs_at_each_arrival() {
        let out = simulate(vec![Task::new("T1", 2, 5)], config(1, 20)).unwrap();
        assert_eq!(spans(&out, "T1"), vec![(0, 2), (5, 7), (10, 12), (15, 17)]);
        assert_eq!(out.stats.total_deadline_misses, 0);
        assert_eq!(out.stats.core_utilizations[0].utilization, 40.0);
    }

    #[test]
    fn simultaneous_arrivals_follow_input_order() {
        let tasks = vec![Task::new("T1", 3, 4), Task::new("T2", 3, 4)];
        let out = simulate(tasks, config(1, 12)).unwrap();

        // Instances at 8 would end at 15 > 12 and are dropped.
        assert_eq!(spans(&out, "T1"), vec![(0, 3), (6, 9)]);
        assert_eq!(spans(&out, "T2"), vec![(3, 6), (9, 12)]);

        let missed: Vec<(&str, bool)> = out
            .logs
            .iter()
            .map(|l| (l.task_id.as_str(), l.missed_deadline))
            .collect();
        assert_eq!(
            missed,
            vec![("T1", false), ("T2", true), ("T1", true), ("T2", true)]
        );
    }

    #[test]
    fn swapping_input_order_swaps_who_waits() {
        let tasks = vec![Task::new("T2", 3, 4), Task::new("T1", 3, 4)];
        let out = simulate(tasks, config(1, 12)).unwrap();
        assert_eq!(out.schedule[0].task_id, "T2");
        assert_eq!(out.schedule[0].start_time, 0);
        assert_eq!(out.schedule[1].task_id, "T1");
        assert_eq!(out.schedule[1].start_time, 3);
    }

    #[test]
    fn instance_overrunning_horizon_is_dropped_without_moving_core() {
        // T1 at [0,4]; T2 arrives at 0 too but would end at 4+7=11 > 10 → dropped.
        // T1's next arrival at 5 must still start at 5, not later.
        let tasks = vec![Task::new("T1", 4, 5), Task::new("T2", 7, 100)];
        let out = simulate(tasks, config(1, 10)).unwrap();
        assert_eq!(spans(&out, "T1"), vec![(0, 4), (5, 9)]);
        assert!(spans(&out, "T2").is_empty());
        assert_eq!(out.stats.total_tasks, 2);
    }

    #[test]
    fn execution_longer_than_horizon_never_appears() {
        let tasks = vec![Task::new("big", 30, 5), Task::new("ok", 1, 5)];
        let out = simulate(tasks, config(2, 20)).unwrap();
        assert!(out.logs.iter().all(|l| l.task_id != "big"));
        assert_eq!(out.stats.core_utilizations[0].busy_time, 0);
        assert_eq!(out.stats.total_tasks, 4);
    }

    #[test]
    fn cores_run_independently() {
        let tasks = vec![Task::new("A", 3, 4), Task::new("B", 3, 4)];
        let out = simulate(tasks, config(2, 12)).unwrap();
        assert_eq!(spans(&out, "A"), vec![(0, 3), (4, 7), (8, 11)]);
        assert_eq!(spans(&out, "B"), vec![(0, 3), (4, 7), (8, 11)]);
        assert!(out.schedule.iter().all(|e| e.core_id == if e.task_id == "A" { 0 } else { 1 }));
        assert_eq!(out.stats.total_deadline_misses, 0);
    }

    #[test]
    fn explicit_deadline_tighter_than_period_is_missed() {
        let tasks = vec![Task::new("A", 2, 10), Task::new("B", 2, 10).with_deadline(3)];
        let out = simulate(tasks, config(1, 10)).unwrap();
        let b = out.logs.iter().find(|l| l.task_id == "B").unwrap();
        assert_eq!((b.start_time, b.end_time, b.deadline), (2, 4, Some(3)));
        assert!(b.missed_deadline);
    }

    #[test]
    fn colors_follow_task_position() {
        let tasks = vec![Task::new("A", 1, 5), Task::new("B", 1, 5)];
        let out = simulate(tasks, config(1, 5)).unwrap();
        assert_eq!(out.schedule[0].color, task_color(0));
        assert_eq!(out.schedule[1].color, task_color(1));
    }

    #[test]
    fn empty_task_list_is_a_noop() {
        let out = simulate(vec![], config(3, 50)).unwrap();
        assert!(out.schedule.is_empty());
        assert!(out.logs.is_empty());
        assert_eq!(out.stats.core_utilizations.len(), 3);
        assert_eq!(out.stats.average_response_time, 0.0);
        assert_eq!(out.stats.total_deadline_misses, 0);
    }

    #[test]
    fn simulator_is_deterministic() {
        let sim = Simulator::new(
            vec![Task::new("t1", 1, 3), Task::new("t2", 2, 5), Task::new("t3", 4, 7)],
            config(2, 50),
        )
        .unwrap();
        let reference = sim.simulate();
        for _ in 0..20 {
            assert_eq!(sim.simulate(), reference);
        }
    }

    #[test]
    fn end_past_time_max_is_dropped_not_clamped() {
        // Second arrival at MAX-5 would end at MAX+5.
        let out = simulate(vec![Task::new("A", 10, u64::MAX - 5)], config(1, u64::MAX)).unwrap();
        assert_eq!(spans(&out, "A"), vec![(0, 10)]);
        assert!(out.schedule.iter().all(|e| e.end_time - e.start_time == e.duration));
    }

    #[test]
    fn end_exactly_at_time_max_is_placed() {
        let out = simulate(vec![Task::new("A", 5, u64::MAX - 5)], config(1, u64::MAX)).unwrap();
        assert_eq!(spans(&out, "A"), vec![(0, 5), (u64::MAX - 5, u64::MAX)]);
    }

    #[test]
    fn durations_near_time_max_do_not_overflow_stats() {
        let half = u64::MAX / 2;
        let tasks = vec![
            Task::new("A", half, u64::MAX),
            Task::new("B", half, u64::MAX),
            Task::new("C", half, u64::MAX),
        ];
        let out = simulate(tasks, config(3, u64::MAX)).unwrap();
        assert_eq!(out.stats.total_tasks, 3);
        assert!(out.stats.core_utilizations.iter().all(|c| c.busy_time == half));
        let expected = half as f64;
        assert!((out.stats.average_response_time - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn every_arrival_of_a_valid_task_set_is_generated() {
        let tasks = vec![Task::new("A", 1, 3), Task::new("B", 2, 5), Task::new("C", 1, 40)];
        let sim = Simulator::new(tasks, config(2, 30)).unwrap();
        let expected: u64 = sim.tasks().iter().map(|t| arrival_count(t.period, 30)).sum();
        assert_eq!(sim.collect_instances().len() as u64, expected);
    }

    #[test]
    fn simulator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Simulator>();
    }

    // ── Properties ────────────────────────────────────────────────────────────

    fn task_set() -> impl Strategy<Value = Vec<Task>> {
        proptest::collection::vec((1u64..8, 1u64..12, proptest::option::of(1u64..12)), 0..8)
            .prop_map(|params| {
                params
                    .into_iter()
                    .enumerate()
                    .map(|(i, (c, p, d))| Task {
                        id: format!("T{i}"),
                        execution_time: c,
                        period: p,
                        deadline: d,
                        priority: None,
                    })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn placement_invariants_hold(tasks in task_set(), cores in 1usize..4, horizon in 1u64..80) {
            let sim = Simulator::new(tasks.clone(), config(cores, horizon)).unwrap();
            let out = sim.simulate();

            prop_assert_eq!(out.schedule.len(), out.logs.len());

            let mut last_end = vec![0u64; cores];
            for (entry, log) in out.schedule.iter().zip(&out.logs) {
                let task = tasks.iter().find(|t| t.id == entry.task_id).unwrap();
                prop_assert_eq!(entry.end_time - entry.start_time, task.execution_time);
                prop_assert_eq!(log.response_time(), task.execution_time);
                prop_assert!(entry.end_time <= horizon);
                prop_assert!(entry.start_time >= last_end[entry.core_id]);
                prop_assert_eq!(Some(entry.core_id), sim.assignment().core_of(&entry.task_id));
                prop_assert_eq!(log.missed_deadline, Some(log.end_time) > log.deadline);
                last_end[entry.core_id] = entry.end_time;
            }

            let misses = out.logs.iter().filter(|l| l.missed_deadline).count();
            prop_assert_eq!(out.stats.total_deadline_misses, misses);

            let mut busy = vec![0u64; cores];
            for entry in &out.schedule {
                busy[entry.core_id] += entry.duration;
            }
            prop_assert_eq!(out.stats.core_utilizations.len(), cores);
            for core in &out.stats.core_utilizations {
                let expected = (busy[core.core_id] as f64 / horizon as f64 * 100.0 * 100.0).round() / 100.0;
                prop_assert_eq!(core.busy_time, busy[core.core_id]);
                prop_assert_eq!(core.utilization, expected);
                prop_assert!(core.utilization >= 0.0 && core.utilization <= 100.0);
            }
        }

        #[test]
        fn repeated_runs_are_identical(tasks in task_set(), cores in 1usize..4, horizon in 1u64..80) {
            let sim = Simulator::new(tasks, config(cores, horizon)).unwrap();
            prop_assert_eq!(sim.simulate(), sim.simulate());
        }
    }
}
