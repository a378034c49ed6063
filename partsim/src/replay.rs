/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Read-only playback over a finished schedule.
//!
//! A presentation layer can step a "current time" cursor across the horizon
//! and ask what each core is doing at that instant.  The cursor only reads
//! the precomputed entries; it never feeds back into the simulator.

use crate::simulator::SimulationConfig;
use crate::task::{CoreId, ScheduleEntry, SimTime};

/// State of one entry relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    /// `time < start_time`.
    Pending,
    /// `start_time <= time < end_time`.
    Running,
    /// `end_time <= time`.
    Completed,
}

impl EntryPhase {
    pub fn of(entry: &ScheduleEntry, time: SimTime) -> Self {
        if entry.end_time <= time {
            EntryPhase::Completed
        } else if entry.start_time <= time {
            EntryPhase::Running
        } else {
            EntryPhase::Pending
        }
    }
}

/// What one core is doing at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSnapshot<'a> {
    pub core_id: CoreId,
    /// The entry occupying the core, if any.
    pub running: Option<&'a ScheduleEntry>,
    /// Entries on this core already finished.
    pub completed: usize,
    /// Entries on this core not yet started.
    pub pending: usize,
}

/// All cores at one cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub time: SimTime,
    pub cores: Vec<CoreSnapshot<'a>>,
}

/// Cursor source over a schedule.
#[derive(Debug, Clone, Copy)]
pub struct Replay<'a> {
    schedule: &'a [ScheduleEntry],
    config: SimulationConfig,
}

impl<'a> Replay<'a> {
    pub fn new(schedule: &'a [ScheduleEntry], config: SimulationConfig) -> Self {
        Self { schedule, config }
    }

    /// Snapshot at `time`.  Times past the horizon are clamped to it.
    pub fn snapshot(&self, time: SimTime) -> Snapshot<'a> {
        let time = time.min(self.config.total_time);
        let mut cores: Vec<CoreSnapshot<'a>> = (0..self.config.num_cores)
            .map(|core_id| CoreSnapshot {
                core_id,
                running: None,
                completed: 0,
                pending: 0,
            })
            .collect();

        for entry in self.schedule {
            let Some(core) = cores.get_mut(entry.core_id) else {
                continue;
            };
            match EntryPhase::of(entry, time) {
                EntryPhase::Completed => core.completed += 1,
                EntryPhase::Running => core.running = Some(entry),
                EntryPhase::Pending => core.pending += 1,
            }
        }

        Snapshot { time, cores }
    }

    /// One snapshot per integer time unit, `0..=total_time`.
    pub fn ticks(&self) -> impl Iterator<Item = Snapshot<'a>> {
        let this = *self;
        (0..=this.config.total_time).map(move |t| this.snapshot(t))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
