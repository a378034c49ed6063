/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! partsim – partitioned multi-core real-time scheduling simulator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task          – Task / TaskInstance / ScheduleEntry / LogEntry
//! ├── config/       – YAML simulation files + CLI overrides
//! ├── partition/    – round-robin task → core assignment
//! ├── instance/     – periodic arrival generation
//! ├── simulator/    – greedy non-preemptive timeline construction
//! ├── stats         – per-core utilization and summary metrics
//! ├── palette       – task display colors
//! ├── hyperperiod   – LCM of periods (default horizon)
//! ├── export        – CSV / JSON output
//! └── replay        – read-only playback cursor over a finished schedule
//! ```

pub mod config;
pub mod export;
pub mod hyperperiod;
pub mod instance;
pub mod palette;
pub mod partition;
pub mod replay;
pub mod simulator;
pub mod stats;
pub mod task;

pub use simulator::{simulate, SimulationConfig, SimulationError, SimulationOutcome, Simulator};
pub use stats::{CoreUtilization, SimulationStats};
pub use task::{CoreId, LogEntry, ScheduleEntry, SimTime, Task, TaskInstance};
