//! Simulation file loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! simulation:
//!   num_cores: 2
//!   total_time: 20       # optional: defaults to the hyperperiod
//! tasks:
//!   - id: T1
//!     execution_time: 2
//!     period: 5
//!   - id: T2
//!     execution_time: 3
//!     period: 4
//!     deadline: 3        # optional: defaults to the period
//!     priority: 1        # optional: reserved
//! ```
//!
//! Task order in the file is the input order: it decides core assignment,
//! colors, and who goes first among simultaneous arrivals.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::hyperperiod::hyperperiod;
use crate::simulator::SimulationConfig;
use crate::task::{SimTime, Task};

// ── YAML deserialization types ────────────────────────────────────────────────

/// Optional `simulation:` section.  Every field may be omitted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    pub num_cores: Option<usize>,
    pub total_time: Option<SimTime>,
}

/// A whole simulation file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationFile {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Overrides {
    pub num_cores: Option<usize>,
    pub total_time: Option<SimTime>,
}

impl SimulationFile {
    /// Parse `path` into a [`SimulationFile`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the YAML does not
    /// match the expected layout (including negative numbers).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading simulation file from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open simulation file: {}", path.display()))?;

        let file = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        info!(
            task_count = file.tasks.len(),
            num_cores = ?file.simulation.num_cores,
            total_time = ?file.simulation.total_time,
            "Simulation file loaded"
        );
        for task in &file.tasks {
            debug!(
                "  Task: {} | C: {} | T: {} | D: {}",
                task.id,
                task.execution_time,
                task.period,
                task.relative_deadline(),
            );
        }

        Ok(file)
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Combine file values with `overrides` into the simulator inputs.
    ///
    /// Precedence per field: override, then file, then default.  The horizon
    /// defaults to the task-set hyperperiod, or to
    /// [`SimulationConfig::default`] when there is nothing to take an LCM of.
    ///
    /// # Errors
    /// Returns an error if the hyperperiod overflows.  Range checks on the
    /// values themselves are left to [`Simulator::new`](crate::simulator::Simulator::new).
    pub fn resolve(self, overrides: Overrides) -> Result<(Vec<Task>, SimulationConfig)> {
        let defaults = SimulationConfig::default();

        let num_cores = overrides
            .num_cores
            .or(self.simulation.num_cores)
            .unwrap_or(defaults.num_cores);

        let total_time = match overrides.total_time.or(self.simulation.total_time) {
            Some(t) => t,
            None if self.tasks.iter().any(|t| t.period > 0) => {
                let h = hyperperiod(&self.tasks)
                    .context("Cannot derive total_time from the task periods")?;
                info!(total_time = h, "No total_time given, using the hyperperiod");
                h
            }
            None => {
                warn!(
                    total_time = defaults.total_time,
                    "No total_time and no task periods, using the default horizon"
                );
                defaults.total_time
            }
        };

        Ok((
            self.tasks,
            SimulationConfig {
                num_cores,
                total_time,
            },
        ))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
