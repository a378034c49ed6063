/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Hyperperiod of a task set.
//!
//! The hyperperiod is the Least Common Multiple (LCM) of all task periods:
//! the shortest window after which the arrival pattern repeats.  A simulation
//! file that omits `total_time` is simulated over exactly one hyperperiod.
//!
//! `(a / gcd) * b` is computed with `checked_mul`, so an LCM that does not fit
//! in a [`SimTime`] is reported as [`HyperperiodError::Overflow`] instead of
//! wrapping.

use thiserror::Error;
use tracing::debug;

use crate::task::{SimTime, Task};

/// Errors that can occur while computing a hyperperiod.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HyperperiodError {
    /// The task slice was empty (or every task had `period == 0`).
    #[error("no tasks with a valid (non-zero) period")]
    NoValidPeriods,

    /// The LCM did not fit in a `SimTime`.
    #[error("LCM overflow computing lcm({a}, {b})")]
    Overflow { a: SimTime, b: SimTime },
}

/// Iterative Euclidean GCD.  `gcd(0, 0) == 0`.
pub fn gcd(mut a: SimTime, mut b: SimTime) -> SimTime {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Checked LCM.  Returns `Ok(0)` when either input is `0`.
pub fn lcm(a: SimTime, b: SimTime) -> Result<SimTime, HyperperiodError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// LCM of the periods of `tasks`, ignoring zero periods.
pub fn hyperperiod(tasks: &[Task]) -> Result<SimTime, HyperperiodError> {
    let mut periods: Vec<SimTime> = tasks
        .iter()
        .map(|t| t.period)
        .filter(|&p| p > 0)
        .collect();
    periods.sort_unstable();
    periods.dedup();

    let Some(&first) = periods.first() else {
        return Err(HyperperiodError::NoValidPeriods);
    };

    let value = periods.iter().try_fold(first, |acc, &p| lcm(acc, p))?;
    debug!(
        hyperperiod = value,
        unique_periods = ?periods,
        "computed hyperperiod"
    );
    Ok(value)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
