/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Display colors for tasks.
//!
//! Purely cosmetic.  A task's color depends only on its position in the input
//! list and cycles once there are more tasks than palette entries.

/// Fixed palette, as hex RGB strings.
pub const TASK_COLORS: [&str; 10] = [
    "#a855f7", "#ec4899", "#06b6d4", "#10b981", "#f59e0b",
    "#ef4444", "#8b5cf6", "#f97316", "#84cc16", "#6366f1",
];

/// Color of the task at `task_index` in the input list.
pub fn task_color(task_index: usize) -> &'static str {
    TASK_COLORS[task_index % TASK_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_follow_list_position() {
        assert_eq!(task_color(0), "#a855f7");
        assert_eq!(task_color(9), "#6366f1");
    }

    #[test]
    fn colors_cycle_past_palette_size() {
        assert_eq!(task_color(10), task_color(0));
        assert_eq!(task_color(23), task_color(3));
    }
}
