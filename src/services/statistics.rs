// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-activity statistics over a training list.

use crate::models::{ActivityStat, Training};
use std::collections::HashMap;

/// Group trainings by activity and total their minutes and sessions.
///
/// Activities are matched exactly (case-sensitive, no trimming). The result
/// is sorted by `minutes` descending; ties keep first-seen order.
pub fn aggregate(trainings: &[Training]) -> Vec<ActivityStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<ActivityStat> = Vec::new();

    for training in trainings {
        let slot = *index.entry(training.activity.as_str()).or_insert_with(|| {
            stats.push(ActivityStat {
                activity: training.activity.clone(),
                minutes: 0.0,
                sessions: 0,
            });
            stats.len() - 1
        });

        stats[slot].minutes += training.duration;
        stats[slot].sessions += 1;
    }

    // Stable sort keeps first-seen order among equal totals.
    stats.sort_by(|a, b| b.minutes.total_cmp(&a.minutes));
    stats
}
