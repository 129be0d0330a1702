// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar events from enriched trainings.

use crate::models::{CalendarEvent, EnrichedTraining};
use crate::time_utils::add_minutes;

/// One event per training, in input order.
pub fn calendar_events(trainings: &[EnrichedTraining]) -> Vec<CalendarEvent> {
    trainings.iter().map(to_event).collect()
}

/// An event whose end can't be represented ends at its start.
fn to_event(row: &EnrichedTraining) -> CalendarEvent {
    let training = &row.training;
    let end = add_minutes(training.date, training.duration).unwrap_or_else(|| {
        tracing::warn!(
            training = training.self_href().unwrap_or("<unlinked training>"),
            duration = training.duration,
            "Training duration out of range, ending event at its start"
        );
        training.date
    });
    CalendarEvent {
        title: format!("{} / {}", row.customer_name(), training.activity),
        start: training.date,
        end,
        duration: training.duration,
        customer: row.customer.clone(),
    }
}
