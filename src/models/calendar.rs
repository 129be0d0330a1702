// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar event model.

use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Customer;

/// One training rendered as a calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarEvent {
    /// "Firstname Lastname / Activity"
    pub title: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start: DateTime<Utc>,
    /// `start` plus the duration
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end: DateTime<Utc>,
    /// Duration in minutes
    pub duration: f64,
    pub customer: Option<Customer>,
}
