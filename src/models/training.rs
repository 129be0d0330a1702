// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::hal::{null_as_empty, Links};
use crate::models::Customer;
use crate::time_utils::format_iso_millis;

/// Training resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Training {
    /// Start date/time, normalised to UTC
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    /// Duration in minutes, as supplied by the server
    pub duration: f64,
    /// Free-text activity label
    #[serde(default, deserialize_with = "null_as_empty")]
    pub activity: String,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl Training {
    pub fn self_href(&self) -> Option<&str> {
        self.links.self_href()
    }

    pub fn customer_href(&self) -> Option<&str> {
        self.links.customer_href()
    }
}

/// A training joined with its resolved customer.
///
/// `customer` is `None` when the link could not be resolved and the
/// best-effort policy was in force.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EnrichedTraining {
    pub training: Training,
    pub customer: Option<Customer>,
}

impl EnrichedTraining {
    /// Display name of the customer, or "Unknown customer".
    pub fn customer_name(&self) -> String {
        self.customer
            .as_ref()
            .map(Customer::full_name)
            .unwrap_or_else(|| "Unknown customer".to_string())
    }
}

/// Body for `POST /trainings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTraining {
    /// ISO 8601 with milliseconds and `Z`
    pub date: String,
    pub duration: f64,
    pub activity: String,
    /// Self link of the customer the training belongs to
    pub customer: String,
}

impl NewTraining {
    pub fn new(
        date: DateTime<Utc>,
        duration: f64,
        activity: impl Into<String>,
        customer_href: impl Into<String>,
    ) -> Self {
        Self {
            date: format_iso_millis(date),
            duration,
            activity: activity.into(),
            customer: customer_href.into(),
        }
    }
}
