// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-screen view state and the fetch lifecycle.
//!
//! Each screen owns one [`View`]. Its state moves
//! `Idle -> Loading -> Ready | Failed` and only the fetch lifecycle changes
//! it. Every fetch gets a monotonic epoch; a result whose epoch is no longer
//! the latest issued is dropped, so a slow superseded request can't
//! overwrite newer data.

pub mod notice;
pub mod screens;

pub use notice::{Notice, NoticeBoard, Severity};

use crate::error::Result;
use crate::models::{ActivityStat, CalendarEvent, Customer, EnrichedTraining};
use serde::Serialize;
use std::future::Future;
use tokio::sync::Mutex;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Lifecycle status of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Point-in-time copy of a view, as returned to the UI.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewSnapshot<T> {
    pub status: ViewStatus,
    pub records: Vec<T>,
    pub error_message: Option<String>,
    /// Epoch of the most recently issued fetch
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub epoch: u64,
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result replaced the view's records.
    Applied,
    /// A newer fetch was issued meanwhile; the result was dropped.
    Stale,
}

struct ViewState<T> {
    status: ViewStatus,
    records: Vec<T>,
    error_message: Option<String>,
    issued: u64,
}

/// State for one screen.
pub struct View<T> {
    name: &'static str,
    state: Mutex<ViewState<T>>,
}

impl<T: Clone> View<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(ViewState {
                status: ViewStatus::Idle,
                records: Vec::new(),
                error_message: None,
                issued: 0,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Start a fetch: issue a new epoch and show the loading state.
    ///
    /// Records stay as they are until the fetch completes.
    pub async fn begin(&self) -> FetchTicket {
        let mut state = self.state.lock().await;
        state.issued += 1;
        state.status = ViewStatus::Loading;
        FetchTicket(state.issued)
    }

    /// Apply a fetch result unless a newer fetch has been issued.
    ///
    /// On failure the records are left untouched, `failure_message` becomes
    /// the view's error message, and the error is returned.
    pub async fn complete(
        &self,
        ticket: FetchTicket,
        result: Result<Vec<T>>,
        failure_message: &str,
    ) -> Result<FetchOutcome> {
        let mut state = self.state.lock().await;

        if ticket.0 != state.issued {
            tracing::debug!(
                view = self.name,
                epoch = ticket.0,
                latest = state.issued,
                ok = result.is_ok(),
                "Dropping stale fetch result"
            );
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(records) => {
                tracing::debug!(view = self.name, count = records.len(), "View updated");
                state.records = records;
                state.status = ViewStatus::Ready;
                state.error_message = None;
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                tracing::error!(view = self.name, error = %e, "View fetch failed");
                state.status = ViewStatus::Failed;
                state.error_message = Some(failure_message.to_string());
                Err(e)
            }
        }
    }

    /// Run one full fetch lifecycle.
    pub async fn refresh<F>(&self, failure_message: &str, fetch: F) -> Result<FetchOutcome>
    where
        F: Future<Output = Result<Vec<T>>>,
    {
        let ticket = self.begin().await;
        let result = fetch.await;
        self.complete(ticket, result, failure_message).await
    }

    pub async fn status(&self) -> ViewStatus {
        self.state.lock().await.status
    }

    pub async fn snapshot(&self) -> ViewSnapshot<T> {
        let state = self.state.lock().await;
        ViewSnapshot {
            status: state.status,
            records: state.records.clone(),
            error_message: state.error_message.clone(),
            epoch: state.issued,
        }
    }
}

/// One view per screen.
pub struct Views {
    pub customers: View<Customer>,
    pub trainings: View<EnrichedTraining>,
    pub calendar: View<CalendarEvent>,
    pub statistics: View<ActivityStat>,
}

impl Default for Views {
    fn default() -> Self {
        Self {
            customers: View::new("customers"),
            trainings: View::new("trainings"),
            calendar: View::new("calendar"),
            statistics: View::new("statistics"),
        }
    }
}
