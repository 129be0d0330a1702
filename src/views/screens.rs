// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen flows: fetch-then-render and mutate-then-refetch.
//!
//! Loads never fail outward. A failed fetch posts an error notice and the
//! caller gets the view snapshot with its previous records. Mutations post
//! a notice and return the error; on success they re-run the affected load
//! exactly once. Nothing is updated optimistically.

use crate::error::{AppError, Result};
use crate::models::{
    ActivityStat, CalendarEvent, Customer, CustomerFields, EnrichedTraining, NewTraining,
};
use crate::services::{aggregate, calendar_events, customers_csv, enrich, EnrichPolicy};
use crate::views::{View, ViewSnapshot, ViewStatus};
use crate::AppState;
use std::future::Future;

pub const FETCH_CUSTOMERS_FAILED: &str = "Error fetching customers";
pub const FETCH_TRAININGS_FAILED: &str = "Error fetching trainings";
pub const FETCH_CALENDAR_FAILED: &str = "Error fetching training sessions";
pub const FETCH_STATISTICS_FAILED: &str = "Error fetching statistics";
pub const ADD_CUSTOMER_FAILED: &str = "Error adding customer";
pub const UPDATE_CUSTOMER_FAILED: &str = "Error updating customer";
pub const DELETE_CUSTOMER_FAILED: &str = "Error deleting customer";
pub const ADD_TRAINING_FAILED: &str = "Error adding training";
pub const DELETE_TRAINING_FAILED: &str = "Error deleting training";
pub const TRAINING_ADDED: &str = "Training added successfully";
pub const NO_CUSTOMER_URL: &str = "No customer URL found";
pub const NO_CUSTOMER_LINK: &str = "No customer link found";
pub const NO_TRAINING_URL: &str = "No training URL found";

// ─── Loads ───────────────────────────────────────────────────

/// Run a view's fetch lifecycle, reporting failure on the notice board.
async fn load<T, F>(
    state: &AppState,
    view: &View<T>,
    failure_message: &str,
    fetch: F,
) -> ViewSnapshot<T>
where
    T: Clone,
    F: Future<Output = Result<Vec<T>>>,
{
    if let Err(e) = view.refresh(failure_message, fetch).await {
        tracing::warn!(view = view.name(), error = %e, "Load failed");
        state.notices.error(failure_message).await;
    }
    view.snapshot().await
}

pub async fn load_customers(state: &AppState) -> ViewSnapshot<Customer> {
    load(
        state,
        &state.views.customers,
        FETCH_CUSTOMERS_FAILED,
        state.client.list_customers(),
    )
    .await
}

pub async fn load_trainings(
    state: &AppState,
    policy: EnrichPolicy,
) -> ViewSnapshot<EnrichedTraining> {
    load(
        state,
        &state.views.trainings,
        FETCH_TRAININGS_FAILED,
        fetch_enriched(state, policy),
    )
    .await
}

pub async fn load_calendar(state: &AppState, policy: EnrichPolicy) -> ViewSnapshot<CalendarEvent> {
    let fetch = async {
        let enriched = fetch_enriched(state, policy).await?;
        Ok::<_, AppError>(calendar_events(&enriched))
    };
    load(state, &state.views.calendar, FETCH_CALENDAR_FAILED, fetch).await
}

pub async fn load_statistics(state: &AppState) -> ViewSnapshot<ActivityStat> {
    let fetch = async {
        let trainings = state.client.list_trainings().await?;
        Ok::<_, AppError>(aggregate(&trainings))
    };
    load(
        state,
        &state.views.statistics,
        FETCH_STATISTICS_FAILED,
        fetch,
    )
    .await
}

async fn fetch_enriched(state: &AppState, policy: EnrichPolicy) -> Result<Vec<EnrichedTraining>> {
    let trainings = state.client.list_trainings().await?;
    enrich(&state.client, trainings, policy).await
}

// ─── Customer mutations ──────────────────────────────────────

/// Report a mutation failure and hand the error back.
async fn mutation_failed(state: &AppState, message: &str, e: AppError) -> AppError {
    if e.is_remote() {
        tracing::warn!(error = %e, "{}", message);
    } else {
        tracing::error!(error = %e, "{}", message);
    }
    state.notices.error(message).await;
    e
}

/// Reject a link that is empty or not under the API base URL before any
/// request is made.
async fn require_link(state: &AppState, href: &str, message: &str) -> Result<()> {
    let on_api = href
        .strip_prefix(state.client.base_url())
        .is_some_and(|rest| rest.starts_with('/'));
    if !on_api {
        if !href.trim().is_empty() {
            tracing::warn!(link = %href, base = %state.client.base_url(), "Link outside the API");
        }
        state.notices.error(message).await;
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(())
}

pub async fn add_customer(
    state: &AppState,
    fields: &CustomerFields,
) -> Result<ViewSnapshot<Customer>> {
    if let Err(e) = state.client.create_customer(fields).await {
        return Err(mutation_failed(state, ADD_CUSTOMER_FAILED, e).await);
    }
    tracing::info!(
        firstname = %fields.firstname,
        lastname = %fields.lastname,
        "Customer added"
    );
    Ok(load_customers(state).await)
}

pub async fn update_customer(
    state: &AppState,
    self_href: &str,
    fields: &CustomerFields,
) -> Result<ViewSnapshot<Customer>> {
    require_link(state, self_href, NO_CUSTOMER_URL).await?;
    if let Err(e) = state.client.update_customer(self_href, fields).await {
        return Err(mutation_failed(state, UPDATE_CUSTOMER_FAILED, e).await);
    }
    tracing::info!(customer = %self_href, "Customer updated");
    Ok(load_customers(state).await)
}

pub async fn delete_customer(state: &AppState, self_href: &str) -> Result<ViewSnapshot<Customer>> {
    require_link(state, self_href, NO_CUSTOMER_URL).await?;
    if let Err(e) = state.client.delete_customer(self_href).await {
        return Err(mutation_failed(state, DELETE_CUSTOMER_FAILED, e).await);
    }
    tracing::info!(customer = %self_href, "Customer deleted");
    Ok(load_customers(state).await)
}

/// CSV of the customers currently shown; loads them first if never fetched.
pub async fn export_customers(state: &AppState) -> Result<Vec<u8>> {
    let snapshot = if state.views.customers.status().await == ViewStatus::Idle {
        load_customers(state).await
    } else {
        state.views.customers.snapshot().await
    };
    customers_csv(&snapshot.records)
}

// ─── Training mutations ──────────────────────────────────────

pub async fn add_training(
    state: &AppState,
    training: &NewTraining,
    policy: EnrichPolicy,
) -> Result<ViewSnapshot<EnrichedTraining>> {
    require_link(state, &training.customer, NO_CUSTOMER_LINK).await?;
    if let Err(e) = state.client.add_training(training).await {
        return Err(mutation_failed(state, ADD_TRAINING_FAILED, e).await);
    }
    tracing::info!(
        customer = %training.customer,
        activity = %training.activity,
        "Training added"
    );
    state.notices.success(TRAINING_ADDED).await;
    Ok(load_trainings(state, policy).await)
}

pub async fn delete_training(
    state: &AppState,
    self_href: &str,
    policy: EnrichPolicy,
) -> Result<ViewSnapshot<EnrichedTraining>> {
    require_link(state, self_href, NO_TRAINING_URL).await?;
    if let Err(e) = state.client.delete_training(self_href).await {
        return Err(mutation_failed(state, DELETE_TRAINING_FAILED, e).await);
    }
    tracing::info!(training = %self_href, "Training deleted");
    Ok(load_trainings(state, policy).await)
}
