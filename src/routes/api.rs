// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: one group per screen.

use crate::error::{AppError, Result};
use crate::models::{
    ActivityStat, CalendarEvent, Customer, CustomerFields, EnrichedTraining, NewTraining,
};
use crate::services::export::CUSTOMERS_CSV_FILENAME;
use crate::services::EnrichPolicy;
use crate::views::{screens, Notice, ViewSnapshot};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/customers",
            get(get_customers)
                .post(create_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
        .route("/api/customers/export", get(export_customers))
        .route(
            "/api/trainings",
            get(get_trainings)
                .post(create_training)
                .delete(delete_training),
        )
        .route("/api/calendar", get(get_calendar))
        .route("/api/statistics", get(get_statistics))
        .route("/api/notices", get(get_notices))
        .route("/api/notices/{id}", delete(dismiss_notice))
}

#[derive(Deserialize)]
struct ViewQuery {
    /// Return the current snapshot without fetching
    #[serde(default)]
    cached: bool,
    /// Override the configured enrichment policy
    policy: Option<EnrichPolicy>,
}

impl ViewQuery {
    fn policy(&self, state: &AppState) -> EnrichPolicy {
        self.policy.unwrap_or(state.config.enrich_policy)
    }
}

/// Identifies a resource by its self link.
#[derive(Deserialize)]
struct HrefQuery {
    href: String,
}

// ─── Customers ───────────────────────────────────────────────

async fn get_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewQuery>,
) -> Json<ViewSnapshot<Customer>> {
    if params.cached {
        return Json(state.views.customers.snapshot().await);
    }
    Json(screens::load_customers(&state).await)
}

async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<CustomerFields>,
) -> Result<(StatusCode, Json<ViewSnapshot<Customer>>)> {
    let snapshot = screens::add_customer(&state, &fields).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn update_customer(
    State(state): State<Arc<AppState>>,
    Query(target): Query<HrefQuery>,
    Json(fields): Json<CustomerFields>,
) -> Result<Json<ViewSnapshot<Customer>>> {
    let snapshot = screens::update_customer(&state, &target.href, &fields).await?;
    Ok(Json(snapshot))
}

async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Query(target): Query<HrefQuery>,
) -> Result<Json<ViewSnapshot<Customer>>> {
    let snapshot = screens::delete_customer(&state, &target.href).await?;
    Ok(Json(snapshot))
}

/// Download the customer list as CSV.
async fn export_customers(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let csv = screens::export_customers(&state).await?;
    tracing::info!(bytes = csv.len(), "Customer CSV exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CUSTOMERS_CSV_FILENAME),
            ),
        ],
        csv,
    ))
}

// ─── Trainings ───────────────────────────────────────────────

async fn get_trainings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewQuery>,
) -> Json<ViewSnapshot<EnrichedTraining>> {
    if params.cached {
        return Json(state.views.trainings.snapshot().await);
    }
    let policy = params.policy(&state);
    Json(screens::load_trainings(&state, policy).await)
}

/// Form data for a new training.
#[derive(Deserialize)]
struct TrainingRequest {
    date: DateTime<Utc>,
    duration: f64,
    activity: String,
    /// Self link of the customer
    customer: String,
}

async fn create_training(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TrainingRequest>,
) -> Result<(StatusCode, Json<ViewSnapshot<EnrichedTraining>>)> {
    if !request.duration.is_finite() {
        return Err(AppError::BadRequest(
            "Duration must be a number of minutes".to_string(),
        ));
    }

    let training = NewTraining::new(
        request.date,
        request.duration,
        request.activity,
        request.customer,
    );
    let snapshot =
        screens::add_training(&state, &training, state.config.enrich_policy).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn delete_training(
    State(state): State<Arc<AppState>>,
    Query(target): Query<HrefQuery>,
) -> Result<Json<ViewSnapshot<EnrichedTraining>>> {
    let snapshot =
        screens::delete_training(&state, &target.href, state.config.enrich_policy).await?;
    Ok(Json(snapshot))
}

// ─── Calendar & Statistics ───────────────────────────────────

async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewQuery>,
) -> Json<ViewSnapshot<CalendarEvent>> {
    if params.cached {
        return Json(state.views.calendar.snapshot().await);
    }
    let policy = params.policy(&state);
    Json(screens::load_calendar(&state, policy).await)
}

async fn get_statistics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewQuery>,
) -> Json<ViewSnapshot<ActivityStat>> {
    if params.cached {
        return Json(state.views.statistics.snapshot().await);
    }
    Json(screens::load_statistics(&state).await)
}

// ─── Notices ─────────────────────────────────────────────────

async fn get_notices(State(state): State<Arc<AppState>>) -> Json<Vec<Notice>> {
    Json(state.notices.active().await)
}

async fn dismiss_notice(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> StatusCode {
    if state.notices.dismiss(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
