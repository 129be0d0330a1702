// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST+HAL client for the customer/training API.
//!
//! Handles:
//! - Collection listing (unwrapping `_embedded.<collection>`)
//! - Create/update/delete by collection name or self link
//! - Resolving a single linked resource (a training's customer)
//!
//! Every non-2xx response or transport failure becomes one `AppError::Fetch`
//! carrying the status text. There are no retries and no timeouts.

use crate::error::{AppError, Result};
use crate::models::{Customer, CustomerFields, HalCollection, NewTraining, Training};
use crate::services::enrich::CustomerResolver;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

pub const CUSTOMERS: &str = "customers";
pub const TRAININGS: &str = "trainings";

/// Customer/training REST API client.
#[derive(Clone)]
pub struct TrainerClient {
    http: reqwest::Client,
    base_url: String,
}

impl TrainerClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    // ─── Generic HAL operations ──────────────────────────────────────────────

    /// List a collection, unwrapping the HAL envelope.
    pub async fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let url = self.collection_url(collection);
        tracing::debug!(url = %url, "Listing collection");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let envelope: HalCollection<T> = self.check_response_json(response).await?;
        let items = envelope.into_items(collection);
        tracing::debug!(collection, count = items.len(), "Collection fetched");
        Ok(items)
    }

    /// POST a new resource to a collection. The response body is ignored.
    pub async fn create<P: Serialize + ?Sized>(&self, collection: &str, payload: &P) -> Result<()> {
        let url = self.collection_url(collection);
        tracing::debug!(url = %url, "Creating resource");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        self.check_response(response).await
    }

    /// PUT the full field set to a resource's self link.
    pub async fn update<P: Serialize + ?Sized>(&self, self_href: &str, payload: &P) -> Result<()> {
        tracing::debug!(url = %self_href, "Updating resource");

        let response = self
            .http
            .put(self_href)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        self.check_response(response).await
    }

    /// DELETE a resource by its self link.
    pub async fn delete(&self, self_href: &str) -> Result<()> {
        tracing::debug!(url = %self_href, "Deleting resource");

        let response = self
            .http
            .delete(self_href)
            .send()
            .await
            .map_err(transport_error)?;

        self.check_response(response).await
    }

    /// Fetch a single linked resource (not HAL-wrapped).
    pub async fn resolve<T: DeserializeOwned>(&self, href: &str) -> Result<T> {
        let response = self
            .http
            .get(href)
            .send()
            .await
            .map_err(transport_error)?;

        self.check_response_json(response).await
    }

    // ─── Typed wrappers ──────────────────────────────────────────────────────

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.list(CUSTOMERS).await
    }

    pub async fn list_trainings(&self) -> Result<Vec<Training>> {
        self.list(TRAININGS).await
    }

    pub async fn create_customer(&self, fields: &CustomerFields) -> Result<()> {
        self.create(CUSTOMERS, fields).await
    }

    pub async fn update_customer(&self, self_href: &str, fields: &CustomerFields) -> Result<()> {
        self.update(self_href, fields).await
    }

    pub async fn delete_customer(&self, self_href: &str) -> Result<()> {
        self.delete(self_href).await
    }

    pub async fn add_training(&self, training: &NewTraining) -> Result<()> {
        self.create(TRAININGS, training).await
    }

    pub async fn delete_training(&self, self_href: &str) -> Result<()> {
        self.delete(self_href).await
    }

    // ─── Response handling ───────────────────────────────────────────────────

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        tracing::warn!(status = %status, url = %response.url(), "API request failed");
        Err(AppError::from_status(status))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, url = %response.url(), "API request failed");
            return Err(AppError::from_status(status));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("JSON parse error: {}", e)))
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    tracing::warn!(error = %e, "API request could not be sent");
    AppError::Fetch(e.to_string())
}

impl CustomerResolver for TrainerClient {
    fn resolve_customer(&self, href: &str) -> impl Future<Output = Result<Customer>> + Send {
        let href = href.to_string();
        async move { self.resolve(&href).await }
    }
}
