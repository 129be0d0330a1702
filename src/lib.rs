// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Personal Trainer: backend for the customer and training management UI.
//!
//! This crate talks to the customer/training REST+HAL API, joins trainings
//! with their customers, derives per-activity statistics and calendar events,
//! and serves per-screen view state to the single-page frontend.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod views;

use config::Config;
use services::TrainerClient;
use views::{NoticeBoard, Views};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub client: TrainerClient,
    pub views: Views,
    pub notices: NoticeBoard,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = TrainerClient::new(config.api_url.clone());
        let notices = NoticeBoard::new(config.notice_ttl_secs);
        Self {
            config,
            client,
            views: Views::default(),
            notices,
        }
    }
}
