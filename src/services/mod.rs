// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API access and the join/aggregation logic.

pub mod api;
pub mod calendar;
pub mod enrich;
pub mod export;
pub mod statistics;

pub use api::TrainerClient;
pub use calendar::calendar_events;
pub use enrich::{enrich, CustomerResolver, EnrichPolicy};
pub use export::customers_csv;
pub use statistics::aggregate;
