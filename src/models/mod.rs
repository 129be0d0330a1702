// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod calendar;
pub mod customer;
pub mod hal;
pub mod stats;
pub mod training;

pub use calendar::CalendarEvent;
pub use customer::{Customer, CustomerFields};
pub use hal::{HalCollection, Link, Links};
pub use stats::ActivityStat;
pub use training::{EnrichedTraining, NewTraining, Training};
