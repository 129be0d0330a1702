// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Customer model for the REST API and the customer screen.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::hal::{null_as_empty, Links};

/// Editable customer fields: the create/update payload and the CSV row.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CustomerFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub firstname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lastname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub streetaddress: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub postcode: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
}

/// Customer resource as returned by the API.
///
/// Identity is the self link; there is no client-visible numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Customer {
    #[serde(flatten)]
    pub fields: CustomerFields,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl Customer {
    /// The customer's self link, if the server supplied one.
    pub fn self_href(&self) -> Option<&str> {
        self.links.self_href()
    }

    /// "Firstname Lastname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fields.firstname, self.fields.lastname)
    }
}
