// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HAL envelope and link types used by the REST API.
//!
//! Collections arrive as `{ "_embedded": { "<name>": [...] } }` and every
//! resource carries its identity as `_links.self.href`. Link strings are
//! treated as opaque identifiers.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A single HAL link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// The `_links` object of a resource.
///
/// Only the relations this client follows are modelled; others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Link>,
}

impl Links {
    pub fn self_href(&self) -> Option<&str> {
        self.self_link.as_ref().map(|l| l.href.as_str())
    }

    pub fn customer_href(&self) -> Option<&str> {
        self.customer.as_ref().map(|l| l.href.as_str())
    }
}

/// A HAL collection response.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct HalCollection<T> {
    #[serde(rename = "_embedded", default)]
    embedded: HashMap<String, Vec<T>>,
}

impl<T> HalCollection<T> {
    /// Take the named embedded collection.
    ///
    /// A missing `_embedded` object or a missing key is an empty collection.
    pub fn into_items(mut self, collection: &str) -> Vec<T> {
        self.embedded.remove(collection).unwrap_or_default()
    }
}

/// Deserialize a string that may be `null` as the empty string.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
