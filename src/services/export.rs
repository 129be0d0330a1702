// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV export of the customer list.

use crate::error::Result;
use crate::models::Customer;
use anyhow::Context;

/// Download file name for the export.
pub const CUSTOMERS_CSV_FILENAME: &str = "customers.csv";

/// Column header; matches the `CustomerFields` field order.
const HEADER: [&str; 7] = [
    "firstname",
    "lastname",
    "email",
    "phone",
    "streetaddress",
    "postcode",
    "city",
];

/// Render customers as CSV. The header is always written; links are omitted.
pub fn customers_csv(customers: &[Customer]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    wtr.write_record(HEADER).context("Failed to write CSV header")?;
    for customer in customers {
        wtr.serialize(&customer.fields)
            .context("Failed to write CSV row")?;
    }

    let buf = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))?;
    Ok(buf)
}
