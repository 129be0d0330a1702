// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training enrichment: join each training with its customer.
//!
//! Every training's customer link is resolved concurrently and the results
//! are joined in input order. What happens to a row whose link fails is the
//! caller's choice of [`EnrichPolicy`].

use crate::error::{AppError, Result};
use crate::models::{Customer, EnrichedTraining, Training};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::str::FromStr;

/// Resolves a customer link to a customer.
pub trait CustomerResolver: Sync {
    fn resolve_customer(&self, href: &str) -> impl Future<Output = Result<Customer>> + Send;
}

/// Policy for customer links that fail to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichPolicy {
    /// Any failed resolution fails the whole enrichment.
    FailFast,
    /// Failed rows keep `customer: None`.
    BestEffort,
}

impl FromStr for EnrichPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fail_fast" => Ok(EnrichPolicy::FailFast),
            "best_effort" => Ok(EnrichPolicy::BestEffort),
            other => Err(AppError::BadRequest(format!(
                "Unknown enrichment policy: {}",
                other
            ))),
        }
    }
}

/// Resolve every training's customer concurrently.
///
/// The output has one entry per input training, in input order.
pub async fn resolve_all<R: CustomerResolver>(
    resolver: &R,
    trainings: Vec<Training>,
) -> Vec<(Training, Result<Customer>)> {
    let lookups = trainings.iter().map(|training| async move {
        let href = training.customer_href().ok_or_else(|| AppError::LinkResolution {
            link: training.self_href().unwrap_or("<unlinked training>").to_string(),
            reason: "training has no customer link".to_string(),
        })?;

        resolver
            .resolve_customer(href)
            .await
            .map_err(|e| match e {
                linked @ AppError::LinkResolution { .. } => linked,
                other => AppError::LinkResolution {
                    link: href.to_string(),
                    reason: other.to_string(),
                },
            })
    });

    let customers = join_all(lookups).await;
    trainings.into_iter().zip(customers).collect()
}

/// Turn per-row resolutions into enriched trainings under `policy`.
pub fn apply_policy(
    resolved: Vec<(Training, Result<Customer>)>,
    policy: EnrichPolicy,
) -> Result<Vec<EnrichedTraining>> {
    let mut enriched = Vec::with_capacity(resolved.len());

    for (training, customer) in resolved {
        let customer = match (customer, policy) {
            (Ok(customer), _) => Some(customer),
            (Err(e), EnrichPolicy::FailFast) => return Err(e),
            (Err(e), EnrichPolicy::BestEffort) => {
                tracing::warn!(error = %e, "Customer unresolved, keeping training without it");
                None
            }
        };
        enriched.push(EnrichedTraining { training, customer });
    }

    Ok(enriched)
}

/// Resolve customers for `trainings` and apply `policy`.
pub async fn enrich<R: CustomerResolver>(
    resolver: &R,
    trainings: Vec<Training>,
    policy: EnrichPolicy,
) -> Result<Vec<EnrichedTraining>> {
    let count = trainings.len();
    let resolved = resolve_all(resolver, trainings).await;
    let enriched = apply_policy(resolved, policy)?;

    tracing::debug!(
        trainings = count,
        unresolved = enriched.iter().filter(|t| t.customer.is_none()).count(),
        ?policy,
        "Trainings enriched"
    );
    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerFields, Link, Links};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Resolver backed by a map; missing links fail. Later entries answer first.
    struct MapResolver {
        customers: HashMap<String, Customer>,
        calls: AtomicUsize,
    }

    impl MapResolver {
        fn new(entries: &[(&str, &str)]) -> Self {
            let customers = entries
                .iter()
                .map(|(href, name)| (href.to_string(), customer(name)))
                .collect();
            Self {
                customers,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl CustomerResolver for MapResolver {
        fn resolve_customer(&self, href: &str) -> impl Future<Output = Result<Customer>> + Send {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let found = self.customers.get(href).cloned();
            async move {
                // Reverse completion order relative to issue order.
                tokio::time::sleep(Duration::from_millis(20u64.saturating_sub(n as u64 * 5))).await;
                found.ok_or_else(|| AppError::Fetch("Not Found".to_string()))
            }
        }
    }

    fn customer(name: &str) -> Customer {
        Customer {
            fields: CustomerFields {
                firstname: name.to_string(),
                lastname: "Test".to_string(),
                ..Default::default()
            },
            links: Links::default(),
        }
    }

    fn training(id: u32, customer_href: Option<&str>) -> Training {
        Training {
            date: chrono::DateTime::from_timestamp(1_700_000_000 + id as i64 * 3600, 0).unwrap(),
            duration: 30.0 + id as f64,
            activity: format!("Activity {}", id),
            links: Links {
                self_link: Some(Link::new(format!("http://x/api/trainings/{}", id))),
                customer: customer_href.map(Link::new),
            },
        }
    }

    #[tokio::test]
    async fn test_enrich_preserves_input_order() {
        let resolver = MapResolver::new(&[("c/1", "Ann"), ("c/2", "Bob"), ("c/3", "Cid")]);
        let trainings = vec![
            training(1, Some("c/1")),
            training(2, Some("c/2")),
            training(3, Some("c/3")),
            training(4, Some("c/1")),
        ];

        let enriched = enrich(&resolver, trainings.clone(), EnrichPolicy::FailFast)
            .await
            .unwrap();

        assert_eq!(enriched.len(), trainings.len());
        for (row, original) in enriched.iter().zip(&trainings) {
            assert_eq!(&row.training, original);
        }
        let names: Vec<_> = enriched
            .iter()
            .map(|t| t.customer.as_ref().unwrap().fields.firstname.as_str())
            .collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cid", "Ann"]);
    }

    #[tokio::test]
    async fn test_enrich_is_idempotent() {
        let trainings = vec![training(1, Some("c/1")), training(2, Some("c/missing"))];

        let first = enrich(
            &MapResolver::new(&[("c/1", "Ann")]),
            trainings.clone(),
            EnrichPolicy::BestEffort,
        )
        .await
        .unwrap();
        let second = enrich(
            &MapResolver::new(&[("c/1", "Ann")]),
            trainings,
            EnrichPolicy::BestEffort,
        )
        .await
        .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fail_fast_reports_link_resolution_error() {
        let resolver = MapResolver::new(&[("c/1", "Ann")]);
        let trainings = vec![training(1, Some("c/1")), training(2, Some("c/broken"))];

        let err = enrich(&resolver, trainings, EnrichPolicy::FailFast)
            .await
            .unwrap_err();

        match err {
            AppError::LinkResolution { link, .. } => assert_eq!(link, "c/broken"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_best_effort_leaves_customer_absent() {
        let resolver = MapResolver::new(&[("c/1", "Ann")]);
        let trainings = vec![
            training(1, Some("c/broken")),
            training(2, Some("c/1")),
            training(3, None),
        ];

        let enriched = enrich(&resolver, trainings, EnrichPolicy::BestEffort)
            .await
            .unwrap();

        assert_eq!(enriched.len(), 3);
        assert!(enriched[0].customer.is_none());
        assert_eq!(enriched[1].customer_name(), "Ann Test");
        assert!(enriched[2].customer.is_none());
    }

    #[tokio::test]
    async fn test_missing_customer_link_is_not_fetched() {
        let resolver = MapResolver::new(&[]);
        let resolved = resolve_all(&resolver, vec![training(5, None)]).await;

        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(
            resolved[0].1,
            Err(AppError::LinkResolution { ref link, .. }) if link == "http://x/api/trainings/5"
        ));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let resolver = MapResolver::new(&[]);
        let enriched = enrich(&resolver, vec![], EnrichPolicy::FailFast)
            .await
            .unwrap();
        assert!(enriched.is_empty());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "fail_fast".parse::<EnrichPolicy>().unwrap(),
            EnrichPolicy::FailFast
        );
        assert_eq!(
            "best_effort".parse::<EnrichPolicy>().unwrap(),
            EnrichPolicy::BestEffort
        );
        assert!("maybe".parse::<EnrichPolicy>().is_err());
    }
}
