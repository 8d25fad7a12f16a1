//! Storage contract tests
//!
//! Every case runs against the memory backend and against SQLite, which must
//! behave the same.

#[cfg(test)]
mod tests {
    use crate::common::backends;
    use crate::common::fixtures::{counter, gauge, unknown_kind};
    use futures::future::join_all;
    use metrics_relay::MetricsError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_counter_accumulates() {
        for store in backends().await {
            assert_eq!(store.update_counter("hits", 5).await.unwrap(), 5);
            assert_eq!(store.update_counter("hits", 3).await.unwrap(), 8);
            assert_eq!(store.update_counter("hits", -2).await.unwrap(), 6);
            assert_eq!(
                store.get_counter("hits").await.unwrap(),
                6,
                "backend {}",
                store.backend_name()
            );
        }
    }

    #[tokio::test]
    async fn test_gauge_last_write_wins() {
        for store in backends().await {
            store.update_gauge("temp", 37.1).await.unwrap();
            store.update_gauge("temp", 36.6).await.unwrap();
            assert_eq!(store.get_gauge("temp").await.unwrap(), 36.6);
        }
    }

    #[tokio::test]
    async fn test_same_name_in_both_kinds() {
        for store in backends().await {
            store.update_counter("x", 1).await.unwrap();
            store.update_gauge("x", 2.5).await.unwrap();

            assert_eq!(store.get_counter("x").await.unwrap(), 1);
            assert_eq!(store.get_gauge("x").await.unwrap(), 2.5);

            let snapshot = store.get_all_metrics().await.unwrap();
            assert_eq!(snapshot.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_unknown_metric_is_not_found() {
        for store in backends().await {
            assert!(matches!(
                store.get_counter("missing").await,
                Err(MetricsError::NotFound(_))
            ));
            assert!(matches!(
                store.get_gauge("missing").await,
                Err(MetricsError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_batch_applies_in_order() {
        for store in backends().await {
            store
                .update_batch(&[
                    counter("PollCount", 2),
                    gauge("Alloc", 1.0),
                    counter("PollCount", 3),
                    gauge("Alloc", 4.0),
                ])
                .await
                .unwrap();

            assert_eq!(store.get_counter("PollCount").await.unwrap(), 5);
            assert_eq!(store.get_gauge("Alloc").await.unwrap(), 4.0);
        }
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        for store in backends().await {
            store.update_counter("kept", 1).await.unwrap();

            let result = store
                .update_batch(&[counter("kept", 10), gauge("g", 1.0), unknown_kind("bad")])
                .await;
            assert!(matches!(result, Err(MetricsError::InvalidMetric(_))));

            assert_eq!(store.get_counter("kept").await.unwrap(), 1);
            assert!(matches!(
                store.get_gauge("g").await,
                Err(MetricsError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        for store in backends().await {
            store.update_batch(&[]).await.unwrap();
            assert!(store.get_all_metrics().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_snapshot_lists_everything() {
        for store in backends().await {
            store.update_counter("a", 1).await.unwrap();
            store.update_counter("b", 2).await.unwrap();
            store.update_gauge("c", 0.5).await.unwrap();

            let snapshot = store.get_all_metrics().await.unwrap();
            assert_eq!(snapshot.counters.get("a"), Some(&1));
            assert_eq!(snapshot.counters.get("b"), Some(&2));
            assert_eq!(snapshot.gauges.get("c"), Some(&0.5));
        }
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        for store in backends().await {
            let tasks: Vec<_> = (0..1000)
                .map(|_| {
                    let store = Arc::clone(&store);
                    tokio::spawn(async move { store.update_counter("n", 1).await })
                })
                .collect();

            for result in join_all(tasks).await {
                result.unwrap().unwrap();
            }

            assert_eq!(
                store.get_counter("n").await.unwrap(),
                1000,
                "backend {}",
                store.backend_name()
            );
        }
    }

    #[tokio::test]
    async fn test_counter_overflow_is_rejected_and_value_kept() {
        for store in backends().await {
            let backend = store.backend_name();
            store.update_counter("big", i64::MAX).await.unwrap();

            let result = store.update_counter("big", 1).await;
            assert!(
                matches!(result, Err(MetricsError::InvalidMetric(_))),
                "backend {}: {:?}",
                backend,
                result
            );

            assert_eq!(store.get_counter("big").await.unwrap(), i64::MAX);
            let snapshot = store.get_all_metrics().await.unwrap();
            assert_eq!(snapshot.counters.get("big"), Some(&i64::MAX));
            // the row stays usable
            assert_eq!(store.update_counter("big", -1).await.unwrap(), i64::MAX - 1);
        }
    }

    #[tokio::test]
    async fn test_counter_underflow_is_rejected() {
        for store in backends().await {
            store.update_counter("low", i64::MIN).await.unwrap();

            assert!(matches!(
                store.update_counter("low", -1).await,
                Err(MetricsError::InvalidMetric(_))
            ));
            assert_eq!(store.get_counter("low").await.unwrap(), i64::MIN);
            assert_eq!(store.update_counter("low", 1).await.unwrap(), i64::MIN + 1);
        }
    }

    #[tokio::test]
    async fn test_batch_overflow_rolls_back() {
        for store in backends().await {
            store.update_counter("big", i64::MAX).await.unwrap();

            let result = store
                .update_batch(&[gauge("g", 1.0), counter("big", 1)])
                .await;
            assert!(matches!(result, Err(MetricsError::InvalidMetric(_))));

            assert_eq!(store.get_counter("big").await.unwrap(), i64::MAX);
            assert!(matches!(
                store.get_gauge("g").await,
                Err(MetricsError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_health_check_and_close() {
        for store in backends().await {
            store.health_check().await.unwrap();
            store.close().await.unwrap();
        }
    }
}
