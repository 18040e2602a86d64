//! Concurrent fan-out with an ordered join barrier
//!
//! Every level of the pipeline derives its children from fully resolved
//! parents, so the concurrency primitive is deliberately simple: spawn one
//! task per item, then join them all before returning. Results come back
//! indexed by submission order, never completion order, and a failed item
//! occupies its slot as an `Err` instead of aborting its siblings.

use crate::{HarvestError, Result};
use std::future::Future;

/// Runs `worker` over every item concurrently and joins all of them
///
/// Unbounded fan-out: all tasks are spawned before any is awaited, and the
/// caller only proceeds once every task has finished. A panicked or
/// cancelled task surfaces as an error in its own slot.
pub async fn run_all<T, U, F, Fut>(items: Vec<T>, worker: F) -> Vec<Result<U>>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<U>> + Send + 'static,
{
    let handles: Vec<_> = items
        .into_iter()
        .map(|item| tokio::spawn(worker(item)))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => results.push(Err(HarvestError::TaskJoin(e))),
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_results_in_submission_order() {
        // First submitted finishes last: completion order is the reverse of
        // submission order, results must not be
        let delays = vec![(0u64, 50u64), (1, 30), (2, 10)];
        let results = run_all(delays, |(index, delay_ms)| async move {
            sleep(Duration::from_millis(delay_ms)).await;
            Ok(index)
        })
        .await;

        let values: Vec<u64> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_failure_does_not_starve_siblings() {
        let items = vec![1u32, 2, 3, 4];
        let results = run_all(items, |n| async move {
            if n == 2 {
                Err(HarvestError::NoBooks {
                    url: format!("item-{}", n),
                })
            } else {
                Ok(n * 10)
            }
        })
        .await;

        assert_eq!(results.len(), 4);
        assert_eq!(*results[0].as_ref().unwrap(), 10);
        assert!(results[1].is_err());
        assert_eq!(*results[2].as_ref().unwrap(), 30);
        assert_eq!(*results[3].as_ref().unwrap(), 40);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results: Vec<Result<u32>> = run_all(Vec::<u32>::new(), |n| async move { Ok(n) }).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_all_started_before_any_joined() {
        // With one concurrent unit per item, three 50ms sleeps complete in
        // far less than 150ms of wall time
        let start = std::time::Instant::now();
        let results = run_all(vec![(), (), ()], |_| async {
            sleep(Duration::from_millis(50)).await;
            Ok(())
        })
        .await;

        assert_eq!(results.len(), 3);
        assert!(start.elapsed() < Duration::from_millis(140));
    }
}
