use crate::ports::outbound::YieldScheduler;
use crate::shared::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

/// Operations in flight when no concurrency is configured
pub const DEFAULT_CONCURRENCY: usize = 6;

/// ConcurrencyLimiter for mapping an async operation over many inputs
///
/// At most `concurrency` operations run at once. They start in input order,
/// and a new one starts as soon as any running operation finishes. Results
/// come back index-aligned with the inputs. The first failure to complete
/// ends the run; operations still in flight are dropped. Before each
/// operation starts the scheduler gets a chance to yield.
pub struct ConcurrencyLimiter<S> {
    concurrency: usize,
    scheduler: S,
}

impl<S: YieldScheduler> ConcurrencyLimiter<S> {
    /// Creates a limiter; a concurrency of 0 is raised to 1
    pub fn new(concurrency: usize, scheduler: S) -> Self {
        Self {
            concurrency: concurrency.max(1),
            scheduler,
        }
    }

    pub fn with_default_concurrency(scheduler: S) -> Self {
        Self::new(DEFAULT_CONCURRENCY, scheduler)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs `operation` for every item
    ///
    /// # Errors
    /// Returns the first error `operation` completes with.
    pub async fn run<T, R, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        operation: F,
    ) -> Result<Vec<R>>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let scheduler = &self.scheduler;
        let operation = &operation;

        let mut indexed: Vec<(usize, R)> = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| async move {
                scheduler.yield_if_due().await;
                operation(item).await.map(|result| (index, result))
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        indexed.sort_unstable_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, result)| result).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::runtime::NoopScheduler;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingScheduler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl YieldScheduler for CountingScheduler {
        async fn yield_if_due(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct InFlight {
        current: AtomicUsize,
        max: AtomicUsize,
    }

    impl InFlight {
        fn enter(&self) {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.max.fetch_max(now, Ordering::SeqCst);
        }

        fn leave(&self) {
            self.current.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_run_preserves_order_and_bounds_concurrency() {
        let limiter = ConcurrencyLimiter::new(2, NoopScheduler);
        let in_flight = InFlight::default();

        let results = limiter
            .run(0..6u64, |i| {
                let in_flight = &in_flight;
                async move {
                    in_flight.enter();
                    // Later items finish first.
                    tokio::time::sleep(Duration::from_millis((6 - i) * 5)).await;
                    in_flight.leave();
                    Ok(i * 10)
                }
            })
            .await
            .unwrap();

        assert_eq!(results, vec![0, 10, 20, 30, 40, 50]);
        assert_eq!(in_flight.max.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_slow_item_does_not_hold_back_free_slot() {
        let limiter = ConcurrencyLimiter::new(2, NoopScheduler);
        let slow_running = AtomicBool::new(true);
        let started_beside_slow = AtomicUsize::new(0);

        let results = limiter
            .run(0..5u64, |i| {
                let slow_running = &slow_running;
                let started_beside_slow = &started_beside_slow;
                async move {
                    if i == 0 {
                        tokio::time::sleep(Duration::from_millis(300)).await;
                        slow_running.store(false, Ordering::SeqCst);
                    } else {
                        if slow_running.load(Ordering::SeqCst) {
                            started_beside_slow.fetch_add(1, Ordering::SeqCst);
                        }
                        tokio::time::sleep(Duration::from_millis(1)).await;
                    }
                    Ok(i)
                }
            })
            .await
            .unwrap();

        assert_eq!(results, vec![0, 1, 2, 3, 4]);
        // Items 1..=4 cycle through the second slot while item 0 sleeps.
        assert_eq!(started_beside_slow.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_run_fails_fast() {
        let limiter = ConcurrencyLimiter::new(1, NoopScheduler);
        let started = AtomicUsize::new(0);

        let result = limiter
            .run(0..10, |i| {
                let started = &started;
                async move {
                    started.fetch_add(1, Ordering::SeqCst);
                    if i == 2 {
                        anyhow::bail!("case {} failed", i);
                    }
                    Ok(i)
                }
            })
            .await;

        assert_eq!(result.unwrap_err().to_string(), "case 2 failed");
        assert_eq!(started.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let limiter = ConcurrencyLimiter::new(0, NoopScheduler);
        assert_eq!(limiter.concurrency(), 1);

        let results = limiter.run(vec!["a", "b"], |s| async move { Ok(s.len()) }).await;
        assert_eq!(results.unwrap(), vec![1, 1]);
    }

    #[tokio::test]
    async fn test_scheduler_is_consulted_per_item() {
        let scheduler = CountingScheduler::default();
        let limiter = ConcurrencyLimiter::with_default_concurrency(&scheduler);

        limiter.run(0..4, |i| async move { Ok(i) }).await.unwrap();

        assert_eq!(scheduler.calls.load(Ordering::SeqCst), 4);
        assert_eq!(limiter.concurrency(), DEFAULT_CONCURRENCY);
    }

    #[tokio::test]
    async fn test_run_empty_input() {
        let limiter = ConcurrencyLimiter::with_default_concurrency(NoopScheduler);
        let results: Vec<u8> = limiter
            .run(Vec::<u8>::new(), |i| async move { Ok(i) })
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
