use async_trait::async_trait;

/// YieldScheduler port for cooperative yielding
///
/// Long batches of CPU-bound work call `yield_if_due` between items so the
/// async runtime can run other tasks. Implementations decide how often a
/// yield actually happens.
///
/// # Async Support
/// Implementations must be `Send + Sync` so one scheduler can be shared by
/// every in-flight operation.
#[async_trait]
pub trait YieldScheduler: Send + Sync {
    /// Yields to the runtime if the scheduler's threshold has elapsed since
    /// the last yield; otherwise returns immediately
    async fn yield_if_due(&self);
}

#[async_trait]
impl<T: YieldScheduler + ?Sized> YieldScheduler for &T {
    async fn yield_if_due(&self) {
        (**self).yield_if_due().await
    }
}
