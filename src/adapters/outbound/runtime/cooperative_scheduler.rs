use crate::ports::outbound::YieldScheduler;
use crate::shared::error::LockTreeError;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Time allowed between yields before the scheduler hands control back
pub const DEFAULT_YIELD_THRESHOLD: Duration = Duration::from_millis(100);

/// CooperativeScheduler adapter yielding to the tokio runtime
///
/// Yields with `tokio::task::yield_now` once at least `threshold` has passed
/// since the previous yield (or since creation).
pub struct CooperativeScheduler {
    threshold: Duration,
    last_yield: Mutex<Instant>,
}

impl CooperativeScheduler {
    /// Creates a scheduler with the default 100 ms threshold
    ///
    /// # Errors
    /// Returns `UnsupportedRuntimeError` when called outside a tokio runtime.
    pub fn new() -> Result<Self> {
        Self::with_threshold(DEFAULT_YIELD_THRESHOLD)
    }

    pub fn with_threshold(threshold: Duration) -> Result<Self> {
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(LockTreeError::UnsupportedRuntime {
                message: "cooperative yielding requires a tokio runtime; none is running on this thread"
                    .to_string(),
            }
            .into());
        }

        Ok(Self {
            threshold,
            last_yield: Mutex::new(Instant::now()),
        })
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Claims the yield slot if the threshold has elapsed
    fn take_due(&self) -> bool {
        let mut last_yield = match self.last_yield.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if last_yield.elapsed() >= self.threshold {
            *last_yield = Instant::now();
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl YieldScheduler for CooperativeScheduler {
    async fn yield_if_due(&self) {
        if self.take_due() {
            tokio::task::yield_now().await;
        }
    }
}

/// NoopScheduler adapter that never yields
///
/// For tests and single-item runs where yielding buys nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScheduler;

#[async_trait]
impl YieldScheduler for NoopScheduler {
    async fn yield_if_due(&self) {}
}
