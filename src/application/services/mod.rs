/// Application services shared by use cases
mod concurrency_limiter;

pub use concurrency_limiter::{ConcurrencyLimiter, DEFAULT_CONCURRENCY};
