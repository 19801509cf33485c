/// Async runtime adapters
mod cooperative_scheduler;

pub use cooperative_scheduler::{CooperativeScheduler, NoopScheduler, DEFAULT_YIELD_THRESHOLD};
