//! Injectable delay provider, so tests can run the simulated latencies on
//! fake time instead of wall-clock waits.

use std::time::Duration;

use async_trait::async_trait;

/// Abstraction over wall-clock waits
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Suspend the current task for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Scheduler backed by the tokio timer
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
