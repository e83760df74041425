//! Pending-Order Sweeper
//!
//! Fixed-interval background task that advances every PENDING order to
//! PROCESSING. A failed sweep is logged and dropped; the next scheduled
//! run proceeds independently, with no retry or backoff within a run.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::repository::OrderRepository;
use crate::error::OrderResult;

/// Sweep interval (5 minutes)
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Pending-order sweeper
pub struct Sweeper<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
}

impl<R> Sweeper<R>
where
    R: OrderRepository + Send + Sync + 'static,
{
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }

    /// One sweep: bulk-promote PENDING orders, returning the count
    pub async fn sweep_once(&self) -> OrderResult<u64> {
        let promoted = self.order_repo.promote_pending().await?;
        if promoted > 0 {
            tracing::info!(promoted, "Advanced pending orders to processing");
        }
        Ok(promoted)
    }

    /// Run forever on the given interval, swallowing per-run errors.
    pub async fn run(self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so the first sweep
        // happens one full interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = self.sweep_once().await {
                tracing::error!(error = %e, "Order sweep failed; next run unaffected");
            }
        }
    }

    /// Spawn the sweeper on the default interval
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(SWEEP_INTERVAL))
    }
}
