//! Cancel Order Use Case
//!
//! Cancellation is a terminal status change, not a row removal, and is
//! only allowed while the order is still PENDING.

use std::sync::Arc;

use kernel::id::{OrderId, UserId};

use crate::domain::repository::OrderRepository;
use crate::error::{OrderError, OrderResult};

/// Cancel order use case
pub struct CancelOrderUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
}

impl<R> CancelOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }

    pub async fn execute(&self, user_id: &UserId, order_id: &OrderId) -> OrderResult<()> {
        let mut order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound)?;

        if !order.owned_by(user_id) {
            return Err(OrderError::OrderNotFound);
        }

        order.cancel()?;
        self.order_repo.update_status(&order).await?;

        tracing::info!(order_id = %order.order_id, "Order cancelled");

        Ok(())
    }
}
