//! Update Status Use Case
//!
//! Explicit status overwrite. No transition-graph validation here;
//! cancellation is the only guarded transition and has its own use case.

use std::sync::Arc;

use kernel::id::{OrderId, UserId};

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{OrderError, OrderResult};

/// Update status use case
pub struct UpdateStatusUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
}

impl<R> UpdateStatusUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> OrderResult<Order> {
        let mut order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound)?;

        if !order.owned_by(user_id) {
            return Err(OrderError::OrderNotFound);
        }

        order.set_status(status);
        self.order_repo.update_status(&order).await?;

        tracing::info!(order_id = %order.order_id, status = %order.status, "Order status updated");

        Ok(order)
    }
}
