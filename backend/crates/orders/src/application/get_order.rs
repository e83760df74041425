//! Get Order Use Case

use std::sync::Arc;

use kernel::id::{OrderId, UserId};

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::error::{OrderError, OrderResult};

/// Get order use case
pub struct GetOrderUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
}

impl<R> GetOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }

    /// Ownership mismatches are reported as not-found so that order IDs
    /// cannot be probed by non-owners.
    pub async fn execute(&self, user_id: &UserId, order_id: &OrderId) -> OrderResult<Order> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound)?;

        if !order.owned_by(user_id) {
            return Err(OrderError::OrderNotFound);
        }

        Ok(order)
    }
}
