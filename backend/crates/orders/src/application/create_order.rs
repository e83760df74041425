//! Create Order Use Case
//!
//! Checkout: validate the requester exists, then hand the lines to the
//! repository's atomic reservation. Stock checks, decrements, and price
//! snapshots all happen inside that single transaction.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::order::{Order, OrderLine};
use crate::domain::repository::{OrderRepository, UserDirectory};
use crate::error::{OrderError, OrderResult};

/// Create order input
pub struct CreateOrderInput {
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
}

/// Create order use case
pub struct CreateOrderUseCase<R, U>
where
    R: OrderRepository,
    U: UserDirectory,
{
    order_repo: Arc<R>,
    users: Arc<U>,
}

impl<R, U> CreateOrderUseCase<R, U>
where
    R: OrderRepository,
    U: UserDirectory,
{
    pub fn new(order_repo: Arc<R>, users: Arc<U>) -> Self {
        Self { order_repo, users }
    }

    pub async fn execute(&self, input: CreateOrderInput) -> OrderResult<Order> {
        if input.lines.is_empty() {
            return Err(OrderError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }
        if let Some(line) = input.lines.iter().find(|l| l.quantity <= 0) {
            return Err(OrderError::Validation(format!(
                "Quantity for product {} must be positive",
                line.product_name
            )));
        }

        if !self.users.user_exists(&input.user_id).await? {
            return Err(OrderError::UserNotFound);
        }

        let order = self
            .order_repo
            .place_order(input.user_id, &input.lines)
            .await?;

        tracing::info!(
            order_id = %order.order_id,
            user_id = %order.user_id,
            total = %order.total_amount,
            items = order.items.len(),
            "Order placed"
        );

        Ok(order)
    }
}
