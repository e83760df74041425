//! List Orders Use Case

use std::sync::Arc;

use kernel::id::UserId;
use kernel::page::{Page, PageRequest};

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::OrderResult;

/// List orders use case
pub struct ListOrdersUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
}

impl<R> ListOrdersUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        status: Option<OrderStatus>,
        request: &PageRequest,
    ) -> OrderResult<Page<Order>> {
        let (orders, total) = self
            .order_repo
            .find_page_by_user(user_id, status, request)
            .await?;

        Ok(Page::new(orders, total, request))
    }
}
