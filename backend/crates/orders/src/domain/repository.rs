//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{OrderId, UserId};
use kernel::page::PageRequest;

use crate::domain::entity::order::{Order, OrderLine};
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::OrderResult;

/// Order repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Atomically reserve stock for every line and persist the new order.
    ///
    /// All-or-nothing: if any line cannot be fulfilled, no product stock
    /// is mutated and no rows are written.
    async fn place_order(&self, user_id: UserId, lines: &[OrderLine]) -> OrderResult<Order>;

    /// Find order (with items) by ID
    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>>;

    /// One page of a user's orders, optionally filtered by exact status.
    /// Returns the page rows and the total matching row count.
    async fn find_page_by_user(
        &self,
        user_id: &UserId,
        status: Option<OrderStatus>,
        request: &PageRequest,
    ) -> OrderResult<(Vec<Order>, u64)>;

    /// Persist an order's status and updated timestamp
    async fn update_status(&self, order: &Order) -> OrderResult<()>;

    /// Bulk-advance every PENDING order to PROCESSING; returns the count
    async fn promote_pending(&self) -> OrderResult<u64>;
}

/// Lookup into the user store, just enough to validate order ownership
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Whether a user exists
    async fn user_exists(&self, user_id: &UserId) -> OrderResult<bool>;
}
