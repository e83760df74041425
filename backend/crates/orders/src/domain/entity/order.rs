//! Order and OrderItem Entities
//!
//! Orders own their items by value; items carry a plain foreign-key id
//! back to their order, never a live reference. Items are immutable once
//! the order is placed, and the total is computed exactly once at
//! placement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use catalog::domain::entity::product::Product;
use kernel::id::{OrderId, OrderItemId, ProductId, UserId};

use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{OrderError, OrderResult};

/// One requested order line, as submitted by the client.
/// Client-supplied prices are discarded before this point.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_name: String,
    pub quantity: i32,
}

/// Stock taken for one line, not yet tied to an order. `Order::place`
/// turns reservations into line items under the new order's id.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub product_id: ProductId,
    /// Product name at order time
    pub product_name: String,
    /// Canonical unit price at order time
    pub price: Decimal,
    pub quantity: i32,
}

impl Reservation {
    /// Reserve stock for one line: check availability, deduct, and
    /// snapshot the product's canonical name and price.
    ///
    /// The caller supplies the transactional boundary; on failure it must
    /// discard every mutation made by earlier lines of the same order.
    pub fn reserve(product: &mut Product, quantity: i32) -> OrderResult<Self> {
        if !product.can_fulfill(quantity) {
            return Err(OrderError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        product.deduct(quantity);

        Ok(Self {
            product_id: product.product_id,
            product_name: product.name.clone(),
            price: product.price,
            quantity,
        })
    }

    /// Line subtotal (price x quantity)
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order line item with its price snapshot
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub order_item_id: OrderItemId,
    /// Owning order
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Product name at order time
    pub product_name: String,
    /// Canonical unit price at order time
    pub price: Decimal,
    pub quantity: i32,
}

impl OrderItem {
    /// Line subtotal (price x quantity)
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order entity
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: OrderId,
    /// Owning user, immutable after creation
    pub user_id: UserId,
    pub status: OrderStatus,
    /// Sum of item subtotals, fixed at placement
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Assemble a PENDING order from reservations, creating each line
    /// item under the new order id and summing the total.
    pub fn place(user_id: UserId, reservations: Vec<Reservation>) -> Self {
        let order_id = OrderId::new();
        let items: Vec<OrderItem> = reservations
            .into_iter()
            .map(|r| OrderItem {
                order_item_id: OrderItemId::new(),
                order_id,
                product_id: r.product_id,
                product_name: r.product_name,
                price: r.price,
                quantity: r.quantity,
            })
            .collect();

        let total_amount = items.iter().map(OrderItem::subtotal).sum();
        let now = Utc::now();

        Self {
            order_id,
            user_id,
            status: OrderStatus::Pending,
            total_amount,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the given user owns this order
    pub fn owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }

    /// Overwrite the status. The explicit update operation performs no
    /// transition validation; cancellation goes through `cancel`.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Cancel the order; only valid while still PENDING.
    pub fn cancel(&mut self) -> OrderResult<()> {
        if !self.status.can_cancel() {
            return Err(OrderError::InvalidOrderStatus(format!(
                "Order cannot be cancelled in status {}",
                self.status
            )));
        }
        self.set_status(OrderStatus::Cancelled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mouse(stock: i32) -> Product {
        Product::new("Mouse", "Wireless", dec!(50.0), stock, "electronics")
    }

    #[test]
    fn test_reserve_snapshots_canonical_price() {
        let mut product = mouse(5);
        let reservation = Reservation::reserve(&mut product, 2).unwrap();

        assert_eq!(reservation.price, dec!(50.0));
        assert_eq!(reservation.product_name, "Mouse");
        assert_eq!(reservation.subtotal(), dec!(100.0));
        assert_eq!(product.stock, 3);
    }

    #[test]
    fn test_reserve_rejects_shortage_without_mutation() {
        let mut product = mouse(5);
        let err = Reservation::reserve(&mut product, 50).unwrap_err();

        match err {
            OrderError::InsufficientStock {
                product: name,
                available,
                requested,
            } => {
                assert_eq!(name, "Mouse");
                assert_eq!(available, 5);
                assert_eq!(requested, 50);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn test_place_sums_subtotals_and_links_items() {
        let mut mouse = mouse(5);
        let mut desk = Product::new("Desk", "Standing", dec!(450.0), 2, "furniture");

        let reservations = vec![
            Reservation::reserve(&mut mouse, 2).unwrap(),
            Reservation::reserve(&mut desk, 1).unwrap(),
        ];
        let order = Order::place(UserId::new(), reservations);

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, dec!(550.0));
        // Every item is born under the real order id
        assert!(order.items.iter().all(|i| i.order_id == order.order_id));
    }

    #[test]
    fn test_cancel_only_from_pending() {
        let mut order = Order::place(UserId::new(), vec![]);
        assert!(order.cancel().is_ok());
        assert_eq!(order.status, OrderStatus::Cancelled);

        // Already cancelled: a second cancel is rejected
        assert!(matches!(
            order.cancel(),
            Err(OrderError::InvalidOrderStatus(_))
        ));

        let mut shipped = Order::place(UserId::new(), vec![]);
        shipped.set_status(OrderStatus::Shipped);
        assert!(shipped.cancel().is_err());
    }
}
