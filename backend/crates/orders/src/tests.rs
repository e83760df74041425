//! Unit tests for the orders crate
//!
//! The in-memory repository mirrors the Postgres transaction semantics:
//! stock reservation happens on a scratch copy of the products and is
//! only committed when every line succeeds.

use std::sync::{Arc, Mutex};

use rust_decimal_macros::dec;

use catalog::domain::entity::product::Product;
use kernel::id::{OrderId, UserId};
use kernel::page::{PageRequest, SortDirection};

use crate::application::{
    CancelOrderUseCase, CreateOrderInput, CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
    Sweeper, UpdateStatusUseCase,
};
use crate::domain::entity::order::{Order, OrderLine, Reservation};
use crate::domain::repository::{OrderRepository, UserDirectory};
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{OrderError, OrderResult};

/// In-memory order store with all-or-nothing reservation
#[derive(Default, Clone)]
struct MemOrderRepo {
    products: Arc<Mutex<Vec<Product>>>,
    orders: Arc<Mutex<Vec<Order>>>,
    users: Arc<Mutex<Vec<UserId>>>,
}

impl MemOrderRepo {
    fn seed(products: Vec<Product>) -> (Self, UserId) {
        let user_id = UserId::new();
        let repo = Self {
            products: Arc::new(Mutex::new(products)),
            orders: Arc::new(Mutex::new(Vec::new())),
            users: Arc::new(Mutex::new(vec![user_id])),
        };
        (repo, user_id)
    }

    fn stock_of(&self, name: &str) -> i32 {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.stock)
            .expect("product seeded")
    }
}

impl OrderRepository for MemOrderRepo {
    async fn place_order(&self, user_id: UserId, lines: &[OrderLine]) -> OrderResult<Order> {
        let mut products = self.products.lock().unwrap();

        // Reserve against a scratch copy; commit only if all lines pass
        let mut scratch = products.clone();
        let mut reservations = Vec::with_capacity(lines.len());
        for line in lines {
            let product = scratch
                .iter_mut()
                .find(|p| p.name.eq_ignore_ascii_case(&line.product_name))
                .ok_or_else(|| OrderError::ProductNotFound {
                    name: line.product_name.clone(),
                })?;
            reservations.push(Reservation::reserve(product, line.quantity)?);
        }

        *products = scratch;
        let order = Order::place(user_id, reservations);
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order_id == *order_id)
            .cloned())
    }

    async fn find_page_by_user(
        &self,
        user_id: &UserId,
        status: Option<OrderStatus>,
        request: &PageRequest,
    ) -> OrderResult<(Vec<Order>, u64)> {
        let mut matching: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == *user_id)
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let rows = matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();

        Ok((rows, total))
    }

    async fn update_status(&self, order: &Order) -> OrderResult<()> {
        let mut orders = self.orders.lock().unwrap();
        if let Some(stored) = orders.iter_mut().find(|o| o.order_id == order.order_id) {
            stored.status = order.status;
            stored.updated_at = order.updated_at;
        }
        Ok(())
    }

    async fn promote_pending(&self) -> OrderResult<u64> {
        let mut orders = self.orders.lock().unwrap();
        let mut promoted = 0;
        for order in orders.iter_mut() {
            if order.status == OrderStatus::Pending {
                order.set_status(OrderStatus::Processing);
                promoted += 1;
            }
        }
        Ok(promoted)
    }
}

impl UserDirectory for MemOrderRepo {
    async fn user_exists(&self, user_id: &UserId) -> OrderResult<bool> {
        Ok(self.users.lock().unwrap().contains(user_id))
    }
}

fn seed_shop() -> (MemOrderRepo, UserId) {
    MemOrderRepo::seed(vec![
        Product::new("Mouse", "Wireless", dec!(50.0), 5, "electronics"),
        Product::new("Keyboard", "Mechanical", dec!(120.0), 10, "electronics"),
    ])
}

fn line(name: &str, quantity: i32) -> OrderLine {
    OrderLine {
        product_name: name.to_string(),
        quantity,
    }
}

async fn place(repo: &MemOrderRepo, user_id: UserId, lines: Vec<OrderLine>) -> OrderResult<Order> {
    let use_case = CreateOrderUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
    use_case.execute(CreateOrderInput { user_id, lines }).await
}

mod create_order_tests {
    use super::*;

    #[tokio::test]
    async fn order_total_is_sum_of_canonical_subtotals() {
        let (repo, user_id) = seed_shop();

        let order = place(&repo, user_id, vec![line("Mouse", 2)]).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, dec!(100.0));
        assert_eq!(order.items[0].price, dec!(50.0));
        assert_eq!(repo.stock_of("Mouse"), 3);
    }

    #[tokio::test]
    async fn product_lookup_is_case_insensitive() {
        let (repo, user_id) = seed_shop();

        let order = place(&repo, user_id, vec![line("mOuSe", 1)]).await.unwrap();

        assert_eq!(order.items[0].product_name, "Mouse");
        assert_eq!(repo.stock_of("Mouse"), 4);
    }

    #[tokio::test]
    async fn shortage_rejects_whole_order_without_stock_mutation() {
        let (repo, user_id) = seed_shop();

        // First line would succeed; second exceeds stock
        let err = place(
            &repo,
            user_id,
            vec![line("Mouse", 2), line("Keyboard", 50)],
        )
        .await
        .unwrap_err();

        match err {
            OrderError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                assert_eq!(product, "Keyboard");
                assert_eq!(available, 10);
                assert_eq!(requested, 50);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // All-or-nothing: neither product was touched
        assert_eq!(repo.stock_of("Mouse"), 5);
        assert_eq!(repo.stock_of("Keyboard"), 10);
        assert!(repo.orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() {
        let (repo, user_id) = seed_shop();

        let err = place(&repo, user_id, vec![line("Webcam", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ProductNotFound { name } if name == "Webcam"));
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let (repo, _) = seed_shop();

        let err = place(&repo, UserId::new(), vec![line("Mouse", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::UserNotFound));
    }

    #[tokio::test]
    async fn empty_order_is_rejected() {
        let (repo, user_id) = seed_shop();

        let err = place(&repo, user_id, vec![]).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }
}

mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn owner_can_fetch_order() {
        let (repo, user_id) = seed_shop();
        let order = place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();

        let use_case = GetOrderUseCase::new(Arc::new(repo));
        let fetched = use_case.execute(&user_id, &order.order_id).await.unwrap();
        assert_eq!(fetched.order_id, order.order_id);
    }

    #[tokio::test]
    async fn foreign_order_reads_as_not_found() {
        let (repo, user_id) = seed_shop();
        let order = place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();

        let use_case = GetOrderUseCase::new(Arc::new(repo));

        // Mismatched owner and nonexistent order fail identically
        let foreign = use_case
            .execute(&UserId::new(), &order.order_id)
            .await
            .unwrap_err();
        let missing = use_case
            .execute(&user_id, &OrderId::new())
            .await
            .unwrap_err();
        assert!(matches!(foreign, OrderError::OrderNotFound));
        assert!(matches!(missing, OrderError::OrderNotFound));
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let (repo, user_id) = seed_shop();
        let first = place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();
        place(&repo, user_id, vec![line("Keyboard", 1)])
            .await
            .unwrap();

        let update = UpdateStatusUseCase::new(Arc::new(repo.clone()));
        update
            .execute(&user_id, &first.order_id, OrderStatus::Shipped)
            .await
            .unwrap();

        let list = ListOrdersUseCase::new(Arc::new(repo));
        let request = PageRequest::new(0, 20, "createdAt", SortDirection::Desc);

        let pending = list
            .execute(&user_id, Some(OrderStatus::Pending), &request)
            .await
            .unwrap();
        assert_eq!(pending.total_elements, 1);

        let all = list.execute(&user_id, None, &request).await.unwrap();
        assert_eq!(all.total_elements, 2);
        assert!(all.first && all.last);
    }
}

mod status_tests {
    use super::*;

    #[tokio::test]
    async fn update_status_overwrites_unconditionally() {
        let (repo, user_id) = seed_shop();
        let order = place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();

        let use_case = UpdateStatusUseCase::new(Arc::new(repo.clone()));

        // Forward, backward, and repeated updates all apply as-is
        let updated = use_case
            .execute(&user_id, &order.order_id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Delivered);

        let again = use_case
            .execute(&user_id, &order.order_id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(again.status, OrderStatus::Delivered);

        let back = use_case
            .execute(&user_id, &order.order_id, OrderStatus::Pending)
            .await
            .unwrap();
        assert_eq!(back.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn cancel_requires_pending() {
        let (repo, user_id) = seed_shop();
        let order = place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();

        let cancel = CancelOrderUseCase::new(Arc::new(repo.clone()));
        cancel.execute(&user_id, &order.order_id).await.unwrap();

        let stored = repo.orders.lock().unwrap()[0].clone();
        assert_eq!(stored.status, OrderStatus::Cancelled);

        // Terminal: cancelling again is invalid
        let err = cancel.execute(&user_id, &order.order_id).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidOrderStatus(_)));
    }

    #[tokio::test]
    async fn cancel_after_processing_is_rejected() {
        let (repo, user_id) = seed_shop();
        let order = place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();

        let update = UpdateStatusUseCase::new(Arc::new(repo.clone()));
        update
            .execute(&user_id, &order.order_id, OrderStatus::Processing)
            .await
            .unwrap();

        let cancel = CancelOrderUseCase::new(Arc::new(repo.clone()));
        let err = cancel.execute(&user_id, &order.order_id).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidOrderStatus(_)));
    }

    #[tokio::test]
    async fn cancel_with_foreign_user_reads_as_not_found() {
        let (repo, user_id) = seed_shop();
        let order = place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();

        let cancel = CancelOrderUseCase::new(Arc::new(repo.clone()));
        let err = cancel
            .execute(&UserId::new(), &order.order_id)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::OrderNotFound));
    }
}

mod sweeper_tests {
    use super::*;

    #[tokio::test]
    async fn sweep_promotes_all_pending_orders() {
        let (repo, user_id) = seed_shop();
        place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();
        place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();
        place(&repo, user_id, vec![line("Keyboard", 1)])
            .await
            .unwrap();

        let sweeper = Sweeper::new(Arc::new(repo.clone()));
        assert_eq!(sweeper.sweep_once().await.unwrap(), 3);

        assert!(
            repo.orders
                .lock()
                .unwrap()
                .iter()
                .all(|o| o.status == OrderStatus::Processing)
        );

        // Nothing left to promote: the next run is a no-op
        assert_eq!(sweeper.sweep_once().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn sweep_skips_terminal_orders() {
        let (repo, user_id) = seed_shop();
        let order = place(&repo, user_id, vec![line("Mouse", 1)]).await.unwrap();

        let cancel = CancelOrderUseCase::new(Arc::new(repo.clone()));
        cancel.execute(&user_id, &order.order_id).await.unwrap();

        let sweeper = Sweeper::new(Arc::new(repo.clone()));
        assert_eq!(sweeper.sweep_once().await.unwrap(), 0);
        assert_eq!(
            repo.orders.lock().unwrap()[0].status,
            OrderStatus::Cancelled
        );
    }
}
