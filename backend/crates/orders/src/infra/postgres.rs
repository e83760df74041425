//! PostgreSQL Repository Implementations
//!
//! `place_order` is the one write path that needs real concurrency
//! control: each product row is locked with `SELECT ... FOR UPDATE`
//! inside a single transaction, so concurrent checkouts for the same
//! product serialize and stock can never go negative. Any line failure
//! drops the transaction and rolls back every earlier decrement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use catalog::domain::entity::product::Product;
use kernel::id::{OrderId, OrderItemId, ProductId, UserId};
use kernel::page::PageRequest;

use crate::domain::entity::order::{Order, OrderItem, OrderLine, Reservation};
use crate::domain::repository::{OrderRepository, UserDirectory};
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{OrderError, OrderResult};

/// Map a client-requested sort field to an orders column.
/// Unknown fields fall back to creation time.
fn sort_column(requested: &str) -> &'static str {
    match requested {
        "createdAt" => "created_at",
        "totalAmount" => "total_amount",
        "status" => "status",
        _ => "created_at",
    }
}

/// PostgreSQL-backed order repository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn items_for_orders(&self, order_ids: &[Uuid]) -> OrderResult<Vec<OrderItem>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT order_item_id, order_id, product_id, product_name, price, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_item_id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderItemRow::into_item).collect())
    }
}

impl OrderRepository for PgOrderRepository {
    async fn place_order(&self, user_id: UserId, lines: &[OrderLine]) -> OrderResult<Order> {
        let mut tx = self.pool.begin().await?;

        let mut reservations = Vec::with_capacity(lines.len());
        for line in lines {
            // Row lock serializes concurrent decrements per product
            let row = sqlx::query_as::<_, ProductRow>(
                r#"
                SELECT product_id, name, description, price, stock, category
                FROM products
                WHERE LOWER(name) = LOWER($1)
                FOR UPDATE
                "#,
            )
            .bind(&line.product_name)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(row) = row else {
                return Err(OrderError::ProductNotFound {
                    name: line.product_name.clone(),
                });
            };

            let mut product = row.into_product();
            // Returning the error drops the transaction: every earlier
            // decrement in this order rolls back.
            let reservation = Reservation::reserve(&mut product, line.quantity)?;

            sqlx::query("UPDATE products SET stock = $2 WHERE product_id = $1")
                .bind(product.product_id.as_uuid())
                .bind(product.stock)
                .execute(&mut *tx)
                .await?;

            reservations.push(reservation);
        }

        let order = Order::place(user_id, reservations);

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, user_id, status, total_amount, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.status.as_str())
        .bind(order.total_amount)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    order_item_id, order_id, product_id, product_name, price, quantity
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.order_item_id.as_uuid())
            .bind(item.order_id.as_uuid())
            .bind(item.product_id.as_uuid())
            .bind(&item.product_name)
            .bind(item.price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT order_id, user_id, status, total_amount, created_at, updated_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.items_for_orders(&[row.order_id]).await?;
        row.into_order(items).map(Some)
    }

    async fn find_page_by_user(
        &self,
        user_id: &UserId,
        status: Option<OrderStatus>,
        request: &PageRequest,
    ) -> OrderResult<(Vec<Order>, u64)> {
        // Sort column and direction are whitelisted, never client text
        let order_by = format!(
            "{} {}",
            sort_column(request.sort()),
            request.direction().as_sql()
        );

        let status_str = status.map(|s| s.as_str());

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT order_id, user_id, status, total_amount, created_at, updated_at
            FROM orders
            WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY {order_by}
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(user_id.as_uuid())
        .bind(status_str)
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)",
        )
        .bind(user_id.as_uuid())
        .bind(status_str)
        .fetch_one(&self.pool)
        .await?;

        let order_ids: Vec<Uuid> = rows.iter().map(|r| r.order_id).collect();
        let mut all_items = self.items_for_orders(&order_ids).await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let (own, rest) = all_items
                .into_iter()
                .partition(|item| item.order_id.as_uuid() == &row.order_id);
            all_items = rest;
            orders.push(row.into_order(own)?);
        }

        Ok((orders, total.max(0) as u64))
    }

    async fn update_status(&self, order: &Order) -> OrderResult<()> {
        sqlx::query("UPDATE orders SET status = $2, updated_at = $3 WHERE order_id = $1")
            .bind(order.order_id.as_uuid())
            .bind(order.status.as_str())
            .bind(order.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn promote_pending(&self) -> OrderResult<u64> {
        let updated = sqlx::query(
            "UPDATE orders SET status = $1, updated_at = $2 WHERE status = $3",
        )
        .bind(OrderStatus::Processing.as_str())
        .bind(Utc::now())
        .bind(OrderStatus::Pending.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }
}

impl UserDirectory for PgOrderRepository {
    async fn user_exists(&self, user_id: &UserId) -> OrderResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    stock: i32,
    category: String,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            product_id: ProductId::from_uuid(self.product_id),
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    user_id: Uuid,
    status: String,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> OrderResult<Order> {
        let status = OrderStatus::parse(&self.status)
            .ok_or_else(|| OrderError::Internal(format!("Invalid order status: {}", self.status)))?;

        Ok(Order {
            order_id: OrderId::from_uuid(self.order_id),
            user_id: UserId::from_uuid(self.user_id),
            status,
            total_amount: self.total_amount,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_item_id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    product_name: String,
    price: Decimal,
    quantity: i32,
}

impl OrderItemRow {
    fn into_item(self) -> OrderItem {
        OrderItem {
            order_item_id: OrderItemId::from_uuid(self.order_item_id),
            order_id: OrderId::from_uuid(self.order_id),
            product_id: ProductId::from_uuid(self.product_id),
            product_name: self.product_name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(sort_column("createdAt"), "created_at");
        assert_eq!(sort_column("totalAmount"), "total_amount");
        assert_eq!(sort_column("status"), "status");
        assert_eq!(sort_column("status; DROP TABLE orders"), "created_at");
        assert_eq!(sort_column(""), "created_at");
    }
}
