//! PostgreSQL Repository Implementations

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::ProductId;
use kernel::page::PageRequest;

use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;

/// Map a client-requested sort field to a products column.
/// Unknown fields fall back to name rather than erroring.
fn sort_column(requested: &str) -> &'static str {
    match requested {
        "name" => "name",
        "price" => "price",
        "category" => "category",
        "stock" => "stock",
        _ => "name",
    }
}

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for PgCatalogRepository {
    async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product_id, name, description, price, stock, category
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn find_page(
        &self,
        category: Option<&str>,
        request: &PageRequest,
    ) -> CatalogResult<(Vec<Product>, u64)> {
        // Sort column and direction are whitelisted, never client text
        let order_by = format!(
            "{} {}",
            sort_column(request.sort()),
            request.direction().as_sql()
        );

        let (rows, total) = match category {
            Some(category) => {
                let rows = sqlx::query_as::<_, ProductRow>(&format!(
                    r#"
                    SELECT product_id, name, description, price, stock, category
                    FROM products
                    WHERE stock > 0 AND category = $1
                    ORDER BY {order_by}
                    LIMIT $2 OFFSET $3
                    "#,
                ))
                .bind(category)
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM products WHERE stock > 0 AND category = $1",
                )
                .bind(category)
                .fetch_one(&self.pool)
                .await?;

                (rows, total)
            }
            None => {
                let rows = sqlx::query_as::<_, ProductRow>(&format!(
                    r#"
                    SELECT product_id, name, description, price, stock, category
                    FROM products
                    WHERE stock > 0
                    ORDER BY {order_by}
                    LIMIT $1 OFFSET $2
                    "#,
                ))
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&self.pool)
                .await?;

                let total =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE stock > 0")
                        .fetch_one(&self.pool)
                        .await?;

                (rows, total)
            }
        };

        let products = rows.into_iter().map(ProductRow::into_product).collect();
        Ok((products, total.max(0) as u64))
    }
}

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
