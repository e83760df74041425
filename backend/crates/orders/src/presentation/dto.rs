//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::page::{DEFAULT_PAGE_SIZE, PageRequest, SortDirection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::entity::order::{Order, OrderItem, OrderLine};

// ============================================================================
// Create Order
// ============================================================================

/// One requested order line
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_name: String,
    pub quantity: i32,
    /// Accepted for API compatibility, never used; the catalog's
    /// canonical price is authoritative.
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Create order request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrderRequest {
    /// Field-level validation; collected errors come back as one 400
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = BTreeMap::new();

        if self.items.is_empty() {
            errors.insert(
                "items".to_string(),
                "Order must contain at least one item".to_string(),
            );
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.product_name.trim().is_empty() {
                errors.insert(
                    format!("items[{index}].productName"),
                    "Product name is required".to_string(),
                );
            }
            if item.quantity <= 0 {
                errors.insert(
                    format!("items[{index}].quantity"),
                    "Quantity must be positive".to_string(),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(errors))
        }
    }

    /// Drop the advisory client prices and keep only what the workflow
    /// acts on.
    pub fn into_lines(self) -> Vec<OrderLine> {
        self.items
            .into_iter()
            .map(|item| OrderLine {
                product_name: item.product_name,
                quantity: item.quantity,
            })
            .collect()
    }
}

// ============================================================================
// Status Update / Listing
// ============================================================================

/// Status update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Query parameters for order listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPageParams {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl OrderPageParams {
    pub fn to_page_request(&self) -> PageRequest {
        let direction = self
            .direction
            .as_deref()
            .map(|d| SortDirection::parse_or(d, SortDirection::Desc))
            .unwrap_or(SortDirection::Desc);

        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort.as_deref().unwrap_or("createdAt"),
            direction,
        )
    }
}

/// Optional explicit owner for order lookups; defaults to the
/// authenticated user when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerParams {
    pub user_id: Option<Uuid>,
}

// ============================================================================
// Responses
// ============================================================================

/// Order line item response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

impl From<&OrderItem> for OrderItemResponse {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.order_item_id.to_string(),
            product_id: item.product_id.to_string(),
            product_name: item.product_name.clone(),
            price: item.price,
            quantity: item.quantity,
            subtotal: item.subtotal(),
        }
    }
}

/// Order response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub total_amount: Decimal,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.order_id.to_string(),
            user_id: order.user_id.to_string(),
            status: order.status.as_str().to_string(),
            total_amount: order.total_amount,
            items: order.items.iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_rejects_empty_order() {
        let req = CreateOrderRequest { items: vec![] };
        let err = req.validate().unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("items"));
    }

    #[test]
    fn test_validate_flags_bad_lines() {
        let req = CreateOrderRequest {
            items: vec![
                OrderItemRequest {
                    product_name: "Mouse".to_string(),
                    quantity: 0,
                    price: None,
                },
                OrderItemRequest {
                    product_name: "".to_string(),
                    quantity: 2,
                    price: Some(dec!(0.01)),
                },
            ],
        };

        let err = req.validate().unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains_key("items[0].quantity"));
        assert!(fields.contains_key("items[1].productName"));
    }

    #[test]
    fn test_money_serializes_as_exact_json_number() {
        let item = OrderItemResponse {
            id: "a".to_string(),
            product_id: "b".to_string(),
            product_name: "Mouse".to_string(),
            price: dec!(19.99),
            quantity: 3,
            subtotal: dec!(59.97),
        };

        // Exact decimal digits, no float round-trip
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"price\":19.99"));
        assert!(json.contains("\"subtotal\":59.97"));
    }

    #[test]
    fn test_into_lines_discards_client_price() {
        let req = CreateOrderRequest {
            items: vec![OrderItemRequest {
                product_name: "Mouse".to_string(),
                quantity: 2,
                price: Some(dec!(0.01)),
            }],
        };

        let lines = req.into_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_name, "Mouse");
        assert_eq!(lines[0].quantity, 2);
    }
}
