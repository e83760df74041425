//! Order Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Order-specific result type alias
pub type OrderResult<T> = Result<T, OrderError>;

/// Order-specific error variants
#[derive(Debug, Error)]
pub enum OrderError {
    /// Ordering user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Order not found. Also covers ownership mismatches so that
    /// non-owners cannot probe which order IDs exist.
    #[error("Order not found")]
    OrderNotFound,

    /// Order line referenced an unknown product
    #[error("Product not found: {name}")]
    ProductNotFound { name: String },

    /// Requested quantity exceeds available stock
    #[error("Insufficient stock for product {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i32,
        requested: i32,
    },

    /// Operation not valid for the order's current status
    #[error("{0}")]
    InvalidOrderStatus(String),

    /// Input validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::UserNotFound
            | OrderError::OrderNotFound
            | OrderError::ProductNotFound { .. } => ErrorKind::NotFound,
            OrderError::InsufficientStock { .. } => ErrorKind::Conflict,
            OrderError::InvalidOrderStatus(_) | OrderError::Validation(_) => ErrorKind::BadRequest,
            OrderError::Database(_) | OrderError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            OrderError::Database(e) => {
                tracing::error!(error = %e, "Order database error");
            }
            OrderError::Internal(msg) => {
                tracing::error!(message = %msg, "Order internal error");
            }
            OrderError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                tracing::info!(product = %product, available, requested, "Order rejected for stock");
            }
            _ => {
                tracing::debug!(error = %self, "Order error");
            }
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        err.log();
        err.to_app_error()
    }
}
