//! Orders (Order Workflow) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Order entities, status state machine, repository traits
//! - `application/` - Use cases and the pending-order sweeper
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Workflow
//! - Checkout reserves stock for every line inside one transaction;
//!   any shortage rolls the whole order back.
//! - Line prices are snapshotted from the catalog's canonical price,
//!   never taken from the client.
//! - Cancellation is only allowed while an order is still PENDING.
//! - A background sweeper advances stale PENDING orders to PROCESSING.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::sweeper::Sweeper;
pub use domain::entity::order::{Order, OrderItem, Reservation};
pub use domain::value_object::order_status::OrderStatus;
pub use error::{OrderError, OrderResult};
pub use infra::postgres::PgOrderRepository;
pub use presentation::router::{orders_router, orders_router_generic};

#[cfg(test)]
mod tests;
