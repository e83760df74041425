//! Application Layer
//!
//! Use cases and the pending-order sweeper.

pub mod cancel_order;
pub mod create_order;
pub mod get_order;
pub mod list_orders;
pub mod sweeper;
pub mod update_status;

// Re-exports
pub use cancel_order::CancelOrderUseCase;
pub use create_order::{CreateOrderInput, CreateOrderUseCase};
pub use get_order::GetOrderUseCase;
pub use list_orders::ListOrdersUseCase;
pub use sweeper::{SWEEP_INTERVAL, Sweeper};
pub use update_status::UpdateStatusUseCase;
