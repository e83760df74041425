//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::order::{Order, OrderItem, OrderLine, Reservation};
pub use repository::{OrderRepository, UserDirectory};
pub use value_object::order_status::OrderStatus;
