//! Entity Module

pub mod order;

pub use order::{Order, OrderItem, OrderLine};
