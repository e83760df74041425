//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::product::Product;
pub use repository::ProductRepository;
