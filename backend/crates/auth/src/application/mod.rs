//! Application Layer
//!
//! Use cases and application services.

pub mod current_user;
pub mod login;
pub mod logout;
pub mod register;

// Re-exports
pub use current_user::CurrentUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterUseCase};
