//! HTTP request handlers.
//!
//! Handlers resolve the acting account through `AuthGuard`, call a service, and convert
//! domain models to DTOs. Every handler returns `Result<impl IntoResponse, AppError>`.

pub mod account;
pub mod purchase;
