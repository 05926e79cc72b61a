//! Request and response DTOs shared by the HTTP surface.

pub mod account;
pub mod api;
pub mod commission;
pub mod purchase;
