//! SeaORM entity definitions for the paywall schema.

pub mod prelude;

pub mod account;
pub mod commission;
pub mod post;
pub mod purchase;
