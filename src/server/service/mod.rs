//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller (API) layer and the data (repository) layer:
//!
//! - **`purchase`**: validation and the atomic purchase transaction, with bounded retry
//! - **`referral`**: walking the referral chain, referral codes and referrer links
//! - **`commission`**: the per-level commission schedule and its payout

pub mod commission;
pub mod purchase;
pub mod referral;
