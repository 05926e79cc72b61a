//! Monetization core of a paid-content platform.
//!
//! Accounts hold an integer balance. Buying a premium post debits the buyer, records the
//! purchase and credits up to three levels of referrers a share of the price, all in a
//! single database transaction.

pub mod model;
pub mod server;
