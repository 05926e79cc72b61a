//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factories insert
//! rows directly through SeaORM active models, bypassing the ledger, so tests can seed
//! arbitrary balances and referral graphs (including cycles).
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let buyer = factory::account::AccountFactory::new(&db).balance(100).build().await?;
//! let post = factory::post::create_premium_post(&db, 40).await?;
//!
//! // Buyer referred by a three-level chain, nearest referrer first
//! let (buyer, chain) = factory::helpers::create_buyer_with_referral_chain(&db, 100, 3).await?;
//! ```

pub mod account;
pub mod helpers;
pub mod post;
pub mod purchase;

pub use account::create_account;
pub use post::{create_free_post, create_premium_post};
pub use purchase::create_purchase;
