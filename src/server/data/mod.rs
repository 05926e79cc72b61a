//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models to keep the
//! data layer separate from business logic. Every repository is generic over
//! `ConnectionTrait`, so the same code runs against the connection pool or inside a
//! `DatabaseTransaction` opened by the purchase coordinator.
//!
//! `LedgerRepository` is the only code path that writes `account.balance`.

pub mod account;
pub mod commission;
pub mod ledger;
pub mod post;
pub mod purchase;
