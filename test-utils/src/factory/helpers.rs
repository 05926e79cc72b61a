//! Shared helper utilities for factory methods.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, IntoActiveModel};

use crate::factory::account::AccountFactory;

/// Counter for generating unique names and codes in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a buyer referred by a chain of `depth` accounts.
///
/// The chain is built root-first so every referrer exists before the account pointing
/// at it, then returned nearest-first (index 0 is the buyer's immediate referrer).
/// Referrers start with a zero balance so credited commissions can be read directly.
///
/// # Arguments
/// - `db` - Database connection
/// - `balance` - Starting balance of the buyer
/// - `depth` - Number of referrers above the buyer
///
/// # Returns
/// - `Ok((buyer, chain))` - The buyer and its referrers, nearest first
/// - `Err(DbErr)` - Database error during creation
pub async fn create_buyer_with_referral_chain(
    db: &DatabaseConnection,
    balance: i64,
    depth: usize,
) -> Result<(entity::account::Model, Vec<entity::account::Model>), DbErr> {
    let mut chain: Vec<entity::account::Model> = Vec::with_capacity(depth);
    let mut parent: Option<i32> = None;

    for _ in 0..depth {
        let account = AccountFactory::new(db).referred_by(parent).build().await?;
        parent = Some(account.id);
        chain.push(account);
    }

    let buyer = AccountFactory::new(db)
        .balance(balance)
        .referred_by(parent)
        .build()
        .await?;

    chain.reverse();

    Ok((buyer, chain))
}

/// Points `account` at `referrer`, overwriting any existing link.
///
/// Used to build graphs the service itself refuses to create, such as cycles.
pub async fn set_referrer(
    db: &DatabaseConnection,
    account: entity::account::Model,
    referrer: Option<i32>,
) -> Result<entity::account::Model, DbErr> {
    let mut active = account.into_active_model();
    active.referred_by = ActiveValue::Set(referrer);
    active.update(db).await
}
