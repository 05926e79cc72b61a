//! Account data repository for database operations.
//!
//! Reads accounts and maintains their referral metadata (code and referrer link).
//! Balances are never written here; see `LedgerRepository`.

use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::account::Account;

/// Repository providing database operations for accounts.
pub struct AccountRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountRepository<'a, C> {
    /// Creates a new AccountRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds an account by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Account))` - Account found
    /// - `Ok(None)` - No account with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Account>, DbErr> {
        let entity = entity::prelude::Account::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Account::from_entity))
    }

    /// Finds the account owning a referral code.
    pub async fn find_by_referral_code(&self, code: &str) -> Result<Option<Account>, DbErr> {
        let entity = entity::prelude::Account::find()
            .filter(entity::account::Column::ReferralCode.eq(code))
            .one(self.db)
            .await?;

        Ok(entity.map(Account::from_entity))
    }

    /// Gets the accounts directly referred by `account_id`, oldest first.
    pub async fn get_referred_by(&self, account_id: i32) -> Result<Vec<Account>, DbErr> {
        let entities = entity::prelude::Account::find()
            .filter(entity::account::Column::ReferredBy.eq(account_id))
            .order_by_asc(entity::account::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Account::from_entity).collect())
    }

    /// Sets the referral code of an account that has none yet.
    ///
    /// # Returns
    /// - `Ok(true)` - Code stored
    /// - `Ok(false)` - Account missing or already has a code; nothing changed
    /// - `Err(DbErr)` - Database error, including a unique violation if another
    ///   account already owns `code`
    pub async fn set_referral_code(&self, account_id: i32, code: String) -> Result<bool, DbErr> {
        let result = entity::prelude::Account::update_many()
            .col_expr(entity::account::Column::ReferralCode, Expr::value(code))
            .filter(entity::account::Column::Id.eq(account_id))
            .filter(entity::account::Column::ReferralCode.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Links an account to its referrer if it has no referrer yet.
    ///
    /// # Returns
    /// - `Ok(true)` - Link stored
    /// - `Ok(false)` - Account missing or already linked; nothing changed
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_referred_by(&self, account_id: i32, referrer_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Account::update_many()
            .col_expr(entity::account::Column::ReferredBy, Expr::value(referrer_id))
            .filter(entity::account::Column::Id.eq(account_id))
            .filter(entity::account::Column::ReferredBy.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
