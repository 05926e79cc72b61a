//! Account ledger: the single writer of account balances.
//!
//! Debits and credits are single conditional `UPDATE` statements, so they are atomic on
//! their own and compose into any enclosing transaction. A debit only applies while
//! `balance >= amount` holds at write time, which keeps balances non-negative even when
//! the caller's earlier read is stale.

use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect,
};

use crate::server::error::ledger::LedgerError;

/// Repository owning every balance mutation.
pub struct LedgerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LedgerRepository<'a, C> {
    /// Creates a new LedgerRepository over a connection or open transaction.
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Reads the current balance of an account.
    ///
    /// # Returns
    /// - `Ok(i64)` - Current balance
    /// - `Err(LedgerError::AccountNotFound)` - No such account
    /// - `Err(LedgerError::DbErr)` - Database error during query
    pub async fn balance(&self, account_id: i32) -> Result<i64, LedgerError> {
        let account = entity::prelude::Account::find_by_id(account_id)
            .one(self.db)
            .await?;

        account
            .map(|a| a.balance)
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    /// Acquires exclusive row locks on the given accounts, in the order given.
    ///
    /// Callers must pass IDs in a globally consistent order (buyer first, then
    /// ancestors ascending by ID) so two purchases sharing ancestors cannot deadlock.
    /// Locks are held until the enclosing transaction ends. On backends without row
    /// locks (SQLite) the statement degrades to a plain read and writers are
    /// serialized by the database instead.
    ///
    /// # Returns
    /// - `Ok(())` - Every account exists and is locked
    /// - `Err(LedgerError::AccountNotFound)` - One of the accounts does not exist
    /// - `Err(LedgerError::DbErr)` - Lock wait failed or other database error
    pub async fn lock_accounts(&self, account_ids: &[i32]) -> Result<(), LedgerError> {
        for &account_id in account_ids {
            let locked = entity::prelude::Account::find_by_id(account_id)
                .lock_exclusive()
                .one(self.db)
                .await?;

            if locked.is_none() {
                return Err(LedgerError::AccountNotFound(account_id));
            }
        }

        Ok(())
    }

    /// Debits `amount` from an account.
    ///
    /// # Returns
    /// - `Ok(i64)` - The new balance
    /// - `Err(LedgerError::InsufficientFunds)` - Balance is lower than `amount`; nothing changed
    /// - `Err(LedgerError::AccountNotFound)` - No such account
    /// - `Err(LedgerError::InvalidAmount)` - `amount` is negative
    pub async fn debit(&self, account_id: i32, amount: i64) -> Result<i64, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let result = entity::prelude::Account::update_many()
            .col_expr(
                entity::account::Column::Balance,
                Expr::col(entity::account::Column::Balance).sub(amount),
            )
            .filter(entity::account::Column::Id.eq(account_id))
            .filter(entity::account::Column::Balance.gte(amount))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            // Missing row surfaces as AccountNotFound, otherwise the guard rejected it
            self.balance(account_id).await?;
            return Err(LedgerError::InsufficientFunds { account_id, amount });
        }

        self.balance(account_id).await
    }

    /// Credits `amount` to an account.
    ///
    /// # Returns
    /// - `Ok(i64)` - The new balance
    /// - `Err(LedgerError::AccountNotFound)` - No such account
    /// - `Err(LedgerError::InvalidAmount)` - `amount` is negative
    pub async fn credit(&self, account_id: i32, amount: i64) -> Result<i64, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let result = entity::prelude::Account::update_many()
            .col_expr(
                entity::account::Column::Balance,
                Expr::col(entity::account::Column::Balance).add(amount),
            )
            .filter(entity::account::Column::Id.eq(account_id))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(LedgerError::AccountNotFound(account_id));
        }

        self.balance(account_id).await
    }
}
