//! Purchase transaction coordinator.
//!
//! Buying premium content validates the request against committed state, then applies
//! every monetary effect in one database transaction:
//!
//! 1. lock the buyer, then its referral ancestors in ascending ID order
//! 2. debit the buyer by the content price
//! 3. insert the purchase record
//! 4. credit each ancestor its commission and record the payout
//!
//! The transaction commits only if every step succeeds. Lock contention and
//! serialization failures are retried from validation a bounded number of times.

use std::time::Duration;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, RuntimeErr, TransactionTrait};

use crate::server::{
    data::{
        account::AccountRepository, ledger::LedgerRepository, post::PostRepository,
        purchase::PurchaseRepository,
    },
    error::{ledger::LedgerError, purchase::PurchaseError, AppError},
    model::{
        account::Account,
        post::Post,
        purchase::{CreatePurchaseParams, PurchaseRecord, PurchaseStatus},
    },
    service::{
        commission::{CommissionDistributor, CommissionSchedule},
        referral::{is_unique_violation, ReferralWalker, MAX_REFERRAL_DEPTH},
    },
};

/// Default number of attempts for a purchase that keeps hitting transaction conflicts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base delay between conflicting attempts; attempt `n` waits `n` times this.
const RETRY_BACKOFF: Duration = Duration::from_millis(25);

/// Database error codes that mean "try again": PostgreSQL serialization failure and
/// deadlock, SQLite BUSY/LOCKED and their extended codes.
const CONFLICT_CODES: &[&str] = &["40001", "40P01", "5", "6", "261", "262", "517"];

/// Tunables of the purchase flow, read from configuration at startup.
#[derive(Debug, Clone)]
pub struct PurchaseSettings {
    /// Attempts made before a conflicting purchase fails with `TransactionConflict`.
    pub max_attempts: u32,
    /// When true, purchases are created `Pending` and completed by a later call.
    pub requires_fulfillment: bool,
    pub schedule: CommissionSchedule,
}

impl Default for PurchaseSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            requires_fulfillment: false,
            schedule: CommissionSchedule::default(),
        }
    }
}

pub struct PurchaseService<'a> {
    db: &'a DatabaseConnection,
    settings: &'a PurchaseSettings,
}

impl<'a> PurchaseService<'a> {
    pub fn new(db: &'a DatabaseConnection, settings: &'a PurchaseSettings) -> Self {
        Self { db, settings }
    }

    /// Buys a premium post for `buyer`.
    ///
    /// Validation runs in this order and stops at the first failure, before anything is
    /// written: post exists, post is premium, buyer does not own it yet, buyer can
    /// afford it. The buyer's balance is re-read on every attempt, so the snapshot in
    /// `buyer` only supplies the identity.
    ///
    /// # Arguments
    /// - `buyer` - The authenticated account making the purchase
    /// - `post_id` - ID of the post to buy
    ///
    /// # Returns
    /// - `Ok(PurchaseRecord)` - The committed purchase record
    /// - `Err(PurchaseError::PostNotFound)` - No such post
    /// - `Err(PurchaseError::NotPurchasable)` - Post is free content
    /// - `Err(PurchaseError::AlreadyPurchased)` - Buyer already owns the post
    /// - `Err(PurchaseError::InsufficientFunds)` - Balance lower than the price
    /// - `Err(PurchaseError::TransactionConflict)` - Conflicts persisted through every attempt
    /// - `Err(PurchaseError::Database)` - Unexpected persistence error; nothing was applied
    pub async fn buy_content(
        &self,
        buyer: &Account,
        post_id: i32,
    ) -> Result<PurchaseRecord, PurchaseError> {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.attempt_purchase(buyer.id, post_id).await {
                Err(PurchaseError::TransactionConflict { .. }) if attempt < max_attempts => {
                    tracing::warn!(
                        "Purchase of post {} by account {} conflicted on attempt {}/{}, retrying",
                        post_id,
                        buyer.id,
                        attempt,
                        max_attempts
                    );

                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(PurchaseError::TransactionConflict { .. }) => {
                    return Err(PurchaseError::TransactionConflict { attempts: attempt });
                }
                result => return result,
            }
        }
    }

    /// Marks a purchase as completed.
    ///
    /// Idempotent: completing an already completed purchase returns it unchanged. No
    /// balance is touched.
    ///
    /// # Returns
    /// - `Ok(PurchaseRecord)` - The record, now completed
    /// - `Err(AppError::PurchaseErr(PurchaseNotFound))` - No such purchase
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn complete_purchase(&self, purchase_id: i32) -> Result<PurchaseRecord, AppError> {
        let repo = PurchaseRepository::new(self.db);

        if repo.mark_completed(purchase_id).await? {
            tracing::info!("Purchase {} completed", purchase_id);
        }

        repo.find_by_id(purchase_id)
            .await?
            .ok_or_else(|| PurchaseError::PurchaseNotFound(purchase_id).into())
    }

    /// Gets a purchase record by ID.
    pub async fn get_purchase(&self, purchase_id: i32) -> Result<Option<PurchaseRecord>, AppError> {
        let record = PurchaseRepository::new(self.db)
            .find_by_id(purchase_id)
            .await?;

        Ok(record)
    }

    /// Gets a page of the buyer's purchases, newest first.
    pub async fn list_purchases(
        &self,
        account_id: i32,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PurchaseRecord>, AppError> {
        let records = PurchaseRepository::new(self.db)
            .get_by_account(account_id, limit, offset)
            .await?;

        Ok(records)
    }

    /// One validation pass followed by one transaction.
    async fn attempt_purchase(
        &self,
        buyer_id: i32,
        post_id: i32,
    ) -> Result<PurchaseRecord, PurchaseError> {
        let db_err = |source: DbErr| classify_db_err(source, buyer_id, post_id);

        let post = PostRepository::new(self.db)
            .find_by_id(post_id)
            .await
            .map_err(db_err)?
            .ok_or(PurchaseError::PostNotFound(post_id))?;

        if !post.is_premium {
            return Err(PurchaseError::NotPurchasable(post_id));
        }

        let existing = PurchaseRepository::new(self.db)
            .find_by_account_and_post(buyer_id, post_id)
            .await
            .map_err(db_err)?;

        if existing.is_some() {
            return Err(PurchaseError::AlreadyPurchased {
                account_id: buyer_id,
                post_id,
            });
        }

        let buyer = AccountRepository::new(self.db)
            .find_by_id(buyer_id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| missing_buyer(buyer_id, post_id))?;

        if buyer.balance < post.price {
            return Err(PurchaseError::InsufficientFunds {
                account_id: buyer_id,
                post_id,
                price: post.price,
            });
        }

        let txn = self.db.begin().await.map_err(db_err)?;

        match self.apply_purchase(&txn, &buyer, &post).await {
            Ok(record) => {
                txn.commit().await.map_err(db_err)?;

                tracing::info!(
                    "Account {} purchased post {} for {} (purchase {})",
                    buyer_id,
                    post_id,
                    post.price,
                    record.id
                );

                Ok(record)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(
                        "Failed to roll back purchase of post {} by account {}: {}",
                        post_id,
                        buyer_id,
                        rollback_err
                    );
                }

                Err(err)
            }
        }
    }

    /// Applies the debit, the purchase record and the commission cascade inside `txn`.
    async fn apply_purchase(
        &self,
        txn: &DatabaseTransaction,
        buyer: &Account,
        post: &Post,
    ) -> Result<PurchaseRecord, PurchaseError> {
        let ledger_err = |err: LedgerError| classify_ledger_err(err, buyer.id, post.id);
        let db_err = |err: DbErr| classify_db_err(err, buyer.id, post.id);

        let ledger = LedgerRepository::new(txn);

        ledger.lock_accounts(&[buyer.id]).await.map_err(ledger_err)?;

        let buyer = AccountRepository::new(txn)
            .find_by_id(buyer.id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| missing_buyer(buyer.id, post.id))?;

        let chain = ReferralWalker::new(txn)
            .ancestor_chain(&buyer, MAX_REFERRAL_DEPTH)
            .await
            .map_err(db_err)?;

        let mut ancestor_ids: Vec<i32> = chain.iter().map(|a| a.id).collect();
        ancestor_ids.sort_unstable();

        ledger
            .lock_accounts(&ancestor_ids)
            .await
            .map_err(ledger_err)?;

        ledger
            .debit(buyer.id, post.price)
            .await
            .map_err(ledger_err)?;

        let status = if self.settings.requires_fulfillment {
            PurchaseStatus::Pending
        } else {
            PurchaseStatus::Completed
        };

        let record = PurchaseRepository::new(txn)
            .create(CreatePurchaseParams {
                account_id: buyer.id,
                post_id: post.id,
                status,
            })
            .await
            .map_err(db_err)?;

        let commissions = CommissionDistributor::new(txn, &self.settings.schedule)
            .distribute(record.id, post.price, &chain)
            .await
            .map_err(ledger_err)?;

        tracing::debug!(
            "Purchase {} paid {} commission level(s) totalling {}",
            record.id,
            commissions.len(),
            commissions.iter().map(|c| c.amount).sum::<i64>()
        );

        Ok(record)
    }
}

/// Maps a persistence error raised during a purchase onto the purchase error kinds.
///
/// A unique violation can only come from the (buyer, post) index, so it means another
/// request bought the same post first.
fn classify_db_err(err: DbErr, account_id: i32, post_id: i32) -> PurchaseError {
    if is_unique_violation(&err) {
        return PurchaseError::AlreadyPurchased {
            account_id,
            post_id,
        };
    }

    if is_conflict(&err) {
        tracing::debug!(
            "Purchase of post {} by account {} hit a transaction conflict: {}",
            post_id,
            account_id,
            err
        );
        return PurchaseError::TransactionConflict { attempts: 1 };
    }

    PurchaseError::Database {
        account_id,
        post_id,
        source: err,
    }
}

fn classify_ledger_err(err: LedgerError, account_id: i32, post_id: i32) -> PurchaseError {
    match err {
        LedgerError::InsufficientFunds { amount, .. } => PurchaseError::InsufficientFunds {
            account_id,
            post_id,
            price: amount,
        },
        LedgerError::DbErr(source) => classify_db_err(source, account_id, post_id),
        err @ (LedgerError::AccountNotFound(_) | LedgerError::InvalidAmount(_)) => {
            PurchaseError::Database {
                account_id,
                post_id,
                source: DbErr::Custom(err.to_string()),
            }
        }
    }
}

fn missing_buyer(account_id: i32, post_id: i32) -> PurchaseError {
    PurchaseError::Database {
        account_id,
        post_id,
        source: DbErr::RecordNotFound(format!("Buyer account {} not found", account_id)),
    }
}

/// Whether `err` is transient contention worth retrying.
fn is_conflict(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) => true,
        DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e))
        | DbErr::Conn(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .is_some_and(|code| CONFLICT_CODES.contains(&&*code)),
        _ => false,
    }
}
