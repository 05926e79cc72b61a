//! Referral graph walking and referral linking.
//!
//! `ReferralWalker` is read-only and runs either on the pool or inside a purchase
//! transaction. `ReferralService` owns the two writes to the graph: handing out referral
//! codes and linking an account to its referrer.

use std::collections::HashSet;

use rand::{distr::Alphanumeric, Rng};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr};

use crate::server::{
    data::{account::AccountRepository, commission::CommissionRepository},
    error::AppError,
    model::{account::Account, commission::CommissionRecord},
};

/// Number of referral levels above a buyer that earn commission.
pub const MAX_REFERRAL_DEPTH: usize = 3;

/// Upper bound on the ancestors inspected when checking a new link for cycles.
const LINK_CYCLE_SCAN_DEPTH: usize = 256;

const REFERRAL_CODE_LENGTH: usize = 8;
const REFERRAL_CODE_ATTEMPTS: usize = 5;

/// Follows `referred_by` links upward from an account.
pub struct ReferralWalker<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReferralWalker<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns up to `max_depth` ancestors of `account`, nearest first.
    ///
    /// The walk ends without error when an account has no referrer, when `max_depth`
    /// links were followed, when a link points back at an account already seen (the
    /// starting account included), or when a link points at a missing account.
    ///
    /// # Arguments
    /// - `account` - Account whose referrers are collected; it is never part of the result
    /// - `max_depth` - Maximum number of links to follow
    ///
    /// # Returns
    /// - `Ok(Vec<Account>)` - Distinct ancestors, index 0 being the immediate referrer
    /// - `Err(DbErr)` - Database error while loading an ancestor
    pub async fn ancestor_chain(
        &self,
        account: &Account,
        max_depth: usize,
    ) -> Result<Vec<Account>, DbErr> {
        let repo = AccountRepository::new(self.db);

        let mut chain = Vec::with_capacity(max_depth.min(MAX_REFERRAL_DEPTH));
        let mut visited = HashSet::from([account.id]);
        let mut next = account.referred_by;

        while chain.len() < max_depth {
            let Some(ancestor_id) = next else {
                break;
            };

            if !visited.insert(ancestor_id) {
                tracing::debug!(
                    "Referral cycle at account {} while walking from account {}",
                    ancestor_id,
                    account.id
                );
                break;
            }

            let Some(ancestor) = repo.find_by_id(ancestor_id).await? else {
                break;
            };

            next = ancestor.referred_by;
            chain.push(ancestor);
        }

        Ok(chain)
    }
}

/// Generates a random 8-character uppercase alphanumeric referral code.
pub fn generate_referral_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(REFERRAL_CODE_LENGTH)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

pub struct ReferralService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReferralService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gives an account a referral code if it has none.
    ///
    /// Idempotent: an account that already owns a code gets it back unchanged. Code
    /// collisions with other accounts are retried with a fresh code.
    ///
    /// # Returns
    /// - `Ok(Account)` - The account with its referral code set
    /// - `Err(AppError::NotFound)` - Account no longer exists
    /// - `Err(AppError::InternalError)` - Every generated code collided
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn assign_referral_code(&self, account: &Account) -> Result<Account, AppError> {
        if account.referral_code.is_some() {
            return Ok(account.clone());
        }

        let repo = AccountRepository::new(self.db);
        let mut assigned = false;

        for _ in 0..REFERRAL_CODE_ATTEMPTS {
            match repo
                .set_referral_code(account.id, generate_referral_code())
                .await
            {
                // false: a concurrent request already stored a code
                Ok(_) => {
                    assigned = true;
                    break;
                }
                Err(err) if is_unique_violation(&err) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        if !assigned {
            return Err(AppError::InternalError(format!(
                "Failed to generate a unique referral code for account {} after {} attempts",
                account.id, REFERRAL_CODE_ATTEMPTS
            )));
        }

        repo.find_by_id(account.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Account not found".to_string()))
    }

    /// Links `account` to the owner of `code`.
    ///
    /// # Returns
    /// - `Ok(Account)` - The account with `referred_by` set
    /// - `Err(AppError::NotFound)` - No account owns `code`
    /// - `Err(AppError::BadRequest)` - Empty code, account already linked, self-referral,
    ///   or the referrer is a descendant of `account`
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn link_referrer(&self, account: &Account, code: &str) -> Result<Account, AppError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AppError::BadRequest("Referral code is required".to_string()));
        }

        if account.referred_by.is_some() {
            return Err(AppError::BadRequest(
                "Account already has a referrer".to_string(),
            ));
        }

        let repo = AccountRepository::new(self.db);

        let Some(referrer) = repo.find_by_referral_code(&code).await? else {
            return Err(AppError::NotFound("Referral code not found".to_string()));
        };

        if referrer.id == account.id {
            return Err(AppError::BadRequest(
                "An account cannot refer itself".to_string(),
            ));
        }

        let referrer_ancestors = ReferralWalker::new(self.db)
            .ancestor_chain(&referrer, LINK_CYCLE_SCAN_DEPTH)
            .await?;

        if referrer_ancestors.iter().any(|a| a.id == account.id) {
            return Err(AppError::BadRequest(
                "Referral link would create a cycle".to_string(),
            ));
        }

        if !repo.set_referred_by(account.id, referrer.id).await? {
            return Err(AppError::BadRequest(
                "Account already has a referrer".to_string(),
            ));
        }

        tracing::info!("Account {} linked to referrer {}", account.id, referrer.id);

        repo.find_by_id(account.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Account not found".to_string()))
    }

    /// Gets the commissions an account has earned, newest first.
    pub async fn commission_earnings(
        &self,
        account_id: i32,
    ) -> Result<Vec<CommissionRecord>, AppError> {
        let records = CommissionRepository::new(self.db)
            .get_by_beneficiary(account_id)
            .await?;

        Ok(records)
    }

    /// Lists the accounts directly referred by `account_id`, oldest first.
    pub async fn referred_accounts(&self, account_id: i32) -> Result<Vec<Account>, AppError> {
        let accounts = AccountRepository::new(self.db)
            .get_referred_by(account_id)
            .await?;

        Ok(accounts)
    }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
