//! Commission cascade over a referral chain.
//!
//! Rates are held in basis points so every amount stays an integer:
//! `commission = amount * bps / 10_000`, truncated toward zero, which is the floor for
//! the non-negative amounts the ledger accepts.

use sea_orm::ConnectionTrait;

use crate::server::{
    data::{commission::CommissionRepository, ledger::LedgerRepository},
    error::ledger::LedgerError,
    model::{
        account::Account,
        commission::{CommissionRecord, CreateCommissionParams},
    },
};

/// Level 1 → 3%, level 2 → 2%, level 3 → 1%.
pub const DEFAULT_LEVEL_BPS: [i64; 3] = [300, 200, 100];

const BPS_DENOMINATOR: i128 = 10_000;

/// Per-level commission rates, index 0 being the buyer's immediate referrer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionSchedule {
    level_bps: Vec<i64>,
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_BPS.to_vec())
    }
}

impl CommissionSchedule {
    pub fn new(level_bps: Vec<i64>) -> Self {
        Self { level_bps }
    }

    /// Number of referral levels that earn a commission.
    pub fn depth(&self) -> usize {
        self.level_bps.len()
    }

    /// Commission owed at `level` (1-based) on `amount`.
    ///
    /// Levels outside the schedule earn nothing.
    pub fn commission_for(&self, amount: i64, level: u8) -> i64 {
        let Some(index) = usize::from(level).checked_sub(1) else {
            return 0;
        };
        let Some(&bps) = self.level_bps.get(index) else {
            return 0;
        };

        // Widened so large prices cannot overflow; the result never exceeds `amount`
        let commission = i128::from(amount) * i128::from(bps) / BPS_DENOMINATOR;
        i64::try_from(commission).unwrap_or(0)
    }
}

/// Credits referral ancestors and records each payout.
pub struct CommissionDistributor<'a, C: ConnectionTrait> {
    db: &'a C,
    schedule: &'a CommissionSchedule,
}

impl<'a, C: ConnectionTrait> CommissionDistributor<'a, C> {
    pub fn new(db: &'a C, schedule: &'a CommissionSchedule) -> Self {
        Self { db, schedule }
    }

    /// Pays each ancestor in `chain` its level's share of `amount`.
    ///
    /// `chain` is nearest first. Ancestors beyond the schedule's depth are not paid, and
    /// a short or empty chain simply pays fewer levels. A commission record is written
    /// for every level paid, including levels whose share rounds down to zero.
    ///
    /// Must run inside the purchase transaction; any error leaves the transaction to be
    /// rolled back by the caller.
    ///
    /// # Returns
    /// - `Ok(Vec<CommissionRecord>)` - One record per level paid, level 1 first
    /// - `Err(LedgerError::AccountNotFound)` - An ancestor row is missing
    /// - `Err(LedgerError::DbErr)` - Database error while crediting or recording
    pub async fn distribute(
        &self,
        purchase_id: i32,
        amount: i64,
        chain: &[Account],
    ) -> Result<Vec<CommissionRecord>, LedgerError> {
        let ledger = LedgerRepository::new(self.db);
        let commission_repo = CommissionRepository::new(self.db);

        let mut records = Vec::with_capacity(chain.len().min(self.schedule.depth()));

        for (level, ancestor) in (1u8..).zip(chain.iter().take(self.schedule.depth())) {
            let commission = self.schedule.commission_for(amount, level);

            ledger.credit(ancestor.id, commission).await?;

            let record = commission_repo
                .create(CreateCommissionParams {
                    purchase_id,
                    beneficiary_id: ancestor.id,
                    level,
                    amount: commission,
                })
                .await?;

            records.push(record);
        }

        Ok(records)
    }
}
