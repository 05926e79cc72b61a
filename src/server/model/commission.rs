//! Commission domain models.
//!
//! A commission record is the audit trail of one credit made by the commission
//! cascade: which purchase paid it, to whom, at which referral level, and how much.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::commission::CommissionDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionRecord {
    pub id: i32,
    pub purchase_id: i32,
    /// Ancestor account that received the credit.
    pub beneficiary_id: i32,
    /// Referral level, 1 for the buyer's immediate referrer.
    pub level: u8,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl CommissionRecord {
    /// Converts an entity model to a commission domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(CommissionRecord)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored level does not fit a referral level
    pub fn from_entity(entity: entity::commission::Model) -> Result<Self, DbErr> {
        let level = u8::try_from(entity.level).map_err(|e| {
            DbErr::Custom(format!(
                "Invalid commission level {} on commission {}: {}",
                entity.level, entity.id, e
            ))
        })?;

        Ok(Self {
            id: entity.id,
            purchase_id: entity.purchase_id,
            beneficiary_id: entity.beneficiary_id,
            level,
            amount: entity.amount,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> CommissionDto {
        CommissionDto {
            id: self.id,
            purchase_id: self.purchase_id,
            level: self.level,
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

/// Parameters for recording one paid commission level.
#[derive(Debug, Clone)]
pub struct CreateCommissionParams {
    pub purchase_id: i32,
    pub beneficiary_id: i32,
    pub level: u8,
    pub amount: i64,
}
