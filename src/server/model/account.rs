//! Account domain model.

use crate::model::account::AccountDto;

/// An account as seen by the monetization core.
///
/// The `balance` carried here is a snapshot read without a lock. It is good for
/// validation and display; every mutation goes through `LedgerRepository`, which
/// re-checks funds atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub balance: i64,
    /// Account that invited this one, if any.
    pub referred_by: Option<i32>,
    pub referral_code: Option<String>,
    pub admin: bool,
}

impl Account {
    /// Converts an entity model to an account domain model at the repository boundary.
    pub fn from_entity(entity: entity::account::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            balance: entity.balance,
            referred_by: entity.referred_by,
            referral_code: entity.referral_code,
            admin: entity.admin,
        }
    }

    /// Converts the account to a DTO for API responses.
    pub fn into_dto(self) -> AccountDto {
        AccountDto {
            id: self.id,
            name: self.name,
            balance: self.balance,
            referral_code: self.referral_code,
            referred_by: self.referred_by,
        }
    }
}
