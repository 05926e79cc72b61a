//! Account factory for creating test account entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test accounts with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::account::AccountFactory;
///
/// let account = AccountFactory::new(&db)
///     .name("Buyer")
///     .balance(100)
///     .referred_by(Some(referrer.id))
///     .build()
///     .await?;
/// ```
pub struct AccountFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    balance: i64,
    referred_by: Option<i32>,
    referral_code: Option<String>,
    admin: bool,
}

impl<'a> AccountFactory<'a> {
    /// Creates a new AccountFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Account {n}"` where n is auto-incremented
    /// - balance: `0`
    /// - referred_by: `None`
    /// - referral_code: `None`
    /// - admin: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Account {}", next_id()),
            balance: 0,
            referred_by: None,
            referral_code: None,
            admin: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    pub fn referred_by(mut self, referred_by: Option<i32>) -> Self {
        self.referred_by = referred_by;
        self
    }

    pub fn referral_code(mut self, code: impl Into<String>) -> Self {
        self.referral_code = Some(code.into());
        self
    }

    pub fn admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Builds and inserts the account entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::account::Model)` - Created account entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::account::Model, DbErr> {
        entity::account::ActiveModel {
            name: ActiveValue::Set(self.name),
            balance: ActiveValue::Set(self.balance),
            referred_by: ActiveValue::Set(self.referred_by),
            referral_code: ActiveValue::Set(self.referral_code),
            admin: ActiveValue::Set(self.admin),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an account with default values and the given balance.
///
/// Shorthand for `AccountFactory::new(db).balance(balance).build().await`.
pub async fn create_account(
    db: &DatabaseConnection,
    balance: i64,
) -> Result<entity::account::Model, DbErr> {
    AccountFactory::new(db).balance(balance).build().await
}
