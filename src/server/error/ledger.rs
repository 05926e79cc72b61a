use sea_orm::DbErr;
use thiserror::Error;

/// Failures raised by balance mutations.
///
/// Ledger errors never reach the client directly; the purchase coordinator maps them
/// onto `PurchaseError` after rolling back its transaction.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The account balance is lower than the requested debit.
    #[error("Account {account_id} cannot be debited {amount}: insufficient funds")]
    InsufficientFunds {
        /// Account that was to be debited
        account_id: i32,
        /// Requested debit
        amount: i64,
    },

    /// The account row targeted by a debit or credit does not exist.
    #[error("Account {0} not found in ledger")]
    AccountNotFound(i32),

    /// Debit and credit amounts must be non-negative.
    #[error("Invalid ledger amount {0}")]
    InvalidAmount(i64),

    /// Underlying persistence failure.
    #[error(transparent)]
    DbErr(#[from] DbErr),
}
