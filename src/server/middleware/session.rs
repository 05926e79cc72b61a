//! Type-safe session access.
//!
//! The identity layer that logs accounts in is external to this service; it stores the
//! authenticated account ID under a single session key. `AuthSession` is the only code
//! that knows that key.

use tower_sessions::Session;

use crate::server::error::AppError;

const SESSION_AUTH_ACCOUNT_ID: &str = "auth:account";

/// Authentication session management.
///
/// Wraps a tower-sessions `Session` and exposes only the authenticated account ID.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the authenticated account's ID in the session.
    ///
    /// # Returns
    /// - `Ok(())` - Account ID stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write the session
    pub async fn set_account_id(&self, account_id: i32) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_ACCOUNT_ID, account_id)
            .await?;
        Ok(())
    }

    /// Retrieves the authenticated account's ID from the session.
    ///
    /// # Returns
    /// - `Ok(Some(account_id))` - An account is logged in
    /// - `Ok(None)` - No account in session
    /// - `Err(AppError::SessionErr(_))` - Failed to read the session
    pub async fn get_account_id(&self) -> Result<Option<i32>, AppError> {
        let account_id = self.session.get::<i32>(SESSION_AUTH_ACCOUNT_ID).await?;
        Ok(account_id)
    }
}
