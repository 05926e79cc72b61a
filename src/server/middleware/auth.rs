use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::account::AccountRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::account::Account,
};

pub enum Permission {
    Admin,
}

/// Resolves the account behind a request's session.
///
/// Handlers call `require` first; the returned `Account` is what the services receive
/// as the acting account.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Loads the session's account and checks every permission in `permissions`.
    ///
    /// # Returns
    /// - `Ok(Account)` - Authenticated account holding all permissions
    /// - `Err(AuthError::AccountNotInSession)` - No account ID in session
    /// - `Err(AuthError::AccountNotInDatabase)` - Session references a missing account
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<Account, AppError> {
        let Some(account_id) = AuthSession::new(self.session).get_account_id().await? else {
            return Err(AuthError::AccountNotInSession.into());
        };

        let Some(account) = AccountRepository::new(self.db)
            .find_by_id(account_id)
            .await?
        else {
            return Err(AuthError::AccountNotInDatabase(account_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !account.admin {
                        return Err(AuthError::AccessDenied(
                            account_id,
                            "Account attempted an admin-only action without admin permissions"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(account)
    }
}
