use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No account ID is stored in the session.
    ///
    /// The request did not come from an authenticated session. Results in a
    /// 401 Unauthorized response.
    #[error("Failed to find account ID in session")]
    AccountNotInSession,

    /// The session references an account that no longer exists.
    ///
    /// Results in a 401 Unauthorized response so the client re-authenticates.
    #[error("Failed to find account {0} in database")]
    AccountNotInDatabase(i32),

    /// The account is authenticated but lacks a required permission.
    ///
    /// Results in a 403 Forbidden response.
    #[error("Account {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `AccountNotInSession` / `AccountNotInDatabase` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
///
/// Errors are logged at debug level while client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::AccountNotInSession | Self::AccountNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Insufficient permissions".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
