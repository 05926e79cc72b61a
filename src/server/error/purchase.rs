use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failure modes of buying and fulfilling premium content.
///
/// Validation variants are returned before any mutation. `TransactionConflict` is the
/// only variant the coordinator retries on its own.
#[derive(Error, Debug)]
pub enum PurchaseError {
    /// The requested post does not exist.
    ///
    /// Results in 404 Not Found.
    #[error("Post {0} not found")]
    PostNotFound(i32),

    /// The purchase record does not exist (or is not visible to the caller).
    ///
    /// Results in 404 Not Found.
    #[error("Purchase {0} not found")]
    PurchaseNotFound(i32),

    /// The post is free content and cannot be bought.
    ///
    /// Results in 409 Conflict.
    #[error("Post {0} is not premium content")]
    NotPurchasable(i32),

    /// The buyer already owns a purchase record for this post.
    ///
    /// Results in 409 Conflict.
    #[error("Account {account_id} already purchased post {post_id}")]
    AlreadyPurchased {
        /// Buyer account
        account_id: i32,
        /// Purchased post
        post_id: i32,
    },

    /// The buyer's balance does not cover the price.
    ///
    /// Results in 409 Conflict.
    #[error("Account {account_id} cannot afford post {post_id} priced {price}")]
    InsufficientFunds {
        /// Buyer account
        account_id: i32,
        /// Requested post
        post_id: i32,
        /// Price of the post
        price: i64,
    },

    /// Lock contention or serialization failure persisted through every retry.
    ///
    /// Results in 503 Service Unavailable; the client may retry later.
    #[error("Purchase transaction conflicted after {attempts} attempt(s)")]
    TransactionConflict {
        /// Attempts made before giving up
        attempts: u32,
    },

    /// Unexpected persistence error.
    ///
    /// Results in 500 Internal Server Error with a generic message.
    #[error("Purchase of post {post_id} by account {account_id} failed: {source}")]
    Database {
        /// Buyer account
        account_id: i32,
        /// Requested post
        post_id: i32,
        /// The underlying database error
        #[source]
        source: DbErr,
    },
}

impl PurchaseError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::PostNotFound(_) | Self::PurchaseNotFound(_) => StatusCode::NOT_FOUND,
            Self::NotPurchasable(_)
            | Self::AlreadyPurchased { .. }
            | Self::InsufficientFunds { .. } => StatusCode::CONFLICT,
            Self::TransactionConflict { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts purchase errors into HTTP responses.
///
/// # Returns
/// - 404 Not Found - `PostNotFound`, `PurchaseNotFound`
/// - 409 Conflict - `NotPurchasable`, `AlreadyPurchased`, `InsufficientFunds`
/// - 503 Service Unavailable - `TransactionConflict`
/// - 500 Internal Server Error - `Database`, logged with buyer and post IDs
impl IntoResponse for PurchaseError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::Database { .. } => {
                tracing::error!("{}", self);
                "Internal server error".to_string()
            }
            Self::TransactionConflict { .. } => {
                tracing::warn!("{}", self);
                "Purchase could not be completed, please try again".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}
