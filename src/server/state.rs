//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction. It holds the database pool and the purchase flow's settings.

use sea_orm::DatabaseConnection;

use crate::server::service::purchase::PurchaseSettings;

/// Application state containing shared resources.
///
/// Cloning is cheap: `DatabaseConnection` is a pool handle and the settings are a few
/// integers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Retry bound, fulfillment mode and commission schedule of the purchase flow.
    pub purchase_settings: PurchaseSettings,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `purchase_settings` - Purchase flow settings derived from configuration
    pub fn new(db: DatabaseConnection, purchase_settings: PurchaseSettings) -> Self {
        Self {
            db,
            purchase_settings,
        }
    }
}
