//! Purchase factory for seeding purchase records without going through the ledger.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a purchase record directly.
///
/// # Arguments
/// - `db` - Database connection
/// - `account_id` - Buyer account
/// - `post_id` - Purchased post
/// - `completed` - Whether the record starts completed or pending fulfillment
pub async fn create_purchase(
    db: &DatabaseConnection,
    account_id: i32,
    post_id: i32,
    completed: bool,
) -> Result<entity::purchase::Model, DbErr> {
    entity::purchase::ActiveModel {
        account_id: ActiveValue::Set(account_id),
        post_id: ActiveValue::Set(post_id),
        completed: ActiveValue::Set(completed),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
