//! Purchase record store.
//!
//! Persists the fact that an account bought a post. The `(account_id, post_id)` pair is
//! covered by a unique index, so a duplicate insert fails at the database even when two
//! requests pass validation concurrently.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::purchase::{CreatePurchaseParams, PurchaseRecord};

const MAX_BOUND: u64 = i64::MAX as u64;

/// Repository providing database operations for purchase records.
pub struct PurchaseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PurchaseRepository<'a, C> {
    /// Creates a new PurchaseRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a purchase record.
    ///
    /// # Arguments
    /// - `params` - Buyer, post and initial status
    ///
    /// # Returns
    /// - `Ok(PurchaseRecord)` - The created record with generated ID
    /// - `Err(DbErr)` - Database error; a unique violation means the pair already exists
    pub async fn create(&self, params: CreatePurchaseParams) -> Result<PurchaseRecord, DbErr> {
        let entity = entity::purchase::ActiveModel {
            account_id: ActiveValue::Set(params.account_id),
            post_id: ActiveValue::Set(params.post_id),
            completed: ActiveValue::Set(params.status.is_completed()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(PurchaseRecord::from_entity(entity))
    }

    /// Finds a purchase record by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<PurchaseRecord>, DbErr> {
        let entity = entity::prelude::Purchase::find_by_id(id).one(self.db).await?;

        Ok(entity.map(PurchaseRecord::from_entity))
    }

    /// Finds the purchase record for a (buyer, post) pair.
    ///
    /// # Returns
    /// - `Ok(Some(PurchaseRecord))` - The buyer already owns the post
    /// - `Ok(None)` - No purchase for this pair
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_account_and_post(
        &self,
        account_id: i32,
        post_id: i32,
    ) -> Result<Option<PurchaseRecord>, DbErr> {
        let entity = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::AccountId.eq(account_id))
            .filter(entity::purchase::Column::PostId.eq(post_id))
            .one(self.db)
            .await?;

        Ok(entity.map(PurchaseRecord::from_entity))
    }

    /// Gets a page of an account's purchases, newest first.
    ///
    /// # Arguments
    /// - `account_id` - Buyer account
    /// - `limit` - Maximum number of records to return
    /// - `offset` - Number of records to skip
    ///
    /// Both bounds are capped at `i64::MAX`, the largest value the database binds.
    pub async fn get_by_account(
        &self,
        account_id: i32,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PurchaseRecord>, DbErr> {
        let entities = entity::prelude::Purchase::find()
            .filter(entity::purchase::Column::AccountId.eq(account_id))
            .order_by_desc(entity::purchase::Column::Id)
            .limit(limit.min(MAX_BOUND))
            .offset(offset.min(MAX_BOUND))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(PurchaseRecord::from_entity)
            .collect())
    }

    /// Marks a pending purchase as completed.
    ///
    /// Only flips `completed` from false to true; calling it on a completed or missing
    /// record changes nothing.
    ///
    /// # Returns
    /// - `Ok(true)` - The record moved from pending to completed
    /// - `Ok(false)` - Record already completed or missing
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_completed(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Purchase::update_many()
            .col_expr(entity::purchase::Column::Completed, Expr::value(true))
            .filter(entity::purchase::Column::Id.eq(id))
            .filter(entity::purchase::Column::Completed.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
