//! Commission record repository.
//!
//! One row per referral level paid out of a purchase, written in the same transaction
//! as the credit it documents.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::commission::{CommissionRecord, CreateCommissionParams};

pub struct CommissionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommissionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records one paid commission level.
    ///
    /// # Returns
    /// - `Ok(CommissionRecord)` - The created record
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateCommissionParams) -> Result<CommissionRecord, DbErr> {
        let entity = entity::commission::ActiveModel {
            purchase_id: ActiveValue::Set(params.purchase_id),
            beneficiary_id: ActiveValue::Set(params.beneficiary_id),
            level: ActiveValue::Set(i16::from(params.level)),
            amount: ActiveValue::Set(params.amount),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        CommissionRecord::from_entity(entity)
    }

    /// Gets the commissions credited to an account, newest first.
    pub async fn get_by_beneficiary(
        &self,
        beneficiary_id: i32,
    ) -> Result<Vec<CommissionRecord>, DbErr> {
        entity::prelude::Commission::find()
            .filter(entity::commission::Column::BeneficiaryId.eq(beneficiary_id))
            .order_by_desc(entity::commission::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(CommissionRecord::from_entity)
            .collect()
    }

    /// Gets the commissions paid out of one purchase, by level.
    pub async fn get_by_purchase(&self, purchase_id: i32) -> Result<Vec<CommissionRecord>, DbErr> {
        entity::prelude::Commission::find()
            .filter(entity::commission::Column::PurchaseId.eq(purchase_id))
            .order_by_asc(entity::commission::Column::Level)
            .all(self.db)
            .await?
            .into_iter()
            .map(CommissionRecord::from_entity)
            .collect()
    }
}
