//! Purchase record domain models and parameters.
//!
//! A purchase is a set-membership fact: at most one record exists per (buyer, post).
//! Records move one way from `Pending` to `Completed`, or are created `Completed`
//! directly when fulfillment is not decoupled from payment.

use chrono::{DateTime, Utc};

use crate::model::purchase::PurchaseDto;

/// Fulfillment state of a purchase record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    /// Paid for, awaiting an external fulfillment step.
    Pending,
    /// Paid for and fulfilled.
    Completed,
}

impl PurchaseStatus {
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Completed
        } else {
            Self::Pending
        }
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

/// Durable record that an account bought a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub id: i32,
    /// Buyer account ID.
    pub account_id: i32,
    pub post_id: i32,
    pub status: PurchaseStatus,
    pub created_at: DateTime<Utc>,
}

impl PurchaseRecord {
    /// Converts an entity model to a purchase domain model at the repository boundary.
    pub fn from_entity(entity: entity::purchase::Model) -> Self {
        Self {
            id: entity.id,
            account_id: entity.account_id,
            post_id: entity.post_id,
            status: PurchaseStatus::from_completed(entity.completed),
            created_at: entity.created_at,
        }
    }

    /// Converts the purchase record to a DTO for API responses.
    pub fn into_dto(self) -> PurchaseDto {
        PurchaseDto {
            id: self.id,
            account_id: self.account_id,
            post_id: self.post_id,
            completed: self.status.is_completed(),
            created_at: self.created_at,
        }
    }
}

/// Parameters for inserting a purchase record.
#[derive(Debug, Clone)]
pub struct CreatePurchaseParams {
    pub account_id: i32,
    pub post_id: i32,
    pub status: PurchaseStatus,
}
