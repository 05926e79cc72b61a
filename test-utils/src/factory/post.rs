//! Post factory for creating test content items.

use crate::factory::{account::create_account, helpers::next_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test posts with customizable fields.
pub struct PostFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    title: String,
    is_premium: bool,
    price: i64,
}

impl<'a> PostFactory<'a> {
    /// Creates a new PostFactory owned by `owner_id`.
    ///
    /// Defaults:
    /// - title: `"Post {n}"`
    /// - is_premium: `true`
    /// - price: `10`
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        Self {
            db,
            owner_id,
            title: format!("Post {}", next_id()),
            is_premium: true,
            price: 10,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    /// Builds and inserts the post entity into the database.
    pub async fn build(self) -> Result<entity::post::Model, DbErr> {
        entity::post::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            title: ActiveValue::Set(self.title),
            is_premium: ActiveValue::Set(self.is_premium),
            price: ActiveValue::Set(self.price),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a premium post with the given price, owned by a fresh account.
pub async fn create_premium_post(
    db: &DatabaseConnection,
    price: i64,
) -> Result<entity::post::Model, DbErr> {
    let owner = create_account(db, 0).await?;
    PostFactory::new(db, owner.id).price(price).build().await
}

/// Creates a free (non-premium) post owned by a fresh account.
pub async fn create_free_post(db: &DatabaseConnection) -> Result<entity::post::Model, DbErr> {
    let owner = create_account(db, 0).await?;
    PostFactory::new(db, owner.id)
        .premium(false)
        .price(0)
        .build()
        .await
}
