//! Post data repository.
//!
//! Content creation and editing live outside the monetization core; this repository
//! only reads the price and premium flag a purchase depends on.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use crate::server::model::post::Post;

pub struct PostRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PostRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a post by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Post))` - Post found
    /// - `Ok(None)` - No post with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DbErr> {
        let entity = entity::prelude::Post::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Post::from_entity))
    }
}
