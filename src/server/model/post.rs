//! Content item (post) domain model.

/// The purchase-relevant view of a post. Price and premium flag are read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub is_premium: bool,
    pub price: i64,
}

impl Post {
    pub fn from_entity(entity: entity::post::Model) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            title: entity.title,
            is_premium: entity.is_premium,
            price: entity.price,
        }
    }
}
