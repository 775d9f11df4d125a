use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A publication of a stored image at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: String,
    pub image_id: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: String, image_id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            image_id,
            created_at,
        }
    }
}
