use crate::entities::{drink_category_entity, drink_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkResponse {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl From<drink_entity::Model> for DrinkResponse {
    fn from(m: drink_entity::Model) -> Self {
        Self {
            id: m.id,
            category_id: m.category_id,
            name: m.name,
            price: m.price,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<drink_category_entity::Model> for CategoryResponse {
    fn from(m: drink_category_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            image_url: m.image_url,
            created_at: m.created_at,
        }
    }
}
