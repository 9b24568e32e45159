use crate::model::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        CategoryResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            icon: value.icon,
            color: value.color,
            active: value.active,
            created_at: value.created_at,
            modified_at: value.modified_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCountResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub product_count: usize,
}

impl From<(Category, usize)> for CategoryWithCountResponse {
    fn from((category, product_count): (Category, usize)) -> Self {
        CategoryWithCountResponse {
            category: CategoryResponse::from(category),
            product_count,
        }
    }
}
