use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub icon: Option<String>,

    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub id: String,

    #[validate(length(min = 1, message = "Category name must not be blank"))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub icon: Option<String>,

    pub color: Option<String>,

    pub active: Option<bool>,
}
