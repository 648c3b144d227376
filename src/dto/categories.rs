use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub product_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryName {
    pub product_type: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<CategoryName>)]
    pub items: Vec<CategoryName>,
}
