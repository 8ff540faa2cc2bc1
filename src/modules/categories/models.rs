use biblio_db::Category;
use serde::{Deserialize, Serialize};

/// Wire shape of a category, also embedded in book payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    /// Business key of the category
    pub code: String,
    /// Display label
    pub label: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            code: category.code,
            label: category.label,
        }
    }
}
