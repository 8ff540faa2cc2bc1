use std::sync::Arc;

use biblio_db::{Category, CategoryRepository, StoreResult};

/// Read-only access to the category lookup table.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// Every category, unfiltered and unpaged.
    pub async fn all(&self) -> StoreResult<Vec<Category>> {
        self.categories.all_categories().await
    }
}
