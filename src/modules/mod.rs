pub mod books;
pub mod categories;
pub mod customers;
pub mod loans;

use std::sync::Arc;

use biblio_db::{DbModule, MemoryStore};
use biblio_kernel::ModuleRegistry;

/// Register the store module and every HTTP module with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: Arc<MemoryStore>) {
    registry.register_core(Arc::new(DbModule::new(store.clone())));
    registry.register_custom(books::create_module(store.clone()));
    registry.register_custom(categories::create_module(store.clone()));
    registry.register_custom(customers::create_module(store.clone()));
    registry.register_custom(loans::create_module(store));
}
