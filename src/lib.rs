//! Library management backend.
//!
//! Books, categories, customers and loans are exposed as modules mounted by
//! the HTTP layer; [`run`] drives their lifecycle around the server.

use std::sync::Arc;

use anyhow::Context;
use biblio_db::MemoryStore;
use biblio_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;
pub mod utils;

/// Re-export commonly used types
pub use modules::*;

/// Registry holding every module, all backed by `store`.
pub fn build_registry(store: Arc<MemoryStore>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    registry
}

/// Initialize and start all modules, serve HTTP until a shutdown signal, then
/// stop the modules in reverse order.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(Arc::new(MemoryStore::new()));
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module start failed")?;

    let served =
        biblio_http::start_server(&registry, &settings, biblio_http::shutdown_signal()).await;

    registry
        .stop_all()
        .await
        .context("module shutdown failed")?;

    served
}
