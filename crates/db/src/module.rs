use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use biblio_kernel::{InitCtx, Module};

use crate::memory::MemoryStore;
use crate::seed::{self, SeedData};

/// Core module owning the store: seeds it during init and reports its size
/// on shutdown.
pub struct DbModule {
    store: Arc<MemoryStore>,
}

impl DbModule {
    pub const fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let database = &ctx.settings.database;

        if database.seed_defaults {
            let report = seed::apply(self.store.as_ref(), SeedData::defaults()).await?;
            tracing::info!(
                module = self.name(),
                categories = report.categories,
                "default categories seeded"
            );
        }

        if let Some(path) = &database.seed_path {
            let data = SeedData::from_file(Path::new(path))?;
            let report = seed::apply(self.store.as_ref(), data).await?;
            tracing::info!(
                module = self.name(),
                seed_path = %path,
                categories = report.categories,
                customers = report.customers,
                skipped_customers = report.skipped_customers,
                "seed file applied"
            );
        }

        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let stats = self.store.stats().await;
        tracing::info!(
            module = self.name(),
            books = stats.books,
            customers = stats.customers,
            loans = stats.loans,
            "store closed"
        );
        Ok(())
    }
}
