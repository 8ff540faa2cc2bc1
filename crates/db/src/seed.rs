//! Startup data for the store.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::entities::{Category, NewCustomer};
use crate::repository::{CategoryRepository, CustomerRepository, StoreError};

/// Categories available out of the box.
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("BD", "Bande dessinée"),
    ("HIS", "Histoire"),
    ("INF", "Informatique"),
    ("JEU", "Jeunesse"),
    ("ROM", "Roman"),
    ("SCI", "Sciences"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Contents of a seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
    #[serde(default)]
    pub customers: Vec<CustomerSeed>,
}

impl SeedData {
    /// The built-in category list.
    pub fn defaults() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(code, label)| CategorySeed {
                    code: (*code).to_string(),
                    label: (*label).to_string(),
                })
                .collect(),
            customers: Vec::new(),
        }
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("malformed seed data")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("in seed file {}", path.display()))
    }
}

/// Rows written by [`apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub customers: usize,
    pub skipped_customers: usize,
}

/// Write seed data into the store. Customers whose email is already
/// registered are skipped, so applying the same file twice is harmless.
pub async fn apply<S>(store: &S, data: SeedData) -> anyhow::Result<SeedReport>
where
    S: CategoryRepository + CustomerRepository,
{
    let mut report = SeedReport::default();

    for category in data.categories {
        store
            .save_category(Category::new(category.code, category.label))
            .await?;
        report.categories += 1;
    }

    for customer in data.customers {
        let email = customer.email.clone();
        let inserted = store
            .insert_customer(NewCustomer {
                first_name: customer.first_name,
                last_name: customer.last_name,
                email: customer.email,
            })
            .await;
        match inserted {
            Ok(_) => report.customers += 1,
            Err(StoreError::Conflict { .. }) => {
                tracing::debug!(%email, "seed customer already registered");
                report.skipped_customers += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(report)
}
