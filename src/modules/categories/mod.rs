pub mod models;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::State, routing::get, Json, Router};
use biblio_db::CategoryRepository;
use biblio_http::AppResult;
use biblio_kernel::{InitCtx, Module};

use crate::utils;
use models::CategoryDto;
use service::CategoryService;

/// Category lookup endpoints
pub struct CategoriesModule {
    service: CategoryService,
}

impl CategoriesModule {
    pub fn new(service: CategoryService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for CategoriesModule {
    fn name(&self) -> &'static str {
        "categories"
    }

    fn base_path(&self) -> String {
        "/rest/category/api".to_string()
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count = self.service.all().await?.len();
        tracing::info!(module = self.name(), categories = count, "categories module initialized");
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/allCategories", get(all_categories))
            .route("/health", get(health_check))
            .with_state(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/health": {
                    "get": {
                        "summary": "Categories health check",
                        "tags": ["Categories"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                },
                "/allCategories": {
                    "get": {
                        "summary": "List every category",
                        "tags": ["Categories"],
                        "responses": {
                            "200": {
                                "description": "All categories",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Category" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Category": {
                        "type": "object",
                        "properties": {
                            "code": { "type": "string", "description": "Business key of the category" },
                            "label": { "type": "string", "description": "Display label" }
                        },
                        "required": ["code", "label"]
                    }
                }
            }
        }))
    }
}

async fn all_categories(
    State(service): State<CategoryService>,
) -> AppResult<Json<Vec<CategoryDto>>> {
    let categories = service.all().await.map_err(utils::store_error)?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "categories module is healthy"
}

/// Create a new instance of the categories module
pub fn create_module(categories: Arc<dyn CategoryRepository>) -> Arc<dyn Module> {
    Arc::new(CategoriesModule::new(CategoryService::new(categories)))
}
