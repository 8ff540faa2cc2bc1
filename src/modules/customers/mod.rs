pub mod models;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    routing::{get, post, put},
    Router,
};
use biblio_db::CustomerRepository;
use biblio_http::{ApiJson, AppError, AppResult, Reply};
use biblio_kernel::Module;
use serde::Deserialize;

use crate::utils;
use models::CustomerDto;
use service::CustomerService;

/// Customer registration and lookup endpoints
pub struct CustomersModule {
    service: CustomerService,
}

impl CustomersModule {
    pub fn new(service: CustomerService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for CustomersModule {
    fn name(&self) -> &'static str {
        "customers"
    }

    fn base_path(&self) -> String {
        "/rest/customer/api".to_string()
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/addCustomer", post(create_customer))
            .route("/updateCustomer", put(update_customer))
            .route("/searchByEmail", get(search_by_email))
            .route("/health", get(health_check))
            .with_state(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/health": {
                    "get": {
                        "summary": "Customers health check",
                        "tags": ["Customers"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                },
                "/addCustomer": {
                    "post": {
                        "summary": "Register a customer",
                        "tags": ["Customers"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Customer" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Customer" }
                                    }
                                }
                            },
                            "409": {
                                "description": "Conflict: the email is already registered",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/updateCustomer": {
                    "put": {
                        "summary": "Update a customer",
                        "tags": ["Customers"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Customer" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Customer" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Not Found: the customer does not exist",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "409": {
                                "description": "Conflict: the email belongs to another customer",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/searchByEmail": {
                    "get": {
                        "summary": "Find a customer by email",
                        "tags": ["Customers"],
                        "parameters": [{
                            "name": "email",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Customer" }
                                    }
                                }
                            },
                            "204": { "description": "No Content: no customer has this email" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Customer": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "firstName": { "type": "string" },
                            "lastName": { "type": "string" },
                            "email": { "type": "string" }
                        },
                        "required": ["firstName", "lastName", "email"]
                    }
                }
            }
        }))
    }
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

fn validate(request: &CustomerDto) -> AppResult<()> {
    utils::ensure_present(
        &[
            ("firstName", &request.first_name),
            ("lastName", &request.last_name),
            ("email", &request.email),
        ],
        "customer names and email are required",
    )
}

async fn create_customer(
    State(service): State<CustomerService>,
    ApiJson(request): ApiJson<CustomerDto>,
) -> AppResult<Reply<CustomerDto>> {
    validate(&request)?;
    let customer = service
        .create(request.into())
        .await
        .map_err(utils::store_error)?;
    Ok(Reply::Created(customer.into()))
}

async fn update_customer(
    State(service): State<CustomerService>,
    ApiJson(request): ApiJson<CustomerDto>,
) -> AppResult<Reply<CustomerDto>> {
    let Some(id) = request.id else {
        return Err(AppError::not_found("customer id is missing"));
    };
    validate(&request)?;

    service
        .update(id, request.into())
        .await
        .map_err(utils::store_error)?
        .map(|customer| Reply::Ok(customer.into()))
        .ok_or_else(|| AppError::not_found(format!("customer '{}' does not exist", id)))
}

async fn search_by_email(
    State(service): State<CustomerService>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Reply<CustomerDto>> {
    let customer = service
        .find_by_email(&query.email)
        .await
        .map_err(utils::store_error)?;
    Ok(Reply::found(customer.map(CustomerDto::from)))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "customers module is healthy"
}

/// Create a new instance of the customers module
pub fn create_module(customers: Arc<dyn CustomerRepository>) -> Arc<dyn Module> {
    Arc::new(CustomersModule::new(CustomerService::new(customers)))
}
