pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use biblio_db::LoanRepository;
use biblio_kernel::{InitCtx, Module};

use service::LoanService;

/// Loan lifecycle module: open, close and report loans
pub struct LoansModule {
    service: LoanService,
}

impl LoansModule {
    pub fn new(service: LoanService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for LoansModule {
    fn name(&self) -> &'static str {
        "loans"
    }

    fn base_path(&self) -> String {
        "/rest/loan/api".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "loans module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let loan_list = serde_json::json!({
            "description": "Ok: matching loans",
            "content": {
                "application/json": {
                    "schema": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Loan" }
                    }
                }
            }
        });
        let simple_loan_body = serde_json::json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/SimpleLoan" }
                }
            }
        });
        let boolean = serde_json::json!({
            "application/json": { "schema": { "type": "boolean" } }
        });

        Some(serde_json::json!({
            "paths": {
                "/maxEndDate": {
                    "get": {
                        "summary": "Loans of every customer ending before a date",
                        "tags": ["Loans"],
                        "parameters": [{
                            "name": "date",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "string", "format": "date" }
                        }],
                        "responses": {
                            "200": loan_list.clone(),
                            "400": {
                                "description": "The date is not YYYY-MM-DD",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/customerLoans": {
                    "get": {
                        "summary": "Open loans of a customer",
                        "tags": ["Loans"],
                        "parameters": [{
                            "name": "email",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": { "200": loan_list }
                    }
                },
                "/addLoan": {
                    "post": {
                        "summary": "Open a loan of a book to a customer",
                        "tags": ["Loans"],
                        "requestBody": simple_loan_body.clone(),
                        "responses": {
                            "201": { "description": "Created: the loan is open", "content": boolean.clone() },
                            "304": { "description": "Not Modified: the loan was not stored" },
                            "404": {
                                "description": "The book or the customer does not exist",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "409": { "description": "Conflict: this loan is already open", "content": boolean.clone() },
                            "422": {
                                "description": "Missing or inverted loan dates",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/closeLoan": {
                    "post": {
                        "summary": "Close the open loan of a book to a customer",
                        "tags": ["Loans"],
                        "requestBody": simple_loan_body,
                        "responses": {
                            "200": { "description": "Ok: the loan is closed", "content": boolean },
                            "204": { "description": "No Content: no open loan for this book and customer" },
                            "304": { "description": "Not Modified: the loan was not updated" }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Loans health check",
                        "tags": ["Loans"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Loan": {
                        "type": "object",
                        "properties": {
                            "bookDTO": {
                                "type": "object",
                                "properties": {
                                    "id": { "type": "integer", "format": "int64" },
                                    "isbn": { "type": "string" },
                                    "title": { "type": "string" }
                                }
                            },
                            "customerDTO": {
                                "type": "object",
                                "properties": {
                                    "id": { "type": "integer", "format": "int64" },
                                    "firstName": { "type": "string" },
                                    "lastName": { "type": "string" },
                                    "email": { "type": "string" }
                                }
                            },
                            "loanBeginDate": { "type": "string", "format": "date" },
                            "loanEndDate": { "type": "string", "format": "date" }
                        },
                        "required": ["bookDTO", "customerDTO", "loanBeginDate", "loanEndDate"]
                    },
                    "SimpleLoan": {
                        "type": "object",
                        "properties": {
                            "bookId": { "type": "integer", "format": "int64" },
                            "customerId": { "type": "integer", "format": "int64" },
                            "beginDate": { "type": "string", "format": "date" },
                            "endDate": { "type": "string", "format": "date" }
                        },
                        "required": ["bookId", "customerId"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the loans module
pub fn create_module(loans: Arc<dyn LoanRepository>) -> Arc<dyn Module> {
    Arc::new(LoansModule::new(LoanService::new(loans)))
}
