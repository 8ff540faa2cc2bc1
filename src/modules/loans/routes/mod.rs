//! HTTP handlers for the loan lifecycle.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use biblio_db::StoreError;
use biblio_http::{ApiJson, AppError, AppResult, Reply};
use serde::Deserialize;
use serde_json::json;
use time::{macros::format_description, Date};

use super::models::{to_loan_dtos, LoanDto, SimpleLoanDto};
use super::service::LoanService;
use crate::utils;

#[derive(Debug, Deserialize)]
pub struct MaxEndDateQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    pub email: String,
}

/// Routes of the loans module, relative to its base path.
pub fn router(service: LoanService) -> Router {
    Router::new()
        .route("/maxEndDate", get(loans_ending_before))
        .route("/customerLoans", get(customer_open_loans))
        .route("/addLoan", post(add_loan))
        .route("/closeLoan", post(close_loan))
        .route("/health", get(health_check))
        .with_state(service)
}

fn parse_date(raw: &str) -> AppResult<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::bad_request(format!("'{}' is not a YYYY-MM-DD date", raw)))
}

/// Every loan, open or closed, whose end date is before `date`.
async fn loans_ending_before(
    State(service): State<LoanService>,
    Query(query): Query<MaxEndDateQuery>,
) -> AppResult<Json<Vec<LoanDto>>> {
    let date = parse_date(&query.date)?;
    let loans = service
        .loans_ending_before(date)
        .await
        .map_err(utils::store_error)?;
    Ok(Json(to_loan_dtos(loans)))
}

async fn customer_open_loans(
    State(service): State<LoanService>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<Vec<LoanDto>>> {
    let loans = service
        .open_loans_for_customer(&query.email)
        .await
        .map_err(utils::store_error)?;
    Ok(Json(to_loan_dtos(loans)))
}

/// 201 `true` once opened, 409 `false` when the pair already has an open loan.
async fn add_loan(
    State(service): State<LoanService>,
    ApiJson(request): ApiJson<SimpleLoanDto>,
) -> AppResult<Reply<bool>> {
    let (begin, end) = match (request.begin_date, request.end_date) {
        (Some(begin), Some(end)) if end >= begin => (begin, end),
        (Some(_), Some(_)) => {
            return Err(AppError::validation(
                vec![json!({ "field": "endDate", "error": "before beginDate" })],
                "loan must not end before it begins",
            ))
        }
        (begin, end) => {
            let details = [("beginDate", begin), ("endDate", end)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(field, _)| json!({ "field": field, "error": "required" }))
                .collect();
            return Err(AppError::validation(details, "loan dates are required"));
        }
    };

    match service.open(request.key(), begin, end).await {
        Ok(_) => Ok(Reply::Created(true)),
        Err(StoreError::Conflict { .. }) => Ok(Reply::Conflict(false)),
        Err(err) => Err(utils::store_error(err)),
    }
}

/// 200 `true` when an open loan was closed, 204 when none was open.
async fn close_loan(
    State(service): State<LoanService>,
    ApiJson(request): ApiJson<SimpleLoanDto>,
) -> AppResult<Reply<bool>> {
    let closed = service
        .close(request.key())
        .await
        .map_err(utils::store_error)?;

    Ok(match closed {
        Some(_) => Reply::Ok(true),
        None => Reply::NoContent,
    })
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "loans module is healthy"
}
