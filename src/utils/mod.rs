//! Helpers shared by the HTTP modules.

use biblio_db::StoreError;
use biblio_http::{AppError, AppResult};
use serde_json::json;

/// Translate a store failure into the HTTP error taxonomy.
pub fn store_error(err: StoreError) -> AppError {
    let message = err.to_string();
    match err {
        StoreError::Conflict {
            entity,
            field,
            value,
        } => AppError::conflict(
            vec![json!({ "entity": entity, "field": field, "value": value })],
            message,
        ),
        StoreError::MissingReference { entity, key } => {
            tracing::debug!(entity, %key, "write referenced a missing record");
            AppError::not_found(message)
        }
        StoreError::Referenced { entity, key, by } => AppError::conflict(
            vec![json!({ "entity": entity, "key": key, "referencedBy": by })],
            message,
        ),
        StoreError::Backend(_) => AppError::Internal(anyhow::anyhow!(message)),
    }
}

/// Reject requests whose required text fields are blank.
///
/// Every blank field is listed in the error details, not only the first.
pub fn ensure_present(fields: &[(&str, &str)], message: &str) -> AppResult<()> {
    let details: Vec<_> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| json!({ "field": field, "error": "required" }))
        .collect();

    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(details, message))
    }
}
