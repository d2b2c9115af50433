//! Sheet logger handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use domain_invoice::SheetRecord;

use crate::dto::sheet::MessageResponse;
use crate::{error::ApiError, AppState};

/// Appends a confirmed invoice to this week's tracking sheet
pub async fn send_to_sheet(
    State(state): State<AppState>,
    body: Result<Json<SheetRecord>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(record) = body.map_err(|rejection| ApiError::Processing(rejection.body_text()))?;

    let message = state
        .sheet_logger
        .append(&record)
        .await
        .map_err(|err| ApiError::Processing(err.to_string()))?;

    info!(office = %record.office_name, invoice = %record.invoice_number, "Invoice logged");
    Ok(Json(MessageResponse { message }))
}

/// Answers any method other than POST
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Only POST requests are allowed".to_string())
}
