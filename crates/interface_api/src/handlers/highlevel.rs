//! Invoicing platform proxy handlers
//!
//! The front desk never holds the platform credentials; it goes through
//! these endpoints instead. Failures reported by the platform are relayed
//! with the platform's own status and body.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{Method, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::info;

use domain_invoice::RecordPaymentRequest;

use crate::dto::highlevel::{HighLevelQuery, InvoiceResponse};
use crate::{error::ApiError, AppState};

/// Looks an invoice up by number, or fetches it by id
pub async fn get_invoice(
    State(state): State<AppState>,
    Query(query): Query<HighLevelQuery>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    if let Some(number) = query.invoice_number() {
        let invoice = state.invoice_gateway.find_by_number(number).await.map_err(|err| {
            if err.is_not_found() {
                ApiError::NotFound(format!("Invoice with number {number} not found."))
            } else {
                ApiError::from(err)
            }
        })?;
        return Ok(Json(InvoiceResponse { invoice }));
    }

    if let Some(id) = query.invoice_id() {
        let invoice = state.invoice_gateway.get_by_id(id).await?;
        return Ok(Json(InvoiceResponse { invoice }));
    }

    Err(ApiError::BadRequest(
        "An invoiceNumber or invoiceId is required.".to_string(),
    ))
}

/// Records a payment against an invoice
///
/// Answers with the platform's own status and body.
pub async fn record_payment(
    State(state): State<AppState>,
    Query(query): Query<HighLevelQuery>,
    body: Result<Json<RecordPaymentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(invoice_id) = query.invoice_id() else {
        return Err(ApiError::BadRequest("Invoice ID is required".to_string()));
    };
    let Json(payment) = body.map_err(|rejection| ApiError::Processing(rejection.body_text()))?;

    let receipt = state.invoice_gateway.record_payment(invoice_id, &payment).await?;

    info!(invoice_id, amount = %payment.amount, status = receipt.status, "Payment relayed to invoicing platform");
    let status = StatusCode::from_u16(receipt.status).unwrap_or(StatusCode::OK);
    Ok((status, Json(receipt.body)))
}

/// Answers any method other than GET and POST
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(format!("Method {method} Not Allowed"))
}
