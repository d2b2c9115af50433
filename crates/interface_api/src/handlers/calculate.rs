//! Fee calculation handler

use axum::Json;

use domain_invoice::compute_totals;

use crate::dto::calculate::{CalculateRequest, CalculateResponse, FormattedTotals};

/// Computes the invoice totals for the given amounts and toggles
pub async fn calculate(Json(request): Json<CalculateRequest>) -> Json<CalculateResponse> {
    let inputs = request.inputs();
    let totals = compute_totals(&inputs, &request.toggles);

    Json(CalculateResponse {
        inputs,
        toggles: request.toggles,
        formatted: FormattedTotals::from(&totals),
        totals,
    })
}
