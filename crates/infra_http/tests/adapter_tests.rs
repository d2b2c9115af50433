//! Adapter Tests
//!
//! Each adapter is pointed at a local axum server that mimics the upstream
//! API and records what it was sent.
//!
//! # Test Organization
//!
//! - `highlevel_tests` - Lookup, fetch, and payment against a HighLevel stand-in
//! - `sheets_tests` - Weekly sheet creation and row appends
//! - `api_tests` - The web API adapters against stand-in endpoints

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use core_kernel::{ExternalSystemConfig, PortError};
use domain_invoice::{InvoiceGatewayPort, SheetLoggerPort};
use infra_http::{
    ApiInvoiceGateway, ApiSheetLogger, GoogleSheetsLogger, HighLevelConfig,
    HighLevelInvoiceGateway, SheetsConfig,
};
use test_utils::{PlatformFixtures, RecordFixtures};

/// Serves `router` on an ephemeral port and returns its base URL
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

// ============================================================================
// HIGHLEVEL TESTS
// ============================================================================

mod highlevel_tests {
    use super::*;

    #[derive(Default)]
    struct Upstream {
        headers: Mutex<Vec<HeaderMap>>,
        queries: Mutex<Vec<HashMap<String, String>>>,
        payments: Mutex<Vec<(String, Value)>>,
    }

    async fn list_invoices(
        State(upstream): State<Arc<Upstream>>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        upstream.headers.lock().unwrap().push(headers);
        upstream.queries.lock().unwrap().push(query);
        Json(json!({
            "invoices": [
                { "_id": "draft_1", "invoiceNumber": "000900", "total": null },
                { "invoiceNumber": "000901", "status": "draft" },
                PlatformFixtures::balance_invoice_json(),
                PlatformFixtures::scheduled_invoice_json()
            ],
            "total": 4
        }))
    }

    async fn get_invoice(
        State(upstream): State<Arc<Upstream>>,
        Path(id): Path<String>,
        Query(query): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        upstream.queries.lock().unwrap().push(query);
        if id == PlatformFixtures::INVOICE_ID {
            (StatusCode::OK, Json(PlatformFixtures::scheduled_invoice_json()))
        } else {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "statusCode": 404, "message": "Invoice not found" })),
            )
        }
    }

    async fn record_payment(
        State(upstream): State<Arc<Upstream>>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let amount = body["amount"].as_f64().unwrap_or_default();
        upstream.payments.lock().unwrap().push((id.clone(), body));
        if amount <= 0.0 {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "statusCode": 422, "message": ["amount must be positive"] })),
            );
        }
        (StatusCode::CREATED, Json(json!({ "_id": id, "status": "paid" })))
    }

    async fn gateway() -> (HighLevelInvoiceGateway, Arc<Upstream>) {
        let upstream = Arc::new(Upstream::default());
        let router = Router::new()
            .route("/invoices/", get(list_invoices))
            .route("/invoices/:id", get(get_invoice))
            .route("/invoices/:id/record-payment", post(record_payment))
            .with_state(upstream.clone());
        let base = serve(router).await;

        let config = HighLevelConfig::new("hl-secret", PlatformFixtures::LOCATION_ID).with_base_url(base);
        (HighLevelInvoiceGateway::new(config).unwrap(), upstream)
    }

    #[tokio::test]
    async fn test_find_by_number_scans_location_invoices() {
        let (gateway, upstream) = gateway().await;
        let invoice = gateway.find_by_number("000123").await.unwrap();

        assert_eq!(invoice.id, PlatformFixtures::INVOICE_ID);
        assert_eq!(invoice.pending_schedules().len(), 2);

        let query = upstream.queries.lock().unwrap()[0].clone();
        assert_eq!(query["altId"], PlatformFixtures::LOCATION_ID);
        assert_eq!(query["altType"], "location");
        assert_eq!(query["limit"], "99999");
        assert_eq!(query["offset"], "0");

        let headers = upstream.headers.lock().unwrap()[0].clone();
        assert_eq!(headers["authorization"], "Bearer hl-secret");
        assert_eq!(headers["version"], "2021-07-28");
    }

    #[tokio::test]
    async fn test_malformed_siblings_do_not_break_lookup() {
        let (gateway, _) = gateway().await;

        let invoice = gateway.find_by_number("000123").await.unwrap();
        assert_eq!(invoice.id, PlatformFixtures::INVOICE_ID);

        let err = gateway.find_by_number("000900").await.unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_number_is_not_found() {
        let (gateway, _) = gateway().await;
        let err = gateway.find_by_number("999999").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Invoice with number 999999 not found.");
    }

    #[tokio::test]
    async fn test_get_by_id_relays_upstream_404() {
        let (gateway, _) = gateway().await;
        let err = gateway.get_by_id("missing").await.unwrap_err();

        match err {
            PortError::Upstream { status, body, .. } => {
                assert_eq!(status, 404);
                assert_eq!(body["message"], json!("Invoice not found"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_record_payment_adds_location_scope() {
        let (gateway, upstream) = gateway().await;
        let invoice = gateway.get_by_id(PlatformFixtures::INVOICE_ID).await.unwrap();
        let plan = domain_invoice::PaymentPlan::for_invoice(&invoice).unwrap();

        let receipt = gateway
            .record_payment(&invoice.id, &plan.to_request(chrono::Utc::now()))
            .await
            .unwrap();
        assert_eq!(receipt.status, 201);
        assert_eq!(receipt.body["status"], json!("paid"));

        let (id, body) = upstream.payments.lock().unwrap()[0].clone();
        assert_eq!(id, PlatformFixtures::INVOICE_ID);
        assert_eq!(body["altId"], json!(PlatformFixtures::LOCATION_ID));
        assert_eq!(body["altType"], json!("location"));
        assert_eq!(body["mode"], json!("other"));
        assert_eq!(body["amount"], json!(300.0));
        assert_eq!(body["paymentScheduleIds"], json!(["sch_2", "sch_3"]));
    }

    #[tokio::test]
    async fn test_raw_payment_returns_rejection_verbatim() {
        let (gateway, _) = gateway().await;
        let (status, body) = gateway
            .record_payment_raw("inv_x", &json!({ "amount": 0 }))
            .await
            .unwrap();

        assert_eq!(status, 422);
        assert_eq!(body["message"], json!(["amount must be positive"]));
    }

    #[test]
    fn test_missing_location_is_rejected() {
        let err = HighLevelInvoiceGateway::new(HighLevelConfig::new("key", "")).unwrap_err();
        assert!(err.to_string().contains("location id"));
    }
}

// ============================================================================
// SHEETS TESTS
// ============================================================================

mod sheets_tests {
    use super::*;

    #[derive(Default)]
    struct Upstream {
        titles: Mutex<Vec<String>>,
        appended: Mutex<Vec<(String, Value)>>,
        value_options: Mutex<Vec<String>>,
    }

    async fn get_spreadsheet(State(upstream): State<Arc<Upstream>>) -> Json<Value> {
        let sheets: Vec<Value> = upstream
            .titles
            .lock()
            .unwrap()
            .iter()
            .map(|t| json!({ "properties": { "title": t } }))
            .collect();
        Json(json!({ "sheets": sheets }))
    }

    async fn batch_update(
        State(upstream): State<Arc<Upstream>>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if !id.ends_with(":batchUpdate") {
            return (StatusCode::NOT_FOUND, Json(json!({})));
        }
        let title = body["requests"][0]["addSheet"]["properties"]["title"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        upstream.titles.lock().unwrap().push(title);
        (StatusCode::OK, Json(json!({ "replies": [{}] })))
    }

    async fn append_values(
        State(upstream): State<Arc<Upstream>>,
        Path((_id, range)): Path<(String, String)>,
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let sheet = range.split('!').next().unwrap_or_default().to_string();
        upstream.appended.lock().unwrap().push((sheet, body["values"][0].clone()));
        if let Some(option) = query.get("valueInputOption") {
            upstream.value_options.lock().unwrap().push(option.clone());
        }
        Json(json!({ "updates": { "updatedRows": 1 } }))
    }

    async fn logger(existing: &[&str]) -> (GoogleSheetsLogger, Arc<Upstream>) {
        let upstream = Arc::new(Upstream::default());
        upstream
            .titles
            .lock()
            .unwrap()
            .extend(existing.iter().map(|t| t.to_string()));
        let router = Router::new()
            .route("/spreadsheets/:id", get(get_spreadsheet).post(batch_update))
            .route("/spreadsheets/:id/values/:range", post(append_values))
            .with_state(upstream.clone());
        let base = serve(router).await;

        let config = SheetsConfig::new("sheet-1", "ya29.token").with_base_url(base);
        (GoogleSheetsLogger::new(config).unwrap(), upstream)
    }

    #[tokio::test]
    async fn test_first_record_of_week_creates_sheet_with_headers() {
        let (logger, upstream) = logger(&["Semana-9-2024"]).await;
        let message = logger.append(&RecordFixtures::sheet_record()).await.unwrap();

        assert_eq!(message, "Todo salio bien!");
        assert!(upstream.titles.lock().unwrap().contains(&"Semana-10-2024".to_string()));

        let appended = upstream.appended.lock().unwrap().clone();
        assert_eq!(appended.len(), 2);
        assert_eq!(appended[0].0, "Semana-10-2024");
        assert_eq!(appended[0].1[0], json!("Timestamp"));
        assert_eq!(appended[0].1[12], json!("Final Total"));
        assert_eq!(appended[1].1[3], json!("INV-000123"));
        assert_eq!(appended[1].1[9], json!(69.55));
        assert!(upstream
            .value_options
            .lock()
            .unwrap()
            .iter()
            .all(|o| o == "USER_ENTERED"));
    }

    #[tokio::test]
    async fn test_existing_sheet_gets_only_the_row() {
        let (logger, upstream) = logger(&["Semana-10-2024"]).await;
        logger.append(&RecordFixtures::sheet_record()).await.unwrap();

        let appended = upstream.appended.lock().unwrap().clone();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].1[2], json!("Maria Lopez"));
        assert_eq!(upstream.titles.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_spreadsheet_id_is_rejected() {
        assert!(GoogleSheetsLogger::new(SheetsConfig::new("", "token")).is_err());
    }
}

// ============================================================================
// WEB API TESTS
// ============================================================================

mod api_tests {
    use super::*;

    async fn send_to_sheet(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["clientName"].as_str() == Some("Maria Lopez") {
            (StatusCode::OK, Json(json!({ "message": "Todo salio bien!" })))
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error processing request", "error": "boom" })),
            )
        }
    }

    async fn highlevel(Query(query): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
        match query.get("invoiceNumber").map(String::as_str) {
            Some("000123") => (
                StatusCode::OK,
                Json(json!({ "invoice": PlatformFixtures::scheduled_invoice_json() })),
            ),
            Some(n) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("Invoice with number {n} not found.") })),
            ),
            None => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "An invoiceNumber or invoiceId is required." })),
            ),
        }
    }

    async fn record_payment(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        match query.get("invoiceId").map(String::as_str) {
            Some("inv_1") => (StatusCode::CREATED, Json(json!({ "_id": "inv_1", "amount": body["amount"] }))),
            _ => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "statusCode": 422, "message": "Invoice is void" })),
            ),
        }
    }

    async fn base() -> ExternalSystemConfig {
        let router = Router::new()
            .route("/api/sendToSheet", post(send_to_sheet))
            .route("/api/highlevel", get(highlevel).post(record_payment));
        ExternalSystemConfig::new(serve(router).await)
    }

    #[tokio::test]
    async fn test_sheet_logger_returns_server_message() {
        let logger = ApiSheetLogger::new(base().await).unwrap();
        let message = logger.append(&RecordFixtures::sheet_record()).await.unwrap();
        assert_eq!(message, "Todo salio bien!");
    }

    #[tokio::test]
    async fn test_sheet_logger_surfaces_server_error() {
        let logger = ApiSheetLogger::new(base().await).unwrap();
        let mut record = RecordFixtures::sheet_record();
        record.client_name = "Someone Else".to_string();

        let err = logger.append(&record).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Error processing request");
    }

    #[tokio::test]
    async fn test_gateway_unwraps_invoice() {
        let gateway = ApiInvoiceGateway::new(base().await).unwrap();
        let invoice = gateway.find_by_number("000123").await.unwrap();
        assert_eq!(invoice.contact_details.name, "Maria Lopez");
    }

    #[tokio::test]
    async fn test_gateway_not_found_message() {
        let gateway = ApiInvoiceGateway::new(base().await).unwrap();
        let err = gateway.find_by_number("000999").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Invoice with number 000999 not found.");
    }

    #[tokio::test]
    async fn test_gateway_payment_keeps_status_and_rejection() {
        let gateway = ApiInvoiceGateway::new(base().await).unwrap();
        let plan = domain_invoice::PaymentPlan {
            amount: core_kernel::Money::from_cents(12500),
            schedule_ids: Vec::new(),
        };
        let request = plan.to_request(chrono::Utc::now());

        let receipt = gateway.record_payment("inv_1", &request).await.unwrap();
        assert_eq!(receipt.status, 201);
        assert_eq!(receipt.body["amount"], json!(125.0));

        let err = gateway.record_payment("inv_void", &request).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "Invoice is void");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        let gateway =
            ApiInvoiceGateway::new(ExternalSystemConfig::new("http://127.0.0.1:1")).unwrap();
        let err = gateway.find_by_number("000123").await.unwrap_err();
        assert!(matches!(err, PortError::Connection { .. }));
    }
}
