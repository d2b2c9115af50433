//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the calculator and the invoicing
//! platform. These fixtures are designed to be consistent and predictable
//! for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use domain_invoice::{
    compute_totals, FeeToggles, InvoiceInputs, InvoiceRecord, Location, SheetRecord,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

/// Fixture for entered amounts
pub struct InputFixtures;

impl InputFixtures {
    /// 1000 subtotal, 50 discount, 100 cash, 200 deposit
    ///
    /// Base 650, taxes 45.50, net 695.50.
    pub fn standard() -> InvoiceInputs {
        InvoiceInputs::new(dec!(1000), dec!(50), dec!(100), dec!(200))
    }

    /// Deductions exceed the subtotal, so the base floors at zero
    pub fn over_deducted() -> InvoiceInputs {
        InvoiceInputs::new(dec!(100), dec!(80), dec!(50), dec!(0))
    }

    pub fn empty() -> InvoiceInputs {
        InvoiceInputs::default()
    }
}

/// Fixture for fee toggles
pub struct ToggleFixtures;

impl ToggleFixtures {
    pub fn none() -> FeeToggles {
        FeeToggles::default()
    }

    pub fn all() -> FeeToggles {
        FeeToggles {
            apply_financing: true,
            apply_delivery: true,
            apply_laboratory: true,
        }
    }

    pub fn financing_only() -> FeeToggles {
        FeeToggles {
            apply_financing: true,
            ..FeeToggles::default()
        }
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Tuesday of ISO week 10, 2024
    pub fn confirmed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    /// Sunday closing ISO week 1, 2024
    pub fn week_one_sunday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 7, 23, 0, 0).unwrap()
    }
}

/// Fixture for confirmed records
pub struct RecordFixtures;

impl RecordFixtures {
    /// Default location, no invoice number, standard inputs and no fees
    pub fn royal() -> InvoiceRecord {
        let inputs = InputFixtures::standard();
        let toggles = ToggleFixtures::none();
        InvoiceRecord {
            client_name: "Ana Ruiz".to_string(),
            invoice_number: None,
            location: Location::Royal,
            inputs,
            toggles,
            totals: compute_totals(&inputs, &toggles),
        }
    }

    /// Invoice-numbered location with financing applied
    pub fn lales_financed() -> InvoiceRecord {
        let inputs = InputFixtures::standard();
        let toggles = ToggleFixtures::financing_only();
        InvoiceRecord {
            client_name: "Maria Lopez".to_string(),
            invoice_number: Some("000123".to_string()),
            location: Location::Lales,
            inputs,
            toggles,
            totals: compute_totals(&inputs, &toggles),
        }
    }

    pub fn sheet_record() -> SheetRecord {
        Self::lales_financed().to_sheet_record(TemporalFixtures::confirmed_at())
    }
}

/// Fixture for invoicing-platform payloads
pub struct PlatformFixtures;

impl PlatformFixtures {
    pub const INVOICE_ID: &'static str = "6578aa9e2f5b1c0012ab34cd";
    pub const LOCATION_ID: &'static str = "loc_front_desk";

    /// An invoice with two pending installments of 150 each
    pub fn scheduled_invoice_json() -> Value {
        json!({
            "_id": Self::INVOICE_ID,
            "invoiceNumber": "000123",
            "contactDetails": { "name": "Maria Lopez", "email": "maria@example.com" },
            "total": 400,
            "amountPaid": 100,
            "status": "partially_paid",
            "currency": "USD",
            "paymentSchedule": {
                "schedules": [
                    { "_id": "sch_1", "value": 100, "status": "paid" },
                    { "_id": "sch_2", "value": 150, "status": "pending" },
                    { "_id": "sch_3", "value": 150, "status": "pending" }
                ]
            }
        })
    }

    /// An invoice with no installments and 250 outstanding
    pub fn balance_invoice_json() -> Value {
        json!({
            "_id": "inv_balance",
            "invoiceNumber": "000456",
            "contactDetails": { "name": "Jose Perez" },
            "total": 1000,
            "amountPaid": 750,
            "status": "sent"
        })
    }
}
