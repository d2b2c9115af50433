//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::Money;
use domain_invoice::{
    Calculator, ExternalInvoice, InvoiceStatus, Location, PaymentSchedule, ScheduleStatus,
};
use domain_invoice::external::{ContactDetails, PaymentScheduleSet};
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Map;

/// Builder for invoices as the invoicing platform returns them
pub struct ExternalInvoiceBuilder {
    id: String,
    invoice_number: String,
    contact_name: String,
    total: Decimal,
    amount_paid: Decimal,
    status: InvoiceStatus,
    schedules: Option<Vec<PaymentSchedule>>,
}

impl Default for ExternalInvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalInvoiceBuilder {
    /// Creates a new builder: an unpaid 500 invoice with no installments
    pub fn new() -> Self {
        Self {
            id: "inv_test".to_string(),
            invoice_number: "000123".to_string(),
            contact_name: Name().fake(),
            total: dec!(500),
            amount_paid: dec!(0),
            status: InvoiceStatus::Sent,
            schedules: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    pub fn with_contact_name(mut self, name: impl Into<String>) -> Self {
        self.contact_name = name.into();
        self
    }

    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total = total;
        self
    }

    pub fn with_amount_paid(mut self, paid: Decimal) -> Self {
        self.amount_paid = paid;
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds an installment; the first call attaches a payment schedule
    pub fn with_schedule(mut self, id: &str, value: Decimal, status: ScheduleStatus) -> Self {
        self.schedules.get_or_insert_with(Vec::new).push(PaymentSchedule {
            id: id.to_string(),
            value: Money::new(value),
            status,
            extra: Map::new(),
        });
        self
    }

    /// Marks the invoice fully paid
    pub fn paid(self) -> Self {
        let total = self.total;
        self.with_amount_paid(total).with_status(InvoiceStatus::Paid)
    }

    pub fn build(self) -> ExternalInvoice {
        ExternalInvoice {
            id: self.id,
            invoice_number: self.invoice_number,
            contact_details: ContactDetails {
                name: self.contact_name,
                email: None,
                extra: Map::new(),
            },
            total: Money::new(self.total),
            amount_paid: Money::new(self.amount_paid),
            status: self.status,
            payment_schedule: self.schedules.map(|schedules| PaymentScheduleSet {
                schedules,
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }
}

/// Builder for a calculator with fields already filled in
pub struct CalculatorBuilder {
    subtotal: String,
    discount: String,
    cash: String,
    deposit: String,
    financing: bool,
    delivery: bool,
    laboratory: bool,
    location: Location,
    client_name: String,
    invoice_number: String,
}

impl Default for CalculatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorBuilder {
    /// Creates a builder with the standard 1000/50/100/200 amounts
    pub fn new() -> Self {
        Self {
            subtotal: "1000".to_string(),
            discount: "50".to_string(),
            cash: "100".to_string(),
            deposit: "200".to_string(),
            financing: false,
            delivery: false,
            laboratory: false,
            location: Location::Royal,
            client_name: Name().fake(),
            invoice_number: String::new(),
        }
    }

    pub fn with_amounts(mut self, subtotal: &str, discount: &str, cash: &str, deposit: &str) -> Self {
        self.subtotal = subtotal.to_string();
        self.discount = discount.to_string();
        self.cash = cash.to_string();
        self.deposit = deposit.to_string();
        self
    }

    pub fn with_financing(mut self) -> Self {
        self.financing = true;
        self
    }

    pub fn with_delivery(mut self) -> Self {
        self.delivery = true;
        self
    }

    pub fn with_laboratory(mut self) -> Self {
        self.laboratory = true;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn with_invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    /// Builds a calculator still in the editing phase
    pub fn build(self) -> Calculator {
        let mut calc = Calculator::new();
        calc.set_subtotal(&self.subtotal);
        calc.set_discount(&self.discount);
        calc.set_cash(&self.cash);
        calc.set_deposit(&self.deposit);
        calc.set_financing(self.financing);
        calc.set_delivery(self.delivery);
        calc.set_laboratory(self.laboratory);
        calc.set_location(self.location);
        calc.set_client_name(self.client_name);
        calc.set_invoice_number(&self.invoice_number);
        calc
    }

    /// Builds a calculator sitting in the confirmation step
    pub fn confirming(self) -> Calculator {
        let mut calc = self.build();
        calc.request_calculation();
        calc
    }
}
