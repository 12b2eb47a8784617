//! Invoice and entry records produced by the parsing core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which grammar family a document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    /// Regular invoice with positive amounts.
    Standard,
    /// Corrective document referencing and negating an earlier invoice.
    Credit,
}

/// One billing document: header fields plus its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Grammar variant the document was parsed with.
    pub kind: InvoiceKind,

    /// Invoice serial number.
    pub id: u64,

    /// Date the invoice was issued.
    pub origin_date: NaiveDate,

    /// Payment due date. Credit invoices carry none in their text, so
    /// this holds the configured placeholder for them.
    pub due_date: NaiveDate,

    /// Total in minor currency units; negative for credit invoices.
    pub total: i64,

    /// Serial number of the invoice being corrected (credit only).
    /// Not checked against other invoices in the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<u64>,

    /// Line items in document order.
    pub entries: Vec<Entry>,
}

/// One product or service row within an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Product code, e.g. `12AB3456-789`.
    pub code: String,

    /// Free-text product description.
    pub description: String,

    /// Unit of measure, drawn from the configured allow-list.
    pub unit: String,

    /// Quantity sold.
    pub quantity: u32,

    /// Gross unit price in minor currency units; negative for credit.
    pub gross_unit_price: i64,

    /// Discount percentage, 0-100.
    pub discount_percent: u8,

    /// Net unit price in minor currency units; negative for credit.
    pub net_unit_price: i64,

    /// Line total in minor currency units; negative for credit.
    pub line_total: i64,

    /// VAT percentage, 0-100.
    pub vat_percent: u8,
}
