//! XLSX emission for completed invoices.
//!
//! One workbook per run, two worksheets: invoice headers (with the
//! configurable column placement) and entries (one row per line item,
//! prefixed by its parent invoice id).

use std::path::Path;

use xlsxwriter::worksheet::Worksheet;
use xlsxwriter::Workbook;

use crate::error::{InvozipError, Result};
use crate::models::config::OutputConfig;
use crate::models::invoice::{Invoice, InvoiceKind};

const INVOICE_LABELS: [&str; 4] = ["Invoice Number", "Date of Invoice", "Payment Date", "Amount"];

const ENTRY_LABELS: [&str; 10] = [
    "Invoice Number",
    "Code",
    "Description",
    "Unit",
    "Quantity",
    "Gross Unit Price",
    "Discount %",
    "Net Unit Price",
    "Line Total",
    "VAT %",
];

/// One spreadsheet cell value.
#[derive(Debug, PartialEq)]
enum Cell {
    Text(String),
    Int(i64),
}

/// Pick the column for each of `cells` cells. The override applies only
/// when it covers every cell; otherwise placement is sequential from
/// column 0.
fn placement(cells: usize, positions: &[u16]) -> Vec<u16> {
    if positions.len() == cells {
        positions.to_vec()
    } else {
        (0..cells as u16).collect()
    }
}

/// Write one row, honoring a column-placement override. Returns the
/// next row.
fn write_row(sheet: &mut Worksheet, row: u32, cells: &[Cell], positions: &[u16]) -> Result<u32> {
    for (cell, col) in cells.iter().zip(placement(cells.len(), positions)) {
        match cell {
            Cell::Text(text) => sheet.write_string(row, col, text, None)?,
            Cell::Int(value) => sheet.write_number(row, col, *value as f64, None)?,
        }
    }
    Ok(row + 1)
}

fn label_row(labels: &[&str]) -> Vec<Cell> {
    labels.iter().map(|l| Cell::Text(l.to_string())).collect()
}

fn invoice_row(invoice: &Invoice) -> Vec<Cell> {
    // Credit rows show the corrected invoice's id in the slot where
    // standard rows show the payment date, as on the printed document.
    let third = match (invoice.kind, invoice.reference_id) {
        (InvoiceKind::Credit, Some(reference)) => Cell::Int(reference as i64),
        _ => Cell::Text(invoice.due_date.format("%Y.%m.%d").to_string()),
    };
    vec![
        Cell::Int(invoice.id as i64),
        Cell::Text(invoice.origin_date.format("%Y.%m.%d").to_string()),
        third,
        Cell::Int(invoice.total),
    ]
}

fn entry_rows(invoice: &Invoice) -> Vec<Vec<Cell>> {
    invoice
        .entries
        .iter()
        .map(|entry| {
            vec![
                Cell::Int(invoice.id as i64),
                Cell::Text(entry.code.clone()),
                Cell::Text(entry.description.clone()),
                Cell::Text(entry.unit.clone()),
                Cell::Int(entry.quantity as i64),
                Cell::Int(entry.gross_unit_price),
                Cell::Int(entry.discount_percent as i64),
                Cell::Int(entry.net_unit_price),
                Cell::Int(entry.line_total),
                Cell::Int(entry.vat_percent as i64),
            ]
        })
        .collect()
}

/// Write every invoice of a run into a two-sheet workbook at `path`.
pub fn write_workbook(invoices: &[Invoice], path: &Path, output: &OutputConfig) -> Result<()> {
    let filename = path
        .to_str()
        .ok_or_else(|| InvozipError::Config(format!("non-UTF-8 workbook path: {:?}", path)))?;
    let workbook = Workbook::new(filename)?;

    let mut invoice_sheet = workbook.add_worksheet(Some("Invoices"))?;
    let mut entry_sheet = workbook.add_worksheet(Some("Entries"))?;

    let mut invoice_row_at = write_row(
        &mut invoice_sheet,
        0,
        &label_row(&INVOICE_LABELS),
        &output.header_columns,
    )?;
    let mut entry_row_at = write_row(&mut entry_sheet, 0, &label_row(&ENTRY_LABELS), &[])?;

    for invoice in invoices {
        invoice_row_at = write_row(
            &mut invoice_sheet,
            invoice_row_at,
            &invoice_row(invoice),
            &output.header_columns,
        )?;
        for row in entry_rows(invoice) {
            entry_row_at = write_row(&mut entry_sheet, entry_row_at, &row, &[])?;
        }
    }

    workbook.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::Entry;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_invoice() -> Invoice {
        Invoice {
            kind: InvoiceKind::Standard,
            id: 1234567890,
            origin_date: NaiveDate::from_ymd_opt(2016, 3, 4).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2016, 4, 4).unwrap(),
            total: 23_750,
            reference_id: None,
            entries: vec![Entry {
                code: "12AB3456-789".to_string(),
                description: "Shoe Model X".to_string(),
                unit: "Pár".to_string(),
                quantity: 10,
                gross_unit_price: 2500,
                discount_percent: 5,
                net_unit_price: 2375,
                line_total: 23_750,
                vat_percent: 27,
            }],
        }
    }

    fn sample_credit_invoice() -> Invoice {
        let mut invoice = sample_invoice();
        invoice.kind = InvoiceKind::Credit;
        invoice.id = 2000000001;
        invoice.reference_id = Some(1234567890);
        invoice.total = -23_750;
        invoice
    }

    #[test]
    fn test_placement_uses_full_length_override() {
        assert_eq!(placement(4, &[1, 2, 3, 4]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_placement_falls_back_on_length_mismatch() {
        assert_eq!(placement(4, &[7]), vec![0, 1, 2, 3]);
        assert_eq!(placement(3, &[]), vec![0, 1, 2]);
        assert_eq!(placement(2, &[0, 1, 2]), vec![0, 1]);
    }

    #[test]
    fn test_standard_row_carries_payment_date() {
        let row = invoice_row(&sample_invoice());
        assert_eq!(row[2], Cell::Text("2016.04.04".to_string()));
        assert_eq!(row[3], Cell::Int(23_750));
    }

    #[test]
    fn test_credit_row_carries_corrected_invoice_id() {
        let row = invoice_row(&sample_credit_invoice());
        assert_eq!(row[0], Cell::Int(2000000001));
        assert_eq!(row[2], Cell::Int(1234567890));
        assert_eq!(row[3], Cell::Int(-23_750));
    }

    #[test]
    fn test_workbook_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.xlsx");

        write_workbook(&[sample_invoice()], &path, &OutputConfig::default()).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_mismatched_placement_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.xlsx");

        // A wrong-length override must not panic or misplace writes.
        let output = OutputConfig {
            workbook_name: "invoices.xlsx".to_string(),
            header_columns: vec![7],
        };
        write_workbook(&[sample_invoice()], &path, &output).unwrap();
        assert!(path.exists());
    }
}
