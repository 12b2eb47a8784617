//! Sequential state machine for invoice header fields.

use chrono::NaiveDate;

use super::normalize::{parse_amount, parse_date};
use super::patterns::{
    BARE_ID, CREDIT_ID, CREDIT_ORIGIN_DATE, REFERENCE_LABEL, STANDARD_DUE_AND_TOTAL, STANDARD_ID,
    STANDARD_ORIGIN_DATE, TOTAL_LABEL, TRAILING_DASH_AMOUNT,
};
use crate::error::ParseError;
use crate::models::invoice::{Entry, Invoice, InvoiceKind};

/// Where the parser is in the fixed header field sequence.
///
/// Standard documents walk `AwaitId → AwaitOriginDate →
/// AwaitDueDateAndTotal → Sealed`; credit documents walk `AwaitId →
/// AwaitOriginDate → AwaitReferenceLabel → AwaitReferenceId →
/// AwaitTotalLabel → AwaitTotalValue → Sealed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    AwaitId,
    AwaitOriginDate,
    AwaitDueDateAndTotal,
    AwaitReferenceLabel,
    AwaitReferenceId,
    AwaitTotalLabel,
    AwaitTotalValue,
    Sealed,
}

/// Recognizes header fields line by line, in document order.
///
/// Each state attempts exactly one anchored match against the current
/// line; a non-matching line leaves the state unchanged and the driver
/// feeds the next one. Once sealed, further lines are no-ops.
#[derive(Debug)]
pub struct HeaderParser {
    kind: InvoiceKind,
    state: HeaderState,
    id: u64,
    origin_date: NaiveDate,
    due_date: NaiveDate,
    total: i64,
    reference_id: Option<u64>,
}

impl HeaderParser {
    /// Start a parser for one document.
    ///
    /// Credit documents carry no due date in their text, so the
    /// configured placeholder is seeded at construction.
    pub fn new(kind: InvoiceKind, credit_due_date: NaiveDate) -> Self {
        let due_date = match kind {
            InvoiceKind::Standard => NaiveDate::default(),
            InvoiceKind::Credit => credit_due_date,
        };
        Self {
            kind,
            state: HeaderState::AwaitId,
            id: 0,
            origin_date: NaiveDate::default(),
            due_date,
            total: 0,
            reference_id: None,
        }
    }

    /// Feed one line.
    ///
    /// Returns `true` only on the transition that signals a new document
    /// has begun: the id line matching from the initial state.
    pub fn feed(&mut self, line: &str) -> Result<bool, ParseError> {
        match self.state {
            HeaderState::AwaitId => {
                let pattern = match self.kind {
                    InvoiceKind::Standard => &*STANDARD_ID,
                    InvoiceKind::Credit => &*CREDIT_ID,
                };
                if let Some(caps) = pattern.captures(line) {
                    self.id = parse_id(&caps[1])?;
                    self.state = HeaderState::AwaitOriginDate;
                    return Ok(true);
                }
            }
            HeaderState::AwaitOriginDate => {
                let pattern = match self.kind {
                    InvoiceKind::Standard => &*STANDARD_ORIGIN_DATE,
                    InvoiceKind::Credit => &*CREDIT_ORIGIN_DATE,
                };
                if let Some(caps) = pattern.captures(line) {
                    self.origin_date = parse_date(&caps[1])?;
                    self.state = match self.kind {
                        InvoiceKind::Standard => HeaderState::AwaitDueDateAndTotal,
                        InvoiceKind::Credit => HeaderState::AwaitReferenceLabel,
                    };
                }
            }
            HeaderState::AwaitDueDateAndTotal => {
                if let Some(caps) = STANDARD_DUE_AND_TOTAL.captures(line) {
                    self.due_date = parse_date(&caps[1])?;
                    self.total = parse_amount(&caps[2], 1)?;
                    self.state = HeaderState::Sealed;
                }
            }
            HeaderState::AwaitReferenceLabel => {
                if line.starts_with(REFERENCE_LABEL) {
                    self.state = HeaderState::AwaitReferenceId;
                }
            }
            HeaderState::AwaitReferenceId => {
                if let Some(caps) = BARE_ID.captures(line) {
                    self.reference_id = Some(parse_id(&caps[1])?);
                    self.state = HeaderState::AwaitTotalLabel;
                }
            }
            HeaderState::AwaitTotalLabel => {
                if line.starts_with(TOTAL_LABEL) {
                    self.state = HeaderState::AwaitTotalValue;
                }
            }
            HeaderState::AwaitTotalValue => {
                // The amount sits mid-line, so this is a search rather
                // than an anchored match.
                if let Some(caps) = TRAILING_DASH_AMOUNT.captures(line) {
                    self.total = parse_amount(&caps[1], -1)?;
                    self.state = HeaderState::Sealed;
                }
            }
            HeaderState::Sealed => {}
        }
        Ok(false)
    }

    /// Whether every required header field has been captured.
    pub fn is_sealed(&self) -> bool {
        self.state == HeaderState::Sealed
    }

    /// Whether the id line has been seen, i.e. the document has begun.
    pub fn has_started(&self) -> bool {
        self.state != HeaderState::AwaitId
    }

    /// Consume the parser and produce the invoice record with the
    /// fields gathered so far.
    pub fn into_invoice(self, entries: Vec<Entry>) -> Invoice {
        Invoice {
            kind: self.kind,
            id: self.id,
            origin_date: self.origin_date,
            due_date: self.due_date,
            total: self.total,
            reference_id: self.reference_id,
            entries,
        }
    }
}

fn parse_id(text: &str) -> Result<u64, ParseError> {
    text.parse::<u64>().map_err(|_| ParseError::Format {
        field: "invoice id",
        value: text.to_string(),
    })
}
