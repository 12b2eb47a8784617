//! Two-line lookahead parser for invoice line items.
//!
//! The PDF linearizer wraps every entry across two physical lines: the
//! first starts with the product code, the second carries the rest of
//! the fields. The parser buffers the first line and decodes the pair
//! once the continuation arrives.

use regex::Regex;

use super::normalize::{parse_amount, parse_percent};
use super::patterns::PRODUCT_CODE;
use crate::error::ParseError;
use crate::models::invoice::{Entry, InvoiceKind};

/// Parser state: waiting for a product-code line, or holding one.
#[derive(Debug)]
enum EntryState {
    Idle,
    CodeSeen { first_line: String },
}

/// Decodes entries from a line stream, one invoice variant at a time.
#[derive(Debug)]
pub struct EntryParser {
    grammar: Regex,
    sign: i64,
    state: EntryState,
}

impl EntryParser {
    /// Compile the entry grammar for one document.
    ///
    /// The unit-of-measure allow-list comes from configuration and may
    /// change between documents, so the grammar is rebuilt per document
    /// rather than compiled once.
    pub fn new(kind: InvoiceKind, units: &[String]) -> Self {
        // An empty allow-list would otherwise produce an empty
        // alternation, which matches anywhere; substitute a pattern
        // that matches nothing so no entry can complete.
        let unit_alternation = if units.is_empty() {
            r"[^\s\S]".to_string()
        } else {
            units
                .iter()
                .map(|unit| regex::escape(unit))
                .collect::<Vec<_>>()
                .join("|")
        };

        // Credit documents terminate every price with a literal dash.
        let (price, sign) = match kind {
            InvoiceKind::Standard => (r"[ ]+([0-9]+(?:\.[0-9]{3})*)", 1),
            InvoiceKind::Credit => (r"[ ]+([0-9]+(?:\.[0-9]{3})*)-", -1),
        };

        // code, description, unit, quantity, gross unit price,
        // discount %, net unit price, line total, VAT %
        let pattern = format!(
            r"^[ ]*([A-Z0-9]{{2}}[0-9]{{4}}-[0-9]{{3}})(.*?)({unit_alternation})[ ]+([0-9]+){price}[ ]+([0-9]+)%{price}{price}[ ]+([0-9]+)%"
        );

        Self {
            // Unit literals are escaped above, so the pattern is always valid.
            grammar: Regex::new(&pattern).unwrap(),
            sign,
            state: EntryState::Idle,
        }
    }

    /// Feed one line.
    ///
    /// Returns a decoded entry when the second line of a recognized pair
    /// completes the grammar. On a grammar mismatch the buffer is
    /// discarded and the parser resynchronizes to idle, so one mangled
    /// entry does not poison the rest of the document.
    pub fn feed(&mut self, line: &str) -> Result<Option<Entry>, ParseError> {
        match std::mem::replace(&mut self.state, EntryState::Idle) {
            EntryState::CodeSeen { first_line } => {
                let joined = format!("{} {}", first_line, line);
                self.decode(&joined).map(Some)
            }
            EntryState::Idle => {
                if PRODUCT_CODE.is_match(line) {
                    self.state = EntryState::CodeSeen {
                        first_line: line.to_string(),
                    };
                }
                Ok(None)
            }
        }
    }

    fn decode(&self, line: &str) -> Result<Entry, ParseError> {
        let caps = self
            .grammar
            .captures(line)
            .ok_or_else(|| ParseError::GrammarMismatch {
                line: line.to_string(),
            })?;

        Ok(Entry {
            code: caps[1].to_string(),
            description: caps[2].trim().to_string(),
            unit: caps[3].to_string(),
            quantity: caps[4].parse().map_err(|_| ParseError::Format {
                field: "quantity",
                value: caps[4].to_string(),
            })?,
            gross_unit_price: parse_amount(&caps[5], self.sign)?,
            discount_percent: parse_percent(&caps[6])?,
            net_unit_price: parse_amount(&caps[7], self.sign)?,
            line_total: parse_amount(&caps[8], self.sign)?,
            vat_percent: parse_percent(&caps[9])?,
        })
    }
}
