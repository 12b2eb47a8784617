//! Document-level driver: variant dispatch, lockstep line feeding, and
//! invoice assembly.

use tracing::{debug, warn};

use super::entry::EntryParser;
use super::header::HeaderParser;
use super::patterns::{CREDIT_TITLE, STANDARD_TITLE};
use super::stats::RunStats;
use crate::models::config::ExtractionConfig;
use crate::models::invoice::{Entry, Invoice, InvoiceKind};

/// Inspect a title line and select the invoice variant it announces.
pub fn classify(line: &str) -> Option<InvoiceKind> {
    if line.starts_with(CREDIT_TITLE) {
        return Some(InvoiceKind::Credit);
    }
    if line.starts_with(STANDARD_TITLE) {
        return Some(InvoiceKind::Standard);
    }
    None
}

/// Parse state for one document: both line parsers plus the entries
/// collected so far. Dropped and rebuilt whenever a new title line
/// opens the next document.
struct ActiveDocument {
    header: HeaderParser,
    entry: EntryParser,
    entries: Vec<Entry>,
}

impl ActiveDocument {
    fn new(kind: InvoiceKind, config: &ExtractionConfig) -> Self {
        Self {
            header: HeaderParser::new(kind, config.credit_due_date),
            entry: EntryParser::new(kind, &config.units),
            entries: Vec::new(),
        }
    }

    fn into_invoice(self) -> Invoice {
        self.header.into_invoice(self.entries)
    }
}

/// Feeds page text through the dispatcher and both line parsers,
/// assembling invoices as they complete.
///
/// The configuration is snapshotted at construction, so a reload
/// between documents never changes a parse already under way.
pub struct DocumentParser {
    config: ExtractionConfig,
    current: Option<ActiveDocument>,
    completed: Vec<Invoice>,
}

impl DocumentParser {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            current: None,
            completed: Vec::new(),
        }
    }

    /// Feed one page of already-linearized text.
    pub fn process_page(&mut self, text: &str, stats: &mut RunStats) {
        for line in text.split('\n') {
            self.feed_line(line, stats);
        }
    }

    /// Feed a single line.
    ///
    /// A title marker is honored when no document is open yet, or when
    /// the previous header is already sealed; it then finishes the
    /// current invoice and opens a fresh document context. A bare id
    /// line without a preceding title never restarts a sealed header.
    pub fn feed_line(&mut self, line: &str, stats: &mut RunStats) {
        let dispatchable = match &self.current {
            None => true,
            Some(document) => document.header.is_sealed(),
        };
        if dispatchable {
            if let Some(kind) = classify(line) {
                debug!(?kind, "document title recognized");
                self.finish_current();
                self.current = Some(ActiveDocument::new(kind, &self.config));
                return;
            }
        }

        // Lines outside any document context are dropped.
        let Some(document) = self.current.as_mut() else {
            return;
        };

        match document.header.feed(line) {
            Ok(true) => stats.start_invoice(),
            Ok(false) => {}
            // Field-local failure: keep scanning the rest of the document.
            Err(err) => warn!(%err, line, "header field rejected"),
        }

        match document.entry.feed(line) {
            Ok(Some(entry)) => {
                document.entries.push(entry);
                stats.record_entry();
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "entry discarded"),
        }
    }

    fn finish_current(&mut self) {
        if let Some(document) = self.current.take() {
            self.completed.push(document.into_invoice());
        }
    }

    /// Finish the open document, if any, and return every invoice found
    /// in the stream in document order.
    pub fn finish(mut self) -> Vec<Invoice> {
        self.finish_current();
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn parse_lines(lines: &[&str]) -> (Vec<Invoice>, RunStats) {
        let mut stats = RunStats::new();
        let mut parser = DocumentParser::new(ExtractionConfig::default());
        for line in lines {
            parser.feed_line(line, &mut stats);
        }
        (parser.finish(), stats)
    }

    const STANDARD_DOC: &[&str] = &[
        "SZÁMLA",
        "Számla sorszáma:1234567890",
        "Számla kelte:2016.03.04",
        "12AB3456-789 Shoe Model",
        "X Pár 10 2500 5% 2375 23750 27%",
        "123456-789 Boot",
        "Classic Darab 2 1.250 0% 1.250 2.500 27%",
        "FIZETÉSI HATÁRIDÕ:2016.04.04 26.250",
    ];

    #[test]
    fn test_classify() {
        assert_eq!(classify("SZÁMLA"), Some(InvoiceKind::Standard));
        assert_eq!(classify("HELYESBÍTÕ SZÁMLA"), Some(InvoiceKind::Credit));
        assert_eq!(classify("whatever"), None);
    }

    #[test]
    fn test_standard_document_end_to_end() {
        let (invoices, stats) = parse_lines(STANDARD_DOC);

        assert_eq!(invoices.len(), 1);
        let invoice = &invoices[0];
        assert_eq!(invoice.kind, InvoiceKind::Standard);
        assert_eq!(invoice.id, 1234567890);
        assert_eq!(invoice.total, 26_250);
        assert_eq!(invoice.entries.len(), 2);
        assert_eq!(invoice.entries[0].code, "12AB3456-789");
        assert_eq!(invoice.entries[1].line_total, 2500);

        assert_eq!(stats.per_invoice(), &[2]);
    }

    #[test]
    fn test_credit_document_end_to_end() {
        let (invoices, stats) = parse_lines(&[
            "HELYESBÍTÕ SZÁMLA",
            "Helyesbítõ számla sorszáma2000000001",
            "Helyesbítõ számla kelte2016.05.06",
            "12AB3456-789 Shoe Model",
            "X Pár 10 2500- 5% 2375- 23750- 27%",
            "Eredeti számla sorszáma",
            "1234567890",
            "Adó részletezés",
            "27% 23.750- 5.049-",
        ]);

        assert_eq!(invoices.len(), 1);
        let invoice = &invoices[0];
        assert_eq!(invoice.kind, InvoiceKind::Credit);
        assert_eq!(invoice.reference_id, Some(1234567890));
        assert_eq!(invoice.total, -23_750);
        assert_eq!(
            invoice.due_date,
            NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()
        );
        assert_eq!(invoice.entries.len(), 1);
        assert_eq!(invoice.entries[0].line_total, -23_750);
        assert_eq!(stats.per_invoice(), &[1]);
    }

    #[test]
    fn test_bare_id_line_after_sealing_does_not_open_invoice() {
        let mut lines = STANDARD_DOC.to_vec();
        lines.push("Számla sorszáma:9999999999");

        let (invoices, stats) = parse_lines(&lines);
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].id, 1234567890);
        assert_eq!(stats.invoices(), 1);
    }

    #[test]
    fn test_second_title_starts_second_invoice() {
        let mut lines = STANDARD_DOC.to_vec();
        lines.extend_from_slice(&[
            "SZÁMLA",
            "Számla sorszáma:9999999999",
            "Számla kelte:2016.06.01",
            "12AB3456-789 Sandal",
            "Basic Pár 1 100 0% 100 100 27%",
            "FIZETÉSI HATÁRIDÕ:2016.07.01 100",
        ]);

        let (invoices, stats) = parse_lines(&lines);
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0].id, 1234567890);
        assert_eq!(invoices[1].id, 9999999999);
        assert_eq!(stats.per_invoice(), &[2, 1]);
    }

    #[test]
    fn test_unknown_document_type_is_skipped() {
        let (invoices, stats) = parse_lines(&[
            "RECEIPT",
            "Számla sorszáma:1234567890",
            "12AB3456-789 Shoe",
            "Pár 1 100 0% 100 100 27%",
        ]);
        assert!(invoices.is_empty());
        assert_eq!(stats.invoices(), 0);
    }

    #[test]
    fn test_mangled_entry_does_not_abort_document() {
        let (invoices, stats) = parse_lines(&[
            "SZÁMLA",
            "Számla sorszáma:1234567890",
            "Számla kelte:2016.03.04",
            "12AB3456-789 torn off",
            "and nothing matches here",
            "12AB3456-789 Shoe Model",
            "X Pár 10 2500 5% 2375 23750 27%",
            "FIZETÉSI HATÁRIDÕ:2016.04.04 23.750",
        ]);

        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].entries.len(), 1);
        assert_eq!(invoices[0].total, 23_750);
        assert_eq!(stats.per_invoice(), &[1]);
    }

    #[test]
    fn test_lines_split_across_pages() {
        let mut stats = RunStats::new();
        let mut parser = DocumentParser::new(ExtractionConfig::default());
        let (first, second) = STANDARD_DOC.split_at(4);
        parser.process_page(&first.join("\n"), &mut stats);
        parser.process_page(&second.join("\n"), &mut stats);

        let invoices = parser.finish();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].entries.len(), 2);
    }
}
