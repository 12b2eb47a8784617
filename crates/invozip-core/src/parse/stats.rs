//! Run statistics collector.

use std::fmt;

/// Append-only tally of invoices and their entry counts across one run.
///
/// A new counter is pushed when an invoice header begins; the last
/// counter is incremented when an entry completes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    per_invoice: Vec<u32>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a counter for a newly recognized invoice.
    pub fn start_invoice(&mut self) {
        self.per_invoice.push(0);
    }

    /// Count one completed entry against the current invoice. Ignored
    /// when no invoice has started yet.
    pub fn record_entry(&mut self) {
        if let Some(current) = self.per_invoice.last_mut() {
            *current += 1;
        }
    }

    /// Number of invoices started.
    pub fn invoices(&self) -> usize {
        self.per_invoice.len()
    }

    /// Total entries across all invoices.
    pub fn entries_total(&self) -> u32 {
        self.per_invoice.iter().sum()
    }

    /// Entry counts, one element per invoice in start order.
    pub fn per_invoice(&self) -> &[u32] {
        &self.per_invoice
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} invoices, {} entries {:?}",
            self.invoices(),
            self.entries_total(),
            self.per_invoice
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_start_and_record() {
        let mut stats = RunStats::new();
        stats.start_invoice();
        stats.record_entry();
        stats.record_entry();
        stats.start_invoice();
        stats.record_entry();

        assert_eq!(stats.invoices(), 2);
        assert_eq!(stats.per_invoice(), &[2, 1]);
        assert_eq!(stats.entries_total(), 3);
    }

    #[test]
    fn test_entry_before_any_invoice_is_dropped() {
        let mut stats = RunStats::new();
        stats.record_entry();
        assert_eq!(stats.invoices(), 0);
        assert_eq!(stats.entries_total(), 0);
    }
}
