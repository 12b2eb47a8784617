//! Line-oriented invoice parsing core.
//!
//! A PDF page arrives as already-linearized text lines; two small state
//! machines consume the same line stream in lockstep under a document
//! driver: the header parser walks a fixed field sequence, the entry
//! parser reassembles line items wrapped across two physical lines.

pub mod document;
pub mod entry;
pub mod header;
pub mod normalize;
pub mod patterns;
pub mod stats;

pub use document::{classify, DocumentParser};
pub use entry::EntryParser;
pub use header::HeaderParser;
pub use normalize::{parse_amount, parse_date, parse_percent};
pub use stats::RunStats;
