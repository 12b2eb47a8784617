//! Core library for zipped-invoice extraction.
//!
//! This crate provides:
//! - Archive handling (zip extraction, work-directory lifecycle)
//! - PDF page-text access
//! - Line-oriented invoice parsing (standard and credit variants)
//! - XLSX workbook emission
//! - The end-to-end run pipeline

pub mod archive;
pub mod error;
pub mod job;
pub mod models;
pub mod parse;
pub mod pdf;
pub mod workbook;

pub use error::{InvozipError, ParseError, Result};
pub use job::{parse_document, run, run_with_progress, JobReport};
pub use models::config::{AppConfig, ExtractionConfig, JobConfig, OutputConfig};
pub use models::invoice::{Entry, Invoice, InvoiceKind};
pub use parse::{DocumentParser, RunStats};
pub use workbook::write_workbook;
