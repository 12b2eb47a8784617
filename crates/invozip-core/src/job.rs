//! End-to-end run orchestration: archive in, workbook out.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::archive;
use crate::error::{InvozipError, Result};
use crate::models::config::AppConfig;
use crate::models::invoice::Invoice;
use crate::parse::{DocumentParser, RunStats};
use crate::pdf;
use crate::workbook;

/// Outcome of a completed run.
pub struct JobReport {
    pub invoices: Vec<Invoice>,
    pub stats: RunStats,
    pub workbook_path: PathBuf,
}

/// Parse one PDF document into zero or more invoices.
pub fn parse_document(
    path: &Path,
    config: &AppConfig,
    stats: &mut RunStats,
) -> Result<Vec<Invoice>> {
    let pages = pdf::extract_page_text(path).map_err(|source| InvozipError::Document {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;

    let mut parser = DocumentParser::new(config.extraction.clone());
    for page in &pages {
        parser.process_page(page, stats);
    }
    Ok(parser.finish())
}

/// Run the whole pipeline: unpack the archive into a scratch directory,
/// parse every discovered PDF, emit the workbook, and clean up.
///
/// A document that fails to parse is logged and skipped; the run keeps
/// going with the remaining documents.
pub fn run(archive_path: &Path, output_dir: &Path, config: &AppConfig) -> Result<JobReport> {
    run_with_progress(archive_path, output_dir, config, |_, _, _| {})
}

/// Like [`run`], invoking `on_document(index, total, path)` before each
/// document is parsed so callers can report progress.
pub fn run_with_progress(
    archive_path: &Path,
    output_dir: &Path,
    config: &AppConfig,
    mut on_document: impl FnMut(usize, usize, &Path),
) -> Result<JobReport> {
    let work_dir = output_dir.join(&config.job.tmp_dir);
    archive::reset_work_dir(&work_dir)?;
    archive::extract_zip(archive_path, &work_dir)?;

    let documents = archive::find_documents(&work_dir, &config.job.file_extension);
    info!(count = documents.len(), "documents queued");

    let mut stats = RunStats::new();
    let mut invoices = Vec::new();
    for (index, document) in documents.iter().enumerate() {
        on_document(index, documents.len(), document);
        match parse_document(document, config, &mut stats) {
            Ok(parsed) => invoices.extend(parsed),
            Err(err) => warn!(%err, path = %document.display(), "document skipped"),
        }
    }

    archive::cleanup_work_dir(&work_dir)?;

    let workbook_path = output_dir.join(&config.output.workbook_name);
    workbook::write_workbook(&invoices, &workbook_path, &config.output)?;
    info!(
        invoices = stats.invoices(),
        entries = stats.entries_total(),
        workbook = %workbook_path.display(),
        "run finished"
    );

    Ok(JobReport {
        invoices,
        stats,
        workbook_path,
    })
}
