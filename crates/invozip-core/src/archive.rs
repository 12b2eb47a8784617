//! Zip extraction, work-directory lifecycle, and document discovery.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::Result;

/// Recreate the work directory, wiping any leftovers from a prior run.
pub fn reset_work_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Remove the work directory after a run.
pub fn cleanup_work_dir(dir: &Path) -> Result<()> {
    fs::remove_dir_all(dir)?;
    Ok(())
}

/// Extract every file from the archive into the target directory.
pub fn extract_zip(archive_path: &Path, target: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    archive.extract(target)?;
    info!(
        archive = %archive_path.display(),
        files = archive.len(),
        "archive extracted"
    );
    Ok(())
}

/// Collect every file under `root` whose name ends with `suffix`,
/// recursing into subdirectories. Order is not significant to the core.
pub fn find_documents(root: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(suffix)
        {
            found.push(entry.into_path());
        }
    }
    debug!(root = %root.display(), count = found.len(), "documents discovered");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reset_work_dir_wipes_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let work = dir.path().join("work");

        fs::create_dir_all(work.join("old")).unwrap();
        fs::write(work.join("old/stale.pdf"), b"stale").unwrap();

        reset_work_dir(&work).unwrap();
        assert!(work.exists());
        assert!(!work.join("old").exists());
    }

    #[test]
    fn test_find_documents_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested/deep")).unwrap();
        fs::write(dir.path().join("a.pdf"), b"").unwrap();
        fs::write(dir.path().join("nested/b.pdf"), b"").unwrap();
        fs::write(dir.path().join("nested/deep/c.pdf"), b"").unwrap();
        fs::write(dir.path().join("nested/readme.txt"), b"").unwrap();

        let mut found = find_documents(dir.path(), ".pdf");
        found.sort();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_zip_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("src.zip");

        // Build a small archive with one nested file.
        let file = File::create(&archive_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("inner/doc.pdf", options).unwrap();
        writer.write_all(b"not really a pdf").unwrap();
        writer.finish().unwrap();

        let target = dir.path().join("out");
        extract_zip(&archive_path, &target).unwrap();

        let extracted = target.join("inner/doc.pdf");
        assert_eq!(fs::read(extracted).unwrap(), b"not really a pdf");
    }

    #[test]
    fn test_missing_archive_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_zip(&dir.path().join("absent.zip"), dir.path());
        assert!(result.is_err());
    }
}
