//! Document loading: PDF bytes in, raw text out.
//!
//! Extraction runs on the blocking pool. A PDF that parses but carries no text is
//! not an error: it comes back empty and scores degrade towards zero downstream.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;

/// One uploaded or loaded PDF, reduced to its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File name, used for display and as the ranking key.
    pub label: String,
    pub text: String,
}

/// Extracts the concatenated page text of a PDF.
/// Bytes that are not a readable PDF are a validation error.
pub async fn extract_pdf_text(label: &str, bytes: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        // a panic inside the extractor surfaces as a JoinError
        .map_err(|e| AppError::Validation(format!("'{label}' is not a readable PDF ({e})")))?
        .map_err(|e| AppError::Validation(format!("'{label}' is not a readable PDF: {e}")))?;

    if text.trim().is_empty() {
        warn!("No text could be extracted from '{label}'; its scores will degrade");
    }

    Ok(text)
}

/// Job descriptions read from a directory.
#[derive(Debug, Default)]
pub struct JobDescriptionSet {
    pub documents: Vec<Document>,
    /// Labels of `.pdf` files found but not readable.
    pub skipped: Vec<String>,
}

/// Loads every job-description PDF in `dir`, sorted by file name.
/// Unreadable files are skipped with a warning and reported in `skipped`.
pub async fn load_job_descriptions(dir: &Path) -> Result<JobDescriptionSet, AppError> {
    let paths = find_pdf_files(dir).await?;
    let mut loaded = JobDescriptionSet {
        documents: Vec::with_capacity(paths.len()),
        skipped: Vec::new(),
    };

    for path in paths {
        let label = file_label(&path);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => {
                warn!("Skipping job description '{label}': {e}");
                loaded.skipped.push(label);
                continue;
            }
        };

        match extract_pdf_text(&label, bytes).await {
            Ok(text) => loaded.documents.push(Document { label, text }),
            Err(e) => {
                warn!("Skipping job description '{label}': {e}");
                loaded.skipped.push(label);
            }
        }
    }

    info!(
        "Loaded {} job description(s) from {}, {} skipped",
        loaded.documents.len(),
        dir.display(),
        loaded.skipped.len()
    );
    Ok(loaded)
}

/// Non-recursive scan for files with a `.pdf` extension. Symlinks are followed.
pub async fn find_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "Job description directory '{}' does not exist",
                dir.display()
            )));
        }
        Err(e) => {
            return Err(AppError::Internal(anyhow::Error::new(e).context(format!(
                "Failed to read job description directory '{}'",
                dir.display()
            ))));
        }
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to scan '{}'", dir.display()))?
    {
        let path = entry.path();
        if !is_pdf(&path) {
            continue;
        }
        // fs::metadata follows symlinks; DirEntry::file_type does not
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => paths.push(path),
            Ok(_) => warn!("Ignoring '{}': not a regular file", path.display()),
            Err(e) => warn!("Ignoring '{}': {e}", path.display()),
        }
    }

    paths.sort();
    Ok(paths)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
