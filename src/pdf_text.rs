//! Text lines of a downloaded timetable PDF.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::error::ScrapeError;

/// Reads a PDF and returns the text lines of all its pages, in page order.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ScrapeError> {
    let data = fs_err::read(path)?;
    let pages = extract_pages(&data).map_err(|message| ScrapeError::Pdf {
        path: path.to_path_buf(),
        message,
    })?;
    Ok(pages_to_lines(&pages))
}

/// `pdf_extract` panics on some malformed files instead of returning an error.
/// The panic becomes an error here, but the process-wide panic hook still prints its
/// message to stderr; swapping the hook is not safe while other threads may panic.
fn extract_pages(data: &[u8]) -> Result<Vec<String>, String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(err)) => Err(err.to_string()),
        Err(_) => Err("extraction panicked (malformed document)".to_string()),
    }
}

/// Splits rendered pages into one flat sequence of lines.
/// Blank lines carry no layout information and are dropped, trailing spaces are trimmed.
pub fn pages_to_lines<S: AsRef<str>>(pages: &[S]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| page.as_ref().lines())
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
