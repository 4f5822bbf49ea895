use fs_err::OpenOptions;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;

/// Creates a progress bar for monitoring function progress.
pub fn progress_bar_for_count(count: usize) -> ProgressBar {
    ProgressBar::new(count as u64).with_style(ProgressStyle::with_template(
        "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {human_pos}/{human_len} ({per_sec}, {eta})").unwrap())
}

/// Creates a progress bar for a download, falling back to a spinner when the size is unknown.
pub fn progress_bar_for_bytes(total: Option<u64>, name: &str) -> ProgressBar {
    let progress = match total {
        Some(length) => ProgressBar::new(length).with_style(ProgressStyle::with_template(
            "{msg} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})").unwrap()),
        None => ProgressBar::new_spinner().with_style(ProgressStyle::with_template(
            "{msg} {spinner} {bytes} ({bytes_per_sec})").unwrap()),
    };
    progress.with_message(name.to_string())
}

/// Appends text to a file, creating it first if needed.
pub fn append_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
}
