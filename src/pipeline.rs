use indicatif::ProgressIterator;
use log::{debug, error, info, warn};
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};

use super::config::Config;
use super::download::download_file;
use super::error::ScrapeError;
use super::links::{find_links, link_text, pdf_file_name, resolve_href};
use super::pdf_text::read_lines;
use super::timetable::extract_timetable;
use super::utils::{append_text, progress_bar_for_count};

/// Downloads the timetables of every configured line, looking each one up on the page
/// given by `page_url`. Returns the number of new files.
///
/// Connection failures and missing links are logged and the next line is tried.
pub fn download_timetables(
    client: &Client,
    config: &Config,
    download_dir: &Path,
    page_url: impl Fn(&str) -> String,
) -> usize {
    let mut downloaded = 0;
    for line in &config.train_lines {
        match download_line(client, config, download_dir, line, &page_url(line)) {
            Ok(count) => downloaded += count,
            Err(err) if err.is_recoverable_per_line() => {
                warn!("Skipping line {line}: {err}");
            }
            Err(err) => error!("Skipping line {line}: {err}"),
        }
    }
    downloaded
}

fn download_line(
    client: &Client,
    config: &Config,
    download_dir: &Path,
    line: &str,
    url: &str,
) -> Result<usize, ScrapeError> {
    info!("Looking for the timetable of line {line}...");
    let text = link_text(line);
    debug!("url={url}");
    debug!("text={text:?}");

    let links = find_links(client, url, &text)?;
    let mut downloaded = 0;
    for link in links {
        let filename = pdf_file_name(&link);
        if download_dir.join(&filename).exists() {
            info!("File '{filename}' already exists.");
            continue;
        }
        let Some(file_url) = resolve_href(url, &link.href).filter(|_| !link.href.is_empty())
        else {
            warn!("Link '{}' has no usable address", link.display_text.trim());
            continue;
        };
        match download_file(client, &file_url, download_dir, &filename, config.latency()) {
            Ok(_) => downloaded += 1,
            Err(err) => warn!("Could not download '{filename}': {err}"),
        }
    }
    info!("Finished looking for the timetable of line {line}.");
    Ok(downloaded)
}

/// Extracts the configured stations from every PDF in the download directory and
/// appends them to the output file. Returns the number of blocks written.
///
/// Re-running appends the same blocks again.
pub fn extract_timetables(config: &Config, download_dir: &Path, output_path: &Path) -> usize {
    let pdfs = match list_pdfs(download_dir) {
        Ok(pdfs) => pdfs,
        Err(err) => {
            error!("Cannot list {}: {err}", download_dir.display());
            return 0;
        }
    };
    info!(
        "Extracting {} stations from {} files...",
        config.train_stations.len(),
        pdfs.len()
    );

    let mut written = 0;
    let progress = progress_bar_for_count(pdfs.len());
    for pdf in pdfs.iter().progress_with(progress) {
        let lines = match read_lines(pdf) {
            Ok(lines) => lines,
            Err(err) => {
                error!("Skipping {}: {err}", pdf.display());
                continue;
            }
        };
        written += append_station_timetables(&lines, &config.train_stations, output_path);
    }
    written
}

/// Appends one timetable block per station. Write failures skip the station.
pub fn append_station_timetables<S: AsRef<str>>(
    lines: &[S],
    stations: &[String],
    output_path: &Path,
) -> usize {
    let mut written = 0;
    for station in stations {
        let timetable = extract_timetable(station, lines);
        match append_text(output_path, &timetable) {
            Ok(()) => written += 1,
            Err(err) => error!("Could not write the timetable of {station}: {err}"),
        }
    }
    written
}

/// PDF files of a directory, sorted by name. A missing directory has none.
pub fn list_pdfs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut pdfs = Vec::new();
    for entry in fs_err::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}
