use log::{debug, info};
use reqwest::blocking::Client;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use super::error::ScrapeError;
use super::utils::progress_bar_for_bytes;

const CHUNK_SIZE: usize = 1024;

/// Streams `url` into `downloads_dir/filename`, then pauses for `latency`.
///
/// The pause happens after failed attempts too, so consecutive downloads stay throttled.
/// A failure part-way through the body leaves the partial file behind.
pub fn download_file(
    client: &Client,
    url: &str,
    downloads_dir: &Path,
    filename: &str,
    latency: Duration,
) -> Result<PathBuf, ScrapeError> {
    let result = stream_to_file(client, url, downloads_dir, filename);
    sleep(latency);
    result
}

fn stream_to_file(
    client: &Client,
    url: &str,
    downloads_dir: &Path,
    filename: &str,
) -> Result<PathBuf, ScrapeError> {
    debug!("file_url={url}");
    let mut response = client
        .get(url)
        .send()
        .map_err(|err| ScrapeError::connection(url, err))?;
    if !response.status().is_success() {
        return Err(ScrapeError::connection(url, response.status()));
    }

    let file_length = response.content_length();
    debug!("file_length={file_length:?}");
    let download_path = downloads_dir.join(filename);
    debug!("download_path={}", download_path.display());
    fs_err::create_dir_all(downloads_dir)?;

    info!("Starting download of '{filename}'...");
    let mut file = fs_err::File::create(&download_path)?;
    let progress = progress_bar_for_bytes(file_length, filename);
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let size = response
            .read(&mut chunk)
            .map_err(|err| ScrapeError::connection(url, err))?;
        if size == 0 {
            break;
        }
        file.write_all(&chunk[..size])?;
        progress.inc(size as u64);
    }
    file.flush()?;
    progress.finish();
    info!("Downloaded '{filename}'.");
    Ok(download_path)
}
