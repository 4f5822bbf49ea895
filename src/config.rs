use anyhow::{Context, Result, bail};
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Run settings, loaded once and passed down by reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub train_lines: Vec<String>,
    pub train_stations: Vec<String>,
    /// Directory for the downloaded PDFs, relative to the user's desktop
    pub download_dir_name: String,
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,
    /// Pause after every download attempt, in seconds
    #[serde(default = "default_download_latency")]
    pub download_latency: f64,
}

fn default_output_file_name() -> String {
    "rozklady.txt".to_string()
}

fn default_download_latency() -> f64 {
    0.75
}

impl Config {
    /// Reads the configuration, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs_err::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&raw),
            _ => Self::from_yaml_str(&raw),
        }
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn validate(&self) -> Result<()> {
        if !self.download_latency.is_finite() || self.download_latency < 0.0 {
            bail!(
                "download_latency must be a non-negative number of seconds, got {}",
                self.download_latency
            );
        }
        if self.train_lines.is_empty() {
            warn!("No train lines configured, nothing will be downloaded");
        }
        if self.train_stations.is_empty() {
            warn!("No train stations configured, nothing will be extracted");
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_secs_f64(self.download_latency)
    }

    /// `<desktop>/<download_dir_name>`, unless an explicit directory is given.
    pub fn download_dir(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(dir) => dir.to_path_buf(),
            None => desktop_dir().join(&self.download_dir_name),
        }
    }

    /// The output file sits next to the downloaded PDFs.
    pub fn output_path(&self, download_dir: &Path) -> PathBuf {
        download_dir.join(&self.output_file_name)
    }
}

fn desktop_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
        .unwrap_or_else(|| PathBuf::from("."))
}
