mod config;
mod download;
mod error;
mod links;
mod pdf_text;
mod pipeline;
#[cfg(test)]
mod test_server;
mod timetable;
mod utils;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use config::Config;

#[derive(Parser)]
struct Args {
    #[clap(long, default_value = "config.yaml")]
    config: PathBuf,
    /// Ask for the timetables valid on this day (YYYY-MM-DD)
    #[clap(long, conflicts_with = "today")]
    date: Option<NaiveDate>,
    /// Ask for the timetables valid today
    #[clap(long)]
    today: bool,
    /// Use this directory instead of the one on the desktop
    #[clap(long)]
    download_dir: Option<PathBuf>,
    #[clap(long)]
    skip_download: bool,
    #[clap(long)]
    skip_extract: bool,
    #[clap(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::load(&args.config)?;
    let download_dir = config.download_dir(args.download_dir.as_deref());
    let output_path = config.output_path(&download_dir);
    let date = match args.date {
        Some(date) => Some(date),
        None if args.today => Some(Local::now().date_naive()),
        None => None,
    };
    info!("Timetables directory: {}", download_dir.display());

    if !args.skip_download {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let downloaded = pipeline::download_timetables(&client, &config, &download_dir, |line| {
            links::schedule_url(line, date)
        });
        info!("Downloaded {downloaded} new timetables");
    }

    if !args.skip_extract {
        let written = pipeline::extract_timetables(&config, &download_dir, &output_path);
        info!("Wrote {written} timetables to {}", output_path.display());
    }

    Ok(())
}
