use chrono::NaiveDate;
use log::debug;
use regex::RegexBuilder;
use reqwest::Url;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use super::error::ScrapeError;

const SCHEDULE_PAGE: &str = "https://www.wtp.waw.pl/rozklady-jazdy/";

/// An anchor found on a schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub display_text: String,
}

/// URL of the schedule page listing the timetables of a train line.
pub fn schedule_url(line: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "{SCHEDULE_PAGE}?wtp_dt={}&wtp_md=3&wtp_ln={line}",
            date.format("%Y-%m-%d")
        ),
        None => format!("{SCHEDULE_PAGE}?wtp_md=3&wtp_ln={line}"),
    }
}

/// Anchor text announcing the timetable of a line.
/// The trailing space keeps line "S4" from matching "S40".
pub fn link_text(line: &str) -> String {
    format!("Rozkład jazdy linii {line} ")
}

/// Fetches a page and returns the anchors whose text contains `text`, ignoring case.
pub fn find_links(client: &Client, url: &str, text: &str) -> Result<Vec<Link>, ScrapeError> {
    let response = client
        .get(url)
        .send()
        .map_err(|err| ScrapeError::connection(url, err))?;
    let status = response.status();
    debug!("GET {url} -> {status}");
    if !status.is_success() {
        return Err(ScrapeError::connection(url, status));
    }
    let body = response
        .text()
        .map_err(|err| ScrapeError::connection(url, err))?;
    find_links_in_html(&body, text)
}

/// Returns the anchors of an HTML document whose text contains `text`, ignoring case,
/// in document order.
pub fn find_links_in_html(html: &str, text: &str) -> Result<Vec<Link>, ScrapeError> {
    let pattern = RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .build()
        .expect("escaped pattern is a valid regex");
    let anchor = Selector::parse("a").expect("static selector");

    let links: Vec<Link> = Html::parse_document(html)
        .select(&anchor)
        .filter_map(|element| {
            let display_text = element.text().collect::<String>();
            pattern.is_match(&display_text).then(|| Link {
                href: element.value().attr("href").unwrap_or_default().to_string(),
                display_text,
            })
        })
        .collect();

    if links.is_empty() {
        return Err(ScrapeError::LinkNotFound {
            text: text.to_string(),
        });
    }
    Ok(links)
}

/// Resolves a possibly relative `href` against the page it was found on.
pub fn resolve_href(page_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(page_url).ok()?;
    base.join(href.trim()).ok().map(String::from)
}

/// File name for a downloaded timetable: the anchor text plus `.pdf`.
pub fn pdf_file_name(link: &Link) -> String {
    let stem: String = link
        .display_text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    format!("{stem}.pdf")
}
