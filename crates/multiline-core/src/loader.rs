// File: crates/multiline-core/src/loader.rs
// Summary: Fetch raw TSV text from a file or http(s) URL with bounded retry and backoff.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::LoaderOptions;
use crate::dataset::Dataset;
use crate::error::{Error, LoadFailure, Result};

/// Where the raw data lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// `http://` and `https://` locations are URLs; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(raw.trim().to_string())
        } else {
            Source::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(p) => write!(f, "{}", p.display()),
            Source::Url(u) => f.write_str(u),
        }
    }
}

/// Read the whole source as text, retrying failed attempts.
pub fn load_text(source: &Source, opts: &LoaderOptions) -> Result<String> {
    match source {
        Source::File(path) => with_retries(source, opts, || fetch_file(path)),
        Source::Url(url) => {
            // Built on first use so a client failure counts as an attempt.
            let mut client: Option<Client> = None;
            with_retries(source, opts, || {
                let client = match client.take() {
                    Some(c) => client.insert(c),
                    None => client.insert(Client::builder().timeout(opts.timeout()).build()?),
                };
                fetch_url(client, url)
            })
        }
    }
}

/// Load and parse a dataset, labelling its value axis with `label`.
pub fn load_dataset(source: &Source, opts: &LoaderOptions, label: &str) -> Result<Dataset> {
    let text = load_text(source, opts)?;
    Dataset::parse_tsv_with_label(&text, label)
}

/// Run `fetch` until it succeeds or `max_attempts` (at least one) is spent.
fn with_retries<F>(source: &Source, opts: &LoaderOptions, mut fetch: F) -> Result<String>
where
    F: FnMut() -> std::result::Result<String, LoadFailure>,
{
    let attempts = opts.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match fetch() {
            Ok(text) => {
                debug!(source = %source, attempt, bytes = text.len(), "loaded source");
                return Ok(text);
            }
            Err(failure) if attempt < attempts => {
                let delay = opts.backoff(attempt);
                warn!(source = %source, attempt, error = %failure, delay_ms = delay.as_millis() as u64, "load failed; retrying");
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(failure) => {
                return Err(Error::Load { location: source.to_string(), attempts: attempt, source: failure });
            }
        }
    }
}

fn fetch_file(path: &Path) -> std::result::Result<String, LoadFailure> {
    Ok(std::fs::read_to_string(path)?)
}

fn fetch_url(client: &Client, url: &str) -> std::result::Result<String, LoadFailure> {
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadFailure::Status(status.as_u16()));
    }
    Ok(resp.text()?)
}
