//! Input source resolution: local files or HTTP(S) downloads.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::analyzers::types::StudentRecord;
use crate::error::IngestError;
use crate::parser::{is_gzip_name, maybe_gunzip, parse_file, read_records};

/// Where student records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// Strings starting with `http://` or `https://` are URLs; anything else
    /// is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

/// Blocking HTTP transport used to download remote sources.
pub trait HttpClient {
    fn get_bytes(&self, url: &str) -> reqwest::Result<Vec<u8>>;
}

/// [`HttpClient`] backed by `reqwest`'s blocking client.
#[derive(Default)]
pub struct BasicClient(reqwest::blocking::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::blocking::Client::new())
    }
}

impl HttpClient for BasicClient {
    fn get_bytes(&self, url: &str) -> reqwest::Result<Vec<u8>> {
        let resp = self.0.get(url).send()?.error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }
}

/// Downloads the full body at `url`.
pub fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, IngestError> {
    let bytes = client.get_bytes(url).map_err(|source| IngestError::Fetch {
        url: url.to_string(),
        source,
    })?;
    debug!(url, bytes = bytes.len(), "Source downloaded");
    Ok(bytes)
}

/// Reads every student record from `source`.
pub fn load_records<C: HttpClient>(
    source: &Source,
    client: &C,
) -> Result<Vec<StudentRecord>, IngestError> {
    match source {
        Source::File(path) => parse_file(path),
        Source::Url(url) => {
            let bytes = fetch_bytes(client, url)?;
            read_records(maybe_gunzip(bytes.as_slice(), is_gzip_name(url)), url)
        }
    }
}
