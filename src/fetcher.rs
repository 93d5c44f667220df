//! Rule provider download.
//!
//! The transport is abstracted behind [`Fetch`] so the merger can be driven by
//! any source of text; [`HttpFetcher`] is the blocking `reqwest` implementation.
//! [`fetch_provider_lines`] wraps a transport with the provider-level contract:
//! failures are logged and yield no lines, never an error.

use flate2::read::GzDecoder;
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;

use crate::{Error, Result};

/// Default request timeout for provider downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Source of provider content.
pub trait Fetch {
    /// Fetch the text content behind `url`, or report why it could not be fetched.
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP(S) fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, None)
    }

    /// Create a fetcher with a custom timeout and optional User-Agent.
    pub fn with_options(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().timeout(timeout);
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes()?;
        decode_body(&body)
    }
}

/// Decode a response body into text, transparently gunzipping it.
pub fn decode_body(data: &[u8]) -> Result<String> {
    let data = if is_gzip(data) {
        let mut decoder = GzDecoder::new(data);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|e| Error::Decode(format!("gzip decompression failed: {}", e)))?;
        out
    } else {
        data.to_vec()
    };

    String::from_utf8(data).map_err(|e| Error::Decode(format!("body is not UTF-8: {}", e)))
}

/// Check if data is gzip compressed.
fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b
}

/// Rule provider payload structure.
#[derive(Debug, Deserialize)]
struct ProviderPayload {
    #[serde(default)]
    payload: Vec<String>,
}

/// Split provider content into trimmed, non-empty, non-comment lines.
///
/// Content in Clash's `payload:` YAML form is unwrapped to its entries.
pub fn split_provider_lines(content: &str) -> Vec<String> {
    if let Some(entries) = yaml_payload(content) {
        return entries
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty() && !e.starts_with('#'))
            .map(str::to_string)
            .collect();
    }

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn yaml_payload(content: &str) -> Option<Vec<String>> {
    let has_payload_key = content
        .lines()
        .any(|line| line.trim_start().starts_with("payload:"));
    if !has_payload_key {
        return None;
    }

    match serde_yaml::from_str::<ProviderPayload>(content) {
        Ok(p) => Some(p.payload),
        Err(e) => {
            log::debug!("payload: key present but not YAML, using plain lines: {}", e);
            None
        }
    }
}

/// Fetch a provider and split it into lines.
///
/// Any failure is logged and produces `None`, which callers treat as a
/// provider with no lines.
pub fn fetch_provider_lines<F: Fetch + ?Sized>(fetcher: &F, url: &str) -> Option<Vec<String>> {
    log::info!("Downloading rule provider: {}", url);
    match fetcher.fetch(url) {
        Ok(content) => {
            let lines = split_provider_lines(&content);
            log::debug!("Fetched {} lines from {}", lines.len(), url);
            Some(lines)
        }
        Err(e) => {
            log::warn!("Failed to download {}: {}", url, e);
            None
        }
    }
}
