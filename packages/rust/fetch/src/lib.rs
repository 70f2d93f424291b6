//! HTTP retrieval of source filing documents.
//!
//! One GET per document with a static `User-Agent` and a bounded timeout.
//! Any transport error, timeout, or non-success status is an error for that
//! document; there are no retries. Bodies are transcoded to UTF-8 following
//! the byte order mark or the XML declaration's `encoding`.

use std::time::Duration;

use filingdigest_shared::{AppConfig, FilingDigestError, Result};
use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Maximum number of redirects to follow for a document URL.
const MAX_REDIRECTS: usize = 10;

/// Maximum response size we accept (32 MiB).
const MAX_RESPONSE_SIZE: u64 = 32 * 1024 * 1024;

/// How far into the body to look for an XML declaration.
const DECLARATION_SCAN_LIMIT: usize = 256;

// ---------------------------------------------------------------------------
// FetchOptions
// ---------------------------------------------------------------------------

/// Request settings shared by every document fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.http.user_agent.clone(),
            timeout_secs: config.http.timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentFetcher
// ---------------------------------------------------------------------------

/// Reusable HTTP client for source documents.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    /// Build the underlying client from `opts`.
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| {
                FilingDigestError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// Fetch `url` and return its body as text.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = parse_document_url(url)?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FilingDigestError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FilingDigestError::Network(format!("{url}: HTTP {status}")));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_SIZE {
                return Err(FilingDigestError::validation(format!(
                    "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
                )));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FilingDigestError::Network(format!("{url}: failed to read body: {e}")))?;

        debug!(status = status.as_u16(), bytes = body.len(), "document fetched");

        decode_body(url, &body)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a document URL, accepting only `http` and `https`.
fn parse_document_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| FilingDigestError::validation(format!("invalid URL '{url}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FilingDigestError::validation(format!(
            "unsupported URL scheme '{other}' in '{url}'"
        ))),
    }
}

/// Decode a response body to text.
///
/// A byte order mark wins over the declaration; with neither, UTF-8 is assumed.
fn decode_body(url: &str, body: &[u8]) -> Result<String> {
    let (encoding, bom_len) = Encoding::for_bom(body)
        .unwrap_or_else(|| (declared_encoding(body).unwrap_or(UTF_8), 0));

    let (text, had_errors) = encoding.decode_without_bom_handling(&body[bom_len..]);
    if had_errors {
        return Err(FilingDigestError::parse(format!(
            "{url}: body is not valid {}",
            encoding.name()
        )));
    }

    Ok(text.into_owned())
}

/// Encoding named by a leading `<?xml ... encoding="..."?>` declaration.
///
/// Only ASCII-compatible encodings count: a declaration readable as ASCII
/// cannot be in UTF-16.
fn declared_encoding(body: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&body[..body.len().min(DECLARATION_SCAN_LIMIT)]);
    let declaration = head.strip_prefix("<?xml")?;
    let declaration = &declaration[..declaration.find("?>")?];

    let after_key = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let value = after_key.trim_start().strip_prefix('=')?.trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &value[1..];
    let label = &value[..value.find(quote)?];

    Encoding::for_label(label.as_bytes()).filter(|e| e.is_ascii_compatible())
}
