//! Page-metadata scrape through a CORS-relay proxy.
//!
//! The relay wraps the target page in a JSON envelope
//! (`{"contents": "<html>..."}`), which sidesteps the target's own CORS
//! and frame policies. Title and description come out of the raw HTML
//! with regexes; this is a best-effort scrape, not a real HTML parse.

use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use previewdeck_ingest::{MetadataError, MetadataSource, PageMetadata};

use crate::error::ClientError;

pub const DEFAULT_PROXY_BASE: &str = "https://api.allorigins.win";

/// Relay response envelope. Fields other than `contents` are ignored.
#[derive(Deserialize)]
struct RelayEnvelope {
    contents: Option<String>,
}

pub struct MetadataClient {
    http: reqwest::blocking::Client,
    proxy_base: String,
}

impl MetadataClient {
    pub fn new(proxy_base: &str, timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("pdeck/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            proxy_base: proxy_base.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the target page through the relay and scrape its metadata.
    ///
    /// A page with no `<title>` still succeeds (the domain stands in);
    /// relay or envelope failures are errors for the caller to contain.
    pub fn fetch_page(&self, target_url: &str) -> Result<PageMetadata, ClientError> {
        let encoded: String = url::form_urlencoded::byte_serialize(target_url.as_bytes()).collect();
        let proxy_url = format!("{}/get?url={}", self.proxy_base, encoded);

        let response = self
            .http
            .get(&proxy_url)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Http(status, body));
        }

        let envelope: RelayEnvelope = response
            .json()
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        let contents = envelope
            .contents
            .ok_or_else(|| ClientError::Parse("relay envelope has no contents".into()))?;

        let title = scrape_title(&contents).unwrap_or_else(|| domain_of(target_url));
        let description = scrape_description(&contents);

        Ok(PageMetadata { title, description })
    }
}

impl MetadataSource for MetadataClient {
    fn fetch(&self, url: &str) -> Result<PageMetadata, MetadataError> {
        self.fetch_page(url).map_err(|e| MetadataError(e.to_string()))
    }
}

// ── Scraping helpers ────────────────────────────────────────────────

fn scrape_title(html: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
    re.captures(html)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

/// `meta name="description"`, falling back to `property="og:description"`.
fn scrape_description(html: &str) -> Option<String> {
    meta_content(html, "name", "description")
        .or_else(|| meta_content(html, "property", "og:description"))
}

fn meta_content(html: &str, attr: &str, value: &str) -> Option<String> {
    let tag_re = Regex::new(r"(?is)<meta\s[^>]*>").unwrap();
    let key_re = Regex::new(&format!(r#"(?is){attr}\s*=\s*["']{value}["']"#)).unwrap();
    let content_re = Regex::new(r#"(?is)content\s*=\s*["']([^"']*)["']"#).unwrap();

    for tag in tag_re.find_iter(html) {
        if key_re.is_match(tag.as_str()) {
            if let Some(caps) = content_re.captures(tag.as_str()) {
                let content = caps[1].trim().to_string();
                if !content.is_empty() {
                    return Some(content);
                }
            }
        }
    }
    None
}

fn domain_of(raw: &str) -> String {
    url::Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
        .unwrap_or_else(|| raw.to_string())
}
