//! Time-bounded fetching of the letterhead logo.
//!
//! The logo is a nice-to-have: any failure here (timeout, HTTP error,
//! oversized body) is logged and degrades to rendering without a logo.
//! It must never stall or fail the invoice itself.

use std::time::Duration;

use tracing::{debug, warn};

use remit_shared::config::RenderSettings;

use super::error::RenderError;

/// Fetches logo images over HTTP with a hard timeout and size cap.
#[derive(Debug, Clone)]
pub struct LogoFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl LogoFetcher {
    /// Create a fetcher from renderer settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(settings: &RenderSettings) -> Result<Self, RenderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.logo_timeout_secs))
            .build()
            .map_err(|e| RenderError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_bytes: settings.logo_max_bytes,
        })
    }

    /// Fetch the logo bytes, or `None` when the asset is unavailable.
    ///
    /// Failures are logged at warn level and swallowed; the render
    /// proceeds without the logo block. The body is streamed and the
    /// fetch aborts as soon as the size cap is crossed, so a response
    /// without a `Content-Length` header cannot buffer unbounded memory.
    pub async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let mut response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(%url, %error, "logo fetch failed; rendering without logo");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(%url, status = %response.status(), "logo fetch returned non-success; rendering without logo");
            return None;
        }

        if let Some(length) = response.content_length()
            && length > self.max_bytes
        {
            warn!(%url, length, max = self.max_bytes, "logo too large; rendering without logo");
            return None;
        }

        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if body.len() as u64 + chunk.len() as u64 > self.max_bytes {
                        warn!(%url, max = self.max_bytes, "logo too large; rendering without logo");
                        return None;
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(error) => {
                    warn!(%url, %error, "logo body read failed; rendering without logo");
                    return None;
                }
            }
        }

        debug!(%url, size = body.len(), "logo fetched");
        Some(body)
    }
}
