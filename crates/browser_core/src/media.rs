//! Checks that a video reference can actually be loaded.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use url::Url;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid video reference {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported video scheme {0}")]
    UnsupportedScheme(String),
    #[error("video host unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("video host answered with status {0}")]
    Status(reqwest::StatusCode),
}

pub fn parse_video_url(raw: &str) -> Result<Url, MediaError> {
    let url = Url::parse(raw).map_err(|source| MediaError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(MediaError::UnsupportedScheme(other.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct MediaProbe {
    http: Client,
}

impl MediaProbe {
    pub fn new(timeout: Duration) -> Result<Self, MediaError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Fetches the reference and treats any non-success status as a load failure.
    pub async fn probe(&self, raw: &str) -> Result<(), MediaError> {
        let url = parse_video_url(raw)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::Status(status));
        }
        tracing::debug!(url = raw, %status, "video reference reachable");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/media_tests.rs"]
mod tests;
