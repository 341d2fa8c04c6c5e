//! Client for the external live events feed.
//!
//! The feed is served by two endpoints: `/api/live-events` and, when that
//! fails, `/api/events/today`. Both return the same SportsDB-shaped
//! envelope, which is normalized here into `le_core` records.

mod wire;

use std::fmt;
use std::time::Duration;

use le_core::{Channel, EventRecord};
use reqwest::header::CACHE_CONTROL;
use thiserror::Error;

pub use wire::{ApiResponse, SportsDbEvent, classify_status, collect_channels};

/// Default request timeout for feed calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Feed client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The provided base URL was unusable.
    #[error("invalid base URL: {reason}")]
    InvalidBaseUrl { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("HTTP error {status} from {url}")]
    Http { status: u16, url: String },
    /// The envelope reported `success: false`.
    #[error("API error: {message}")]
    Api { message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// Both endpoints failed.
    #[error("live events unavailable ({primary}); fallback also failed ({fallback})")]
    Unavailable {
        primary: Box<ApiError>,
        fallback: Box<ApiError>,
    },
}

/// Which endpoint served a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Primary,
    Fallback,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Primary => "/api/live-events",
            Self::Fallback => "/api/events/today",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A successfully fetched and normalized feed.
#[derive(Debug, Clone)]
pub struct Feed {
    pub records: Vec<EventRecord>,
    pub channels: Vec<Channel>,
    pub endpoint: Endpoint,
    /// The `source` label the server reported, if any.
    pub reported_source: Option<String>,
}

impl Feed {
    fn from_response(response: ApiResponse, endpoint: Endpoint) -> Self {
        Self {
            records: response.events.iter().map(SportsDbEvent::to_record).collect(),
            channels: collect_channels(&response.events),
            endpoint,
            reported_source: response.source,
        }
    }
}

/// Live events feed client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a client for the feed hosted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::InvalidBaseUrl {
                reason: "base URL cannot be empty",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches up to `limit` events, falling back to today's events.
    pub async fn fetch_events(&self, limit: u32) -> Result<Feed, ApiError> {
        match self.fetch_from(Endpoint::Primary, limit).await {
            Ok(feed) => Ok(feed),
            Err(primary) => {
                tracing::warn!(error = %primary, "failed to fetch live events, trying fallback");
                self.fetch_from(Endpoint::Fallback, limit)
                    .await
                    .map_err(|fallback| {
                        tracing::error!(error = %fallback, "fallback fetch also failed");
                        ApiError::Unavailable {
                            primary: Box::new(primary),
                            fallback: Box::new(fallback),
                        }
                    })
            }
        }
    }

    /// Fetches from a single endpoint, without fallback.
    pub async fn fetch_from(&self, endpoint: Endpoint, limit: u32) -> Result<Feed, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit)])
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let payload: ApiResponse = serde_json::from_str(&body)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        if !payload.success {
            return Err(ApiError::Api {
                message: payload
                    .error
                    .unwrap_or_else(|| "failed to fetch events".to_string()),
            });
        }

        tracing::debug!(
            %endpoint,
            count = payload.events.len(),
            source = payload.source.as_deref().unwrap_or("API"),
            "loaded events"
        );
        Ok(Feed::from_response(payload, endpoint))
    }
}
