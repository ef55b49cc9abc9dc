//! Place photos for itinerary cards.
//!
//! A query walks a chain of public sources until one returns an image; the
//! handler redirects the browser there. A seeded placeholder ends the chain,
//! so a card never shows a broken image.

mod sources;

use sources::Endpoints;

use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::cache::{PersistentCache, jittered_ttl};
use crate::config::PhotoConfig;
use crate::{Result, TripPlannerError};

const DEFAULT_QUERY: &str = "travel";
const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 600.0;
const MIN_WIDTH: f64 = 200.0;
const MIN_HEIGHT: f64 = 150.0;

/// Normalized `q`/`w`/`h` parameters of a photo lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRequest {
    pub query: String,
    pub width: u32,
    pub height: u32,
}

impl PhotoRequest {
    /// Missing, blank or non-numeric values take the defaults; sizes are
    /// raised to at least 200x150.
    #[must_use]
    pub fn from_params(query: Option<&str>, width: Option<&str>, height: Option<&str>) -> Self {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUERY);

        Self {
            query: query.to_string(),
            width: dimension(width, DEFAULT_WIDTH, MIN_WIDTH),
            height: dimension(height, DEFAULT_HEIGHT, MIN_HEIGHT),
        }
    }

    fn cache_key(&self) -> String {
        format!("photo:{}x{}:{}", self.width, self.height, self.query.to_lowercase())
    }
}

fn dimension(raw: Option<&str>, default: f64, min: f64) -> u32 {
    let value = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default);
    // saturating cast
    value.max(min).round() as u32
}

/// The part of a query before the first comma and the first `" - "`, when
/// that differs from the whole query.
#[must_use]
pub fn short_query(query: &str) -> Option<&str> {
    let head = query.split(',').next().unwrap_or(query);
    let head = head.split(" - ").next().unwrap_or(head);
    (!head.is_empty() && head != query).then_some(head)
}

/// Deterministic placeholder image for `query`.
#[must_use]
pub fn picsum_url(request: &PhotoRequest) -> String {
    format!(
        "https://picsum.photos/seed/{}/{}/{}",
        urlencoding::encode(&request.query),
        request.width,
        request.height
    )
}

/// Where to send the browser, and whether it came from a real lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRedirect {
    pub location: String,
    pub resolved: bool,
}

pub struct PhotoResolver {
    client: Client,
    endpoints: Endpoints,
    timeout: Duration,
    cache: Option<Arc<PersistentCache>>,
    cache_ttl: Duration,
}

impl PhotoResolver {
    pub fn new(config: &PhotoConfig, cache: Option<Arc<PersistentCache>>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TripPlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoints: Endpoints::from_config(config),
            timeout: Duration::from_secs(config.timeout_seconds.into()),
            cache,
            cache_ttl: Duration::from_secs(config.cache_ttl_seconds),
        })
    }

    /// Resolves `request`, falling back to the placeholder on any failure.
    pub async fn redirect(&self, request: &PhotoRequest) -> PhotoRedirect {
        match self.resolve(request).await {
            Ok(location) => PhotoRedirect {
                location,
                resolved: true,
            },
            Err(e) => {
                warn!(query = %request.query, "Photo lookup failed: {}", e);
                PhotoRedirect {
                    location: picsum_url(request),
                    resolved: false,
                }
            }
        }
    }

    /// Image URL for `request`. The chain as a whole is bounded by the
    /// configured timeout; one failing source aborts it.
    #[instrument(skip(self), fields(query = %request.query))]
    pub async fn resolve(&self, request: &PhotoRequest) -> Result<String> {
        let key = request.cache_key();
        if let Some(cache) = &self.cache {
            match cache.get::<String>(&key).await {
                Ok(Some(url)) => {
                    debug!("Photo cache hit");
                    return Ok(url);
                }
                Ok(None) => {}
                Err(e) => warn!("Photo cache read failed: {}", e),
            }
        }

        let start = Instant::now();
        let url = tokio::time::timeout(self.timeout, self.lookup(request))
            .await
            .map_err(|_| {
                TripPlannerError::api(format!(
                    "Photo lookup timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;
        info!("Photo resolved in {:.3}s", start.elapsed().as_secs_f64());

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&key, url.clone(), jittered_ttl(self.cache_ttl)).await {
                warn!("Photo cache write failed: {}", e);
            }
        }
        Ok(url)
    }

    async fn lookup(&self, request: &PhotoRequest) -> Result<String> {
        let query = request.query.as_str();
        let (client, endpoints) = (&self.client, &self.endpoints);

        if let Some(url) = sources::wikipedia_image(client, endpoints, "en", query).await? {
            return Ok(url);
        }
        // Hindi Wikipedia often has the lead image for Indian places
        if let Some(url) = sources::wikipedia_image(client, endpoints, "hi", query).await? {
            return Ok(url);
        }
        if let Some(url) = sources::commons_image(client, endpoints, query, request.width).await? {
            return Ok(url);
        }

        if let Some(short) = short_query(query) {
            debug!(short, "Retrying with shortened query");
            if let Some(url) = sources::wikipedia_image(client, endpoints, "en", short).await? {
                return Ok(url);
            }
            if let Some(url) = sources::commons_image(client, endpoints, short, request.width).await? {
                return Ok(url);
            }
        }

        if let Some(url) = sources::openverse_image(client, endpoints, query).await? {
            return Ok(url);
        }

        debug!("No source had an image, using placeholder");
        Ok(picsum_url(request))
    }
}
