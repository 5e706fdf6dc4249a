//! Cache-backed page fetcher
//!
//! This module handles every page retrieval for the harvester:
//! - Building the HTTP client with the configured user agent
//! - Refusing URLs outside the documentation root
//! - Serving pages from the on-disk cache when present
//! - Bounding the number of network requests in flight
//! - Writing freshly downloaded pages back to the cache

use crate::config::{Config, CrawlerConfig, UserAgentConfig};
use crate::crawler::cache::PageCache;
use crate::url::DocRoot;
use crate::HarvestError;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawler settings (request timeout)
///
/// # Example
///
/// ```no_run
/// use javadoc_harvest::config::{CrawlerConfig, UserAgentConfig};
/// use javadoc_harvest::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "javadoc-harvest".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent.header_value())
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = crawler.request_timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Fetches documentation pages, consulting the cache first
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    root: DocRoot,
    cache: PageCache,
    permits: Semaphore,
    network_calls: AtomicUsize,
}

impl Fetcher {
    /// Creates a fetcher from the harvest configuration
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, &config.crawler).map_err(|source| {
            HarvestError::Http {
                url: config.docs.root_url.clone(),
                source,
            }
        })?;

        Ok(Self::with_client(
            client,
            config.docs.root()?,
            PageCache::new(&config.cache.directory),
            config.crawler.max_concurrent_fetches as usize,
        ))
    }

    pub fn with_client(client: Client, root: DocRoot, cache: PageCache, max_concurrent: usize) -> Self {
        Self {
            client,
            root,
            cache,
            permits: Semaphore::new(max_concurrent.max(1)),
            network_calls: AtomicUsize::new(0),
        }
    }

    pub fn root(&self) -> &DocRoot {
        &self.root
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Number of requests that actually went to the network
    pub fn network_calls(&self) -> usize {
        self.network_calls.load(Ordering::Relaxed)
    }

    /// Returns the content of `url`
    ///
    /// # Request Flow
    ///
    /// 1. Reject URLs outside the documentation root (`ConfigError::OutsideRoot`)
    /// 2. Return the cached copy if there is one, without touching the network
    /// 3. Otherwise GET the page; a non-success status is `HarvestError::Status`
    /// 4. Write the body to the cache, then return it
    ///
    /// Concurrent fetches of the same URL are not merged. Both may download
    /// and both write identical content.
    pub async fn fetch(&self, url: &Url) -> Result<String, HarvestError> {
        let relative = self.root.relative_path(url)?;
        let path = self.cache.path_for(&relative);

        if let Some(content) = self.cache.read(&path).await? {
            tracing::debug!("Cache hit for {}", url);
            return Ok(content);
        }

        let body = self.download(url).await?;

        tracing::info!("Caching contents of {}", url);
        self.cache.store(&path, &body).await?;

        Ok(body)
    }

    async fn download(&self, url: &Url) -> Result<String, HarvestError> {
        // The semaphore is never closed, so acquire only fails in theory
        let _permit = self.permits.acquire().await.ok();
        self.network_calls.fetch_add(1, Ordering::Relaxed);

        let http_error = |source| HarvestError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(http_error)
    }
}
