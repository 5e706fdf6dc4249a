use crate::url::DocRoot;
use crate::ConfigResult;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Main configuration structure for Javadoc-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub docs: DocsConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
}

/// Where the documentation lives and which modules to harvest
#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    /// Documentation root; every fetched page must fall under it
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Module index page, relative to the root
    #[serde(rename = "index-page", default = "default_index_page")]
    pub index_page: String,

    /// Only modules whose display name starts with this prefix are crawled
    #[serde(rename = "module-prefix", default = "default_module_prefix")]
    pub module_prefix: String,
}

impl DocsConfig {
    /// Parses the configured root
    pub fn root(&self) -> ConfigResult<DocRoot> {
        DocRoot::parse(&self.root_url)
    }

    /// Absolute URL of the module index page
    pub fn index_url(&self) -> ConfigResult<Url> {
        self.root()?.join(&self.index_page)
    }
}

fn default_index_page() -> String {
    "index.html".to_string()
}

fn default_module_prefix() -> String {
    "java.".to_string()
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of network requests in flight
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent")]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout; no timeout when absent
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent(),
            request_timeout_secs: None,
        }
    }
}

fn default_max_concurrent() -> u32 {
    8
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Page cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Directory mirroring fetched pages by root-relative path
    pub directory: PathBuf,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON array of type descriptors
    #[serde(rename = "types-path")]
    pub types_path: PathBuf,

    /// Optional path of the JSON run report
    #[serde(rename = "report-path", default)]
    pub report_path: Option<PathBuf>,
}
