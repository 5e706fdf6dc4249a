//! Crawler coordinator - module, package and class orchestration
//!
//! The harvest walks three levels of listing pages:
//! - the module index, filtered by the configured module prefix
//! - each module page, listing its packages
//! - each package page, listing its classes
//!
//! Every level fans out concurrently. A failure while fetching a module or
//! package page aborts the whole run, while a failure on a class page is
//! counted and logged and its siblings carry on.

use crate::config::Config;
use crate::crawler::collector::{ClassOutcome, Collector, Harvest};
use crate::crawler::discovery::{class_links, module_links, package_links};
use crate::crawler::fetcher::Fetcher;
use crate::extract::{parse_type_page, Diagnostics};
use crate::model::TypeDescriptor;
use crate::output::{write_report, write_types, CrawlReport};
use crate::{HarvestError, SoftParseError};
use chrono::Utc;
use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use url::{ParseError, Url};

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Arc<Fetcher>,
}

impl Coordinator {
    /// Creates a coordinator, building the HTTP client and cache from `config`
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Fetcher) -> Self {
        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Runs a complete harvest and writes its output
    ///
    /// The types artifact is written exactly once, after every class page has
    /// been processed. When the run aborts nothing is written.
    pub async fn run(&self) -> Result<CrawlReport, HarvestError> {
        let started_at = Utc::now();
        tracing::info!("Starting harvest of {}", self.fetcher.root().as_url());

        let harvest = self.harvest().await?;
        let finished_at = Utc::now();

        write_types(&self.config.output.types_path, &harvest.types)?;
        tracing::info!(
            "Wrote {} types to {}",
            harvest.types.len(),
            self.config.output.types_path.display()
        );
        tracing::info!("Successes: {}, errors: {}", harvest.successes, harvest.errors);

        let report = CrawlReport {
            started_at,
            finished_at,
            types_written: harvest.types.len(),
            successes: harvest.successes,
            errors: harvest.errors,
            failures: harvest.failures,
            soft_errors: harvest.soft_errors,
        };

        if let Some(path) = &self.config.output.report_path {
            write_report(path, &report)?;
            tracing::info!("Wrote run report to {}", path.display());
        }

        Ok(report)
    }

    /// Crawls the whole documentation tree without writing anything
    pub async fn harvest(&self) -> Result<Harvest, HarvestError> {
        let index_url = self.config.docs.index_url()?;
        let index = self.fetcher.fetch(&index_url).await?;
        let modules = module_links(&index, &index_url, &self.config.docs.module_prefix);
        tracing::info!("Found {} modules", modules.len());

        let collector = Collector::new();
        try_join_all(
            modules
                .iter()
                .map(|module_url| self.crawl_module(module_url, &collector)),
        )
        .await?;

        Ok(collector.into_harvest())
    }

    async fn crawl_module(&self, module_url: &Url, collector: &Collector) -> Result<(), HarvestError> {
        let page = self.fetcher.fetch(module_url).await?;
        let packages = package_links(&page, module_url);
        tracing::debug!("Module {} lists {} packages", module_url, packages.len());

        try_join_all(
            packages
                .iter()
                .map(|package_url| self.crawl_package(package_url, collector)),
        )
        .await?;

        Ok(())
    }

    async fn crawl_package(&self, package_url: &Url, collector: &Collector) -> Result<(), HarvestError> {
        let page = self.fetcher.fetch(package_url).await?;
        let classes = class_links(&page, package_url);
        tracing::debug!("Package {} lists {} classes", package_url, classes.len());

        let outcomes = join_all(classes.into_iter().map(|class_url| self.harvest_class(class_url))).await;
        for outcome in outcomes {
            collector.record(outcome);
        }

        Ok(())
    }

    /// Fetches and parses one class page; never fails, the error is the outcome
    pub async fn harvest_class(&self, url: Url) -> ClassOutcome {
        match self.extract_class(&url).await {
            Ok((descriptor, soft_errors)) => ClassOutcome::Completed {
                url,
                descriptor,
                soft_errors,
            },
            Err(error) => ClassOutcome::Failed { url, error },
        }
    }

    /// Harvests a single type page, bypassing discovery
    ///
    /// `page` is either an absolute URL or a path relative to the root. Text
    /// that looks absolute but doesn't parse is a `UrlParse` error.
    pub async fn harvest_single(
        &self,
        page: &str,
    ) -> Result<(TypeDescriptor, Vec<SoftParseError>), HarvestError> {
        let url = match Url::parse(page) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) => self.fetcher.root().join(page)?,
            Err(e) => return Err(e.into()),
        };

        self.extract_class(&url).await
    }

    async fn extract_class(
        &self,
        url: &Url,
    ) -> Result<(TypeDescriptor, Vec<SoftParseError>), HarvestError> {
        let html = self.fetcher.fetch(url).await?;

        let mut diagnostics = Diagnostics::new();
        let descriptor = parse_type_page(&html, url, &mut diagnostics)?;
        tracing::debug!("Harvested {}", descriptor.qualified_name());

        Ok((descriptor, diagnostics.into_errors()))
    }
}

/// Runs a complete harvest with the given configuration
pub async fn run_harvest(config: Config) -> Result<CrawlReport, HarvestError> {
    Coordinator::new(config)?.run().await
}
