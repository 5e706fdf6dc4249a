//! Integration tests for the cache-backed fetcher

use javadoc_harvest::config::{
    CacheConfig, Config, CrawlerConfig, DocsConfig, OutputConfig, UserAgentConfig,
};
use javadoc_harvest::crawler::Fetcher;
use javadoc_harvest::{ConfigError, HarvestError};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(root_url: &str, dir: &TempDir) -> Config {
    Config {
        docs: DocsConfig {
            root_url: root_url.to_string(),
            index_page: "index.html".to_string(),
            module_prefix: "java.".to_string(),
        },
        crawler: CrawlerConfig {
            max_concurrent_fetches: 2,
            request_timeout_secs: None,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestHarvester".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        cache: CacheConfig {
            directory: dir.path().join("cache"),
        },
        output: OutputConfig {
            types_path: dir.path().join("types.json"),
            report_path: None,
        },
    }
}

#[tokio::test]
async fn test_refetch_makes_no_network_call() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/java.base/java/util/List.html"))
        .and(header(
            "user-agent",
            "TestHarvester/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>List</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&create_test_config(&format!("{}/api/", server.uri()), &dir)).unwrap();
    let url = Url::parse(&format!("{}/api/java.base/java/util/List.html", server.uri())).unwrap();

    let first = fetcher.fetch(&url).await.unwrap();
    let second = fetcher.fetch(&url).await.unwrap();

    assert_eq!(first, "<html>List</html>");
    assert_eq!(second, first);
    assert_eq!(fetcher.network_calls(), 1);

    let cached = dir.path().join("cache/java.base/java/util/List.html");
    assert_eq!(std::fs::read_to_string(cached).unwrap(), "<html>List</html>");
}

#[tokio::test]
async fn test_directory_url_cached_as_index() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/java.base/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("module root"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&create_test_config(&format!("{}/api/", server.uri()), &dir)).unwrap();
    let url = Url::parse(&format!("{}/api/java.base/", server.uri())).unwrap();

    fetcher.fetch(&url).await.unwrap();

    assert!(dir.path().join("cache/java.base/index.html").exists());
}

#[tokio::test]
async fn test_failed_fetch_is_not_cached() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/Gone.html"))
        .respond_with(ResponseTemplate::new(410))
        .expect(2)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&create_test_config(&format!("{}/api/", server.uri()), &dir)).unwrap();
    let url = Url::parse(&format!("{}/api/Gone.html", server.uri())).unwrap();

    for _ in 0..2 {
        let error = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(error, HarvestError::Status { status: 410, .. }));
    }

    assert!(!dir.path().join("cache/Gone.html").exists());
    assert_eq!(fetcher.network_calls(), 2);
}

#[tokio::test]
async fn test_url_outside_root_is_rejected() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let fetcher = Fetcher::new(&create_test_config(&format!("{}/api/", server.uri()), &dir)).unwrap();
    let url = Url::parse(&format!("{}/other/Page.html", server.uri())).unwrap();

    let error = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(
        error,
        HarvestError::Config(ConfigError::OutsideRoot { .. })
    ));
    assert_eq!(fetcher.network_calls(), 0);
}

#[tokio::test]
async fn test_single_permit_serializes_downloads() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let delay = Duration::from_millis(300);

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>slow</html>")
                .set_delay(delay),
        )
        .expect(4)
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{}/api/", server.uri()), &dir);
    config.crawler.max_concurrent_fetches = 1;
    let fetcher = Fetcher::new(&config).unwrap();

    let urls: Vec<Url> = (0..4)
        .map(|i| Url::parse(&format!("{}/api/Page{}.html", server.uri(), i)).unwrap())
        .collect();

    let started = Instant::now();
    let results = futures::future::join_all(urls.iter().map(|url| fetcher.fetch(url))).await;
    let elapsed = started.elapsed();

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(fetcher.network_calls(), 4);
    assert!(
        elapsed >= delay * 4,
        "four downloads overlapped with one permit: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_request_timeout_ends_stalled_fetch() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/Stalled.html"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{}/api/", server.uri()), &dir);
    config.crawler.request_timeout_secs = Some(1);
    let fetcher = Fetcher::new(&config).unwrap();
    let url = Url::parse(&format!("{}/api/Stalled.html", server.uri())).unwrap();

    let started = Instant::now();
    let error = fetcher.fetch(&url).await.unwrap_err();
    let elapsed = started.elapsed();

    match error {
        HarvestError::Http { source, .. } => assert!(source.is_timeout()),
        other => panic!("expected a transport timeout, got {:?}", other),
    }
    assert!(elapsed < Duration::from_secs(3), "timed out after {:?}", elapsed);
    assert!(!dir.path().join("cache/Stalled.html").exists());
}
