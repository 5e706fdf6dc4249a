//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a miniature Javadoc tree and run the
//! full module -> package -> class harvest end-to-end.

use javadoc_harvest::config::{
    CacheConfig, Config, CrawlerConfig, DocsConfig, OutputConfig, UserAgentConfig,
};
use javadoc_harvest::crawler::Coordinator;
use javadoc_harvest::output::load_types;
use javadoc_harvest::{HarvestError, TypeKind};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_PAGE: &str = r#"<html><body>
<div id="all-modules-table">
  <div class="summary-table two-column-summary">
    <div class="table-header col-first">Module</div>
    <div class="table-header col-last">Description</div>
    <div class="col-first"><a href="java.base/module-summary.html">java.base</a></div>
    <div class="col-last">Defines the foundational APIs of the Java SE Platform.</div>
    <div class="col-first"><a href="jdk.jshell/module-summary.html">jdk.jshell</a></div>
    <div class="col-last">Provides the jshell tool.</div>
  </div>
</div>
</body></html>"#;

const MODULE_PAGE: &str = r#"<html><body>
<div id="package-summary-table">
  <div class="summary-table two-column-summary">
    <div class="table-header col-first">Package</div>
    <div class="table-header col-last">Description</div>
    <div class="col-first"><a href="java/util/package-summary.html">java.util</a></div>
    <div class="col-last">Contains the collections framework.</div>
  </div>
</div>
</body></html>"#;

const PACKAGE_PAGE: &str = r#"<html><body>
<div id="class-summary">
  <div class="summary-table two-column-summary">
    <div class="table-header col-first">Class</div>
    <div class="table-header col-last">Description</div>
    <div class="col-first"><a href="HashMap.html">HashMap</a></div>
    <div class="col-last">Hash table based implementation of the Map interface.</div>
    <div class="col-first"><a href="Broken.html">Broken</a></div>
    <div class="col-last">A page that fails to load.</div>
  </div>
</div>
</body></html>"#;

const HASH_MAP_PAGE: &str = r##"<html><body>
<div class="header">
<div class="sub-title"><span>Module</span>&nbsp;<a href="../../module-summary.html">java.base</a></div>
<div class="sub-title"><span>Package</span>&nbsp;<a href="package-summary.html">java.util</a></div>
<h1 class="title">Class HashMap&lt;K,&#8203;V&gt;</h1>
</div>
<div class="type-signature"><span class="extends-implements">extends AbstractMap&lt;K,&#8203;V&gt;
implements Map&lt;K,&#8203;V&gt;, Cloneable, Serializable</span></div>
<section class="constructor-summary">
<div class="summary-table two-column-summary">
<div class="table-header col-first">Constructor</div>
<div class="table-header col-last">Description</div>
<div class="col-constructor-name"><code><a href="#%3Cinit%3E()">HashMap</a>()</code></div>
<div class="col-last">Constructs an empty HashMap.</div>
<div class="col-constructor-name"><code><a href="#%3Cinit%3E(int)">HashMap</a>&#8203;(int&nbsp;initialCapacity)</code></div>
<div class="col-last">Constructs an empty HashMap with the specified initial capacity.</div>
</div>
</section>
<section class="method-summary">
<div class="summary-table three-column-summary">
<div class="table-header col-first">Modifier and Type</div>
<div class="table-header col-second">Method</div>
<div class="table-header col-last">Description</div>
<div class="col-first"><code>V</code></div>
<div class="col-second"><code><a href="#put(K,V)">put</a>&#8203;(K&nbsp;key, V&nbsp;value)</code></div>
<div class="col-last">Associates the specified value with the specified key in this map.</div>
<div class="col-first"><code>int</code></div>
<div class="col-second"><code><a href="#size()">size</a>()</code></div>
<div class="col-last">Returns the number of key-value mappings in this map.</div>
</div>
</section>
</body></html>"##;

fn create_test_config(root_url: &str, dir: &TempDir) -> Config {
    Config {
        docs: DocsConfig {
            root_url: root_url.to_string(),
            index_page: "index.html".to_string(),
            module_prefix: "java.".to_string(),
        },
        crawler: CrawlerConfig {
            max_concurrent_fetches: 4,
            request_timeout_secs: Some(10),
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
            types_path: dir.path().join("out").join("types.json"),
            report_path: Some(dir.path().join("out").join("report.json")),
        },
    }
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, page_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_isolates_class_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/api/index.html", INDEX_PAGE).await;
    mount_page(&server, "/api/java.base/module-summary.html", MODULE_PAGE).await;
    mount_page(
        &server,
        "/api/java.base/java/util/package-summary.html",
        PACKAGE_PAGE,
    )
    .await;
    mount_page(&server, "/api/java.base/java/util/HashMap.html", HASH_MAP_PAGE).await;
    mount_status(&server, "/api/java.base/java/util/Broken.html", 500).await;

    // jdk.jshell is filtered out by the prefix, so it must never be requested
    Mock::given(method("GET"))
        .and(path("/api/jdk.jshell/module-summary.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/api/", server.uri()), &dir);
    let types_path = config.output.types_path.clone();
    let report_path = config.output.report_path.clone().unwrap();

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Harvest failed");

    assert_eq!(report.successes, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(report.types_written, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].url.ends_with("/api/java.base/java/util/Broken.html"));
    assert!(report.soft_errors.is_empty());

    let types = load_types(&types_path).expect("Failed to load artifact");
    assert_eq!(types.len(), 1);

    let hash_map = &types[0];
    assert_eq!(hash_map.kind, TypeKind::Class);
    assert_eq!(hash_map.name, "HashMap");
    assert_eq!(hash_map.package_name, "java.util");
    assert_eq!(hash_map.module_name, "java.base");
    assert_eq!(hash_map.extends_types, Some(vec!["AbstractMap".to_string()]));
    assert_eq!(
        hash_map.implements_types,
        Some(vec![
            "Map".to_string(),
            "Cloneable".to_string(),
            "Serializable".to_string()
        ])
    );
    assert!(hash_map.fields.is_empty());

    assert_eq!(hash_map.constructors.len(), 2);
    assert_eq!(hash_map.constructors[0].name, "HashMap");
    assert_eq!(hash_map.constructors[0].parameters, Some(vec![]));
    let capacity = hash_map.constructors[1].parameters.as_ref().unwrap();
    assert_eq!(capacity[0].param_type, "int");
    assert_eq!(capacity[0].name.as_deref(), Some("initialCapacity"));

    let put = &hash_map.methods[0];
    assert_eq!(put.name, "put");
    assert_eq!(put.return_type.as_deref(), Some("V"));
    assert_eq!(put.parameters.as_ref().map(Vec::len), Some(2));
    assert_eq!(hash_map.methods[1].name, "size");
    assert_eq!(hash_map.methods[1].parameters, Some(vec![]));

    let report_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report_json["successes"], 1);
    assert_eq!(report_json["errors"], 1);
}

#[tokio::test]
async fn test_package_failure_aborts_harvest() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/api/index.html", INDEX_PAGE).await;
    mount_page(&server, "/api/java.base/module-summary.html", MODULE_PAGE).await;
    mount_status(&server, "/api/java.base/java/util/package-summary.html", 404).await;

    let config = create_test_config(&format!("{}/api/", server.uri()), &dir);
    let types_path = config.output.types_path.clone();
    let report_path = config.output.report_path.clone().unwrap();

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let result = coordinator.run().await;

    match result {
        Err(HarvestError::Status { url, status }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/java/util/package-summary.html"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }

    assert!(!types_path.exists());
    assert!(!report_path.exists());
}

#[tokio::test]
async fn test_malformed_tables_degrade_record() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let package_page = r#"<html><body><div id="class-summary">
      <div class="summary-table two-column-summary">
        <div class="table-header col-first">Class</div>
        <div class="table-header col-last">Description</div>
        <div class="col-first"><a href="Odd.html">Odd</a></div>
        <div class="col-last">Unusual layout.</div>
      </div></div></body></html>"#;

    let odd_page = r#"<html><body>
      <div class="header"><h1 class="title">Interface Odd</h1></div>
      <section class="method-summary">
        <div class="summary-table two-column-summary">
          <div class="table-header">Method</div>
          <div class="table-header">Description</div>
          <div class="col-first"><code>run()</code></div>
          <div class="col-last">Runs.</div>
        </div>
      </section>
    </body></html>"#;

    mount_page(&server, "/api/index.html", INDEX_PAGE).await;
    mount_page(&server, "/api/java.base/module-summary.html", MODULE_PAGE).await;
    mount_page(
        &server,
        "/api/java.base/java/util/package-summary.html",
        package_page,
    )
    .await;
    mount_page(&server, "/api/java.base/java/util/Odd.html", odd_page).await;

    let config = create_test_config(&format!("{}/api/", server.uri()), &dir);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Harvest failed");

    assert_eq!(report.successes, 1);
    assert_eq!(report.errors, 0);
    assert_eq!(report.soft_errors.len(), 1);
    assert_eq!(report.soft_errors[0].message, "method table reports 2 columns");

    let types = load_types(&coordinator.config().output.types_path).unwrap();
    assert_eq!(types[0].kind, TypeKind::Interface);
    assert!(types[0].methods.is_empty());
}

#[tokio::test]
async fn test_second_harvest_is_served_from_cache() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let pages = [
        ("/api/index.html", INDEX_PAGE),
        ("/api/java.base/module-summary.html", MODULE_PAGE),
        ("/api/java.base/java/util/package-summary.html", PACKAGE_PAGE),
        ("/api/java.base/java/util/HashMap.html", HASH_MAP_PAGE),
    ];
    for (page_path, body) in pages {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    // Failures are never cached, so the broken page is requested on both runs
    Mock::given(method("GET"))
        .and(path("/api/java.base/java/util/Broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let root_url = format!("{}/api/", server.uri());

    let first = Coordinator::new(create_test_config(&root_url, &dir)).unwrap();
    first.run().await.expect("First harvest failed");
    assert_eq!(first.fetcher().network_calls(), 5);

    let second = Coordinator::new(create_test_config(&root_url, &dir)).unwrap();
    let report = second.run().await.expect("Second harvest failed");
    assert_eq!(second.fetcher().network_calls(), 1);
    assert_eq!(report.successes, 1);
    assert_eq!(report.errors, 1);
}

#[tokio::test]
async fn test_class_link_outside_root_is_counted() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let package_page = r#"<html><body><div id="class-summary">
      <div class="summary-table two-column-summary">
        <div class="table-header col-first">Class</div>
        <div class="table-header col-last">Description</div>
        <div class="col-first"><a href="HashMap.html">HashMap</a></div>
        <div class="col-last">Hash table.</div>
        <div class="col-first"><a href="https://elsewhere.example.com/api/Foreign.html">Foreign</a></div>
        <div class="col-last">Lives on another host.</div>
      </div></div></body></html>"#;

    mount_page(&server, "/api/index.html", INDEX_PAGE).await;
    mount_page(&server, "/api/java.base/module-summary.html", MODULE_PAGE).await;
    mount_page(
        &server,
        "/api/java.base/java/util/package-summary.html",
        package_page,
    )
    .await;
    mount_page(&server, "/api/java.base/java/util/HashMap.html", HASH_MAP_PAGE).await;

    let config = create_test_config(&format!("{}/api/", server.uri()), &dir);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Harvest failed");

    assert_eq!(report.successes, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(
        report.failures[0].url,
        "https://elsewhere.example.com/api/Foreign.html"
    );
    assert!(report.failures[0].message.contains("outside the documentation root"));
    assert_eq!(coordinator.fetcher().network_calls(), 4);
}
