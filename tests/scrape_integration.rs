//! End-to-end scrape runs against a local mock catalogue.

use books_scraper::commands::{ScrapeCommand, StopReason};
use books_scraper::store::JsonStore;
use books_scraper::{Config, PersistMode, Record};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_page_html(page: u32, count: usize) -> String {
    let mut html = String::from("<html><body><ol class=\"row\">");
    for i in 0..count {
        html.push_str(&format!(
            r#"<li><article class="product_pod">
                <h3><a href="book-{page}-{i}_{i}/index.html" title="Book {page}.{i}">Book {page}...</a></h3>
                <div class="product_price"><p class="price_color">£{page}{i}.00</p></div>
            </article></li>"#
        ));
    }
    html.push_str("</ol></body></html>");
    html
}

async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/catalogue/page-{}.html", page)))
        .and(header("User-Agent", "Mozilla/5.0"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn make_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::new();
    config.base_url = server.uri();
    config.delay_ms = 0;
    config.output = dir.path().join("data").join("books.json");
    config
}

fn output_path(config: &Config) -> PathBuf {
    config.output.clone()
}

#[tokio::test]
async fn test_two_full_pages_then_empty() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_string(make_page_html(1, 20))).await;
    mount_page(&server, 2, ResponseTemplate::new(200).set_body_string(make_page_html(2, 20))).await;
    mount_page(&server, 3, ResponseTemplate::new(200).set_body_string(make_page_html(3, 0))).await;

    let dir = TempDir::new().unwrap();
    let config = make_config(&server, &dir);
    let output = output_path(&config);

    let summary = ScrapeCommand::new(config).execute().await.unwrap();
    assert_eq!(summary.records.len(), 40);
    assert_eq!(summary.stop, StopReason::Exhausted { page: 3 });

    let content = std::fs::read_to_string(&output).unwrap();
    let parsed: Vec<Record> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, summary.records);
    assert_eq!(parsed[0].title, "Book 1.0");
    assert_eq!(parsed[0].link, format!("{}/catalogue/book-1-0_0/index.html", server.uri()));
    assert_eq!(parsed[39].title, "Book 2.19");

    // Page 4 was never requested
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_not_found_ends_run() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_string(make_page_html(1, 20))).await;
    mount_page(&server, 2, ResponseTemplate::new(200).set_body_string(make_page_html(2, 20))).await;
    mount_page(&server, 3, ResponseTemplate::new(404)).await;

    let dir = TempDir::new().unwrap();
    let config = make_config(&server, &dir);

    let summary = ScrapeCommand::new(config).execute().await.unwrap();
    assert_eq!(summary.records.len(), 40);
    assert_eq!(summary.stop, StopReason::ServerError { page: 3, status: 404 });
}

#[tokio::test]
async fn test_malformed_second_page_loses_everything() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_string(make_page_html(1, 20))).await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_string(
            r#"<article class="product_pod"><p class="price_color">£9.99</p></article>"#,
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = make_config(&server, &dir);
    let output = output_path(&config);

    let result = ScrapeCommand::new(config).execute().await;
    assert!(result.is_err());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_incremental_mode_survives_failure() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_string(make_page_html(1, 20))).await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_string(r#"<article class="product_pod"></article>"#),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut config = make_config(&server, &dir);
    config.persist = PersistMode::Incremental;
    let output = output_path(&config);

    assert!(ScrapeCommand::new(config).execute().await.is_err());

    let saved = JsonStore::new(output).load().unwrap();
    assert_eq!(saved.len(), 20);
}

#[tokio::test]
async fn test_repeated_runs_are_byte_identical() {
    let server = MockServer::start().await;
    for page in 1..=2 {
        Mock::given(method("GET"))
            .and(path(format!("/catalogue/page-{}.html", page)))
            .respond_with(ResponseTemplate::new(200).set_body_string(make_page_html(page, 5)))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/catalogue/page-3.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = make_config(&server, &dir);
    let output = output_path(&config);

    ScrapeCommand::new(config.clone()).execute().await.unwrap();
    let first = std::fs::read(&output).unwrap();
    ScrapeCommand::new(config).execute().await.unwrap();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_max_pages_guard() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_string(make_page_html(1, 3))).await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(make_page_html(2, 3)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = make_config(&server, &dir);
    config.max_pages = Some(1);

    let summary = ScrapeCommand::new(config).execute().await.unwrap();
    assert_eq!(summary.records.len(), 3);
    assert_eq!(summary.stop, StopReason::PageLimit { limit: 1 });
}
