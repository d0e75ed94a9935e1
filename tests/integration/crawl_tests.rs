//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock HTTP servers and run discovery,
//! fetching and CSV output end-to-end over real HTTP.

use job_harvest::config::{Config, FailurePolicy, SelectorConfig};
use job_harvest::crawler::{
    build_http_client, discover_page_count, run_scrape, ControlCountFallback, HttpPageSource,
    ListingSelectors,
};
use job_harvest::output::CsvSink;
use job_harvest::{HarvestError, SearchQuery};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

const SEARCH_PATH: &str = "/zf_user/search/recruit";

/// Creates a test configuration pointing at the mock server
fn create_test_config(mock_server: &MockServer) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}{}", mock_server.uri(), SEARCH_PATH);
    config.crawler.max_concurrent_pages = 3;
    config.crawler.request_timeout_secs = 5;
    config
}

fn listing(id: &str, title: &str, locations: &[&str], skills: &[&str], date: &str) -> String {
    let locations: String = locations
        .iter()
        .map(|l| format!("<a href=\"/loc\">{}</a>", l))
        .collect();
    let skills: String = skills
        .iter()
        .map(|s| format!("<a href=\"/skill\">{}</a>", s))
        .collect();

    format!(
        r#"<div class="item_recruit" value="{id}">
            <div class="area_job">
                <h2 class="job_tit"><a href="/view?rec_idx={id}" title="{title}"><span>{title}</span></a></h2>
                <div class="job_date"><span class="date">{date}</span></div>
                <div class="job_condition">{locations}</div>
                <div class="job_sector">{skills}</div>
            </div>
        </div>"#
    )
}

fn page(listings: &[String], pagination: &str) -> String {
    format!(
        "<html><body><div id=\"recruit_info_list\">{}</div>{}</body></html>",
        listings.concat(),
        pagination
    )
}

fn pagination(entries: usize, next: Option<u32>) -> String {
    let spans: String = (1..=entries).map(|i| format!("<span>{}</span>", i)).collect();
    let next = next
        .map(|target| format!("<a class=\"btnNext\" page=\"{}\">next</a>", target))
        .unwrap_or_default();
    format!("<div class=\"pagination\">{}{}</div>", spans, next)
}

/// Mounts `body` for page `index`, expecting `hits` requests
async fn mount_page(
    mock_server: &MockServer,
    index: u32,
    body: String,
    hits: impl Into<Times>,
) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("searchword", "rust"))
        .and(query_param("recruitPage", index.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(hits)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_discovery_applies_control_count_fallback() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server);
    let last_probed = 3;
    let control_entries = 4;

    mount_page(&mock_server, 1, page(&[], &pagination(10, Some(2))), 1u64).await;
    mount_page(&mock_server, 2, page(&[], &pagination(10, Some(3))), 1u64).await;
    mount_page(
        &mock_server,
        3,
        page(&[], &pagination(control_entries, None)),
        1u64,
    )
    .await;

    let source = HttpPageSource::new(build_http_client(&config.user_agent, 5).unwrap());
    let query = SearchQuery::new(&config.site, "rust").unwrap();
    let selectors = ListingSelectors::compile(&SelectorConfig::default()).unwrap();

    let count = discover_page_count(&source, &query, &selectors, &ControlCountFallback)
        .await
        .expect("Discovery failed");

    assert_eq!(count, last_probed + (control_entries as u32 - 1));
}

#[tokio::test]
async fn test_full_scrape_writes_every_page() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server);

    // Discovery: 1 -> 2 -> 3, page 3 has 4 entries and no next link => 6 pages
    let page_sizes: [usize; 6] = [2, 1, 0, 3, 1, 2];
    for (index, &size) in page_sizes.iter().enumerate() {
        let index = index as u32;
        let listings: Vec<String> = (0..size)
            .map(|i| {
                listing(
                    &format!("{}{:02}", index, i),
                    &format!("Engineer {}-{}", index, i),
                    &["Seoul", "Mapo-gu"],
                    &["Rust", "Tokio"],
                    "~ 12/31(Wed)",
                )
            })
            .collect();
        let (block, hits) = match index {
            1 => (pagination(10, Some(2)), 2u64),
            2 => (pagination(10, Some(3)), 2),
            3 => (pagination(4, None), 2),
            _ => (String::new(), 1),
        };
        mount_page(&mock_server, index, page(&listings, &block), hits).await;
    }

    let dir = TempDir::new().unwrap();
    let sink = CsvSink::new(dir.path().join("jobs.csv"));

    let report = run_scrape(&config, "  rust ", &sink)
        .await
        .expect("Scrape failed");

    assert_eq!(report.term, "rust");
    assert_eq!(report.page_count, 3 + (4 - 1));
    assert_eq!(report.record_count, page_sizes.iter().sum::<usize>());
    assert!(report.skipped_pages.is_empty());

    let mut reader = csv::Reader::from_path(&report.output_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["ID", "TITLE", "LOCATION", "SKILLS", "DATE"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), report.record_count);

    let mut ids: Vec<&str> = rows.iter().map(|r| &r[0]).collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec!["000", "001", "100", "300", "301", "302", "400", "500", "501"]
    );
    for row in &rows {
        assert_eq!(&row[2], "Seoul Mapo-gu");
        assert_eq!(&row[3], "Rust,Tokio");
        assert_eq!(&row[4], "~ 12/31(Wed)");
    }
}

#[tokio::test]
async fn test_failed_page_writes_nothing() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server);

    // Outstanding fetches are aborted once page 2 fails
    mount_page(&mock_server, 1, page(&[], &pagination(3, None)), 1u64..).await;
    mount_page(&mock_server, 0, page(&[], ""), 0u64..).await;

    Mock::given(method("GET"))
        .and(query_param("recruitPage", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("jobs.csv");

    let err = run_scrape(&config, "rust", &CsvSink::new(&output))
        .await
        .unwrap_err();

    assert!(matches!(err, HarvestError::HttpStatus { status: 500, .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_skip_page_policy_writes_remaining_pages() {
    let mock_server = MockServer::start().await;
    let mut config = create_test_config(&mock_server);
    config.crawler.failure_policy = FailurePolicy::SkipPage;

    mount_page(&mock_server, 1, page(&[], &pagination(3, None)), 2u64).await;
    mount_page(
        &mock_server,
        0,
        page(&[listing("7", "Kept", &["Busan"], &[], "")], ""),
        1u64,
    )
    .await;

    Mock::given(method("GET"))
        .and(query_param("recruitPage", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let sink = CsvSink::new(dir.path().join("jobs.csv"));

    let report = run_scrape(&config, "rust", &sink).await.unwrap();

    assert_eq!(report.page_count, 3);
    assert_eq!(report.skipped_pages, vec![2]);
    assert_eq!(report.record_count, 1);

    let text = std::fs::read_to_string(&report.output_path).unwrap();
    assert!(text.contains("7,Kept,Busan,,"));
}

#[tokio::test]
async fn test_malformed_next_page_aborts_discovery() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server);

    mount_page(
        &mock_server,
        1,
        page(
            &[],
            r#"<div class="pagination"><span>1</span><a class="btnNext" page="last">next</a></div>"#,
        ),
        1u64,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("jobs.csv");

    let err = run_scrape(&config, "rust", &CsvSink::new(&output))
        .await
        .unwrap_err();

    assert!(matches!(err, HarvestError::MalformedPagination { .. }));
    assert!(!output.exists());
}
