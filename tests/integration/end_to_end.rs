//! End-to-end downloads against a mocked Logs API

use crate::support::*;
use metrika_logs_downloader::downloader::DownloadError;
use metrika_logs_downloader::{DateRange, Source};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn range() -> DateRange {
    DateRange::parse("2024-03-01", "2024-03-02").unwrap()
}

#[tokio::test]
async fn test_download_saves_file_and_cleans_up() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .and(query_param("date1", "2024-03-01"))
        .and(query_param("date2", "2024-03-02"))
        .and(query_param("source", "visits"))
        .and(header("Authorization", "OAuth abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(log_request("created")))
        .expect(1)
        .mount(&server)
        .await;
    mount_status(&server, "processed").await;
    mount_download(&server, export_body(2000), 1).await;
    mount_clean(&server, 200, 1).await;

    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("data");
    let uri = server.uri();
    let target = out.clone();
    let saved = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(2_000)).execute(&range(), Source::Visits, &target)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(saved.path, out.join("visits_2024-03-01_to_2024-03-02.csv"));
    assert_eq!(saved.bytes, 2000);
    assert_eq!(std::fs::read(&saved.path).unwrap(), export_body(2000));
}

#[tokio::test]
async fn test_fields_parameter_lists_visit_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .and(query_param(
            "fields",
            metrika_logs_downloader::fetcher::metrika_config::source_profile(Source::Visits)
                .unwrap()
                .fields_param(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(log_request("created")))
        .expect(1)
        .mount(&server)
        .await;
    mount_status(&server, "processed").await;
    mount_download(&server, export_body(1500), 1).await;
    mount_clean(&server, 200, 1).await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let out = temp_dir.path().to_path_buf();
    let result = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(2_000)).execute(&range(), Source::Visits, &out)
    })
    .await
    .unwrap();

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cleanup_failure_does_not_fail_download() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    mount_status(&server, "processed").await;
    mount_download(&server, export_body(2000), 1).await;
    mount_clean(&server, 500, 1).await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let out = temp_dir.path().join("data");
    let saved = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(2_000)).execute(&range(), Source::Visits, &out)
    })
    .await
    .unwrap()
    .unwrap();

    assert!(saved.path.exists());
}

#[tokio::test]
async fn test_create_rejection_reports_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "errors": [], "code": 400, "message": "Wrong date range" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_clean(&server, 200, 0).await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let out = temp_dir.path().to_path_buf();
    let err = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(2_000)).execute(&range(), Source::Visits, &out)
    })
    .await
    .unwrap()
    .unwrap_err();

    match err {
        DownloadError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Wrong date range");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_small_export_reported_as_empty() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    mount_status(&server, "processed").await;
    mount_download(&server, export_body(100), 1).await;
    mount_clean(&server, 200, 1).await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let out = temp_dir.path().join("data");
    let check = out.clone();
    let err = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(2_000)).execute(&range(), Source::Visits, &out)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, DownloadError::EmptyResult { bytes: 100 }));
    assert!(!check.join("visits_2024-03-01_to_2024-03-02.csv").exists());
}

#[tokio::test]
async fn test_hits_source_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let out = temp_dir.path().to_path_buf();
    let err = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(2_000)).execute(&range(), Source::Hits, &out)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, DownloadError::UnsupportedSource(Source::Hits)));
}

#[tokio::test]
async fn test_path_like_request_id_rejected_before_follow_up_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "log_request": { "request_id": "1/clean", "status": "created" } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/management/v1/counter/12345/logrequest/1/clean"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let out = temp_dir.path().to_path_buf();
    let err = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(2_000)).execute(&range(), Source::Visits, &out)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(
        err,
        DownloadError::Fetcher(metrika_logs_downloader::fetcher::FetcherError::ParseError(_))
    ));
}
