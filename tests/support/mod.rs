//! Shared fixtures for integration tests

use metrika_logs_downloader::downloader::{DownloadExecutor, PollConfig};
use metrika_logs_downloader::fetcher::metrika_http::MetrikaHttpClient;
use metrika_logs_downloader::fetcher::LogsApiClient;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const COUNTER_ID: &str = "12345";
pub const TOKEN: &str = "abc";
pub const REQUEST_ID: u64 = 999;

pub const CREATE_PATH: &str = "/management/v1/counter/12345/logrequests";
pub const STATUS_PATH: &str = "/management/v1/counter/12345/logrequest/999";
pub const DOWNLOAD_PATH: &str = "/management/v1/counter/12345/logrequest/999/part/0/download";
pub const CLEAN_PATH: &str = "/management/v1/counter/12345/logrequest/999/clean";

/// Executor against `base_url` with a short polling budget
pub fn executor(base_url: &str, poll: PollConfig) -> DownloadExecutor<MetrikaHttpClient> {
    let transport = MetrikaHttpClient::new(base_url).unwrap();
    DownloadExecutor::new(LogsApiClient::new(transport, COUNTER_ID, TOKEN), poll)
}

pub fn fast_poll(timeout_ms: u64) -> PollConfig {
    PollConfig::default()
        .with_timeout(Duration::from_millis(timeout_ms))
        .with_interval(Duration::from_millis(20))
}

pub fn log_request(status: &str) -> serde_json::Value {
    json!({
        "log_request": {
            "request_id": REQUEST_ID,
            "counter_id": 12345,
            "source": "visits",
            "date1": "2024-03-01",
            "date2": "2024-03-02",
            "status": status
        }
    })
}

/// Tab-separated export body of exactly `len` bytes
pub fn export_body(len: usize) -> Vec<u8> {
    let mut body = b"ym:s:visitID\tym:s:date\n".to_vec();
    while body.len() < len {
        body.extend_from_slice(b"1\t2024-03-01\n");
    }
    body.truncate(len);
    body
}

pub async fn mount_create(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(log_request("created")))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, status: &str) {
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(log_request(status)))
        .mount(server)
        .await;
}

pub async fn mount_download(server: &MockServer, body: Vec<u8>, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(DOWNLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_clean(server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(CLEAN_PATH))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(server)
        .await;
}
