//! Polling outcomes against a mocked Logs API

use crate::support::*;
use metrika_logs_downloader::downloader::{DownloadError, JobStatus};
use metrika_logs_downloader::{DateRange, Source};
use std::time::Duration;
use tempfile::TempDir;

fn range() -> DateRange {
    DateRange::parse("2024-03-01", "2024-03-02").unwrap()
}

#[tokio::test]
async fn test_never_processed_times_out_and_cleans_up() {
    let server = wiremock::MockServer::start().await;
    mount_create(&server).await;
    mount_status(&server, "processing").await;
    mount_download(&server, export_body(2000), 0).await;
    mount_clean(&server, 200, 1).await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let out = temp_dir.path().to_path_buf();
    let err = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(300)).execute(&range(), Source::Visits, &out)
    })
    .await
    .unwrap()
    .unwrap_err();

    match err {
        DownloadError::Timeout { attempts, elapsed } => {
            assert!(attempts >= 1);
            assert!(elapsed >= Duration::from_millis(300));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_canceled_request_fails_without_download() {
    let server = wiremock::MockServer::start().await;
    mount_create(&server).await;
    mount_status(&server, "canceled").await;
    mount_download(&server, export_body(2000), 0).await;
    mount_clean(&server, 200, 1).await;

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
        DownloadError::JobFailed { request_id, status } => {
            assert_eq!(request_id, REQUEST_ID.to_string());
            assert_eq!(status, JobStatus::Canceled);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_failure_path_cleanup_can_be_disabled() {
    let server = wiremock::MockServer::start().await;
    mount_create(&server).await;
    mount_status(&server, "processing_failed").await;
    mount_clean(&server, 200, 0).await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let out = temp_dir.path().to_path_buf();
    let err = tokio::task::spawn_blocking(move || {
        executor(&uri, fast_poll(2_000))
            .with_cleanup_on_failure(false)
            .execute(&range(), Source::Visits, &out)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(
        err,
        DownloadError::JobFailed {
            status: JobStatus::Failed,
            ..
        }
    ));
}
