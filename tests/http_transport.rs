//! Drives the reqwest transport against a local mock server.

use emaillistverify::{ApiClient, BulkManager, ConfigBuilder, ErrorKind, JobState, VerifyOutcome};
use httpmock::prelude::*;
use std::time::Duration;

fn client_for(server: &MockServer) -> ApiClient {
    let config = ConfigBuilder::new()
        .base_url(server.base_url())
        .user_agent("elv-test/1.0")
        .request_timeout(Duration::from_secs(5))
        .check_interval(Duration::from_millis(10))
        .build()
        .unwrap();
    ApiClient::from_config("k3y", &config).unwrap()
}

#[tokio::test]
async fn verify_sends_secret_email_and_user_agent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/verifyEmail")
            .query_param("secret", "k3y")
            .query_param("email", "a+tag@example.com")
            .header("user-agent", "elv-test/1.0");
        then.status(200).body("ok\n");
    });

    let client = client_for(&server);
    let outcome = client.verify_email("a+tag@example.com").await.unwrap();

    mock.assert();
    match outcome {
        VerifyOutcome::Plain(result) => {
            assert_eq!(result.email, "a+tag@example.com");
            assert_eq!(result.status.as_str(), "ok");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_map_to_request_errors() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/getCredits");
        then.status(503).body("maintenance");
    });

    let client = client_for(&server);
    let err = client.get_credits().await.unwrap_err();

    assert_eq!(mock.calls(), 1);
    assert_eq!(err.kind(), ErrorKind::Request);
    assert!(err.to_string().contains("503"));
    assert!(!err.to_string().contains("k3y"));
}

#[tokio::test]
async fn connection_failure_does_not_leak_secret() {
    let config = ConfigBuilder::new()
        .base_url("http://127.0.0.1:9")
        .request_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let client = ApiClient::from_config("do-not-print", &config).unwrap();

    let err = client.verify_email("a@b.com").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Request);
    assert!(!err.to_string().contains("do-not-print"));
}

#[tokio::test]
async fn upload_is_a_multipart_post() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.csv");
    std::fs::write(&input, "email\na@example.com\n").unwrap();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/verifApiFile")
            .query_param("secret", "k3y")
            .query_param("filename", "list.csv")
            .header_exists("content-type");
        then.status(200).body("4242");
    });

    let client = client_for(&server);
    let file_id = client.bulk_upload(&input, Some("list.csv")).await.unwrap();

    mock.assert();
    assert_eq!(file_id, "4242");
}

#[tokio::test]
async fn full_bulk_workflow_writes_results() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "email\na@example.com\n").unwrap();

    let server = MockServer::start();
    let upload = server.mock(|when, then| {
        when.method(POST).path("/verifApiFile");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"file_id":"77"}"#);
    });
    let status = server.mock(|when, then| {
        when.method(GET)
            .path("/getApiFileInfo")
            .query_param("file_id", "77");
        then.status(200)
            .body(r#"{"status":"completed","total":1,"processed":1}"#);
    });
    let download = server.mock(|when, then| {
        when.method(GET)
            .path("/downloadApiFile")
            .query_param("file_id", "77");
        then.status(200).body("email,result\na@example.com,ok\n");
    });

    let manager = BulkManager::new(client_for(&server));
    let job = manager.process_csv_file(&input, &output, true).await.unwrap();

    upload.assert();
    status.assert();
    download.assert();
    assert_eq!(job.status, JobState::Completed);
    assert_eq!(job.final_status.unwrap().total(), Some(1));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "email,result\na@example.com,ok\n"
    );
}
