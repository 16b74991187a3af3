use std::time::Duration;

use pretty_assertions::assert_eq;
use sitecopy_remote::{
    ApiError, ApiSettings, HttpJobApi, JobApi, JobStateDto, JobStatusDto, StepDto, StepStateDto,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpJobApi {
    let settings = ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    };
    HttpJobApi::new(settings).expect("build client")
}

#[tokio::test]
async fn submit_returns_the_job_handle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/copy"))
        .and(body_json(serde_json::json!({ "url": "https://example.com" })))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "job_id": "abc",
            "status": "processing",
            "message": "Job started",
        })))
        .mount(&server)
        .await;

    let receipt = api_for(&server)
        .submit("https://example.com")
        .await
        .expect("submit ok");
    assert_eq!(receipt.job_id, "abc");
}

#[tokio::test]
async fn submit_rejection_carries_the_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/copy"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "error": "URL is required" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .submit("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 400,
            message: Some("URL is required".to_string()),
        }
    );
}

#[tokio::test]
async fn submit_rejection_without_a_body_keeps_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/copy"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .submit("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 500,
            message: None,
        }
    );
}

#[tokio::test]
async fn submit_times_out_on_a_slow_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/copy"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({ "job_id": "abc" })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    };
    let api = HttpJobApi::new(settings).expect("build client");

    let err = api.submit("https://example.com").await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}

#[tokio::test]
async fn status_decodes_a_full_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job_id": "abc",
            "status": "completed",
            "progress": 100,
            "message": "Copy finished",
            "steps": [
                { "status": "completed", "message": "Download main page" },
                { "status": "current", "message": "Save final HTML" },
                { "status": "pending", "message": "Archive" },
            ],
            "url": "https://example.com",
            "output_path": "/out/example.com_2026-08-07",
            "error": null,
            "completed_at": "2026-08-07T12:00:00",
        })))
        .mount(&server)
        .await;

    let snapshot = api_for(&server).status("abc").await.expect("status ok");
    assert_eq!(
        snapshot,
        JobStatusDto {
            status: JobStateDto::Completed,
            progress: 100,
            message: Some("Copy finished".to_string()),
            steps: vec![
                StepDto {
                    status: StepStateDto::Completed,
                    message: "Download main page".to_string(),
                },
                StepDto {
                    status: StepStateDto::Current,
                    message: "Save final HTML".to_string(),
                },
                StepDto {
                    status: StepStateDto::Pending,
                    message: "Archive".to_string(),
                },
            ],
            url: Some("https://example.com".to_string()),
            output_path: Some("/out/example.com_2026-08-07".to_string()),
            error: None,
            completed_at: Some("2026-08-07T12:00:00".to_string()),
        }
    );
}

#[tokio::test]
async fn unrecognized_state_strings_become_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "processing",
            "progress": 5,
            "steps": [{ "status": "paused", "message": "Download assets" }],
        })))
        .mount(&server)
        .await;

    let snapshot = api_for(&server).status("abc").await.expect("status ok");
    assert_eq!(snapshot.status, JobStateDto::Unknown);
    assert_eq!(snapshot.steps[0].status, StepStateDto::Other);
}

#[tokio::test]
async fn status_defaults_absent_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let snapshot = api_for(&server).status("abc").await.expect("status ok");
    assert_eq!(snapshot.status, JobStateDto::Unknown);
    assert_eq!(snapshot.progress, 0);
    assert_eq!(snapshot.message, None);
    assert!(snapshot.steps.is_empty());
    assert_eq!(snapshot.url, None);
    assert_eq!(snapshot.output_path, None);
}

#[test]
fn resource_urls_are_fixed_per_job() {
    let settings = ApiSettings {
        base_url: "http://copy.local:5000/".to_string(),
        connect_timeout: Duration::from_secs(1),
        request_timeout: Duration::from_secs(1),
    };
    let api = HttpJobApi::new(settings).expect("build client");

    assert_eq!(api.download_url("abc"), "http://copy.local:5000/api/download/abc");
    assert_eq!(api.preview_url("abc"), "http://copy.local:5000/api/preview/abc");
}
