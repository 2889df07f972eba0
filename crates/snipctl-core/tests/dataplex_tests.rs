//! Entry type creation against a mock Dataplex API

mod common;

use common::{MockGoogleServer, PROJECT, error_body, fast_wait};
use serde_json::json;
use snipctl_core::WaitOptions;
use snipctl_core::dataplex::{CreateEntryTypeParams, GENERIC_ASPECT_TYPE, create_entry_type_and_wait};
use std::time::{Duration, Instant};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const PARENT: &str = "/projects/my-project/locations/us-central1";
const OPERATION: &str = "projects/my-project/locations/us-central1/operations/operation-1";

fn params() -> CreateEntryTypeParams {
    CreateEntryTypeParams::new(PROJECT, "us-central1", "my-entry-type")
}

async fn mock_create(mock: &MockGoogleServer) {
    Mock::given(method("POST"))
        .and(path(format!("{PARENT}/entryTypes")))
        .and(query_param("entryTypeId", "my-entry-type"))
        .and(body_partial_json(json!({
            "description": "description of the entry type",
            "requiredAspects": [{"type": GENERIC_ASPECT_TYPE}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "metadata": {"verb": "create"}
        })))
        .expect(1)
        .mount(&mock.server)
        .await;
}

#[tokio::test]
async fn test_create_entry_type() {
    let mock = MockGoogleServer::start().await;
    mock_create(&mock).await;

    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "metadata": {"verb": "create"}
        })))
        .up_to_n_times(1)
        .mount(&mock.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "done": true,
            "response": {
                "@type": "type.googleapis.com/google.cloud.dataplex.v1.EntryType",
                "name": "projects/my-project/locations/us-central1/entryTypes/my-entry-type",
                "description": "description of the entry type",
                "requiredAspects": [{"type": GENERIC_ASPECT_TYPE}],
                "createTime": "2024-06-01T12:00:00Z"
            }
        })))
        .mount(&mock.server)
        .await;

    let entry_type = create_entry_type_and_wait(&mock.client(), params(), fast_wait(), None)
        .await
        .unwrap();

    assert!(entry_type.name.ends_with("/entryTypes/my-entry-type"));
    assert_eq!(entry_type.required_aspects.len(), 1);
    assert!(entry_type.create_time.is_some());
}

#[tokio::test]
async fn test_operation_error_is_reported() {
    let mock = MockGoogleServer::start().await;
    mock_create(&mock).await;

    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "done": true,
            "error": {"code": 6, "message": "EntryType my-entry-type already exists"}
        })))
        .mount(&mock.server)
        .await;

    let err = create_entry_type_and_wait(&mock.client(), params(), fast_wait(), None)
        .await
        .unwrap_err();

    assert!(err.is_already_exists(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_permission_denied_on_create() {
    let mock = MockGoogleServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PARENT}/entryTypes")))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_body(
            403,
            "PERMISSION_DENIED",
            "Permission 'dataplex.entryTypes.create' denied",
        )))
        .mount(&mock.server)
        .await;

    let err = create_entry_type_and_wait(&mock.client(), params(), fast_wait(), None)
        .await
        .unwrap_err();

    assert!(err.is_permission_denied());
    assert!(err.to_string().contains("dataplex.entryTypes.create"));
}

#[tokio::test]
async fn test_empty_required_aspects_send_nothing() {
    let mock = MockGoogleServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock.server)
        .await;

    let err = create_entry_type_and_wait(
        &mock.client(),
        params().with_required_aspects(Vec::<String>::new()),
        fast_wait(),
        None,
    )
    .await
    .unwrap_err();

    assert!(err.is_validation());
}

#[tokio::test]
async fn test_slow_operation_poll_stops_at_deadline() {
    let mock = MockGoogleServer::start().await;
    mock_create(&mock).await;

    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": OPERATION}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock.server)
        .await;

    let options = WaitOptions::new(Duration::from_millis(200), Duration::from_millis(10));
    let start = Instant::now();
    let err = create_entry_type_and_wait(&mock.client(), params(), options, None)
        .await
        .unwrap_err();
    let elapsed = start.elapsed();

    assert!(err.is_timeout());
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_secs(1), "waited {elapsed:?}");
}
