//! Integration tests for the `/breaks` and `/revisions` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_empty, post_json, put_json};
use serde_json::json;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test: create and list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_and_lists_in_order() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "12:00", "end": "12:30", "description": "Lunch"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["start"], "12:00");
    assert_eq!(json["data"]["is_deleted"], false);

    let response = post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "9:00", "end": "9:15"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(app, "/api/v1/breaks").await).await;
    let breaks = json["data"].as_array().unwrap();
    assert_eq!(breaks.len(), 2);
    assert_eq!(breaks[0]["start"], "09:00");
    assert_eq!(breaks[0]["description"], "");
    assert_eq!(breaks[1]["description"], "Lunch");
}

// ---------------------------------------------------------------------------
// Test: the morning scenario end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overlap_is_rejected_with_conflicting_id() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "08:00", "end": "08:15", "description": "Morning"}),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["id"], 1);

    let response = post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "08:10", "end": "08:20", "description": "Conflict"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("existing break 1"));

    let response = put_json(
        app.clone(),
        "/api/v1/breaks/1",
        json!({"start": "08:00", "end": "08:10", "description": "Morning"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/v1/breaks",
        json!({"start": "08:10", "end": "08:20", "description": "NowOK"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["id"], 2);
}

#[tokio::test]
async fn malformed_time_returns_400() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    for bad in ["9:5", "24:00", "12:60", "noon"] {
        let response = post_json(
            app.clone(),
            "/api/v1/breaks",
            json!({"start": bad, "end": "23:59"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let json = body_json(get(app, "/api/v1/breaks?include_deleted=true").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: get / update / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_break_returns_404() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = get(app.clone(), "/api/v1/breaks/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Break with id 99 not found");

    let response = put_json(
        app.clone(),
        "/api/v1/breaks/99",
        json!({"start": "08:00", "end": "08:10"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(app.clone(), "/api/v1/breaks/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/v1/breaks/99/revisions").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_204_and_hides_break() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "10:00", "end": "10:15"}),
    )
    .await;

    let response = delete(app.clone(), "/api/v1/breaks/1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app.clone(), "/api/v1/breaks").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let json = body_json(get(app.clone(), "/api/v1/breaks?include_deleted=true").await).await;
    assert_eq!(json["data"][0]["is_deleted"], true);

    // Still readable by id, but no longer updatable.
    let response = get(app.clone(), "/api/v1/breaks/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = put_json(
        app,
        "/api/v1/breaks/1",
        json!({"start": "10:00", "end": "10:20"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: revisions and restore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn revisions_track_changes_newest_first() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "09:00", "end": "09:15"}),
    )
    .await;
    put_json(
        app.clone(),
        "/api/v1/breaks/1",
        json!({"start": "09:30", "end": "09:45"}),
    )
    .await;

    let json = body_json(get(app.clone(), "/api/v1/breaks/1/revisions").await).await;
    let revs = json["data"].as_array().unwrap();
    assert_eq!(revs.len(), 2);
    assert_eq!(revs[0]["change_type"], "update");
    assert_eq!(revs[0]["changed_by"], "unknown");
    assert_eq!(revs[1]["change_type"], "create");

    let json = body_json(get(app.clone(), "/api/v1/revisions?break_id=1").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    let json = body_json(get(app, "/api/v1/revisions?break_id=2").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn restore_reverts_and_conflicts_are_rejected() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "09:00", "end": "09:15"}),
    )
    .await;
    put_json(
        app.clone(),
        "/api/v1/breaks/1",
        json!({"start": "09:30", "end": "09:45"}),
    )
    .await;

    let json = body_json(get(app.clone(), "/api/v1/breaks/1/revisions").await).await;
    let create_rev = json["data"][1]["id"].as_i64().unwrap();

    let response = post_empty(app.clone(), &format!("/api/v1/revisions/{create_rev}/restore")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["start"], "09:00");
    assert_eq!(json["data"]["end"], "09:15");

    // Move it away again and occupy the old slot.
    put_json(
        app.clone(),
        "/api/v1/breaks/1",
        json!({"start": "11:00", "end": "11:15"}),
    )
    .await;
    post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "09:00", "end": "09:15"}),
    )
    .await;

    let response = post_empty(app.clone(), &format!("/api/v1/revisions/{create_rev}/restore")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(app, "/api/v1/breaks/1").await).await;
    assert_eq!(json["data"]["start"], "11:00");
}

#[tokio::test]
async fn restore_reactivates_deleted_break() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "14:00", "end": "14:10"}),
    )
    .await;
    delete(app.clone(), "/api/v1/breaks/1").await;

    let json = body_json(get(app.clone(), "/api/v1/revisions").await).await;
    assert_eq!(json["data"][0]["change_type"], "delete");
    let delete_rev = json["data"][0]["id"].as_i64().unwrap();

    let response = post_empty(app.clone(), &format!("/api/v1/revisions/{delete_rev}/restore")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_deleted"], false);

    let json = body_json(get(app, "/api/v1/breaks").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn restore_unknown_revision_returns_404() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = post_empty(app, "/api/v1/revisions/123/restore").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Revision with id 123 not found"
    );
}

// ---------------------------------------------------------------------------
// Test: combined config
// ---------------------------------------------------------------------------

#[tokio::test]
async fn config_returns_active_breaks_and_sounds() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    post_json(
        app.clone(),
        "/api/v1/breaks",
        json!({"start": "10:00", "end": "10:15", "description": "Coffee"}),
    )
    .await;
    put_json(
        app.clone(),
        "/api/v1/sounds/settings/break_start",
        json!({"value": "gong.mp3"}),
    )
    .await;

    let response = get(app, "/api/v1/config").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["breaks"][0]["description"], "Coffee");
    assert_eq!(json["data"]["sounds"]["break_start"], "gong.mp3");
}

// ---------------------------------------------------------------------------
// Test: malformed path ids use the JSON error envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_numeric_id_returns_json_400() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = get(app.clone(), "/api/v1/breaks/lunch").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = post_empty(app, "/api/v1/revisions/latest/restore").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
