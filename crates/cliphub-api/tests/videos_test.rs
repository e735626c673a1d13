//! Video lifecycle integration tests: upload, reads, update, delete.

mod helpers;

use helpers::{api_path, fake_mp4, setup_test_app, upload_form, upload_form_with_file, MAX_TEST_VIDEO_BYTES};
use http::StatusCode;
use serde_json::Value;

async fn upload_video(app: &helpers::TestApp, owner: &str) -> Value {
    let response = app
        .server
        .post(&api_path("/videos"))
        .multipart(upload_form("T", "D", "a, b ,,c", owner))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

#[tokio::test]
async fn test_upload_video_success() {
    let app = setup_test_app().await;

    let video = upload_video(&app, "u1").await;

    assert_eq!(video["title"], "T");
    assert_eq!(video["description"], "D");
    assert_eq!(video["tags"], serde_json::json!(["a", "b", "c"]));
    assert_eq!(video["owner"], "u1");
    assert_eq!(video["likes"], serde_json::json!([]));
    assert_eq!(video["like_count"], 0);
    assert_eq!(video["comments"], serde_json::json!([]));
    assert!(video["media_url"].as_str().unwrap().starts_with("https://"));
    assert!(!video["id"].as_str().unwrap().is_empty());

    // Internal fields never leave the service.
    assert!(video.get("object_id").is_none());
    assert!(video.get("revision").is_none());

    assert_eq!(app.storage.object_count(), 1);
}

#[tokio::test]
async fn test_upload_rejects_non_video_content_type() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post(&api_path("/videos"))
        .multipart(upload_form_with_file(
            "T",
            "D",
            "",
            "u1",
            fake_mp4(),
            "image/png",
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(app.storage.put_calls(), 0);
    assert_eq!(app.store.record_count(), 0);
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post(&api_path("/videos"))
        .multipart(upload_form_with_file(
            "T",
            "D",
            "",
            "u1",
            Vec::new(),
            "video/mp4",
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.storage.put_calls(), 0);
}

#[tokio::test]
async fn test_upload_rejects_oversize_file() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post(&api_path("/videos"))
        .multipart(upload_form_with_file(
            "T",
            "D",
            "",
            "u1",
            vec![0u8; MAX_TEST_VIDEO_BYTES + 1],
            "video/mp4",
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(app.storage.put_calls(), 0);
}

#[tokio::test]
async fn test_upload_rejects_blank_title() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post(&api_path("/videos"))
        .multipart(upload_form("   ", "D", "", "u1"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.storage.put_calls(), 0);
}

#[tokio::test]
async fn test_upload_compensates_when_metadata_write_fails() {
    let app = setup_test_app().await;
    app.store.set_fail_inserts(true);

    let response = app
        .server
        .post(&api_path("/videos"))
        .multipart(upload_form("T", "D", "", "u1"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "PERSISTENCE_FAILED");

    // The just-written object was removed again, exactly once.
    assert_eq!(app.storage.remove_calls(), 1);
    assert_eq!(app.storage.object_count(), 0);
}

#[tokio::test]
async fn test_get_video_and_not_found() {
    let app = setup_test_app().await;
    let video = upload_video(&app, "u1").await;
    let id = video["id"].as_str().unwrap();

    let response = app.server.get(&api_path(&format!("/videos/{}", id))).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], video["id"]);

    let response = app
        .server
        .get(&api_path(&format!("/videos/{}", uuid::Uuid::new_v4())))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_videos() {
    let app = setup_test_app().await;
    upload_video(&app, "u1").await;
    upload_video(&app, "u2").await;

    let response = app.server.get(&api_path("/videos")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_user_videos() {
    let app = setup_test_app().await;
    upload_video(&app, "u1").await;
    upload_video(&app, "u1").await;
    upload_video(&app, "u2").await;

    let response = app.server.get(&api_path("/users/u1/videos")).await;
    response.assert_status_ok();
    let videos = response.json::<Value>();
    assert_eq!(videos.as_array().unwrap().len(), 2);
    for video in videos.as_array().unwrap() {
        assert_eq!(video["owner"], "u1");
    }

    let response = app.server.get(&api_path("/users/nobody/videos")).await;
    response.assert_status_ok();
    assert!(response.json::<Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_is_owner() {
    let app = setup_test_app().await;
    let video = upload_video(&app, "u1").await;
    let id = video["id"].as_str().unwrap();

    let response = app
        .server
        .get(&api_path(&format!("/videos/{}/is-owner", id)))
        .add_query_param("user", "u1")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["is_owner"], true);

    // Case-sensitive exact match
    let response = app
        .server
        .get(&api_path(&format!("/videos/{}/is-owner", id)))
        .add_query_param("user", "U1")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["is_owner"], false);

    let response = app
        .server
        .get(&api_path(&format!("/videos/{}/is-owner", uuid::Uuid::new_v4())))
        .add_query_param("user", "u1")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_video_partial() {
    let app = setup_test_app().await;
    let video = upload_video(&app, "u1").await;
    let id = video["id"].as_str().unwrap();

    let response = app
        .server
        .patch(&api_path(&format!("/videos/{}", id)))
        .json(&serde_json::json!({
            "title": " Renamed ",
            "description": "   ",
            "tags": "x,y"
        }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["title"], "Renamed");
    // Blank-after-trim fields are left untouched
    assert_eq!(updated["description"], "D");
    assert_eq!(updated["tags"], serde_json::json!(["x", "y"]));
    assert_eq!(updated["media_url"], video["media_url"]);
    assert_eq!(updated["owner"], "u1");
}

#[tokio::test]
async fn test_update_missing_video_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .server
        .patch(&api_path(&format!("/videos/{}", uuid::Uuid::new_v4())))
        .json(&serde_json::json!({ "title": "x" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_video() {
    let app = setup_test_app().await;
    let video = upload_video(&app, "u1").await;
    let id = video["id"].as_str().unwrap();

    let response = app
        .server
        .delete(&api_path(&format!("/videos/{}", id)))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    assert_eq!(app.storage.object_count(), 0);
    let response = app.server.get(&api_path(&format!("/videos/{}", id))).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_keeps_record_when_object_removal_fails() {
    let app = setup_test_app().await;
    let video = upload_video(&app, "u1").await;
    let id = video["id"].as_str().unwrap();

    app.storage.set_fail_remove(true);
    let response = app
        .server
        .delete(&api_path(&format!("/videos/{}", id)))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "STORAGE_UNAVAILABLE");

    // Fail closed: the record is still there and the delete can be retried.
    let response = app.server.get(&api_path(&format!("/videos/{}", id))).await;
    response.assert_status_ok();

    app.storage.set_fail_remove(false);
    let response = app
        .server
        .delete(&api_path(&format!("/videos/{}", id)))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_missing_video_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .server
        .delete(&api_path(&format!("/videos/{}", uuid::Uuid::new_v4())))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}
