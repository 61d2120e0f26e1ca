use axum::http::StatusCode;
use serde_json::json;

use crate::tests::helper;

#[tokio::test]
async fn test_like() {
    let mut test_app = helper::setup_test_app().await;
    let app = &mut test_app.app;

    helper::create_note(app, "T", "L").await;

    let (status_code, response, _) = helper::maybe_like_note(app, "1", Some("u1")).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(json!({ "id": 1, "likes": 1, "liked": true })), response);

    let (status_code, response, _) = helper::maybe_like_note(app, "1", Some("u1")).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(json!({ "id": 1, "likes": 0, "liked": false })), response);

    let (_, note, _) = helper::single_note(app, "1").await;
    assert_eq!(0, note.unwrap().likes);
}

#[tokio::test]
async fn test_like_multiple_users() {
    let mut test_app = helper::setup_test_app().await;
    let app = &mut test_app.app;

    helper::create_note(app, "T", "L").await;

    let (_, response, _) = helper::maybe_like_note(app, "1", Some("u1")).await;
    assert_eq!(Some(json!({ "id": 1, "likes": 1, "liked": true })), response);

    let (_, response, _) = helper::maybe_like_note(app, "1", Some("u2")).await;
    assert_eq!(Some(json!({ "id": 1, "likes": 2, "liked": true })), response);

    let (_, response, _) = helper::maybe_like_note(app, "1", Some("u1")).await;
    assert_eq!(Some(json!({ "id": 1, "likes": 1, "liked": false })), response);

    // likers are persisted
    let document: serde_json::Value =
        serde_json::from_str(&test_app.notes_document()).unwrap();
    assert_eq!(json!(["u2"]), document[0]["liked_by"]);
    assert_eq!(json!(1), document[0]["likes"]);
}

#[tokio::test]
async fn test_like_without_user() {
    let mut test_app = helper::setup_test_app().await;
    let app = &mut test_app.app;

    helper::create_note(app, "T", "L").await;

    let (status_code, _, error) = helper::maybe_like_note(app, "1", None).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("`User-ID` header is required", error.unwrap().error);

    let (status_code, _, error) = helper::maybe_like_note(app, "1", Some("")).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("`User-ID` header is required", error.unwrap().error);

    let (_, note, _) = helper::single_note(app, "1").await;
    assert_eq!(0, note.unwrap().likes);
}

#[tokio::test]
async fn test_like_unknown_note() {
    let mut test_app = helper::setup_test_app().await;

    let (status_code, _, error) =
        helper::maybe_like_note(&mut test_app.app, "42", Some("u1")).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Note not found", error.unwrap().error);

    assert_eq!("[]", test_app.notes_document());
}

#[tokio::test]
async fn test_like_at_the_limit() {
    let mut test_app = helper::setup_test_app().await;
    let app = &mut test_app.app;

    let (status_code, _, _) = helper::maybe_create_note_with_payload(
        app,
        &json!({ "title": "T", "drive_link": "L", "likes": i64::MAX }),
    )
    .await;
    assert_eq!(StatusCode::CREATED, status_code);

    let (status_code, _, error) = helper::maybe_like_note(app, "1", Some("u1")).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Likes of the note are out of range", error.unwrap().error);

    // nothing changed
    let (_, note, _) = helper::single_note(app, "1").await;
    assert_eq!(i64::MAX, note.unwrap().likes);

    let document: serde_json::Value =
        serde_json::from_str(&test_app.notes_document()).unwrap();
    assert!(document[0].get("liked_by").is_none());
}
