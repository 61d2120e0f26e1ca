use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_invalid_json() {
    let mut test_app = helper::setup_test_app().await;
    let app = &mut test_app.app;

    // wrong type of data
    let body = r"[]";
    let (status_code, _, error) = helper::maybe_create_note_with_raw_body(app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!("Data error".to_string(), error.error);
    assert!(
        error
            .description
            .unwrap()
            .starts_with("Failed to deserialize the JSON body into the target type")
    );

    // the fields in order are not a note either
    let body = r#"["T","L","","","","","recent",0,false]"#;
    let (status_code, _, error) = helper::maybe_create_note_with_raw_body(app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Data error".to_string(), error.unwrap().error);

    // wrong type of field
    let body = r#"{"title":"T","drive_link":"L","subtitle":3}"#;
    let (status_code, _, error) = helper::maybe_create_note_with_raw_body(app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let error = error.unwrap();
    assert_eq!("Data error".to_string(), error.error);
    assert!(error.description.unwrap().contains("expected a string"));

    // syntax error
    let body = r#"{"}"#;
    let (status_code, _, error) = helper::maybe_create_note_with_raw_body(app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!("JSON syntax error".to_string(), error.error);
    assert_eq!(
        Some("EOF while parsing a string at line 1 column 3".to_string()),
        error.description
    );

    // missing content type
    let body = r#"{"title":"T","drive_link":"L"}"#;
    let (status_code, _, error) = helper::maybe_create_note_with_raw_body(app, body, false).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!(
        "Missing `application/json` content type".to_string(),
        error.error
    );

    // nothing got stored
    assert_eq!("[]", test_app.notes_document());
}
