use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{OBJECTS_BASE_URL, TestStateBuilder, client};

#[tokio::test]
async fn test_upload_files() {
    let state = TestStateBuilder::new().build();
    let client = client(&state);

    let response = client
        .post_multipart_as_admin(
            "/admin/uploads",
            &[
                ("file", "leaf.png", b"png-bytes".as_slice()),
                ("file", "notes.PDF", b"%PDF-1.4".as_slice()),
            ],
        )
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);

    let first_url = files[0]["url"].as_str().unwrap();
    assert!(first_url.starts_with(&format!("{OBJECTS_BASE_URL}/uploads/")));
    assert!(first_url.ends_with("-leaf.png"));
    assert!(files[1]["name"].as_str().unwrap().ends_with("-notes.pdf"));

    let stored = state.objects.list_objects("uploads").await.unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn test_upload_rejects_other_types() {
    let state = TestStateBuilder::new().build();
    let client = client(&state);

    let response = client
        .post_multipart_as_admin(
            "/admin/uploads",
            &[
                ("file", "leaf.png", b"png-bytes".as_slice()),
                ("file", "run.exe", b"MZ".as_slice()),
            ],
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert!(
        state.objects.list_objects("uploads").await.unwrap().is_empty(),
        "nothing is stored when one file is rejected"
    );
}

#[tokio::test]
async fn test_upload_without_files() {
    let state = TestStateBuilder::new().build();
    let response = client(&state)
        .post_multipart_as_admin("/admin/uploads", &[("other", "leaf.png", b"png".as_slice())])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "No files uploaded");
}

#[tokio::test]
async fn test_upload_rejects_repeated_names() {
    let state = TestStateBuilder::new().build();
    let client = client(&state);

    let response = client
        .post_multipart_as_admin(
            "/admin/uploads",
            &[
                ("file", "leaf.png", b"first".as_slice()),
                ("file", "photos/leaf.PNG", b"second".as_slice()),
            ],
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "File leaf.png is included more than once");

    assert!(state.objects.list_objects("uploads").await.unwrap().is_empty());
}
