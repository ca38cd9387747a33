use axum::http::StatusCode;
use serde_json::{Value, json};
use tc_db::models::Comment;

use crate::common::{
    OBJECTS_BASE_URL, TestStateBuilder, client,
    seed::{self, TopicSeed},
};

fn new_comment(name: &str) -> Value {
    json!({
        "name": name,
        "email": "reader@example.com",
        "comment": format!("Thanks from {name}"),
    })
}

#[tokio::test]
async fn test_subcategory_page() {
    let state = TestStateBuilder::new().build();
    seed::topic(
        &state,
        TopicSeed {
            title: "Light and Shadow",
            sub_category: "Light",
            created: 1,
            files: &["https://cdn.example/ray.png"],
            ..TopicSeed::default()
        },
    )
    .await;
    seed::topic(
        &state,
        TopicSeed {
            title: "Mirrors",
            sub_category: "Light",
            created: 2,
            ..TopicSeed::default()
        },
    )
    .await;
    state
        .objects
        .put_object("files/Light/worksheet.pdf", b"%PDF".to_vec())
        .await
        .unwrap();
    let client = client(&state);

    client
        .post_json("/subcategories/Light/comments", &new_comment("Asha"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = client.get("/subcategories/Light").await;
    response.assert_status(StatusCode::OK);
    let page: Value = response.json();

    assert_eq!(page["subCategory"], "Light");
    assert_eq!(page["title"], "Light and Shadow");
    assert_eq!(page["topics"].as_array().unwrap().len(), 2);
    assert_eq!(page["topics"][0]["attachments"][0]["kind"], "image");
    assert_eq!(page["files"][0]["name"], "worksheet.pdf");
    assert_eq!(
        page["files"][0]["url"],
        format!("{OBJECTS_BASE_URL}/files/Light/worksheet.pdf")
    );
    assert_eq!(page["comments"][0]["name"], "Asha");
}

#[tokio::test]
async fn test_empty_subcategory_page() {
    let state = TestStateBuilder::new().build();
    let response = client(&state).get("/subcategories/Nothing%20Here").await;

    response.assert_status(StatusCode::OK);
    let page: Value = response.json();
    assert_eq!(page["subCategory"], "Nothing Here");
    assert!(page["title"].is_null());
    assert!(page["topics"].as_array().unwrap().is_empty());
    assert!(page["files"].as_array().unwrap().is_empty());
    assert!(page["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_validation() {
    let state = TestStateBuilder::new().build();
    let client = client(&state);

    let response = client
        .post_json(
            "/subcategories/Plants/comments",
            &json!({ "name": "Asha", "email": "not-an-email", "comment": "Hi" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Please enter a valid email address.");

    let response = client
        .post_json(
            "/subcategories/Plants/comments",
            &json!({ "name": "  ", "email": "a@example.com", "comment": "Hi" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Please enter your name.");

    let comments: Vec<Comment> = client.get("/subcategories/Plants/comments").await.json();
    assert!(comments.is_empty(), "rejected comments are not stored");
}

#[tokio::test]
async fn test_replies_append_in_order() {
    let state = TestStateBuilder::new().build();
    let client = client(&state);

    let created: Comment = client
        .post_json("/subcategories/Plants/comments", &new_comment("Asha"))
        .await
        .json();
    assert!(created.replies.is_empty());

    let uri = format!("/subcategories/Plants/comments/{}/replies", created.id);
    client
        .post_json(&uri, &json!({ "reply": "First" }))
        .await
        .assert_status(StatusCode::OK);
    let updated: Comment = client
        .post_json(&uri, &json!({ "reply": "Second" }))
        .await
        .json();
    assert_eq!(updated.replies, vec!["First", "Second"]);

    let comments: Vec<Comment> = client.get("/subcategories/Plants/comments").await.json();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].replies, vec!["First", "Second"]);

    // Other subcategories do not see it
    let other: Vec<Comment> = client.get("/subcategories/Rivers/comments").await.json();
    assert!(other.is_empty());
}

#[tokio::test]
async fn test_blank_reply_is_rejected() {
    let state = TestStateBuilder::new().build();
    let client = client(&state);

    let created: Comment = client
        .post_json("/subcategories/Plants/comments", &new_comment("Asha"))
        .await
        .json();
    let uri = format!("/subcategories/Plants/comments/{}/replies", created.id);

    let response = client.post_json(&uri, &json!({ "reply": "   " })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Please enter a reply.");

    let comments: Vec<Comment> = client.get("/subcategories/Plants/comments").await.json();
    assert!(comments[0].replies.is_empty());
}

#[tokio::test]
async fn test_reply_to_unknown_comment() {
    let state = TestStateBuilder::new().build();
    let response = client(&state)
        .post_json(
            "/subcategories/Plants/comments/missing/replies",
            &json!({ "reply": "Hello" }),
        )
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_writes_are_rate_limited() {
    let state = TestStateBuilder::new().build();
    let client = client(&state);

    let mut statuses = Vec::new();
    for i in 0..15 {
        let response = client
            .post_json(
                "/subcategories/Plants/comments",
                &new_comment(&format!("Reader {i}")),
            )
            .await;
        statuses.push(response.status);
    }

    assert!(
        statuses.contains(&StatusCode::TOO_MANY_REQUESTS),
        "Burst should be limited. Got statuses: {statuses:?}"
    );
    assert!(statuses.contains(&StatusCode::CREATED));

    // Reads are not limited
    client
        .get("/subcategories/Plants/comments")
        .await
        .assert_status(StatusCode::OK);
}
