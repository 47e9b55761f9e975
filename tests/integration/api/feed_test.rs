//! Feed API integration tests
//!
//! Role-gated posting, newest-first listing with like counts, and the
//! like toggle.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::assert_error;
use crate::common::{create_student, create_teacher, TestApp, TestUser};

async fn publish(app: &TestApp, author: &TestUser, text: &str) -> Value {
    let (status, body) = app
        .post("/feeds/", Some(&author.token), json!({"text": text}))
        .await;
    assert_eq!(status, StatusCode::CREATED, "publish failed: {}", body);
    body
}

fn like_uri(feed: &Value) -> String {
    format!("/feeds/{}/like/", feed["id"].as_str().unwrap())
}

#[tokio::test]
async fn test_feeds_require_authentication() {
    let app = TestApp::new().await;

    assert_error!(
        app.get("/feeds/", None).await,
        StatusCode::UNAUTHORIZED,
        "Authentication credentials were not provided."
    );
    assert_error!(
        app.post("/feeds/", None, json!({"text": "hi"})).await,
        StatusCode::UNAUTHORIZED,
        "Authentication credentials were not provided."
    );
}

#[tokio::test]
async fn test_teacher_creates_feed() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;

    let (status, body) = app
        .post(
            "/feeds/",
            Some(&tom.token),
            json!({"text": "Exam on Friday", "image": "boards/exam.png"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], tom.user.id.to_string());
    assert_eq!(body["author_name"], "Tom");
    assert_eq!(body["text"], "Exam on Friday");
    assert_eq!(body["image"], "boards/exam.png");
    assert_eq!(body["likes_count"], 0);
    assert_eq!(app.db.count("feeds").await, 1);
}

#[tokio::test]
async fn test_author_cannot_be_set_by_client() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;
    let alice = create_student(app.db.pool(), &app.tokens, "Alice").await;

    let (status, body) = app
        .post(
            "/feeds/",
            Some(&tom.token),
            json!({"text": "mine", "user_id": alice.user.id}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], tom.user.id.to_string());
}

#[tokio::test]
async fn test_student_cannot_create_feed() {
    let app = TestApp::new().await;
    let alice = create_student(app.db.pool(), &app.tokens, "Alice").await;

    assert_error!(
        app.post("/feeds/", Some(&alice.token), json!({"text": "hello"}))
            .await,
        StatusCode::FORBIDDEN,
        "Only teachers can create feeds."
    );
    assert_eq!(app.db.count("feeds").await, 0);
}

#[tokio::test]
async fn test_feed_text_limit() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;

    let (status, body) = app
        .post("/feeds/", Some(&tom.token), json!({"text": "x".repeat(1001)}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["text"],
        json!(["Ensure this field has no more than 1000 characters."])
    );
}

#[tokio::test]
async fn test_list_is_newest_first_with_counts() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;
    let alice = create_student(app.db.pool(), &app.tokens, "Alice").await;
    let bob = create_student(app.db.pool(), &app.tokens, "Bob").await;

    let first = publish(&app, &tom, "first").await;
    let second = publish(&app, &tom, "second").await;
    let third = publish(&app, &tom, "third").await;

    app.post(&like_uri(&first), Some(&alice.token), json!({})).await;
    app.post(&like_uri(&first), Some(&bob.token), json!({})).await;
    app.post(&like_uri(&third), Some(&bob.token), json!({})).await;

    let (status, body) = app.get("/feeds/", Some(&alice.token)).await;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<(&str, i64)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["text"].as_str().unwrap(), f["likes_count"].as_i64().unwrap()))
        .collect();
    assert_eq!(listed, vec![("third", 1), ("second", 0), ("first", 2)]);
    assert_eq!(body[1]["id"], second["id"]);
}

#[tokio::test]
async fn test_like_then_unlike() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;
    let alice = create_student(app.db.pool(), &app.tokens, "Alice").await;
    let feed = publish(&app, &tom, "hello").await;

    let (status, body) = app.post(&like_uri(&feed), Some(&alice.token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"action": "liked", "likes_count": 1}));

    let (status, body) = app.post(&like_uri(&feed), Some(&alice.token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"action": "unliked", "likes_count": 0}));
}

#[tokio::test]
async fn test_likes_from_different_students_accumulate() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;
    let alice = create_student(app.db.pool(), &app.tokens, "Alice").await;
    let bob = create_student(app.db.pool(), &app.tokens, "Bob").await;
    let feed = publish(&app, &tom, "hello").await;

    app.post(&like_uri(&feed), Some(&alice.token), json!({})).await;
    let (_, body) = app.post(&like_uri(&feed), Some(&bob.token), json!({})).await;
    assert_eq!(body, json!({"action": "liked", "likes_count": 2}));

    let (_, body) = app.post(&like_uri(&feed), Some(&alice.token), json!({})).await;
    assert_eq!(body, json!({"action": "unliked", "likes_count": 1}));
}

#[tokio::test]
async fn test_teacher_cannot_like() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;
    let feed = publish(&app, &tom, "hello").await;

    assert_error!(
        app.post(&like_uri(&feed), Some(&tom.token), json!({})).await,
        StatusCode::FORBIDDEN,
        "Only students can like feeds."
    );
    assert_eq!(app.db.count("feed_likes").await, 0);
}

#[tokio::test]
async fn test_like_unknown_feed_is_not_found_before_role_check() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;
    let alice = create_student(app.db.pool(), &app.tokens, "Alice").await;
    let uri = format!("/feeds/{}/like/", Uuid::new_v4());

    assert_error!(
        app.post(&uri, Some(&alice.token), json!({})).await,
        StatusCode::NOT_FOUND,
        "Feed not found."
    );
    assert_error!(
        app.post(&uri, Some(&tom.token), json!({})).await,
        StatusCode::NOT_FOUND,
        "Feed not found."
    );
    assert_error!(
        app.post("/feeds/42/like/", Some(&alice.token), json!({})).await,
        StatusCode::NOT_FOUND,
        "Not found."
    );
}

#[tokio::test]
async fn test_deleting_author_removes_posts_and_likes() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;
    let alice = create_student(app.db.pool(), &app.tokens, "Alice").await;
    let feed = publish(&app, &tom, "hello").await;
    app.post(&like_uri(&feed), Some(&alice.token), json!({})).await;

    let (status, _) = app
        .delete(&format!("/profile/{}/", tom.user.id), Some(&tom.token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/feeds/", Some(&alice.token)).await;
    assert_eq!(body, json!([]));
    assert_eq!(app.db.count("feed_likes").await, 0);
}

#[tokio::test]
async fn test_deleting_student_removes_their_likes() {
    let app = TestApp::new().await;
    let tom = create_teacher(app.db.pool(), &app.tokens, "Tom").await;
    let alice = create_student(app.db.pool(), &app.tokens, "Alice").await;
    let bob = create_student(app.db.pool(), &app.tokens, "Bob").await;
    let feed = publish(&app, &tom, "hello").await;
    app.post(&like_uri(&feed), Some(&alice.token), json!({})).await;
    app.post(&like_uri(&feed), Some(&bob.token), json!({})).await;

    app.delete(&format!("/profile/{}/", alice.user.id), Some(&alice.token))
        .await;

    let (_, body) = app.get("/feeds/", Some(&bob.token)).await;
    assert_eq!(body[0]["likes_count"], 1);
}
