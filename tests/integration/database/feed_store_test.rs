//! Feed store tests
//!
//! The repository functions behind the feed endpoints, called directly.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use profiles_api::backend::auth::users::delete_user;
use profiles_api::backend::feeds::db::{
    create_feed, get_feed_by_id, list_feeds_with_like_counts, toggle_like,
};
use profiles_api::backend::feeds::LikeAction;

use crate::common::{count_likes, create_student, create_teacher, has_liked, TestApp};

#[tokio::test]
async fn test_create_and_fetch_feed() {
    let app = TestApp::new().await;
    let pool = app.db.pool();
    let tom = create_teacher(pool, &app.tokens, "Tom").await;

    let feed = create_feed(pool, tom.user.id, Some("hello"), None).await.unwrap();
    let fetched = get_feed_by_id(pool, feed.id).await.unwrap();

    assert_eq!(fetched, Some(feed.clone()));
    assert_eq!(feed.user_id, tom.user.id);
    assert_eq!(feed.image, None);
}

#[tokio::test]
async fn test_empty_feed_is_stored() {
    let app = TestApp::new().await;
    let pool = app.db.pool();
    let tom = create_teacher(pool, &app.tokens, "Tom").await;

    let feed = create_feed(pool, tom.user.id, None, None).await.unwrap();
    assert_eq!(feed.text, None);

    let listed = list_feeds_with_like_counts(pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].author_name, "Tom");
}

#[tokio::test]
async fn test_toggle_flips_membership() {
    let app = TestApp::new().await;
    let pool = app.db.pool();
    let tom = create_teacher(pool, &app.tokens, "Tom").await;
    let alice = create_student(pool, &app.tokens, "Alice").await;
    let feed = create_feed(pool, tom.user.id, Some("x"), None).await.unwrap();

    assert!(!has_liked(pool, feed.id, alice.user.id).await);

    assert_matches!(
        toggle_like(pool, feed.id, alice.user.id).await,
        Ok((LikeAction::Liked, 1))
    );
    assert!(has_liked(pool, feed.id, alice.user.id).await);

    assert_matches!(
        toggle_like(pool, feed.id, alice.user.id).await,
        Ok((LikeAction::Unliked, 0))
    );
    assert!(!has_liked(pool, feed.id, alice.user.id).await);
    assert_eq!(count_likes(pool, feed.id).await, 0);
}

#[tokio::test]
async fn test_counts_are_per_feed() {
    let app = TestApp::new().await;
    let pool = app.db.pool();
    let tom = create_teacher(pool, &app.tokens, "Tom").await;
    let alice = create_student(pool, &app.tokens, "Alice").await;
    let bob = create_student(pool, &app.tokens, "Bob").await;

    let a = create_feed(pool, tom.user.id, Some("a"), None).await.unwrap();
    let b = create_feed(pool, tom.user.id, Some("b"), None).await.unwrap();

    toggle_like(pool, a.id, alice.user.id).await.unwrap();
    toggle_like(pool, a.id, bob.user.id).await.unwrap();
    toggle_like(pool, b.id, bob.user.id).await.unwrap();

    assert_eq!(count_likes(pool, a.id).await, 2);
    assert_eq!(count_likes(pool, b.id).await, 1);

    let listed = list_feeds_with_like_counts(pool).await.unwrap();
    let counts: Vec<(String, i64)> = listed
        .into_iter()
        .map(|f| (f.text.unwrap_or_default(), f.likes_count))
        .collect();
    assert_eq!(counts, vec![("b".to_string(), 1), ("a".to_string(), 2)]);
}

#[tokio::test]
async fn test_deleting_feed_author_cascades() {
    let app = TestApp::new().await;
    let pool = app.db.pool();
    let tom = create_teacher(pool, &app.tokens, "Tom").await;
    let alice = create_student(pool, &app.tokens, "Alice").await;
    let feed = create_feed(pool, tom.user.id, Some("x"), None).await.unwrap();
    toggle_like(pool, feed.id, alice.user.id).await.unwrap();

    assert!(delete_user(pool, tom.user.id).await.unwrap());

    assert_eq!(get_feed_by_id(pool, feed.id).await.unwrap(), None);
    assert_eq!(app.db.count("feed_likes").await, 0);
}
