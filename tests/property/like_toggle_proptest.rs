//! Property-based tests for the like toggle
//!
//! Any sequence of toggles leaves each student's membership equal to the
//! parity of their toggle count, and the reported count always matches
//! the number of members.

use proptest::prelude::*;

use profiles_api::backend::feeds::db::{create_feed, toggle_like};
use profiles_api::backend::feeds::LikeAction;

use crate::common::{count_likes, create_student, create_teacher, has_liked, TestApp};

const STUDENTS: usize = 3;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_toggle_sequence_matches_parity(toggles in prop::collection::vec(0..STUDENTS, 0..12)) {
        tokio_test::block_on(async {
            let app = TestApp::new().await;
            let pool = app.db.pool();
            let tom = create_teacher(pool, &app.tokens, "Tom").await;

            let mut students = Vec::new();
            for i in 0..STUDENTS {
                students.push(create_student(pool, &app.tokens, &format!("Student{}", i)).await);
            }
            let feed = create_feed(pool, tom.user.id, Some("x"), None).await.unwrap();

            let mut liked = [false; STUDENTS];
            for &who in &toggles {
                let (action, count) = toggle_like(pool, feed.id, students[who].user.id).await.unwrap();
                liked[who] = !liked[who];

                let expected_action = if liked[who] { LikeAction::Liked } else { LikeAction::Unliked };
                assert_eq!(action, expected_action);
                assert_eq!(count, liked.iter().filter(|l| **l).count() as i64);
            }

            for (i, student) in students.iter().enumerate() {
                assert_eq!(has_liked(pool, feed.id, student.user.id).await, liked[i]);
            }
            assert_eq!(
                count_likes(pool, feed.id).await,
                liked.iter().filter(|l| **l).count() as i64
            );
        });
    }

    #[test]
    fn test_two_toggles_restore_original_state(pre_liked in any::<bool>()) {
        tokio_test::block_on(async {
            let app = TestApp::new().await;
            let pool = app.db.pool();
            let tom = create_teacher(pool, &app.tokens, "Tom").await;
            let alice = create_student(pool, &app.tokens, "Alice").await;
            let feed = create_feed(pool, tom.user.id, Some("x"), None).await.unwrap();

            if pre_liked {
                toggle_like(pool, feed.id, alice.user.id).await.unwrap();
            }
            let before = count_likes(pool, feed.id).await;

            toggle_like(pool, feed.id, alice.user.id).await.unwrap();
            toggle_like(pool, feed.id, alice.user.id).await.unwrap();

            assert_eq!(count_likes(pool, feed.id).await, before);
            assert_eq!(has_liked(pool, feed.id, alice.user.id).await, pre_liked);
        });
    }
}
