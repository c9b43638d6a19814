mod common;

use common::{create_test_board, create_test_pool, create_test_user};

use td_core::{Activity, ActivityLog};
use td_db::{ActivityLogRepository, ActivityRepository, MAX_ACTIVITY_LIMIT};

use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_activities_when_reading_recent_then_newest_come_first() {
    // Given: Three entries with distinct timestamps
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let board = create_test_board(&pool, owner.id, "Board").await;

    for (i, action) in ["created task A", "moved task A", "deleted task A"]
        .iter()
        .enumerate()
    {
        let mut activity = Activity::new(
            board.id,
            Some(owner.id),
            "alice".to_string(),
            action.to_string(),
        );
        activity.created_at = chrono::DateTime::from_timestamp(1_700_000_000 + i as i64, 0).unwrap();
        ActivityRepository::create(&pool, &activity).await.unwrap();
    }

    // When: Reading the recent feed
    let feed = ActivityRepository::find_recent_by_board(&pool, board.id, 20)
        .await
        .unwrap();

    // Then: Newest entry leads
    assert_that!(feed.len(), eq(3));
    assert_that!(feed[0].action.as_str(), eq("deleted task A"));
    assert_that!(feed[2].action.as_str(), eq("created task A"));
}

#[tokio::test]
async fn given_oversized_limit_when_reading_recent_then_limit_is_clamped() {
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let board = create_test_board(&pool, owner.id, "Board").await;

    for i in 0..60 {
        let mut activity = Activity::new(
            board.id,
            Some(owner.id),
            "alice".to_string(),
            format!("action {}", i),
        );
        activity.created_at = chrono::DateTime::from_timestamp(1_700_000_000 + i, 0).unwrap();
        ActivityRepository::create(&pool, &activity).await.unwrap();
    }

    let feed = ActivityRepository::find_recent_by_board(&pool, board.id, 10_000)
        .await
        .unwrap();

    assert_that!(feed.len(), eq(MAX_ACTIVITY_LIMIT as usize));
}

#[tokio::test]
async fn given_anonymous_activity_when_stored_then_user_id_round_trips_as_none() {
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let board = create_test_board(&pool, owner.id, "Board").await;

    let activity = Activity::new(board.id, None, "system".to_string(), "pruned".to_string());
    ActivityRepository::create(&pool, &activity).await.unwrap();

    let feed = ActivityRepository::find_recent_by_board(&pool, board.id, 20)
        .await
        .unwrap();
    assert_that!(feed[0].user_id, none());
    assert_that!(feed[0].username.as_str(), eq("system"));
}

#[tokio::test]
async fn given_activity_log_when_created_then_can_be_read_back_by_board() {
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let board = create_test_board(&pool, owner.id, "Board").await;
    let list_id = Uuid::new_v4();
    let task_id = Uuid::new_v4();

    let log = ActivityLog::task_moved(owner.id, board.id, list_id, list_id, task_id);
    ActivityLogRepository::create(&pool, &log).await.unwrap();

    let logs = ActivityLogRepository::find_by_board(&pool, board.id)
        .await
        .unwrap();
    assert_that!(logs.len(), eq(1));
    assert_that!(logs[0].task_id, some(eq(task_id)));
    assert_that!(logs[0].action.as_str(), eq(td_core::models::activity_log::TASK_MOVED));
}
