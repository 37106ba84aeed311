//! Concurrency tests for corkboard.
//!
//! These run against a file-backed database in WAL mode with a multi
//! connection pool, so reads really overlap.

use std::sync::Arc;

use corkboard::board::{NewPost, PostRepository};
use corkboard::config::BoardConfig;
use corkboard::db::{NewUser, UserRepository};
use corkboard::{BoardService, Database};

const NUM_READS: usize = 50;

/// Open a fresh on-disk database. The directory must outlive the test.
async fn setup_file_db() -> (tempfile::TempDir, Arc<Database>) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("board.db")).await.unwrap();
    (dir, Arc::new(db))
}

/// Create a user and a post, returning the post ID.
async fn create_test_post(db: &Database) -> i64 {
    let author = UserRepository::new(db.pool())
        .create(&NewUser::new("alice", "alice@example.com", "hash"))
        .await
        .unwrap();
    PostRepository::new(db.pool())
        .create(&NewPost::new(author.id, "Popular", "Everyone reads this"))
        .await
        .unwrap()
        .id
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_count_every_view() {
    let (_dir, db) = setup_file_db().await;
    let post_id = create_test_post(&db).await;
    let config = Arc::new(BoardConfig::default());

    let mut handles = Vec::new();
    for _ in 0..NUM_READS {
        let db = Arc::clone(&db);
        let config = Arc::clone(&config);
        handles.push(tokio::spawn(async move {
            BoardService::new(&db, &config)
                .get_post(post_id)
                .await
                .map(|post| post.view_count)
        }));
    }

    let mut seen = Vec::new();
    for handle in handles {
        seen.push(handle.await.unwrap().unwrap());
    }

    // Each read observed its own increment
    seen.sort_unstable();
    let expected: Vec<i64> = (1..=NUM_READS as i64).collect();
    assert_eq!(seen, expected);

    let post = PostRepository::new(db.pool())
        .get_by_id(post_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.view_count, NUM_READS as i64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_of_missing_post() {
    let (_dir, db) = setup_file_db().await;
    let post_id = create_test_post(&db).await;
    let config = Arc::new(BoardConfig::default());

    let mut handles = Vec::new();
    for i in 0..10 {
        let db = Arc::clone(&db);
        let config = Arc::clone(&config);
        // Every other read targets a post that does not exist
        let target = if i % 2 == 0 { post_id } else { post_id + 1000 };
        handles.push(tokio::spawn(async move {
            BoardService::new(&db, &config).get_post(target).await.is_ok()
        }));
    }

    let mut found = 0;
    for handle in handles {
        if handle.await.unwrap() {
            found += 1;
        }
    }
    assert_eq!(found, 5);

    let post = PostRepository::new(db.pool())
        .get_by_id(post_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.view_count, 5);
}
