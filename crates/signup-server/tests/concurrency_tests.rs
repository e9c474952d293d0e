//! Concurrent submissions sharing a student ID.

use futures::future::join_all;
use member_store::{DynMemberStore, MemberStore, MemoryStore, SqliteStore, UniquenessStrategy};
use serde_json::json;
use signup_server::signup::{RawRegistration, Registrar, RegistrarError, SignupError};
use std::sync::Arc;

const SUBMISSIONS: usize = 16;

fn submission(n: usize) -> RawRegistration {
    serde_json::from_value(json!({
        "aka": format!("member-{n}"),
        "name": format!("Member {n}"),
        "stuid": "S1",
        "faculty": "Engineering",
        "email": format!("member{n}@x.com"),
        "disname": format!("member#{n}"),
        "level": "beginner",
        "interested": "web",
        "experience": "none"
    }))
    .unwrap()
}

async fn race(store: DynMemberStore) -> (usize, usize) {
    let registrar = Arc::new(Registrar::new(store));

    let handles = (0..SUBMISSIONS).map(|n| {
        let registrar = Arc::clone(&registrar);
        tokio::spawn(async move { registrar.register(&submission(n)).await })
    });

    let mut committed = 0;
    let mut duplicates = 0;
    for outcome in join_all(handles).await {
        match outcome.unwrap() {
            Ok(_) => committed += 1,
            Err(SignupError::Registrar(RegistrarError::DuplicateMember(_))) => duplicates += 1,
            Err(other) => panic!("unexpected outcome: {other:?}"),
        }
    }
    (committed, duplicates)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_memory_store_commits_exactly_once() {
    for strategy in [UniquenessStrategy::PreCheck, UniquenessStrategy::ConstraintRejection] {
        let store: DynMemberStore = Arc::new(MemoryStore::new(strategy));

        let (committed, duplicates) = race(store.clone()).await;

        assert_eq!(committed, 1, "{strategy}");
        assert_eq!(duplicates, SUBMISSIONS - 1, "{strategy}");
        assert_eq!(store.count().await.unwrap(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_in_memory_commits_exactly_once() {
    for strategy in [UniquenessStrategy::PreCheck, UniquenessStrategy::ConstraintRejection] {
        let store: DynMemberStore = Arc::new(SqliteStore::in_memory(strategy).await.unwrap());

        let (committed, duplicates) = race(store.clone()).await;

        assert_eq!(committed, 1, "{strategy}");
        assert_eq!(duplicates, SUBMISSIONS - 1, "{strategy}");
        assert_eq!(store.count().await.unwrap(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_on_disk_commits_exactly_once() {
    let dir = tempfile::tempdir().unwrap();

    for strategy in [UniquenessStrategy::PreCheck, UniquenessStrategy::ConstraintRejection] {
        let path = dir.path().join(format!("members-{strategy}.db"));
        let store: DynMemberStore = Arc::new(SqliteStore::open(&path, strategy).await.unwrap());

        let (committed, duplicates) = race(store.clone()).await;

        assert_eq!(committed, 1, "{strategy}");
        assert_eq!(duplicates, SUBMISSIONS - 1, "{strategy}");
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
