use time::OffsetDateTime;
use uuid::Uuid;

use super::test_helpers::{SharedStore, memory_mirror};
use super::*;
use crate::consts::PLACEHOLDER_ORIGIN;
use crate::model::Point;
use crate::store::FileStore;

fn dummy_segment(user_id: Uuid) -> DrawingSegment {
    DrawingSegment {
        id: Uuid::new_v4(),
        user_id,
        color: "#112233".into(),
        start: Point::new(1.0, 2.0),
        end: Point::new(3.0, 4.0),
    }
}

fn dummy_message(user_id: Uuid) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4(),
        user_id,
        username: "admin".into(),
        text: "hello".into(),
        timestamp: OffsetDateTime::now_utc(),
    }
}

// =============================================================
// Bootstrap
// =============================================================

#[test]
fn bootstrap_creates_sole_administrator() {
    let mirror = memory_mirror();
    assert_eq!(mirror.accounts().len(), 1);
    let admin = &mirror.accounts()[0];
    assert_eq!(admin.username, "admin");
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.ip, PLACEHOLDER_ORIGIN);
    assert!(mirror.segments().is_empty());
    assert!(mirror.messages().is_empty());
}

#[test]
fn bootstrap_persists_administrator() {
    let store = SharedStore::new();
    let _mirror = Mirror::open(Box::new(store.clone()));
    let raw = store.raw(USERS_KEY).expect("users key should be written at bootstrap");
    assert!(raw.contains("admin"));
}

#[test]
fn bootstrap_skipped_when_accounts_exist() {
    let store = SharedStore::new();
    {
        let mut mirror = Mirror::open(Box::new(store.clone()));
        accounts::register(&mut mirror, "zoe", "pw").unwrap();
    }
    let mirror = Mirror::open(Box::new(store.clone()));
    assert_eq!(mirror.accounts().len(), 2);
    let admins = mirror.accounts().iter().filter(|a| a.username == "admin").count();
    assert_eq!(admins, 1);
}

#[test]
fn corrupt_users_value_triggers_bootstrap() {
    let store = SharedStore::new();
    {
        let mut writer = store.clone();
        writer.set(USERS_KEY, "not json {").unwrap();
    }
    let mirror = Mirror::open(Box::new(store.clone()));
    assert_eq!(mirror.accounts().len(), 1);
    assert_eq!(mirror.accounts()[0].username, "admin");
}

#[test]
fn empty_users_sequence_triggers_bootstrap() {
    let store = SharedStore::new();
    {
        let mut writer = store.clone();
        writer.set(USERS_KEY, "[]").unwrap();
    }
    let mirror = Mirror::open(Box::new(store.clone()));
    assert_eq!(mirror.accounts().len(), 1);
}

#[test]
fn bootstrap_write_failure_keeps_in_memory_administrator() {
    let store = SharedStore::new();
    store.set_fail_writes(true);
    let mirror = Mirror::open(Box::new(store.clone()));
    assert_eq!(mirror.accounts().len(), 1);
    assert_eq!(store.raw(USERS_KEY), None);
}

// =============================================================
// Hydration
// =============================================================

#[test]
fn missing_log_keys_default_to_empty() {
    let store = SharedStore::new();
    drop(Mirror::open(Box::new(store.clone())));

    // Only `users` exists after bootstrap; the logs hydrate as empty.
    let mirror = Mirror::open(Box::new(store.clone()));
    assert!(mirror.segments().is_empty());
    assert!(mirror.messages().is_empty());
}

#[test]
fn hydration_restores_all_collections() {
    let store = SharedStore::new();
    let user_id;
    {
        let mut mirror = Mirror::open(Box::new(store.clone()));
        user_id = mirror.accounts()[0].id;
        mirror.push_segment(dummy_segment(user_id)).unwrap();
        mirror.push_message(dummy_message(user_id)).unwrap();
    }
    let mirror = Mirror::open(Box::new(store.clone()));
    assert_eq!(mirror.accounts().len(), 1);
    assert_eq!(mirror.segments().len(), 1);
    assert_eq!(mirror.messages().len(), 1);
    assert_eq!(mirror.segments()[0].user_id, user_id);
    assert_eq!(mirror.messages()[0].text, "hello");
}

// =============================================================
// Write-through and retry
// =============================================================

#[test]
fn append_failure_surfaces_and_retains_memory() {
    let store = SharedStore::new();
    let mut mirror = Mirror::open(Box::new(store.clone()));
    let user_id = mirror.accounts()[0].id;

    store.set_fail_writes(true);
    let result = mirror.push_segment(dummy_segment(user_id));
    assert!(result.is_err());
    assert_eq!(mirror.segments().len(), 1);
    assert_eq!(store.raw(DRAWINGS_KEY), None);

    store.set_fail_writes(false);
    mirror.flush_segments().unwrap();
    assert!(store.raw(DRAWINGS_KEY).unwrap().contains("#112233"));
}

#[test]
fn flush_all_writes_every_collection() {
    let store = SharedStore::new();
    let mut mirror = Mirror::open(Box::new(store.clone()));
    let user_id = mirror.accounts()[0].id;
    mirror.push_segment(dummy_segment(user_id)).unwrap();
    mirror.push_message(dummy_message(user_id)).unwrap();

    mirror.flush_all().unwrap();
    assert!(store.raw(USERS_KEY).is_some());
    assert!(store.raw(DRAWINGS_KEY).is_some());
    assert!(store.raw(MESSAGES_KEY).is_some());
}

// =============================================================
// Durability across restarts (file store)
// =============================================================

#[test]
fn restart_preserves_admin_and_registered_account() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = FileStore::open_at(dir.path()).unwrap();
        let mut mirror = Mirror::open(Box::new(store));
        accounts::register(&mut mirror, "zoe", "secret").unwrap();
    }

    let store = FileStore::open_at(dir.path()).unwrap();
    let mirror = Mirror::open(Box::new(store));
    assert_eq!(mirror.accounts().len(), 2);
    assert!(accounts::exists(&mirror, "admin"));
    assert!(accounts::exists(&mirror, "zoe"));
    accounts::authenticate(&mirror, "zoe", "secret").unwrap();
}
