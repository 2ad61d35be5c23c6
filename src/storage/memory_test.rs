use super::*;
use crate::error::ErrorKind;

#[tokio::test]
async fn test_memory_storage_operations() {
    let storage = MemoryStorage::new();

    assert_eq!(storage.get("k").await.unwrap(), None);

    storage.set("k", "v1").await.unwrap();
    storage.set("k", "v2").await.unwrap();

    assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v2"));
    assert_eq!(storage.write_count(), 2);
}

#[tokio::test]
async fn test_clones_share_contents() {
    let storage = MemoryStorage::new();
    let other = storage.clone();

    storage.set("k", "v").await.unwrap();
    assert_eq!(other.raw("k").as_deref(), Some("v"));
}

#[tokio::test]
async fn test_fail_writes_keeps_previous_value() {
    let storage = MemoryStorage::with_entry("k", "old");
    storage.fail_writes(true);

    let err = storage.set("k", "new").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert_eq!(storage.raw("k").as_deref(), Some("old"));
    assert_eq!(storage.write_count(), 0);

    storage.fail_writes(false);
    storage.set("k", "new").await.unwrap();
    assert_eq!(storage.raw("k").as_deref(), Some("new"));
}

#[tokio::test(start_paused = true)]
async fn test_write_delay() {
    let storage = MemoryStorage::new();
    storage.set_write_delay(Some(Duration::from_millis(50)));

    let started = tokio::time::Instant::now();
    storage.set("k", "v").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_copy_and_fail_reads() {
    let storage = MemoryStorage::with_entry("k", "payload");

    assert!(storage.copy("k", "backup").await.unwrap());
    assert_eq!(storage.raw("backup").as_deref(), Some("payload"));
    assert!(!storage.copy("missing", "other").await.unwrap());

    storage.fail_reads(true);
    assert_eq!(storage.get("k").await.unwrap_err().kind(), ErrorKind::Persistence);
    assert!(storage.copy("k", "backup2").await.is_err());
    assert_eq!(storage.raw("backup2"), None);
}
