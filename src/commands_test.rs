use super::*;
use giftlist::{MemoryStorage, NewGift, DEFAULT_STORAGE_KEY};

async fn sample() -> (ListStore<MemoryStorage>, ListId) {
    let store = ListStore::open(MemoryStorage::new(), DEFAULT_STORAGE_KEY)
        .await
        .unwrap();
    let list = store.create_list("Birthday", "Birthday").await.unwrap();
    store
        .add_gift(&list.id, NewGift::new("Book", "Alice", 20.0))
        .await
        .unwrap();
    (store, list.id)
}

#[tokio::test]
async fn test_resolve_list_by_full_id_and_prefix() {
    let (store, list_id) = sample().await;
    let lists = store.snapshot();

    assert_eq!(resolve_list_id(&lists, list_id.as_str()).unwrap(), list_id);
    assert_eq!(resolve_list_id(&lists, &list_id.as_str()[..8]).unwrap(), list_id);
}

#[tokio::test]
async fn test_resolve_list_unknown() {
    let (store, _) = sample().await;
    let err = resolve_list_id(&store.snapshot(), "zzzz").unwrap_err();
    assert!(err.contains("not found"));

    let err = resolve_list_id(&store.snapshot(), "").unwrap_err();
    assert!(err.contains("not found"));
}

#[tokio::test]
async fn test_resolve_gift_by_prefix() {
    let (store, list_id) = sample().await;
    let list = store.list(&list_id).unwrap();
    let gift_id = list.gifts[0].id.clone();

    assert_eq!(resolve_gift_id(&list, &gift_id.as_str()[..6]).unwrap(), gift_id);
    assert!(resolve_gift_id(&list, "not-a-gift").is_err());
}

#[test]
fn test_ambiguous_prefix() {
    let ids = [ListId::from("abc-1"), ListId::from("abc-2")];
    assert_eq!(
        unique_prefix(ids.iter(), "abc", ListId::as_str).unwrap_err(),
        "id is ambiguous"
    );
    assert_eq!(
        unique_prefix(ids.iter(), "abc-2", ListId::as_str).unwrap(),
        ListId::from("abc-2")
    );
}
