use super::*;
use std::collections::HashSet;

#[test]
fn test_generate_is_unique() {
    let ids: HashSet<GiftId> = (0..100).map(|_| GiftId::generate()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_serializes_as_plain_string() {
    let id = ListId::from("1700000000000");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"1700000000000\"");

    let back: ListId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_display_matches_inner() {
    let id = GiftId::from("abc");
    assert_eq!(id.to_string(), "abc");
    assert_eq!(id.as_str(), "abc");
}
