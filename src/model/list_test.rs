use super::*;
use crate::error::ErrorKind;
use crate::model::NewGift;

fn birthday() -> GiftList {
    GiftList::create("Birthday", "Birthday", Utc::now()).unwrap()
}

fn add(list: &mut GiftList, name: &str, price: f64) -> GiftId {
    let gift = Gift::create(NewGift::new(name, "Alice", price), &list.occasion, Utc::now()).unwrap();
    let id = gift.id.clone();
    list.gifts.push(gift);
    id
}

#[test]
fn test_create_starts_empty() {
    let list = birthday();
    assert!(list.gifts.is_empty());
    assert_eq!(list.total_budget(), 0.0);
}

#[test]
fn test_create_rejects_blank_name() {
    let err = GiftList::create("   ", "Birthday", Utc::now()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_total_budget_sums_current_prices() {
    let mut list = birthday();
    add(&mut list, "Book", 20.0);
    let mug = add(&mut list, "Mug", 7.5);
    assert_eq!(list.total_budget(), 27.5);

    list.gift_mut(&mug).unwrap().reprice(2.5, Utc::now()).unwrap();
    assert_eq!(list.total_budget(), 22.5);
}

#[test]
fn test_remove_gift_preserves_order() {
    let mut list = birthday();
    let a = add(&mut list, "A", 1.0);
    let b = add(&mut list, "B", 2.0);
    let c = add(&mut list, "C", 3.0);

    let removed = list.remove_gift(&b).unwrap();
    assert_eq!(removed.name, "B");

    let ids: Vec<_> = list.gifts.iter().map(|g| g.id.clone()).collect();
    assert_eq!(ids, vec![a, c]);
}

#[test]
fn test_unknown_gift_is_not_found() {
    let mut list = birthday();
    let missing = GiftId::from("missing");

    assert!(list.gift(&missing).is_none());
    assert_eq!(list.gift_mut(&missing).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(list.remove_gift(&missing).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_reads_list_without_occasion() {
    let json = r#"{
        "id": "1700000000000",
        "name": "New Gift List",
        "date": "2024-01-01T00:00:00.000Z",
        "gifts": []
    }"#;
    let list: GiftList = serde_json::from_str(json).unwrap();
    assert_eq!(list.occasion, "");
    assert_eq!(list.id.as_str(), "1700000000000");
}
