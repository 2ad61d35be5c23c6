//! gfl コマンドの通し動作テスト

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn gfl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gfl").unwrap();
    cmd.env("GIFTLIST_HOME", home.path())
        .env_remove("GIFTLIST_KEY")
        .env_remove("GIFTLIST_LOG");
    cmd
}

fn json_output(home: &TempDir, args: &[&str]) -> Value {
    let output = gfl(home).args(args).output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

fn create_list(home: &TempDir, name: &str, occasion: &str) -> String {
    gfl(home)
        .args(["list", "new", name, "--occasion", occasion])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Created list {name}")));

    let lists = json_output(home, &["list", "show", "--json"]);
    lists
        .as_array()
        .unwrap()
        .iter()
        .rev()
        .find(|l| l["name"] == name)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn first_gift_id(home: &TempDir, list_id: &str) -> String {
    let list = json_output(home, &["list", "show", list_id, "--json"]);
    list["gifts"][0]["id"].as_str().unwrap().to_string()
}

#[test]
fn test_empty_store_shows_placeholder() {
    let home = TempDir::new().unwrap();
    gfl(&home)
        .args(["list", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No gift lists yet"));

    let lists = json_output(&home, &["list", "show", "--json"]);
    assert_eq!(lists, Value::Array(vec![]));
}

#[test]
fn test_birthday_workflow() {
    let home = TempDir::new().unwrap();
    let list_id = create_list(&home, "Birthday", "Birthday");

    gfl(&home)
        .args([
            "gift", "add", &list_id, "--name", "Book", "--recipient", "Alice", "--price", "20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Book for Alice at $20.00"));

    let gift_id = first_gift_id(&home, &list_id);

    gfl(&home)
        .args(["gift", "price", &list_id, &gift_id, "15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book is now $15.00 (2 price record(s))"));

    let history = json_output(&home, &["gift", "history", &list_id, &gift_id, "--json"]);
    let prices: Vec<f64> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![20.0, 15.0]);

    gfl(&home)
        .args(["budget", &list_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Budget: $15.00"));

    // 保存ファイルは 1 キー（giftLists.json）に全体が入る
    let raw = fs::read_to_string(home.path().join("giftLists.json")).unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["gifts"][0]["priceHistory"].as_array().unwrap().len(), 2);
    assert_eq!(stored[0]["gifts"][0]["occasion"], "Birthday");
}

#[test]
fn test_ids_can_be_abbreviated() {
    let home = TempDir::new().unwrap();
    let list_id = create_list(&home, "Holidays", "Christmas");
    let short = &list_id[..8];

    gfl(&home)
        .args([
            "gift", "add", short, "--name", "Scarf", "--recipient", "Bob", "--price", "12.5",
        ])
        .assert()
        .success();

    let gift_id = first_gift_id(&home, &list_id);
    gfl(&home)
        .args(["gift", "toggle", short, &gift_id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scarf is now purchased"));
}

#[test]
fn test_negative_price_is_rejected_without_writing() {
    let home = TempDir::new().unwrap();
    let list_id = create_list(&home, "Birthday", "Birthday");
    let before = fs::read_to_string(home.path().join("giftLists.json")).unwrap();

    gfl(&home)
        .args([
            "gift", "add", &list_id, "--name", "Book", "--recipient", "Alice", "--price", "-5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be negative"));

    let after = fs::read_to_string(home.path().join("giftLists.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_deleted_gift_is_not_found() {
    let home = TempDir::new().unwrap();
    let list_id = create_list(&home, "Birthday", "Birthday");
    gfl(&home)
        .args([
            "gift", "add", &list_id, "--name", "Book", "--recipient", "Alice", "--price", "20",
        ])
        .assert()
        .success();
    let gift_id = first_gift_id(&home, &list_id);

    gfl(&home)
        .args(["gift", "rm", &list_id, &gift_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted Book"));

    gfl(&home)
        .args(["gift", "toggle", &list_id, &gift_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_edit_updates_fields() {
    let home = TempDir::new().unwrap();
    let list_id = create_list(&home, "Birthday", "Birthday");
    gfl(&home)
        .args([
            "gift", "add", &list_id, "--name", "Book", "--recipient", "Alice", "--price", "20",
        ])
        .assert()
        .success();
    let gift_id = first_gift_id(&home, &list_id);

    gfl(&home)
        .args([
            "gift", "edit", &list_id, &gift_id, "--notes", "hardcover", "--purchased", "true",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated Book"));

    let list = json_output(&home, &["list", "show", &list_id, "--json"]);
    assert_eq!(list["gifts"][0]["notes"], "hardcover");
    assert_eq!(list["gifts"][0]["purchased"], true);
    assert_eq!(list["gifts"][0]["priceHistory"].as_array().unwrap().len(), 1);
}

#[test]
fn test_rename_and_delete_list() {
    let home = TempDir::new().unwrap();
    let list_id = create_list(&home, "Birthday", "Birthday");

    gfl(&home)
        .args(["list", "rename", &list_id, "Alice's 30th"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed list to Alice's 30th"));

    gfl(&home)
        .args(["list", "rm", &list_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted list Alice's 30th (0 gift(s))"));

    gfl(&home)
        .args(["budget", &list_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("List not found"));
}

#[test]
fn test_unreadable_file_degrades_and_is_backed_up() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("giftLists.json"), "{broken").unwrap();

    gfl(&home)
        .args(["list", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not load saved lists"))
        .stdout(predicate::str::contains("No gift lists yet"));

    assert_eq!(
        fs::read_to_string(home.path().join("giftLists.json")).unwrap(),
        "{broken"
    );
    assert_eq!(
        fs::read_to_string(home.path().join("giftLists.unreadable.json")).unwrap(),
        "{broken"
    );
}

#[test]
fn test_unreadable_store_refuses_changes() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("giftLists.json");
    fs::create_dir(&path).unwrap();

    gfl(&home)
        .args(["list", "new", "Birthday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("changes are disabled"))
        .stderr(predicate::str::contains("refusing to overwrite"));

    assert!(path.is_dir());
}

#[test]
fn test_data_dir_and_key_options_override_env() {
    let home = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let other_dir = other.path().to_str().unwrap();

    gfl(&home)
        .args(["--data-dir", other_dir, "--key", "holidayLists"])
        .args(["list", "new", "Holidays"])
        .assert()
        .success();

    assert!(other.path().join("holidayLists.json").exists());
    assert!(!home.path().join("giftLists.json").exists());

    gfl(&home)
        .args(["list", "show", "--data-dir", other_dir, "--key", "holidayLists"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Holidays"))
        .stdout(predicate::str::contains("open"));
}
