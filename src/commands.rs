use crate::cli::{Cli, Command};
use giftlist::config::StoreConfig;
use giftlist::output::StatusLine;
use giftlist::{FileStorage, GiftId, GiftList, ListId, ListStore};

pub mod budget;
pub mod gift;
pub mod list;

pub type Store = ListStore<FileStorage>;

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    let Cli {
        data_dir,
        key,
        command,
    } = cli;
    let mut config = StoreConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(key) = key {
        config = config.with_storage_key(key);
    }
    let store = open_store(&config).await;

    match command {
        Command::List(args) => list::run(args, &store).await,
        Command::Gift(args) => gift::run(args, &store).await,
        Command::Budget(args) => budget::run(args, &store).await,
    }
}

/// 設定に従ってストアを開く
///
/// 保存内容が読めない場合は警告を出して空の状態で続行する。
async fn open_store(config: &StoreConfig) -> Store {
    let (store, error) = ListStore::init(config.file_storage(), config.storage_key.clone()).await;

    if let Some(e) = error {
        eprintln!(
            "{}",
            StatusLine::warning(format!("Could not load saved lists ({e}); starting empty"))
                .render()
        );
    }
    if store.is_read_only() {
        eprintln!(
            "{}",
            StatusLine::warning(format!(
                "Saved lists under key {:?} could not be backed up; changes are disabled",
                store.key()
            ))
            .render()
        );
    }
    store
}

/// 入力（完全な ID または一意な前方一致）からリスト ID を解決
pub fn resolve_list_id(lists: &[GiftList], input: &str) -> Result<ListId, String> {
    let input = input.trim();
    if let Some(list) = lists.iter().find(|l| l.id.as_str() == input) {
        return Ok(list.id.clone());
    }
    unique_prefix(lists.iter().map(|l| &l.id), input, ListId::as_str)
        .map_err(|reason| format!("List {reason}: {input}"))
}

/// 入力からギフト ID を解決
pub fn resolve_gift_id(list: &GiftList, input: &str) -> Result<GiftId, String> {
    let input = input.trim();
    if let Some(gift) = list.gift(&GiftId::from(input)) {
        return Ok(gift.id.clone());
    }
    unique_prefix(list.gifts.iter().map(|g| &g.id), input, GiftId::as_str)
        .map_err(|reason| format!("Gift {reason}: {input} (list: {})", list.name))
}

fn unique_prefix<'a, T: Clone + 'a>(
    ids: impl Iterator<Item = &'a T>,
    input: &str,
    as_str: fn(&T) -> &str,
) -> Result<T, &'static str> {
    if input.is_empty() {
        return Err("not found");
    }
    let matches: Vec<&T> = ids.filter(|id| as_str(id).starts_with(input)).collect();
    match matches.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err("not found"),
        _ => Err("id is ambiguous"),
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
