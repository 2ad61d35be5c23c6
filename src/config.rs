//! ストア設定
//!
//! データディレクトリと永続化キーの解決。
//! 優先順位: 明示的な設定 > 環境変数 > デフォルト（`~/.giftlist`, `giftLists`）

use crate::env::EnvVar;
use crate::error::{GiftError, Result};
use crate::storage::FileStorage;
use crate::store::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;

/// データディレクトリを上書きする環境変数
pub const HOME_ENV: &str = "GIFTLIST_HOME";
/// 永続化キーを上書きする環境変数
pub const KEY_ENV: &str = "GIFTLIST_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl StoreConfig {
    /// 環境変数から設定を解決
    pub fn from_env() -> Result<Self> {
        let data_dir = match EnvVar::get(HOME_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = EnvVar::get("HOME").ok_or_else(|| {
                    GiftError::Persistence("HOME environment variable not set".to_string())
                })?;
                PathBuf::from(home).join(".giftlist")
            }
        };
        let storage_key = EnvVar::get(KEY_ENV).unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        Ok(Self {
            data_dir,
            storage_key,
        })
    }

    /// データディレクトリを設定
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// 永続化キーを設定
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// 設定に従ったファイルストレージ
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
