//! ファイルベースのストレージ
//!
//! 1 キー = 1 ファイル（`<dir>/<key>.json`）。
//! 書き込みは同一ディレクトリの一時ファイル経由でアトミックに置き換える。

use super::KeyValueStorage;
use crate::error::{GiftError, Result};
use async_trait::async_trait;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// ストレージディレクトリを指定して作成（ディレクトリは初回書き込み時に作成）
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// キーに対応するファイルパス
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    async fn write(&self, path: PathBuf, content: Vec<u8>) -> Result<()> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &content))
            .await
            .map_err(|e| GiftError::Persistence(format!("Write task failed: {e}")))?
    }
}

/// キーはファイル名の一部になるため、パス区切りや相対指定を拒否する
fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key.starts_with('.')
        || key.chars().any(|c| matches!(c, '/' | '\\' | '\0'));
    if invalid {
        return Err(GiftError::Persistence(format!(
            "Invalid storage key: {key:?}"
        )));
    }
    Ok(())
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GiftError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        self.write(path, value.as_bytes().to_vec()).await
    }

    async fn copy(&self, from: &str, to: &str) -> Result<bool> {
        let source = self.path_for(from)?;
        let target = self.path_for(to)?;
        let content = match tokio::fs::read(&source).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(GiftError::Io(e)),
        };
        self.write(target, content).await?;
        Ok(true)
    }
}

/// 一時ファイルに書いてから persist() でリネームする
fn write_atomic(dir: &Path, path: &Path, content: &[u8]) -> Result<()> {
    fs::create_dir_all(dir)?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content)?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    // Windows では既存ファイルがあると失敗する可能性があるため、
    // エラー時は既存ファイルを削除してから再試行
    match temp_file.persist(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                let _ = fs::remove_file(path);
                e.file.persist(path).map_err(|e| e.error)?;
                Ok(())
            } else {
                Err(e.error.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
