//! インメモリストレージ
//!
//! テストやプレビュー用。書き込み失敗・遅延を注入できる。
//! Clone したインスタンス同士は同じ内容を共有する。

use super::KeyValueStorage;
use crate::error::{GiftError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_count: AtomicUsize,
    write_delay: RwLock<Option<Duration>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を持つストレージを作成
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.put_raw(key, value);
        storage
    }

    /// ストア本体を経由せずに値を書き込む（テストの前提データ用）
    pub fn put_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.inner.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    /// ストア本体を経由せずに値を読む
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner
            .entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// 以降の読み込み（複製元の読み込みを含む）を失敗させる
    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// 以降の書き込みを失敗させる
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 書き込みごとに遅延を入れる
    pub fn set_write_delay(&self, delay: Option<Duration>) {
        if let Ok(mut slot) = self.inner.write_delay.write() {
            *slot = delay;
        }
    }

    /// 成功した書き込み回数
    pub fn write_count(&self) -> usize {
        self.inner.write_count.load(Ordering::SeqCst)
    }
}

fn poisoned() -> GiftError {
    GiftError::Persistence("memory storage lock poisoned".to_string())
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_readable(key)?;
        let entries = self.inner.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let delay = *self.inner.write_delay.read().map_err(|_| poisoned())?;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(GiftError::Persistence(format!(
                "write rejected for key {key:?}"
            )));
        }

        let mut entries = self.inner.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        self.inner.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn copy(&self, from: &str, to: &str) -> Result<bool> {
        self.check_readable(from)?;
        let value = self.inner.entries.read().map_err(|_| poisoned())?.get(from).cloned();
        match value {
            Some(value) => {
                self.set(to, &value).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl MemoryStorage {
    fn check_readable(&self, key: &str) -> Result<()> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(GiftError::Persistence(format!(
                "read rejected for key {key:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
