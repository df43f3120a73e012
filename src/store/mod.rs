//! キー・バリューストアのアダプタ
//!
//! レコード一覧全体をJSONテキストとして1つのキーに保存する。
//! ストアの利用可否は起動時に1度だけ確認し、セッション中はその結果を使う。

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{Result, SuiviError};
use tracing::{debug, warn};

/// 外部キー・バリューストア
pub trait KeyValueStore {
    /// 利用可能か（サンドボックス環境などでは false）
    fn is_available(&self) -> bool;

    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// 永続化の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// ストアに書き込み済み
    Durable,
    /// メモリ上のみ（ストア不可・書き込み失敗）
    MemoryOnly,
}

impl Persistence {
    pub fn is_durable(&self) -> bool {
        matches!(self, Persistence::Durable)
    }
}

pub struct StoreAdapter {
    backend: Box<dyn KeyValueStore>,
    key: String,
    available: bool,
}

impl StoreAdapter {
    pub fn new(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let available = backend.is_available();
        if available {
            debug!(key = %key, "store available");
        } else {
            warn!(key = %key, "store unavailable, memory-only mode");
        }
        Self { backend, key, available }
    }

    /// ストアなし（メモリのみ）
    pub fn memory_only(key: impl Into<String>) -> Self {
        Self::new(Box::new(MemoryStore::unavailable()), key)
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// 保存済みJSON（未保存なら None）
    pub fn load(&self) -> Result<Option<String>> {
        if !self.available {
            return Err(SuiviError::StoreUnavailable(self.key.clone()));
        }
        self.backend.get(&self.key)
    }

    pub fn save(&mut self, json: &str) -> Result<()> {
        if !self.available {
            return Err(SuiviError::StoreUnavailable(self.key.clone()));
        }
        self.backend.set(&self.key, json).map_err(|e| match e {
            SuiviError::StoreWrite(_) => e,
            other => SuiviError::StoreWrite(other.to_string()),
        })
    }
}
