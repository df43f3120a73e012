//! 応募レコードのリポジトリ
//!
//! メモリ上の正本リストを保持し、変更のたびにストアへ書き込む（write-through）。
//! 書き込みに失敗してもメモリ上の変更は取り消さず、`Persistence::MemoryOnly` を返す。

use crate::error::{Result, SuiviError};
use crate::store::{Persistence, StoreAdapter};
use suivi_candidatures_common::{
    decode_records, encode_records, seed_records, ApplicationRecord, RecordDraft, RecordId,
};
use tracing::{debug, error, info, warn};

/// 起動時の読み込み元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// 保存済みデータを採用
    Stored,
    /// 初期データを生成して保存
    Seeded,
    /// ストア不可のため初期データをメモリのみで使用
    SeededInMemory,
    /// 読み込み失敗、直前のリストまたは初期データで継続
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: LoadSource,
    pub count: usize,
    pub error: Option<String>,
}

pub struct Repository {
    records: Vec<ApplicationRecord>,
    /// 一度でもリストを採用したか（空リストも有効な状態）
    adopted: bool,
    store: StoreAdapter,
    max_records: usize,
}

impl Repository {
    /// ストアから読み込んで初期化（失敗しても必ず使える状態で返す）
    pub fn initialize(store: StoreAdapter, max_records: usize) -> (Self, LoadReport) {
        let mut repo = Self {
            records: Vec::new(),
            adopted: false,
            store,
            max_records,
        };
        let report = repo.reload();
        (repo, report)
    }

    /// ストアから読み直す
    ///
    /// 解析エラー時は直前のリスト（未読み込みなら初期データ）を維持する。空のリストもそのまま。
    pub fn reload(&mut self) -> LoadReport {
        if !self.store.is_available() {
            self.records = seed_records();
            self.adopted = true;
            info!(count = self.records.len(), "seed data loaded (memory only)");
            return self.report(LoadSource::SeededInMemory, None);
        }

        let loaded = self.store.load().and_then(|stored| match stored {
            Some(json) => {
                let records = decode_records(&json)
                    .map_err(|e| SuiviError::Parse(e.to_string()))?;
                Ok(Some((json, records)))
            }
            None => Ok(None),
        });

        match loaded {
            Ok(Some((json, records))) => {
                self.records = records;
                self.adopted = true;
                debug!(count = self.records.len(), "stored records adopted");
                // IDなしの旧データはここで採番した内容を保存し直す
                if let Ok(normalized) = encode_records(&self.records) {
                    if normalized != json {
                        info!("stored records normalized");
                        self.persist();
                    }
                }
                self.report(LoadSource::Stored, None)
            }
            Ok(None) => {
                self.records = seed_records();
                self.adopted = true;
                info!(count = self.records.len(), "no stored data, seeding");
                let persisted = self.persist();
                let source = if persisted.is_durable() {
                    LoadSource::Seeded
                } else {
                    LoadSource::SeededInMemory
                };
                self.report(source, None)
            }
            Err(e) => {
                error!(error = %e, "failed to load stored records");
                if !self.adopted {
                    self.records = seed_records();
                    self.adopted = true;
                }
                self.report(LoadSource::Fallback, Some(e.to_string()))
            }
        }
    }

    fn report(&self, source: LoadSource, error: Option<String>) -> LoadReport {
        LoadReport {
            source,
            count: self.records.len(),
            error,
        }
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.max_records
    }

    pub fn is_durable(&self) -> bool {
        self.store.is_available()
    }

    pub fn get(&self, index: usize) -> Option<&ApplicationRecord> {
        self.records.get(index)
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn find(&self, id: RecordId) -> Option<&ApplicationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// 新規追加（件数上限あり）
    pub fn create(&mut self, draft: RecordDraft) -> Result<(RecordId, Persistence)> {
        if !draft.has_restaurant() {
            return Err(SuiviError::EmptyRestaurant);
        }
        if self.is_full() {
            return Err(SuiviError::CapacityReached { max: self.max_records });
        }
        let record = draft.into_record(RecordId::new());
        let id = record.id;
        self.records.push(record);
        debug!(%id, count = self.records.len(), "record created");
        Ok((id, self.persist()))
    }

    /// 位置指定で置き換え（件数上限は対象外、IDは維持）
    pub fn update(&mut self, index: usize, draft: RecordDraft) -> Result<Persistence> {
        if !draft.has_restaurant() {
            return Err(SuiviError::EmptyRestaurant);
        }
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(SuiviError::IndexOutOfRange { index, len })?;
        *slot = draft.into_record(slot.id);
        debug!(index, "record updated");
        Ok(self.persist())
    }

    /// 位置指定で削除（他のレコードの順序は維持）
    pub fn delete(&mut self, index: usize) -> Result<(ApplicationRecord, Persistence)> {
        if index >= self.records.len() {
            return Err(SuiviError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        debug!(id = %removed.id, "record deleted");
        Ok((removed, self.persist()))
    }

    fn persist(&mut self) -> Persistence {
        if !self.store.is_available() {
            return Persistence::MemoryOnly;
        }
        let json = match encode_records(&self.records) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode records");
                return Persistence::MemoryOnly;
            }
        };
        match self.store.save(&json) {
            Ok(()) => Persistence::Durable,
            Err(e) => {
                warn!(error = %e, "write-through failed, change kept in memory");
                Persistence::MemoryOnly
            }
        }
    }
}
