//! アプリケーション状態とアクション処理
//!
//! 検索語・並べ替え・フォーム・削除確認・地図選択をひとつの状態にまとめ、
//! `dispatch` でアクションごとに遷移させる。表示リストは変更のたびに
//! リポジトリから「検索 → 並べ替え」で作り直す。

use crate::cli::ExportFormat;
use crate::config::NoticeTimings;
use crate::error::{Result, SuiviError};
use crate::export;
use crate::form::{FormController, SaveOutcome};
use crate::map_sync::{FlyTo, MapSyncController};
use crate::notifier::StatusNotifier;
use crate::repository::Repository;
use crate::store::Persistence;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::Instant;
use suivi_candidatures_common::{
    apply_search, sort_records, ApplicationRecord, RecordDraft, RecordId, SortConfig, SortKey,
    Stats,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Search(String),
    SortBy(SortKey),
    OpenCreate,
    /// リポジトリ内の位置
    OpenEdit(usize),
    UpdateDraft(RecordDraft),
    SaveForm,
    CancelForm,
    RequestDelete(RecordId),
    ConfirmDelete,
    DismissDelete,
    SelectFromList(usize),
    SelectFromMarker(usize),
    /// Escapeキー: 削除確認 > フォームの順で閉じる
    Escape,
    Tick,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FlyTo(FlyTo),
    Saved(SaveOutcome),
    Deleted {
        record: ApplicationRecord,
        persistence: Persistence,
    },
    FormClosed,
    DeleteDismissed,
}

pub struct AppController {
    repo: Repository,
    form: FormController,
    map: MapSyncController,
    notifier: StatusNotifier,
    timings: NoticeTimings,
    search_term: String,
    sort: SortConfig,
    view: Vec<ApplicationRecord>,
    pending_delete: Option<RecordId>,
}

impl AppController {
    pub fn new(repo: Repository, timings: NoticeTimings) -> Self {
        let mut app = Self {
            repo,
            form: FormController::new(),
            map: MapSyncController::new(),
            notifier: StatusNotifier::new(),
            timings,
            search_term: String::new(),
            sort: SortConfig::default(),
            view: Vec::new(),
            pending_delete: None,
        };
        app.recompute_view();
        app
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        self.repo.records()
    }

    /// 表示中の一覧（検索・並べ替え済み）
    pub fn view(&self) -> &[ApplicationRecord] {
        &self.view
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn map(&self) -> &MapSyncController {
        &self.map
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn pending_delete(&self) -> Option<&ApplicationRecord> {
        self.pending_delete.and_then(|id| self.repo.find(id))
    }

    pub fn status(&self, now: Instant) -> Option<&str> {
        self.notifier.current(now)
    }

    pub fn stats(&self) -> Stats {
        Stats::from_records(self.repo.records())
    }

    fn recompute_view(&mut self) {
        let filtered = apply_search(self.repo.records(), &self.search_term);
        self.view = sort_records(&filtered, self.sort);
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) -> Result<Effect> {
        debug!(?action, "dispatch");
        match action {
            Action::Search(term) => {
                self.search_term = term;
                self.recompute_view();
                Ok(Effect::None)
            }
            Action::SortBy(key) => {
                self.sort = self.sort.toggle(key);
                self.recompute_view();
                Ok(Effect::None)
            }
            Action::OpenCreate => {
                self.ensure_no_pending_delete()?;
                self.form.open_for_create()?;
                Ok(Effect::None)
            }
            Action::OpenEdit(index) => {
                self.ensure_no_pending_delete()?;
                self.form.open_for_edit(&self.repo, index)?;
                Ok(Effect::None)
            }
            Action::UpdateDraft(draft) => {
                let slot = self.form.draft_mut().ok_or(SuiviError::FormNotOpen)?;
                *slot = draft;
                Ok(Effect::None)
            }
            Action::SaveForm => {
                self.ensure_no_pending_delete()?;
                let outcome = self
                    .form
                    .save(&mut self.repo, &mut self.notifier, &self.timings, now)?;
                self.recompute_view();
                Ok(Effect::Saved(outcome))
            }
            Action::CancelForm => {
                if self.form.cancel() {
                    Ok(Effect::FormClosed)
                } else {
                    Err(SuiviError::Busy)
                }
            }
            Action::RequestDelete(id) => {
                if self.form.is_saving() {
                    return Err(SuiviError::Busy);
                }
                if self.repo.find(id).is_none() {
                    return Err(SuiviError::RecordNotFound(id.to_string()));
                }
                self.pending_delete = Some(id);
                Ok(Effect::None)
            }
            Action::ConfirmDelete => self.confirm_delete(now),
            Action::DismissDelete => {
                self.pending_delete = None;
                Ok(Effect::DeleteDismissed)
            }
            Action::SelectFromList(index) => Ok(self
                .map
                .select_from_list(self.repo.records(), index)
                .map(Effect::FlyTo)
                .unwrap_or(Effect::None)),
            Action::SelectFromMarker(index) => {
                self.map.select_from_marker(self.repo.records(), index);
                Ok(Effect::None)
            }
            Action::Escape => {
                if self.pending_delete.take().is_some() {
                    Ok(Effect::DeleteDismissed)
                } else if self.form.is_open() && self.form.cancel() {
                    Ok(Effect::FormClosed)
                } else {
                    Ok(Effect::None)
                }
            }
            Action::Tick => {
                self.notifier.tick(now);
                if self.form.tick(now) {
                    Ok(Effect::FormClosed)
                } else {
                    Ok(Effect::None)
                }
            }
        }
    }

    /// 削除確認中は他の変更を受け付けない
    fn ensure_no_pending_delete(&self) -> Result<()> {
        match self.pending_delete {
            Some(_) => Err(SuiviError::Busy),
            None => Ok(()),
        }
    }

    fn confirm_delete(&mut self, now: Instant) -> Result<Effect> {
        if self.form.is_saving() {
            return Err(SuiviError::Busy);
        }
        // 成否にかかわらず確認状態は閉じる
        let Some(id) = self.pending_delete.take() else {
            return Ok(Effect::None);
        };
        let result = self
            .repo
            .position_of(id)
            .ok_or_else(|| SuiviError::RecordNotFound(id.to_string()))
            .and_then(|index| self.repo.delete(index));

        match result {
            Ok((record, persistence)) => {
                let message = if persistence.is_durable() {
                    "✅ Supprimé"
                } else {
                    "✅ Supprimé (mémoire)"
                };
                self.notifier.notify(message, self.timings.delete_confirm, now);
                self.map.forget(record.id);
                self.recompute_view();
                Ok(Effect::Deleted { record, persistence })
            }
            Err(e) => {
                warn!(error = %e, "delete failed");
                self.notifier
                    .notify("❌ Erreur suppression", self.timings.error, now);
                Err(e)
            }
        }
    }

    /// 一覧全体（表示中の絞り込みではなく）を書き出す
    pub fn export(
        &mut self,
        format: &ExportFormat,
        output_dir: &Path,
        date: NaiveDate,
        now: Instant,
    ) -> Result<Vec<PathBuf>> {
        match export::export_records(self.repo.records(), format, output_dir, date) {
            Ok(paths) => {
                self.notifier
                    .notify("✅ Export réussi", self.timings.export, now);
                Ok(paths)
            }
            Err(SuiviError::NothingToExport) => {
                self.notifier.notify(
                    format!("❌ {}", SuiviError::NothingToExport),
                    self.timings.export,
                    now,
                );
                Err(SuiviError::NothingToExport)
            }
            Err(e) => {
                self.notifier.notify("❌ Erreur export", self.timings.error, now);
                Err(e)
            }
        }
    }

    /// 指定文字列をリポジトリ内の位置に解決
    ///
    /// 1始まりの番号、完全なID、または一意なID接頭辞（4文字以上）を受け付ける。
    pub fn resolve_target(&self, target: &str) -> Result<usize> {
        let target = target.trim();
        let len = self.repo.len();
        let number = target.parse::<usize>().ok();
        if let Some(n) = number.filter(|n| (1..=len).contains(n)) {
            return Ok(n - 1);
        }
        if let Ok(id) = target.parse::<RecordId>() {
            return self
                .repo
                .position_of(id)
                .ok_or_else(|| SuiviError::RecordNotFound(target.to_string()));
        }

        let prefix = target.to_lowercase();
        let matches: Vec<usize> = if prefix.len() >= 4 {
            self.repo
                .records()
                .iter()
                .enumerate()
                .filter(|(_, r)| r.id.to_string().starts_with(&prefix))
                .map(|(i, _)| i)
                .collect()
        } else {
            Vec::new()
        };
        match (matches.as_slice(), number) {
            ([index], _) => Ok(*index),
            ([], Some(index)) => Err(SuiviError::IndexOutOfRange { index, len }),
            _ => Err(SuiviError::RecordNotFound(target.to_string())),
        }
    }
}
