//! 追加/編集フォームの状態管理
//!
//! `Closed -> Open(Create | Edit) -> Saving -> Closed`
//!
//! 保存成功後は確認メッセージを表示し、一定時間後に `tick` で閉じる。
//! 保存中は取り消しできない。

use crate::config::NoticeTimings;
use crate::error::{Result, SuiviError};
use crate::notifier::StatusNotifier;
use crate::repository::Repository;
use crate::store::Persistence;
use std::time::Instant;
use suivi_candidatures_common::{RecordDraft, RecordId};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// 編集対象は位置ではなくIDで保持する
    Edit(RecordId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Closed,
    Open {
        mode: FormMode,
        draft: RecordDraft,
    },
    Saving {
        mode: FormMode,
        draft: RecordDraft,
        close_at: Instant,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: RecordId,
    pub persistence: Persistence,
}

#[derive(Debug)]
pub struct FormController {
    state: FormState,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            state: FormState::Closed,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, FormState::Saving { .. })
    }

    pub fn mode(&self) -> Option<FormMode> {
        match &self.state {
            FormState::Closed => None,
            FormState::Open { mode, .. } | FormState::Saving { mode, .. } => Some(*mode),
        }
    }

    pub fn draft(&self) -> Option<&RecordDraft> {
        match &self.state {
            FormState::Closed => None,
            FormState::Open { draft, .. } | FormState::Saving { draft, .. } => Some(draft),
        }
    }

    /// 編集可能な下書き（保存中は不可）
    pub fn draft_mut(&mut self) -> Option<&mut RecordDraft> {
        match &mut self.state {
            FormState::Open { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn open_for_create(&mut self) -> Result<()> {
        self.ensure_closed()?;
        self.state = FormState::Open {
            mode: FormMode::Create,
            draft: RecordDraft::blank(),
        };
        Ok(())
    }

    pub fn open_for_edit(&mut self, repo: &Repository, index: usize) -> Result<()> {
        self.ensure_closed()?;
        let record = repo.get(index).ok_or(SuiviError::IndexOutOfRange {
            index,
            len: repo.len(),
        })?;
        self.state = FormState::Open {
            mode: FormMode::Edit(record.id),
            draft: RecordDraft::from_record(record),
        };
        Ok(())
    }

    fn ensure_closed(&self) -> Result<()> {
        match self.state {
            FormState::Closed => Ok(()),
            _ => Err(SuiviError::Busy),
        }
    }

    /// 取り消し。保存中は何もしない（false）
    pub fn cancel(&mut self) -> bool {
        if self.is_saving() {
            return false;
        }
        self.state = FormState::Closed;
        true
    }

    /// 検証してリポジトリへ確定
    ///
    /// 検証エラー時はメッセージを表示してフォームを開いたままにする。
    pub fn save(
        &mut self,
        repo: &mut Repository,
        notifier: &mut StatusNotifier,
        timings: &NoticeTimings,
        now: Instant,
    ) -> Result<SaveOutcome> {
        let (mode, draft) = match &self.state {
            FormState::Open { mode, draft } => (*mode, draft.clone()),
            FormState::Saving { .. } => return Err(SuiviError::Busy),
            FormState::Closed => return Err(SuiviError::FormNotOpen),
        };

        let result = Self::validate(mode, &draft, repo).and_then(|()| match mode {
            FormMode::Create => repo.create(draft.clone()),
            FormMode::Edit(id) => {
                let index = repo
                    .position_of(id)
                    .ok_or_else(|| SuiviError::RecordNotFound(id.to_string()))?;
                repo.update(index, draft.clone()).map(|p| (id, p))
            }
        });

        match result {
            Ok((id, persistence)) => {
                let message = if persistence.is_durable() {
                    "✅ Sauvegardé"
                } else {
                    "✅ Sauvegardé (mémoire)"
                };
                notifier.notify(message, timings.save_confirm, now);
                self.state = FormState::Saving {
                    mode,
                    draft,
                    close_at: now + timings.save_confirm,
                };
                debug!(%id, ?persistence, "form saved");
                Ok(SaveOutcome { id, persistence })
            }
            Err(e) => {
                let message = if e.is_validation() {
                    format!("❌ {}", e)
                } else {
                    format!("❌ Erreur: {}", e)
                };
                notifier.notify(message, timings.error, now);
                Err(e)
            }
        }
    }

    fn validate(mode: FormMode, draft: &RecordDraft, repo: &Repository) -> Result<()> {
        if !draft.has_restaurant() {
            return Err(SuiviError::EmptyRestaurant);
        }
        if mode == FormMode::Create && repo.is_full() {
            return Err(SuiviError::CapacityReached {
                max: repo.max_records(),
            });
        }
        Ok(())
    }

    /// 保存後の遅延クローズ。閉じたら true
    pub fn tick(&mut self, now: Instant) -> bool {
        if let FormState::Saving { close_at, .. } = self.state {
            if now >= close_at {
                self.state = FormState::Closed;
                return true;
            }
        }
        false
    }
}
