//! ファイルストア
//!
//! キーごとに `<dir>/<key>.json` を1つ使う。書き込みは一時ファイル経由で置き換え。

use super::KeyValueStore;
use crate::error::{Result, SuiviError};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// キーに対応するファイルパス（英数字・`-`・`_` 以外は `_` に置換）
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileStore {
    fn is_available(&self) -> bool {
        fs::create_dir_all(&self.dir).is_ok() && self.dir.is_dir()
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| SuiviError::StoreWrite(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| SuiviError::StoreWrite(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}
