//! CSV出力（CLI版）

use crate::error::Result;
use std::path::Path;
use suivi_candidatures_common::export::csv_core::render_csv;
use suivi_candidatures_common::ApplicationRecord;
use tracing::debug;

pub fn write_csv(records: &[ApplicationRecord], output_path: &Path) -> Result<()> {
    let content = render_csv(records);
    std::fs::write(output_path, content.as_bytes())?;
    debug!(path = %output_path.display(), rows = records.len(), "csv written");
    Ok(())
}
