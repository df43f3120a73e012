//! Excel生成（CLI版）

use crate::error::{Result, SuiviError};
use std::path::Path;
use suivi_candidatures_common::export::excel_core::generate_excel_buffer;
use suivi_candidatures_common::ApplicationRecord;

pub fn generate_excel(records: &[ApplicationRecord], output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(records)
        .map_err(|e| SuiviError::ExportGeneration(e.to_string()))?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
