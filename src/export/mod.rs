pub mod csv;
pub mod excel;
pub mod map_html;

use crate::cli::ExportFormat;
use crate::error::{Result, SuiviError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use suivi_candidatures_common::export::export_file_name;
use suivi_candidatures_common::ApplicationRecord;

fn output_path_for_format(output: &Path, date: NaiveDate, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(export_file_name(date, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, date: NaiveDate) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        (
            output.join(export_file_name(date, "csv")),
            output.join(export_file_name(date, "xlsx")),
        )
    } else {
        (output.with_extension("csv"), output.with_extension("xlsx"))
    }
}

/// レコード一覧をファイルに書き出す。0件はエラー
pub fn export_records(
    records: &[ApplicationRecord],
    format: &ExportFormat,
    output: &Path,
    date: NaiveDate,
) -> Result<Vec<PathBuf>> {
    if records.is_empty() {
        return Err(SuiviError::NothingToExport);
    }

    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    }

    let paths = match format {
        ExportFormat::Csv => {
            let path = output_path_for_format(output, date, "csv");
            csv::write_csv(records, &path)?;
            vec![path]
        }
        ExportFormat::Excel => {
            let path = output_path_for_format(output, date, "xlsx");
            excel::generate_excel(records, &path)?;
            vec![path]
        }
        ExportFormat::Both => {
            let (csv_path, excel_path) = output_paths_for_both(output, date);
            csv::write_csv(records, &csv_path)?;
            excel::generate_excel(records, &excel_path)?;
            vec![csv_path, excel_path]
        }
    };

    Ok(paths)
}
