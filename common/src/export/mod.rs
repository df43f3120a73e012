//! Export core modules shared across the CLI and the map page.

pub mod csv_core;

#[cfg(feature = "excel")]
pub mod excel_core;

use chrono::NaiveDate;

/// 出力列見出し（CSV/Excel共通）
pub const EXPORT_HEADERS: [&str; 9] = [
    "Restaurant",
    "Date Envoi",
    "Téléphone",
    "Chef",
    "Visite",
    "Réponse",
    "Commentaires",
    "Latitude",
    "Longitude",
];

/// `candidatures_YYYY-MM-DD.<ext>`
pub fn export_file_name(date: NaiveDate, extension: &str) -> String {
    format!("candidatures_{}.{}", date.format("%Y-%m-%d"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(export_file_name(date, "csv"), "candidatures_2025-01-03.csv");
    }
}
