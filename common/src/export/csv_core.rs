//! CSV生成（共通ライブラリ）
//!
//! - UTF-8 BOM付き、カンマ区切り、改行は `\n`
//! - テキスト列は常に引用符で囲み、内部の `"` は `""` に
//! - 日付・ステータス・座標は引用符なし

use super::EXPORT_HEADERS;
use crate::types::ApplicationRecord;

pub const UTF8_BOM: char = '\u{feff}';

/// テキスト列の引用
pub fn quote_text(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn record_row(record: &ApplicationRecord) -> String {
    [
        quote_text(&record.restaurant),
        record.date_envoi.clone(),
        quote_text(&record.telephone),
        quote_text(&record.chef),
        record.visite.as_str().to_string(),
        record.reponse.as_str().to_string(),
        quote_text(&record.commentaires),
        coordinate(record.lat),
        coordinate(record.lng),
    ]
    .join(",")
}

/// レコード一覧をCSVテキストに変換（BOM付き）
pub fn render_csv(records: &[ApplicationRecord]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(EXPORT_HEADERS.join(","));
    rows.extend(records.iter().map(record_row));

    let mut out = String::new();
    out.push(UTF8_BOM);
    out.push_str(&rows.join("\n"));
    out
}
