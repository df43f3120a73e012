//! Excel生成（共通ライブラリ）
//!
//! CSVと同じ列構成で1シートに出力する

use super::EXPORT_HEADERS;
use crate::error::{Error, Result};
use crate::types::ApplicationRecord;
use rust_xlsxwriter::*;

const COLUMN_WIDTHS: [f64; 9] = [28.0, 12.0, 16.0, 20.0, 8.0, 10.0, 40.0, 10.0, 10.0];

fn excel_err(context: &str, e: XlsxError) -> Error {
    Error::Export(format!("{}: {}", context, e))
}

/// Excelをバッファに生成
pub fn generate_excel_buffer(records: &[ApplicationRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xD4AF37))
        .set_background_color(Color::RGB(0x1A1A1A))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let text_format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Candidatures")
        .map_err(|e| excel_err("シート名設定エラー", e))?;

    for (col, (header, width)) in EXPORT_HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, width)
            .map_err(|e| excel_err("列幅設定エラー", e))?;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| excel_err("見出し書き込みエラー", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| excel_err("固定設定エラー", e))?;

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        let texts = [
            record.restaurant.as_str(),
            record.date_envoi.as_str(),
            record.telephone.as_str(),
            record.chef.as_str(),
            record.visite.as_str(),
            record.reponse.as_str(),
            record.commentaires.as_str(),
        ];
        for (col, value) in texts.iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, *value, &text_format)
                .map_err(|e| excel_err("値書き込みエラー", e))?;
        }
        for (col, value) in [(7u16, record.lat), (8u16, record.lng)] {
            if let Some(v) = value {
                worksheet
                    .write_number(row, col, v)
                    .map_err(|e| excel_err("座標書き込みエラー", e))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| excel_err("Excel保存エラー", e))
}
