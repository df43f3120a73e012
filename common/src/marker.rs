//! 地図マーカーの色・ステータス・ポップアップ内容

use crate::types::{ApplicationRecord, Reponse, Visite};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// マーカー色（優先順位: 返答 > 訪問 > 未定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Accepted,
    Refused,
    Visited,
    Pending,
}

impl MarkerColor {
    pub fn hex(&self) -> &'static str {
        match self {
            MarkerColor::Accepted => "#1a6b1a",
            MarkerColor::Refused => "#8b1e1e",
            MarkerColor::Visited => "#2d5016",
            MarkerColor::Pending => "#d4af37",
        }
    }

    /// 一覧に表示するステータス
    pub fn status_label(&self) -> &'static str {
        match self {
            MarkerColor::Accepted => "Accepté",
            MarkerColor::Refused => "Refusé",
            MarkerColor::Visited => "Visité",
            MarkerColor::Pending => "En attente",
        }
    }
}

pub fn marker_color(record: &ApplicationRecord) -> MarkerColor {
    match (record.reponse, record.visite) {
        (Reponse::Positive, _) => MarkerColor::Accepted,
        (Reponse::Negative, _) => MarkerColor::Refused,
        (_, Visite::Oui) => MarkerColor::Visited,
        _ => MarkerColor::Pending,
    }
}

/// ポップアップの1行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PopupLine {
    Info { label: String, value: String },
    Status { text: String, color: String },
    Comment { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<PopupLine>,
}

impl Popup {
    pub fn for_record(record: &ApplicationRecord) -> Self {
        let mut lines = Vec::new();
        let mut info = |label: &str, value: &str| {
            if !value.is_empty() {
                lines.push(PopupLine::Info {
                    label: label.to_string(),
                    value: value.to_string(),
                });
            }
        };
        info("Chef", &record.chef);
        info("Tél", &record.telephone);
        if !record.date_envoi.is_empty() {
            info("Envoyé", &format_date_short(&record.date_envoi));
        }

        if record.visite == Visite::Oui {
            lines.push(status("✓ Visite effectuée", MarkerColor::Visited));
        }
        match record.reponse {
            Reponse::Positive => lines.push(status("✓ Réponse positive", MarkerColor::Accepted)),
            Reponse::Negative => lines.push(status("✗ Réponse négative", MarkerColor::Refused)),
            Reponse::Pending => {}
        }
        if !record.commentaires.is_empty() {
            lines.push(PopupLine::Comment {
                text: record.commentaires.clone(),
            });
        }

        Self {
            title: record.restaurant.clone(),
            lines,
        }
    }
}

fn status(text: &str, color: MarkerColor) -> PopupLine {
    PopupLine::Status {
        text: text.to_string(),
        color: color.hex().to_string(),
    }
}

const MONTHS_SHORT: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];

/// "2024-12-29" → "29 déc."、空は "-"、読めない日付はそのまま
pub fn format_date_short(value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => format!("{} {}", date.day(), MONTHS_SHORT[date.month0() as usize]),
        Err(_) => value.to_string(),
    }
}
