//! 一覧表示用の検索・並べ替え
//!
//! 表示リストはリポジトリの内容から毎回作り直す派生データで、
//! 直接書き換えない。検索 → 並べ替えの順で適用する。

use crate::error::{Error, Result};
use crate::types::ApplicationRecord;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::str::FromStr;

/// 並べ替えキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Restaurant,
    DateEnvoi,
    Telephone,
    Chef,
    Visite,
    Reponse,
    Commentaires,
}

impl SortKey {
    fn text<'a>(&self, record: &'a ApplicationRecord) -> &'a str {
        match self {
            SortKey::Restaurant => &record.restaurant,
            SortKey::DateEnvoi => &record.date_envoi,
            SortKey::Telephone => &record.telephone,
            SortKey::Chef => &record.chef,
            SortKey::Visite => record.visite.as_str(),
            SortKey::Reponse => record.reponse.as_str(),
            SortKey::Commentaires => &record.commentaires,
        }
    }

    /// 昇順での比較
    pub fn compare(&self, a: &ApplicationRecord, b: &ApplicationRecord) -> Ordering {
        match self {
            SortKey::DateEnvoi => parse_date(&a.date_envoi).cmp(&parse_date(&b.date_envoi)),
            _ => natural_cmp(self.text(a), self.text(b)),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "restaurant" => Ok(SortKey::Restaurant),
            "date" | "dateenvoi" | "date-envoi" => Ok(SortKey::DateEnvoi),
            "telephone" | "téléphone" | "tel" => Ok(SortKey::Telephone),
            "chef" => Ok(SortKey::Chef),
            "visite" => Ok(SortKey::Visite),
            "reponse" | "réponse" => Ok(SortKey::Reponse),
            "commentaires" => Ok(SortKey::Commentaires),
            other => Err(Error::InvalidValue(format!(
                "tri: {}. Clés: restaurant, date, telephone, chef, visite, reponse, commentaires",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// 現在の並べ替え設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// 見出しクリック: 同じキーの昇順なら降順へ、それ以外は昇順
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == Some(key) && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key: Some(key), direction }
    }
}

/// 検索語で絞り込み（大文字小文字を区別しない部分一致）
///
/// 空の検索語は全件を元の順序のまま返す。
pub fn apply_search(records: &[ApplicationRecord], term: &str) -> Vec<ApplicationRecord> {
    if term.is_empty() {
        return records.to_vec();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.searchable_fields()
                .iter()
                .any(|f| f.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// 安定ソート。降順は比較結果を反転する（同値は元の順序を保つ）
pub fn sort_records(records: &[ApplicationRecord], config: SortConfig) -> Vec<ApplicationRecord> {
    let mut sorted = records.to_vec();
    if let Some(key) = config.key {
        sorted.sort_by(|a, b| {
            let ord = key.compare(a, b);
            match config.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
    sorted
}

/// 空・不正な日付は最も古い扱い（None < Some）
fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// 大文字小文字・アクセントを無視し、数字列は数値として比較
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_digits(&mut ai);
                let nb = take_digits(&mut bi);
                let ord = cmp_digit_runs(&na, &nb);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.cmp(&y);
                if ord != Ordering::Equal {
                    return ord;
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits<I: Iterator<Item = char>>(iter: &mut std::iter::Peekable<I>) -> String {
    let mut digits = String::new();
    while let Some(c) = iter.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        iter.next();
    }
    digits
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars().flat_map(char::to_lowercase) {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'ç' => out.push('c'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'ñ' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => out.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'æ' => out.push_str("ae"),
            'œ' => out.push_str("oe"),
            other => out.push(other),
        }
    }
    out
}
