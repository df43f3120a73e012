//! 応募レコードの型定義
//!
//! - ApplicationRecord: 保存される1件の応募先（レストラン）
//! - RecordDraft: 追加/編集フォームの下書き（座標は自由入力の文字列）
//! - Visite / Reponse: 訪問・返答ステータス（空文字 = 未定）

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 座標未設定時の既定値（パリ中心）
pub const PARIS_CENTER: LatLng = LatLng { lat: 48.8566, lng: 2.3522 };

/// 地図座標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// レコードの安定ID（作成時に採番）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 表示用の短縮ID（先頭8文字）
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| Error::InvalidValue(format!("id {}: {}", s, e)))
    }
}

/// 訪問ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Visite {
    #[default]
    Pending,
    Oui,
    Non,
}

impl Visite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visite::Pending => "",
            Visite::Oui => "oui",
            Visite::Non => "non",
        }
    }

    /// バッジ表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Visite::Pending => "En attente",
            Visite::Oui => "Oui",
            Visite::Non => "Non",
        }
    }
}

// 未知の値は未定扱い
impl From<String> for Visite {
    fn from(value: String) -> Self {
        match value.as_str() {
            "oui" => Visite::Oui,
            "non" => Visite::Non,
            _ => Visite::Pending,
        }
    }
}

impl From<Visite> for String {
    fn from(value: Visite) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for Visite {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "attente" | "en attente" => Ok(Visite::Pending),
            "oui" | "o" => Ok(Visite::Oui),
            "non" | "n" => Ok(Visite::Non),
            other => Err(Error::InvalidValue(format!(
                "visite: {}. Valeurs: oui, non, attente",
                other
            ))),
        }
    }
}

/// 返答ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Reponse {
    #[default]
    Pending,
    Positive,
    Negative,
}

impl Reponse {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reponse::Pending => "",
            Reponse::Positive => "positive",
            Reponse::Negative => "negative",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Reponse::Pending => "En attente",
            Reponse::Positive => "Positive",
            Reponse::Negative => "Négative",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Reponse::Pending)
    }
}

impl From<String> for Reponse {
    fn from(value: String) -> Self {
        match value.as_str() {
            "positive" => Reponse::Positive,
            "negative" => Reponse::Negative,
            _ => Reponse::Pending,
        }
    }
}

impl From<Reponse> for String {
    fn from(value: Reponse) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for Reponse {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "attente" | "en attente" => Ok(Reponse::Pending),
            "positive" | "pos" | "+" => Ok(Reponse::Positive),
            "negative" | "négative" | "neg" | "-" => Ok(Reponse::Negative),
            other => Err(Error::InvalidValue(format!(
                "reponse: {}. Valeurs: positive, negative, attente",
                other
            ))),
        }
    }
}

/// 応募先レコード
///
/// JSONのキーは保存済みデータとの互換のため camelCase（`dateEnvoi` など）。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    /// 旧データ（IDなし）は読み込み時に採番される
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: RecordId,

    #[serde(default, deserialize_with = "lenient_text")]
    pub restaurant: String,

    /// ISO日付（YYYY-MM-DD）または空（未送付）
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_envoi: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub telephone: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub chef: String,

    #[serde(default, deserialize_with = "lenient_status")]
    pub visite: Visite,

    #[serde(default, deserialize_with = "lenient_status")]
    pub reponse: Reponse,

    #[serde(default, deserialize_with = "lenient_text")]
    pub commentaires: String,

    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: Option<f64>,

    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lng: Option<f64>,
}

impl ApplicationRecord {
    /// 地図に表示できる座標（両方が設定済みかつ0以外の場合のみ）
    pub fn location(&self) -> Option<LatLng> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some(LatLng { lat, lng }),
            _ => None,
        }
    }

    /// 検索対象となる各フィールドの文字列表現（空は除外）
    pub fn searchable_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.restaurant.clone(),
            self.date_envoi.clone(),
            self.telephone.clone(),
            self.chef.clone(),
            self.visite.as_str().to_string(),
            self.reponse.as_str().to_string(),
            self.commentaires.clone(),
        ];
        fields.extend(self.lat.map(|v| v.to_string()));
        fields.extend(self.lng.map(|v| v.to_string()));
        fields.retain(|f| !f.is_empty());
        fields
    }
}

/// 保存形式（JSON配列）へ変換
pub fn encode_records(records: &[ApplicationRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// 保存形式（JSON配列）から復元
pub fn decode_records(json: &str) -> Result<Vec<ApplicationRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// 文字列以外（null・数値など）も受け付ける。null は空文字
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// null・不明な値は未定
fn lenient_status<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    lenient_text(deserializer).map(T::from)
}

/// 読めないIDは採番し直す
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    let text = lenient_text(deserializer)?;
    Ok(text.parse().unwrap_or_default())
}

/// 数値・数値文字列・null・空文字を受け付ける
fn lenient_coordinate<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => parse_coordinate(&s),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()))
}

/// 先頭の数値部分を読み取る（"48.85abc" → 48.85）
pub fn parse_coordinate(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut parsed = None;
    for (idx, ch) in trimmed.char_indices().take(64) {
        let end = idx + ch.len_utf8();
        if let Ok(value) = trimmed[..end].parse::<f64>() {
            parsed = Some(value);
        }
    }
    parsed.filter(|v| v.is_finite())
}

/// 保存時の座標変換。読めない値・0は既定値にフォールバック
pub fn coerce_coordinate(text: &str, fallback: f64) -> f64 {
    parse_coordinate(text)
        .filter(|v| *v != 0.0)
        .unwrap_or(fallback)
}

/// フォームの下書き
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordDraft {
    pub restaurant: String,
    pub date_envoi: String,
    pub telephone: String,
    pub chef: String,
    pub visite: Visite,
    pub reponse: Reponse,
    pub commentaires: String,
    pub lat: String,
    pub lng: String,
}

impl RecordDraft {
    /// 新規作成用（座標はパリ中心を初期値に）
    pub fn blank() -> Self {
        Self {
            lat: PARIS_CENTER.lat.to_string(),
            lng: PARIS_CENTER.lng.to_string(),
            ..Default::default()
        }
    }

    /// 既存レコードの編集用コピー
    pub fn from_record(record: &ApplicationRecord) -> Self {
        Self {
            restaurant: record.restaurant.clone(),
            date_envoi: record.date_envoi.clone(),
            telephone: record.telephone.clone(),
            chef: record.chef.clone(),
            visite: record.visite,
            reponse: record.reponse,
            commentaires: record.commentaires.clone(),
            lat: record.lat.map(|v| v.to_string()).unwrap_or_default(),
            lng: record.lng.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    pub fn has_restaurant(&self) -> bool {
        !self.restaurant.trim().is_empty()
    }

    /// レコードへ確定（座標はここで数値化）
    pub fn into_record(self, id: RecordId) -> ApplicationRecord {
        ApplicationRecord {
            id,
            lat: Some(coerce_coordinate(&self.lat, PARIS_CENTER.lat)),
            lng: Some(coerce_coordinate(&self.lng, PARIS_CENTER.lng)),
            restaurant: self.restaurant,
            date_envoi: self.date_envoi,
            telephone: self.telephone,
            chef: self.chef,
            visite: self.visite,
            reponse: self.reponse,
            commentaires: self.commentaires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_prefix() {
        assert_eq!(parse_coordinate("48.8534"), Some(48.8534));
        assert_eq!(parse_coordinate("  2.35abc"), Some(2.35));
        assert_eq!(parse_coordinate("abc"), None);
        assert_eq!(parse_coordinate(""), None);
    }

    #[test]
    fn test_coerce_coordinate_fallback() {
        assert_eq!(coerce_coordinate("n'importe quoi", PARIS_CENTER.lat), 48.8566);
        assert_eq!(coerce_coordinate("0", PARIS_CENTER.lng), 2.3522);
        assert_eq!(coerce_coordinate("48.87", PARIS_CENTER.lat), 48.87);
    }

    #[test]
    fn test_lenient_coordinates_from_json() {
        let json = r#"[
            {"restaurant": "A", "lat": "48.5", "lng": 2.1},
            {"restaurant": "B", "lat": null, "lng": ""},
            {"restaurant": "C"}
        ]"#;
        let records = decode_records(json).unwrap();
        assert_eq!(records[0].lat, Some(48.5));
        assert_eq!(records[0].lng, Some(2.1));
        assert_eq!(records[1].lat, None);
        assert_eq!(records[1].lng, None);
        assert!(records[2].location().is_none());
    }

    #[test]
    fn test_status_enums_serialize_as_strings() {
        let record = ApplicationRecord {
            restaurant: "Granit".into(),
            visite: Visite::Oui,
            reponse: Reponse::Pending,
            ..Default::default()
        };
        let json = encode_records(&[record]).unwrap();
        assert!(json.contains(r#""visite":"oui""#));
        assert!(json.contains(r#""reponse":"""#));
        assert!(json.contains(r#""dateEnvoi":"""#));
    }

    #[test]
    fn test_unknown_status_is_pending() {
        let records = decode_records(r#"[{"restaurant": "X", "visite": "peut-être"}]"#).unwrap();
        assert_eq!(records[0].visite, Visite::Pending);
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let json = r#"[{"id": null, "restaurant": "A", "chef": null, "telephone": 140, "visite": null, "reponse": null, "commentaires": null}]"#;
        let records = decode_records(json).unwrap();
        assert_eq!(records[0].restaurant, "A");
        assert_eq!(records[0].chef, "");
        assert_eq!(records[0].telephone, "140");
        assert_eq!(records[0].visite, Visite::Pending);
        assert_eq!(records[0].reponse, Reponse::Pending);
        assert_eq!(records[0].commentaires, "");
    }

    #[test]
    fn test_stored_id_is_kept() {
        let id = RecordId::new();
        let json = format!(r#"[{{"id": "{}", "restaurant": "A"}}]"#, id);
        assert_eq!(decode_records(&json).unwrap()[0].id, id);
    }

    #[test]
    fn test_draft_into_record_coerces() {
        let draft = RecordDraft {
            restaurant: "Agapé".into(),
            lat: "pas un nombre".into(),
            lng: "2.2944".into(),
            ..Default::default()
        };
        let record = draft.into_record(RecordId::new());
        assert_eq!(record.lat, Some(48.8566));
        assert_eq!(record.lng, Some(2.2944));
    }

    #[test]
    fn test_blank_draft_has_paris_placeholder() {
        let draft = RecordDraft::blank();
        assert_eq!(draft.lat, "48.8566");
        assert_eq!(draft.lng, "2.3522");
        assert!(!draft.has_restaurant());
    }

    #[test]
    fn test_record_id_parse() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("pas-un-uuid".parse::<RecordId>().is_err());
        assert_eq!(id.short().len(), 8);
    }
}
