//! 初期データ（保存データがない場合に使用）
//!
//! パリのレストラン10件。座標は実測値。

use crate::types::{ApplicationRecord, RecordId, Reponse, Visite};

struct SeedRow {
    restaurant: &'static str,
    date_envoi: &'static str,
    telephone: &'static str,
    chef: &'static str,
    visite: Visite,
    reponse: Reponse,
    commentaires: &'static str,
    lat: f64,
    lng: f64,
}

const SEED_ROWS: [SeedRow; 10] = [
    SeedRow { restaurant: "Le Faham", date_envoi: "2024-12-29", telephone: "01 53 81 48 18", chef: "Rangama", visite: Visite::Oui, reponse: Reponse::Pending, commentaires: "", lat: 48.8534, lng: 2.3488 },
    SeedRow { restaurant: "Alliance", date_envoi: "2024-12-31", telephone: "01 75 51 57 54", chef: "Toshitaka Omiya", visite: Visite::Pending, reponse: Reponse::Pending, commentaires: "", lat: 48.8508, lng: 2.3526 },
    SeedRow { restaurant: "Frederic Simonin", date_envoi: "2024-12-31", telephone: "01 45 74 74 74", chef: "Frederic Simonin", visite: Visite::Pending, reponse: Reponse::Pending, commentaires: "", lat: 48.8788, lng: 2.2986 },
    SeedRow { restaurant: "Pantagruel", date_envoi: "2024-12-31", telephone: "01 40 20 05 72", chef: "Jason Gouzy", visite: Visite::Pending, reponse: Reponse::Pending, commentaires: "", lat: 48.8648, lng: 2.3417 },
    SeedRow { restaurant: "Lasserre", date_envoi: "2025-01-03", telephone: "01 43 59 02 13", chef: "Chef Ascione", visite: Visite::Oui, reponse: Reponse::Pending, commentaires: "", lat: 48.8663, lng: 2.3082 },
    SeedRow { restaurant: "Dame de Pic", date_envoi: "", telephone: "", chef: "Anne-Sophie Pic", visite: Visite::Pending, reponse: Reponse::Pending, commentaires: "", lat: 48.8606, lng: 2.3376 },
    SeedRow { restaurant: "Granit", date_envoi: "", telephone: "", chef: "", visite: Visite::Pending, reponse: Reponse::Pending, commentaires: "", lat: 48.8738, lng: 2.3508 },
    SeedRow { restaurant: "Apicius", date_envoi: "", telephone: "", chef: "", visite: Visite::Pending, reponse: Reponse::Pending, commentaires: "", lat: 48.8756, lng: 2.3103 },
    SeedRow { restaurant: "Agapé", date_envoi: "", telephone: "", chef: "", visite: Visite::Pending, reponse: Reponse::Pending, commentaires: "", lat: 48.8819, lng: 2.2944 },
    SeedRow { restaurant: "Atelier Joel Robuchon", date_envoi: "", telephone: "", chef: "", visite: Visite::Oui, reponse: Reponse::Negative, commentaires: "pas de stage proposé", lat: 48.8558, lng: 2.3239 },
];

/// 初期データを生成（呼び出しごとに新しいIDを採番）
pub fn seed_records() -> Vec<ApplicationRecord> {
    SEED_ROWS
        .iter()
        .map(|row| ApplicationRecord {
            id: RecordId::new(),
            restaurant: row.restaurant.to_string(),
            date_envoi: row.date_envoi.to_string(),
            telephone: row.telephone.to_string(),
            chef: row.chef.to_string(),
            visite: row.visite,
            reponse: row.reponse,
            commentaires: row.commentaires.to_string(),
            lat: Some(row.lat),
            lng: Some(row.lng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_ten_located_records() {
        let records = seed_records();
        assert_eq!(records.len(), 10);
        assert!(records.iter().all(|r| r.location().is_some()));
        assert!(records.iter().all(|r| !r.restaurant.is_empty()));
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let records = seed_records();
        let mut ids: Vec<_> = records.iter().map(|r| r.id.to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }
}
