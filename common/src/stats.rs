//! 集計（総数・訪問数・返答数・返答率）

use crate::types::{ApplicationRecord, Visite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub visites: usize,
    pub reponses: usize,
    /// 返答率（%、四捨五入）
    pub taux: u32,
}

impl Stats {
    pub fn from_records(records: &[ApplicationRecord]) -> Self {
        let total = records.len();
        let visites = records.iter().filter(|r| r.visite == Visite::Oui).count();
        let reponses = records.iter().filter(|r| !r.reponse.is_pending()).count();
        let taux = if total > 0 {
            (reponses as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Self { total, visites, reponses, taux }
    }
}
