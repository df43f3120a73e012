//! 一覧と地図の選択同期
//!
//! 一覧クリック: 座標があれば選択し、地図に移動とポップアップ表示を要求する。
//! マーカークリック: 選択のみ（地図はすでにその位置にある）。

use serde::Serialize;
use suivi_candidatures_common::{
    marker_color, ApplicationRecord, LatLng, MarkerColor, Popup, RecordId, PARIS_CENTER,
};

/// 初期表示のズーム
pub const OVERVIEW_ZOOM: u8 = 12;
/// 選択時のズーム
pub const FOCUS_ZOOM: u8 = 15;

/// 地図への要求
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlyTo {
    pub center: LatLng,
    pub zoom: u8,
    /// ポップアップを開くマーカー
    pub open_popup: RecordId,
}

/// 描画するマーカー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: RecordId,
    /// リポジトリ内の位置
    #[serde(skip)]
    pub index: usize,
    pub position: LatLng,
    #[serde(skip)]
    pub color: MarkerColor,
    pub hex: &'static str,
    pub popup: Popup,
    pub active: bool,
}

#[derive(Debug, Default, Clone)]
pub struct MapSyncController {
    selected: Option<RecordId>,
    center_target: Option<LatLng>,
}

impl MapSyncController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<RecordId> {
        self.selected
    }

    pub fn selected_index(&self, records: &[ApplicationRecord]) -> Option<usize> {
        let id = self.selected?;
        records.iter().position(|r| r.id == id)
    }

    pub fn center_target(&self) -> Option<LatLng> {
        self.center_target
    }

    /// 一覧から選択。座標なし・範囲外は何もしない
    pub fn select_from_list(&mut self, records: &[ApplicationRecord], index: usize) -> Option<FlyTo> {
        let record = records.get(index)?;
        let center = record.location()?;
        self.selected = Some(record.id);
        self.center_target = Some(center);
        Some(FlyTo {
            center,
            zoom: FOCUS_ZOOM,
            open_popup: record.id,
        })
    }

    /// マーカーから選択（移動なし）
    pub fn select_from_marker(&mut self, records: &[ApplicationRecord], index: usize) {
        if let Some(record) = records.get(index) {
            self.selected = Some(record.id);
        }
    }

    /// 削除されたレコードの選択を解除
    pub fn forget(&mut self, id: RecordId) {
        if self.selected == Some(id) {
            self.selected = None;
            self.center_target = None;
        }
    }

    /// 地図の中心（選択がなければパリ中心）
    pub fn view_center(&self) -> (LatLng, u8) {
        match self.center_target {
            Some(center) => (center, FOCUS_ZOOM),
            None => (PARIS_CENTER, OVERVIEW_ZOOM),
        }
    }

    /// 座標のあるレコードのみマーカーにする
    pub fn markers(&self, records: &[ApplicationRecord]) -> Vec<MapMarker> {
        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let position = record.location()?;
                let color = marker_color(record);
                Some(MapMarker {
                    id: record.id,
                    index,
                    position,
                    color,
                    hex: color.hex(),
                    popup: Popup::for_record(record),
                    active: self.selected == Some(record.id),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suivi_candidatures_common::seed_records;

    #[test]
    fn test_select_from_list_centers_map() {
        let records = seed_records();
        let mut sync = MapSyncController::new();
        let fly = sync.select_from_list(&records, 2).expect("座標あり");
        assert_eq!(fly.center, LatLng { lat: 48.8788, lng: 2.2986 });
        assert_eq!(fly.zoom, FOCUS_ZOOM);
        assert_eq!(fly.open_popup, records[2].id);
        assert_eq!(sync.selected_index(&records), Some(2));
    }

    #[test]
    fn test_select_without_coordinates_is_noop() {
        let mut records = seed_records();
        records[0].lat = None;
        records[0].lng = None;
        let mut sync = MapSyncController::new();
        assert!(sync.select_from_list(&records, 0).is_none());
        assert_eq!(sync.selected(), None);
        assert_eq!(sync.center_target(), None);
        assert!(sync.select_from_list(&records, 99).is_none());
    }

    #[test]
    fn test_select_from_marker_does_not_pan() {
        let records = seed_records();
        let mut sync = MapSyncController::new();
        sync.select_from_marker(&records, 4);
        assert_eq!(sync.selected_index(&records), Some(4));
        assert_eq!(sync.center_target(), None);
    }

    #[test]
    fn test_markers_skip_unlocated_records() {
        let mut records = seed_records();
        records[3].lat = None;
        let sync = MapSyncController::new();
        let markers = sync.markers(&records);
        assert_eq!(markers.len(), 9);
        assert!(markers.iter().all(|m| m.index != 3));
        let robuchon = markers.iter().find(|m| m.index == 9).unwrap();
        assert_eq!(robuchon.color, MarkerColor::Refused);
    }
}
