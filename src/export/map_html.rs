//! 地図ページ（Leaflet + OpenStreetMap）の生成
//!
//! テンプレートはバイナリに埋め込み、マーカーはJSONとして差し込む。
//! ポップアップの文字列はJS側で textContent として設定する。

use crate::error::Result;
use crate::map_sync::{MapMarker, MapSyncController};
use serde::Serialize;
use std::path::Path;
use suivi_candidatures_common::{ApplicationRecord, LatLng, RecordId};

const MAP_PAGE_HTML: &str = r##"<!doctype html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Carte des candidatures</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    html, body { margin: 0; height: 100%; font-family: 'Montserrat', sans-serif; }
    #map { height: 100%; width: 100%; }
    .custom-div-icon { background: transparent !important; border: none !important; }
    .popup-title { margin: 0 0 8px 0; color: #d4af37; font-size: 14px; font-weight: 600; border-bottom: 1px solid #f4e4bc; padding-bottom: 6px; }
    .popup-info { margin: 4px 0; font-size: 12px; }
    .popup-status { margin: 4px 0; font-size: 12px; font-weight: bold; }
    .popup-comment { margin: 6px 0 0 0; font-size: 11px; font-style: italic; color: #666; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const state = __STATE__;
    const map = L.map('map').setView([state.center.lat, state.center.lng], state.zoom);
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a>'
    }).addTo(map);

    const icon = (color, active) => {
      const w = active ? 40 : 32;
      const h = active ? 60 : 48;
      return L.divIcon({
        className: 'custom-div-icon',
        html: '<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 36" width="' + w + '" height="' + h + '">'
          + '<path d="M12 0C5.4 0 0 5.4 0 12c0 9 12 24 12 24s12-15 12-24c0-6.6-5.4-12-12-12z" fill="' + color + '" stroke="#fff" stroke-width="2"/>'
          + '<circle cx="12" cy="12" r="5" fill="white"/></svg>',
        iconSize: [w, h],
        iconAnchor: [w / 2, h],
        popupAnchor: [0, -h],
      });
    };

    const el = (tag, cls, text) => {
      const node = document.createElement(tag);
      node.className = cls;
      node.textContent = text;
      return node;
    };

    const popupContent = (popup) => {
      const root = document.createElement('div');
      root.style.minWidth = '180px';
      root.appendChild(el('h4', 'popup-title', popup.title));
      for (const line of popup.lines) {
        if (line.kind === 'info') {
          const p = el('p', 'popup-info', ' ' + line.value);
          const label = document.createElement('strong');
          label.textContent = line.label + ':';
          p.prepend(label);
          root.appendChild(p);
        } else if (line.kind === 'status') {
          const p = el('p', 'popup-status', line.text);
          p.style.color = line.color;
          root.appendChild(p);
        } else {
          root.appendChild(el('p', 'popup-comment', line.text));
        }
      }
      return root;
    };

    for (const m of state.markers) {
      const marker = L.marker([m.position.lat, m.position.lng], {
        icon: icon(m.hex, m.active),
        zIndexOffset: m.active ? 1000 : 0,
      })
        .bindPopup(popupContent(m.popup))
        .addTo(map);
      if (state.open_popup === m.id) {
        marker.openPopup();
      }
    }
  </script>
</body>
</html>
"##;

#[derive(Serialize)]
struct MapPageState<'a> {
    center: LatLng,
    zoom: u8,
    open_popup: Option<RecordId>,
    markers: &'a [MapMarker],
}

/// 地図ページのHTMLを生成
pub fn render_map_page(records: &[ApplicationRecord], sync: &MapSyncController) -> Result<String> {
    let markers = sync.markers(records);
    let (center, zoom) = sync.view_center();
    let state = MapPageState {
        center,
        zoom,
        open_popup: sync.selected().filter(|_| sync.center_target().is_some()),
        markers: &markers,
    };
    // </script> を閉じさせない
    let json = serde_json::to_string(&state)?.replace("</", "<\\/");
    Ok(MAP_PAGE_HTML.replace("__STATE__", &json))
}

pub fn write_map_page(
    records: &[ApplicationRecord],
    sync: &MapSyncController,
    output_path: &Path,
) -> Result<()> {
    let html = render_map_page(records, sync)?;
    std::fs::write(output_path, html)?;
    Ok(())
}
