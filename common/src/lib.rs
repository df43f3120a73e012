//! Suivi Candidatures Common Library
//!
//! CLIと地図出力で共有される型とユーティリティ（I/Oなし）

pub mod types;
pub mod seed;
pub mod query;
pub mod marker;
pub mod stats;
pub mod error;
pub mod export;

pub use types::{
    coerce_coordinate, decode_records, encode_records, parse_coordinate, ApplicationRecord,
    LatLng, RecordDraft, RecordId, Reponse, Visite, PARIS_CENTER,
};
pub use seed::seed_records;
pub use query::{apply_search, natural_cmp, sort_records, SortConfig, SortDirection, SortKey};
pub use marker::{format_date_short, marker_color, MarkerColor, Popup, PopupLine};
pub use stats::Stats;
pub use error::{Error, Result};
