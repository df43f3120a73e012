//! Suivi des candidatures en restaurant
//!
//! 応募先レコードの保存・検索・並べ替え・地図同期・書き出し

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod map_sync;
pub mod notifier;
pub mod prompt;
pub mod repository;
pub mod store;

pub use suivi_candidatures_common as common;
