//! 產品目錄ツール
//!
//! Excel主檔の一覧表示・PDF型錄出力・更新檔の差分プレビューと一括更新

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod store;
pub mod upsert;
