//! Product Catalog Common Library
//!
//! CLIと共有される型と純粋ロジック（差分・マージ・絞り込み・レイアウト）

pub mod record;
pub mod key;
pub mod diff;
pub mod merge;
pub mod filter;
pub mod layout;
pub mod i18n;
pub mod error;

pub use record::{missing_columns, Column, Record, COMPARED_COLUMNS, REQUIRED_COLUMNS};
pub use key::normalize;
pub use diff::{diff, DiffCounts, DiffReport};
pub use merge::{merge, sort_records};
pub use filter::{distinct_categories, distinct_materials, CatalogFilter, ViewMode};
pub use layout::{CatalogLayout, EntrySlot};
pub use i18n::{Label, Lang};
pub use error::{Error, Result};
