//! 一括更新（差分・バックアップ・マージ・保存）の統合テスト

mod common;

use catalog_common::{CatalogFilter, Column, DiffReport, Record, ViewMode};
use catalog_upsert::error::CatalogError;
use catalog_upsert::store::RecordStore;
use catalog_upsert::upsert::{self, UpsertOptions};
use common::{backups, rec, write_records, write_xlsx};
use tempfile::tempdir;

#[test]
fn test_case_insensitive_match_is_unchanged() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = RecordStore::new(dir.path().join("products.xlsx"));
    store.save(&[rec("X", "A1", "s1", "m1")]).expect("保存失敗");

    let incoming = dir.path().join("update.xlsx");
    write_records(&incoming, &[rec("X", "a1", "s1", "m1")]);

    let preview = upsert::preview(&store, &incoming).expect("プレビュー失敗");
    assert_eq!(preview.report.unchanged, vec!["a1"]);
    assert!(preview.report.inserted.is_empty());
    assert!(preview.report.updated.is_empty());
}

#[test]
fn test_update_replaces_fields() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = RecordStore::new(dir.path().join("products.xlsx"));
    store.save(&[rec("X", "A1", "s1", "m1")]).expect("保存失敗");

    let incoming = dir.path().join("update.xlsx");
    write_records(&incoming, &[rec("X", "A1", "s2", "m1")]);

    let outcome = upsert::apply(&store, &incoming, UpsertOptions::default()).expect("適用失敗");
    assert_eq!(outcome.report.updated, vec!["a1"]);

    let merged = store.load();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].key(), "a1");
    assert_eq!(merged[0].spec, "s2");
}

#[test]
fn test_insert_into_missing_master() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = dir.path().join("products.xlsx");
    let store = RecordStore::new(&master);

    let incoming = dir.path().join("update.xlsx");
    write_records(&incoming, &[rec("Y", "B2", "s", "m")]);

    let outcome = upsert::apply(&store, &incoming, UpsertOptions::default()).expect("適用失敗");
    assert_eq!(outcome.report.inserted, vec!["b2"]);
    assert!(outcome.backup.is_none(), "主檔が無いのにバックアップが作られた");
    assert!(outcome.written);

    let merged = store.load();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].model, "B2");
}

#[test]
fn test_missing_column_aborts_without_side_effects() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = dir.path().join("products.xlsx");
    let store = RecordStore::new(&master);
    store.save(&[rec("X", "A1", "s1", "m1")]).expect("保存失敗");
    let before = std::fs::read(&master).expect("読み込み失敗");

    let incoming = dir.path().join("update.xlsx");
    write_xlsx(
        &incoming,
        &["類別", "型號", "規格", "圖片路徑"],
        &[vec!["X", "A1", "changed", ""]],
    );

    match upsert::apply(&store, &incoming, UpsertOptions::default()) {
        Err(CatalogError::MissingColumns(cols)) => {
            assert_eq!(cols, vec![Column::Material]);
            assert_eq!(cols[0].header(), "材質");
        }
        other => panic!("MissingColumnsになっていない: {:?}", other.map(|o| o.report)),
    }

    assert_eq!(std::fs::read(&master).expect("読み込み失敗"), before);
    assert!(backups(dir.path(), "products").is_empty(), "バックアップが作られた");
}

#[test]
fn test_backup_captures_previous_master() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = RecordStore::new(dir.path().join("products.xlsx"));
    let original = vec![rec("X", "A1", "s1", "m1")];
    store.save(&original).expect("保存失敗");

    let incoming = dir.path().join("update.xlsx");
    write_records(&incoming, &[rec("X", "A1", "s2", "m1"), rec("Y", "B2", "s", "m")]);

    let outcome = upsert::apply(&store, &incoming, UpsertOptions::default()).expect("適用失敗");
    let backup = outcome.backup.expect("バックアップが無い");

    let name = backup.file_name().expect("ファイル名なし").to_string_lossy().to_string();
    assert!(name.starts_with("products_"));
    assert!(name.ends_with(".xlsx"));
    // products_YYYYMMDD_HHMMSS.xlsx
    assert_eq!(name.len(), "products_20261018_153005.xlsx".len());

    assert_eq!(RecordStore::new(&backup).load(), original);
    assert_eq!(store.load().len(), 2);
}

#[test]
fn test_apply_twice_is_idempotent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = RecordStore::new(dir.path().join("products.xlsx"));
    store
        .save(&[rec("B", "Z1", "s", "m"), rec("A", "M2", "s", "m")])
        .expect("保存失敗");

    let incoming = dir.path().join("update.xlsx");
    write_records(&incoming, &[rec("A", "m2", "new", "m"), rec("C", "C3", "s", "m")]);

    let first = upsert::apply(&store, &incoming, UpsertOptions::default()).expect("1回目失敗");
    let after_first = store.load();
    let second = upsert::apply(&store, &incoming, UpsertOptions::default()).expect("2回目失敗");
    let after_second = store.load();

    assert_eq!(first.merged, second.merged);
    assert_eq!(after_first, after_second);
    assert!(second.report.is_noop());
    assert_eq!(second.report.unchanged, vec!["c3", "m2"]);

    // 2回目もバックアップは新しく作られる
    let found = backups(dir.path(), "products");
    assert_eq!(found.len(), 2);
    assert!(first.backup.is_some() && second.backup.is_some());
    assert_ne!(first.backup, second.backup);
}

#[test]
fn test_noop_without_backup_leaves_master_untouched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = dir.path().join("products.xlsx");
    let store = RecordStore::new(&master);
    store.save(&[rec("X", "A1", "s1", "m1")]).expect("保存失敗");
    let before = std::fs::read(&master).expect("読み込み失敗");

    let incoming = dir.path().join("update.xlsx");
    write_records(&incoming, &[rec("X", " a1", "s1", "m1")]);

    let options = UpsertOptions { backup_on_noop: false };
    let outcome = upsert::apply(&store, &incoming, options).expect("適用失敗");

    assert!(!outcome.written);
    assert!(outcome.backup.is_none());
    assert!(backups(dir.path(), "products").is_empty());
    assert_eq!(std::fs::read(&master).expect("読み込み失敗"), before);
}

#[test]
fn test_merged_output_is_sorted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = RecordStore::new(dir.path().join("products.xlsx"));
    store
        .save(&[rec("螺絲", "QC-200", "", ""), rec("墊片", "WS-10", "", "")])
        .expect("保存失敗");

    let incoming = dir.path().join("update.xlsx");
    write_records(&incoming, &[rec("螺絲", "QC-100", "", ""), rec("墊片", "WS-05", "", "")]);

    upsert::apply(&store, &incoming, UpsertOptions::default()).expect("適用失敗");

    let order: Vec<(String, String)> = store
        .load()
        .into_iter()
        .map(|r| (r.category, r.model))
        .collect();
    assert_eq!(
        order,
        vec![
            ("墊片".to_string(), "WS-05".to_string()),
            ("墊片".to_string(), "WS-10".to_string()),
            ("螺絲".to_string(), "QC-100".to_string()),
            ("螺絲".to_string(), "QC-200".to_string()),
        ]
    );
}

#[test]
fn test_report_threads_into_list_view() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = RecordStore::new(dir.path().join("products.xlsx"));
    store
        .save(&[rec("X", "A1", "s1", "m1"), rec("X", "B2", "s1", "m1")])
        .expect("保存失敗");

    let incoming = dir.path().join("update.xlsx");
    write_records(&incoming, &[rec("X", "A1", "s2", "m1"), rec("Y", "N1", "s", "m")]);

    let outcome = upsert::apply(&store, &incoming, UpsertOptions::default()).expect("適用失敗");

    // JSONに保存して読み戻した結果で絞り込む
    let report_path = dir.path().join("diff.json");
    std::fs::write(&report_path, outcome.report.to_json().expect("JSON生成失敗")).expect("書き込み失敗");
    let report = DiffReport::from_file(&report_path).expect("JSON読み込み失敗");

    let records: Vec<Record> = store.load();
    let new_only = CatalogFilter { view: ViewMode::New, ..Default::default() };
    let updated_only = CatalogFilter { view: ViewMode::Updated, ..Default::default() };

    let new_models: Vec<&str> = new_only
        .apply(&records, Some(&report))
        .iter()
        .map(|r| r.model.as_str())
        .collect();
    let updated_models: Vec<&str> = updated_only
        .apply(&records, Some(&report))
        .iter()
        .map(|r| r.model.as_str())
        .collect();

    assert_eq!(new_models, vec!["N1"]);
    assert_eq!(updated_models, vec!["A1"]);
}
