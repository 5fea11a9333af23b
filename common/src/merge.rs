//! Upsert マージ
//!
//! 主檔をキー→レコードのマップに展開し、更新檔を入力順に上書き・追加する。
//! 出力は (類別, 型號) の辞書順。

use crate::record::Record;
use std::collections::HashMap;

/// 主檔に更新檔をマージ
///
/// - 主檔内の重複キーは後の行が残る
/// - 一致キーは更新檔の行で全欄位を上書き
/// - 新キーは追加
pub fn merge(master: &[Record], incoming: &[Record]) -> Vec<Record> {
    let mut by_key: HashMap<String, Record> = HashMap::with_capacity(master.len() + incoming.len());

    for record in master.iter().chain(incoming) {
        by_key.insert(record.key(), record.clone());
    }

    let mut merged: Vec<Record> = by_key.into_values().collect();
    sort_records(&mut merged);
    merged
}

/// (類別, 型號) で安定ソート
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.model.cmp(&b.model))
    });
}
