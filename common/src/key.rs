//! 型號キーの正規化

/// 比較用キー: 前後空白を除去して小文字化
///
/// 表示・保存される型號は元の表記のまま。同一製品判定にのみ使う。
pub fn normalize(model: &str) -> String {
    model.trim().to_lowercase()
}
