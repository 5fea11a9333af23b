//! レイアウト設定モジュール
//!
//! 產品型錄PDFのmm基準レイアウト（Source of Truth）。
//! 座標はPDFと同じく左下原点、Yは上向き。

// ============================================
// mm基準レイアウト
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 余白（mm）
pub const MARGIN_MM: f32 = 15.0;

/// ヘッダー位置（上余白線からのオフセット、mm）
pub const HEADER_MAIN_OFFSET_MM: f32 = 2.0;
pub const HEADER_SUB_OFFSET_MM: f32 = -3.0;
pub const HEADER_RULE_OFFSET_MM: f32 = -5.0;
/// 最初の項目の上端（上余白線から下へ、mm）
pub const CONTENT_TOP_OFFSET_MM: f32 = 12.0;

/// 画像枠（mm）
pub const IMAGE_MAX_WIDTH_MM: f32 = 70.0;
pub const IMAGE_MAX_HEIGHT_MM: f32 = 45.0;
/// 画像枠とテキスト列の間隔（mm）
pub const TEXT_GAP_MM: f32 = 10.0;
/// テキストブロックの最低高さ（mm）
pub const TEXT_BLOCK_HEIGHT_MM: f32 = 42.0;
/// 項目間の間隔（mm）
pub const LINE_GAP_MM: f32 = 6.0;
/// 改ページ判定で画像下に確保する高さ（mm）
pub const BOTTOM_RESERVE_MM: f32 = 25.0;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

// ============================================
// テキスト行
// ============================================

/// 項目テキストの1行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLineStyle {
    /// 項目上端からの下方向オフセット（pt）
    pub offset_pt: f32,
    pub font_size_pt: f32,
    pub bold: bool,
    /// グレー表示
    pub muted: bool,
}

/// 型號・規格・材質・類別の順
pub const ENTRY_TEXT_LINES: [TextLineStyle; 4] = [
    TextLineStyle { offset_pt: 0.0, font_size_pt: 12.0, bold: true, muted: false },
    TextLineStyle { offset_pt: 12.0, font_size_pt: 11.0, bold: false, muted: false },
    TextLineStyle { offset_pt: 24.0, font_size_pt: 11.0, bold: false, muted: false },
    TextLineStyle { offset_pt: 36.0, font_size_pt: 9.0, bold: false, muted: true },
];

pub const HEADER_MAIN_FONT_PT: f32 = 14.0;
pub const HEADER_SUB_FONT_PT: f32 = 9.0;
pub const PLACEHOLDER_FONT_PT: f32 = 8.0;

// ============================================
// レイアウト設定構造体
// ============================================

/// 型錄PDFレイアウト
#[derive(Debug, Clone)]
pub struct CatalogLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub image_max_width_mm: f32,
    pub image_max_height_mm: f32,
}

/// 項目の配置先
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntrySlot {
    /// 入力リスト内の位置
    pub index: usize,
    /// 項目上端のY座標（mm）
    pub top_mm: f32,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl CatalogLayout {
    pub fn a4() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: MARGIN_MM,
            image_max_width_mm: IMAGE_MAX_WIDTH_MM,
            image_max_height_mm: IMAGE_MAX_HEIGHT_MM,
        }
    }

    /// 上余白線のY座標（mm）
    fn top_line_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }

    pub fn header_main_y_mm(&self) -> f32 {
        self.top_line_mm() + HEADER_MAIN_OFFSET_MM
    }

    pub fn header_sub_y_mm(&self) -> f32 {
        self.top_line_mm() + HEADER_SUB_OFFSET_MM
    }

    pub fn header_rule_y_mm(&self) -> f32 {
        self.top_line_mm() + HEADER_RULE_OFFSET_MM
    }

    /// ページ最初の項目の上端
    pub fn first_entry_top_mm(&self) -> f32 {
        self.top_line_mm() - CONTENT_TOP_OFFSET_MM
    }

    /// 項目ピッチ
    pub fn entry_pitch_mm(&self) -> f32 {
        self.image_max_height_mm.max(TEXT_BLOCK_HEIGHT_MM) + LINE_GAP_MM
    }

    /// これより下に上端が来る項目は次ページへ
    pub fn min_entry_top_mm(&self) -> f32 {
        self.margin_mm + self.image_max_height_mm + BOTTOM_RESERVE_MM
    }

    /// テキスト列のX座標
    pub fn text_x_mm(&self) -> f32 {
        self.margin_mm + self.image_max_width_mm + TEXT_GAP_MM
    }

    /// 1ページあたりの項目数
    pub fn entries_per_page(&self) -> usize {
        let mut count = 0;
        let mut y = self.first_entry_top_mm();
        while y >= self.min_entry_top_mm() {
            count += 1;
            y -= self.entry_pitch_mm();
        }
        count.max(1)
    }

    /// 項目をページに割り付け（空リストなら見出しのみの1ページ）
    pub fn paginate(&self, count: usize) -> Vec<Vec<EntrySlot>> {
        let mut pages: Vec<Vec<EntrySlot>> = vec![Vec::new()];
        let mut y = self.first_entry_top_mm();

        for index in 0..count {
            let page_has_room = y >= self.min_entry_top_mm();
            let page_is_empty = pages.last().map_or(true, |p| p.is_empty());
            if !page_has_room && !page_is_empty {
                pages.push(Vec::new());
                y = self.first_entry_top_mm();
            }
            if let Some(page) = pages.last_mut() {
                page.push(EntrySlot { index, top_mm: y });
            }
            y -= self.entry_pitch_mm();
        }

        pages
    }

    /// 画像を枠内に収める表示サイズ（mm、縦横比維持）
    pub fn fit_image(&self, width_px: u32, height_px: u32) -> Option<(f32, f32)> {
        if width_px == 0 || height_px == 0 {
            return None;
        }
        let (w, h) = (width_px as f32, height_px as f32);
        let scale = (self.image_max_width_mm / w).min(self.image_max_height_mm / h);
        Some((w * scale, h * scale))
    }
}

// ============================================
// ヘルパー関数
// ============================================

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// pt → mm 変換
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let layout = CatalogLayout::a4();
        assert!((layout.first_entry_top_mm() - 270.0).abs() < 0.01);
        assert!((layout.entry_pitch_mm() - 51.0).abs() < 0.01);
        assert!((layout.min_entry_top_mm() - 85.0).abs() < 0.01);
        assert!((layout.text_x_mm() - 95.0).abs() < 0.01);
        assert!((layout.header_rule_y_mm() - 277.0).abs() < 0.01);
    }

    #[test]
    fn test_conversion() {
        assert!((MM_TO_PT - 2.835).abs() < 0.01);
        assert!((mm_to_pt(10.0) - 28.35).abs() < 0.1);
        assert!((pt_to_mm(mm_to_pt(42.0)) - 42.0).abs() < 0.001);
    }

    #[test]
    fn test_entries_per_page() {
        assert_eq!(CatalogLayout::a4().entries_per_page(), 4);
    }

    #[test]
    fn test_paginate() {
        let layout = CatalogLayout::a4();
        let pages = layout.paginate(9);
        let sizes: Vec<usize> = pages.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![4, 4, 1]);
        assert_eq!(pages[1][0].index, 4);
        assert!((pages[1][0].top_mm - layout.first_entry_top_mm()).abs() < 0.01);
        assert!(pages[0][0].top_mm > pages[0][1].top_mm);
    }

    #[test]
    fn test_paginate_empty() {
        let pages = CatalogLayout::a4().paginate(0);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_fit_image_keeps_ratio() {
        let layout = CatalogLayout::a4();
        let (w, h) = layout.fit_image(1400, 700).expect("サイズ計算失敗");
        assert!((w - 70.0).abs() < 0.01);
        assert!((h - 35.0).abs() < 0.01);

        let (w, h) = layout.fit_image(300, 600).expect("サイズ計算失敗");
        assert!((h - 45.0).abs() < 0.01);
        assert!((w - 22.5).abs() < 0.01);

        assert!(layout.fit_image(0, 10).is_none());
    }
}
