//! 產品型錄PDF生成（printpdf 0.8）
//!
//! 配置は `catalog_common::layout::CatalogLayout` に従う。
//! 画像が読めない項目は枠と「無圖片」表示で代替し、出力は中断しない。

use crate::cli::PdfQuality;
use crate::error::{CatalogError, Result};
use catalog_common::layout::{
    mm_to_pt, pt_to_mm, CatalogLayout, ENTRY_TEXT_LINES, HEADER_MAIN_FONT_PT, HEADER_SUB_FONT_PT,
    PLACEHOLDER_FONT_PT,
};
use catalog_common::{Label, Lang, Record};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use indicatif::{ProgressBar, ProgressStyle};
use printpdf::{
    BuiltinFont, Color, FontId, Line, LinePoint, Mm, Op, ParsedFont, PdfDocument, PdfPage,
    PdfSaveOptions, Point, Pt, RawImage, Rgb, TextItem, XObjectId, XObjectTransform,
};
use std::path::{Path, PathBuf};

/// PDF出力オプション
#[derive(Debug, Clone, Default)]
pub struct PdfOptions {
    pub lang: Lang,
    pub quality: PdfQuality,
    /// 埋め込むTTF/OTFフォント（CJK表示用）。無ければHelvetica
    pub font_path: Option<PathBuf>,
    /// 相対画像パスの基準ディレクトリ
    pub base_dir: Option<PathBuf>,
    /// 進捗バーを表示
    pub show_progress: bool,
}

/// 使用フォント
enum Fonts {
    Builtin,
    Embedded(FontId),
}

/// PDF用に変換済みの画像
struct PreparedImage {
    id: XObjectId,
    width_px: u32,
    height_px: u32,
}

pub fn generate_pdf(records: &[&Record], output_path: &Path, options: &PdfOptions) -> Result<()> {
    let bytes = render_pdf(records, options)?;
    std::fs::write(output_path, bytes)?;
    Ok(())
}

/// PDFをバイト列で生成
pub fn render_pdf(records: &[&Record], options: &PdfOptions) -> Result<Vec<u8>> {
    let layout = CatalogLayout::a4();
    let lang = options.lang;
    let mut doc = PdfDocument::new(lang.text(Label::PdfHeaderMain));
    let fonts = load_fonts(&mut doc, options.font_path.as_deref());

    let progress = if options.show_progress {
        let pb = ProgressBar::new(records.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut pages = Vec::new();
    for slots in layout.paginate(records.len()) {
        let mut ops = Vec::new();
        draw_header(&mut ops, &layout, &fonts, lang);

        for slot in slots {
            let record = records[slot.index];
            progress.set_message(record.model.clone());

            match prepare_image(&mut doc, record, options) {
                Some(image) => draw_image(&mut ops, &layout, slot.top_mm, &image),
                None => draw_placeholder(&mut ops, &layout, slot.top_mm, &fonts, lang),
            }
            draw_entry_text(&mut ops, &layout, slot.top_mm, &fonts, lang, record);
            progress.inc(1);
        }

        pages.push(PdfPage::new(
            Mm(layout.page_width_mm),
            Mm(layout.page_height_mm),
            ops,
        ));
    }
    progress.finish_and_clear();

    let mut warnings = Vec::new();
    let bytes = doc
        .with_pages(pages)
        .save(&PdfSaveOptions::default(), &mut warnings);

    if bytes.is_empty() {
        return Err(CatalogError::PdfGeneration("PDFが空です".into()));
    }
    log::debug!("PDF生成: {}件, {} bytes, 警告{}件", records.len(), bytes.len(), warnings.len());
    Ok(bytes)
}

fn load_fonts(doc: &mut PdfDocument, font_path: Option<&Path>) -> Fonts {
    let Some(path) = font_path else {
        return Fonts::Builtin;
    };

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("フォントを読み込めません（Helveticaで代替）: {}: {}", path.display(), e);
            return Fonts::Builtin;
        }
    };

    let mut warnings = Vec::new();
    match ParsedFont::from_bytes(&bytes, 0, &mut warnings) {
        Some(font) => Fonts::Embedded(doc.add_font(&font)),
        None => {
            log::warn!("フォント解析エラー（Helveticaで代替）: {}", path.display());
            Fonts::Builtin
        }
    }
}

/// 画像パスを解決
fn resolve_image_path(image_path: &str, base_dir: Option<&Path>) -> Option<PathBuf> {
    let trimmed = image_path.trim();
    if trimmed.is_empty() {
        return None;
    }

    let path = Path::new(trimmed);
    if path.is_relative() {
        if let Some(base) = base_dir {
            let joined = base.join(path);
            if joined.exists() {
                return Some(joined);
            }
        }
    }
    path.exists().then(|| path.to_path_buf())
}

/// 画像を読み込み・縮小してPDFに登録（失敗時は None）
fn prepare_image(doc: &mut PdfDocument, record: &Record, options: &PdfOptions) -> Option<PreparedImage> {
    let path = resolve_image_path(&record.image_path, options.base_dir.as_deref())?;

    match encode_image(&path, options.quality) {
        Ok((jpeg, width_px, height_px)) => {
            let mut warnings = Vec::new();
            match RawImage::decode_from_bytes(&jpeg, &mut warnings) {
                Ok(raw) => Some(PreparedImage {
                    id: doc.add_image(&raw),
                    width_px,
                    height_px,
                }),
                Err(e) => {
                    log::warn!("画像埋め込みエラー {}: {}", path.display(), e);
                    None
                }
            }
        }
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

/// 画像をデコードし、品質設定に合わせて縮小・JPEG化
fn encode_image(path: &Path, quality: PdfQuality) -> Result<(Vec<u8>, u32, u32)> {
    let mut img = image::ImageReader::open(path)
        .map_err(|e| image_error(path, e))?
        .with_guessed_format()
        .map_err(|e| image_error(path, e))?
        .decode()
        .map_err(|e| image_error(path, e))?;

    if img.width() > quality.max_width() {
        img = img.resize(quality.max_width(), u32::MAX, FilterType::Triangle);
    }

    let rgb = img.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality.jpeg_quality())
        .encode_image(&rgb)
        .map_err(|e| image_error(path, e))?;

    Ok((jpeg, rgb.width(), rgb.height()))
}

fn image_error(path: &Path, e: impl std::fmt::Display) -> CatalogError {
    CatalogError::ImageLoad(format!("{}: {}", path.display(), e))
}

fn draw_header(ops: &mut Vec<Op>, layout: &CatalogLayout, fonts: &Fonts, lang: Lang) {
    let x = layout.margin_mm;
    draw_text(ops, fonts, true, HEADER_MAIN_FONT_PT, x, layout.header_main_y_mm(), lang.text(Label::PdfHeaderMain));
    draw_text(ops, fonts, false, HEADER_SUB_FONT_PT, x, layout.header_sub_y_mm(), lang.text(Label::PdfHeaderSub));

    let y = layout.header_rule_y_mm();
    ops.push(Op::SetOutlineThickness { pt: Pt(0.5) });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                line_point(x, y),
                line_point(layout.page_width_mm - layout.margin_mm, y),
            ],
            is_closed: false,
        },
    });
}

fn draw_image(ops: &mut Vec<Op>, layout: &CatalogLayout, top_mm: f32, image: &PreparedImage) {
    let Some((w_mm, h_mm)) = layout.fit_image(image.width_px, image.height_px) else {
        return;
    };

    // dpi=72 で 1px = 1pt
    ops.push(Op::UseXobject {
        id: image.id.clone(),
        transform: XObjectTransform {
            translate_x: Some(Pt(mm_to_pt(layout.margin_mm))),
            translate_y: Some(Pt(mm_to_pt(top_mm - h_mm))),
            scale_x: Some(mm_to_pt(w_mm) / image.width_px as f32),
            scale_y: Some(mm_to_pt(h_mm) / image.height_px as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    });
}

fn draw_placeholder(ops: &mut Vec<Op>, layout: &CatalogLayout, top_mm: f32, fonts: &Fonts, lang: Lang) {
    let left = layout.margin_mm;
    let right = left + layout.image_max_width_mm;
    let bottom = top_mm - layout.image_max_height_mm;

    ops.push(Op::SetOutlineThickness { pt: Pt(0.5) });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                line_point(left, bottom),
                line_point(right, bottom),
                line_point(right, top_mm),
                line_point(left, top_mm),
            ],
            is_closed: true,
        },
    });

    let label = lang.text(Label::PdfNoImage);
    let text_w = pt_to_mm(estimate_text_width_pt(label, PLACEHOLDER_FONT_PT));
    let x = left + (layout.image_max_width_mm - text_w) / 2.0;
    let y = bottom + layout.image_max_height_mm / 2.0;
    draw_text(ops, fonts, false, PLACEHOLDER_FONT_PT, x, y, label);
}

fn draw_entry_text(
    ops: &mut Vec<Op>,
    layout: &CatalogLayout,
    top_mm: f32,
    fonts: &Fonts,
    lang: Lang,
    record: &Record,
) {
    let lines = [
        lang.field_line(Label::Model, &record.model),
        lang.field_line(Label::Spec, &record.spec),
        lang.field_line(Label::Material, &record.material),
        lang.field_line(Label::Category, &record.category),
    ];

    let x = layout.text_x_mm();
    for (text, style) in lines.iter().zip(ENTRY_TEXT_LINES.iter()) {
        let y = top_mm - pt_to_mm(style.offset_pt);
        if style.muted {
            ops.push(Op::SetFillColor { col: gray(0.4) });
        }
        draw_text(ops, fonts, style.bold, style.font_size_pt, x, y, text);
        if style.muted {
            ops.push(Op::SetFillColor { col: gray(0.0) });
        }
    }
}

fn draw_text(ops: &mut Vec<Op>, fonts: &Fonts, bold: bool, size_pt: f32, x_mm: f32, y_mm: f32, text: &str) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor { pos: Point::new(Mm(x_mm), Mm(y_mm)) });
    match fonts {
        Fonts::Builtin => {
            let font = if bold { BuiltinFont::HelveticaBold } else { BuiltinFont::Helvetica };
            ops.push(Op::SetFontSizeBuiltinFont { size: Pt(size_pt), font });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(text.to_string())],
                font,
            });
        }
        Fonts::Embedded(font) => {
            ops.push(Op::SetFontSize { size: Pt(size_pt), font: font.clone() });
            ops.push(Op::WriteText {
                items: vec![TextItem::Text(text.to_string())],
                font: font.clone(),
            });
        }
    }
    ops.push(Op::EndTextSection);
}

fn line_point(x_mm: f32, y_mm: f32) -> LinePoint {
    LinePoint { p: Point::new(Mm(x_mm), Mm(y_mm)), bezier: false }
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

/// 文字幅の概算（ASCIIは半角、それ以外は全角）
fn estimate_text_width_pt(text: &str, size_pt: f32) -> f32 {
    text.chars()
        .map(|c| if c.is_ascii() { size_pt * 0.5 } else { size_pt })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_text_width() {
        assert!((estimate_text_width_pt("No Image", 8.0) - 32.0).abs() < 0.01);
        assert!((estimate_text_width_pt("無圖片", 8.0) - 24.0).abs() < 0.01);
    }

    #[test]
    fn test_resolve_image_path_empty_or_missing() {
        assert!(resolve_image_path("", None).is_none());
        assert!(resolve_image_path("   ", None).is_none());
        assert!(resolve_image_path("/nonexistent/image.jpg", None).is_none());
    }

    #[test]
    fn test_resolve_image_path_relative_to_base() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("img")).expect("ディレクトリ作成失敗");
        std::fs::write(dir.path().join("img").join("a.png"), b"dummy").expect("書き込み失敗");

        let resolved = resolve_image_path("img/a.png", Some(dir.path())).expect("解決できない");
        assert_eq!(resolved, dir.path().join("img").join("a.png"));
    }

    #[test]
    fn test_encode_image_rejects_non_image() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not an image").expect("書き込み失敗");

        let result = encode_image(&path, PdfQuality::Low);
        assert!(matches!(result, Err(CatalogError::ImageLoad(_))));
    }

    #[test]
    fn test_encode_image_downscales() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("wide.png");
        image::RgbImage::from_pixel(1000, 500, image::Rgb([200, 10, 10]))
            .save(&path)
            .expect("画像保存失敗");

        let (jpeg, w, h) = encode_image(&path, PdfQuality::Low).expect("変換失敗");
        assert!(!jpeg.is_empty());
        assert_eq!(w, 500);
        assert_eq!(h, 250);
    }
}
