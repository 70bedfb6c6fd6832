//! PDF生成（printpdf バックエンド）
//!
//! レイアウトは ppi_common::export::report が決め、ここでは
//! 座標変換（左上原点 → 左下原点）と描画命令の発行だけを行う。

use crate::error::{PpiError, Result};
use crate::io::write_atomic;
use chrono::NaiveDateTime;
use ppi_common::export::pdf_core::{Canvas, Font, FontStyle};
use ppi_common::export::report::{render_report, REPORT_TITLE};
use ppi_common::layout::{mm_to_pt, A4_HEIGHT_MM, A4_WIDTH_MM};
use ppi_common::{InspectionRecord, ShopProfile};
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 枠線の太さ（mm）
const BORDER_WIDTH_MM: f32 = 0.2;

/// printpdf の文書に描画する Canvas
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    first_page: Option<(PdfPageIndex, PdfLayerIndex)>,
    layer: Option<PdfLayerReference>,
    page_height_mm: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    images: HashMap<PathBuf, Option<DynamicImage>>,
}

impl PdfCanvas {
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            Mm(A4_WIDTH_MM),
            Mm(A4_HEIGHT_MM),
            "Layer 1",
        );

        let font = |builtin: BuiltinFont| {
            doc.add_builtin_font(builtin).map_err(|e| {
                PpiError::PdfGeneration(format!("フォント追加エラー: {:?}", e))
            })
        };
        let regular = font(BuiltinFont::Helvetica)?;
        let bold = font(BuiltinFont::HelveticaBold)?;
        let italic = font(BuiltinFont::HelveticaOblique)?;

        Ok(Self {
            doc,
            first_page: Some((page1, layer1)),
            layer: None,
            page_height_mm: A4_HEIGHT_MM,
            regular,
            bold,
            italic,
            images: HashMap::new(),
        })
    }

    /// 文書をバイト列に書き出す
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| PpiError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))
    }

    fn font_ref(&self, font: Font) -> &IndirectFontRef {
        match font.style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }

    /// 上からのY座標（mm）をPDF座標に変換
    fn flip(&self, y_mm: f32) -> Mm {
        Mm(self.page_height_mm - y_mm)
    }
}

impl Canvas for PdfCanvas {
    fn add_page(&mut self, width_mm: f32, height_mm: f32) {
        let (page, layer) = match self.first_page.take() {
            Some(first) => first,
            None => self.doc.add_page(Mm(width_mm), Mm(height_mm), "Layer 1"),
        };
        let layer = self.doc.get_page(page).get_layer(layer);
        layer.set_outline_thickness(mm_to_pt(BORDER_WIDTH_MM));
        self.page_height_mm = height_mm;
        self.layer = Some(layer);
    }

    fn draw_text(&mut self, x_mm: f32, baseline_mm: f32, text: &str, font: Font) {
        let Some(layer) = &self.layer else { return };
        layer.use_text(text, font.size_pt, Mm(x_mm), self.flip(baseline_mm), self.font_ref(font));
    }

    fn draw_rect(&mut self, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) {
        let Some(layer) = &self.layer else { return };
        let top = self.flip(y_mm);
        let bottom = self.flip(y_mm + height_mm);
        let left = Mm(x_mm);
        let right = Mm(x_mm + width_mm);

        layer.add_line(Line {
            points: vec![
                (Point::new(left, top), false),
                (Point::new(right, top), false),
                (Point::new(right, bottom), false),
                (Point::new(left, bottom), false),
            ],
            is_closed: true,
        });
    }

    fn draw_image(&mut self, path: &Path, x_mm: f32, y_mm: f32, width_mm: f32) -> bool {
        let Some(layer) = self.layer.clone() else { return false };

        // ページごとに再デコードしない
        let cached = self.images.entry(path.to_path_buf()).or_insert_with(|| {
            match image_crate::open(path) {
                Ok(img) => Some(img),
                Err(e) => {
                    log::warn!("ロゴ読み込みエラー {}: {}", path.display(), e);
                    None
                }
            }
        });
        let Some(img) = cached else { return false };

        let (px_w, px_h) = img.dimensions();
        if px_w == 0 || px_h == 0 || width_mm <= 0.0 {
            return false;
        }

        // 指定幅になるDPIを逆算
        let dpi = px_w as f32 * 25.4 / width_mm;
        let height_mm = px_h as f32 * 25.4 / dpi;
        let translate_y = Mm(self.page_height_mm - y_mm - height_mm);

        Image::from_dynamic_image(img).add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(x_mm)),
                translate_y: Some(translate_y),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        true
    }
}

/// 点検記録をPDFバイト列に描画
pub fn render_pdf(
    record: &InspectionRecord,
    shop: &ShopProfile,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>> {
    let canvas = PdfCanvas::new(REPORT_TITLE)?;
    let canvas = render_report(record, shop, generated_at, canvas);
    canvas.into_bytes()
}

/// 点検記録をPDFファイルに保存
pub fn generate_pdf(
    record: &InspectionRecord,
    shop: &ShopProfile,
    generated_at: NaiveDateTime,
    output_path: &Path,
) -> Result<()> {
    let bytes = render_pdf(record, shop, generated_at)?;
    write_atomic(output_path, &bytes)
}
