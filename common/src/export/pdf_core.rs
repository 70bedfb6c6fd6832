//! PDF export core utilities shared by the CLI backend and tests.
//!
//! 描画ライブラリには「位置を指定して文字・枠・画像を描く」ことだけを要求し、
//! カーソル移動・セル配置・自動改ページ・ヘッダ/フッタの再描画はここで行う。

use crate::layout::{pt_to_mm, PageGeometry, LOGO_WIDTH_MM, LOGO_X_MM, LOGO_Y_MM};
use std::path::{Path, PathBuf};

/// フォントの太さ・傾き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// フォント指定（Helvetica系の組み込みフォントのみ）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub style: FontStyle,
    pub size_pt: f32,
}

impl Font {
    pub const fn regular(size_pt: f32) -> Self {
        Self {
            style: FontStyle::Regular,
            size_pt,
        }
    }

    pub const fn bold(size_pt: f32) -> Self {
        Self {
            style: FontStyle::Bold,
            size_pt,
        }
    }

    pub const fn italic(size_pt: f32) -> Self {
        Self {
            style: FontStyle::Italic,
            size_pt,
        }
    }
}

/// セル内の文字揃え
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// セル描画後のカーソル位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// 同じ行の右隣へ
    Right,
    /// 次の行の左余白へ
    NewLine,
}

/// 描画先（PDFライブラリ側で実装する）
///
/// 座標はすべてmm・左上原点。
pub trait Canvas {
    fn add_page(&mut self, width_mm: f32, height_mm: f32);

    /// `baseline_mm` は文字のベースライン位置
    fn draw_text(&mut self, x_mm: f32, baseline_mm: f32, text: &str, font: Font);

    fn draw_rect(&mut self, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32);

    /// 画像を幅指定で描画。読めなかった場合は false を返し、何も描かない
    fn draw_image(&mut self, path: &Path, x_mm: f32, y_mm: f32, width_mm: f32) -> bool;
}

/// 全ページ共通のヘッダ・フッタ内容
#[derive(Debug, Clone, Default)]
pub struct PageDecoration {
    pub logo: Option<PathBuf>,
    pub title: String,
    pub subtitle: String,
    pub footer_left: String,
    pub footer_right: String,
}

/// Helvetica の文字幅（1/1000 em、ASCII 32..=126）
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// 太字は通常幅からの近似
const BOLD_WIDTH_FACTOR: f32 = 1.05;

/// 文字列の描画幅（mm）
pub fn text_width(text: &str, font: Font) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[(code - 32) as usize] as u32
            } else {
                556
            }
        })
        .sum();
    let factor = if font.style == FontStyle::Bold { BOLD_WIDTH_FACTOR } else { 1.0 };
    pt_to_mm(units as f32 / 1000.0 * font.size_pt) * factor
}

/// 文字数で切り詰める（バイト境界ではなく文字単位）
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// 指定幅に収まるよう単語単位で折り返す
///
/// 改行文字は段落区切りとして維持する。1語で幅を超える場合は文字単位で分割。
pub fn wrap_text(text: &str, max_width_mm: f32, font: Font) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();

        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, font) <= max_width_mm {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // 長すぎる単語を分割
            for c in word.chars() {
                current.push(c);
                if text_width(&current, font) > max_width_mm && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// カーソル付きのページ流し込み
///
/// セルを上から順に配置し、下端余白を超える前に改ページする。
/// 改ページ時は前ページのフッタと新ページのヘッダを描く。
pub struct PageFlow<C: Canvas> {
    canvas: C,
    page: PageGeometry,
    decoration: PageDecoration,
    x: f32,
    y: f32,
    font: Font,
    page_count: usize,
    in_decoration: bool,
}

impl<C: Canvas> PageFlow<C> {
    pub fn new(canvas: C, page: PageGeometry, decoration: PageDecoration) -> Self {
        let margin = page.margin_mm;
        Self {
            canvas,
            page,
            decoration,
            x: margin,
            y: margin,
            font: Font::regular(10.0),
            page_count: 0,
            in_decoration: false,
        }
    }

    /// 現在のY座標（mm、上から）
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Y座標を設定（負値は下端から）。Xは左余白に戻る
    pub fn set_y(&mut self, y: f32) {
        self.x = self.page.margin_mm;
        self.y = if y >= 0.0 { y } else { self.page.height_mm + y };
    }

    /// 改行（Xを左余白へ、Yを `h` 進める）
    pub fn ln(&mut self, h: f32) {
        self.x = self.page.margin_mm;
        self.y += h;
    }

    pub fn add_page(&mut self) {
        if self.page_count > 0 {
            self.draw_footer();
        }
        self.canvas.add_page(self.page.width_mm, self.page.height_mm);
        self.page_count += 1;
        self.x = self.page.margin_mm;
        self.y = self.page.margin_mm;
        self.draw_header();
    }

    /// 1セルを描画
    ///
    /// `w` が0なら右余白まで広げる。
    pub fn cell(&mut self, w: f32, h: f32, text: &str, border: bool, next: Next, align: Align) {
        if self.page_count == 0 {
            self.add_page();
        }
        if !self.in_decoration && self.y + h > self.page.page_break_y_mm() {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let w = if w == 0.0 {
            self.page.width_mm - self.page.margin_mm - self.x
        } else {
            w
        };

        if border {
            self.canvas.draw_rect(self.x, self.y, w, h);
        }

        if !text.is_empty() {
            let padding = self.page.cell_padding_mm;
            let tx = match align {
                Align::Left => self.x + padding,
                Align::Right => self.x + w - padding - text_width(text, self.font),
                Align::Center => self.x + (w - text_width(text, self.font)) / 2.0,
            };
            let baseline = self.y + 0.5 * h + 0.3 * pt_to_mm(self.font.size_pt);
            self.canvas.draw_text(tx, baseline, text, self.font);
        }

        match next {
            Next::Right => self.x += w,
            Next::NewLine => self.ln(h),
        }
    }

    /// 折り返しテキスト（左揃え、枠なし）
    pub fn multi_cell(&mut self, w: f32, h: f32, text: &str) {
        let w = if w == 0.0 {
            self.page.width_mm - self.page.margin_mm - self.x
        } else {
            w
        };
        let max_width = w - self.page.cell_padding_mm * 2.0;
        for line in wrap_text(text, max_width, self.font) {
            self.cell(w, h, &line, false, Next::NewLine, Align::Left);
        }
    }

    /// 最終ページのフッタを描いて描画先を返す
    pub fn finish(mut self) -> C {
        if self.page_count == 0 {
            self.add_page();
        }
        self.draw_footer();
        self.canvas
    }

    fn draw_header(&mut self) {
        let saved = self.font;
        self.in_decoration = true;

        if let Some(logo) = self.decoration.logo.clone() {
            if !logo.exists() {
                log::debug!("logo not found, skipped: {}", logo.display());
            } else if !self.canvas.draw_image(&logo, LOGO_X_MM, LOGO_Y_MM, LOGO_WIDTH_MM) {
                log::warn!("logo could not be decoded, skipped: {}", logo.display());
            }
        }

        let title = self.decoration.title.clone();
        let subtitle = self.decoration.subtitle.clone();
        self.set_font(Font::bold(14.0));
        self.cell(0.0, 6.0, &title, false, Next::NewLine, Align::Right);
        self.set_font(Font::regular(9.0));
        self.cell(0.0, 5.0, &subtitle, false, Next::NewLine, Align::Right);
        self.ln(4.0);

        self.font = saved;
        self.in_decoration = false;
    }

    fn draw_footer(&mut self) {
        let saved = self.font;
        self.in_decoration = true;

        let left = self.decoration.footer_left.clone();
        let right = self.decoration.footer_right.clone();
        self.set_y(-self.page.footer_offset_mm);
        self.set_font(Font::italic(8.0));
        self.cell(0.0, 5.0, &left, false, Next::NewLine, Align::Left);
        self.cell(0.0, 5.0, &right, false, Next::NewLine, Align::Right);

        self.font = saved;
        self.in_decoration = false;
    }
}
