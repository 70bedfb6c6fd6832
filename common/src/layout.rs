//! レイアウト設定モジュール
//!
//! mm基準のレイアウト定義。座標は左上原点・下向き正。
//! PDFバックエンド側で左下原点へ変換する。

// ============================================
// ページ寸法（mm）
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 左・上・右余白（mm）
pub const MARGIN_MM: f32 = 10.0;

/// 自動改ページの下端余白（mm）
pub const AUTO_BREAK_MARGIN_MM: f32 = 15.0;

/// フッタ開始位置（下端からの距離、mm）
pub const FOOTER_OFFSET_MM: f32 = 20.0;

/// セル内の左右パディング（mm）
pub const CELL_PADDING_MM: f32 = 1.0;

// ============================================
// ロゴ
// ============================================

pub const LOGO_X_MM: f32 = 10.0;
pub const LOGO_Y_MM: f32 = 8.0;
pub const LOGO_WIDTH_MM: f32 = 30.0;

// ============================================
// チェックリスト表
// ============================================

/// 表の列定義
#[derive(Debug, Clone, Copy)]
pub struct ColumnDefinition {
    pub label: &'static str,
    pub width_mm: f32,
    /// PDF上での最大文字数（None = 切り詰めなし）
    pub max_chars: Option<usize>,
}

pub const TABLE_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition {
        label: "Item",
        width_mm: 90.0,
        max_chars: Some(60),
    },
    ColumnDefinition {
        label: "Status",
        width_mm: 24.0,
        max_chars: None,
    },
    ColumnDefinition {
        label: "Notes",
        width_mm: 58.0,
        max_chars: Some(150),
    },
    ColumnDefinition {
        label: "Est Cost",
        width_mm: 18.0,
        max_chars: None,
    },
];

/// 行の高さ（mm）
pub const ROW_HEIGHT_MM: f32 = 6.0;

/// 項目名の最大文字数
pub const ITEM_NAME_MAX_CHARS: usize = 60;

/// 備考の最大文字数（PDFのみ）
pub const NOTES_MAX_CHARS: usize = 150;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// ページ設定
#[derive(Debug, Clone)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub auto_break_margin_mm: f32,
    pub footer_offset_mm: f32,
    pub cell_padding_mm: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// A4縦
    pub fn a4() -> Self {
        Self {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            margin_mm: MARGIN_MM,
            auto_break_margin_mm: AUTO_BREAK_MARGIN_MM,
            footer_offset_mm: FOOTER_OFFSET_MM,
            cell_padding_mm: CELL_PADDING_MM,
        }
    }

    /// 利用可能幅（mm）
    pub fn usable_width_mm(&self) -> f32 {
        self.width_mm - self.margin_mm * 2.0
    }

    /// これを超えると改ページするY座標（mm、上から）
    pub fn page_break_y_mm(&self) -> f32 {
        self.height_mm - self.auto_break_margin_mm
    }

    /// フッタ開始Y座標（mm、上から）
    pub fn footer_y_mm(&self) -> f32 {
        self.height_mm - self.footer_offset_mm
    }
}

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
