//! 点検記録 → ページレイアウトへの投影
//!
//! ヘッダ / タイトル / 顧客・車両情報 / チェックリスト表 / 合計 /
//! 所見 / 推奨 / 署名欄 / フッタ の順に一度だけ流し込む。

use super::pdf_core::{truncate_chars, Align, Canvas, Font, Next, PageDecoration, PageFlow};
use crate::layout::{
    PageGeometry, ITEM_NAME_MAX_CHARS, NOTES_MAX_CHARS, ROW_HEIGHT_MM, TABLE_COLUMNS,
};
use crate::types::{ChecklistItem, InspectionRecord, ShopProfile};
use chrono::NaiveDateTime;

pub const REPORT_TITLE: &str = "Pre-Purchase Vehicle Inspection Report";
pub const SUMMARY_PLACEHOLDER: &str = "No additional notes provided.";
pub const SIGNATURE_LINE: &str =
    "Inspector Signature: ______________________         Client Signature: ______________________";

/// 顧客・車両情報の左列幅（mm）
const META_LEFT_WIDTH_MM: f32 = 95.0;

/// ヘッダ・フッタの内容を構築
pub fn page_decoration(shop: &ShopProfile, generated_at: NaiveDateTime) -> PageDecoration {
    PageDecoration {
        logo: shop.logo_path.clone(),
        title: shop.name.clone(),
        subtitle: shop.contact_line(),
        footer_left: format!("Report generated: {}", generated_at.format("%Y-%m-%d %H:%M")),
        footer_right: format!("Thank you for choosing {}", shop.name),
    }
}

/// 表の1行分（Item / Status / Notes / Est Cost）
///
/// 項目名は60文字、備考は150文字で切り詰める。CSVでは使わない。
pub fn checklist_row(item: &ChecklistItem) -> [String; 4] {
    [
        truncate_chars(item.name(), ITEM_NAME_MAX_CHARS).to_string(),
        item.status.label().to_string(),
        truncate_chars(&item.notes, NOTES_MAX_CHARS).to_string(),
        format!("{:.2}", item.estimated_cost()),
    ]
}

/// 所見欄の本文（空欄なら定型文）
pub fn summary_text(record: &InspectionRecord) -> &str {
    let summary = record.summary_notes.trim();
    if summary.is_empty() {
        SUMMARY_PLACEHOLDER
    } else {
        summary
    }
}

/// 点検記録を描画先に流し込む
pub fn render_report<C: Canvas>(
    record: &InspectionRecord,
    shop: &ShopProfile,
    generated_at: NaiveDateTime,
    canvas: C,
) -> C {
    let mut flow = PageFlow::new(canvas, PageGeometry::a4(), page_decoration(shop, generated_at));
    flow.add_page();

    // タイトル
    flow.set_font(Font::bold(12.0));
    flow.cell(0.0, 8.0, REPORT_TITLE, false, Next::NewLine, Align::Center);
    flow.ln(4.0);

    // 顧客・車両情報
    flow.set_font(Font::regular(10.0));
    let date = generated_at.format("%Y-%m-%d").to_string();
    let rows: [(String, Option<String>); 4] = [
        (format!("Client: {}", record.client_name), Some(format!("Date: {}", date))),
        (
            format!("Phone: {}", record.client_phone),
            Some(format!("Inspector: {}", record.inspector)),
        ),
        (
            format!("Vehicle: {} ({})", record.vehicle_make_model, record.vehicle_year),
            None,
        ),
        (format!("VIN/Reg: {}", record.vehicle_vin), None),
    ];
    for (left, right) in &rows {
        match right {
            Some(right) => {
                flow.cell(META_LEFT_WIDTH_MM, 6.0, left, false, Next::Right, Align::Left);
                flow.cell(0.0, 6.0, right, false, Next::NewLine, Align::Left);
            }
            None => flow.cell(0.0, 6.0, left, false, Next::NewLine, Align::Left),
        }
    }
    flow.ln(4.0);

    // チェックリスト表
    flow.set_font(Font::bold(10.0));
    table_row(&mut flow, TABLE_COLUMNS.iter().map(|c| c.label));

    flow.set_font(Font::regular(9.0));
    for item in record.items() {
        let row = checklist_row(item);
        table_row(&mut flow, row.iter().map(String::as_str));
    }
    flow.ln(4.0);

    // 合計
    flow.set_font(Font::bold(10.0));
    let total = format!("Total Estimated Repair Cost: {:.2}", record.final_total());
    flow.cell(0.0, 6.0, &total, false, Next::NewLine, Align::Left);
    flow.ln(4.0);

    // 所見
    flow.cell(0.0, 6.0, "Summary / Notes:", false, Next::NewLine, Align::Left);
    flow.set_font(Font::regular(10.0));
    flow.multi_cell(0.0, 6.0, summary_text(record));
    flow.ln(4.0);

    // 推奨
    flow.set_font(Font::bold(10.0));
    flow.cell(0.0, 6.0, "Recommendation:", false, Next::NewLine, Align::Left);
    flow.set_font(Font::regular(10.0));
    flow.cell(0.0, 6.0, record.recommendation.label(), false, Next::NewLine, Align::Left);

    // 署名欄
    flow.ln(12.0);
    flow.cell(0.0, 6.0, SIGNATURE_LINE, false, Next::NewLine, Align::Left);

    flow.finish()
}

fn table_row<'a, C: Canvas>(flow: &mut PageFlow<C>, cells: impl Iterator<Item = &'a str>) {
    let last = TABLE_COLUMNS.len() - 1;
    for (i, (column, text)) in TABLE_COLUMNS.iter().zip(cells).enumerate() {
        let next = if i == last { Next::NewLine } else { Next::Right };
        flow.cell(column.width_mm, ROW_HEIGHT_MM, text, true, next, Align::Left);
    }
}
