//! 点検データの型定義
//!
//! フロントエンド（対話CLI / JSON一括）で共有される型:
//! - ChecklistItem: 点検1行
//! - InspectionRecord: 1セッション分の点検記録
//! - InspectionForm: 入力フォーム（JSON）。数値欄も文字列のまま受け取る
//! - ShopProfile: 帳票ヘッダ・フッタに出す店舗情報

use crate::catalog::{ItemStatus, Recommendation, CHECK_ITEMS};
use crate::cost::{compute_total, parse_cost};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// 点検1行
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistItem {
    name: &'static str,
    pub status: ItemStatus,
    pub notes: String,
    estimated_cost: f64,
}

impl ChecklistItem {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            status: ItemStatus::Pass,
            notes: String::new(),
            estimated_cost: 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost
    }

    /// 見積額を設定（負値・非有限値は0）
    pub fn set_estimated_cost(&mut self, cost: f64) {
        self.estimated_cost = non_negative(cost);
    }

    /// フォーム入力の文字列から見積額を設定
    pub fn set_estimated_cost_text(&mut self, text: &str) {
        self.estimated_cost = parse_cost(text);
    }
}

/// 1セッション分の点検記録
///
/// `items` はカタログと同じ長さ・順序で生成され、以後増減しない。
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionRecord {
    pub client_name: String,
    pub client_phone: String,
    pub inspector: String,
    pub vehicle_make_model: String,
    pub vehicle_year: String,
    pub vehicle_vin: String,
    items: Vec<ChecklistItem>,
    pub summary_notes: String,
    pub recommendation: Recommendation,
    manual_total_override: f64,
}

impl Default for InspectionRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectionRecord {
    /// カタログから空の記録を作成
    pub fn new() -> Self {
        Self {
            client_name: String::new(),
            client_phone: String::new(),
            inspector: String::new(),
            vehicle_make_model: String::new(),
            vehicle_year: String::new(),
            vehicle_vin: String::new(),
            items: CHECK_ITEMS.iter().map(|name| ChecklistItem::new(*name)).collect(),
            summary_notes: String::new(),
            recommendation: Recommendation::default(),
            manual_total_override: 0.0,
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// 項目の編集用スライス（長さは変更できない）
    pub fn items_mut(&mut self) -> &mut [ChecklistItem] {
        &mut self.items
    }

    /// 名前で項目を検索
    pub fn item_mut(&mut self, name: &str) -> Option<&mut ChecklistItem> {
        let name = name.trim();
        self.items
            .iter_mut()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    pub fn manual_total_override(&self) -> f64 {
        self.manual_total_override
    }

    /// 手動合計を設定（0は未設定扱い）
    pub fn set_manual_total_override(&mut self, total: f64) {
        self.manual_total_override = non_negative(total);
    }

    /// 項目見積の合計
    pub fn calculated_total(&self) -> f64 {
        self.items.iter().map(|item| item.estimated_cost).sum()
    }

    /// 帳票に載せる最終合計
    pub fn final_total(&self) -> f64 {
        compute_total(&self.items, self.manual_total_override)
    }

    /// フォームを初期状態に戻す
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// JSONフォームから記録を構築
    ///
    /// 項目はカタログ名で照合する。カタログにない名前は無視し、
    /// フォームにない項目は初期値のまま残す。
    pub fn from_form(form: &InspectionForm) -> Self {
        let mut record = Self::new();
        record.client_name = form.client_name.clone();
        record.client_phone = form.client_phone.clone();
        record.inspector = form.inspector.clone();
        record.vehicle_make_model = form.vehicle_make_model.clone();
        record.vehicle_year = form.vehicle_year.clone();
        record.vehicle_vin = form.vehicle_vin.clone();
        record.summary_notes = form.summary_notes.trim().to_string();

        for entry in &form.items {
            let Some(item) = record.item_mut(&entry.name) else {
                log::warn!("unknown checklist item ignored: {:?}", entry.name);
                continue;
            };
            item.status = ItemStatus::from_label(&entry.status).unwrap_or_else(|| {
                if !entry.status.trim().is_empty() {
                    log::warn!(
                        "unknown status {:?} for {:?}, using Pass",
                        entry.status,
                        entry.name
                    );
                }
                ItemStatus::default()
            });
            item.notes = entry.notes.clone();
            item.set_estimated_cost_text(&entry.estimated_cost);
        }

        record.recommendation = Recommendation::from_label(&form.recommendation).unwrap_or_else(|| {
            if !form.recommendation.trim().is_empty() {
                log::warn!("unknown recommendation {:?}, using default", form.recommendation);
            }
            Recommendation::default()
        });
        record.manual_total_override = parse_cost(&form.manual_total);
        record
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 入力フォーム（JSON）
///
/// 見積額・手動合計は数値でも文字列でも受け付ける。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionForm {
    pub client_name: String,
    pub client_phone: String,
    pub inspector: String,
    pub vehicle_make_model: String,
    pub vehicle_year: String,
    pub vehicle_vin: String,
    pub items: Vec<FormItem>,
    pub summary_notes: String,
    pub recommendation: String,
    #[serde(deserialize_with = "lenient_text")]
    pub manual_total: String,
}

/// フォームの点検1行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormItem {
    pub name: String,
    pub status: String,
    pub notes: String,
    #[serde(deserialize_with = "lenient_text")]
    pub estimated_cost: String,
}

impl InspectionForm {
    /// 記録からフォームを作成（テンプレート出力用）
    pub fn from_record(record: &InspectionRecord) -> Self {
        Self {
            client_name: record.client_name.clone(),
            client_phone: record.client_phone.clone(),
            inspector: record.inspector.clone(),
            vehicle_make_model: record.vehicle_make_model.clone(),
            vehicle_year: record.vehicle_year.clone(),
            vehicle_vin: record.vehicle_vin.clone(),
            items: record
                .items()
                .iter()
                .map(|item| FormItem {
                    name: item.name().to_string(),
                    status: item.status.label().to_string(),
                    notes: item.notes.clone(),
                    estimated_cost: item.estimated_cost().to_string(),
                })
                .collect(),
            summary_notes: record.summary_notes.clone(),
            recommendation: record.recommendation.label().to_string(),
            manual_total: record.manual_total_override().to_string(),
        }
    }
}

/// 文字列・数値・nullをすべて文字列として受け取る
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// 帳票ヘッダ・フッタ用の店舗情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// ロゴ画像（存在しなければ描画しない）
    pub logo_path: Option<PathBuf>,
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            name: "AUTO MAZEN".into(),
            address: "Dawhat Aramoun/Main Street".into(),
            phone: "03 419 833".into(),
            logo_path: Some(PathBuf::from("logo.jpeg")),
        }
    }
}

impl ShopProfile {
    /// ヘッダ2行目: 住所（電話番号があれば " | " で連結）
    pub fn contact_line(&self) -> String {
        if self.phone.is_empty() {
            self.address.clone()
        } else {
            format!("{} | {}", self.address, self.phone)
        }
    }
}
