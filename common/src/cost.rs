//! 修理見積の合計計算
//!
//! 手動合計が正ならそれを優先し、そうでなければ項目見積の合計を使う。
//! 両者を混ぜることはない。

use crate::types::ChecklistItem;

/// 見積額を持つ型（点検項目・生の数値のどちらでも合計できるように）
pub trait Costed {
    fn estimated_cost(&self) -> f64;
}

impl Costed for ChecklistItem {
    fn estimated_cost(&self) -> f64 {
        ChecklistItem::estimated_cost(self)
    }
}

impl Costed for f64 {
    fn estimated_cost(&self) -> f64 {
        *self
    }
}

/// 最終合計を計算
pub fn compute_total<T: Costed>(items: &[T], manual_override: f64) -> f64 {
    if manual_override > 0.0 {
        return manual_override;
    }
    items.iter().map(Costed::estimated_cost).sum()
}

/// フォーム入力の金額を数値に変換
///
/// 空欄・数値以外・負値・非有限値はすべて0。エラーにはしない。
pub fn parse_cost(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
