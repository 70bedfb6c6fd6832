//! 対話式点検フォーム
//!
//! 入力 → 確認 → 出力 → （修正 / クリアして新規 / 終了）を繰り返す。

use crate::cli::ExportFormat;
use crate::config::Config;
use crate::error::{PpiError, Result};
use crate::export;
use dialoguer::{Confirm, Input, Select};
use ppi_common::{parse_cost, ChecklistItem, InspectionRecord, ItemStatus, Recommendation};
use std::path::Path;

/// 項目入力時のアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    /// 判定を設定
    Status(ItemStatus),
    /// 残り全部をPassのまま進める
    PassRemaining,
}

/// 出力後の次の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Edit,
    NewForm,
    Quit,
}

/// 判定入力を解釈
///
/// `""` → 現在の判定のまま, `p` → Pass, `m` → Minor, `x` → Major, `P` → 残り全部Pass。
/// ラベル（"Minor" など）もそのまま受け付ける。
pub fn parse_item_action(input: &str, current: ItemStatus) -> Option<ItemAction> {
    match input.trim() {
        "" => Some(ItemAction::Status(current)),
        "p" => Some(ItemAction::Status(ItemStatus::Pass)),
        "m" => Some(ItemAction::Status(ItemStatus::Minor)),
        "x" => Some(ItemAction::Status(ItemStatus::Major)),
        "P" => Some(ItemAction::PassRemaining),
        other => ItemStatus::from_label(other).map(ItemAction::Status),
    }
}

/// 残りの項目をPassに戻す（見積額も0）
pub fn pass_remaining(items: &mut [ChecklistItem]) {
    for item in items {
        item.status = ItemStatus::Pass;
        item.set_estimated_cost(0.0);
    }
}

/// 所見の1行入力で `\n` を改行として扱う
pub fn unescape_newlines(input: &str) -> String {
    input.replace("\\n", "\n")
}

fn prompt_error(e: dialoguer::Error) -> PpiError {
    PpiError::Prompt(e.to_string())
}

fn prompt_text(label: &str, current: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

/// フォーム全体を入力（現在値を初期値として表示）
pub fn fill_record(record: &mut InspectionRecord) -> Result<()> {
    println!("\n👤 顧客情報");
    record.client_name = prompt_text("Client Name", &record.client_name)?;
    record.client_phone = prompt_text("Phone", &record.client_phone)?;
    record.inspector = prompt_text("Inspector", &record.inspector)?;

    println!("\n🚗 車両情報");
    record.vehicle_make_model = prompt_text("Make / Model", &record.vehicle_make_model)?;
    record.vehicle_year = prompt_text("Year", &record.vehicle_year)?;
    record.vehicle_vin = prompt_text("VIN / Reg", &record.vehicle_vin)?;

    fill_checklist(record)?;

    println!();
    let summary = prompt_text(
        "Summary / Notes (\\n で改行)",
        &record.summary_notes.replace('\n', "\\n"),
    )?;
    record.summary_notes = unescape_newlines(summary.trim());

    let labels: Vec<&str> = Recommendation::ALL.iter().map(|r| r.label()).collect();
    let current = Recommendation::ALL
        .iter()
        .position(|r| *r == record.recommendation)
        .unwrap_or(0);
    let selected = Select::new()
        .with_prompt("Recommendation")
        .items(&labels)
        .default(current)
        .interact()
        .map_err(prompt_error)?;
    record.recommendation = Recommendation::ALL[selected];

    let current_total = if record.manual_total_override() > 0.0 {
        record.manual_total_override().to_string()
    } else {
        String::new()
    };
    let label = format!(
        "Total Estimated Repair Cost (空欄で項目合計 {:.2})",
        record.calculated_total()
    );
    let manual = prompt_text(&label, &current_total)?;
    record.set_manual_total_override(parse_cost(&manual));

    Ok(())
}

fn prompt_status(current: ItemStatus) -> Result<String> {
    Input::<String>::new()
        .with_prompt(format!("判定 [{}]", current))
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn fill_checklist(record: &mut InspectionRecord) -> Result<()> {
    let count = record.items().len();
    println!("\n📋 点検チェックリスト ({}項目)", count);
    println!("---");
    println!("判定: [Enter]そのまま [p]Pass [m]Minor [x]Major [P]残り全部Pass");
    println!("---");

    for i in 0..count {
        let current = &record.items()[i];
        println!("\n[{}/{}] {}", i + 1, count, current.name());
        let current = current.status;

        let action = loop {
            let input = prompt_status(current)?;
            match parse_item_action(&input, current) {
                Some(action) => break action,
                None => println!("  ⚠ 無効な入力です: {}", input),
            }
        };

        let status = match action {
            ItemAction::Status(status) => status,
            ItemAction::PassRemaining => {
                pass_remaining(&mut record.items_mut()[i..]);
                println!("  → 残り{}項目をPass", count - i);
                break;
            }
        };

        let item = &mut record.items_mut()[i];
        item.status = status;
        item.notes = prompt_text("Notes", &item.notes)?;

        let current_cost = if item.estimated_cost() > 0.0 {
            item.estimated_cost().to_string()
        } else {
            String::new()
        };
        let cost = prompt_text("Est Cost", &current_cost)?;
        item.set_estimated_cost_text(&cost);
    }

    Ok(())
}

fn print_overview(record: &InspectionRecord) {
    let flagged: Vec<_> = record
        .items()
        .iter()
        .filter(|item| item.status != ItemStatus::Pass)
        .collect();

    println!("\n📝 入力内容");
    println!("  顧客: {}", record.client_name);
    println!("  車両: {} ({})", record.vehicle_make_model, record.vehicle_year);
    println!("  指摘項目: {}件", flagged.len());
    for item in flagged {
        println!("    - {} [{}] {:.2}", item.name(), item.status, item.estimated_cost());
    }
    println!("  合計: {:.2}", record.final_total());
    println!("  推奨: {}", record.recommendation);
}

fn prompt_next_step() -> Result<NextStep> {
    let choices = ["修正して再出力", "フォームをクリアして新規入力", "終了"];
    let selected = Select::new()
        .with_prompt("次の操作")
        .items(&choices)
        .default(2)
        .interact()
        .map_err(prompt_error)?;
    Ok(match selected {
        0 => NextStep::Edit,
        1 => NextStep::NewForm,
        _ => NextStep::Quit,
    })
}

/// 対話セッションを実行
pub fn run_interactive(config: &Config, format: ExportFormat, output_dir: &Path) -> Result<()> {
    let mut record = InspectionRecord::new();

    loop {
        fill_record(&mut record)?;
        print_overview(&record);

        let proceed = !record.client_name.trim().is_empty()
            || confirm("Client name is empty. Continue?", false)?;

        if proceed {
            let generated_at = chrono::Local::now().naive_local();
            match export::export_record(&record, config, format, output_dir, generated_at) {
                Ok(paths) => {
                    println!("\n✅ {}件のファイルを保存しました", paths.len());
                }
                Err(e) => {
                    log::error!("export failed: {:?}", e);
                    eprintln!("\n✖ 保存に失敗しました: {}", e);
                }
            }
        } else {
            println!("→ 出力を中止しました");
        }

        match prompt_next_step()? {
            NextStep::Edit => continue,
            NextStep::NewForm => record.clear(),
            NextStep::Quit => break,
        }
    }

    Ok(())
}
