//! CSV生成（記録保管用、切り詰めなし）

use crate::error::{PpiError, Result};
use crate::io::write_atomic;
use chrono::NaiveDateTime;
use ppi_common::export::csv_core::{read_record_csv, record_to_csv_bytes};
use ppi_common::InspectionRecord;
use std::path::Path;

/// 点検記録をCSVファイルに保存
pub fn generate_csv(
    record: &InspectionRecord,
    generated_at: NaiveDateTime,
    output_path: &Path,
) -> Result<()> {
    let bytes = record_to_csv_bytes(record, generated_at)
        .map_err(|e| PpiError::CsvExport(e.to_string()))?;
    write_atomic(output_path, &bytes)
}

/// 保存済みCSVを読み込む
pub fn load_csv(path: &Path) -> Result<InspectionRecord> {
    if !path.exists() {
        return Err(PpiError::FileNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    Ok(read_record_csv(std::io::BufReader::new(file))?)
}
