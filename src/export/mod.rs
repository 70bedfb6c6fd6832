pub mod csv;
pub mod pdf;

use crate::cli::ExportFormat;
use crate::config::Config;
use crate::error::{PpiError, Result};
use crate::io::unique_path;
use chrono::NaiveDateTime;
use ppi_common::{make_filename, InspectionRecord, REPORT_PREFIX};
use std::path::{Path, PathBuf};

/// 出力パス（同名ファイルがあれば連番を付ける）
pub fn output_path_for(
    output_dir: &Path,
    record: &InspectionRecord,
    generated_at: NaiveDateTime,
    extension: &str,
) -> PathBuf {
    unique_path(&make_filename(
        output_dir,
        REPORT_PREFIX,
        &record.client_name,
        generated_at,
        extension,
    ))
}

/// 途中で失敗した場合、保存済みのパスをエラーに含める
fn with_written(written: &[PathBuf], error: PpiError) -> PpiError {
    if written.is_empty() {
        return error;
    }
    let written = written
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    PpiError::PartialExport {
        written,
        source: Box::new(error),
    }
}

/// 指定形式で帳票を出力し、書き出したパスを返す
pub fn export_record(
    record: &InspectionRecord,
    config: &Config,
    format: ExportFormat,
    output_dir: &Path,
    generated_at: NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    log::debug!(
        "export {} items, final total {:.2} ({})",
        record.items().len(),
        record.final_total(),
        format
    );

    if format.includes_pdf() {
        let output_path = output_path_for(output_dir, record, generated_at, "pdf");
        println!("- PDFを生成中...");
        pdf::generate_pdf(record, &config.shop, generated_at, &output_path)?;
        println!("✔ PDF出力: {}", output_path.display());
        written.push(output_path);
    }

    if format.includes_csv() {
        let output_path = output_path_for(output_dir, record, generated_at, "csv");
        println!("- CSVを生成中...");
        csv::generate_csv(record, generated_at, &output_path)
            .map_err(|e| with_written(&written, e))?;
        println!("✔ CSV出力: {}", output_path.display());
        written.push(output_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save_error() -> PpiError {
        PpiError::Save {
            path: "reports/PPI_x.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        }
    }

    #[test]
    fn test_error_unchanged_when_nothing_written() {
        let err = with_written(&[], save_error());
        assert!(matches!(err, PpiError::Save { .. }));
    }

    #[test]
    fn test_error_lists_already_written_paths() {
        let written = vec![PathBuf::from("reports/PPI_x.pdf")];
        let err = with_written(&written, save_error());

        assert!(matches!(err, PpiError::PartialExport { .. }));
        let message = err.to_string();
        assert!(message.contains("reports/PPI_x.pdf"));
        assert!(message.contains("access denied"));
    }
}
