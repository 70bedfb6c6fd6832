//! 出力ファイル名の生成
//!
//! `{reports_dir}/{prefix}_{client}_{YYYYMMDD_HHMMSS}.{ext}`
//! 同一秒・同一顧客の重複回避はここでは行わない（呼び出し側の責務）。

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// 帳票ファイルの接頭辞
pub const REPORT_PREFIX: &str = "PPI";

/// 顧客名が空になった場合の代替
pub const FALLBACK_CLIENT: &str = "client";

/// タイムスタンプ書式（秒単位）
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 顧客名をファイル名に使える文字だけに絞る
///
/// 英数字・空白・`-`・`_` のみ残し、前後の空白を除去する。
pub fn sanitize_client_name(client_name: &str) -> String {
    let kept: String = client_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let trimmed = kept.trim();
    if trimmed.is_empty() {
        FALLBACK_CLIENT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 出力パスを組み立てる
pub fn make_filename(
    reports_dir: &Path,
    prefix: &str,
    client_name: &str,
    timestamp: NaiveDateTime,
    extension: &str,
) -> PathBuf {
    reports_dir.join(format!(
        "{}_{}_{}.{}",
        prefix,
        sanitize_client_name(client_name),
        timestamp.format(TIMESTAMP_FORMAT),
        extension
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    fn name_segment(path: &Path) -> String {
        let file = path.file_stem().unwrap().to_string_lossy().to_string();
        let rest = file.strip_prefix("PPI_").unwrap();
        // 末尾の "_YYYYMMDD_HHMMSS" を除去
        rest[..rest.len() - 16].to_string()
    }

    #[test]
    fn test_make_filename_layout() {
        let path = make_filename(Path::new("reports"), REPORT_PREFIX, "John Doe", stamp(), "pdf");
        assert_eq!(path, PathBuf::from("reports/PPI_John Doe_20250309_140507.pdf"));
    }

    #[test]
    fn test_disallowed_characters_removed() {
        for name in ["John/Doe*", "a<b>c:d\"e|f?g", "../../etc/passwd", "Zoë & Co.", "tab\there"] {
            let path = make_filename(Path::new("reports"), REPORT_PREFIX, name, stamp(), "csv");
            let segment = name_segment(&path);
            assert!(
                segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_')),
                "unexpected character in {:?}",
                segment
            );
            assert_eq!(path.parent(), Some(Path::new("reports")));
        }
        assert_eq!(sanitize_client_name("John/Doe*"), "JohnDoe");
    }

    #[test]
    fn test_blank_name_falls_back() {
        assert_eq!(sanitize_client_name(""), "client");
        assert_eq!(sanitize_client_name("  "), "client");
        assert_eq!(sanitize_client_name("***"), "client");

        let path = make_filename(Path::new("reports"), REPORT_PREFIX, "  ", stamp(), "pdf");
        assert_eq!(name_segment(&path), "client");
    }

    #[test]
    fn test_inner_spaces_kept() {
        assert_eq!(sanitize_client_name("  Mary-Jane  O_Neil "), "Mary-Jane  O_Neil");
    }
}
