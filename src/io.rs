use crate::error::{PpiError, Result};
use ppi_common::InspectionForm;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 一時ファイルに書いてから置き換える（書きかけのファイルを残さない）
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let save_error = |source: std::io::Error| PpiError::Save {
        path: path.display().to_string(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(save_error)?;
    tmp.write_all(bytes).map_err(save_error)?;
    tmp.as_file().sync_all().map_err(save_error)?;
    tmp.persist(path).map_err(|e| save_error(e.error))?;

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// 既存ファイルと重ならないパスを返す（`_2`, `_3`, … を付加）
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 2;
    loop {
        let candidate = path.with_file_name(format!("{stem}_{n}{ext}"));
        if !candidate.exists() {
            log::info!("{} exists, using {}", path.display(), candidate.display());
            return candidate;
        }
        n += 1;
    }
}

pub fn load_form(path: &Path) -> Result<InspectionForm> {
    if !path.exists() {
        return Err(PpiError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let form: InspectionForm = serde_json::from_str(&content)?;
    Ok(form)
}

pub fn form_to_json(form: &InspectionForm) -> Result<String> {
    Ok(serde_json::to_string_pretty(form)?)
}
