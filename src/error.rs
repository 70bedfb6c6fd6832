use thiserror::Error;

#[derive(Error, Debug)]
pub enum PpiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("CSV生成エラー: {0}")]
    CsvExport(String),

    #[error("保存エラー ({path}): {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}（保存済み: {written}）")]
    PartialExport {
        written: String,
        #[source]
        source: Box<PpiError>,
    },

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] ppi_common::Error),
}

pub type Result<T> = std::result::Result<T, PpiError>;
