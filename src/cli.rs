use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ppi")]
#[command(about = "中古車購入前点検（PPI）の入力とPDF/CSV帳票生成", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式で点検フォームを入力して帳票を生成
    New {
        /// 出力形式 (pdf/csv/both)
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,

        /// 出力ディレクトリ（省略時は設定の reportsDir）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// JSONフォーム（または保存済みCSV）から帳票を生成
    Generate {
        /// 入力ファイル（.json フォーム / .csv 記録）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (pdf/csv/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// 出力ディレクトリ（省略時は設定の reportsDir）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// 空のJSONフォームを出力
    Template {
        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 店舗名を設定
        #[arg(long)]
        set_shop_name: Option<String>,

        /// 住所を設定
        #[arg(long)]
        set_shop_address: Option<String>,

        /// 電話番号を設定（空文字で非表示）
        #[arg(long)]
        set_shop_phone: Option<String>,

        /// ロゴ画像パスを設定（空文字でロゴなし）
        #[arg(long)]
        set_logo: Option<String>,

        /// 帳票出力ディレクトリを設定
        #[arg(long)]
        set_reports_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Csv,
    Both,
}

impl ExportFormat {
    pub fn includes_pdf(&self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Both)
    }

    pub fn includes_csv(&self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::Both)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use pdf, csv, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
