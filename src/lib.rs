//! 中古車購入前点検（PPI）帳票ツール
//!
//! 点検記録・レイアウト・CSV投影は `ppi_common`、
//! printpdf による描画と入出力・対話フォームはこのクレート。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod io;
