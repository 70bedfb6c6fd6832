//! PPI Report Common Library
//!
//! 対話CLIとJSON一括処理で共有される型・レイアウト・CSV投影

pub mod catalog;
pub mod cost;
pub mod error;
pub mod export;
pub mod filename;
pub mod layout;
pub mod types;

pub use catalog::{ItemStatus, Recommendation, CHECK_ITEMS};
pub use cost::{compute_total, parse_cost};
pub use error::{Error, Result};
pub use filename::{make_filename, sanitize_client_name, REPORT_PREFIX};
pub use layout::PageGeometry;
pub use types::{ChecklistItem, FormItem, InspectionForm, InspectionRecord, ShopProfile};
