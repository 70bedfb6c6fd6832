//! Export core modules shared across the CLI front ends.

pub mod pdf_core;
pub mod report;

#[cfg(feature = "csv")]
pub mod csv_core;
