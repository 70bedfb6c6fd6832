//! PDF/CSV出力の統合テスト

use chrono::{NaiveDate, NaiveDateTime};
use ppi_common::{InspectionRecord, ItemStatus, Recommendation, ShopProfile};
use ppi_report::cli::ExportFormat;
use ppi_report::config::Config;
use ppi_report::export::{self, csv, pdf};
use tempfile::tempdir;

fn stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 9)
        .unwrap()
        .and_hms_opt(14, 5, 7)
        .unwrap()
}

fn shop_without_logo() -> ShopProfile {
    ShopProfile {
        logo_path: None,
        ..Default::default()
    }
}

fn create_test_record() -> InspectionRecord {
    let mut record = InspectionRecord::new();
    record.client_name = "John/Doe*".to_string();
    record.client_phone = "03 000 000".to_string();
    record.inspector = "Sam".to_string();
    record.vehicle_make_model = "Toyota Corolla".to_string();
    record.vehicle_year = "2015".to_string();
    record.vehicle_vin = "JTDBR32E".to_string();

    let brakes = record.item_mut("Brakes - Pads / Rotors / Fluid").unwrap();
    brakes.status = ItemStatus::Major;
    brakes.notes = "Front pads worn".to_string();
    brakes.set_estimated_cost(200.0);

    record.summary_notes = "Overall solid, brakes need work.".to_string();
    record.recommendation = Recommendation::Negotiate;
    record
}

fn test_config(dir: &std::path::Path) -> Config {
    Config {
        shop: shop_without_logo(),
        reports_dir: dir.to_path_buf(),
    }
}

#[test]
fn test_pdf_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("report.pdf");

    let result = pdf::generate_pdf(
        &create_test_record(),
        &shop_without_logo(),
        stamp(),
        &output_path,
    );
    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());

    let bytes = std::fs::read(&output_path).expect("PDF読み込み失敗");
    assert!(bytes.starts_with(b"%PDF"), "PDFヘッダがない");
}

#[test]
fn test_pdf_generation_empty_record() {
    let bytes = pdf::render_pdf(&InspectionRecord::new(), &shop_without_logo(), stamp())
        .expect("空の記録でPDF生成に失敗");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_with_missing_logo_still_renders() {
    let shop = ShopProfile {
        logo_path: Some("/nonexistent/logo-12345.jpeg".into()),
        ..Default::default()
    };
    let bytes = pdf::render_pdf(&create_test_record(), &shop, stamp()).expect("PDF生成に失敗");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_with_undecodable_logo_still_renders() {
    let dir = tempdir().expect("Failed to create temp dir");
    let logo = dir.path().join("logo.jpeg");
    std::fs::write(&logo, b"not an image").unwrap();

    let shop = ShopProfile {
        logo_path: Some(logo),
        ..Default::default()
    };
    let bytes = pdf::render_pdf(&create_test_record(), &shop, stamp()).expect("PDF生成に失敗");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_multi_page() {
    let mut record = create_test_record();
    record.summary_notes = "Detailed observation line.\n".repeat(100);
    let bytes =
        pdf::render_pdf(&record, &shop_without_logo(), stamp()).expect("PDF生成に失敗");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_csv_generation_and_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("record.csv");

    let mut record = create_test_record();
    let long_notes = "n".repeat(200);
    record.items_mut()[0].notes = long_notes.clone();

    csv::generate_csv(&record, stamp(), &output_path).expect("CSV生成に失敗");
    let restored = csv::load_csv(&output_path).expect("CSV読み込み失敗");

    assert_eq!(restored.client_name, record.client_name);
    assert_eq!(restored.vehicle_vin, record.vehicle_vin);
    assert_eq!(restored.items(), record.items());
    assert_eq!(restored.items()[0].notes, long_notes);
    assert_eq!(restored.final_total(), 200.0);
}

#[test]
fn test_export_both_uses_sanitized_names() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = test_config(dir.path());

    let paths = export::export_record(
        &create_test_record(),
        &config,
        ExportFormat::Both,
        dir.path(),
        stamp(),
    )
    .expect("出力に失敗");

    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0], dir.path().join("PPI_JohnDoe_20250309_140507.pdf"));
    assert_eq!(paths[1], dir.path().join("PPI_JohnDoe_20250309_140507.csv"));
    assert!(paths.iter().all(|p| p.exists()));
}

#[test]
fn test_export_blank_client_uses_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = test_config(dir.path());
    let mut record = create_test_record();
    record.client_name = "  ".to_string();

    let paths = export::export_record(&record, &config, ExportFormat::Csv, dir.path(), stamp())
        .expect("出力に失敗");
    assert_eq!(paths, vec![dir.path().join("PPI_client_20250309_140507.csv")]);
}

#[test]
fn test_export_same_second_does_not_overwrite() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = test_config(dir.path());
    let record = create_test_record();

    let export_pdf =
        || export::export_record(&record, &config, ExportFormat::Pdf, dir.path(), stamp()).unwrap();
    let first = export_pdf();
    let second = export_pdf();

    assert_ne!(first[0], second[0]);
    assert_eq!(second[0], dir.path().join("PPI_JohnDoe_20250309_140507_2.pdf"));
    assert!(first[0].exists() && second[0].exists());
}

#[test]
fn test_export_to_missing_directory_fails_cleanly() {
    let dir = tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("does-not-exist");
    let config = test_config(&missing);

    let record = create_test_record();
    let result = export::export_record(&record, &config, ExportFormat::Pdf, &missing, stamp());
    assert!(result.is_err());
    assert!(!missing.exists());
}
