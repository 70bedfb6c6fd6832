//! CSV投影（記録保管用）
//!
//! PDFと違い、備考・金額を一切切り詰めない。
//!
//! ```text
//! Client,…  Phone,…  Inspector,…  Vehicle,…  Year,…  VIN,…  Date,…
//! (空行)
//! Item,Status,Notes,Est Cost
//! 項目ごとに1行
//! (空行)
//! Summary,…
//! Recommendation,…
//! ```

use crate::catalog::{ItemStatus, Recommendation};
use crate::error::{Error, Result};
use crate::types::InspectionRecord;
use chrono::NaiveDateTime;
use std::io::{Read, Write};

pub const CHECKLIST_HEADER: [&str; 4] = ["Item", "Status", "Notes", "Est Cost"];

/// CSVに書き出す
pub fn write_record_csv<W: Write>(
    record: &InspectionRecord,
    generated_at: NaiveDateTime,
    writer: W,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    let date = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let metadata = [
        ("Client", record.client_name.as_str()),
        ("Phone", record.client_phone.as_str()),
        ("Inspector", record.inspector.as_str()),
        ("Vehicle", record.vehicle_make_model.as_str()),
        ("Year", record.vehicle_year.as_str()),
        ("VIN", record.vehicle_vin.as_str()),
        ("Date", date.as_str()),
    ];
    for (key, value) in metadata {
        wtr.write_record([key, value])?;
    }

    blank_line(&mut wtr)?;
    wtr.write_record(CHECKLIST_HEADER)?;
    for item in record.items() {
        let cost = item.estimated_cost().to_string();
        wtr.write_record([item.name(), item.status.label(), item.notes.as_str(), cost.as_str()])?;
    }

    blank_line(&mut wtr)?;
    wtr.write_record(["Summary", record.summary_notes.as_str()])?;
    wtr.write_record(["Recommendation", record.recommendation.label()])?;
    wtr.flush()?;
    Ok(())
}

/// 区切りの空行（フィールドなし）
fn blank_line<W: Write>(wtr: &mut csv::Writer<W>) -> Result<()> {
    wtr.flush()?;
    wtr.get_mut().write_all(b"\n")?;
    Ok(())
}

/// CSVをバイト列として生成
pub fn record_to_csv_bytes(
    record: &InspectionRecord,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_record_csv(record, generated_at, &mut buf)?;
    Ok(buf)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Metadata,
    Checklist,
}

/// 書き出したCSVから記録を復元
///
/// Date行と手動合計は記録の一部ではないため復元しない。
pub fn read_record_csv<R: Read>(reader: R) -> Result<InspectionRecord> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = InspectionRecord::new();
    let mut section = Section::Metadata;

    for row in rdr.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        let key = row.get(0).unwrap_or_default();
        let value = row.get(1).unwrap_or_default().to_string();

        match section {
            Section::Metadata => match key {
                "Client" => record.client_name = value,
                "Phone" => record.client_phone = value,
                "Inspector" => record.inspector = value,
                "Vehicle" => record.vehicle_make_model = value,
                "Year" => record.vehicle_year = value,
                "VIN" => record.vehicle_vin = value,
                "Item" => section = Section::Checklist,
                _ => log::debug!("metadata row ignored: {}", key),
            },
            Section::Checklist => match key {
                "Summary" => record.summary_notes = value,
                "Recommendation" => {
                    record.recommendation = Recommendation::from_label(&value)
                        .ok_or_else(|| Error::Parse(format!("unknown recommendation: {}", value)))?;
                }
                name => {
                    let status = ItemStatus::from_label(&value).ok_or_else(|| {
                        Error::Parse(format!("unknown status for {}: {}", name, value))
                    })?;
                    let notes = row.get(2).unwrap_or_default().to_string();
                    let cost = row.get(3).unwrap_or_default();
                    let item = record
                        .item_mut(name)
                        .ok_or_else(|| Error::Parse(format!("unknown checklist item: {}", name)))?;
                    item.status = status;
                    item.notes = notes;
                    item.set_estimated_cost_text(cost);
                }
            },
        }
    }

    if section == Section::Metadata {
        return Err(Error::Parse("missing checklist header".into()));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CHECK_ITEMS;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 15)
            .unwrap()
    }

    fn sample_record() -> InspectionRecord {
        let mut record = InspectionRecord::new();
        record.client_name = "Doe, John".into();
        record.client_phone = "+961 3 000 000".into();
        record.inspector = "Sam".into();
        record.vehicle_make_model = "Honda \"Civic\"".into();
        record.vehicle_year = "2012".into();
        record.vehicle_vin = "".into();
        record.items_mut()[8].status = ItemStatus::Major;
        record.items_mut()[8].notes = "Pads at 2mm, rotors scored".into();
        record.items_mut()[8].set_estimated_cost(200.0);
        record.items_mut()[10].status = ItemStatus::Minor;
        record.items_mut()[10].set_estimated_cost(37.125);
        record.summary_notes = "Line one\nLine two, with comma".into();
        record.recommendation = Recommendation::MajorRepairs;
        record
    }

    #[test]
    fn test_csv_layout() {
        let bytes = record_to_csv_bytes(&sample_record(), stamp()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Client,\"Doe, John\"");
        assert_eq!(lines[5], "VIN,");
        assert_eq!(lines[6], "Date,2025-06-01 09:30:15");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "Item,Status,Notes,Est Cost");
        assert_eq!(lines[9], "Engine - Visual & Oil Leaks,Pass,,0");
        assert!(text.contains(
            "Brakes - Pads / Rotors / Fluid,Major,\"Pads at 2mm, rotors scored\",200\n"
        ));
        assert!(text.contains("Tires - Tread & Pressure,Minor,,37.125\n"));
        assert_eq!(lines[lines.len() - 3], "");
        assert!(text.trim_end().ends_with("Recommendation,Get major repairs before buying"));
    }

    #[test]
    fn test_csv_roundtrip() {
        let original = sample_record();
        let bytes = record_to_csv_bytes(&original, stamp()).unwrap();
        let restored = read_record_csv(bytes.as_slice()).unwrap();

        assert_eq!(restored.client_name, original.client_name);
        assert_eq!(restored.client_phone, original.client_phone);
        assert_eq!(restored.inspector, original.inspector);
        assert_eq!(restored.vehicle_make_model, original.vehicle_make_model);
        assert_eq!(restored.vehicle_year, original.vehicle_year);
        assert_eq!(restored.vehicle_vin, original.vehicle_vin);
        assert_eq!(restored.items(), original.items());
        assert_eq!(restored.summary_notes, original.summary_notes);
        assert_eq!(restored.recommendation, original.recommendation);
    }

    #[test]
    fn test_csv_keeps_long_notes() {
        let mut record = InspectionRecord::new();
        let notes: String = "0123456789".repeat(20);
        record.items_mut()[0].notes = notes.clone();

        let bytes = record_to_csv_bytes(&record, stamp()).unwrap();
        let restored = read_record_csv(bytes.as_slice()).unwrap();
        assert_eq!(restored.items()[0].notes.chars().count(), 200);
        assert_eq!(restored.items()[0].notes, notes);
    }

    #[test]
    fn test_csv_row_count() {
        let bytes = record_to_csv_bytes(&InspectionRecord::new(), stamp()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        // メタ7 + 空行 + 見出し + 項目 + 空行 + 所見 + 推奨
        assert_eq!(text.lines().count(), 7 + 1 + 1 + CHECK_ITEMS.len() + 1 + 2);
        assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 2);
    }

    #[test]
    fn test_read_rejects_missing_header() {
        let err = read_record_csv("Client,John\nPhone,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_read_rejects_unknown_item() {
        let data = "Client,John\nItem,Status,Notes,Est Cost\nFlux Capacitor,Pass,,0\n";
        let err = read_record_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Flux Capacitor"));
    }
}
