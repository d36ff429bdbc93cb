use std::fs;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use psn_chem_filter::data::loader::{load_sheet, load_workbook};
use psn_chem_filter::data::{run_path, CellValue, ErrorKind, MatchConfig};
use rust_xlsxwriter::Workbook as XlsxWorkbook;

const DASHBOARD_CSV: &str = "Element,C,Mn,\nMin,0.10,0.30,\nMax,0.25,1.00,\n";

const CATALOG_CSV: &str = "\
PSN_NO,PSN_Grade,SPEC,C,Mn
P1,S235,AIM,0.20,0.50
P2,S235,AIM,0.05,0.50
P3,S355,AIM,0.20,
P4,S355,REJECT,0.20,0.50
";

#[test]
fn csv_folder_workbook() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Dashboard.csv"), DASHBOARD_CSV).unwrap();
    fs::write(dir.path().join("PSN_DATA.csv"), CATALOG_CSV).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let workbook = load_workbook(dir.path()).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Dashboard", "PSN_DATA"]);

    let report = run_path(dir.path(), &MatchConfig::default()).unwrap();
    let ids: Vec<_> = report.result.rows.iter().map(|r| r.psn_no.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P3"]);
}

#[test]
fn csv_sheets_keep_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Dashboard.csv");
    fs::write(&path, DASHBOARD_CSV).unwrap();

    let sheet = load_sheet(&path).unwrap();
    assert_eq!(sheet.name, "Dashboard");
    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet.cell(0, 1), &CellValue::String("C".into()));
    assert_eq!(sheet.cell(1, 1), &CellValue::Float(0.10));
    assert_eq!(sheet.cell(1, 3), &CellValue::Null);
}

#[test]
fn json_workbook_with_grid_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.json");
    fs::write(
        &path,
        r#"{
            "Dashboard": [["", "C", "Mn"], ["", 0.10, 0.30], ["", 0.25, 1.00]],
            "PSN_DATA": [
                {"PSN_NO": "P1", "PSN_Grade": "S235", "SPEC": "AIM", "C": 0.20, "Mn": 0.50},
                {"PSN_NO": "P2", "PSN_Grade": "S235", "SPEC": "AIM", "C": 0.05, "Mn": 0.50},
                {"PSN_NO": "P3", "PSN_Grade": "S355", "SPEC": "AIM", "C": 0.20},
                {"PSN_NO": "P4", "PSN_Grade": "S355", "SPEC": "REJECT", "C": 0.20, "Mn": 0.50}
            ]
        }"#,
    )
    .unwrap();

    let report = run_path(&path, &MatchConfig::default()).unwrap();
    let ids: Vec<_> = report.result.rows.iter().map(|r| r.psn_no.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P3"]);
}

#[test]
fn parquet_catalog_sheet() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Dashboard.csv"), DASHBOARD_CSV).unwrap();

    let schema = Arc::new(Schema::new(vec![
        Field::new("PSN_NO", DataType::Int64, false),
        Field::new("PSN_Grade", DataType::Utf8, false),
        Field::new("SPEC", DataType::Utf8, true),
        Field::new("C", DataType::Float64, true),
        Field::new("Mn", DataType::Float64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![1001, 1002, 1003])),
        Arc::new(StringArray::from(vec!["S235", "S355", "C45"])),
        Arc::new(StringArray::from(vec![Some("AIM"), None, Some("AIM")])),
        Arc::new(Float64Array::from(vec![Some(0.2), Some(0.2), None])),
        Arc::new(Float64Array::from(vec![Some(2.0), Some(0.5), Some(0.5)])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = fs::File::create(dir.path().join("PSN_DATA.parquet")).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let report = run_path(dir.path(), &MatchConfig::default()).unwrap();
    assert_eq!(report.catalog_rows, 3);
    assert_eq!(report.category_rows, 2);
    assert_eq!(report.result.len(), 1);
    assert_eq!(report.result.rows[0].psn_no, "1003");
}

#[test]
fn missing_sheet_in_folder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("PSN_DATA.csv"), CATALOG_CSV).unwrap();
    let err = run_path(dir.path(), &MatchConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingSheet);
    assert!(err.to_string().contains("Dashboard"));
}

#[test]
fn unreadable_workbook_is_unexpected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.json");
    fs::write(&path, "{ not json").unwrap();
    let err = run_path(&path, &MatchConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert!(err.to_string().starts_with("parsing JSON workbook"));
}

#[test]
fn unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.txt");
    fs::write(&path, b"PSN_NO").unwrap();
    let err = load_workbook(&path).unwrap_err();
    assert!(err.to_string().contains(".txt"));
}

#[test]
fn json_records_dashboard_keeps_label_column_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.json");
    fs::write(
        &path,
        r#"{
            "Dashboard": [
                {"Label": "Min", "C": 0.1, "Mn": 0.3},
                {"Label": "Max", "C": 0.25, "Mn": 1.0}
            ],
            "PSN_DATA": [
                {"PSN_NO": "P1", "PSN_Grade": "S235", "SPEC": "AIM", "C": 0.20, "Mn": 0.50},
                {"PSN_NO": "P2", "PSN_Grade": "S235", "SPEC": "AIM", "C": 0.20, "Mn": 1.50}
            ]
        }"#,
    )
    .unwrap();

    let report = run_path(&path, &MatchConfig::default()).unwrap();
    assert_eq!(report.ranges.elements().collect::<Vec<_>>(), vec!["C", "Mn"]);
    assert_eq!(report.display_columns(), vec!["PSN_NO", "PSN_Grade", "C", "Mn"]);
    let ids: Vec<_> = report.result.rows.iter().map(|r| r.psn_no.as_str()).collect();
    assert_eq!(ids, vec!["P1"]);
}

#[test]
fn xlsx_workbook_sheets_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.xlsx");

    let mut book = XlsxWorkbook::new();
    let catalog = book.add_worksheet();
    catalog.set_name("PSN_DATA").unwrap();
    for (col, name) in ["PSN_NO", "PSN_Grade", "SPEC", "C", "Mn"].iter().enumerate() {
        catalog.write_string(0, col as u16, *name).unwrap();
    }
    let rows = [
        ("P1", "S235", "AIM", Some(0.20), Some(0.50)),
        ("P2", "S235", "AIM", Some(0.05), Some(0.50)),
        ("P3", "S355", "AIM", Some(0.20), None),
        ("P4", "S355", "REJECT", Some(0.20), Some(0.50)),
    ];
    for (i, (psn, grade, spec, c, mn)) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        catalog.write_string(row, 0, *psn).unwrap();
        catalog.write_string(row, 1, *grade).unwrap();
        catalog.write_string(row, 2, *spec).unwrap();
        if let Some(c) = c {
            catalog.write_number(row, 3, *c).unwrap();
        }
        if let Some(mn) = mn {
            catalog.write_number(row, 4, *mn).unwrap();
        }
    }

    // Column A left empty: element names start at B1.
    let dashboard = book.add_worksheet();
    dashboard.set_name("Dashboard").unwrap();
    dashboard.write_string(0, 1, "C").unwrap();
    dashboard.write_string(0, 2, "Mn").unwrap();
    dashboard.write_number(1, 1, 0.10).unwrap();
    dashboard.write_number(1, 2, 0.30).unwrap();
    dashboard.write_number(2, 1, 0.25).unwrap();
    dashboard.write_number(2, 2, 1.00).unwrap();
    book.save(&path).unwrap();

    let workbook = load_workbook(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Dashboard", "PSN_DATA"]);

    let report = run_path(&path, &MatchConfig::default()).unwrap();
    assert_eq!(report.ranges.elements().collect::<Vec<_>>(), vec!["C", "Mn"]);
    let ids: Vec<_> = report.result.rows.iter().map(|r| r.psn_no.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P3"]);
}
