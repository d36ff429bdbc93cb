#![allow(dead_code)]

use psn_chem_filter::data::{Catalog, CatalogRow, CellValue, Sheet};

pub fn text(s: &str) -> CellValue {
    CellValue::String(s.to_string())
}

pub fn num(v: f64) -> CellValue {
    CellValue::Float(v)
}

/// `[["", "C", "Mn"], ["", 0.10, 0.30], ["", 0.25, 1.00]]`
pub fn c_mn_header() -> Sheet {
    Sheet::new(
        "Dashboard",
        vec![
            vec![text(""), text("C"), text("Mn")],
            vec![text(""), num(0.10), num(0.30)],
            vec![text(""), num(0.25), num(1.00)],
        ],
    )
}

pub fn row(psn: &str, spec: &str, values: &[(&str, f64)]) -> CatalogRow {
    values
        .iter()
        .fold(CatalogRow::new(psn, "S355", Some(spec)), |row, (element, v)| {
            row.with(*element, num(*v))
        })
}

pub fn catalog(rows: Vec<CatalogRow>) -> Catalog {
    Catalog {
        columns: vec!["PSN_NO".into(), "PSN_Grade".into(), "SPEC".into(), "C".into(), "Mn".into()],
        rows,
    }
}

/// Catalog sheet with a header row, as the loader hands it over.
pub fn catalog_sheet() -> Sheet {
    Sheet::new(
        "PSN_DATA",
        vec![
            vec![
                text("PSN_NO"),
                text("PSN_Grade"),
                text("SPEC"),
                text("C"),
                text("Mn"),
                text("Si"),
            ],
            vec![text("P1"), text("S235"), text("AIM"), num(0.20), num(0.50), num(0.2)],
            vec![text("P2"), text("S235"), text("AIM"), num(0.05), num(0.50), num(0.2)],
            vec![text("P3"), text("S355"), text("AIM"), num(0.20), CellValue::Null, num(0.3)],
            vec![text("P4"), text("S355"), text("REJECT"), num(0.20), num(0.50), num(0.3)],
            vec![text("P5"), text("C45"), text("AIM"), num(0.25), num(0.30)],
        ],
    )
}
