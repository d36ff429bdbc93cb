use std::collections::BTreeMap;
use std::fmt;

use super::error::{FilterError, FilterResult};

/// Catalog column holding the PSN identifier.
pub const PSN_NO: &str = "PSN_NO";
/// Catalog column holding the grade name.
pub const PSN_GRADE: &str = "PSN_Grade";
/// Catalog column holding the category tag.
pub const SPEC: &str = "SPEC";

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as it comes out of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_nan() => Ok(()),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Empty cells: null, whitespace-only text, or a NaN float.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the cell; numeric text is accepted.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Text view of a non-blank cell, trimmed.
    pub fn as_text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(self.to_string().trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// Sheet / Workbook – raw tables handed over by the loader
// ---------------------------------------------------------------------------

/// A named grid of cells. Row 0 is the first line of the sheet.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Sheet {
            name: name.into(),
            rows,
        }
    }

    /// Cell at `(row, col)`; positions past a ragged row's end read as `Null`.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&CellValue::Null)
    }

    /// Widest row length.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All sheets of an uploaded workbook, keyed by sheet name.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: BTreeMap<String, Sheet>,
}

impl Workbook {
    pub fn insert(&mut self, sheet: Sheet) {
        if self.sheets.contains_key(&sheet.name) {
            log::warn!("Sheet '{}' defined twice, keeping the last one", sheet.name);
        }
        self.sheets.insert(sheet.name.clone(), sheet);
    }

    pub fn sheet(&self, name: &str) -> FilterResult<&Sheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| FilterError::MissingSheet(name.to_string()))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }
}

// ---------------------------------------------------------------------------
// CatalogRow / Catalog – the PSN table
// ---------------------------------------------------------------------------

/// One PSN of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub psn_no: String,
    pub psn_grade: String,
    /// Category tag; `None` when the cell is blank.
    pub spec: Option<String>,
    /// Every other column by name, element compositions included.
    pub values: BTreeMap<String, CellValue>,
}

impl CatalogRow {
    pub fn new(
        psn_no: impl Into<String>,
        psn_grade: impl Into<String>,
        spec: Option<&str>,
    ) -> Self {
        CatalogRow {
            psn_no: psn_no.into(),
            psn_grade: psn_grade.into(),
            spec: spec.map(str::to_string),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper for setting a column value.
    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    /// Cell under `column`; known columns are re-exposed as text.
    pub fn get(&self, column: &str) -> Option<CellValue> {
        match column {
            PSN_NO => Some(CellValue::String(self.psn_no.clone())),
            PSN_GRADE => Some(CellValue::String(self.psn_grade.clone())),
            SPEC => Some(
                self.spec
                    .clone()
                    .map(CellValue::String)
                    .unwrap_or(CellValue::Null),
            ),
            other => self.values.get(other).cloned(),
        }
    }
}

/// The parsed catalog sheet.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Column names in sheet order.
    pub columns: Vec<String>,
    pub rows: Vec<CatalogRow>,
}

impl Catalog {
    /// Interpret a sheet whose first row holds the column names.
    pub fn from_sheet(sheet: &Sheet) -> FilterResult<Self> {
        let header = sheet.rows.first().map(Vec::as_slice).unwrap_or(&[]);
        let named: Vec<(usize, String)> = header
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_text().map(|name| (i, name)))
            .collect();

        let position = |column: &str| {
            named
                .iter()
                .find(|(_, name)| name == column)
                .map(|(i, _)| *i)
                .ok_or_else(|| FilterError::MissingColumn {
                    sheet: sheet.name.clone(),
                    column: column.to_string(),
                })
        };
        let spec_idx = position(SPEC)?;
        let psn_idx = position(PSN_NO)?;
        let grade_idx = position(PSN_GRADE)?;

        let mut rows = Vec::with_capacity(sheet.len().saturating_sub(1));
        for (line, cells) in sheet.rows.iter().enumerate().skip(1) {
            if cells.iter().all(CellValue::is_blank) {
                continue;
            }
            let cell = |col: usize| sheet.cell(line, col);

            let mut values = BTreeMap::new();
            for (col, name) in &named {
                if [spec_idx, psn_idx, grade_idx].contains(col) {
                    continue;
                }
                values.insert(name.clone(), cell(*col).clone());
            }

            rows.push(CatalogRow {
                psn_no: cell(psn_idx).as_text().unwrap_or_default(),
                psn_grade: cell(grade_idx).as_text().unwrap_or_default(),
                spec: match cell(spec_idx) {
                    CellValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
                    other => other.as_text(),
                },
                values,
            });
        }

        Ok(Catalog {
            columns: named.into_iter().map(|(_, name)| name).collect(),
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
