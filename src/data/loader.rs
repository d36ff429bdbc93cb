use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{open_workbook_auto, Data, Range, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Sheet, Workbook};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a workbook from a path.
///
/// Supported layouts:
/// * a spreadsheet (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) – every worksheet is a sheet
/// * a directory – every `.csv`, `.json`, `.parquet` / `.pq` file becomes a
///   sheet named after its file stem (`PSN_DATA.parquet`, `Dashboard.csv`)
/// * a `.json` file – `{ "PSN_DATA": <sheet>, "Dashboard": <sheet> }`
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    if path.is_dir() {
        return load_directory(path);
    }
    match extension(path).as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON workbook")?;
            let root: JsonValue = serde_json::from_str(&text).context("parsing JSON workbook")?;
            let sheets = root
                .as_object()
                .context("Expected top-level JSON object of sheets")?;
            let mut workbook = Workbook::default();
            for (name, value) in sheets {
                workbook.insert(json_sheet(name, value)?);
            }
            Ok(workbook)
        }
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(path),
        other => bail!(
            "Unsupported workbook: .{other} (expected .xlsx, .json or a folder of sheets)"
        ),
    }
}

/// Load a single sheet file, named after its file stem.
pub fn load_sheet(path: &Path) -> Result<Sheet> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("{}: file name is not valid UTF-8", path.display()))?;

    match extension(path).as_str() {
        "csv" => load_csv(name, path),
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
            json_sheet(name, &root)
        }
        "parquet" | "pq" => load_parquet(name, path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn load_directory(dir: &Path) -> Result<Workbook> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file() && matches!(extension(p).as_str(), "csv" | "json" | "parquet" | "pq")
        })
        .collect();
    paths.sort();

    let mut workbook = Workbook::default();
    for path in paths {
        let sheet = load_sheet(&path).with_context(|| format!("loading {}", path.display()))?;
        log::debug!("Loaded sheet '{}' ({} rows)", sheet.name, sheet.len());
        workbook.insert(sheet);
    }
    Ok(workbook)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path) -> Result<Workbook> {
    let mut book = open_workbook_auto(path).context("opening spreadsheet")?;
    let mut workbook = Workbook::default();
    for name in book.sheet_names() {
        let range = book
            .worksheet_range(&name)
            .with_context(|| format!("reading worksheet '{name}'"))?;
        workbook.insert(range_sheet(&name, &range));
    }
    Ok(workbook)
}

/// A worksheet range only spans its used cells; pad it back so row 0 /
/// column 0 are the sheet's first row / column `A`.
fn range_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let (first_row, first_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows = vec![Vec::new(); first_row];
    for line in range.rows() {
        let mut cells = vec![CellValue::Null; first_col];
        cells.extend(line.iter().map(data_to_cell));
        rows.push(cells);
    }
    Sheet::new(name, rows)
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("{e:?}")),
        Data::Empty => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// A JSON sheet is either a grid or a list of records:
///
/// ```json
/// [["", "C", "Mn"], ["Min", 0.10, 0.30], ["Max", 0.25, 1.00]]
/// ```
///
/// ```json
/// [{ "PSN_NO": "1001", "PSN_Grade": "S235", "SPEC": "AIM", "C": 0.2 }, ...]
/// ```
///
/// Records turn into a grid whose first row holds the keys, in first-seen order.
fn json_sheet(name: &str, value: &JsonValue) -> Result<Sheet> {
    let lines = value
        .as_array()
        .with_context(|| format!("Sheet '{name}' is not a JSON array"))?;

    if lines.iter().all(JsonValue::is_object) && !lines.is_empty() {
        let mut header: Vec<String> = Vec::new();
        for rec in lines.iter().filter_map(JsonValue::as_object) {
            for key in rec.keys() {
                if !header.contains(key) {
                    header.push(key.clone());
                }
            }
        }
        let mut rows = vec![header.iter().map(|h| CellValue::String(h.clone())).collect()];
        for rec in lines.iter().filter_map(JsonValue::as_object) {
            rows.push(
                header
                    .iter()
                    .map(|key| rec.get(key).map(json_to_cell).unwrap_or(CellValue::Null))
                    .collect(),
            );
        }
        return Ok(Sheet::new(name, rows));
    }

    let rows = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            line.as_array()
                .map(|cells| cells.iter().map(json_to_cell).collect())
                .with_context(|| format!("Sheet '{name}', row {i}: expected an array"))
        })
        .collect::<Result<Vec<Vec<CellValue>>>>()?;
    Ok(Sheet::new(name, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every CSV line is a sheet row; header lines are not treated specially.
fn load_csv(name: &str, path: &Path) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }
    Ok(Sheet::new(name, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file as a sheet. The schema's field names form row 0.
///
/// Supported column types: Utf8 / LargeUtf8, Int32 / Int64, Float32 /
/// Float64, Boolean. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(name: &str, path: &Path) -> Result<Sheet> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let header: Vec<CellValue> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| CellValue::String(f.name().clone()))
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = vec![header];
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .zip(schema.fields().iter())
                .map(|(col, field)| {
                    extract_cell(col, row)
                        .with_context(|| format!("Row {row}: failed to read '{}'", field.name()))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }
    }
    Ok(Sheet::new(name, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(cell)
}
