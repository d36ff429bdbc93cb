use std::io::Write;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::error::FilterResult;
use super::filter::{filter_catalog_with, FilteredResult, AIM_CATEGORY};
use super::model::{Catalog, CellValue, Sheet, Workbook, PSN_GRADE, PSN_NO};
use super::range::{build_range_set, RangeSet};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Names the request reads from the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Sheet holding the PSN catalog.
    pub catalog_sheet: String,
    /// Sheet holding the names / min / max block.
    pub header_sheet: String,
    /// `SPEC` value of the rows eligible for matching.
    pub category: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            catalog_sheet: "PSN_DATA".to_string(),
            header_sheet: "Dashboard".to_string(),
            category: AIM_CATEGORY.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Outcome of one filtering request.
#[derive(Debug, Clone)]
pub struct FilterReport {
    pub ranges: RangeSet,
    /// Rows in the catalog sheet.
    pub catalog_rows: usize,
    /// Rows carrying the configured category.
    pub category_rows: usize,
    pub result: FilteredResult,
}

/// Run a request against a loaded workbook. Both sheets are looked up
/// before anything is parsed.
pub fn run(workbook: &Workbook, config: &MatchConfig) -> FilterResult<FilterReport> {
    let catalog = workbook.sheet(&config.catalog_sheet)?;
    let header = workbook.sheet(&config.header_sheet)?;
    evaluate(catalog, header, config)
}

/// Build the range set from `header` and filter `catalog` with it.
pub fn evaluate(
    catalog: &Sheet,
    header: &Sheet,
    config: &MatchConfig,
) -> FilterResult<FilterReport> {
    let ranges = build_range_set(header)?;
    let catalog = Catalog::from_sheet(catalog)?;
    let result = filter_catalog_with(&catalog, &ranges, &config.category)?;

    let category_rows = catalog
        .rows
        .iter()
        .filter(|r| r.spec.as_deref() == Some(config.category.as_str()))
        .count();

    log::info!(
        "{} of {} {} rows match {} element range(s)",
        result.len(),
        category_rows,
        config.category,
        ranges.len()
    );

    Ok(FilterReport {
        ranges,
        catalog_rows: catalog.len(),
        category_rows,
        result,
    })
}

impl FilterReport {
    /// `PSN_NO`, `PSN_Grade`, then every range element in range order.
    pub fn display_columns(&self) -> Vec<String> {
        [PSN_NO, PSN_GRADE]
            .into_iter()
            .map(str::to_string)
            .chain(self.ranges.elements().map(str::to_string))
            .collect()
    }

    /// Result rows as text, aligned with [`display_columns`](Self::display_columns).
    /// Absent values render as empty cells.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let columns = self.display_columns();
        self.result
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| row.get(col).unwrap_or(CellValue::Null).to_string())
                    .collect()
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        if self.result.is_empty() {
            "No matches found. Try adjusting the Min/Max values.".to_string()
        } else {
            format!("{} matching PSNs found", self.result.len())
        }
    }

    /// Write the display table as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(self.display_columns())
            .context("writing CSV header")?;
        for row in self.display_rows() {
            out.write_record(&row).context("writing CSV row")?;
        }
        out.flush().context("flushing CSV")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_fixed_sheet_names() {
        let config = MatchConfig::default();
        assert_eq!(config.catalog_sheet, "PSN_DATA");
        assert_eq!(config.header_sheet, "Dashboard");
        assert_eq!(config.category, "AIM");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: MatchConfig = serde_json::from_str(r#"{"header_sheet": "Ranges"}"#).unwrap();
        assert_eq!(config.header_sheet, "Ranges");
        assert_eq!(config.catalog_sheet, "PSN_DATA");
    }
}
