use super::error::{FilterError, FilterResult};
use super::model::{Catalog, CatalogRow};
use super::range::RangeSet;

/// Category tag of the rows eligible for chemistry matching.
pub const AIM_CATEGORY: &str = "AIM";

/// Catalog rows that passed the category filter and every range check,
/// in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredResult {
    pub rows: Vec<CatalogRow>,
    /// Index of each row in the source catalog (strictly increasing).
    pub source_rows: Vec<usize>,
}

impl FilteredResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Whether a row satisfies every range in `ranges`.
///
/// A row passes an element when:
/// * the row has no value for that element → passes (absence never disqualifies)
/// * the value is below a defined `min` → fails
/// * the value is above a defined `max` → fails
///
/// A present but non-numeric value is an error rather than a pass.
pub fn row_matches(row: &CatalogRow, ranges: &RangeSet) -> FilterResult<bool> {
    for entry in ranges.iter() {
        let Some(value) = element_value(row, &entry.element)? else {
            continue;
        };
        if !entry.admits(value) {
            log::debug!(
                "PSN {} rejected: {} = {value} outside [{:?}, {:?}]",
                row.psn_no,
                entry.element,
                entry.min,
                entry.max
            );
            return Ok(false);
        }
    }
    Ok(true)
}

/// Filter `catalog` to the AIM rows matching `ranges`.
pub fn filter_catalog(catalog: &Catalog, ranges: &RangeSet) -> FilterResult<FilteredResult> {
    filter_catalog_with(catalog, ranges, AIM_CATEGORY)
}

/// Filter `catalog` to the rows tagged `category` that match `ranges`.
pub fn filter_catalog_with(
    catalog: &Catalog,
    ranges: &RangeSet,
    category: &str,
) -> FilterResult<FilteredResult> {
    let mut result = FilteredResult::default();
    for (idx, row) in catalog.rows.iter().enumerate() {
        if row.spec.as_deref() != Some(category) {
            continue;
        }
        if row_matches(row, ranges)? {
            result.rows.push(row.clone());
            result.source_rows.push(idx);
        }
    }
    Ok(result)
}

fn element_value(row: &CatalogRow, element: &str) -> FilterResult<Option<f64>> {
    let Some(cell) = row.get(element) else {
        return Ok(None);
    };
    if cell.is_blank() {
        return Ok(None);
    }
    match cell.as_number() {
        Some(v) if v.is_nan() => Ok(None),
        Some(v) => Ok(Some(v)),
        None => Err(FilterError::InvalidNumber {
            location: format!("PSN {} column {element}", row.psn_no),
            value: cell.to_string(),
        }),
    }
}
