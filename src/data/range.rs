use std::fmt;

use super::error::{FilterError, FilterResult};
use super::model::Sheet;

/// Rows a range sheet must provide: names, minimums, maximums.
pub const HEADER_ROWS: usize = 3;

/// One side of a range. `None` means the side is unconstrained.
pub type Bound = Option<f64>;

// ---------------------------------------------------------------------------
// RangeEntry / RangeSet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntry {
    pub element: String,
    pub min: Bound,
    pub max: Bound,
}

impl RangeEntry {
    pub fn new(element: impl Into<String>, min: Bound, max: Bound) -> Self {
        RangeEntry {
            element: element.into(),
            min,
            max,
        }
    }

    /// Inclusive check of a present value against both bounds.
    pub fn admits(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Element ranges in first-seen order. Element names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSet {
    entries: Vec<RangeEntry>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An existing element keeps its position but
    /// takes the new bounds.
    pub fn insert(&mut self, entry: RangeEntry) {
        match self.entries.iter_mut().find(|e| e.element == entry.element) {
            Some(existing) => {
                log::warn!(
                    "Element '{}' listed more than once; later bounds replace earlier ones",
                    entry.element
                );
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, element: &str) -> Option<&RangeEntry> {
        self.entries.iter().find(|e| e.element == element)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RangeEntry> {
        self.entries.iter()
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.element.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose minimum exceeds their maximum. Such an entry rejects
    /// every row that carries a value for its element.
    pub fn inverted(&self) -> Vec<&RangeEntry> {
        self.entries
            .iter()
            .filter(|e| matches!((e.min, e.max), (Some(lo), Some(hi)) if lo > hi))
            .collect()
    }

    /// `(element, min, max)` rows ready for display; absent bounds are empty.
    pub fn table(&self) -> Vec<[String; 3]> {
        self.entries
            .iter()
            .map(|e| [e.element.clone(), format_bound(e.min), format_bound(e.max)])
            .collect()
    }
}

impl FromIterator<RangeEntry> for RangeSet {
    fn from_iter<I: IntoIterator<Item = RangeEntry>>(iter: I) -> Self {
        let mut set = RangeSet::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} {:>10} {:>10}", "", "Min", "Max")?;
        for [element, min, max] in self.table() {
            writeln!(f, "{element:<10} {min:>10} {max:>10}")?;
        }
        Ok(())
    }
}

pub fn format_bound(bound: Bound) -> String {
    bound.map(|v| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build a [`RangeSet`] from a header block sheet.
///
/// Row 1 holds element names, row 2 minimums and row 3 maximums, all read
/// from the second column on (the first column is a row label). Columns
/// without a name are skipped; blank bound cells leave that side open.
pub fn build_range_set(sheet: &Sheet) -> FilterResult<RangeSet> {
    if sheet.len() < HEADER_ROWS {
        return Err(FilterError::MalformedHeader {
            sheet: sheet.name.clone(),
            found: sheet.len(),
        });
    }

    let mut set = RangeSet::new();
    for col in 1..sheet.width() {
        let Some(element) = sheet.cell(0, col).as_text() else {
            continue;
        };
        let min = parse_bound(sheet, 1, col)?;
        let max = parse_bound(sheet, 2, col)?;
        set.insert(RangeEntry { element, min, max });
    }

    for entry in set.inverted() {
        log::warn!(
            "Range for '{}' is inverted (min {:?} > max {:?}); no value can satisfy it",
            entry.element,
            entry.min,
            entry.max
        );
    }
    Ok(set)
}

fn parse_bound(sheet: &Sheet, row: usize, col: usize) -> FilterResult<Bound> {
    let cell = sheet.cell(row, col);
    if cell.is_blank() {
        return Ok(None);
    }
    match cell.as_number() {
        Some(v) if v.is_nan() => Ok(None),
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(FilterError::InvalidNumber {
            location: format!("{} row {}, column {}", sheet.name, row + 1, col + 1),
            value: cell.to_string(),
        }),
    }
}
