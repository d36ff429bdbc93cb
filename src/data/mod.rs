//! Data layer: workbook loading, range parsing, and chemistry matching.
//!
//! Architecture:
//! ```text
//!  .xlsx / .ods workbook, .json workbook, or a folder of .csv / .json / .parquet sheets
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse files → Workbook (named Sheets)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  range    │  Dashboard sheet → RangeSet
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  Catalog + RangeSet → FilteredResult (AIM rows in range)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  report   │  FilterReport → display columns / CSV
//!   └──────────┘
//! ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod range;
pub mod report;

pub use error::{ErrorKind, FilterError, FilterResult};
pub use filter::{filter_catalog, filter_catalog_with, row_matches, FilteredResult, AIM_CATEGORY};
pub use model::{Catalog, CatalogRow, CellValue, Sheet, Workbook};
pub use range::{build_range_set, Bound, RangeEntry, RangeSet};
pub use report::{evaluate, run, FilterReport, MatchConfig};

use std::path::Path;

/// Load the workbook at `path` and run one filtering request over it.
pub fn run_path(path: &Path, config: &MatchConfig) -> FilterResult<FilterReport> {
    let workbook = loader::load_workbook(path)?;
    log::info!(
        "Loaded workbook {} with sheets {:?}",
        path.display(),
        workbook.sheet_names()
    );
    run(&workbook, config)
}
