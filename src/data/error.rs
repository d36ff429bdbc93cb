use thiserror::Error;

/// Coarse error classes surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedHeader,
    MissingSheet,
    Unexpected,
}

/// Everything that can terminate a filtering request.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The range sheet does not carry the names / min / max rows.
    #[error(
        "{sheet} sheet must have at least 3 rows: Element names (row 1), Min (row 2), Max (row 3); found {found}"
    )]
    MalformedHeader { sheet: String, found: usize },

    #[error("workbook has no sheet named '{0}'")]
    MissingSheet(String),

    #[error("sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: String },

    /// A cell that must be numeric holds something else.
    #[error("{location}: '{value}' is not a number")]
    InvalidNumber { location: String, value: String },

    #[error("{0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl FilterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::MalformedHeader { .. } => ErrorKind::MalformedHeader,
            FilterError::MissingSheet(_) => ErrorKind::MissingSheet,
            FilterError::MissingColumn { .. }
            | FilterError::InvalidNumber { .. }
            | FilterError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

pub type FilterResult<T> = Result<T, FilterError>;
