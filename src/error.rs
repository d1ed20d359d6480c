use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between reading a table and producing an image.
#[derive(Debug, Error)]
pub enum DotPlotError {
    /// One or more of the required columns is absent. Names are listed in
    /// canonical order (track, grade, outcome).
    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A grade cell could not be read as a number. `row` is 1-based over data rows.
    #[error("row {row}: grade {value:?} is not a number")]
    InvalidGrade { row: usize, value: String },

    #[error("unsupported input format: {0:?} (expected .csv, .json or .xlsx)")]
    UnsupportedFormat(String),

    #[error("input is neither UTF-8 nor CP949 text")]
    Encoding,

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook has no worksheets")]
    EmptyWorkbook,

    #[error("font {}: {reason}", .path.display())]
    Font { path: PathBuf, reason: String },

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

impl DotPlotError {
    /// Map any plotters drawing error (they only implement `Debug` uniformly).
    pub(crate) fn render<E: std::fmt::Debug>(e: E) -> Self {
        DotPlotError::Render(format!("{e:?}"))
    }
}

pub type Result<T> = std::result::Result<T, DotPlotError>;
