use std::io;

use thiserror::Error;

/// Why a word layout was not accepted as a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no words supplied")]
    InputEmpty,

    #[error("only {rows} row(s) found")]
    InsufficientRows { rows: usize },

    #[error("only {columns} column(s) found")]
    InsufficientColumns { columns: usize },

    #[error("only {non_empty} non-empty cell(s) found")]
    InsufficientContent { non_empty: usize },
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse OCR document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: f64, height: f64 },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}
