mod columns;
mod detector;
mod error;
mod export;
mod extract;
mod geometry;
mod grid;
mod input;
mod options;
mod rows;
mod stats;
mod validate;

use std::path::Path;

use crate::export::{write_csv, write_csv_to_string};
use crate::input::read_ocr_document;

pub use columns::{KMEANS_MAX_ITERATIONS, column_centers, estimate_column_count, kmeans_1d};
pub use detector::{DetectedTable, detect, try_detect, try_detect_observations};
pub use error::{ConvertError, Rejection};
pub use extract::{Extraction, extract, reading_order_text};
pub use geometry::{
    ImageSize, NormalizedBox, Rect, RecognizedWord, WordObservation, to_image_space,
    words_in_image_space,
};
pub use grid::{Grid, build_grid, normalize_cell_text};
pub use input::{OcrDocument, parse_ocr_document};
pub use options::{
    ConvertOptions, DEFAULT_MIN_COLUMNS, DEFAULT_MIN_NON_EMPTY_CELLS, DEFAULT_MIN_ROWS,
    DetectMode, DetectOptions, OutputFormat, TableThresholds,
};
pub use rows::{Row, group_rows};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub is_table: bool,
    pub row_count: usize,
    pub column_count: usize,
    pub non_empty_cells: usize,
    pub rejection: Option<Rejection>,
    pub source: Option<String>,
}

impl ConversionReport {
    fn from_extraction(extraction: &Extraction, source: Option<String>) -> Self {
        match extraction {
            Extraction::Table(table) => Self {
                is_table: true,
                row_count: table.grid.row_count(),
                column_count: table.grid.column_count(),
                non_empty_cells: table.grid.non_empty_cells(),
                rejection: None,
                source,
            },
            Extraction::Text { rejection, .. } => Self {
                is_table: false,
                row_count: 0,
                column_count: 0,
                non_empty_cells: 0,
                rejection: Some(*rejection),
                source,
            },
        }
    }

    /// Whether the conversion produced anything worth writing.
    #[must_use]
    pub fn has_output(&self, options: &ConvertOptions) -> bool {
        self.is_table || options.fallback_text
    }
}

fn validate_options(options: &ConvertOptions) -> Result<(), ConvertError> {
    let thresholds = &options.detect.thresholds;
    if thresholds.min_rows < 2 {
        return Err(ConvertError::InvalidOption(
            "min_rows must be at least 2".to_string(),
        ));
    }
    if thresholds.min_columns < 2 {
        return Err(ConvertError::InvalidOption(
            "min_columns must be at least 2".to_string(),
        ));
    }
    if !options.delimiter.is_ascii() || matches!(options.delimiter, b'"' | b'\n' | b'\r') {
        return Err(ConvertError::InvalidOption(format!(
            "unusable delimiter byte 0x{:02x}",
            options.delimiter
        )));
    }
    Ok(())
}

fn extract_document(
    document: &OcrDocument,
    options: &ConvertOptions,
) -> (Extraction, ConversionReport) {
    let source = options
        .source_label
        .clone()
        .or_else(|| document.source.clone());

    let mut extraction = extract(&document.words, document.image, &options.detect);
    if let (Extraction::Table(table), Some(label)) = (&mut extraction, &source) {
        table.source = Some(label.clone());
    }

    let report = ConversionReport::from_extraction(&extraction, source);
    (extraction, report)
}

fn render(extraction: &Extraction, options: &ConvertOptions) -> Result<String, ConvertError> {
    match (extraction, options.format) {
        (Extraction::Table(table), OutputFormat::Csv) => {
            write_csv_to_string(&table.grid, options.delimiter)
        }
        (Extraction::Table(_), OutputFormat::Tsv) => Ok(extraction.to_text()),
        (Extraction::Text { .. }, _) if options.fallback_text => Ok(extraction.to_text()),
        (Extraction::Text { .. }, _) => Ok(String::new()),
    }
}

/// Reads an OCR JSON document and writes the detected table to `output`.
///
/// Nothing is written when no table is found, unless
/// [`ConvertOptions::fallback_text`] asks for reading-order text.
pub fn convert_ocr_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    validate_options(options)?;

    let document = read_ocr_document(input)?;
    let (extraction, report) = extract_document(&document, options);
    if !report.has_output(options) {
        return Ok(report);
    }

    match (&extraction, options.format) {
        (Extraction::Table(table), OutputFormat::Csv) => {
            write_csv(output, &table.grid, options.delimiter)?;
        }
        _ => std::fs::write(output, render(&extraction, options)?)?,
    }

    Ok(report)
}

pub fn convert_ocr_json_to_string(
    json: &str,
    options: &ConvertOptions,
) -> Result<(String, ConversionReport), ConvertError> {
    validate_options(options)?;

    let document = parse_ocr_document(json)?;
    let (extraction, report) = extract_document(&document, options);
    let rendered = render(&extraction, options)?;
    Ok((rendered, report))
}
