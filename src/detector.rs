use tracing::debug;

use crate::columns::{column_centers, estimate_column_count};
use crate::error::Rejection;
use crate::geometry::{ImageSize, RecognizedWord, WordObservation, words_in_image_space};
use crate::grid::{Grid, build_grid};
use crate::options::DetectOptions;
use crate::rows::group_rows;
use crate::validate::validate_grid;

/// A word layout accepted as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTable {
    pub grid: Grid,
    /// Label of the source image, kept for diagnostics.
    pub source: Option<String>,
}

impl DetectedTable {
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn to_tsv(&self) -> String {
        self.grid.to_tsv()
    }
}

/// Reconstructs a table from OCR words, or `None` when the layout is not a table.
///
/// Every rejection reason collapses to `None`; use [`try_detect`] to see which
/// stage gave up.
#[must_use]
pub fn detect(
    words: &[RecognizedWord],
    image: ImageSize,
    options: &DetectOptions,
) -> Option<DetectedTable> {
    try_detect(words, image, options).ok()
}

pub fn try_detect(
    words: &[RecognizedWord],
    image: ImageSize,
    options: &DetectOptions,
) -> Result<DetectedTable, Rejection> {
    let observations = words_in_image_space(words, image);
    try_detect_observations(&observations, options)
}

/// Same pipeline for words already in top-left pixel space.
pub fn try_detect_observations(
    words: &[WordObservation],
    options: &DetectOptions,
) -> Result<DetectedTable, Rejection> {
    let result = run_pipeline(words, options);
    if let Err(rejection) = &result {
        debug!(words = words.len(), mode = ?options.mode, %rejection, "layout rejected as table");
    }
    result
}

fn run_pipeline(
    words: &[WordObservation],
    options: &DetectOptions,
) -> Result<DetectedTable, Rejection> {
    if words.is_empty() {
        return Err(Rejection::InputEmpty);
    }

    let rows = group_rows(words, options.mode.tolerance_scale());
    if rows.len() < options.thresholds.min_rows {
        return Err(Rejection::InsufficientRows { rows: rows.len() });
    }

    let estimated = estimate_column_count(&rows);
    if estimated < options.thresholds.min_columns {
        return Err(Rejection::InsufficientColumns { columns: estimated });
    }

    let centers = column_centers(&rows, estimated);
    if centers.len() < options.thresholds.min_columns {
        return Err(Rejection::InsufficientColumns {
            columns: centers.len(),
        });
    }

    let grid = build_grid(&rows, &centers);
    validate_grid(&grid, &options.thresholds)?;

    debug!(
        rows = grid.row_count(),
        columns = grid.column_count(),
        "table detected"
    );
    Ok(DetectedTable { grid, source: None })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{detect, try_detect, try_detect_observations};
    use crate::error::Rejection;
    use crate::geometry::{ImageSize, NormalizedBox, Rect, RecognizedWord, WordObservation};
    use crate::grid::Grid;
    use crate::options::{DetectOptions, TableThresholds};

    fn observed(text: &str, mid_x: f64, mid_y: f64) -> WordObservation {
        WordObservation::new(
            text,
            Rect {
                x: mid_x - 5.0,
                y: mid_y - 5.0,
                width: 10.0,
                height: 10.0,
            },
        )
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            try_detect_observations(&[], &DetectOptions::default()),
            Err(Rejection::InputEmpty)
        );
    }

    #[test]
    fn normalized_words_flow_through_geometry() {
        // 100x100 image: a 2x2 grid with rows near the top of the image.
        let cell = |text: &str, min_x: f64, min_y: f64| {
            RecognizedWord::new(
                text,
                NormalizedBox {
                    min_x,
                    min_y,
                    width: 0.1,
                    height: 0.1,
                },
            )
        };
        let words = vec![
            cell("c", 0.1, 0.5),
            cell("d", 0.6, 0.5),
            cell("a", 0.1, 0.8),
            cell("b", 0.6, 0.8),
        ];
        let table = try_detect(&words, ImageSize::new(100.0, 100.0), &DetectOptions::default())
            .expect("table should be detected");
        assert_eq!(table.grid.rows(), &[vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn detect_hides_rejection_reason() {
        let words = vec![observed("only", 10.0, 10.0)];
        let rejected = try_detect_observations(&words, &DetectOptions::default());
        assert_eq!(rejected, Err(Rejection::InsufficientRows { rows: 1 }));
        assert!(detect(&[], ImageSize::new(10.0, 10.0), &DetectOptions::default()).is_none());
    }

    #[test]
    fn collapsed_centers_are_rejected() {
        // Two words per row stacked on the same x: k-means cannot separate them.
        let words = vec![
            observed("a", 40.0, 10.0),
            observed("b", 40.0, 12.0),
            observed("c", 40.0, 40.0),
            observed("d", 40.0, 42.0),
        ];
        assert_eq!(
            try_detect_observations(&words, &DetectOptions::default()),
            Err(Rejection::InsufficientColumns { columns: 1 })
        );
    }

    #[test]
    fn source_label_is_attached_on_request() {
        let words = vec![
            observed("a", 10.0, 10.0),
            observed("b", 50.0, 10.0),
            observed("c", 10.0, 40.0),
            observed("d", 50.0, 40.0),
        ];
        let table = try_detect_observations(&words, &DetectOptions::default())
            .expect("table should be detected")
            .with_source("scan.png");
        assert_eq!(table.source.as_deref(), Some("scan.png"));
        assert_eq!(table.to_tsv(), "a\tb\nc\td");
    }

    #[test]
    fn single_column_table_with_blank_last_row_reparses() {
        let options = DetectOptions {
            thresholds: TableThresholds {
                min_columns: 1,
                min_non_empty_cells: 1,
                ..TableThresholds::default()
            },
            ..DetectOptions::default()
        };
        let words = vec![
            observed("a", 40.0, 10.0),
            observed("b", 40.0, 40.0),
            observed("  ", 40.0, 70.0),
        ];
        let table = try_detect_observations(&words, &options).expect("table should be detected");
        assert_eq!(table.grid.rows(), &[vec!["a"], vec!["b"], vec![""]]);
        assert_eq!(Grid::from_tsv(&table.to_tsv()), table.grid);
    }
}
