use crate::detector::{DetectedTable, try_detect_observations};
use crate::error::Rejection;
use crate::geometry::{ImageSize, RecognizedWord, WordObservation, words_in_image_space};
use crate::grid::normalize_cell_text;
use crate::options::DetectOptions;
use crate::rows::group_rows;

/// Result of reading one OCR capture: a table when the layout supports it,
/// reading-order text otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Table(DetectedTable),
    Text {
        text: String,
        rejection: Rejection,
    },
}

impl Extraction {
    /// Whether the capture should be offered as a spreadsheet.
    #[must_use]
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }

    #[must_use]
    pub fn table(&self) -> Option<&DetectedTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::Text { .. } => None,
        }
    }

    /// TSV for tables, plain lines for text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Table(table) => table.to_tsv(),
            Self::Text { text, .. } => text.clone(),
        }
    }
}

/// Words in reading order: one line per row, words separated by a space.
#[must_use]
pub fn reading_order_text(words: &[WordObservation], options: &DetectOptions) -> String {
    group_rows(words, options.mode.tolerance_scale())
        .iter()
        .map(|row| {
            row.iter()
                .map(|word| normalize_cell_text(&word.text))
                .filter(|fragment| !fragment.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn extract(
    words: &[RecognizedWord],
    image: ImageSize,
    options: &DetectOptions,
) -> Extraction {
    let observations = words_in_image_space(words, image);
    match try_detect_observations(&observations, options) {
        Ok(table) => Extraction::Table(table),
        Err(rejection) => Extraction::Text {
            text: reading_order_text(&observations, options),
            rejection,
        },
    }
}
