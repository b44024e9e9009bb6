use std::str::FromStr;

pub const DEFAULT_MIN_ROWS: usize = 2;
pub const DEFAULT_MIN_COLUMNS: usize = 2;
pub const DEFAULT_MIN_NON_EMPTY_CELLS: usize = 4;

/// Row grouping strictness. `Fast` merges more generously than `Strict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectMode {
    #[default]
    Fast,
    Strict,
}

impl DetectMode {
    /// Multiplier applied to the median word height to get the row tolerance.
    #[must_use]
    pub const fn tolerance_scale(self) -> f64 {
        match self {
            Self::Fast => 0.65,
            Self::Strict => 0.45,
        }
    }
}

impl FromStr for DetectMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown detect mode '{other}', expected fast or strict")),
        }
    }
}

/// Acceptance thresholds for a reconstructed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableThresholds {
    pub min_rows: usize,
    pub min_columns: usize,
    pub min_non_empty_cells: usize,
}

impl Default for TableThresholds {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_MIN_ROWS,
            min_columns: DEFAULT_MIN_COLUMNS,
            min_non_empty_cells: DEFAULT_MIN_NON_EMPTY_CELLS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectOptions {
    pub mode: DetectMode,
    pub thresholds: TableThresholds,
}

impl DetectOptions {
    #[must_use]
    pub fn with_mode(mode: DetectMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format '{other}', expected tsv or csv")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub detect: DetectOptions,
    pub format: OutputFormat,
    /// Field delimiter for CSV output. Ignored for TSV.
    pub delimiter: u8,
    /// Overrides the `source` label carried by the OCR document.
    pub source_label: Option<String>,
    /// Write reading-order text when no table is detected.
    pub fallback_text: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            detect: DetectOptions::default(),
            format: OutputFormat::Tsv,
            delimiter: b',',
            source_label: None,
            fallback_text: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DetectMode, DetectOptions, OutputFormat, TableThresholds};
    use std::str::FromStr;

    #[test]
    fn parse_detect_mode_case_insensitive() {
        assert_eq!(DetectMode::from_str("Fast"), Ok(DetectMode::Fast));
        assert_eq!(DetectMode::from_str(" strict "), Ok(DetectMode::Strict));
    }

    #[test]
    fn reject_unknown_detect_mode() {
        let err = DetectMode::from_str("loose").expect_err("unknown mode should fail");
        assert!(err.contains("unknown detect mode"));
    }

    #[test]
    fn strict_mode_uses_tighter_tolerance() {
        assert!(DetectMode::Strict.tolerance_scale() < DetectMode::Fast.tolerance_scale());
    }

    #[test]
    fn default_thresholds_match_acceptance_rules() {
        let thresholds = TableThresholds::default();
        assert_eq!(thresholds.min_rows, 2);
        assert_eq!(thresholds.min_columns, 2);
        assert_eq!(thresholds.min_non_empty_cells, 4);
        assert_eq!(DetectOptions::default().mode, DetectMode::Fast);
    }

    #[test]
    fn parse_output_format() {
        assert_eq!(OutputFormat::from_str("CSV"), Ok(OutputFormat::Csv));
        assert!(OutputFormat::from_str("xlsx").is_err());
    }
}
