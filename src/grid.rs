use std::fmt::{Display, Formatter};

use crate::columns::nearest_center;
use crate::rows::Row;

/// Rectangular table of cell strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Builds a grid from row vectors, padding short rows with empty cells.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { rows }
    }

    /// Parses tab-separated text: one row per line, cells split on tabs.
    /// Only the empty string yields an empty grid; blank lines are rows.
    #[must_use]
    pub fn from_tsv(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let rows = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect();
        Self::from_rows(rows)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count, read from the first row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    #[must_use]
    pub fn non_empty_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.trim().is_empty())
            .count()
    }

    #[must_use]
    pub fn to_tsv(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn column_is_empty(&self, column: usize) -> bool {
        self.rows
            .iter()
            .all(|row| row.get(column).is_none_or(|cell| cell.trim().is_empty()))
    }

    /// Drops fully empty leading and trailing columns. A grid with no
    /// non-empty column at all is returned unchanged.
    #[must_use]
    pub fn trim_empty_outer_columns(self) -> Self {
        let columns = self.column_count();
        if columns == 0 {
            return self;
        }

        let Some(left) = (0..columns).find(|&column| !self.column_is_empty(column)) else {
            return self;
        };
        let right = (left..columns)
            .rev()
            .find(|&column| !self.column_is_empty(column))
            .unwrap_or(left);

        if left == 0 && right == columns - 1 {
            return self;
        }

        let rows = self
            .rows
            .into_iter()
            .map(|row| row[left..=right].to_vec())
            .collect();
        Self { rows }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_tsv())
    }
}

/// Collapses every whitespace run (tabs and newlines included) to one space.
#[must_use]
pub fn normalize_cell_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Places each word into the cell of its nearest column center, joining words
/// that share a cell with a single space, then trims empty outer columns.
#[must_use]
pub fn build_grid(rows: &[Row], centers: &[f64]) -> Grid {
    let width = centers.len();
    let mut cells = vec![vec![String::new(); width]; rows.len()];

    if width > 0 {
        for (cells_row, row) in cells.iter_mut().zip(rows) {
            for word in row {
                let fragment = normalize_cell_text(&word.text);
                if fragment.is_empty() {
                    continue;
                }

                let cell = &mut cells_row[nearest_center(centers, word.rect.mid_x())];
                if !cell.is_empty() {
                    cell.push(' ');
                }
                cell.push_str(&fragment);
            }
        }
    }

    Grid { rows: cells }.trim_empty_outer_columns()
}
