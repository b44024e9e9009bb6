use crate::geometry::WordObservation;
use crate::stats::median;

const MIN_MEDIAN_HEIGHT: f64 = 8.0;
const MIN_ROW_TOLERANCE: f64 = 6.0;

/// Words judged to share a text line, ordered left to right.
pub type Row = Vec<WordObservation>;

pub(crate) fn row_tolerance(words: &[WordObservation], tolerance_scale: f64) -> f64 {
    let heights = words.iter().map(|word| word.rect.height).collect::<Vec<_>>();
    let median_height = median(&heights).max(MIN_MEDIAN_HEIGHT);
    (median_height * tolerance_scale).max(MIN_ROW_TOLERANCE)
}

/// Groups words into rows by vertical center.
///
/// A word joins the current row while its vertical center stays within the
/// tolerance of the row's first word. Comparing against that anchor, and not a
/// running average, keeps slightly offset words from dragging the row downward.
#[must_use]
pub fn group_rows(words: &[WordObservation], tolerance_scale: f64) -> Vec<Row> {
    if words.is_empty() {
        return Vec::new();
    }

    let tolerance = row_tolerance(words, tolerance_scale);
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| a.rect.mid_y().total_cmp(&b.rect.mid_y()));

    let mut rows: Vec<Row> = Vec::new();
    for word in sorted {
        let joins_current = rows
            .last()
            .and_then(|row| row.first())
            .is_some_and(|anchor| (word.rect.mid_y() - anchor.rect.mid_y()).abs() <= tolerance);

        match rows.last_mut() {
            Some(row) if joins_current => row.push(word),
            _ => rows.push(vec![word]),
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.rect.min_x().total_cmp(&b.rect.min_x()));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::{group_rows, row_tolerance};
    use crate::geometry::{Rect, WordObservation};

    fn word(text: &str, x: f64, y: f64, height: f64) -> WordObservation {
        WordObservation::new(
            text,
            Rect {
                x,
                y,
                width: 20.0,
                height,
            },
        )
    }

    fn texts(row: &[WordObservation]) -> Vec<&str> {
        row.iter().map(|word| word.text.as_str()).collect()
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(group_rows(&[], 0.65).is_empty());
    }

    #[test]
    fn tolerance_floors_apply_to_tiny_words() {
        let words = vec![word("a", 0.0, 0.0, 2.0), word("b", 0.0, 10.0, 2.0)];
        assert_eq!(row_tolerance(&words, 0.45), 6.0);
        assert_eq!(row_tolerance(&words, 1.0), 8.0);
    }

    #[test]
    fn groups_by_vertical_center_and_sorts_left_to_right() {
        let words = vec![
            word("B", 60.0, 2.0, 20.0),
            word("D", 60.0, 50.0, 20.0),
            word("A", 10.0, 0.0, 20.0),
            word("C", 10.0, 51.0, 20.0),
        ];
        let rows = group_rows(&words, 0.65);
        assert_eq!(rows.len(), 2);
        assert_eq!(texts(&rows[0]), vec!["A", "B"]);
        assert_eq!(texts(&rows[1]), vec!["C", "D"]);
    }

    #[test]
    fn anchor_comparison_prevents_drift() {
        // Steps of 8 px stay inside the 13 px tolerance; the third word is 16 px
        // below the anchor.
        let words = vec![
            word("a", 0.0, 0.0, 20.0),
            word("b", 30.0, 8.0, 20.0),
            word("c", 60.0, 16.0, 20.0),
        ];
        let rows = group_rows(&words, 0.65);
        assert_eq!(rows.len(), 2);
        assert_eq!(texts(&rows[0]), vec!["a", "b"]);
        assert_eq!(texts(&rows[1]), vec!["c"]);
    }

    #[test]
    fn strict_mode_splits_what_fast_mode_merges() {
        let words = vec![word("a", 0.0, 0.0, 20.0), word("b", 30.0, 11.0, 20.0)];
        assert_eq!(group_rows(&words, 0.65).len(), 1);
        assert_eq!(group_rows(&words, 0.45).len(), 2);
    }
}
