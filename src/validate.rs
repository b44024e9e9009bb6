use crate::error::Rejection;
use crate::grid::Grid;
use crate::options::TableThresholds;

pub(crate) fn validate_grid(grid: &Grid, thresholds: &TableThresholds) -> Result<(), Rejection> {
    if grid.row_count() < thresholds.min_rows {
        return Err(Rejection::InsufficientRows {
            rows: grid.row_count(),
        });
    }

    if grid.column_count() < thresholds.min_columns {
        return Err(Rejection::InsufficientColumns {
            columns: grid.column_count(),
        });
    }

    let non_empty = grid.non_empty_cells();
    if non_empty < thresholds.min_non_empty_cells {
        return Err(Rejection::InsufficientContent { non_empty });
    }

    Ok(())
}
