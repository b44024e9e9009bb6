use std::io::{self, Write};
use std::path::Path;

use csv::WriterBuilder;

use crate::error::ConvertError;
use crate::grid::Grid;

fn write_records<W: Write>(writer: &mut csv::Writer<W>, grid: &Grid) -> Result<(), ConvertError> {
    for row in grid.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, grid: &Grid, delimiter: u8) -> Result<(), ConvertError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_path(path)?;
    write_records(&mut writer, grid)
}

pub fn write_csv_to_string(grid: &Grid, delimiter: u8) -> Result<String, ConvertError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::<u8>::new());
    write_records(&mut writer, grid)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ConvertError::Csv(error.into_error().into()))?;
    String::from_utf8(bytes)
        .map_err(|error| ConvertError::Io(io::Error::new(io::ErrorKind::InvalidData, error)))
}
