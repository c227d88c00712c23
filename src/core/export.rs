use crate::adapters::storage::write_creating_dirs;
use crate::domain::model::{GeoTable, TimestampFormat};
use crate::utils::error::{EtlError, Result};
use std::path::Path;

/// Serializes the attribute columns of `table` as CSV. Geometry is not
/// representable and is left out, as is any row index.
pub fn to_csv_bytes(table: &GeoTable) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(table.columns())?;

    let formats: Vec<TimestampFormat> = (0..table.columns().len())
        .map(|idx| TimestampFormat::for_cells(table.rows().iter().map(|row| &row.cells[idx])))
        .collect();

    for row in table.rows() {
        wtr.write_record(
            row.cells
                .iter()
                .zip(&formats)
                .map(|(cell, format)| cell.render(*format)),
        )?;
    }

    wtr.into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Writes `table` to `path` as CSV, creating parent directories and
/// overwriting an existing file.
pub fn export_to_csv(table: &GeoTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = to_csv_bytes(table)?;
    tracing::info!(path = %path.display(), rows = table.len(), "Writing CSV");
    write_creating_dirs(path, &data)
}
