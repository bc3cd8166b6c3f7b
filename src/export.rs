//! CSV export of the merged table.

use crate::error::ExportError;
use crate::model::Frame;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `frame` as comma separated UTF-8 with a byte-order marker.
///
/// Null cells are written as empty fields.
pub fn write_csv(frame: &Frame, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    write_to(frame, BufWriter::new(file))
}

pub fn write_to<W: Write>(frame: &Frame, mut writer: W) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(frame.columns())?;
    for row in frame.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    csv_writer.flush()?;
    Ok(())
}
