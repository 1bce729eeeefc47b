use std::io::Write;

use crate::error::{Error, Result};
use crate::package::PackageRecord;

use super::Emitter;

const STREAM_LABEL: &str = "<output stream>";

/// Print records as a JSON array, keeping only the first `limit` when given.
/// A limit of zero prints every record.
pub fn print_records<W: Write>(
    writer: &mut W,
    records: &[PackageRecord],
    limit: Option<usize>,
) -> Result<()> {
    let shown = match limit {
        Some(n) if n > 0 => &records[..n.min(records.len())],
        _ => records,
    };
    serde_json::to_writer(&mut *writer, shown)?;
    writeln!(writer).map_err(|e| Error::io(STREAM_LABEL, e))
}

/// Prints each root set as one line of JSON.
pub struct JsonPrinter<W: Write> {
    writer: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Emitter for JsonPrinter<W> {
    fn emit(&mut self, roots: &[String]) -> Result<()> {
        serde_json::to_writer(&mut self.writer, roots)?;
        writeln!(self.writer).map_err(|e| Error::io(STREAM_LABEL, e))?;
        self.writer.flush().map_err(|e| Error::io(STREAM_LABEL, e))
    }
}
