use std::io::Write;

use crate::record::Line;
use crate::record_encoder::RecordEncoder;
use crate::{Error, Result};

/// A `RecordEncoder` that writes the tab-separated transcript format.
///
/// Passthrough lines are written verbatim, records with their converted text. Every
/// line is newline-terminated.
pub struct TsvEncoder<W: Write> {
    w: W,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> TsvEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> RecordEncoder for TsvEncoder<W> {
    fn write_line(&mut self, line: &Line) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write line: encoder is already closed"));
        }

        match line {
            Line::Passthrough(raw) => writeln!(&mut self.w, "{raw}")?,
            Line::Record(record) => writeln!(&mut self.w, "{}", record.to_line())?,
        }

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}
