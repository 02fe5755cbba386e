use std::io::Write;

use crate::record::Line;
use crate::record_encoder::RecordEncoder;
use crate::{Error, Result};

/// A `RecordEncoder` that writes records as a single JSON array.
///
/// Design:
/// - We stream output directly to a `Write` implementation to avoid buffering
///   a whole transcript in memory.
/// - The encoder is stateful so we can emit a well-formed JSON array incrementally.
/// - Passthrough lines (comments, blanks) have no JSON representation and are skipped.
///
/// Example output:
/// ```json
/// [
///   { "filename": "file1", "line_number": "1", "status": "OK", "text": "He said" }
/// ]
/// ```
pub struct JsonArrayEncoder<W: Write> {
    /// The underlying writer we stream JSON into.
    w: W,

    /// Whether we have written the opening `[` of the JSON array.
    started: bool,

    /// Whether the next element will be the first element in the array.
    /// This lets us correctly place commas between elements.
    first: bool,

    /// Whether the encoder has been closed.
    /// Once closed, no further writes are allowed.
    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    /// Create a new JSON array encoder that writes to the given writer.
    ///
    /// The JSON array is opened lazily on the first record or on close.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> RecordEncoder for JsonArrayEncoder<W> {
    /// Serialize a record and append it to the JSON array.
    fn write_line(&mut self, line: &Line) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write line: encoder is already closed"));
        }

        let Line::Record(record) = line else {
            return Ok(());
        };

        self.start_if_needed()?;

        // Write a comma before every element except the first.
        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, record)?;

        Ok(())
    }

    /// Finalize the JSON array and flush the underlying writer.
    ///
    /// This method is idempotent:
    /// - Calling `close()` multiple times is safe.
    /// - After closing, no further lines may be written.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // Ensure we still output a valid JSON array even if no records were written.
        self.start_if_needed()?;

        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
