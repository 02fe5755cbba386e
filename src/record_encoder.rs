use crate::Result;
use crate::record::Line;

/// Streaming sink for converted transcript lines.
///
/// Implementations must make `close` idempotent and refuse writes after it.
pub trait RecordEncoder {
    fn write_line(&mut self, line: &Line) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
