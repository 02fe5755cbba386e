use crate::output_type::OutputType;

/// Options that control how transcripts are converted.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// Whether to replace typographic characters (curly quotes, ellipsis, ...) with plain
    /// ones after the markup has been resolved.
    ///
    /// See [`crate::charset::REPLACEMENTS`] for the table.
    pub reduce_characters: bool,

    /// The desired output format.
    pub output_type: OutputType,
}
