/// The supported output formats for converted transcripts.
///
/// Each variant maps to a concrete `RecordEncoder` implementation. With the `cli`
/// feature the enum doubles as a `clap` flag value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Tab-separated records, the raw line-wise format for HWR training.
    #[default]
    Tsv,

    /// Records as a single JSON array. Comment lines are dropped.
    Json,
}
