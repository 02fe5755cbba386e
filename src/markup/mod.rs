//! Resolution of the bracket annotation markup embedded in transcript text.
//!
//! Transcribers mark orthographic phenomena with `{...}` annotations: overlays (`{e+E}`),
//! mirrored letters (`{a|b}`), tally marks (`{t&t}`), separators (`{-word}`), direct
//! inserts (`{<word}`), insertions (`{insert|...}`) and emoticons. Annotations nest.
//!
//! Resolution scans a field once, rewriting each annotation when its closing brace is
//! reached, so the innermost annotations are resolved first. The result never contains `{` or `}`, so resolving it again is a
//! no-op.
//!
//! ```
//! assert_eq!(scrawl::markup::resolve("He{-said}").unwrap(), "He said");
//! assert_eq!(scrawl::markup::resolve("{a{b+c}d}").unwrap(), "abd");
//! ```

mod rule;
mod scan;

pub use rule::{
    Annotation, AnnotationKind, EMOTICON, INSERT_MARKER, INSERTION_PREFIX_CHARS,
};

use thiserror::Error;

/// Why a field's markup could not be resolved.
///
/// Columns are 1-based character positions within the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("missing closing bracket for '{{' at column {column}")]
    UnmatchedOpen { column: usize },

    #[error("unexpected closing bracket '}}' at column {column}")]
    UnmatchedClose { column: usize },

    #[error("insertion span opened at column {column} while another one is still open")]
    NestedInsertion { column: usize },

    #[error("insertion span was never closed")]
    UnclosedInsertion,
}

/// Plain text of a resolved field plus the annotations it contained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub text: String,

    /// Kind of every annotation rewritten, innermost first.
    pub annotations: Vec<AnnotationKind>,

    /// This field left a new insertion span open. It may also have closed an earlier one.
    pub opened_insertion: bool,
}

/// Stateful resolver for the fields of one transcript file.
///
/// The only state is whether an insertion span is open: `{insert` without a matching
/// brace opens one and the next stray `}` closes it, possibly several records later.
#[derive(Debug, Default)]
pub struct Resolver {
    insertion_open: bool,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an insertion span is currently open.
    pub fn insertion_open(&self) -> bool {
        self.insertion_open
    }

    /// Resolve every annotation in `text`.
    ///
    /// On error the span state is left untouched.
    pub fn resolve_field(&mut self, text: &str) -> Result<Resolution, MarkupError> {
        if !text.contains(['{', '}']) {
            return Ok(Resolution {
                text: text.to_owned(),
                ..Resolution::default()
            });
        }

        let scan = scan::scan(text, self.insertion_open)?;
        self.insertion_open = scan.insertion_open;
        Ok(scan.resolution)
    }

    /// Check that no insertion span is left open at the end of the input.
    pub fn finish(&self) -> Result<(), MarkupError> {
        if self.insertion_open {
            return Err(MarkupError::UnclosedInsertion);
        }
        Ok(())
    }
}

/// Resolve a single, self-contained field.
pub fn resolve(text: &str) -> Result<String, MarkupError> {
    let mut resolver = Resolver::new();
    let resolution = resolver.resolve_field(text)?;
    resolver.finish()?;
    Ok(resolution.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::WORD_CHARS;

    #[test]
    fn bracket_free_text_is_unchanged() -> anyhow::Result<()> {
        for text in ["", "Hallo Welt", "a+b|c&d -x <y", "insert here 🙂"] {
            assert_eq!(resolve(text)?, text);
        }
        Ok(())
    }

    #[test]
    fn single_word_chars_are_kept() -> anyhow::Result<()> {
        for c in WORD_CHARS.chars() {
            assert_eq!(resolve(&format!("{{{c}}}"))?, c.to_string());
        }
        Ok(())
    }

    #[test]
    fn resolves_each_rule() -> anyhow::Result<()> {
        assert_eq!(resolve("{e+E}")?, "e");
        assert_eq!(resolve("{a|b}")?, "a");
        assert_eq!(resolve("{t&t}")?, "t");
        assert_eq!(resolve("{-word}")?, " word");
        assert_eq!(resolve("{<word}")?, "word");
        assert_eq!(resolve("{insert|}")?, "");
        assert_eq!(resolve("gut{🙂}")?, "gut");
        assert_eq!(resolve("{}")?, "");
        Ok(())
    }

    #[test]
    fn inner_annotations_resolve_first() -> anyhow::Result<()> {
        assert_eq!(resolve("{a{b+c}d}")?, "abd");
        // The inner separator produces a leading space; the outer direct insert only
        // drops its own marker.
        assert_eq!(resolve("{<{-x}y}")?, " xy");
        assert_eq!(resolve("{{{e+E}}}")?, "e");
        Ok(())
    }

    #[test]
    fn sibling_annotations_resolve_left_to_right() -> anyhow::Result<()> {
        assert_eq!(resolve("{e+E}rror{-und}{<so}")?, "error undso");
        Ok(())
    }

    #[test]
    fn unbalanced_brackets_fail() {
        assert_eq!(
            resolve("{open"),
            Err(MarkupError::UnmatchedOpen { column: 1 })
        );
        assert_eq!(
            resolve("close}"),
            Err(MarkupError::UnmatchedClose { column: 6 })
        );
        assert_eq!(
            resolve("{a{b}"),
            Err(MarkupError::UnmatchedOpen { column: 1 })
        );
    }

    #[test]
    fn resolving_twice_is_a_no_op() -> anyhow::Result<()> {
        for text in ["He{-said}", "{e+E}rror", "{a{b+c}d}", "x{🙂}y{<z}"] {
            let once = resolve(text)?;
            assert!(!once.contains(['{', '}']));
            assert_eq!(resolve(&once)?, once);
        }
        Ok(())
    }

    #[test]
    fn reports_annotation_kinds() -> anyhow::Result<()> {
        let mut resolver = Resolver::new();
        let resolution = resolver.resolve_field("{a{b+c}d} {-x}")?;
        assert_eq!(resolution.text, "abd  x");
        assert_eq!(
            resolution.annotations,
            vec![
                AnnotationKind::Overlay,
                AnnotationKind::Plain,
                AnnotationKind::Separator
            ]
        );
        Ok(())
    }

    #[test]
    fn insertion_span_crosses_fields() -> anyhow::Result<()> {
        let mut resolver = Resolver::new();

        let first = resolver.resolve_field("Er {insert| ging {e+E}")?;
        assert_eq!(first.text, "Er | ging e");
        assert!(resolver.insertion_open());
        assert!(resolver.finish().is_err());

        let second = resolver.resolve_field("nach Hause} heim")?;
        assert_eq!(second.text, "nach Hause heim");
        assert!(!resolver.insertion_open());
        resolver.finish()?;
        Ok(())
    }

    #[test]
    fn deeply_nested_field_resolves() -> anyhow::Result<()> {
        let depth = 100_000;
        let text = format!("{}{{e+E}}{}", "{".repeat(depth), "}".repeat(depth));
        assert_eq!(resolve(&text)?, "e");
        Ok(())
    }

    #[test]
    fn reopening_in_the_closing_field_is_reported() -> anyhow::Result<()> {
        let mut resolver = Resolver::new();
        assert!(resolver.resolve_field("A {insert| x")?.opened_insertion);
        assert!(resolver.resolve_field("y} B {insert| z")?.opened_insertion);
        assert!(resolver.insertion_open());
        assert!(!resolver.resolve_field("end")?.opened_insertion);
        Ok(())
    }

    #[test]
    fn failed_field_keeps_span_state() {
        let mut resolver = Resolver::new();
        assert!(resolver.resolve_field("{insert a {b").is_err());
        assert!(!resolver.insertion_open());
    }

    #[test]
    fn standalone_open_insertion_fails() {
        assert_eq!(
            resolve("{insert| offen"),
            Err(MarkupError::UnclosedInsertion)
        );
    }
}
