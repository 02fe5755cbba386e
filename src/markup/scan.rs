//! Single left-to-right pass over a field.
//!
//! Every `{` pushes a frame on an explicit stack and every `}` resolves the innermost
//! frame into its parent, so annotations are rewritten bottom-up without recursion and
//! nesting depth is bounded only by memory.

use tracing::warn;

use super::rule::{Annotation, INSERT_MARKER};
use super::{MarkupError, Resolution};

/// A `{` that has not been closed yet.
struct Frame {
    /// Content so far, with nested annotations already resolved.
    content: String,
    column: usize,
    /// The brace is directly followed by `insert`.
    insert_marked: bool,
}

/// Outcome of scanning one field.
pub(crate) struct Scan {
    pub resolution: Resolution,

    /// Span state after this field.
    pub insertion_open: bool,
}

/// Resolve every annotation in `text`.
///
/// `insertion_open` tells whether an insertion span from an earlier field is still open.
pub(crate) fn scan(text: &str, insertion_open: bool) -> Result<Scan, MarkupError> {
    let mut insertion_open = insertion_open;
    let mut root = String::with_capacity(text.len());
    let mut stack: Vec<Frame> = Vec::new();
    let mut annotations = Vec::new();
    let mut empty = 0usize;

    for (column, (offset, c)) in (1..).zip(text.char_indices()) {
        match c {
            '{' => stack.push(Frame {
                content: String::new(),
                column,
                insert_marked: text[offset + 1..].starts_with(INSERT_MARKER),
            }),
            '}' => match stack.pop() {
                Some(frame) => {
                    let annotation = Annotation::classify(&frame.content);
                    if annotation == Annotation::Empty {
                        empty += 1;
                    }
                    annotations.push(annotation.kind());
                    current(&mut root, &mut stack).push_str(&annotation.render());
                }
                // The first stray close belongs to the open insertion span.
                None if insertion_open => insertion_open = false,
                None => return Err(MarkupError::UnmatchedClose { column }),
            },
            _ => current(&mut root, &mut stack).push(c),
        }
    }

    // Whatever is left open must be an insertion span opener. Its content is spliced
    // into the parent without the `{insert` token.
    let mut opened_insertion = false;
    while let Some(frame) = stack.pop() {
        if !frame.insert_marked {
            return Err(MarkupError::UnmatchedOpen {
                column: frame.column,
            });
        }
        if insertion_open {
            return Err(MarkupError::NestedInsertion {
                column: frame.column,
            });
        }
        insertion_open = true;
        opened_insertion = true;

        let content = frame
            .content
            .strip_prefix(INSERT_MARKER)
            .unwrap_or(&frame.content);
        current(&mut root, &mut stack).push_str(content);
    }

    if empty > 0 {
        warn!(count = empty, "invalid zero-length annotation");
    }

    Ok(Scan {
        resolution: Resolution {
            text: root,
            annotations,
            opened_insertion,
        },
        insertion_open,
    })
}

fn current<'a>(root: &'a mut String, stack: &'a mut [Frame]) -> &'a mut String {
    match stack.last_mut() {
        Some(frame) => &mut frame.content,
        None => root,
    }
}
