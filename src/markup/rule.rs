use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::charset::is_word_char;

/// Emoticon glyph writers sometimes draw into the text; it is dropped from the output.
pub const EMOTICON: char = '\u{1F642}';

/// Keyword that starts an insertion annotation (`{insert|...}`).
pub const INSERT_MARKER: &str = "insert";

/// Characters cut from the front of an insertion annotation: the keyword, its
/// delimiter and one more character.
pub const INSERTION_PREFIX_CHARS: usize = 8;

/// One bracket annotation, classified by the first rule of the rewrite table it matches.
///
/// Each variant borrows the slice of the annotation content it keeps, so classification
/// never allocates. [`Annotation::render`] produces the plain text replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation<'a> {
    /// `{}`: nothing to keep.
    Empty,

    /// `{x}`: a single unclear but legible word character.
    Unclear(&'a str),

    /// Content containing the emoticon glyph.
    Emoticon(&'a str),

    /// `{-rest}`: word or line separator. Holds `rest`.
    Separator(&'a str),

    /// `{<rest}`: text the writer inserted directly. Holds `rest`.
    DirectInsert(&'a str),

    /// `{e+E}`: two characters written over each other. Holds the part before `+`.
    Overlay(&'a str),

    /// `{a|b}`: mirrored character. Holds the first character.
    Mirrored(&'a str),

    /// `{a&b}`: tally mark correction. Holds the first character.
    TallyMark(&'a str),

    /// `{insert|...}`: indirect insertion. Holds the payload.
    Insertion(&'a str),

    /// Anything else is kept verbatim.
    Plain(&'a str),
}

/// Discriminant of [`Annotation`], used for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Empty,
    Unclear,
    Emoticon,
    Separator,
    DirectInsert,
    Overlay,
    Mirrored,
    TallyMark,
    Insertion,
    Plain,
}

impl<'a> Annotation<'a> {
    /// Classify bracket-free annotation content. The first matching rule wins.
    pub fn classify(content: &'a str) -> Self {
        let mut chars = content.chars();
        let Some(first) = chars.next() else {
            return Self::Empty;
        };
        let second = chars.next();

        if second.is_none() && is_word_char(first) {
            return Self::Unclear(content);
        }

        if content.contains(EMOTICON) {
            return Self::Emoticon(content);
        }

        let first_len = first.len_utf8();
        match first {
            '-' => return Self::Separator(&content[first_len..]),
            '<' => return Self::DirectInsert(&content[first_len..]),
            _ => {}
        }

        match second {
            Some('+') => {
                let kept = content.split_once('+').map_or(content, |(kept, _)| kept);
                return Self::Overlay(kept);
            }
            Some('|') => return Self::Mirrored(&content[..first_len]),
            Some('&') => return Self::TallyMark(&content[..first_len]),
            _ => {}
        }

        if content.starts_with(INSERT_MARKER) {
            let payload = content
                .char_indices()
                .nth(INSERTION_PREFIX_CHARS)
                .map_or("", |(idx, _)| &content[idx..]);
            return Self::Insertion(payload);
        }

        Self::Plain(content)
    }

    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Empty => AnnotationKind::Empty,
            Self::Unclear(_) => AnnotationKind::Unclear,
            Self::Emoticon(_) => AnnotationKind::Emoticon,
            Self::Separator(_) => AnnotationKind::Separator,
            Self::DirectInsert(_) => AnnotationKind::DirectInsert,
            Self::Overlay(_) => AnnotationKind::Overlay,
            Self::Mirrored(_) => AnnotationKind::Mirrored,
            Self::TallyMark(_) => AnnotationKind::TallyMark,
            Self::Insertion(_) => AnnotationKind::Insertion,
            Self::Plain(_) => AnnotationKind::Plain,
        }
    }

    /// Plain text that replaces the annotation, braces included.
    pub fn render(&self) -> Cow<'a, str> {
        match *self {
            Self::Empty => Cow::Borrowed(""),
            Self::Emoticon(content) => Cow::Owned(content.replace(EMOTICON, "")),
            Self::Separator(rest) => Cow::Owned(format!(" {rest}")),
            Self::Unclear(kept)
            | Self::DirectInsert(kept)
            | Self::Overlay(kept)
            | Self::Mirrored(kept)
            | Self::TallyMark(kept)
            | Self::Insertion(kept)
            | Self::Plain(kept) => Cow::Borrowed(kept),
        }
    }
}

impl AnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Unclear => "unclear",
            Self::Emoticon => "emoticon",
            Self::Separator => "separator",
            Self::DirectInsert => "direct_insert",
            Self::Overlay => "overlay",
            Self::Mirrored => "mirrored",
            Self::TallyMark => "tally_mark",
            Self::Insertion => "insertion",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
