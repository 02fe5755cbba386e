//! Character classes and the typographic reduction table used on transcript text.

/// Characters that may form a word in a transcript.
///
/// Besides ASCII letters this covers the apostrophe and the German umlauts and eszett.
pub const WORD_CHARS: &str = "'ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyzäöüÄÖÜß";

/// Replacement pairs applied in order by [`reduce_characters`].
///
/// Each pair maps a typographic character to its plain counterpart so the
/// recognizer's output alphabet stays small.
pub const REPLACEMENTS: &[(&str, &str)] = &[
    ("\u{2018}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
    ("_", "-"),
    ("\u{2026}", "..."),
    ("\u{2192}", ">"),
    ("\u{20AC}", "E"),
];

/// Whether `c` belongs to [`WORD_CHARS`].
pub fn is_word_char(c: char) -> bool {
    c == '\''
        || c.is_ascii_alphabetic()
        || matches!(c, 'ä' | 'ö' | 'ü' | 'Ä' | 'Ö' | 'Ü' | 'ß')
}

/// Apply every pair of [`REPLACEMENTS`] to `text`.
pub fn reduce_characters(text: &str) -> String {
    let mut out = text.to_owned();
    for (from, to) in REPLACEMENTS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}
