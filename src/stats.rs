//! Word and character bookkeeping collected while converting transcripts.
//!
//! The accumulator is owned by whoever drives the conversion and passed in by
//! `&mut`. Per-file accumulators can be merged afterwards, which keeps totals
//! independent of how files were scheduled.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::charset::is_word_char;
use crate::markup::AnnotationKind;

/// How often a character occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharCount {
    pub ch: char,
    pub count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MetaStats {
    records: u64,
    words: Vec<String>,
    word_set: HashSet<String>,
    chars: Vec<CharCount>,
    char_index: HashMap<char, usize>,
    annotations: BTreeMap<AnnotationKind, u64>,
}

/// Serializable view of a [`MetaStats`].
#[derive(Debug, Serialize)]
pub struct MetaReport<'a> {
    pub records: u64,
    pub words: &'a [String],
    pub characters: &'a [CharCount],
    pub annotations: &'a BTreeMap<AnnotationKind, u64>,
}

impl MetaStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolved text field: its words, characters and annotations.
    pub fn observe_field(&mut self, text: &str, annotations: &[AnnotationKind]) {
        self.records += 1;

        for token in text.split(' ') {
            let word: String = token.chars().filter(|c| is_word_char(*c)).collect();
            if !word.is_empty() {
                self.add_word(word);
            }
        }

        for ch in text.chars() {
            self.add_char(ch, 1);
        }

        for kind in annotations {
            *self.annotations.entry(*kind).or_default() += 1;
        }
    }

    /// Fold `other` into `self`: sum counts, union words.
    ///
    /// Words and characters first seen in `other` are appended in `other`'s order.
    pub fn merge(&mut self, other: MetaStats) {
        self.records += other.records;
        for word in other.words {
            self.add_word(word);
        }
        for CharCount { ch, count } in other.chars {
            self.add_char(ch, count);
        }
        for (kind, count) in other.annotations {
            *self.annotations.entry(kind).or_default() += count;
        }
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    /// Unique words in order of first occurrence.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Character counts in order of first occurrence.
    pub fn chars(&self) -> &[CharCount] {
        &self.chars
    }

    pub fn char_count(&self, ch: char) -> u64 {
        self.char_index
            .get(&ch)
            .map_or(0, |idx| self.chars[*idx].count)
    }

    pub fn annotation_count(&self, kind: AnnotationKind) -> u64 {
        self.annotations.get(&kind).copied().unwrap_or(0)
    }

    pub fn report(&self) -> MetaReport<'_> {
        MetaReport {
            records: self.records,
            words: &self.words,
            characters: &self.chars,
            annotations: &self.annotations,
        }
    }

    fn add_word(&mut self, word: String) {
        if self.word_set.insert(word.clone()) {
            self.words.push(word);
        }
    }

    fn add_char(&mut self, ch: char, count: u64) {
        match self.char_index.get(&ch) {
            Some(idx) => self.chars[*idx].count += count,
            None => {
                self.char_index.insert(ch, self.chars.len());
                self.chars.push(CharCount { ch, count });
            }
        }
    }
}
