// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Keyword classification by binary search over sorted tables.
//!
//! Tables are plain sorted slices. Case-insensitive tables must be written in lowercase so
//! that the folded comparison agrees with the slice order.

use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Case {
    Sensitive,
    Insensitive,
}

#[derive(Clone, Copy, Debug)]
pub struct KeywordTable {
    pub words: &'static [&'static str],
    pub case: Case,
}

impl KeywordTable {
    pub const EMPTY: Self = Self::sensitive(&[]);

    pub const fn sensitive(words: &'static [&'static str]) -> Self {
        Self { words, case: Case::Sensitive }
    }

    pub const fn insensitive(words: &'static [&'static str]) -> Self {
        Self { words, case: Case::Insensitive }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, text: &[char]) -> bool {
        classify(text, text.len(), self)
    }
}

/// Returns true if the first `len` characters of `text` are exactly an entry of `table`.
pub fn classify(text: &[char], len: usize, table: &KeywordTable) -> bool {
    let text = &text[..len.min(text.len())];
    if text.is_empty() {
        return false;
    }
    table.words.binary_search_by(|word| compare(word, text, table.case)).is_ok()
}

/// Orders `word` relative to `text`. An entry that runs longer than `text` is greater.
fn compare(word: &str, text: &[char], case: Case) -> Ordering {
    let mut text = text.iter();
    for w in word.chars() {
        let Some(&t) = text.next() else {
            return Ordering::Greater;
        };
        let t = match case {
            Case::Sensitive => t,
            Case::Insensitive => t.to_ascii_lowercase(),
        };
        match w.cmp(&t) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    if text.next().is_some() { Ordering::Less } else { Ordering::Equal }
}

/// A sorted table whose entries carry a tag, e.g. the HTML version a tag name belongs to.
#[derive(Clone, Copy, Debug)]
pub struct TaggedTable<T: 'static> {
    pub entries: &'static [(&'static str, T)],
    pub case: Case,
}

impl<T: Copy> TaggedTable<T> {
    pub fn lookup(&self, text: &[char]) -> Option<T> {
        if text.is_empty() {
            return None;
        }
        self.entries
            .binary_search_by(|(word, _)| compare(word, text, self.case))
            .ok()
            .map(|i| self.entries[i].1)
    }
}

/// Numeric literal: decimal with optional fraction, exponent and suffix, `0x` hex, `0b`
/// binary, or a leading `.digit`.
pub fn is_numeric(text: &[char]) -> bool {
    let mut i = 0;
    match text {
        [] => return false,
        ['.', d, ..] if d.is_ascii_digit() => {}
        [d, ..] if d.is_ascii_digit() => {}
        _ => return false,
    }

    if let ['0', 'x' | 'X', rest @ ..] = text {
        return !rest.is_empty()
            && rest.iter().all(|c| c.is_ascii_hexdigit() || *c == '_' || c.is_ascii_alphabetic());
    }
    if let ['0', 'b' | 'B', rest @ ..] = text {
        return !rest.is_empty() && rest.iter().all(|c| c.is_ascii_alphanumeric() || *c == '_');
    }

    while i < text.len() && (text[i].is_ascii_digit() || text[i] == '_') {
        i += 1;
    }
    if i < text.len() && text[i] == '.' {
        i += 1;
        while i < text.len() && (text[i].is_ascii_digit() || text[i] == '_') {
            i += 1;
        }
    }
    if i < text.len() && matches!(text[i], 'e' | 'E') {
        let mut j = i + 1;
        if j < text.len() && matches!(text[j], '+' | '-') {
            j += 1;
        }
        if j < text.len() && text[j].is_ascii_digit() {
            i = j;
            while i < text.len() && text[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    text[i..].iter().all(|c| c.is_ascii_alphanumeric() || *c == '_')
}

/// Asserts that a table is strictly sorted under its own comparison and that every entry
/// classifies as itself.
#[cfg(test)]
pub fn assert_table_consistent(name: &str, table: &KeywordTable) {
    for pair in table.words.windows(2) {
        assert!(pair[0] < pair[1], "{name}: `{}` must sort before `{}`", pair[0], pair[1]);
    }
    for word in table.words {
        if table.case == Case::Insensitive {
            assert_eq!(*word, word.to_ascii_lowercase(), "{name}: `{word}` must be lowercase");
        }
        let text: Vec<char> = word.chars().collect();
        assert!(classify(&text, text.len(), table), "{name}: `{word}` does not classify");
    }
}

#[cfg(test)]
pub fn assert_tagged_consistent<T: Copy>(name: &str, table: &TaggedTable<T>) {
    for pair in table.entries.windows(2) {
        assert!(pair[0].0 < pair[1].0, "{name}: `{}` must sort before `{}`", pair[0].0, pair[1].0);
    }
    for (word, _) in table.entries {
        let text: Vec<char> = word.chars().collect();
        assert!(table.lookup(&text).is_some(), "{name}: `{word}` does not classify");
    }
}
