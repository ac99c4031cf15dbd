// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bounds-checked character helpers shared by the lexers.

pub fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

pub fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

pub fn at(line: &[char], i: usize) -> Option<char> {
    line.get(i).copied()
}

/// Whether `line[i..]` starts with `pat`.
pub fn starts_with_at(line: &[char], i: usize, pat: &str) -> bool {
    let mut j = i;
    for p in pat.chars() {
        if line.get(j) != Some(&p) {
            return false;
        }
        j += 1;
    }
    true
}

/// Like [`starts_with_at`], but ASCII case-insensitive.
pub fn starts_with_at_ignore_case(line: &[char], i: usize, pat: &str) -> bool {
    let mut j = i;
    for p in pat.chars() {
        match line.get(j) {
            Some(c) if c.eq_ignore_ascii_case(&p) => j += 1,
            _ => return false,
        }
    }
    true
}

/// Whether `text` is exactly `word`.
pub fn text_is(text: &[char], word: &str) -> bool {
    text.len() == word.chars().count() && starts_with_at(text, 0, word)
}

pub fn text_is_ignore_case(text: &[char], word: &str) -> bool {
    text.len() == word.chars().count() && starts_with_at_ignore_case(text, 0, word)
}

/// Finds `pat` in `line` at or after `from`.
pub fn find(line: &[char], from: usize, pat: &str) -> Option<usize> {
    (from..line.len()).find(|&i| starts_with_at(line, i, pat))
}

pub fn find_ignore_case(line: &[char], from: usize, pat: &str) -> Option<usize> {
    (from..line.len()).find(|&i| starts_with_at_ignore_case(line, i, pat))
}

/// The number of consecutive backslashes immediately before `i`.
pub fn preceding_backslashes(line: &[char], i: usize) -> usize {
    line[..i.min(line.len())].iter().rev().take_while(|&&c| c == '\\').count()
}

/// A character is escaped if an odd number of backslashes precede it.
pub fn is_escaped(line: &[char], i: usize) -> bool {
    preceding_backslashes(line, i) % 2 == 1
}

/// The end of the identifier run starting at `i`.
pub fn ident_end(line: &[char], i: usize, extra: &str) -> usize {
    let mut j = i;
    while let Some(c) = at(line, j) {
        if !is_ident_char(c) && !extra.contains(c) {
            break;
        }
        j += 1;
    }
    j
}

/// The end of a numeric-looking run: digits, letters (suffixes, hex) and `.`, plus a sign
/// directly after an exponent marker.
pub fn number_end(line: &[char], i: usize) -> usize {
    let mut j = i;
    while let Some(c) = at(line, j) {
        let exponent_sign = (c == '+' || c == '-')
            && j > i
            && matches!(line[j - 1], 'e' | 'E')
            && !line[i..j].iter().any(|c| matches!(c, 'x' | 'X'));
        if !(c.is_alphanumeric() || c == '_' || c == '.' || exponent_sign) {
            break;
        }
        j += 1;
    }
    j
}

/// Whether a `(` follows `end` after whitespace and any of the `skip` characters.
pub fn followed_by_call(line: &[char], end: usize, skip: &str) -> bool {
    let mut j = end;
    while let Some(c) = at(line, j) {
        if c == '(' {
            return true;
        }
        if !(c.is_whitespace() || skip.contains(c)) {
            return false;
        }
        j += 1;
    }
    false
}

pub fn skip_space(line: &[char], mut i: usize) -> usize {
    while at(line, i).is_some_and(char::is_whitespace) {
        i += 1;
    }
    i
}

/// The last character before `i` that is not whitespace.
pub fn prev_non_space(line: &[char], i: usize) -> Option<char> {
    line[..i.min(line.len())].iter().rev().copied().find(|c| !c.is_whitespace())
}
