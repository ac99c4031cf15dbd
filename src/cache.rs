// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-buffer cookie storage.
//!
//! The cache holds the cookie at the start of every line. Edits invalidate a suffix of the
//! buffer, and reads replay the lexer forward from the nearest valid line before the one
//! requested, writing every intermediate cookie back.

use std::fmt::{self, Debug};
use std::sync::Arc;

use tracing::trace;

use crate::highlight::{ColorSpan, Cookie, LineLexer, lex_line};

/// Read access to the lines of a buffer. The cache never owns the text.
pub trait LineSource {
    fn line_count(&self) -> usize;

    /// The text of line `index`, or an empty slice if it is out of range.
    fn line(&self, index: usize) -> &[char];
}

impl LineSource for [Vec<char>] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> &[char] {
        self.get(index).map_or(&[], Vec::as_slice)
    }
}

impl LineSource for Vec<Vec<char>> {
    fn line_count(&self) -> usize {
        self.as_slice().line_count()
    }

    fn line(&self, index: usize) -> &[char] {
        self.as_slice().line(index)
    }
}

pub struct CookieCache {
    lexer: Arc<dyn LineLexer>,
    /// The cookie at the start of each line. `None` until computed, and again after edits.
    /// Line 0 always starts in the default cookie and is never stored.
    cookies: Vec<Option<Cookie>>,
}

impl CookieCache {
    pub fn new(lexer: Arc<dyn LineLexer>, line_count: usize) -> Self {
        Self { lexer, cookies: vec![None; line_count] }
    }

    /// Switches the lexer and drops every cookie.
    pub fn set_language(&mut self, lexer: Arc<dyn LineLexer>) {
        self.lexer = lexer;
        self.invalidate_from(0);
    }

    pub fn lexer(&self) -> &dyn LineLexer {
        self.lexer.as_ref()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Whether the cookie for `line` is known without lexing.
    pub fn is_valid(&self, line: usize) -> bool {
        line == 0 || self.cookies.get(line).is_some_and(Option::is_some)
    }

    /// Drops the cookies of `line` and every line after it.
    pub fn invalidate_from(&mut self, line: usize) {
        if let Some(tail) = self.cookies.get_mut(line..) {
            tail.fill(None);
        }
    }

    /// `count` new lines were inserted in front of line `at`.
    pub fn insert_lines(&mut self, at: usize, count: usize) {
        let at = at.min(self.cookies.len());
        self.cookies.splice(at..at, std::iter::repeat_n(None, count));
        self.invalidate_from(at);
    }

    /// `count` lines starting at `at` were deleted.
    pub fn remove_lines(&mut self, at: usize, count: usize) {
        let at = at.min(self.cookies.len());
        let end = at.saturating_add(count).min(self.cookies.len());
        self.cookies.drain(at..end);
        self.invalidate_from(at);
    }

    /// Grows or shrinks the cache to `line_count` lines. New lines start invalid.
    pub fn resize(&mut self, line_count: usize) {
        self.cookies.resize(line_count, None);
    }

    /// The cookie at the start of `line`, clamped to the last line.
    pub fn cookie_for(&mut self, source: &dyn LineSource, line: usize) -> Cookie {
        let line = line.min(self.cookies.len().saturating_sub(1));
        if line == 0 {
            return Cookie::default();
        }
        if let Some(cookie) = self.cookies[line] {
            return cookie;
        }

        let (from, mut cookie) = (1..line)
            .rev()
            .find_map(|i| self.cookies[i].map(|cookie| (i, cookie)))
            .unwrap_or((0, Cookie::default()));

        trace!(from, to = line, "replaying cookies");
        for i in from..line {
            let text = source.line(i);
            let (_, next) = lex_line(self.lexer.as_ref(), cookie, text, text.len());
            cookie = next;
            self.cookies[i + 1] = Some(cookie);
        }
        cookie
    }

    /// Lexes `line` starting in its cached cookie. Lines past the end of the cache have no
    /// spans.
    ///
    /// The outgoing cookie is stored for the next line only if that line has none yet. A
    /// stored cookie that disagrees belongs to an edit the caller has not reported.
    pub fn spans_for(&mut self, source: &dyn LineSource, line: usize) -> Vec<ColorSpan> {
        if line >= self.cookies.len() {
            return Vec::new();
        }
        let cookie = self.cookie_for(source, line);
        let text = source.line(line);
        let (spans, next) = lex_line(self.lexer.as_ref(), cookie, text, text.len());
        if let Some(slot) = self.cookies.get_mut(line + 1) {
            slot.get_or_insert(next);
        }
        spans
    }
}

impl Debug for CookieCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid = self.cookies.iter().filter(|c| c.is_some()).count();
        f.debug_struct("CookieCache")
            .field("lines", &self.cookies.len())
            .field("valid", &valid)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::{ColorClass, SpanEmitter};
    use crate::registry::{LanguageRegistry, TextType};

    /// Counts calls and returns the incoming cookie plus one.
    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl Counting {
        fn calls(&self) -> usize {
            self.0.swap(0, Ordering::Relaxed)
        }
    }

    impl LineLexer for Counting {
        fn lex(&self, cookie: Cookie, _line: &[char], out: &mut SpanEmitter) -> Cookie {
            self.0.fetch_add(1, Ordering::Relaxed);
            out.define(0, ColorClass::NormalText);
            Cookie::from_bits(cookie.bits() + 1)
        }
    }

    fn lines(text: &[&str]) -> Vec<Vec<char>> {
        text.iter().map(|l| l.chars().collect()).collect()
    }

    #[test]
    fn replays_only_the_invalid_run() {
        let source = lines(&["a"; 10]);
        let lexer = Arc::new(Counting::default());
        let mut cache = CookieCache::new(lexer.clone(), source.len());

        assert_eq!(cache.cookie_for(&source, 5), Cookie::from_bits(5));
        assert_eq!(lexer.calls(), 5);
        assert_eq!(cache.cookie_for(&source, 5), Cookie::from_bits(5));
        assert_eq!(cache.cookie_for(&source, 2), Cookie::from_bits(2));
        assert_eq!(lexer.calls(), 0);

        cache.invalidate_from(3);
        assert!(cache.is_valid(2));
        assert!(!cache.is_valid(5));
        assert_eq!(cache.cookie_for(&source, 4), Cookie::from_bits(4));
        assert_eq!(lexer.calls(), 2);
    }

    #[test]
    fn out_of_range_lines_clamp() {
        let source = lines(&["a", "b", "c"]);
        let lexer = Arc::new(Counting::default());
        let mut cache = CookieCache::new(lexer.clone(), source.len());
        assert_eq!(cache.cookie_for(&source, 100), Cookie::from_bits(2));

        let mut empty = CookieCache::new(lexer, 0);
        assert_eq!(empty.cookie_for(&source, 3), Cookie::default());
        assert!(empty.is_empty());
    }

    #[test]
    fn matches_sequential_lexing() {
        let source = lines(&["/*", "int x = 1;", "*/", "int y; /* open", "still", "*/ done"]);
        let registry = LanguageRegistry::new();
        let c = registry.by_type(TextType::C).unwrap();
        let mut cache = CookieCache::new(c.shared_lexer(), source.len());

        let mut cookie = Cookie::default();
        for (i, line) in source.iter().enumerate() {
            assert_eq!(cache.cookie_for(&source, i), cookie, "line {i}");
            cookie = lex_line(c.lexer(), cookie, line, line.len()).1;
        }

        let spans = cache.spans_for(&source, 1);
        assert!(spans.iter().all(|s| s.class == ColorClass::Comment), "{spans:?}");
    }

    #[test]
    fn spans_for_fills_the_next_line() {
        let source = lines(&["a", "b", "c"]);
        let lexer = Arc::new(Counting::default());
        let mut cache = CookieCache::new(lexer.clone(), source.len());

        cache.spans_for(&source, 0);
        assert!(cache.is_valid(1));
        assert!(!cache.is_valid(2));
        assert_eq!(lexer.calls(), 1);
    }

    #[test]
    fn spans_past_the_end_are_empty() {
        let source = lines(&["a", "b", "c", "d"]);
        let lexer = Arc::new(Counting::default());
        let mut cache = CookieCache::new(lexer.clone(), 3);

        assert!(cache.spans_for(&source, 3).is_empty());
        assert!(cache.spans_for(&source, 100).is_empty());
        assert_eq!(lexer.calls(), 0);
        assert_eq!(cache.spans_for(&source, 2).len(), 1);
    }

    #[test]
    fn edits_shift_and_invalidate() {
        let source = lines(&["a"; 13]);
        let lexer = Arc::new(Counting::default());
        let mut cache = CookieCache::new(lexer.clone(), 10);
        cache.cookie_for(&source, 9);
        lexer.calls();

        cache.insert_lines(2, 3);
        assert_eq!(cache.len(), 13);
        assert!(cache.is_valid(1));
        assert!(!cache.is_valid(2));
        assert!(!cache.is_valid(12));
        assert_eq!(cache.cookie_for(&source, 4), Cookie::from_bits(4));
        assert_eq!(lexer.calls(), 3);

        cache.remove_lines(3, 100);
        assert_eq!(cache.len(), 3);
        assert!(cache.is_valid(2));

        cache.resize(5);
        assert!(!cache.is_valid(4));
        cache.set_language(Arc::new(Counting::default()));
        assert!(!cache.is_valid(1));
    }
}
