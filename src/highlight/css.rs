// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! CSS: selectors, declaration blocks, `@` rules and `/* */` comments.
//!
//! Top-level selectors are colored: element names as keywords, `.class` and `#id` as
//! [`ColorClass::User1`], pseudo-classes as [`ColorClass::User2`]. Selectors nested in an
//! `@media` block are not.
//!
//! Also runs inside `<style>` elements, so its state fits in the 32 bits a host carries.

use super::keywords::KeywordTable;
use super::scan::*;
use super::{ColorClass, Cookie, LineLexer, SpanEmitter};

const CSS_PROPERTIES: &[&str] = &[
    "align-items", "animation", "background", "background-color", "background-image", "border",
    "border-bottom", "border-color", "border-left", "border-radius", "border-right", "border-top",
    "bottom", "box-shadow", "box-sizing", "clear", "color", "content", "cursor", "display", "flex",
    "flex-direction", "float", "font", "font-family", "font-size", "font-style", "font-weight",
    "gap", "grid", "grid-template-columns", "height", "justify-content", "left", "letter-spacing",
    "line-height", "list-style", "margin", "margin-bottom", "margin-left", "margin-right",
    "margin-top", "max-height", "max-width", "min-height", "min-width", "opacity", "outline",
    "overflow", "padding", "padding-bottom", "padding-left", "padding-right", "padding-top",
    "position", "right", "text-align", "text-decoration", "text-transform", "top", "transform",
    "transition", "vertical-align", "visibility", "white-space", "width", "z-index",
];

const CSS_VALUES: &[&str] = &[
    "absolute", "auto", "block", "bold", "center", "fixed", "flex", "grid", "hidden", "important",
    "inherit", "initial", "inline", "inline-block", "italic", "left", "none", "normal", "relative",
    "right", "solid", "static", "sticky", "transparent", "unset", "visible",
];

const CSS_FUNCTIONS: &[&str] =
    &["attr", "calc", "hsl", "hsla", "linear-gradient", "rgb", "rgba", "url", "var"];

const PROPERTIES: KeywordTable = KeywordTable::insensitive(CSS_PROPERTIES);
const VALUES: KeywordTable = KeywordTable::insensitive(CSS_VALUES);
const FUNCTIONS: KeywordTable = KeywordTable::insensitive(CSS_FUNCTIONS);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct State {
    /// Inside `{ }`. Saturates, nested `@media` blocks rarely go deep.
    depth: u8,
    /// After the `:` of a declaration.
    value: bool,
    comment: bool,
    string: Option<char>,
    /// Between an `@` rule's name and its `;` or `{`.
    prelude: bool,
}

impl State {
    fn decode(cookie: Cookie) -> Self {
        let bits = cookie.bits();
        Self {
            depth: bits as u8,
            value: bits & (1 << 8) != 0,
            comment: bits & (1 << 9) != 0,
            string: match (bits >> 10) & 0b11 {
                1 => Some('"'),
                2 => Some('\''),
                _ => None,
            },
            prelude: bits & (1 << 12) != 0,
        }
    }

    fn encode(self) -> Cookie {
        let string = match self.string {
            Some('"') => 1,
            Some(_) => 2,
            None => 0,
        };
        let bits = self.depth as u64 | (self.value as u64) << 8 | (self.comment as u64) << 9;
        Cookie::from_bits(bits | string << 10 | (self.prelude as u64) << 12)
    }
}

pub struct CssLexer;

impl LineLexer for CssLexer {
    fn lex(&self, cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie {
        let mut st = State::decode(cookie);
        if st.comment {
            out.define(0, ColorClass::Comment);
        } else if st.string.is_some() {
            out.define(0, ColorClass::String);
        }

        let mut i = 0;
        while i < line.len() {
            if st.comment {
                match find(line, i, "*/") {
                    Some(p) => {
                        st.comment = false;
                        i = p + 2;
                        out.define(i, ColorClass::NormalText);
                    }
                    None => i = line.len(),
                }
                continue;
            }
            if let Some(quote) = st.string {
                match (i..line.len()).find(|&j| line[j] == quote && !is_escaped(line, j)) {
                    Some(p) => {
                        st.string = None;
                        i = p + 1;
                        out.define(i, ColorClass::NormalText);
                    }
                    None => i = line.len(),
                }
                continue;
            }
            i = token(&mut st, line, i, out);
        }

        // Strings only continue through an escaped newline.
        if st.string.is_some() && !(line.last() == Some(&'\\') && is_escaped(line, line.len())) {
            st.string = None;
        }
        st.encode()
    }
}

fn token(st: &mut State, line: &[char], i: usize, out: &mut SpanEmitter) -> usize {
    let c = line[i];
    let next = at(line, i + 1);

    if c == '/' && next == Some('*') {
        out.define(i, ColorClass::Comment);
        st.comment = true;
        return i + 2;
    }

    match c {
        '"' | '\'' => {
            out.define(i, ColorClass::String);
            st.string = Some(c);
            return i + 1;
        }
        '{' => {
            st.depth = st.depth.saturating_add(1);
            st.value = false;
            st.prelude = false;
        }
        '}' => {
            st.depth = st.depth.saturating_sub(1);
            st.value = false;
        }
        ':' if st.depth > 0 => st.value = true,
        ':' if in_selector(st) => {
            let name = if next == Some(':') { i + 2 } else { i + 1 };
            if at(line, name).is_some_and(is_ident_start) {
                out.define(i, ColorClass::User2);
                return ident_end(line, name, "-");
            }
        }
        '.' | '#' if in_selector(st) && next.is_some_and(|n| is_ident_start(n) || n == '-') => {
            out.define(i, ColorClass::User1);
            return ident_end(line, i + 1, "-");
        }
        ';' => {
            st.value = false;
            st.prelude = false;
        }
        '@' if next.is_some_and(is_ident_start) => {
            let end = ident_end(line, i + 1, "-");
            out.define(i, ColorClass::Preprocessor);
            st.prelude = true;
            return end;
        }
        '#' if st.value && next.is_some_and(|n| n.is_ascii_hexdigit()) => {
            let end = ident_end(line, i + 1, "");
            out.define(i, ColorClass::Number);
            return end;
        }
        _ => {}
    }

    // Dimensions keep their unit: `10px`, `1.5em`, `50%`.
    if c.is_ascii_digit() || (c == '.' && next.is_some_and(|n| n.is_ascii_digit()) && st.value) {
        let mut end = number_end(line, i);
        if at(line, end) == Some('%') {
            end += 1;
        }
        out.define(i, ColorClass::Number);
        return end;
    }

    if is_ident_start(c) || c == '-' {
        let end = ident_end(line, i, "-");
        let word = &line[i..end];
        let class = if st.depth > 0 && !st.value {
            if PROPERTIES.contains(word) { ColorClass::Keyword } else { ColorClass::NormalText }
        } else if st.value {
            if VALUES.contains(word) {
                ColorClass::User1
            } else if FUNCTIONS.contains(word) && at(line, end) == Some('(') {
                ColorClass::User2
            } else {
                ColorClass::NormalText
            }
        } else if in_selector(st) {
            ColorClass::Keyword
        } else {
            ColorClass::NormalText
        };
        out.define(i, class);
        return end;
    }

    if c.is_whitespace() {
        out.define(i, ColorClass::NormalText);
        return skip_space(line, i);
    }

    out.define(i, ColorClass::Operator);
    i + 1
}

fn in_selector(st: &State) -> bool {
    st.depth == 0 && !st.prelude
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::keywords::assert_table_consistent;
    use crate::highlight::{ColorClass::*, lex_line};

    fn lex(cookie: Cookie, text: &str) -> (Vec<(usize, ColorClass)>, Cookie) {
        let line: Vec<char> = text.chars().collect();
        let (spans, cookie) = lex_line(&CssLexer, cookie, &line, line.len());
        (spans.iter().map(|s| (s.start, s.class)).collect(), cookie)
    }

    #[test]
    fn tables_are_sorted() {
        assert_table_consistent("css properties", &PROPERTIES);
        assert_table_consistent("css values", &VALUES);
        assert_table_consistent("css functions", &FUNCTIONS);
    }

    #[test]
    fn declarations() {
        let (spans, cookie) = lex(Cookie::default(), "p { color: #fff; margin: 10px auto }");
        assert_eq!(
            spans,
            vec![
                (0, Keyword),
                (1, NormalText),
                (2, Operator),
                (3, NormalText),
                (4, Keyword),
                (9, Operator),
                (10, NormalText),
                (11, Number),
                (15, Operator),
                (16, NormalText),
                (17, Keyword),
                (23, Operator),
                (24, NormalText),
                (25, Number),
                (29, NormalText),
                (30, User1),
                (34, NormalText),
                (35, Operator),
            ]
        );
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn blocks_and_comments_span_lines() {
        let (_, cookie) = lex(Cookie::default(), "@media print { a {");
        assert_eq!(State::decode(cookie).depth, 2);
        let (spans, cookie) = lex(cookie, "/* x");
        assert_eq!(spans, vec![(0, Comment)]);
        let (spans, cookie) = lex(cookie, "*/ width: 1px");
        assert_eq!(spans[0], (0, Comment));
        assert!(spans.contains(&(3, Keyword)));
        assert_eq!(State::decode(cookie).depth, 2);
    }

    #[test]
    fn at_rules_are_preprocessor() {
        let (spans, _) = lex(Cookie::default(), "@import url(\"a.css\");");
        assert_eq!(
            spans,
            vec![(0, Preprocessor), (7, NormalText), (11, Operator), (12, String), (19, Operator)]
        );
    }

    #[test]
    fn top_level_selectors() {
        let (spans, cookie) = lex(Cookie::default(), "a.nav > li:hover, #main { }");
        assert_eq!(
            spans,
            vec![
                (0, Keyword),
                (1, User1),
                (5, NormalText),
                (6, Operator),
                (7, NormalText),
                (8, Keyword),
                (10, User2),
                (16, Operator),
                (17, NormalText),
                (18, User1),
                (23, NormalText),
                (24, Operator),
                (25, NormalText),
                (26, Operator),
            ]
        );
        assert_eq!(cookie, Cookie::default());

        let (spans, _) = lex(Cookie::default(), "p::before");
        assert_eq!(spans, vec![(0, Keyword), (1, User2)]);
    }
}
