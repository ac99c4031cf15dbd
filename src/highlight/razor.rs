// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Razor (`.cshtml`): `@` transitions from HTML into C#.
//!
//! `@name`, `@a.b(c)` and `@(expr)` are expressions that end on the same line. `@{` and the
//! control keywords (`@if`, `@foreach`, ...) open a code block that lasts until its braces
//! balance; [`MarkupCookie::nesting`] counts them. Markup inside such a block (an "island")
//! starts at a tag and runs until an end tag.
//!
//! [`MarkupCookie::nesting`]: super::dispatch::MarkupCookie::nesting

use super::ColorClass;
use super::dispatch::{HostMode, MarkupFlags, SubLanguage, run_embedded};
use super::keywords::KeywordTable;
use super::markup::Scan;
use super::scan::*;

/// Keywords that stand alone, like `@section Scripts {`.
const TRIVIAL: KeywordTable = KeywordTable::sensitive(&["section"]);

/// Keywords whose argument is the rest of the line, like `@model Foo.Bar`.
const SPECIAL: KeywordTable = KeywordTable::sensitive(&[
    "addTagHelper", "inherits", "inject", "layout", "model", "namespace", "page", "removeTagHelper",
    "using",
]);

/// Keywords that open a code block.
const BLOCKS: KeywordTable = KeywordTable::sensitive(&[
    "code", "do", "for", "foreach", "functions", "helper", "if", "lock", "switch", "try", "using",
    "while",
]);

/// Keywords that keep a block statement going after its `}`.
const CONTINUATIONS: KeywordTable = KeywordTable::sensitive(&["catch", "else", "finally", "while"]);

impl Scan<'_, '_> {
    /// Inside a code block and not in an island.
    pub(super) fn in_code(&self) -> bool {
        self.razor && self.st.nesting > 0 && !self.st.flags.contains(MarkupFlags::ISLAND)
    }

    pub(super) fn flush_code(&mut self, begin: usize, end: usize) {
        self.st.inner =
            run_embedded(SubLanguage::CSharp, self.st.inner, self.line, begin, end, self.out);
    }

    /// An `@` in markup text.
    pub(super) fn transition(&mut self) {
        let line = self.line;
        let i = self.i;
        let next = at(line, i + 1);

        // `user@example.com`
        if i > 0 && is_ident_char(line[i - 1]) && next.is_some_and(is_ident_char) {
            self.plain_at();
            return;
        }

        match next {
            Some('@') => {
                let class = self.carried_class();
                self.define(i, class);
                self.i = i + 2;
            }
            Some('*') => {
                self.define(i, ColorClass::Comment);
                self.st.mode = HostMode::RazorComment;
                self.i = i + 2;
            }
            Some('{') => {
                self.define(i, ColorClass::User3);
                self.enter_code();
                self.st.nesting = self.st.nesting.saturating_add(1);
                self.i = i + 2;
            }
            Some(c) if is_ident_start(c) => {
                if !self.keyword() {
                    self.expression();
                }
            }
            _ => self.expression(),
        }
    }

    fn plain_at(&mut self) {
        let class = self.carried_class();
        self.define(self.i, class);
        self.i += 1;
    }

    fn enter_code(&mut self) {
        if self.st.nesting == 0 {
            self.st.nesting = 1;
        }
        self.st.flags.remove(MarkupFlags::ISLAND);
        self.st.inner = 0;
    }

    /// `@section`, `@model T`, `@if (...)` and friends. Returns false for anything else.
    fn keyword(&mut self) -> bool {
        let line = self.line;
        let i = self.i;
        let word_end = ident_end(line, i + 1, "");
        let word = &line[i + 1..word_end];

        if TRIVIAL.contains(word) {
            self.define(i, ColorClass::User3);
            self.define(word_end, ColorClass::NormalText);
            self.i = word_end;
            return true;
        }

        let after = skip_space(line, word_end);
        if SPECIAL.contains(word) && at(line, after) != Some('(') {
            self.define(i, ColorClass::User3);
            self.define(word_end, ColorClass::NormalText);
            run_embedded(SubLanguage::CSharp, 0, line, after, line.len(), self.out);
            self.i = line.len();
            return true;
        }

        if BLOCKS.contains(word) {
            // The keyword itself is lexed as C#.
            self.define(i, ColorClass::User3);
            self.enter_code();
            self.i = i + 1;
            return true;
        }
        false
    }

    /// `@name`, `@a.b(c)[d]` or `@(expr)`, lexed as C# on its own.
    pub(super) fn expression(&mut self) {
        let line = self.line;
        let i = self.i;
        let end = match at(line, i + 1) {
            Some('(') => matching_close(line, i + 1).map_or(line.len(), |p| p + 1),
            Some(c) if is_ident_start(c) => implicit_end(line, i + 1),
            _ => {
                self.plain_at();
                return;
            }
        };

        self.define(i, ColorClass::User3);
        run_embedded(SubLanguage::CSharp, 0, line, i + 1, end, self.out);
        let class = self.carried_class();
        self.define(end, class);
        self.i = end;
    }

    pub(super) fn razor_comment(&mut self) {
        let line = self.line;
        match find(line, self.i, "*@") {
            Some(p) => {
                self.define(p + 2, ColorClass::NormalText);
                self.st.mode = HostMode::Text;
                self.i = p + 2;
            }
            None => self.i = line.len(),
        }
    }

    /// C# inside a code block, up to the next brace, transition or tag.
    pub(super) fn code(&mut self) {
        let line = self.line;
        let len = line.len();
        let begin = self.i;
        let mut j = begin;

        while j < len {
            match self.st.mode {
                HostMode::CodeString => {
                    j = verbatim_end(line, j).unwrap_or(len);
                    if j < len {
                        self.st.mode = HostMode::Text;
                    }
                    continue;
                }
                HostMode::CodeComment => {
                    match find(line, j, "*/") {
                        Some(p) => {
                            self.st.mode = HostMode::Text;
                            j = p + 2;
                        }
                        None => j = len,
                    }
                    continue;
                }
                _ => {}
            }

            let next = at(line, j + 1);
            match line[j] {
                '"' if j > 0 && line[j - 1] == '@' => {
                    self.st.mode = HostMode::CodeString;
                    j += 1;
                }
                '"' | '\'' => {
                    let quote = line[j];
                    j = (j + 1..len)
                        .find(|&k| line[k] == quote && !is_escaped(line, k))
                        .map_or(len, |k| k + 1);
                }
                '/' if next == Some('/') => j = len,
                '/' if next == Some('*') => {
                    self.st.mode = HostMode::CodeComment;
                    j += 2;
                }
                '{' => {
                    self.flush_code(begin, j);
                    self.define(j, ColorClass::User3);
                    self.st.nesting = self.st.nesting.saturating_add(1);
                    self.i = j + 1;
                    return;
                }
                '}' => {
                    self.flush_code(begin, j);
                    self.i = j;
                    self.close_brace();
                    return;
                }
                '@' if self.st.nesting == 1 && next.is_some_and(starts_transition) => {
                    self.flush_code(begin, j);
                    self.st.nesting = 0;
                    self.i = j;
                    return;
                }
                '<' if self.markup_starts(j) => {
                    self.flush_code(begin, j);
                    if self.st.nesting == 1 {
                        self.st.nesting = 0;
                    } else {
                        self.st.flags.insert(MarkupFlags::ISLAND);
                    }
                    self.i = j;
                    return;
                }
                _ => j += 1,
            }
        }

        self.flush_code(begin, len);
        self.i = len;
    }

    /// `<tag` or `</tag` in code. After a block keyword any tag ends the code. Deeper down
    /// only one at a statement boundary does, so `a < b` and generics stay C#.
    fn markup_starts(&self, j: usize) -> bool {
        let line = self.line;
        let name = match at(line, j + 1) {
            Some('/') => at(line, j + 2),
            c => c,
        };
        if !name.is_some_and(char::is_alphabetic) {
            return false;
        }
        self.st.nesting == 1
            || matches!(prev_non_space(line, j), None | Some('{' | '}' | ';' | '>'))
    }

    /// A `}` at `self.i`.
    fn close_brace(&mut self) {
        let line = self.line;
        let j = self.i;
        let nesting = self.st.nesting.saturating_sub(1);
        self.i = j + 1;

        if nesting > 1 {
            self.st.nesting = nesting;
            self.define(j, ColorClass::User3);
            return;
        }

        self.st.inner = 0;
        if continues_statement(line, j + 1) {
            self.st.nesting = 1;
            self.define(j, ColorClass::User3);
        } else {
            self.st.nesting = 0;
            self.define(j, ColorClass::Operator);
            self.define(j + 1, ColorClass::NormalText);
            if skip_space(line, j + 1) == line.len() {
                self.st.mode = HostMode::BlockEnd;
            }
        }
    }

    /// The first line after a block closed at the end of a line. Blank lines keep waiting.
    pub(super) fn resume_after_block(&mut self) {
        let line = self.line;
        if skip_space(line, 0) == line.len() {
            return;
        }
        self.st.mode = HostMode::Text;
        if continues_statement(line, 0) {
            self.st.nesting = 1;
            self.st.inner = 0;
        }
    }

    /// A `}` in island text closes the island along with the block.
    pub(super) fn island_brace(&mut self) {
        self.st.flags.remove(MarkupFlags::ISLAND);
        self.close_brace();
    }
}

/// What may follow an `@` that leaves a top-level code block.
fn starts_transition(c: char) -> bool {
    is_ident_start(c) || matches!(c, '(' | '{' | '*')
}

fn continues_statement(line: &[char], from: usize) -> bool {
    let k = skip_space(line, from);
    CONTINUATIONS.contains(&line[k..ident_end(line, k, "")])
}

/// The end of a verbatim string whose body starts at `from`. `""` is an escaped quote.
fn verbatim_end(line: &[char], from: usize) -> Option<usize> {
    let mut k = from;
    while k < line.len() {
        if line[k] == '"' {
            if at(line, k + 1) == Some('"') {
                k += 2;
                continue;
            }
            return Some(k + 1);
        }
        k += 1;
    }
    None
}

/// The `)` or `]` matching the bracket at `open`, skipping string literals.
fn matching_close(line: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = open;
    while j < line.len() {
        match line[j] {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(j);
                }
            }
            quote @ ('"' | '\'') => {
                j = (j + 1..line.len()).find(|&k| line[k] == quote && !is_escaped(line, k))?;
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// `name`, `a.b.c`, `f(x)`, `a[i].b` and `await f()`, starting at the name.
fn implicit_end(line: &[char], start: usize) -> usize {
    let mut j = ident_end(line, start, "");
    if text_is(&line[start..j], "await") {
        let k = skip_space(line, j);
        if at(line, k).is_some_and(is_ident_start) {
            j = ident_end(line, k, "");
        }
    }
    loop {
        match at(line, j) {
            Some('.') if at(line, j + 1).is_some_and(is_ident_start) => {
                j = ident_end(line, j + 1, "");
            }
            Some('(' | '[') => match matching_close(line, j) {
                Some(p) => j = p + 1,
                None => return line.len(),
            },
            _ => return j,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::dispatch::MarkupCookie;
    use crate::highlight::keywords::assert_table_consistent;
    use crate::highlight::markup::{MarkupLexer, MarkupOptions};
    use crate::highlight::{ColorClass::*, Cookie, lex_line};

    static RAZOR: MarkupLexer = MarkupLexer::razor(MarkupOptions::HTML);

    fn lex(cookie: Cookie, text: &str) -> (Vec<(usize, ColorClass)>, Cookie) {
        let line: Vec<char> = text.chars().collect();
        let (spans, cookie) = lex_line(&RAZOR, cookie, &line, line.len());
        (spans.iter().map(|s| (s.start, s.class)).collect(), cookie)
    }

    fn in_code(nesting: u8) -> Cookie {
        MarkupCookie { nesting, ..Default::default() }.encode()
    }

    #[test]
    fn keywords_are_sorted() {
        assert_table_consistent("razor trivial", &TRIVIAL);
        assert_table_consistent("razor special", &SPECIAL);
        assert_table_consistent("razor blocks", &BLOCKS);
        assert_table_consistent("razor continuations", &CONTINUATIONS);
    }

    #[test]
    fn escapes_and_email_addresses() {
        assert_eq!(lex(Cookie::default(), "a@@b"), (vec![(0, NormalText)], Cookie::default()));
        assert_eq!(lex(Cookie::default(), "me@x.com"), (vec![(0, NormalText)], Cookie::default()));
    }

    #[test]
    fn implicit_expressions() {
        let (spans, cookie) = lex(Cookie::default(), "<p>@Model.Name</p>");
        assert_eq!(
            spans,
            vec![
                (0, Operator),
                (1, Keyword),
                (2, Operator),
                (3, User3),
                (4, NormalText),
                (9, Operator),
                (10, NormalText),
                (14, Operator),
                (16, Keyword),
                (17, Operator),
            ]
        );
        assert_eq!(cookie, Cookie::default());
        assert_eq!(implicit_end(&"await x.f(1) y".chars().collect::<Vec<_>>(), 0), 12);
    }

    #[test]
    fn explicit_expressions() {
        let (spans, cookie) = lex(Cookie::default(), "@(a + 1)");
        assert_eq!(
            spans,
            vec![
                (0, User3),
                (1, Operator),
                (2, NormalText),
                (4, Operator),
                (5, NormalText),
                (6, Number),
                (7, Operator),
            ]
        );
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn code_blocks_nest() {
        let (spans, cookie) = lex(Cookie::default(), "@if (x) {");
        assert_eq!(
            spans,
            vec![
                (0, User3),
                (1, Keyword),
                (3, NormalText),
                (4, Operator),
                (5, NormalText),
                (6, Operator),
                (7, NormalText),
                (8, User3),
            ]
        );
        assert_eq!(MarkupCookie::decode(cookie).nesting, 2);

        let (spans, cookie) = lex(cookie, "    <p>hi</p>");
        assert_eq!(
            spans,
            vec![
                (0, NormalText),
                (4, Operator),
                (5, Keyword),
                (6, Operator),
                (7, NormalText),
                (9, Operator),
                (11, Keyword),
                (12, Operator),
            ]
        );
        let st = MarkupCookie::decode(cookie);
        assert_eq!(st.nesting, 2);
        assert!(!st.flags.contains(MarkupFlags::ISLAND));

        let (spans, cookie) = lex(cookie, "}");
        assert_eq!(spans, vec![(0, Operator)]);
        assert_eq!(MarkupCookie::decode(cookie).mode, HostMode::BlockEnd);
        let (spans, cookie) = lex(cookie, "<p>");
        assert_eq!(spans, vec![(0, Operator), (1, Keyword), (2, Operator)]);
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn else_on_the_next_line_continues_the_block() {
        let (_, cookie) = lex(Cookie::default(), "@if (a) {");
        let (_, cookie) = lex(cookie, "}");
        let (spans, cookie) = lex(cookie, "");
        assert!(spans.is_empty());
        assert_eq!(MarkupCookie::decode(cookie).mode, HostMode::BlockEnd);

        let (spans, cookie) = lex(cookie, "else {");
        assert_eq!(spans, vec![(0, Keyword), (4, NormalText), (5, User3)]);
        assert_eq!(MarkupCookie::decode(cookie).nesting, 2);
        let (_, cookie) = lex(cookie, "}");
        let (spans, cookie) = lex(cookie, "elsewhere");
        assert_eq!(spans, vec![(0, NormalText)]);
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn else_continues_the_block() {
        let (spans, cookie) = lex(Cookie::default(), "@if (a) { x(); } else { y(); }");
        assert!(spans.contains(&(10, FunctionName)));
        assert!(spans.contains(&(15, User3)));
        assert!(spans.contains(&(17, Keyword)));
        assert!(spans.contains(&(29, Operator)));
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn statement_blocks() {
        let (spans, cookie) = lex(Cookie::default(), "@{ var a = 1; }");
        assert_eq!(
            spans,
            vec![
                (0, User3),
                (2, NormalText),
                (3, Keyword),
                (6, NormalText),
                (9, Operator),
                (10, NormalText),
                (11, Number),
                (12, Operator),
                (13, NormalText),
                (14, Operator),
            ]
        );
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn nesting_saturates() {
        let (_, cookie) = lex(in_code(u8::MAX), "{");
        assert_eq!(MarkupCookie::decode(cookie).nesting, u8::MAX);
        let (_, cookie) = lex(cookie, "}");
        assert_eq!(MarkupCookie::decode(cookie).nesting, u8::MAX - 1);
    }

    #[test]
    fn comments_span_lines() {
        let (spans, cookie) = lex(Cookie::default(), "a @* b");
        assert_eq!(spans, vec![(0, NormalText), (2, Comment)]);
        assert_eq!(MarkupCookie::decode(cookie).mode, HostMode::RazorComment);
        let (spans, cookie) = lex(cookie, "c *@ d");
        assert_eq!(spans, vec![(0, Comment), (4, NormalText)]);
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn directives_take_the_rest_of_the_line() {
        let (spans, cookie) = lex(Cookie::default(), "@model Foo.Bar");
        assert_eq!(spans, vec![(0, User3), (6, NormalText), (10, Operator), (11, NormalText)]);
        assert_eq!(cookie, Cookie::default());

        let (_, cookie) = lex(Cookie::default(), "@using (var x = y) {");
        assert_eq!(MarkupCookie::decode(cookie).nesting, 2);
    }

    #[test]
    fn text_tags_in_code() {
        let (spans, cookie) = lex(in_code(2), "<text>hi</text>");
        assert_eq!(
            spans,
            vec![
                (0, Operator),
                (1, User3),
                (5, Operator),
                (6, NormalText),
                (8, Operator),
                (10, User3),
                (14, Operator),
            ]
        );
        assert_eq!(MarkupCookie::decode(cookie).nesting, 2);
    }

    #[test]
    fn brace_closes_an_island() {
        let (spans, cookie) = lex(in_code(2), "<br> } x");
        assert_eq!(
            spans,
            vec![
                (0, Operator),
                (1, Keyword),
                (3, Operator),
                (4, NormalText),
                (5, Operator),
                (6, NormalText),
            ]
        );
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn verbatim_strings_span_lines() {
        let (_, cookie) = lex(in_code(2), "var s = @\"a");
        assert_eq!(MarkupCookie::decode(cookie).mode, HostMode::CodeString);
        let (_, cookie) = lex(cookie, "b\"\" } c\";");
        let st = MarkupCookie::decode(cookie);
        assert_eq!(st.mode, HostMode::Text);
        assert_eq!(st.nesting, 2);
    }
}
