// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Lua: `[==[ ]==]` long strings and `--[[ ]]` long comments with counted fences.

use super::keywords::{KeywordTable, is_numeric};
use super::scan::*;
use super::{ColorClass, Cookie, LineLexer, SpanEmitter};

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

const LUA_LIBRARIES: &[&str] =
    &["coroutine", "debug", "io", "math", "os", "package", "string", "table", "utf8"];

const LUA_FUNCTIONS: &[&str] = &[
    "assert", "collectgarbage", "dofile", "error", "getmetatable", "ipairs", "load", "loadfile",
    "next", "pairs", "pcall", "print", "rawequal", "rawget", "rawlen", "rawset", "require",
    "select", "setmetatable", "tonumber", "tostring", "type", "xpcall",
];

const KEYWORDS: KeywordTable = KeywordTable::sensitive(LUA_KEYWORDS);
const LIBRARIES: KeywordTable = KeywordTable::sensitive(LUA_LIBRARIES);
const FUNCTIONS: KeywordTable = KeywordTable::sensitive(LUA_FUNCTIONS);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Normal,
    LongString {
        level: u8,
    },
    LongComment {
        level: u8,
    },
    /// A quoted string continued with a trailing backslash.
    Quoted {
        quote: char,
    },
}

impl Mode {
    fn decode(cookie: Cookie) -> Self {
        let bits = cookie.bits();
        let level = (bits >> 8) as u8;
        match bits & 0b111 {
            1 => Mode::LongString { level },
            2 => Mode::LongComment { level },
            3 => Mode::Quoted { quote: '"' },
            4 => Mode::Quoted { quote: '\'' },
            _ => Mode::Normal,
        }
    }

    fn encode(self) -> Cookie {
        let bits = match self {
            Mode::Normal => 0,
            Mode::LongString { level } => 1 | (level as u64) << 8,
            Mode::LongComment { level } => 2 | (level as u64) << 8,
            Mode::Quoted { quote: '"' } => 3,
            Mode::Quoted { .. } => 4,
        };
        Cookie::from_bits(bits)
    }
}

/// Matches `[`, any number of `=`, `[` at `i`. Returns the level and the body start.
fn long_bracket_open(line: &[char], i: usize) -> Option<(u8, usize)> {
    if at(line, i) != Some('[') {
        return None;
    }
    let mut j = i + 1;
    let mut level = 0u8;
    while at(line, j) == Some('=') {
        level = level.saturating_add(1);
        j += 1;
    }
    (at(line, j) == Some('[')).then_some((level, j + 1))
}

/// Finds `]`, exactly `level` `=`, `]`. Returns the position after it.
fn find_long_close(line: &[char], mut i: usize, level: u8) -> Option<usize> {
    while i < line.len() {
        if line[i] == ']' {
            let mut j = i + 1;
            let mut n = 0usize;
            while at(line, j) == Some('=') {
                n += 1;
                j += 1;
            }
            if n == level as usize && at(line, j) == Some(']') {
                return Some(j + 1);
            }
        }
        i += 1;
    }
    None
}

/// Scans a quoted string body. `None` means the line ended first.
fn find_quote_close(line: &[char], from: usize, quote: char) -> Option<usize> {
    (from..line.len()).find(|&j| line[j] == quote && !is_escaped(line, j)).map(|j| j + 1)
}

pub struct LuaLexer;

impl LineLexer for LuaLexer {
    fn lex(&self, cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie {
        let mut mode = Mode::decode(cookie);
        match mode {
            Mode::Normal => {}
            Mode::LongString { .. } | Mode::Quoted { .. } => out.define(0, ColorClass::String),
            Mode::LongComment { .. } => out.define(0, ColorClass::Comment),
        }

        let mut i = 0;
        while i < line.len() {
            i = match mode {
                Mode::Normal => normal(&mut mode, line, i, out),
                Mode::LongString { level } | Mode::LongComment { level } => {
                    match find_long_close(line, i, level) {
                        Some(end) => {
                            mode = Mode::Normal;
                            out.define(end, ColorClass::NormalText);
                            end
                        }
                        None => line.len(),
                    }
                }
                Mode::Quoted { quote } => match find_quote_close(line, i, quote) {
                    Some(end) => {
                        mode = Mode::Normal;
                        out.define(end, ColorClass::NormalText);
                        end
                    }
                    None => line.len(),
                },
            };
        }

        // A quoted string only survives the line through an escaped newline.
        if let Mode::Quoted { .. } = mode {
            if !(line.last() == Some(&'\\') && is_escaped(line, line.len())) {
                mode = Mode::Normal;
            }
        }
        mode.encode()
    }
}

fn normal(mode: &mut Mode, line: &[char], i: usize, out: &mut SpanEmitter) -> usize {
    let c = line[i];

    if starts_with_at(line, i, "--") {
        out.define(i, ColorClass::Comment);
        if let Some((level, body)) = long_bracket_open(line, i + 2) {
            *mode = Mode::LongComment { level };
            return body;
        }
        return line.len();
    }

    if let Some((level, body)) = long_bracket_open(line, i) {
        out.define(i, ColorClass::String);
        *mode = Mode::LongString { level };
        return body;
    }

    if c == '"' || c == '\'' {
        out.define(i, ColorClass::String);
        *mode = Mode::Quoted { quote: c };
        return i + 1;
    }

    if c.is_ascii_digit() || (c == '.' && at(line, i + 1).is_some_and(|n| n.is_ascii_digit())) {
        let end = number_end(line, i);
        let class =
            if is_numeric(&line[i..end]) { ColorClass::Number } else { ColorClass::NormalText };
        out.define(i, class);
        return end;
    }

    if is_ident_start(c) {
        let end = ident_end(line, i, "");
        let word = &line[i..end];
        let class = if KEYWORDS.contains(word) {
            ColorClass::Keyword
        } else if LIBRARIES.contains(word) {
            ColorClass::User1
        } else if FUNCTIONS.contains(word) {
            ColorClass::User2
        } else if followed_by_call(line, end, "!") {
            ColorClass::FunctionName
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

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::keywords::assert_table_consistent;
    use crate::highlight::{ColorClass::*, lex_line};

    fn lex(cookie: Cookie, text: &str) -> (Vec<(usize, ColorClass)>, Cookie) {
        let line: Vec<char> = text.chars().collect();
        let (spans, cookie) = lex_line(&LuaLexer, cookie, &line, line.len());
        (spans.iter().map(|s| (s.start, s.class)).collect(), cookie)
    }

    #[test]
    fn tables_are_sorted() {
        assert_table_consistent("lua", &KEYWORDS);
        assert_table_consistent("lua libraries", &LIBRARIES);
        assert_table_consistent("lua functions", &FUNCTIONS);
    }

    #[test]
    fn long_string_fences_must_match() {
        let (_, cookie) = lex(Cookie::default(), "s = [==[ a");
        assert_eq!(Mode::decode(cookie), Mode::LongString { level: 2 });

        let (spans, cookie) = lex(cookie, "]=] ]] still");
        assert_eq!(spans, vec![(0, String)]);
        assert_eq!(Mode::decode(cookie), Mode::LongString { level: 2 });

        let (spans, cookie) = lex(cookie, "x ]==] .. y");
        assert_eq!(spans, vec![(0, String), (6, NormalText), (7, Operator), (9, NormalText)]);
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn long_comments() {
        let (spans, cookie) = lex(Cookie::default(), "f() --[[ start");
        assert_eq!(spans, vec![(0, FunctionName), (1, Operator), (3, NormalText), (4, Comment)]);
        let (spans, cookie) = lex(cookie, "end ]] return");
        assert_eq!(spans, vec![(0, Comment), (6, NormalText), (7, Keyword)]);
        assert_eq!(cookie, Cookie::default());

        let (_, cookie) = lex(Cookie::default(), "-- [[ not long");
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn quoted_strings_and_escapes() {
        let (spans, _) = lex(Cookie::default(), r#"print("a\"b", 'c\\')"#);
        assert_eq!(
            spans,
            vec![
                (0, User2),
                (5, Operator),
                (6, String),
                (12, Operator),
                (13, NormalText),
                (14, String),
                (19, Operator),
            ]
        );

        let (_, cookie) = lex(Cookie::default(), "s = \"abc\\");
        assert_eq!(Mode::decode(cookie), Mode::Quoted { quote: '"' });
        let (_, cookie) = lex(Cookie::default(), "s = \"abc");
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn unreserved_int_is_a_call() {
        let (spans, _) = lex(Cookie::default(), "int(x) string.format(y)");
        assert_eq!(spans[0], (0, FunctionName));
        assert!(spans.contains(&(7, User1)));
        assert!(spans.contains(&(14, FunctionName)));
    }
}
