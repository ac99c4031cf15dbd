// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Rust: nestable block comments, raw strings with `#` fences, lifetimes and macros.

use super::keywords::{KeywordTable, is_numeric};
use super::scan::*;
use super::{ColorClass, Cookie, LineLexer, SpanEmitter};

const RUST_KEYWORDS: &[&str] = &[
    "Self", "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "yield",
];

const RUST_TYPES: &[&str] = &[
    "Box", "Option", "Result", "String", "Vec", "bool", "char", "f32", "f64", "i128", "i16", "i32",
    "i64", "i8", "isize", "str", "u128", "u16", "u32", "u64", "u8", "usize",
];

const RUST_MACROS: &[&str] = &[
    "assert", "assert_eq", "assert_ne", "dbg", "debug_assert", "eprintln", "format", "matches",
    "panic", "print", "println", "todo", "unimplemented", "unreachable", "vec", "write", "writeln",
];

const KEYWORDS: KeywordTable = KeywordTable::sensitive(RUST_KEYWORDS);
const TYPES: KeywordTable = KeywordTable::sensitive(RUST_TYPES);
const MACROS: KeywordTable = KeywordTable::sensitive(RUST_MACROS);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Normal,
    String,
    RawString {
        hashes: u8,
    },
    Comment {
        depth: u8,
    },
}

impl Mode {
    fn decode(cookie: Cookie) -> Self {
        let bits = cookie.bits();
        let arg = (bits >> 8) as u8;
        match bits & 0b11 {
            1 => Mode::String,
            2 => Mode::RawString { hashes: arg },
            3 => Mode::Comment { depth: arg.max(1) },
            _ => Mode::Normal,
        }
    }

    fn encode(self) -> Cookie {
        let bits = match self {
            Mode::Normal => 0,
            Mode::String => 1,
            Mode::RawString { hashes } => 2 | (hashes as u64) << 8,
            Mode::Comment { depth } => 3 | (depth as u64) << 8,
        };
        Cookie::from_bits(bits)
    }
}

pub struct RustLexer;

impl LineLexer for RustLexer {
    fn lex(&self, cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie {
        let mut mode = Mode::decode(cookie);
        match mode {
            Mode::Normal => {}
            Mode::String | Mode::RawString { .. } => out.define(0, ColorClass::String),
            Mode::Comment { .. } => out.define(0, ColorClass::Comment),
        }

        let mut i = 0;
        while i < line.len() {
            i = match mode {
                Mode::Normal => normal(&mut mode, line, i, out),
                Mode::String => match scan_standard_string(line, i) {
                    Some(end) => {
                        mode = Mode::Normal;
                        out.define(end, ColorClass::NormalText);
                        end
                    }
                    None => line.len(),
                },
                Mode::RawString { hashes } => match find_raw_close(line, i, hashes) {
                    Some(end) => {
                        mode = Mode::Normal;
                        out.define(end, ColorClass::NormalText);
                        end
                    }
                    None => line.len(),
                },
                Mode::Comment { depth } => {
                    let (end, depth) = scan_block_comment(line, i, depth);
                    if depth == 0 {
                        mode = Mode::Normal;
                        out.define(end, ColorClass::NormalText);
                    } else {
                        mode = Mode::Comment { depth };
                    }
                    end
                }
            };
        }

        mode.encode()
    }
}

fn normal(mode: &mut Mode, line: &[char], i: usize, out: &mut SpanEmitter) -> usize {
    let c = line[i];

    if starts_with_at(line, i, "//") {
        out.define(i, ColorClass::Comment);
        return line.len();
    }
    if starts_with_at(line, i, "/*") {
        out.define(i, ColorClass::Comment);
        *mode = Mode::Comment { depth: 1 };
        return i + 2;
    }

    let after_word = i > 0 && is_ident_char(line[i - 1]);
    if !after_word {
        if let Some((hashes, body)) = raw_string_open(line, i) {
            out.define(i, ColorClass::String);
            *mode = Mode::RawString { hashes };
            return body;
        }
        if c == 'b' && at(line, i + 1) == Some('"') {
            out.define(i, ColorClass::String);
            *mode = Mode::String;
            return i + 2;
        }
        if c == 'b' && at(line, i + 1) == Some('\'') {
            if let Some(end) = scan_char_literal(line, i + 1) {
                out.define(i, ColorClass::String);
                out.define(end, ColorClass::NormalText);
                return end;
            }
        }
    }

    if c == '"' {
        out.define(i, ColorClass::String);
        *mode = Mode::String;
        return i + 1;
    }

    if c == '\'' {
        if let Some(end) = scan_char_literal(line, i) {
            out.define(i, ColorClass::String);
            out.define(end, ColorClass::NormalText);
            return end;
        }
        if at(line, i + 1).is_some_and(is_ident_start) {
            let end = ident_end(line, i + 1, "");
            out.define(i, ColorClass::User1);
            return end;
        }
        out.define(i, ColorClass::Operator);
        return i + 1;
    }

    if c.is_ascii_digit() {
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
        } else if TYPES.contains(word) {
            ColorClass::User1
        } else if MACROS.contains(word) && at(line, end) == Some('!') {
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

/// Scans the body of a `"` string starting at `i`. Returns the position after the closing
/// quote, or `None` if the string continues on the next line.
fn scan_standard_string(line: &[char], mut i: usize) -> Option<usize> {
    while i < line.len() {
        match line[i] {
            '\\' => i += 2,
            '"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Matches `r#*"` or `br#*"` at `i`. Returns the fence size and the start of the body.
fn raw_string_open(line: &[char], i: usize) -> Option<(u8, usize)> {
    let mut j = i;
    if at(line, j) == Some('b') {
        j += 1;
    }
    if at(line, j) != Some('r') {
        return None;
    }
    j += 1;
    let mut hashes = 0u8;
    while at(line, j) == Some('#') {
        hashes = hashes.saturating_add(1);
        j += 1;
    }
    if at(line, j) != Some('"') {
        return None;
    }
    Some((hashes, j + 1))
}

/// Finds a `"` followed by exactly `hashes` fence characters.
fn find_raw_close(line: &[char], mut i: usize, hashes: u8) -> Option<usize> {
    while i < line.len() {
        if line[i] == '"' {
            let mut end = i + 1;
            let mut matched = 0;
            while matched < hashes && at(line, end) == Some('#') {
                end += 1;
                matched += 1;
            }
            if matched == hashes {
                return Some(end);
            }
        }
        i += 1;
    }
    None
}

fn scan_char_literal(line: &[char], quote: usize) -> Option<usize> {
    let mut i = quote + 1;
    match at(line, i)? {
        '\\' => {
            i += 1;
            match at(line, i)? {
                'x' => {
                    i += 1;
                    let digits =
                        line[i..].iter().take(2).take_while(|c| c.is_ascii_hexdigit()).count();
                    if digits == 0 {
                        return None;
                    }
                    i += digits;
                }
                'u' => {
                    i += 1;
                    if at(line, i)? != '{' {
                        return None;
                    }
                    i += 1;
                    let digits = line[i..].iter().take_while(|c| c.is_ascii_hexdigit()).count();
                    i += digits;
                    if digits == 0 || at(line, i)? != '}' {
                        return None;
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }
        '\'' => return None,
        _ => i += 1,
    }
    (at(line, i)? == '\'').then_some(i + 1)
}

/// Scans a nestable block comment. Returns where scanning stopped and the remaining depth.
fn scan_block_comment(line: &[char], mut i: usize, mut depth: u8) -> (usize, u8) {
    while i < line.len() {
        if starts_with_at(line, i, "/*") {
            depth = depth.saturating_add(1);
            i += 2;
        } else if starts_with_at(line, i, "*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return (i, 0);
            }
        } else {
            i += 1;
        }
    }
    (line.len(), depth)
}
