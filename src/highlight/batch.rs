// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Windows batch files: `rem` and `::` comments, `:labels`, `%var%` and `!var!` expansions.
//!
//! Every construct ends with its line, so the cookie is always the default.

use super::keywords::KeywordTable;
use super::scan::*;
use super::{ColorClass, Cookie, LineLexer, SpanEmitter};

const BATCH_KEYWORDS: &[&str] = &[
    "call", "cd", "choice", "cls", "copy", "defined", "del", "do", "echo", "else", "endlocal",
    "equ", "errorlevel", "exist", "exit", "for", "geq", "goto", "gtr", "if", "in", "leq", "lss",
    "md", "mkdir", "neq", "not", "off", "on", "pause", "popd", "pushd", "rd", "ren", "set",
    "setlocal", "shift", "start", "title",
];

const KEYWORDS: KeywordTable = KeywordTable::insensitive(BATCH_KEYWORDS);

pub struct BatchLexer;

impl LineLexer for BatchLexer {
    fn lex(&self, _cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie {
        let len = line.len();
        let mut i = skip_space(line, 0);
        if i >= len {
            return Cookie::default();
        }
        out.define(0, ColorClass::NormalText);

        if at(line, i) == Some(':') {
            // `::` is the idiomatic comment, `:name` a jump target.
            let class = if at(line, i + 1) == Some(':') {
                ColorClass::Comment
            } else {
                ColorClass::FunctionName
            };
            out.define(i, class);
            if class == ColorClass::FunctionName {
                let end = ident_end(line, i + 1, "-.");
                out.define(end, ColorClass::NormalText);
            }
            return Cookie::default();
        }

        let mut command_start = true;
        while i < len {
            let c = line[i];

            if command_start && c == '@' {
                out.define(i, ColorClass::Operator);
                i += 1;
                continue;
            }
            if command_start && is_rem(line, i) {
                out.define(i, ColorClass::Comment);
                return Cookie::default();
            }

            i = match c {
                '"' => {
                    let end = (i + 1..len).find(|&j| line[j] == '"').map_or(len, |j| j + 1);
                    out.define(i, ColorClass::String);
                    out.define(end, ColorClass::NormalText);
                    end
                }
                '%' | '!' => {
                    let end = expansion_end(line, i);
                    if end > i + 1 {
                        out.define(i, ColorClass::User1);
                        out.define(end, ColorClass::NormalText);
                    } else {
                        out.define(i, ColorClass::Operator);
                        out.define(end, ColorClass::NormalText);
                    }
                    end
                }
                '|' | '&' | '(' => {
                    out.define(i, ColorClass::Operator);
                    out.define(i + 1, ColorClass::NormalText);
                    command_start = true;
                    i = skip_space(line, i + 1);
                    continue;
                }
                '<' | '>' | ')' | '=' => {
                    out.define(i, ColorClass::Operator);
                    out.define(i + 1, ColorClass::NormalText);
                    i + 1
                }
                _ if c.is_ascii_digit() => {
                    let mut end = i;
                    while at(line, end).is_some_and(|c| c.is_ascii_digit()) {
                        end += 1;
                    }
                    if at(line, end).is_some_and(is_ident_char) {
                        ident_end(line, end, "")
                    } else {
                        out.define(i, ColorClass::Number);
                        out.define(end, ColorClass::NormalText);
                        end
                    }
                }
                _ if is_ident_start(c) => {
                    let end = ident_end(line, i, "");
                    if KEYWORDS.contains(&line[i..end]) {
                        out.define(i, ColorClass::Keyword);
                        out.define(end, ColorClass::NormalText);
                    }
                    end
                }
                _ => i + 1,
            };
            command_start = false;
        }

        Cookie::default()
    }
}

/// `rem` followed by whitespace or the end of the line.
fn is_rem(line: &[char], i: usize) -> bool {
    starts_with_at_ignore_case(line, i, "rem") && at(line, i + 3).is_none_or(char::is_whitespace)
}

/// The end of a `%var%`, `%1`, `%~dp0`, `%%i` or `!var!` expansion starting at `i`.
/// Returns `i + 1` if there is none.
fn expansion_end(line: &[char], i: usize) -> usize {
    let sigil = line[i];
    let next = at(line, i + 1);

    if sigil == '%' {
        match next {
            Some(c) if c.is_ascii_digit() || c == '*' => return i + 2,
            Some('%') if at(line, i + 2).is_some_and(is_ident_char) => return i + 3,
            Some('~') => {
                let mut j = i + 2;
                while at(line, j).is_some_and(|c| c.is_ascii_alphabetic()) {
                    j += 1;
                }
                if at(line, j).is_some_and(|c| c.is_ascii_digit()) {
                    return j + 1;
                }
                return i + 1;
            }
            _ => {}
        }
    }

    let mut j = i + 1;
    while let Some(c) = at(line, j) {
        if c == sigil {
            return if j > i + 1 { j + 1 } else { i + 1 };
        }
        if c.is_whitespace() || c == '"' {
            break;
        }
        j += 1;
    }
    i + 1
}
