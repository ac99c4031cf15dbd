// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! INI file lexer.
//!
//! Covers `.ini`, registry exports and project files:
//! - Sections: `[section]`, `[HKEY_CURRENT_USER\Software]`
//! - Key-value pairs: `key = value`, `"key"="value"`
//! - Comments: `;` and `#`
//! - Quoted strings, numbers and booleans in values
//!
//! No multi-line state is needed for this format.

use super::scan::skip_space;
use super::{ColorClass, Cookie, LineLexer, SpanEmitter};

pub struct IniLexer;

impl LineLexer for IniLexer {
    fn lex(&self, _cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie {
        let len = line.len();
        let mut i = skip_space(line, 0);
        if i >= len {
            return Cookie::default();
        }
        out.define(0, ColorClass::NormalText);

        if is_comment_char(line[i]) {
            out.define(i, ColorClass::Comment);
            return Cookie::default();
        }

        if line[i] == '[' {
            out.define(i, ColorClass::Operator);
            i += 1;
            out.define(i, ColorClass::Keyword);
            while i < len && line[i] != ']' {
                i += 1;
            }
            if i < len {
                out.define(i, ColorClass::Operator);
                i += 1;
            }
            out.define(i, ColorClass::NormalText);
            i = skip_space(line, i);
            if i < len && is_comment_char(line[i]) {
                out.define(i, ColorClass::Comment);
            }
            return Cookie::default();
        }

        // A quoted key, as in registry exports.
        if line[i] == '"' {
            let end = scan_quoted(line, i);
            out.define(i, ColorClass::String);
            out.define(end, ColorClass::NormalText);
            i = skip_space(line, end);
            if i < len && line[i] == '=' {
                out.define(i, ColorClass::Operator);
                out.define(i + 1, ColorClass::NormalText);
                value(line, i + 1, out);
            }
            return Cookie::default();
        }

        let key_start = i;
        while i < len && line[i] != '=' && line[i] != ':' && !is_comment_char(line[i]) {
            i += 1;
        }

        if i < len && (line[i] == '=' || line[i] == ':') {
            let mut key_end = i;
            while key_end > key_start && line[key_end - 1].is_whitespace() {
                key_end -= 1;
            }
            if key_end > key_start {
                out.define(key_start, ColorClass::User1);
                out.define(key_end, ColorClass::NormalText);
            }
            out.define(i, ColorClass::Operator);
            out.define(i + 1, ColorClass::NormalText);
            value(line, i + 1, out);
        } else if i < len {
            out.define(i, ColorClass::Comment);
        }

        Cookie::default()
    }
}

fn is_comment_char(ch: char) -> bool {
    ch == ';' || ch == '#'
}

fn scan_quoted(line: &[char], start: usize) -> usize {
    let quote = line[start];
    let mut i = start + 1;
    while i < line.len() && line[i] != quote {
        if line[i] == '\\' {
            i += 1;
        }
        i += 1;
    }
    (i + 1).min(line.len())
}

fn value(line: &[char], mut i: usize, out: &mut SpanEmitter) {
    let len = line.len();
    while i < len {
        i = skip_space(line, i);
        if i >= len {
            break;
        }

        match line[i] {
            // Inline comments need whitespace in front.
            ';' | '#' if i > 0 && line[i - 1].is_whitespace() => {
                out.define(i, ColorClass::Comment);
                return;
            }
            '"' | '\'' => {
                let end = scan_quoted(line, i);
                out.define(i, ColorClass::String);
                out.define(end, ColorClass::NormalText);
                i = end;
            }
            _ => {
                let start = i;
                while i < len && !(is_comment_char(line[i]) && line[i - 1].is_whitespace()) {
                    i += 1;
                }
                let mut end = i;
                while end > start && line[end - 1].is_whitespace() {
                    end -= 1;
                }
                out.define(start, classify_value(&line[start..end]));
                out.define(end, ColorClass::NormalText);
            }
        }
    }
}

fn classify_value(val: &[char]) -> ColorClass {
    let text: String = val.iter().collect();
    if ["true", "false", "yes", "no", "on", "off"].iter().any(|w| text.eq_ignore_ascii_case(w)) {
        return ColorClass::Keyword;
    }
    if is_number(val) {
        return ColorClass::Number;
    }
    ColorClass::NormalText
}

fn is_number(val: &[char]) -> bool {
    let mut i = 0;
    if matches!(val.first(), Some('+' | '-')) {
        i += 1;
    }
    if let ['0', 'x' | 'X', digits @ ..] = &val[i..] {
        return !digits.is_empty() && digits.iter().all(|c| c.is_ascii_hexdigit());
    }

    let mut has_digit = false;
    while i < val.len() && val[i].is_ascii_digit() {
        has_digit = true;
        i += 1;
    }
    if i < val.len() && val[i] == '.' {
        i += 1;
        while i < val.len() && val[i].is_ascii_digit() {
            has_digit = true;
            i += 1;
        }
    }

    has_digit && i == val.len()
}
