// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Markdown: headings, fenced code blocks, inline code spans and `<!-- -->` comments.

use super::scan::*;
use super::{ColorClass, Cookie, LineLexer, SpanEmitter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Normal,
    /// Inside a fenced code block opened by `count` backticks or tildes.
    Fence { tilde: bool, count: u8 },
    Comment,
}

impl Mode {
    fn decode(cookie: Cookie) -> Self {
        let bits = cookie.bits();
        match bits & 0b11 {
            1 => Mode::Fence { tilde: bits & 0b100 != 0, count: (bits >> 8) as u8 },
            2 => Mode::Comment,
            _ => Mode::Normal,
        }
    }

    fn encode(self) -> Cookie {
        Cookie::from_bits(match self {
            Mode::Normal => 0,
            Mode::Fence { tilde, count } => 1 | (tilde as u64) << 2 | (count as u64) << 8,
            Mode::Comment => 2,
        })
    }
}

/// A run of at least three fence characters at `i`.
fn fence_at(line: &[char], i: usize) -> Option<(bool, u8)> {
    let ch = at(line, i)?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let count = line[i..].iter().take_while(|&&c| c == ch).count();
    (count >= 3).then_some((ch == '~', count.min(u8::MAX as usize) as u8))
}

pub struct MarkdownLexer;

impl LineLexer for MarkdownLexer {
    fn lex(&self, cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie {
        let indent = skip_space(line, 0);

        match Mode::decode(cookie) {
            Mode::Fence { tilde, count } => {
                // Closing fences are at least as long as the opening one and carry no info string.
                let closes = fence_at(line, indent).is_some_and(|(t, n)| {
                    t == tilde && n >= count && skip_space(line, indent + n as usize) == line.len()
                });
                if closes {
                    out.define(0, ColorClass::Comment);
                    return Cookie::default();
                }
                out.define(0, ColorClass::String);
                return cookie;
            }
            Mode::Comment => {
                out.define(0, ColorClass::Comment);
                match find(line, 0, "-->") {
                    Some(p) => {
                        out.define(p + 3, ColorClass::NormalText);
                        inline(line, p + 3, out).encode()
                    }
                    None => cookie,
                }
            }
            Mode::Normal => {
                out.define(0, ColorClass::NormalText);
                if let Some((tilde, count)) = fence_at(line, indent) {
                    out.define(0, ColorClass::Comment);
                    return Mode::Fence { tilde, count }.encode();
                }
                if at(line, indent) == Some('#') {
                    out.define(0, ColorClass::Keyword);
                    return Cookie::default();
                }
                let body = block_marker(line, indent, out);
                inline(line, body, out).encode()
            }
        }
    }
}

/// Colors a blockquote or list marker and returns where the text after it begins.
fn block_marker(line: &[char], i: usize, out: &mut SpanEmitter) -> usize {
    let marker_end = match at(line, i) {
        Some('>') => Some(i + 1),
        Some('-' | '*' | '+') if at(line, i + 1).is_some_and(char::is_whitespace) => Some(i + 1),
        Some(c) if c.is_ascii_digit() => {
            let mut j = i;
            while at(line, j).is_some_and(|c| c.is_ascii_digit()) {
                j += 1;
            }
            let ordered = matches!(at(line, j), Some('.' | ')'))
                && at(line, j + 1).is_some_and(char::is_whitespace);
            ordered.then_some(j + 1)
        }
        _ => None,
    };

    match marker_end {
        Some(end) => {
            out.define(i, ColorClass::Operator);
            out.define(end, ColorClass::NormalText);
            end
        }
        None => i,
    }
}

fn inline(line: &[char], mut i: usize, out: &mut SpanEmitter) -> Mode {
    while i < line.len() {
        if line[i] == '`' {
            let ticks = line[i..].iter().take_while(|&&c| c == '`').count();
            let mut end = line.len();
            let mut j = i + ticks;
            while j < line.len() {
                let run = line[j..].iter().take_while(|&&c| c == '`').count();
                if run == ticks {
                    end = j + run;
                    break;
                }
                j += run.max(1);
            }
            out.define(i, ColorClass::String);
            out.define(end, ColorClass::NormalText);
            i = end;
        } else if starts_with_at(line, i, "<!--") {
            out.define(i, ColorClass::Comment);
            match find(line, i + 4, "-->") {
                Some(p) => {
                    i = p + 3;
                    out.define(i, ColorClass::NormalText);
                }
                None => return Mode::Comment,
            }
        } else {
            i += 1;
        }
    }
    Mode::Normal
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::{ColorClass::*, lex_line};

    fn lex(cookie: Cookie, text: &str) -> (Vec<(usize, ColorClass)>, Cookie) {
        let line: Vec<char> = text.chars().collect();
        let (spans, cookie) = lex_line(&MarkdownLexer, cookie, &line, line.len());
        (spans.iter().map(|s| (s.start, s.class)).collect(), cookie)
    }

    #[test]
    fn headings_are_whole_lines() {
        assert_eq!(lex(Cookie::default(), "## Title `x`").0, vec![(0, Keyword)]);
    }

    #[test]
    fn inline_code() {
        let (spans, _) = lex(Cookie::default(), "use `a` or ``b`c``");
        assert_eq!(spans, vec![(0, NormalText), (4, String), (7, NormalText), (11, String)]);
        let (spans, cookie) = lex(Cookie::default(), "open `code");
        assert_eq!(spans, vec![(0, NormalText), (5, String)]);
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn fences_span_lines() {
        let (spans, cookie) = lex(Cookie::default(), "````rust");
        assert_eq!(spans, vec![(0, Comment)]);
        assert_eq!(Mode::decode(cookie), Mode::Fence { tilde: false, count: 4 });

        let (spans, cookie) = lex(cookie, "# not a heading");
        assert_eq!(spans, vec![(0, String)]);
        let (_, cookie) = lex(cookie, "```");
        assert_eq!(Mode::decode(cookie), Mode::Fence { tilde: false, count: 4 });
        let (_, cookie) = lex(cookie, "~~~~");
        assert_eq!(Mode::decode(cookie), Mode::Fence { tilde: false, count: 4 });

        let (spans, cookie) = lex(cookie, "  `````  ");
        assert_eq!(spans, vec![(0, Comment)]);
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn comments_span_lines() {
        let (spans, cookie) = lex(Cookie::default(), "text <!-- hidden");
        assert_eq!(spans, vec![(0, NormalText), (5, Comment)]);
        assert_eq!(Mode::decode(cookie), Mode::Comment);
        let (spans, cookie) = lex(cookie, "still --> `x`");
        assert_eq!(spans, vec![(0, Comment), (9, NormalText), (10, String)]);
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn block_markers() {
        assert_eq!(lex(Cookie::default(), "> quote").0, vec![(0, Operator), (1, NormalText)]);
        assert_eq!(
            lex(Cookie::default(), "  - item").0,
            vec![(0, NormalText), (2, Operator), (3, NormalText)]
        );
        assert_eq!(lex(Cookie::default(), "12. item").0, vec![(0, Operator), (3, NormalText)]);
        assert_eq!(lex(Cookie::default(), "-not a list").0, vec![(0, NormalText)]);
    }
}
