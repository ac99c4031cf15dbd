// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! A table-driven lexer shared by most languages.
//!
//! A [`Syntax`] describes comments, strings, keyword tiers and a few lexical quirks.
//! [`GenericLexer`] walks a line with it. The carried state is a [`Mode`] plus a
//! preprocessor flag, packed into the low 17 bits of the cookie.

use bitflags::bitflags;

use super::keywords::{KeywordTable, is_numeric};
use super::scan::*;
use super::{ColorClass, Cookie, LineLexer, SpanEmitter};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StringFlags: u8 {
        /// The string may span lines.
        const MULTILINE = 1 << 0;
        /// Not an opener when glued to a preceding word or digit (`4'b1010`, `clk'event`).
        const NOT_AFTER_WORD = 1 << 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Escape {
    None,
    /// The character escapes whatever follows it.
    Char(char),
    /// A doubled closing delimiter is a literal one.
    Doubled,
}

#[derive(Clone, Copy, Debug)]
pub struct StringRule {
    pub open: &'static str,
    pub close: &'static str,
    pub escape: Escape,
    pub flags: StringFlags,
}

impl StringRule {
    pub const fn new(open: &'static str, close: &'static str, escape: Escape) -> Self {
        Self { open, close, escape, flags: StringFlags::empty() }
    }

    pub const fn multiline(open: &'static str, close: &'static str, escape: Escape) -> Self {
        Self { open, close, escape, flags: StringFlags::MULTILINE }
    }

    pub const fn with(self, flags: StringFlags) -> Self {
        Self { flags: self.flags.union(flags), ..self }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BlockRule {
    pub open: &'static str,
    pub close: &'static str,
    /// Both markers only count in the first column, e.g. Perl's POD.
    pub at_line_start: bool,
}

impl BlockRule {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close, at_line_start: false }
    }

    pub const fn at_line_start(open: &'static str, close: &'static str) -> Self {
        Self { open, close, at_line_start: true }
    }
}

pub struct Syntax {
    pub keywords: KeywordTable,
    /// Builtin types, colored `User1`.
    pub types: KeywordTable,
    /// Builtin functions, colored `User2`.
    pub functions: KeywordTable,
    pub line_comments: &'static [&'static str],
    /// Line comment markers that only count when nothing but whitespace precedes them.
    pub leading_comments: &'static [&'static str],
    /// Line comment markers must start a word (`#` in shells).
    pub comment_after_space: bool,
    /// Words that comment out the rest of the line, like Basic's `Rem`.
    pub comment_words: KeywordTable,
    pub block_comments: &'static [BlockRule],
    pub nested_comments: bool,
    pub strings: &'static [StringRule],
    /// Comment and string markers compare case-insensitively.
    pub markers_ignore_case: bool,
    /// Starts a preprocessor line when it is the first non-blank character.
    pub preprocessor: Option<char>,
    /// A line ending in this character carries its whole state over.
    pub continuation: Option<char>,
    /// Variable sigils, e.g. `$` in shells. The sigil and the name form one word.
    pub sigils: &'static str,
    /// Extra identifier characters besides letters, digits and `_`.
    pub ident_chars: &'static str,
    /// Characters skipped between a name and `(` when looking for calls.
    pub call_skip: &'static str,
    /// JavaScript style `/regex/` literals.
    pub regex_literals: bool,
}

impl Syntax {
    pub const DEFAULT: Syntax = Syntax {
        keywords: KeywordTable::EMPTY,
        types: KeywordTable::EMPTY,
        functions: KeywordTable::EMPTY,
        line_comments: &[],
        leading_comments: &[],
        comment_after_space: false,
        comment_words: KeywordTable::EMPTY,
        block_comments: &[],
        nested_comments: false,
        strings: &[],
        markers_ignore_case: false,
        preprocessor: None,
        continuation: None,
        sigils: "",
        ident_chars: "",
        call_skip: "",
        regex_literals: false,
    };

    /// The identifier tiers in priority order.
    fn classify_word(&self, word: &[char], line: &[char], end: usize) -> ColorClass {
        if self.keywords.contains(word) {
            ColorClass::Keyword
        } else if self.types.contains(word) {
            ColorClass::User1
        } else if self.functions.contains(word) {
            ColorClass::User2
        } else if followed_by_call(line, end, self.call_skip) {
            ColorClass::FunctionName
        } else {
            ColorClass::NormalText
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    LineComment,
    Block {
        rule: u8,
        depth: u8,
    },
    Str {
        rule: u8,
    },
    Regex,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct State {
    pub mode: Mode,
    pub preprocessor: bool,
}

const TAG_MASK: u64 = 0b111;
const RULE_SHIFT: u32 = 3;
const RULE_MASK: u64 = 0b1_1111;
const DEPTH_SHIFT: u32 = 8;
const PREPROCESSOR_BIT: u64 = 1 << 16;

impl State {
    pub fn decode(cookie: Cookie) -> Self {
        let bits = cookie.bits();
        let rule = ((bits >> RULE_SHIFT) & RULE_MASK) as u8;
        let depth = (bits >> DEPTH_SHIFT) as u8;
        let mode = match bits & TAG_MASK {
            1 => Mode::LineComment,
            2 => Mode::Block { rule, depth: depth.max(1) },
            3 => Mode::Str { rule },
            4 => Mode::Regex,
            _ => Mode::Normal,
        };
        Self { mode, preprocessor: bits & PREPROCESSOR_BIT != 0 }
    }

    pub fn encode(self) -> Cookie {
        let (tag, rule, depth) = match self.mode {
            Mode::Normal => (0, 0, 0),
            Mode::LineComment => (1, 0, 0),
            Mode::Block { rule, depth } => (2, rule, depth),
            Mode::Str { rule } => (3, rule, 0),
            Mode::Regex => (4, 0, 0),
        };
        let mut bits =
            tag | ((rule as u64 & RULE_MASK) << RULE_SHIFT) | ((depth as u64) << DEPTH_SHIFT);
        if self.preprocessor {
            bits |= PREPROCESSOR_BIT;
        }
        Cookie::from_bits(bits)
    }

    /// Drops the parts of the state that cannot outlive a line.
    fn end_of_line(self, line: &[char], syntax: &Syntax) -> Self {
        if syntax.continuation.is_some_and(|c| line.last() == Some(&c)) {
            return self;
        }
        let multiline = |rule: u8| {
            let rule = syntax.strings.get(rule as usize);
            rule.is_some_and(|r| r.flags.contains(StringFlags::MULTILINE))
        };
        let mode = match self.mode {
            Mode::Block { .. } => self.mode,
            Mode::Str { rule } if multiline(rule) => self.mode,
            _ => Mode::Normal,
        };
        Self { mode, preprocessor: false }
    }
}

pub struct GenericLexer {
    syntax: &'static Syntax,
}

impl GenericLexer {
    pub const fn new(syntax: &'static Syntax) -> Self {
        Self { syntax }
    }

    fn marker_at(&self, line: &[char], i: usize, marker: &str) -> bool {
        if marker.is_empty() {
            return false;
        }
        if self.syntax.markers_ignore_case {
            starts_with_at_ignore_case(line, i, marker)
        } else {
            starts_with_at(line, i, marker)
        }
    }

    fn base_class(st: &State) -> ColorClass {
        if st.preprocessor { ColorClass::Preprocessor } else { ColorClass::NormalText }
    }

    fn string_class(st: &State) -> ColorClass {
        if st.preprocessor { ColorClass::Preprocessor } else { ColorClass::String }
    }

    /// Lexes one token in normal mode and returns the position after it.
    fn normal(&self, st: &mut State, line: &[char], i: usize, out: &mut SpanEmitter) -> usize {
        let syn = self.syntax;
        let c = line[i];
        let at_line_start = || line[..i].iter().all(|c| c.is_whitespace());

        for (idx, rule) in syn.block_comments.iter().enumerate() {
            if rule.at_line_start && i != 0 {
                continue;
            }
            if self.marker_at(line, i, rule.open) {
                out.define(i, ColorClass::Comment);
                st.mode = Mode::Block { rule: idx as u8, depth: 1 };
                return if rule.at_line_start { line.len() } else { i + rule.open.chars().count() };
            }
        }

        if syn.preprocessor == Some(c) && at_line_start() {
            out.define(i, ColorClass::Preprocessor);
            st.preprocessor = true;
            return ident_end(line, skip_space(line, i + 1), "");
        }

        let word_start = i == 0 || line[i - 1].is_whitespace();
        let line_comment = syn.line_comments.iter().any(|m| self.marker_at(line, i, m))
            && (!syn.comment_after_space || word_start);
        let leading_comment =
            syn.leading_comments.iter().any(|m| self.marker_at(line, i, m)) && at_line_start();
        if line_comment || leading_comment {
            out.define(i, ColorClass::Comment);
            st.mode = Mode::LineComment;
            return line.len();
        }

        for (idx, rule) in syn.strings.iter().enumerate() {
            let after_word = i > 0 && is_ident_char(line[i - 1]);
            if rule.flags.contains(StringFlags::NOT_AFTER_WORD) && after_word {
                continue;
            }
            if self.marker_at(line, i, rule.open) {
                out.define(i, Self::string_class(st));
                st.mode = Mode::Str { rule: idx as u8 };
                return i + rule.open.chars().count();
            }
        }

        if syn.regex_literals && c == '/' && self.regex_allowed(line, i) {
            out.define(i, ColorClass::String);
            st.mode = Mode::Regex;
            return i + 1;
        }

        let next = at(line, i + 1);
        if c.is_ascii_digit() || (c == '.' && next.is_some_and(|n| n.is_ascii_digit())) {
            let end = number_end(line, i);
            let class = if st.preprocessor {
                ColorClass::Preprocessor
            } else if is_numeric(&line[i..end]) {
                ColorClass::Number
            } else {
                ColorClass::NormalText
            };
            out.define(i, class);
            return end;
        }

        if syn.sigils.contains(c) && next.is_some_and(is_ident_char) {
            out.define(i, Self::base_class(st));
            return ident_end(line, i + 1, syn.ident_chars);
        }

        if is_ident_start(c) || syn.ident_chars.contains(c) {
            let end = ident_end(line, i, syn.ident_chars);
            let word = &line[i..end];
            if syn.comment_words.contains(word) {
                out.define(i, ColorClass::Comment);
                st.mode = Mode::LineComment;
                return line.len();
            }
            let class = if st.preprocessor {
                ColorClass::Preprocessor
            } else {
                syn.classify_word(word, line, end)
            };
            out.define(i, class);
            return end;
        }

        if c.is_whitespace() {
            out.define(i, Self::base_class(st));
            return skip_space(line, i);
        }

        let class = if st.preprocessor {
            ColorClass::Preprocessor
        } else if c.is_control() {
            ColorClass::NormalText
        } else {
            ColorClass::Operator
        };
        out.define(i, class);
        i + 1
    }

    /// A `/` starts a regex unless it follows an operand.
    fn regex_allowed(&self, line: &[char], i: usize) -> bool {
        match prev_non_space(line, i) {
            None => true,
            Some(')' | ']' | '}') => false,
            Some(c) if is_ident_char(c) => {
                let mut end = i;
                while end > 0 && line[end - 1].is_whitespace() {
                    end -= 1;
                }
                let mut start = end;
                while start > 0 && is_ident_char(line[start - 1]) {
                    start -= 1;
                }
                self.syntax.keywords.contains(&line[start..end])
            }
            Some(_) => true,
        }
    }

    fn block(&self, st: &mut State, line: &[char], i: usize, out: &mut SpanEmitter) -> usize {
        let Mode::Block { rule, depth } = st.mode else {
            return i;
        };
        let Some(r) = self.syntax.block_comments.get(rule as usize) else {
            st.mode = Mode::Normal;
            return i;
        };

        if r.at_line_start {
            if i == 0 && self.marker_at(line, 0, r.close) {
                st.mode = Mode::Normal;
            }
            return line.len();
        }

        let mut depth = depth;
        let mut j = i;
        while j < line.len() {
            if self.syntax.nested_comments && self.marker_at(line, j, r.open) {
                depth = depth.saturating_add(1);
                j += r.open.chars().count();
                continue;
            }
            if self.marker_at(line, j, r.close) {
                j += r.close.chars().count();
                depth -= 1;
                if depth == 0 {
                    st.mode = Mode::Normal;
                    out.define(j, Self::base_class(st));
                    return j;
                }
                continue;
            }
            j += 1;
        }
        st.mode = Mode::Block { rule, depth };
        line.len()
    }

    fn string(&self, st: &mut State, line: &[char], i: usize, out: &mut SpanEmitter) -> usize {
        let Mode::Str { rule } = st.mode else {
            return i;
        };
        let Some(r) = self.syntax.strings.get(rule as usize) else {
            st.mode = Mode::Normal;
            return i;
        };

        let close_len = r.close.chars().count();
        let mut j = i;
        while j < line.len() {
            if r.escape == Escape::Char(line[j]) {
                j += 2;
                continue;
            }
            if self.marker_at(line, j, r.close) {
                if r.escape == Escape::Doubled && self.marker_at(line, j + close_len, r.close) {
                    j += 2 * close_len;
                    continue;
                }
                j += close_len;
                st.mode = Mode::Normal;
                out.define(j, Self::base_class(st));
                return j;
            }
            j += 1;
        }
        line.len()
    }

    fn regex(&self, st: &mut State, line: &[char], i: usize, out: &mut SpanEmitter) -> usize {
        let mut in_class = false;
        let mut j = i;
        while j < line.len() {
            match line[j] {
                '\\' => {
                    j += 2;
                    continue;
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    j += 1;
                    while at(line, j).is_some_and(|c| c.is_ascii_alphabetic()) {
                        j += 1;
                    }
                    st.mode = Mode::Normal;
                    out.define(j, ColorClass::NormalText);
                    return j;
                }
                _ => {}
            }
            j += 1;
        }
        line.len()
    }
}

impl LineLexer for GenericLexer {
    fn lex(&self, cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie {
        let mut st = State::decode(cookie);
        match st.mode {
            Mode::Normal => {}
            Mode::LineComment | Mode::Block { .. } => out.define(0, ColorClass::Comment),
            Mode::Str { .. } => out.define(0, Self::string_class(&st)),
            Mode::Regex => out.define(0, ColorClass::String),
        }

        let mut i = 0;
        while i < line.len() {
            i = match st.mode {
                Mode::Normal => self.normal(&mut st, line, i, out),
                Mode::LineComment => line.len(),
                Mode::Block { .. } => self.block(&mut st, line, i, out),
                Mode::Str { .. } => self.string(&mut st, line, i, out),
                Mode::Regex => self.regex(&mut st, line, i, out),
            };
        }

        st.end_of_line(line, self.syntax).encode()
    }
}
