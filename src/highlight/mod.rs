// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Syntax highlighting module.
//!
//! Every language implements line-at-a-time lexing with an opaque [`Cookie`] that carries
//! multi-line constructs (block comments, long strings, script regions) to the next line.
//! Lexers report colors through a [`SpanEmitter`], which coalesces and orders the spans.

pub mod batch;
pub mod classic;
pub mod clike;
pub mod css;
pub mod dispatch;
mod emitter;
pub mod generic;
pub mod ini;
pub mod keywords;
pub mod lua;
pub mod markdown;
pub mod markup;
mod razor;
pub mod rust;
mod scan;
pub mod script;

use std::fmt::Debug;

pub use emitter::SpanEmitter;

/// Lines longer than this are only lexed up to the cap.
pub const MAX_LINE_LEN: usize = 32 * 1024;

/// Symbolic theme slot. Never resolved to a color here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorClass {
    Background,
    #[default]
    NormalText,
    Keyword,
    FunctionName,
    Comment,
    Number,
    Operator,
    String,
    Preprocessor,
    /// Builtin types, HTML attribute names.
    User1,
    /// Builtin functions, HTML entities.
    User2,
    /// Razor transitions.
    User3,
}

/// A colored span. It extends until the next span's `start` or the end of the line.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ColorSpan {
    pub start: usize,
    pub class: ColorClass,
    pub background: ColorClass,
}

impl ColorSpan {
    pub fn new(start: usize, class: ColorClass) -> Self {
        Self { start, class, background: ColorClass::Background }
    }
}

impl Debug for ColorSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {:?})", self.start, self.class)
    }
}

/// Opaque per-line carry-over state. The default value is the start-of-file state.
///
/// Each lexer decodes the bits into its own typed state. Only the markup family shares a
/// documented layout, see [`dispatch::MarkupCookie`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cookie(u64);

impl Cookie {
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }
}

/// A per-language state machine.
pub trait LineLexer: Send + Sync {
    /// Lexes `line`, which is already clamped to its authoritative length, starting in
    /// `cookie`. Returns the cookie for the next line.
    fn lex(&self, cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie;
}

/// Uncolored text.
pub struct PlainLexer;

impl LineLexer for PlainLexer {
    fn lex(&self, _cookie: Cookie, _line: &[char], out: &mut SpanEmitter) -> Cookie {
        out.define(0, ColorClass::NormalText);
        Cookie::default()
    }
}

/// Lexes one line and returns its spans together with the cookie for the next line.
///
/// Never reads past `len` (clamped to the slice). Characters beyond [`MAX_LINE_LEN`] are
/// rendered as normal text.
pub fn lex_line(
    lexer: &dyn LineLexer,
    cookie: Cookie,
    line: &[char],
    len: usize,
) -> (Vec<ColorSpan>, Cookie) {
    let len = len.min(line.len());
    let capped = len.min(MAX_LINE_LEN);

    let mut out = SpanEmitter::new(len);
    let next = lexer.lex(cookie, &line[..capped], &mut out);
    if capped < len {
        out.define(capped, ColorClass::NormalText);
    }
    (out.finish(), next)
}
