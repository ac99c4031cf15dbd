// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Sub-language selection for the markup hosts and the cookie they share.
//!
//! A host recognizes an embedding (`<script>`, `<?`, `<%`, a Razor `@`), picks a
//! [`SubLanguage`] and hands the enclosed range of the line to that language's lexer
//! through [`SpanEmitter::embed`]. The sub-lexer's own state rides along in
//! [`MarkupCookie::inner`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::classic::{BASIC_LEXER, VBSCRIPT_LEXER};
use super::clike::{CSHARP_LEXER, JAVA_LEXER, JAVASCRIPT_LEXER, PHP_LEXER};
use super::css::CssLexer;
use super::script::PERL_LEXER;
use super::{Cookie, LineLexer, SpanEmitter};
use crate::pattern::matches_spec;

/// A language that can run inside a markup host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubLanguage {
    Basic = 1,
    CSharp,
    Java,
    Perl,
    Php,
    JavaScript,
    VbScript,
    Css,
    Mwsl,
}

impl SubLanguage {
    const ALL: [SubLanguage; 9] = [
        SubLanguage::Basic,
        SubLanguage::CSharp,
        SubLanguage::Java,
        SubLanguage::Perl,
        SubLanguage::Php,
        SubLanguage::JavaScript,
        SubLanguage::VbScript,
        SubLanguage::Css,
        SubLanguage::Mwsl,
    ];

    /// A non-zero 4-bit code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|lang| lang.code() == code)
    }

    pub fn lexer(self) -> &'static dyn LineLexer {
        match self {
            SubLanguage::Basic => &BASIC_LEXER,
            SubLanguage::VbScript => &VBSCRIPT_LEXER,
            SubLanguage::CSharp => &CSHARP_LEXER,
            SubLanguage::Java => &JAVA_LEXER,
            SubLanguage::JavaScript | SubLanguage::Mwsl => &JAVASCRIPT_LEXER,
            SubLanguage::Perl => &PERL_LEXER,
            SubLanguage::Php => &PHP_LEXER,
            SubLanguage::Css => &CssLexer,
        }
    }
}

/// What a `language=`/`type=` value asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Script(SubLanguage),
    /// Render the element content as host markup.
    Markup,
}

const SELECTORS: &[(&str, Selection)] = &[
    ("VB", Selection::Script(SubLanguage::Basic)),
    ("C#", Selection::Script(SubLanguage::CSharp)),
    ("JAVA", Selection::Script(SubLanguage::Java)),
    ("PERL", Selection::Script(SubLanguage::Perl)),
    ("PHP", Selection::Script(SubLanguage::Php)),
    ("JS*;JAVAS*", Selection::Script(SubLanguage::JavaScript)),
    ("VBS*", Selection::Script(SubLanguage::VbScript)),
    ("CSS", Selection::Script(SubLanguage::Css)),
    ("MWSL", Selection::Script(SubLanguage::Mwsl)),
    ("x-jquery-tmpl", Selection::Markup),
];

impl Selection {
    /// Maps a selector such as `JavaScript`, `VBScript` or `C#`. Case-insensitive, first
    /// match wins.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        SELECTORS.iter().find(|(spec, _)| matches_spec(spec, name)).map(|&(_, selection)| selection)
    }

    /// Like [`Selection::lookup`], but unknown selectors fall back to markup.
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::debug!(selector = name, "unknown sub-language, rendering as markup");
            Selection::Markup
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    /// `<script>` element content.
    Script,
    /// `<style>` element content.
    Style,
    /// `<? ?>` or `<% %>` block.
    Inline,
}

/// An open scripting region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub language: SubLanguage,
}

/// Where the host is between two embeddings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostMode {
    #[default]
    Text,
    /// Inside `<name ... >`.
    Tag,
    /// Inside a `"` attribute value.
    TagDouble,
    /// Inside a `'` attribute value.
    TagSingle,
    /// Inside `<!DOCTYPE ... >` or another `<!` declaration.
    Declaration,
    Comment,
    CData,
    /// A `<? ?>` or `<% %>` block with no script language.
    Pi,
    /// A `<%@ ... %>` page directive.
    Directive,
    /// Razor `@* *@`.
    RazorComment,
    /// A string inside a Razor code block.
    CodeString,
    /// A `/* */` comment inside a Razor code block.
    CodeComment,
    /// A Razor block closed at the end of the previous line. A continuation keyword at the
    /// start of the next non-blank line reopens it.
    BlockEnd,
}

impl HostMode {
    const ALL: [HostMode; 13] = [
        HostMode::Text,
        HostMode::Tag,
        HostMode::TagDouble,
        HostMode::TagSingle,
        HostMode::Declaration,
        HostMode::Comment,
        HostMode::CData,
        HostMode::Pi,
        HostMode::Directive,
        HostMode::RazorComment,
        HostMode::CodeString,
        HostMode::CodeComment,
        HostMode::BlockEnd,
    ];

    fn from_bits(bits: u8) -> Self {
        Self::ALL.get(bits as usize).copied().unwrap_or_default()
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MarkupFlags: u8 {
        /// The open tag is `<script`.
        const SCRIPT_TAG = 1 << 0;
        /// The open tag is `<style`.
        const STYLE_TAG = 1 << 1;
        /// A `language` attribute name was seen, its value has not.
        const AWAIT_LANGUAGE = 1 << 2;
        /// A `type` attribute name was seen, its value has not.
        const AWAIT_TYPE = 1 << 3;
        /// A markup run inside a Razor code block.
        const ISLAND = 1 << 4;
        /// The current `<%` block closes with `%>` rather than `?>`.
        const PERCENT = 1 << 5;
    }
}

/// The cookie of the markup-hosting lexers.
///
/// Bit layout of the encoded [`Cookie`]:
///
/// | bits  | field |
/// |-------|-------|
/// | 0-31  | `inner` |
/// | 32-35 | `mode` |
/// | 36-41 | `flags` |
/// | 42-45 | `region` language, 0 if none |
/// | 46-47 | `region` kind |
/// | 48-51 | `pending`, 0 if none, 15 for markup |
/// | 52-55 | `page_default`, 0 if none |
/// | 56-63 | `nesting` |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkupCookie {
    pub region: Option<Region>,
    /// The language chosen by a `language=`/`type=` attribute, waiting for the tag's `>`.
    pub pending: Option<Selection>,
    /// Set by `<%@ language=... %>`.
    pub page_default: Option<SubLanguage>,
    /// Razor brace nesting. Saturates at `u8::MAX`.
    pub nesting: u8,
    pub mode: HostMode,
    pub flags: MarkupFlags,
    /// The sub-lexer's cookie.
    pub inner: u32,
}

const PENDING_MARKUP: u64 = 15;

impl MarkupCookie {
    pub fn decode(cookie: Cookie) -> Self {
        let bits = cookie.bits();
        let field = |shift: u32, width: u32| (bits >> shift) & ((1 << width) - 1);

        let region = SubLanguage::from_code(field(42, 4) as u8).map(|language| Region {
            kind: match field(46, 2) {
                0 => RegionKind::Script,
                1 => RegionKind::Style,
                _ => RegionKind::Inline,
            },
            language,
        });
        let pending = match field(48, 4) {
            PENDING_MARKUP => Some(Selection::Markup),
            code => SubLanguage::from_code(code as u8).map(Selection::Script),
        };

        Self {
            region,
            pending,
            page_default: SubLanguage::from_code(field(52, 4) as u8),
            nesting: field(56, 8) as u8,
            mode: HostMode::from_bits(field(32, 4) as u8),
            flags: MarkupFlags::from_bits_truncate(field(36, 6) as u8),
            inner: bits as u32,
        }
    }

    pub fn encode(self) -> Cookie {
        let (region_lang, region_kind) = match self.region {
            Some(region) => (
                region.language.code() as u64,
                match region.kind {
                    RegionKind::Script => 0,
                    RegionKind::Style => 1,
                    RegionKind::Inline => 2,
                },
            ),
            None => (0, 0),
        };
        let pending = match self.pending {
            Some(Selection::Script(lang)) => lang.code() as u64,
            Some(Selection::Markup) => PENDING_MARKUP,
            None => 0,
        };
        let page_default = self.page_default.map_or(0, |lang| lang.code() as u64);

        Cookie::from_bits(
            self.inner as u64
                | (self.mode as u64) << 32
                | (self.flags.bits() as u64) << 36
                | region_lang << 42
                | region_kind << 46
                | pending << 48
                | page_default << 52
                | (self.nesting as u64) << 56,
        )
    }
}

/// Runs `language` over `line[begin..end]` starting in `inner` and splices its spans at
/// `begin`. Returns the sub-lexer's cookie for whatever follows.
pub(crate) fn run_embedded(
    language: SubLanguage,
    inner: u32,
    line: &[char],
    begin: usize,
    end: usize,
    out: &mut SpanEmitter,
) -> u32 {
    let end = end.min(line.len());
    let begin = begin.min(end);
    let cookie = out.embed(begin, |out| {
        language.lexer().lex(Cookie::from_bits(inner as u64), &line[begin..end], out)
    });
    // Hosted lexers keep their state in the low 32 bits.
    cookie.bits() as u32
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::ColorClass;
    use crate::highlight::generic::{Mode, State};

    #[test]
    fn selectors() {
        assert_eq!(
            Selection::lookup("JavaScript"),
            Some(Selection::Script(SubLanguage::JavaScript))
        );
        assert_eq!(Selection::lookup("jscript"), Some(Selection::Script(SubLanguage::JavaScript)));
        assert_eq!(Selection::lookup("java"), Some(Selection::Script(SubLanguage::Java)));
        assert_eq!(Selection::lookup("vb"), Some(Selection::Script(SubLanguage::Basic)));
        assert_eq!(Selection::lookup("VBScript"), Some(Selection::Script(SubLanguage::VbScript)));
        assert_eq!(Selection::lookup("c#"), Some(Selection::Script(SubLanguage::CSharp)));
        assert_eq!(Selection::lookup("x-jquery-tmpl"), Some(Selection::Markup));
        assert_eq!(Selection::lookup(""), None);
        assert_eq!(Selection::lookup("python"), None);
        assert_eq!(Selection::from_name("python"), Selection::Markup);
    }

    #[test]
    fn codes_round_trip() {
        for lang in SubLanguage::ALL {
            assert!((1..15).contains(&lang.code()));
            assert_eq!(SubLanguage::from_code(lang.code()), Some(lang));
        }
        assert_eq!(SubLanguage::from_code(0), None);
    }

    #[test]
    fn cookie_layout() {
        assert_eq!(MarkupCookie::decode(Cookie::default()), MarkupCookie::default());

        let cookie = MarkupCookie {
            region: Some(Region { kind: RegionKind::Style, language: SubLanguage::Css }),
            pending: Some(Selection::Markup),
            page_default: Some(SubLanguage::VbScript),
            nesting: u8::MAX,
            mode: HostMode::BlockEnd,
            flags: MarkupFlags::all(),
            inner: u32::MAX,
        };
        assert_eq!(MarkupCookie::decode(cookie.encode()), cookie);

        let cookie = MarkupCookie {
            region: Some(Region { kind: RegionKind::Inline, language: SubLanguage::Mwsl }),
            pending: Some(Selection::Script(SubLanguage::Perl)),
            mode: HostMode::Directive,
            flags: MarkupFlags::ISLAND | MarkupFlags::AWAIT_TYPE,
            inner: 0x1234_5678,
            ..Default::default()
        };
        assert_eq!(MarkupCookie::decode(cookie.encode()), cookie);
    }

    #[test]
    fn hosted_lexers_fit_in_32_bits() {
        let state = State { mode: Mode::Block { rule: 31, depth: u8::MAX }, preprocessor: true };
        assert!(state.encode().bits() <= u32::MAX as u64);
    }

    #[test]
    fn embedded_spans_are_offset() {
        let line: Vec<char> = "<% x = 1 %>".chars().collect();
        let mut out = SpanEmitter::new(line.len());
        out.define(0, ColorClass::Operator);
        let inner = run_embedded(SubLanguage::Basic, 0, &line, 2, 9, &mut out);
        assert_eq!(inner, 0);
        let spans = out.finish();
        assert!(spans.iter().any(|s| s.start == 7 && s.class == ColorClass::Number));
    }
}
