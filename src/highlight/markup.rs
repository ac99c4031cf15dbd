// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HTML, XML and SGML, plus the hosts built on them: ASP, JSP, PHP, MWSL and Razor.
//!
//! The host colors tags, attributes, entities and comments itself. `<script>` and `<style>`
//! content and `<? ?>`/`<% %>` blocks are handed to a sub-lexer, see [`super::dispatch`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::dispatch::{
    HostMode, MarkupCookie, MarkupFlags, Region, RegionKind, Selection, SubLanguage, run_embedded,
};
use super::keywords::{Case, KeywordTable, TaggedTable, is_numeric};
use super::scan::*;
use super::{ColorClass, Cookie, LineLexer, SpanEmitter};

bitflags! {
    /// HTML tag vocabulary generations.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Lexis: u8 {
        const HTML4 = 1 << 0;
        const HTML5 = 1 << 1;
    }
}

const COMMON: Lexis = Lexis::all();

const HTML_TAGS: &[(&str, Lexis)] = &[
    ("a", COMMON), ("abbr", COMMON), ("acronym", Lexis::HTML4), ("address", COMMON),
    ("applet", Lexis::HTML4), ("area", COMMON), ("article", Lexis::HTML5), ("aside", Lexis::HTML5),
    ("audio", Lexis::HTML5), ("b", COMMON), ("base", COMMON), ("basefont", Lexis::HTML4),
    ("bdi", Lexis::HTML5), ("bdo", COMMON), ("big", Lexis::HTML4), ("blockquote", COMMON),
    ("body", COMMON), ("br", COMMON), ("button", COMMON), ("canvas", Lexis::HTML5),
    ("caption", COMMON), ("center", Lexis::HTML4), ("cite", COMMON), ("code", COMMON),
    ("col", COMMON), ("colgroup", COMMON), ("data", Lexis::HTML5), ("datalist", Lexis::HTML5),
    ("dd", COMMON), ("del", COMMON), ("details", Lexis::HTML5), ("dfn", COMMON),
    ("dialog", Lexis::HTML5), ("dir", Lexis::HTML4), ("div", COMMON), ("dl", COMMON),
    ("dt", COMMON), ("em", COMMON), ("embed", Lexis::HTML5), ("fieldset", COMMON),
    ("figcaption", Lexis::HTML5), ("figure", Lexis::HTML5), ("font", Lexis::HTML4),
    ("footer", Lexis::HTML5), ("form", COMMON), ("frame", Lexis::HTML4), ("frameset", Lexis::HTML4),
    ("h1", COMMON), ("h2", COMMON), ("h3", COMMON), ("h4", COMMON), ("h5", COMMON), ("h6", COMMON),
    ("head", COMMON), ("header", Lexis::HTML5), ("hgroup", Lexis::HTML5), ("hr", COMMON),
    ("html", COMMON), ("i", COMMON), ("iframe", COMMON), ("img", COMMON), ("input", COMMON),
    ("ins", COMMON), ("isindex", Lexis::HTML4), ("kbd", COMMON), ("label", COMMON),
    ("legend", COMMON), ("li", COMMON), ("link", COMMON), ("main", Lexis::HTML5), ("map", COMMON),
    ("mark", Lexis::HTML5), ("menu", COMMON), ("meta", COMMON), ("meter", Lexis::HTML5),
    ("nav", Lexis::HTML5), ("noframes", Lexis::HTML4), ("noscript", COMMON), ("object", COMMON),
    ("ol", COMMON), ("optgroup", COMMON), ("option", COMMON), ("output", Lexis::HTML5),
    ("p", COMMON), ("param", COMMON), ("picture", Lexis::HTML5), ("pre", COMMON),
    ("progress", Lexis::HTML5), ("q", COMMON), ("rp", Lexis::HTML5), ("rt", Lexis::HTML5),
    ("ruby", Lexis::HTML5), ("s", COMMON), ("samp", COMMON), ("script", COMMON),
    ("search", Lexis::HTML5), ("section", Lexis::HTML5), ("select", COMMON), ("slot", Lexis::HTML5),
    ("small", COMMON), ("source", Lexis::HTML5), ("span", COMMON), ("strike", Lexis::HTML4),
    ("strong", COMMON), ("style", COMMON), ("sub", COMMON), ("summary", Lexis::HTML5),
    ("sup", COMMON), ("table", COMMON), ("tbody", COMMON), ("td", COMMON),
    ("template", Lexis::HTML5), ("textarea", COMMON), ("tfoot", COMMON), ("th", COMMON),
    ("thead", COMMON), ("time", Lexis::HTML5), ("title", COMMON), ("tr", COMMON),
    ("track", Lexis::HTML5), ("tt", Lexis::HTML4), ("u", COMMON), ("ul", COMMON), ("var", COMMON),
    ("video", Lexis::HTML5), ("wbr", Lexis::HTML5),
];

const HTML_ATTRIBUTES: &[&str] = &[
    "accept", "accept-charset", "accesskey", "action", "align", "alt", "async", "autocomplete",
    "autofocus", "autoplay", "bgcolor", "border", "cellpadding", "cellspacing", "charset",
    "checked", "cite", "class", "color", "cols", "colspan", "content", "contenteditable",
    "controls", "coords", "crossorigin", "data", "datetime", "defer", "dir", "disabled", "download",
    "draggable", "enctype", "face", "for", "form", "formaction", "frameborder", "headers", "height",
    "hidden", "high", "href", "hreflang", "http-equiv", "id", "integrity", "lang", "language",
    "list", "loop", "low", "max", "maxlength", "media", "method", "min", "multiple", "muted",
    "name", "nomodule", "novalidate", "onblur", "onchange", "onclick", "ondblclick", "onerror",
    "onfocus", "onkeydown", "onkeypress", "onkeyup", "onload", "onmousedown", "onmousemove",
    "onmouseout", "onmouseover", "onmouseup", "onreset", "onresize", "onscroll", "onselect",
    "onsubmit", "onunload", "open", "optimum", "pattern", "placeholder", "poster", "preload",
    "readonly", "rel", "required", "rev", "role", "rows", "rowspan", "runat", "sandbox", "scope",
    "scrolling", "selected", "shape", "size", "sizes", "span", "spellcheck", "src", "srcdoc",
    "srclang", "srcset", "start", "step", "style", "tabindex", "target", "title", "translate",
    "type", "usemap", "valign", "value", "width", "wrap", "xmlns",
];

const HTML_ENTITIES: &[&str] = &[
    "Auml", "Ouml", "Uuml", "agrave", "amp", "apos", "auml", "bull", "ccedil", "cent", "copy",
    "darr", "deg", "eacute", "egrave", "euro", "frac12", "gt", "hearts", "hellip", "iexcl",
    "iquest", "laquo", "larr", "ldquo", "lsquo", "lt", "mdash", "middot", "nbsp", "ndash", "ouml",
    "para", "plusmn", "pound", "quot", "raquo", "rarr", "rdquo", "reg", "rsquo", "sect", "shy",
    "szlig", "times", "trade", "uarr", "uuml", "yen",
];

const DTD_KEYWORDS: &[&str] = &[
    "any", "attlist", "cdata", "doctype", "element", "empty", "entities", "entity", "fixed", "id",
    "idref", "idrefs", "ignore", "implied", "include", "ndata", "nmtoken", "nmtokens", "notation",
    "pcdata", "public", "required", "system",
];

const TAGS: TaggedTable<Lexis> = TaggedTable { entries: HTML_TAGS, case: Case::Insensitive };
const ATTRIBUTES: KeywordTable = KeywordTable::insensitive(HTML_ATTRIBUTES);
const ENTITIES: KeywordTable = KeywordTable::sensitive(HTML_ENTITIES);
const DTD: KeywordTable = KeywordTable::insensitive(DTD_KEYWORDS);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Html,
    /// Any tag name is a keyword.
    Xml,
    Sgml,
}

/// Per-language knobs of a markup host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    pub dialect: Dialect,
    /// Which tag names are known.
    pub lexis: Lexis,
    /// The language of `<? ?>` and `<% %>` blocks. Without one they are processing instructions.
    pub inline_default: Option<SubLanguage>,
    /// `<script>` content when no `language`/`type`, page directive or inline language says
    /// otherwise.
    pub script_default: SubLanguage,
    pub style_default: SubLanguage,
    /// Whether `<script>`, `<style>`, `<%` and `<?php` open sub-languages at all.
    pub embedding: bool,
}

impl MarkupOptions {
    pub const HTML: Self = Self {
        dialect: Dialect::Html,
        lexis: Lexis::all(),
        inline_default: None,
        script_default: SubLanguage::JavaScript,
        style_default: SubLanguage::Css,
        embedding: true,
    };
    pub const XML: Self = Self { dialect: Dialect::Xml, embedding: false, ..Self::HTML };
    pub const SGML: Self = Self { dialect: Dialect::Sgml, embedding: false, ..Self::HTML };

    pub const fn with_inline(self, language: SubLanguage) -> Self {
        Self { inline_default: Some(language), ..self }
    }

    pub const fn with_lexis(self, lexis: Lexis) -> Self {
        Self { lexis, ..self }
    }
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self::HTML
    }
}

/// Flags that only live while an open tag is being read.
const OPEN_TAG_FLAGS: MarkupFlags = MarkupFlags::SCRIPT_TAG
    .union(MarkupFlags::STYLE_TAG)
    .union(MarkupFlags::AWAIT_LANGUAGE)
    .union(MarkupFlags::AWAIT_TYPE);

pub struct MarkupLexer {
    options: MarkupOptions,
    razor: bool,
}

impl MarkupLexer {
    pub const fn new(options: MarkupOptions) -> Self {
        Self { options, razor: false }
    }

    /// HTML with Razor `@` transitions into C#.
    pub const fn razor(options: MarkupOptions) -> Self {
        Self { options, razor: true }
    }

    pub fn options(&self) -> &MarkupOptions {
        &self.options
    }
}

impl LineLexer for MarkupLexer {
    fn lex(&self, cookie: Cookie, line: &[char], out: &mut SpanEmitter) -> Cookie {
        let mut scan = Scan {
            line,
            out,
            st: MarkupCookie::decode(cookie),
            options: &self.options,
            razor: self.razor,
            i: 0,
        };
        scan.run();
        scan.st.encode()
    }
}

/// One line's pass of a markup host.
pub(super) struct Scan<'a, 'o> {
    pub(super) line: &'a [char],
    pub(super) out: &'o mut SpanEmitter,
    pub(super) st: MarkupCookie,
    pub(super) options: &'a MarkupOptions,
    pub(super) razor: bool,
    pub(super) i: usize,
}

impl Scan<'_, '_> {
    fn run(&mut self) {
        let class = self.carried_class();
        self.define(0, class);

        if self.line.is_empty() {
            // The sub-lexer still sees the line so that line-local state ends.
            if let Some(region) = self.st.region {
                self.st.inner =
                    run_embedded(region.language, self.st.inner, self.line, 0, 0, self.out);
            } else if self.in_code() {
                self.flush_code(0, 0);
            }
            return;
        }
        if self.st.mode == HostMode::BlockEnd {
            self.resume_after_block();
        }

        while self.i < self.line.len() {
            if let Some(region) = self.st.region {
                self.region(region);
                continue;
            }
            match self.st.mode {
                HostMode::Text if self.in_code() => self.code(),
                HostMode::Text => self.text(),
                HostMode::Tag | HostMode::Declaration | HostMode::Directive => self.tag(),
                HostMode::TagDouble | HostMode::TagSingle => self.attribute_string(),
                HostMode::Comment => self.comment(),
                HostMode::CData => self.cdata(),
                HostMode::Pi => self.processing_instruction(),
                HostMode::RazorComment => self.razor_comment(),
                HostMode::CodeString | HostMode::CodeComment => self.code(),
                HostMode::BlockEnd => self.i = self.line.len(),
            }
        }
    }

    pub(super) fn define(&mut self, pos: usize, class: ColorClass) {
        self.out.define(pos, class);
    }

    /// The class of whatever the cookie says is open.
    pub(super) fn carried_class(&self) -> ColorClass {
        if self.st.region.is_some() || self.in_code() {
            return ColorClass::NormalText;
        }
        match self.st.mode {
            HostMode::Text | HostMode::CodeString | HostMode::CodeComment | HostMode::BlockEnd => {
                ColorClass::NormalText
            }
            HostMode::Tag | HostMode::Declaration | HostMode::Directive | HostMode::Pi => {
                ColorClass::Preprocessor
            }
            HostMode::TagDouble | HostMode::TagSingle | HostMode::CData => ColorClass::String,
            HostMode::Comment | HostMode::RazorComment => ColorClass::Comment,
        }
    }

    fn inline_close(&self) -> &'static str {
        if self.st.flags.contains(MarkupFlags::PERCENT) { "%>" } else { "?>" }
    }

    /// Hands the line up to the region's end tag or close marker to the sub-lexer.
    fn region(&mut self, region: Region) {
        let line = self.line;
        let begin = self.i;
        let close = match region.kind {
            RegionKind::Script => find_ignore_case(line, begin, "</script"),
            RegionKind::Style => find_ignore_case(line, begin, "</style"),
            RegionKind::Inline => find(line, begin, self.inline_close()),
        };
        let end = close.unwrap_or(line.len());
        self.st.inner = run_embedded(region.language, self.st.inner, line, begin, end, self.out);

        let Some(p) = close else {
            self.i = line.len();
            return;
        };
        self.st.region = None;
        self.st.inner = 0;
        self.i = p;
        if region.kind == RegionKind::Inline {
            self.define(p, ColorClass::Operator);
            self.define(p + 2, ColorClass::NormalText);
            self.st.flags.remove(MarkupFlags::PERCENT);
            self.i = p + 2;
        }
    }

    fn text(&mut self) {
        let line = self.line;
        let i = self.i;
        match line[i] {
            '<' => self.open_angle(),
            '&' => self.entity(),
            '@' if self.razor => self.transition(),
            '}' if self.razor && self.st.flags.contains(MarkupFlags::ISLAND) => self.island_brace(),
            _ => {
                self.define(i, ColorClass::NormalText);
                self.i = (i + 1..line.len())
                    .find(|&j| matches!(line[j], '<' | '&' | '@' | '}'))
                    .unwrap_or(line.len());
            }
        }
    }

    fn open_angle(&mut self) {
        let line = self.line;
        let i = self.i;

        if starts_with_at(line, i, "<!--") {
            self.define(i, ColorClass::Comment);
            self.st.mode = HostMode::Comment;
            self.i = i + 4;
            return;
        }
        if starts_with_at(line, i, "<![CDATA[") {
            self.define(i, ColorClass::Operator);
            self.define(i + 9, ColorClass::String);
            self.st.mode = HostMode::CData;
            self.i = i + 9;
            return;
        }
        if matches!(at(line, i + 1), Some('?' | '%')) && self.inline_open() {
            return;
        }

        let closing = at(line, i + 1) == Some('/');
        let name_start = if closing { i + 2 } else { i + 1 };
        match at(line, name_start) {
            Some('!') if !closing => self.declaration_open(),
            Some(c) if is_ident_start(c) => self.tag_open(closing, name_start),
            _ => {
                self.define(i, ColorClass::NormalText);
                self.i = i + 1;
            }
        }
    }

    /// `<%@`, `<%`, `<?php` and `<?`. Returns false if the marker is plain text here.
    fn inline_open(&mut self) -> bool {
        let line = self.line;
        let i = self.i;
        let percent = at(line, i + 1) == Some('%');
        if percent && !self.options.embedding {
            return false;
        }

        if percent && at(line, i + 2) == Some('@') {
            self.define(i, ColorClass::Operator);
            self.define(i + 3, ColorClass::Preprocessor);
            self.st.mode = HostMode::Directive;
            self.st.flags.insert(MarkupFlags::PERCENT);
            self.i = i + 3;
            return true;
        }

        let mut end = i + 2;
        let mut language = None;
        if self.options.embedding {
            if !percent && starts_with_at_ignore_case(line, i, "<?php") {
                end = i + 5;
                language = Some(SubLanguage::Php);
            }
            language = language.or(self.st.page_default).or(self.options.inline_default);
            // `<%= x %>` and `<?= $x ?>` print an expression.
            if language.is_some() && at(line, end) == Some('=') {
                end += 1;
            }
        }

        self.define(i, ColorClass::Operator);
        self.st.flags.set(MarkupFlags::PERCENT, percent);
        self.i = end;
        match language {
            Some(language) => {
                self.define(end, ColorClass::NormalText);
                self.st.region = Some(Region { kind: RegionKind::Inline, language });
                self.st.inner = 0;
            }
            None => {
                self.define(end, ColorClass::Preprocessor);
                self.st.mode = HostMode::Pi;
            }
        }
        true
    }

    /// `<!DOCTYPE`, `<!ELEMENT` and friends.
    fn declaration_open(&mut self) {
        let line = self.line;
        let i = self.i;
        let name_start = i + 2;
        let name_end = ident_end(line, name_start, "-");
        let class = if DTD.contains(&line[name_start..name_end]) {
            ColorClass::Keyword
        } else {
            ColorClass::Preprocessor
        };

        self.define(i, ColorClass::Operator);
        self.define(name_start, class);
        self.define(name_end, ColorClass::Preprocessor);
        self.st.mode = HostMode::Declaration;
        self.i = name_end;
    }

    fn tag_open(&mut self, closing: bool, name_start: usize) {
        let line = self.line;
        let i = self.i;
        let name_end = ident_end(line, name_start, "-:.");
        let name = &line[name_start..name_end];

        let class = self.tag_class(name);
        self.define(i, ColorClass::Operator);
        self.define(name_start, class);
        self.define(name_end, ColorClass::Preprocessor);

        self.st.mode = HostMode::Tag;
        self.st.pending = None;
        self.st.flags.remove(OPEN_TAG_FLAGS);
        if closing {
            self.st.flags.remove(MarkupFlags::ISLAND);
        } else if self.options.embedding {
            if text_is_ignore_case(name, "script") {
                self.st.flags.insert(MarkupFlags::SCRIPT_TAG);
            } else if text_is_ignore_case(name, "style") {
                self.st.flags.insert(MarkupFlags::STYLE_TAG);
            }
        }
        self.i = name_end;
    }

    fn tag_class(&self, name: &[char]) -> ColorClass {
        if self.razor && self.st.nesting > 0 && text_is_ignore_case(name, "text") {
            return ColorClass::User3;
        }
        match self.options.dialect {
            Dialect::Xml => ColorClass::Keyword,
            Dialect::Html | Dialect::Sgml => match TAGS.lookup(name) {
                Some(lexis) if lexis.intersects(self.options.lexis) => ColorClass::Keyword,
                _ => ColorClass::Preprocessor,
            },
        }
    }

    /// Inside a tag, a declaration or a page directive.
    fn tag(&mut self) {
        let line = self.line;
        let i = self.i;
        let c = line[i];
        let mode = self.st.mode;

        if mode == HostMode::Directive && starts_with_at(line, i, "%>") {
            self.define(i, ColorClass::Operator);
            self.define(i + 2, ColorClass::NormalText);
            self.st.mode = HostMode::Text;
            self.st.flags.remove(
                MarkupFlags::PERCENT | MarkupFlags::AWAIT_LANGUAGE | MarkupFlags::AWAIT_TYPE,
            );
            self.i = i + 2;
            return;
        }

        match c {
            '>' if mode != HostMode::Directive => self.tag_close(),
            '"' | '\'' => self.attribute_quote(c),
            // An unclosed tag.
            '<' => self.st.mode = HostMode::Text,
            '@' if self.razor => self.expression(),
            '[' if mode == HostMode::Declaration => {
                // An internal subset holds its own declarations.
                self.define(i, ColorClass::Operator);
                self.define(i + 1, ColorClass::NormalText);
                self.st.mode = HostMode::Text;
                self.i = i + 1;
            }
            '-' if mode == HostMode::Declaration && at(line, i + 1) == Some('-') => {
                let end = find(line, i + 2, "--").map_or(line.len(), |p| p + 2);
                self.define(i, ColorClass::Comment);
                self.define(end, ColorClass::Preprocessor);
                self.i = end;
            }
            _ if c.is_whitespace() => {
                self.define(i, ColorClass::Preprocessor);
                self.i = skip_space(line, i);
            }
            _ if is_ident_char(c) => self.attribute_word(),
            _ => {
                self.define(i, ColorClass::Operator);
                self.define(i + 1, ColorClass::Preprocessor);
                self.i = i + 1;
            }
        }
    }

    fn attribute_word(&mut self) {
        let line = self.line;
        let i = self.i;

        if prev_non_space(line, i) == Some('=') {
            // An unquoted value runs to whitespace or the end of the tag.
            let end = (i..line.len())
                .find(|&j| {
                    line[j].is_whitespace() || line[j] == '>' || starts_with_at(line, j, "/>")
                })
                .unwrap_or(line.len());
            let value = &line[i..end];
            if self.st.flags.intersects(MarkupFlags::AWAIT_LANGUAGE | MarkupFlags::AWAIT_TYPE) {
                self.apply_value(value);
            }
            let class = if is_numeric(value) { ColorClass::Number } else { ColorClass::NormalText };
            self.define(i, class);
            self.define(end, ColorClass::Preprocessor);
            self.i = end;
            return;
        }

        let end = ident_end(line, i, "-:.");
        let name = &line[i..end];
        self.attribute_name(name);
        let class = match self.st.mode {
            HostMode::Declaration if DTD.contains(name) => ColorClass::Keyword,
            HostMode::Declaration => ColorClass::Preprocessor,
            _ if ATTRIBUTES.contains(name) => ColorClass::User1,
            _ if is_numeric(name) => ColorClass::Number,
            _ => ColorClass::Preprocessor,
        };
        self.define(i, class);
        self.define(end, ColorClass::Preprocessor);
        self.i = end;
    }

    fn attribute_name(&mut self, name: &[char]) {
        self.st.flags.remove(MarkupFlags::AWAIT_LANGUAGE | MarkupFlags::AWAIT_TYPE);
        let mode = self.st.mode;
        let selects = match mode {
            HostMode::Directive => true,
            HostMode::Tag => {
                self.st.flags.intersects(MarkupFlags::SCRIPT_TAG | MarkupFlags::STYLE_TAG)
            }
            _ => false,
        };
        if !selects {
            return;
        }
        if text_is_ignore_case(name, "language") {
            self.st.flags.insert(MarkupFlags::AWAIT_LANGUAGE);
        } else if mode == HostMode::Tag && text_is_ignore_case(name, "type") {
            self.st.flags.insert(MarkupFlags::AWAIT_TYPE);
        }
    }

    /// Applies a `language=` or `type=` value. A type names the language after its `/`, so
    /// `text/vbscript` selects VBScript and a bare `module` keeps the default.
    fn apply_value(&mut self, value: &[char]) {
        let flags = self.st.flags;
        self.st.flags.remove(MarkupFlags::AWAIT_LANGUAGE | MarkupFlags::AWAIT_TYPE);

        let value = if flags.contains(MarkupFlags::AWAIT_TYPE) {
            match value.iter().position(|&c| c == '/') {
                Some(p) => &value[p + 1..],
                None => return,
            }
        } else {
            value
        };
        let name: String = value
            .iter()
            .copied()
            .skip_while(|c| c.is_whitespace())
            .take_while(|&c| c.is_alphanumeric() || matches!(c, '#' | '-' | '.'))
            .collect();
        if name.is_empty() {
            return;
        }

        let selection = Selection::from_name(&name);
        if self.st.mode == HostMode::Directive {
            if let Selection::Script(language) = selection {
                self.st.page_default = Some(language);
            }
        } else {
            self.st.pending = Some(selection);
        }
    }

    fn attribute_quote(&mut self, quote: char) {
        let line = self.line;
        let i = self.i;
        let close = (i + 1..line.len()).find(|&j| line[j] == quote);
        if self.st.flags.intersects(MarkupFlags::AWAIT_LANGUAGE | MarkupFlags::AWAIT_TYPE) {
            self.apply_value(&line[i + 1..close.unwrap_or(line.len())]);
        }

        self.define(i, ColorClass::String);
        match close {
            Some(p) => {
                self.define(p + 1, ColorClass::Preprocessor);
                self.i = p + 1;
            }
            None => {
                self.st.mode = if quote == '"' { HostMode::TagDouble } else { HostMode::TagSingle };
                self.i = line.len();
            }
        }
    }

    /// A quoted value carried over from a previous line. It returns to a plain tag.
    fn attribute_string(&mut self) {
        let line = self.line;
        let quote = if self.st.mode == HostMode::TagDouble { '"' } else { '\'' };
        match (self.i..line.len()).find(|&j| line[j] == quote) {
            Some(p) => {
                self.define(p + 1, ColorClass::Preprocessor);
                self.st.mode = HostMode::Tag;
                self.i = p + 1;
            }
            None => self.i = line.len(),
        }
    }

    /// The `>` of a tag. Opens the script or style region the tag asked for.
    fn tag_close(&mut self) {
        let line = self.line;
        let i = self.i;
        self.define(i, ColorClass::Operator);
        self.define(i + 1, ColorClass::NormalText);
        self.i = i + 1;

        let mode = std::mem::replace(&mut self.st.mode, HostMode::Text);
        let flags = self.st.flags;
        let pending = self.st.pending.take();
        self.st.flags.remove(OPEN_TAG_FLAGS);

        if i > 0 && line[i - 1] == '/' {
            self.st.flags.remove(MarkupFlags::ISLAND);
            return;
        }
        if mode != HostMode::Tag {
            return;
        }

        let page = self.st.page_default.or(self.options.inline_default);
        let (kind, fallback) = if flags.contains(MarkupFlags::SCRIPT_TAG) {
            (RegionKind::Script, page.unwrap_or(self.options.script_default))
        } else if flags.contains(MarkupFlags::STYLE_TAG) {
            (RegionKind::Style, self.options.style_default)
        } else {
            return;
        };
        match pending.unwrap_or(Selection::Script(fallback)) {
            Selection::Script(language) => {
                self.st.region = Some(Region { kind, language });
                self.st.inner = 0;
            }
            Selection::Markup => {}
        }
    }

    fn comment(&mut self) {
        let line = self.line;
        match find(line, self.i, "-->") {
            Some(p) => {
                self.define(p + 3, ColorClass::NormalText);
                self.st.mode = HostMode::Text;
                self.i = p + 3;
            }
            None => self.i = line.len(),
        }
    }

    fn cdata(&mut self) {
        let line = self.line;
        match find(line, self.i, "]]>") {
            Some(p) => {
                self.define(p, ColorClass::Operator);
                self.define(p + 3, ColorClass::NormalText);
                self.st.mode = HostMode::Text;
                self.i = p + 3;
            }
            None => self.i = line.len(),
        }
    }

    fn processing_instruction(&mut self) {
        let line = self.line;
        match find(line, self.i, self.inline_close()) {
            Some(p) => {
                self.define(p, ColorClass::Operator);
                self.define(p + 2, ColorClass::NormalText);
                self.st.mode = HostMode::Text;
                self.st.flags.remove(MarkupFlags::PERCENT);
                self.i = p + 2;
            }
            None => self.i = line.len(),
        }
    }

    /// `&amp;`, `&#160;`, `&custom;`.
    fn entity(&mut self) {
        let line = self.line;
        let i = self.i;
        let numeric = at(line, i + 1) == Some('#');
        let name_start = if numeric { i + 2 } else { i + 1 };
        let name_end = ident_end(line, name_start, "");
        if name_end == name_start {
            self.define(i, ColorClass::NormalText);
            self.i = i + 1;
            return;
        }

        let terminated = at(line, name_end) == Some(';');
        let class = if numeric {
            ColorClass::Number
        } else if ENTITIES.contains(&line[name_start..name_end]) {
            ColorClass::User2
        } else if terminated {
            ColorClass::User1
        } else {
            ColorClass::NormalText
        };
        let end = if terminated { name_end + 1 } else { name_end };
        self.define(i, class);
        self.define(end, ColorClass::NormalText);
        self.i = end;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::keywords::{assert_table_consistent, assert_tagged_consistent};
    use crate::highlight::{ColorClass::*, lex_line};

    fn lex_with(
        lexer: &MarkupLexer,
        cookie: Cookie,
        text: &str,
    ) -> (Vec<(usize, ColorClass)>, Cookie) {
        let line: Vec<char> = text.chars().collect();
        let (spans, cookie) = lex_line(lexer, cookie, &line, line.len());
        (spans.iter().map(|s| (s.start, s.class)).collect(), cookie)
    }

    fn lex(cookie: Cookie, text: &str) -> (Vec<(usize, ColorClass)>, Cookie) {
        lex_with(&MarkupLexer::new(MarkupOptions::HTML), cookie, text)
    }

    #[test]
    fn tables_are_sorted() {
        assert_tagged_consistent("html tags", &TAGS);
        assert_table_consistent("html attributes", &ATTRIBUTES);
        assert_table_consistent("html entities", &ENTITIES);
        assert_table_consistent("dtd keywords", &DTD);
    }

    #[test]
    fn script_content_is_lexed_as_javascript() {
        let (spans, cookie) = lex(Cookie::default(), "<script>var x = 1;</script>");
        assert_eq!(
            spans,
            vec![
                (0, Operator),
                (1, Keyword),
                (7, Operator),
                (8, Keyword),
                (11, NormalText),
                (14, Operator),
                (15, NormalText),
                (16, Number),
                (17, Operator),
                (20, Keyword),
                (26, Operator),
            ]
        );
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn unterminated_script_keeps_its_region() {
        let (spans, cookie) = lex(Cookie::default(), "<script type=\"text/vbscript\">");
        assert_eq!(
            spans,
            vec![
                (0, Operator),
                (1, Keyword),
                (7, Preprocessor),
                (8, User1),
                (12, Operator),
                (13, String),
                (28, Operator),
            ]
        );
        let region = Some(Region { kind: RegionKind::Script, language: SubLanguage::VbScript });
        assert_eq!(MarkupCookie::decode(cookie).region, region);

        let (_, cookie) = lex(cookie, "x = 1");
        assert_eq!(MarkupCookie::decode(cookie).region, region);
        let (spans, cookie) = lex(cookie, "");
        assert!(spans.is_empty());
        assert_eq!(MarkupCookie::decode(cookie).region, region);
        let (_, cookie) = lex(cookie, "</script>");
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn style_content_is_lexed_as_css() {
        let (spans, cookie) = lex(Cookie::default(), "<style>p { color: red }</style>");
        assert!(spans.contains(&(11, Keyword)));
        assert!(spans.contains(&(22, Operator)));
        assert!(spans.contains(&(25, Keyword)));
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn template_scripts_stay_markup() {
        let text = "<script type=\"text/x-jquery-tmpl\"><b>x</b></script>";
        let (spans, cookie) = lex(Cookie::default(), text);
        assert!(spans.contains(&(35, Keyword)));
        assert!(spans.contains(&(44, Keyword)));
        assert_eq!(cookie, Cookie::default());

        let (_, cookie) = lex(Cookie::default(), "<script language=\"python\">");
        assert_eq!(MarkupCookie::decode(cookie).region, None);
        let (spans, _) = lex(cookie, "<b>");
        assert_eq!(spans, vec![(0, Operator), (1, Keyword), (2, Operator)]);
    }

    #[test]
    fn language_attribute_may_wrap() {
        let (_, cookie) = lex(Cookie::default(), "<script language=");
        let st = MarkupCookie::decode(cookie);
        assert_eq!(st.mode, HostMode::Tag);
        assert!(st.flags.contains(MarkupFlags::AWAIT_LANGUAGE));

        let (_, cookie) = lex(cookie, "\"VBScript\">");
        let region = Some(Region { kind: RegionKind::Script, language: SubLanguage::VbScript });
        assert_eq!(MarkupCookie::decode(cookie).region, region);
    }

    #[test]
    fn comments_and_entities() {
        let (spans, cookie) = lex(Cookie::default(), "a &amp; b &foo; <!-- c");
        assert_eq!(
            spans,
            vec![
                (0, NormalText),
                (2, User2),
                (7, NormalText),
                (10, User1),
                (15, NormalText),
                (16, Comment),
            ]
        );
        assert_eq!(MarkupCookie::decode(cookie).mode, HostMode::Comment);

        let (spans, cookie) = lex(cookie, "d --> <b>");
        assert_eq!(
            spans,
            vec![(0, Comment), (5, NormalText), (6, Operator), (7, Keyword), (8, Operator)]
        );
        assert_eq!(cookie, Cookie::default());

        let (spans, _) = lex(Cookie::default(), "&#169; & x");
        assert_eq!(spans, vec![(0, Number), (6, NormalText)]);
    }

    #[test]
    fn lexis_filters_tag_names() {
        let html4 = MarkupLexer::new(MarkupOptions::HTML.with_lexis(Lexis::HTML4));
        let html5 = MarkupLexer::new(MarkupOptions::HTML.with_lexis(Lexis::HTML5));
        assert_eq!(
            lex_with(&html4, Cookie::default(), "<video>").0,
            vec![(0, Operator), (1, Preprocessor), (6, Operator)]
        );
        assert_eq!(
            lex_with(&html5, Cookie::default(), "<video>").0,
            vec![(0, Operator), (1, Keyword), (6, Operator)]
        );
        assert_eq!(
            lex_with(&html4, Cookie::default(), "<center>").0,
            vec![(0, Operator), (1, Keyword), (7, Operator)]
        );
        assert_eq!(
            lex_with(&html5, Cookie::default(), "<center>").0,
            vec![(0, Operator), (1, Preprocessor), (7, Operator)]
        );
    }

    #[test]
    fn page_directive_sets_the_inline_language() {
        let asp = MarkupLexer::new(MarkupOptions::HTML.with_inline(SubLanguage::Basic));
        let (spans, cookie) = lex_with(&asp, Cookie::default(), "<%@ Language=\"JScript\" %>");
        assert_eq!(
            spans,
            vec![
                (0, Operator),
                (3, Preprocessor),
                (4, User1),
                (12, Operator),
                (13, String),
                (22, Preprocessor),
                (23, Operator),
            ]
        );
        assert_eq!(MarkupCookie::decode(cookie).page_default, Some(SubLanguage::JavaScript));

        let (spans, cookie) = lex_with(&asp, cookie, "<% var x %>");
        assert_eq!(
            spans,
            vec![(0, Operator), (2, NormalText), (3, Keyword), (6, NormalText), (9, Operator)]
        );
        let st = MarkupCookie::decode(cookie);
        assert_eq!(st.region, None);
        assert_eq!(st.page_default, Some(SubLanguage::JavaScript));
        assert!(st.flags.is_empty());
    }

    #[test]
    fn plain_script_follows_the_host_language() {
        let asp = MarkupLexer::new(MarkupOptions::HTML.with_inline(SubLanguage::Basic));
        let (_, cookie) = lex_with(&asp, Cookie::default(), "<script>");
        let region = Some(Region { kind: RegionKind::Script, language: SubLanguage::Basic });
        assert_eq!(MarkupCookie::decode(cookie).region, region);
        let (spans, _) = lex_with(&asp, cookie, "Dim x");
        assert_eq!(spans, vec![(0, Keyword), (3, NormalText)]);

        let (_, cookie) = lex_with(&asp, Cookie::default(), "<%@ Language=\"JScript\" %>");
        let (_, cookie) = lex_with(&asp, cookie, "<script>");
        assert_eq!(
            MarkupCookie::decode(cookie).region.map(|r| r.language),
            Some(SubLanguage::JavaScript)
        );
    }

    #[test]
    fn php_blocks() {
        let php = MarkupLexer::new(MarkupOptions::HTML.with_inline(SubLanguage::Php));
        let (spans, cookie) = lex_with(&php, Cookie::default(), "<?php echo $x; ?>");
        assert_eq!(spans[0], (0, Operator));
        assert!(spans.contains(&(6, Keyword)));
        assert!(spans.contains(&(15, Operator)));
        assert_eq!(cookie, Cookie::default());

        let (_, cookie) = lex_with(&php, Cookie::default(), "<?php");
        let region = Some(Region { kind: RegionKind::Inline, language: SubLanguage::Php });
        assert_eq!(MarkupCookie::decode(cookie).region, region);
    }

    #[test]
    fn xml_documents() {
        let xml = MarkupLexer::new(MarkupOptions::XML);
        assert_eq!(
            lex_with(&xml, Cookie::default(), "<?xml version=\"1.0\"?>").0,
            vec![(0, Operator), (2, Preprocessor), (19, Operator)]
        );
        assert_eq!(
            lex_with(&xml, Cookie::default(), "<foo:bar x='1'/>").0,
            vec![
                (0, Operator),
                (1, Keyword),
                (8, Preprocessor),
                (10, Operator),
                (11, String),
                (14, Operator),
            ]
        );
        assert_eq!(
            lex_with(&xml, Cookie::default(), "<![CDATA[ x < y ]]>").0,
            vec![(0, Operator), (9, String), (16, Operator)]
        );
        // Script tags mean nothing here.
        let (_, cookie) = lex_with(&xml, Cookie::default(), "<script>");
        assert_eq!(cookie, Cookie::default());
    }

    #[test]
    fn declarations() {
        assert_eq!(
            lex(Cookie::default(), "<!DOCTYPE html>").0,
            vec![(0, Operator), (2, Keyword), (9, Preprocessor), (14, Operator)]
        );
    }

    #[test]
    fn attribute_strings_span_lines() {
        let (spans, cookie) = lex(Cookie::default(), "<a title=\"one");
        assert_eq!(
            spans,
            vec![
                (0, Operator),
                (1, Keyword),
                (2, Preprocessor),
                (3, User1),
                (8, Operator),
                (9, String),
            ]
        );
        assert_eq!(MarkupCookie::decode(cookie).mode, HostMode::TagDouble);

        let (spans, cookie) = lex(cookie, "two\">x");
        assert_eq!(spans, vec![(0, String), (4, Operator), (5, NormalText)]);
        assert_eq!(cookie, Cookie::default());
    }
}
