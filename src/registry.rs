// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Language definitions and how a file is matched to one.

use std::fmt::{self, Debug};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{AssociationEntry, Associations};
use crate::error::{Error, Result};
use crate::highlight::batch::BatchLexer;
use crate::highlight::css::CssLexer;
use crate::highlight::dispatch::SubLanguage;
use crate::highlight::generic::{GenericLexer, Syntax};
use crate::highlight::ini::IniLexer;
use crate::highlight::lua::LuaLexer;
use crate::highlight::markdown::MarkdownLexer;
use crate::highlight::markup::{MarkupLexer, MarkupOptions};
use crate::highlight::rust::RustLexer;
use crate::highlight::{ColorSpan, Cookie, LineLexer, PlainLexer, classic, clike, lex_line, script};
use crate::modeline;
use crate::pattern::matches_spec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextType {
    Plain,
    Asp,
    AutoIt,
    Basic,
    VbScript,
    Batch,
    C,
    CSharp,
    Cshtml,
    Css,
    Dcl,
    Fortran,
    Go,
    Html,
    Ini,
    InnoSetup,
    InstallShield,
    Java,
    JavaScript,
    Jsp,
    AutoLisp,
    Lua,
    Markdown,
    Mwsl,
    Nsis,
    Pascal,
    Perl,
    Php,
    Po,
    PowerShell,
    Python,
    Rexx,
    Resources,
    Ruby,
    Rust,
    Sgml,
    Shell,
    Siod,
    Sql,
    Tcl,
    Tex,
    Verilog,
    Vhdl,
    Xml,
}

/// How to build a definition's lexer.
#[derive(Clone, Copy)]
pub enum LexerSpec {
    Plain,
    Generic(&'static Syntax),
    Rust,
    Lua,
    Css,
    Ini,
    Batch,
    Markdown,
    Markup(MarkupOptions),
    Razor(MarkupOptions),
}

impl LexerSpec {
    pub fn build(self) -> Arc<dyn LineLexer> {
        match self {
            LexerSpec::Plain => Arc::new(PlainLexer),
            LexerSpec::Generic(syntax) => Arc::new(GenericLexer::new(syntax)),
            LexerSpec::Rust => Arc::new(RustLexer),
            LexerSpec::Lua => Arc::new(LuaLexer),
            LexerSpec::Css => Arc::new(CssLexer),
            LexerSpec::Ini => Arc::new(IniLexer),
            LexerSpec::Batch => Arc::new(BatchLexer),
            LexerSpec::Markdown => Arc::new(MarkdownLexer),
            LexerSpec::Markup(options) => Arc::new(MarkupLexer::new(options)),
            LexerSpec::Razor(options) => Arc::new(MarkupLexer::razor(options)),
        }
    }
}

struct Builtin {
    text_type: TextType,
    name: &'static str,
    extensions: &'static str,
    /// Block comment open and close, then the line comment. Empty if the language has none.
    comments: [&'static str; 3],
    lexer: LexerSpec,
}

const fn def(
    text_type: TextType,
    name: &'static str,
    extensions: &'static str,
    comments: [&'static str; 3],
    lexer: LexerSpec,
) -> Builtin {
    Builtin { text_type, name, extensions, comments, lexer }
}

const NONE: [&str; 3] = ["", "", ""];
const C_COMMENTS: [&str; 3] = ["/*", "*/", "//"];
const SGML_COMMENTS: [&str; 3] = ["<!--", "-->", ""];

#[rustfmt::skip]
const BUILTINS: &[Builtin] = &[
    def(TextType::Plain, "Plain", "txt;doc;diz", NONE, LexerSpec::Plain),
    def(TextType::Asp, "ASP", "asp;aspx", ["", "", "'"],
        LexerSpec::Markup(MarkupOptions::HTML.with_inline(SubLanguage::Basic))),
    def(TextType::AutoIt, "AutoIt", "au3", ["", "", ";"], LexerSpec::Generic(&script::AUTOIT)),
    def(TextType::Basic, "Basic", "bas;vb;frm;dsm;cls;ctl;pag;dsr", ["", "", "'"],
        LexerSpec::Generic(&classic::BASIC)),
    def(TextType::VbScript, "VBScript", "vbs", ["", "", "'"],
        LexerSpec::Generic(&classic::VBSCRIPT)),
    def(TextType::Batch, "Batch", "bat;btm;cmd", ["", "", "rem"], LexerSpec::Batch),
    def(TextType::C, "C", "c;cc;cpp;cxx;h;hpp;hxx;hm;inl;rh;tlh;tli;xs", C_COMMENTS,
        LexerSpec::Generic(&clike::C)),
    def(TextType::CSharp, "C#", "cs", C_COMMENTS, LexerSpec::Generic(&clike::CSHARP)),
    def(TextType::Cshtml, "CSHTML", "cshtml", C_COMMENTS, LexerSpec::Razor(MarkupOptions::HTML)),
    def(TextType::Css, "CSS", "css", ["/*", "*/", ""], LexerSpec::Css),
    def(TextType::Dcl, "DCL", "dcl;dcc", C_COMMENTS, LexerSpec::Generic(&clike::DCL)),
    def(TextType::Fortran, "Fortran", "f;f90;f9p;fpp;for;f77", ["", "", "!"],
        LexerSpec::Generic(&classic::FORTRAN)),
    def(TextType::Go, "Go", "go", C_COMMENTS, LexerSpec::Generic(&clike::GO)),
    def(TextType::Html, "HTML", "html;htm;shtml;ihtml;ssi;stm;stml", SGML_COMMENTS,
        LexerSpec::Markup(MarkupOptions::HTML)),
    def(TextType::Ini, "INI", "ini;reg;vbp;isl", ["", "", ";"], LexerSpec::Ini),
    def(TextType::InnoSetup, "InnoSetup", "iss", ["{", "}", ";"],
        LexerSpec::Generic(&classic::INNOSETUP)),
    def(TextType::InstallShield, "InstallShield", "rul", C_COMMENTS,
        LexerSpec::Generic(&clike::INSTALLSHIELD)),
    def(TextType::Java, "Java", "java;jav", C_COMMENTS, LexerSpec::Generic(&clike::JAVA)),
    def(TextType::JavaScript, "JavaScript", "js;json", C_COMMENTS,
        LexerSpec::Generic(&clike::JAVASCRIPT)),
    def(TextType::Jsp, "JSP", "jsp;jspx", SGML_COMMENTS,
        LexerSpec::Markup(MarkupOptions::HTML.with_inline(SubLanguage::Java))),
    def(TextType::AutoLisp, "AutoLISP", "lsp;dsl", [";|", "|;", ";"],
        LexerSpec::Generic(&classic::LISP)),
    def(TextType::Lua, "Lua", "lua", ["--[[", "]]", "--"], LexerSpec::Lua),
    def(TextType::Markdown, "Markdown", "markdown;mdown;mkdn;mdwn;mkd;md;Rmd", SGML_COMMENTS,
        LexerSpec::Markdown),
    def(TextType::Mwsl, "MWSL", "mwsl", SGML_COMMENTS,
        LexerSpec::Markup(MarkupOptions::HTML.with_inline(SubLanguage::Mwsl))),
    def(TextType::Nsis, "NSIS", "nsi;nsh", ["/*", "*/", ";"], LexerSpec::Generic(&script::NSIS)),
    def(TextType::Pascal, "Pascal", "pas", ["{", "}", ""], LexerSpec::Generic(&classic::PASCAL)),
    def(TextType::Perl, "Perl", "pl;pm;plx", ["", "", "#"], LexerSpec::Generic(&script::PERL)),
    def(TextType::Php, "PHP", "php;php3;php4;php5;phtml", C_COMMENTS,
        LexerSpec::Markup(MarkupOptions::HTML.with_inline(SubLanguage::Php))),
    def(TextType::Po, "PO", "po;pot", ["", "", "#"], LexerSpec::Generic(&script::PO)),
    def(TextType::PowerShell, "PowerShell", "ps1", ["<#", "#>", "#"],
        LexerSpec::Generic(&script::POWERSHELL)),
    def(TextType::Python, "Python", "py", ["", "", "#"], LexerSpec::Generic(&script::PYTHON)),
    def(TextType::Rexx, "REXX", "rex;rexx", C_COMMENTS, LexerSpec::Generic(&clike::REXX)),
    def(TextType::Resources, "Resources", "rc;dlg;r16;r32;rc2", C_COMMENTS,
        LexerSpec::Generic(&clike::RESOURCES)),
    def(TextType::Ruby, "Ruby", "rb;rbw;rake;gemspec", ["", "", "#"],
        LexerSpec::Generic(&script::RUBY)),
    def(TextType::Rust, "Rust", "rs", C_COMMENTS, LexerSpec::Rust),
    def(TextType::Sgml, "SGML", "sgm;sgml", SGML_COMMENTS, LexerSpec::Markup(MarkupOptions::SGML)),
    def(TextType::Shell, "Shell", "sh;conf", ["", "", "#"], LexerSpec::Generic(&script::SHELL)),
    def(TextType::Siod, "SIOD", "scm", [";|", "|;", ";"], LexerSpec::Generic(&classic::SIOD)),
    def(TextType::Sql, "SQL", "sql", ["/*", "*/", "--"], LexerSpec::Generic(&classic::SQL)),
    def(TextType::Tcl, "TCL", "tcl", ["", "", "#"], LexerSpec::Generic(&script::TCL)),
    def(TextType::Tex, "TEX", "tex;sty;clo;ltx;fd;dtx", ["", "", "%"],
        LexerSpec::Generic(&script::TEX)),
    def(TextType::Verilog, "Verilog", "v;vh", C_COMMENTS, LexerSpec::Generic(&clike::VERILOG)),
    def(TextType::Vhdl, "VHDL", "vhd;vhdl;vho", ["", "", "--"], LexerSpec::Generic(&classic::VHDL)),
    def(TextType::Xml, "XML", "xml;dtd", SGML_COMMENTS, LexerSpec::Markup(MarkupOptions::XML)),
];

/// Names that vim, emacs and kate modelines use for our languages.
const ALIASES: &[(&str, TextType)] = &[
    ("bash", TextType::Shell),
    ("c++", TextType::C),
    ("cpp", TextType::C),
    ("cs", TextType::CSharp),
    ("csharp", TextType::CSharp),
    ("delphi", TextType::Pascal),
    ("dosbatch", TextType::Batch),
    ("dosini", TextType::Ini),
    ("js", TextType::JavaScript),
    ("json", TextType::JavaScript),
    ("latex", TextType::Tex),
    ("lisp", TextType::AutoLisp),
    ("md", TextType::Markdown),
    ("objc", TextType::C),
    ("plaintex", TextType::Tex),
    ("ps1", TextType::PowerShell),
    ("py", TextType::Python),
    ("razor", TextType::Cshtml),
    ("rc", TextType::Resources),
    ("scheme", TextType::Siod),
    ("sh", TextType::Shell),
    ("shell-script", TextType::Shell),
    ("text", TextType::Plain),
    ("vb", TextType::Basic),
    ("xhtml", TextType::Html),
    ("zsh", TextType::Shell),
];

/// A language: its lexer, the extensions it claims and its comment tokens.
#[derive(Clone)]
pub struct LanguageDefinition {
    pub text_type: TextType,
    pub name: &'static str,
    /// `;`-separated patterns, see [`crate::pattern`].
    pub extensions: String,
    pub comment_open: Option<&'static str>,
    pub comment_close: Option<&'static str>,
    pub comment_line: Option<&'static str>,
    spec: LexerSpec,
    lexer: Arc<dyn LineLexer>,
}

impl LanguageDefinition {
    fn builtin(b: &Builtin) -> Self {
        let token = |s: &'static str| (!s.is_empty()).then_some(s);
        Self {
            text_type: b.text_type,
            name: b.name,
            extensions: b.extensions.to_owned(),
            comment_open: token(b.comments[0]),
            comment_close: token(b.comments[1]),
            comment_line: token(b.comments[2]),
            spec: b.lexer,
            lexer: b.lexer.build(),
        }
    }

    pub fn lexer(&self) -> &dyn LineLexer {
        &*self.lexer
    }

    /// The lexer as a shareable handle, e.g. for a [`crate::CookieCache`].
    pub fn shared_lexer(&self) -> Arc<dyn LineLexer> {
        self.lexer.clone()
    }

    /// Options of the markup-hosting languages.
    pub fn markup(&self) -> Option<&MarkupOptions> {
        match &self.spec {
            LexerSpec::Markup(options) | LexerSpec::Razor(options) => Some(options),
            _ => None,
        }
    }

    pub fn matches_extension(&self, ext: &str) -> bool {
        matches_spec(&self.extensions, ext)
    }

    pub fn lex(&self, cookie: Cookie, line: &[char], len: usize) -> (Vec<ColorSpan>, Cookie) {
        lex_line(self.lexer(), cookie, line, len)
    }

    fn apply(&mut self, entry: AssociationEntry) {
        self.extensions = entry.extensions;

        let markup = match &mut self.spec {
            LexerSpec::Markup(options) | LexerSpec::Razor(options) => options,
            _ => {
                if entry.inline.is_some() || entry.lexis.is_some() {
                    tracing::warn!(
                        language = self.name,
                        "script and lexis tags only apply to markup languages"
                    );
                }
                return;
            }
        };
        if let Some(language) = entry.inline {
            markup.inline_default = Some(language);
        }
        if let Some(lexis) = entry.lexis {
            markup.lexis = lexis;
        }
        self.lexer = self.spec.build();
    }
}

impl Debug for LanguageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageDefinition")
            .field("text_type", &self.text_type)
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .field("markup", &self.markup())
            .finish_non_exhaustive()
    }
}

/// The ordered set of definitions. Lookups return the first match.
#[derive(Clone, Debug)]
pub struct LanguageRegistry {
    definitions: Vec<LanguageDefinition>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let definitions: Vec<_> = BUILTINS.iter().map(LanguageDefinition::builtin).collect();
        tracing::debug!(count = definitions.len(), "built language registry");
        Self { definitions }
    }

    pub fn with_associations(associations: &Associations) -> Result<Self> {
        let mut registry = Self::new();
        registry.apply(associations)?;
        Ok(registry)
    }

    /// Overrides extensions, inline script languages and lexis. Nothing is changed if any
    /// name is unknown.
    pub fn apply(&mut self, associations: &Associations) -> Result<()> {
        let unknown = associations.iter().find(|(name, _)| self.index_of(name).is_none());
        if let Some((name, _)) = unknown {
            return Err(Error::UnknownLanguage(name.to_owned()));
        }

        for (name, entry) in associations.iter() {
            let Some(index) = self.index_of(name) else { continue };
            let entry = AssociationEntry::parse(entry);
            for tag in &entry.unknown_tags {
                tracing::warn!(
                    language = name,
                    tag = tag.as_str(),
                    "ignoring unknown association tag"
                );
            }
            tracing::debug!(
                language = name,
                extensions = entry.extensions.as_str(),
                "applying association"
            );
            self.definitions[index].apply(entry);
        }
        Ok(())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.definitions.iter().position(|d| d.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn definitions(&self) -> &[LanguageDefinition] {
        &self.definitions
    }

    pub fn plain(&self) -> &LanguageDefinition {
        &self.definitions[0]
    }

    pub fn by_type(&self, text_type: TextType) -> Option<&LanguageDefinition> {
        self.definitions.iter().find(|d| d.text_type == text_type)
    }

    pub fn by_name(&self, name: &str) -> Option<&LanguageDefinition> {
        self.index_of(name).map(|i| &self.definitions[i])
    }

    /// `ext` may carry a leading dot.
    pub fn by_extension(&self, ext: &str) -> Option<&LanguageDefinition> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        if ext.is_empty() {
            return None;
        }
        self.definitions.iter().find(|d| d.matches_extension(ext))
    }

    pub fn by_path(&self, path: &Path) -> Option<&LanguageDefinition> {
        self.by_extension(path.extension()?.to_str()?)
    }

    /// Recognizes an XML declaration on the first line.
    pub fn sniff(&self, first_line: &str) -> Option<&LanguageDefinition> {
        is_xml_declaration(first_line).then(|| self.by_type(TextType::Xml)).flatten()
    }

    /// A vim, emacs or kate modeline naming a language.
    pub fn from_modeline(&self, lines: &[&str]) -> Option<&LanguageDefinition> {
        let name = modeline::parse(lines).language?;
        let alias = ALIASES.iter().find(|(alias, _)| alias.eq_ignore_ascii_case(&name));
        match alias {
            Some(&(_, text_type)) => self.by_type(text_type),
            None => self.by_name(&name),
        }
    }

    /// Picks a language by modeline, then extension, then content. Falls back to plain text.
    pub fn detect(&self, path: &Path, lines: &[&str]) -> &LanguageDefinition {
        if let Some(def) = self.from_modeline(lines) {
            tracing::debug!(path = %path.display(), language = def.name, "language from modeline");
            return def;
        }
        if let Some(def) = self.by_path(path) {
            tracing::debug!(path = %path.display(), language = def.name, "language from extension");
            return def;
        }
        if let Some(def) = lines.first().and_then(|line| self.sniff(line)) {
            tracing::debug!(path = %path.display(), language = def.name, "language from content");
            return def;
        }
        tracing::debug!(path = %path.display(), "no language detected");
        self.plain()
    }
}

/// `<?xml ... ?>` with only whitespace around it.
fn is_xml_declaration(line: &str) -> bool {
    let Some(rest) = line.trim().strip_prefix("<?xml") else {
        return false;
    };
    rest.starts_with(char::is_whitespace) && rest.ends_with("?>") && rest.chars().count() >= 4
}
