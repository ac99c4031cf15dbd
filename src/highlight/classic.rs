// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Case-insensitive languages with doubled-quote strings, plus the Lisps.

use super::generic::{BlockRule, Escape, GenericLexer, StringFlags, StringRule, Syntax};
use super::keywords::KeywordTable;

const BASIC_KEYWORDS: &[&str] = &[
    "and", "as", "attribute", "byref", "byval", "call", "case", "class", "const", "declare", "dim",
    "do", "each", "else", "elseif", "empty", "end", "enum", "erase", "error", "exit", "explicit",
    "false", "for", "friend", "function", "get", "global", "gosub", "goto", "if", "implements",
    "in", "is", "let", "like", "loop", "lset", "me", "mod", "new", "next", "not", "nothing", "null",
    "on", "option", "optional", "or", "preserve", "private", "property", "public", "raiseevent",
    "redim", "resume", "return", "rset", "select", "set", "static", "step", "stop", "sub", "then",
    "to", "true", "type", "typeof", "until", "wend", "while", "with", "withevents", "xor",
];

const BASIC_TYPES: &[&str] = &[
    "boolean", "byte", "currency", "date", "decimal", "double", "integer", "long", "object",
    "single", "string", "variant",
];

const BASIC_FUNCTIONS: &[&str] = &[
    "abs", "array", "asc", "cbool", "cbyte", "ccur", "cdate", "cdbl", "chr", "cint", "clng",
    "createobject", "csng", "cstr", "date", "datediff", "format", "hex", "instr", "int", "isarray",
    "isempty", "isnull", "isnumeric", "isobject", "lbound", "lcase", "left", "len", "ltrim", "mid",
    "msgbox", "now", "replace", "right", "rtrim", "space", "split", "sqr", "strcomp", "string",
    "trim", "ubound", "ucase", "val",
];

pub const BASIC: Syntax = Syntax {
    keywords: KeywordTable::insensitive(BASIC_KEYWORDS),
    types: KeywordTable::insensitive(BASIC_TYPES),
    functions: KeywordTable::insensitive(BASIC_FUNCTIONS),
    line_comments: &["'"],
    comment_words: KeywordTable::insensitive(&["rem"]),
    strings: &[StringRule::new("\"", "\"", Escape::Doubled)],
    preprocessor: Some('#'),
    ..Syntax::DEFAULT
};

/// VBScript has no conditional compilation.
pub const VBSCRIPT: Syntax = Syntax { preprocessor: None, ..BASIC };

const SQL_KEYWORDS: &[&str] = &[
    "add", "all", "alter", "and", "any", "as", "asc", "begin", "between", "by", "case", "check",
    "column", "commit", "constraint", "create", "cross", "database", "default", "delete", "desc",
    "distinct", "drop", "else", "end", "exec", "exists", "foreign", "from", "full", "function",
    "group", "having", "if", "in", "index", "inner", "insert", "into", "is", "join", "key", "left",
    "like", "limit", "not", "null", "on", "or", "order", "outer", "primary", "procedure",
    "references", "returns", "right", "rollback", "select", "set", "table", "then", "top",
    "transaction", "trigger", "truncate", "union", "unique", "update", "values", "view", "when",
    "where", "while", "with",
];

const SQL_TYPES: &[&str] = &[
    "bigint", "binary", "bit", "blob", "boolean", "char", "date", "datetime", "decimal", "double",
    "float", "int", "integer", "money", "nchar", "numeric", "nvarchar", "real", "smallint", "text",
    "time", "timestamp", "tinyint", "varbinary", "varchar",
];

const SQL_FUNCTIONS: &[&str] = &[
    "avg", "cast", "coalesce", "convert", "count", "getdate", "isnull", "len", "lower", "max",
    "min", "nullif", "replace", "round", "substring", "sum", "upper",
];

pub const SQL: Syntax = Syntax {
    keywords: KeywordTable::insensitive(SQL_KEYWORDS),
    types: KeywordTable::insensitive(SQL_TYPES),
    functions: KeywordTable::insensitive(SQL_FUNCTIONS),
    line_comments: &["--"],
    block_comments: &[BlockRule::new("/*", "*/")],
    strings: &[
        StringRule::multiline("'", "'", Escape::Doubled),
        StringRule::new("\"", "\"", Escape::Doubled),
    ],
    ident_chars: "@#",
    ..Syntax::DEFAULT
};

const PASCAL_KEYWORDS: &[&str] = &[
    "and", "array", "as", "asm", "begin", "case", "class", "const", "constructor", "destructor",
    "div", "do", "downto", "else", "end", "except", "exports", "file", "finalization", "finally",
    "for", "function", "goto", "if", "implementation", "in", "inherited", "initialization",
    "inline", "interface", "is", "label", "library", "mod", "nil", "not", "object", "of", "or",
    "out", "packed", "procedure", "program", "property", "raise", "record", "repeat",
    "resourcestring", "set", "shl", "shr", "string", "then", "threadvar", "to", "try", "type",
    "unit", "until", "uses", "var", "while", "with", "xor",
];

const PASCAL_TYPES: &[&str] = &[
    "boolean", "byte", "cardinal", "char", "double", "extended", "int64", "integer", "longint",
    "pchar", "pointer", "real", "shortint", "single", "smallint", "variant", "word",
];

const PASCAL_COMMENTS: &[BlockRule] = &[BlockRule::new("{", "}"), BlockRule::new("(*", "*)")];

pub const PASCAL: Syntax = Syntax {
    keywords: KeywordTable::insensitive(PASCAL_KEYWORDS),
    types: KeywordTable::insensitive(PASCAL_TYPES),
    line_comments: &["//"],
    block_comments: PASCAL_COMMENTS,
    strings: &[StringRule::new("'", "'", Escape::Doubled)],
    ..Syntax::DEFAULT
};

const INNOSETUP_SECTIONS: &[&str] = &[
    "code", "components", "custommessages", "dirs", "files", "icons", "ini", "installdelete",
    "languages", "messages", "registry", "run", "setup", "tasks", "types", "uninstalldelete",
    "uninstallrun",
];

/// Inno Setup scripts: INI-like sections with a Pascal `[Code]` section.
pub const INNOSETUP: Syntax = Syntax {
    keywords: KeywordTable::insensitive(PASCAL_KEYWORDS),
    types: KeywordTable::insensitive(INNOSETUP_SECTIONS),
    line_comments: &["//"],
    leading_comments: &[";"],
    block_comments: PASCAL_COMMENTS,
    strings: &[
        StringRule::new("'", "'", Escape::Doubled),
        StringRule::new("\"", "\"", Escape::Doubled),
    ],
    preprocessor: Some('#'),
    ..Syntax::DEFAULT
};

const FORTRAN_KEYWORDS: &[&str] = &[
    "allocatable", "allocate", "assign", "call", "case", "character", "close", "common", "complex",
    "contains", "continue", "cycle", "data", "deallocate", "default", "dimension", "do", "double",
    "else", "elseif", "elsewhere", "end", "enddo", "endif", "entry", "equivalence", "exit",
    "external", "format", "function", "go", "goto", "if", "implicit", "in", "inout", "integer",
    "intent", "interface", "intrinsic", "kind", "logical", "module", "namelist", "none", "nullify",
    "only", "open", "optional", "out", "parameter", "pointer", "precision", "print", "private",
    "procedure", "program", "public", "read", "real", "recursive", "result", "return", "rewind",
    "save", "select", "sequence", "stop", "subroutine", "target", "then", "to", "type", "use",
    "where", "while", "write",
];

const FORTRAN_FUNCTIONS: &[&str] = &[
    "abs", "acos", "aimag", "aint", "anint", "asin", "atan", "atan2", "char", "cmplx", "conjg",
    "cos", "cosh", "dble", "dim", "exp", "float", "iabs", "ichar", "idint", "idnint", "index",
    "int", "len", "lge", "lgt", "lle", "llt", "log", "log10", "max", "min", "mod", "nint", "real",
    "sign", "sin", "sinh", "size", "sqrt", "sum", "tan", "tanh", "trim",
];

pub const FORTRAN: Syntax = Syntax {
    keywords: KeywordTable::insensitive(FORTRAN_KEYWORDS),
    functions: KeywordTable::insensitive(FORTRAN_FUNCTIONS),
    line_comments: &["!"],
    strings: &[
        StringRule::new("'", "'", Escape::Doubled),
        StringRule::new("\"", "\"", Escape::Doubled),
    ],
    preprocessor: Some('#'),
    ..Syntax::DEFAULT
};

const VHDL_KEYWORDS: &[&str] = &[
    "abs", "access", "after", "alias", "all", "and", "architecture", "array", "assert", "attribute",
    "begin", "block", "body", "buffer", "bus", "case", "component", "configuration", "constant",
    "disconnect", "downto", "else", "elsif", "end", "entity", "exit", "file", "for", "function",
    "generate", "generic", "group", "guarded", "if", "impure", "in", "inertial", "inout", "is",
    "label", "library", "linkage", "literal", "loop", "map", "mod", "nand", "new", "next", "nor",
    "not", "null", "of", "on", "open", "or", "others", "out", "package", "port", "postponed",
    "procedure", "process", "pure", "range", "record", "register", "reject", "rem", "report",
    "return", "rol", "ror", "select", "severity", "shared", "signal", "sla", "sll", "sra", "srl",
    "subtype", "then", "to", "transport", "type", "unaffected", "units", "until", "use", "variable",
    "wait", "when", "while", "with", "xnor", "xor",
];

const VHDL_TYPES: &[&str] = &[
    "bit", "bit_vector", "boolean", "character", "integer", "natural", "positive", "real", "signed",
    "std_logic", "std_logic_vector", "std_ulogic", "std_ulogic_vector", "string", "time",
    "unsigned",
];

pub const VHDL: Syntax = Syntax {
    keywords: KeywordTable::insensitive(VHDL_KEYWORDS),
    types: KeywordTable::insensitive(VHDL_TYPES),
    line_comments: &["--"],
    strings: &[
        StringRule::new("\"", "\"", Escape::Doubled),
        StringRule::new("'", "'", Escape::None).with(StringFlags::NOT_AFTER_WORD),
    ],
    ..Syntax::DEFAULT
};

const LISP_COMMENTS: &[BlockRule] = &[BlockRule::new(";|", "|;")];

const LISP_KEYWORDS: &[&str] = &[
    "and", "cond", "defun", "foreach", "if", "lambda", "let", "or", "progn", "quote", "repeat",
    "setq", "while",
];

const LISP_FUNCTIONS: &[&str] = &[
    "abs", "alert", "append", "apply", "car", "cdr", "command", "cons", "entget", "entmod",
    "entsel", "getint", "getpoint", "getreal", "getstring", "itoa", "length", "list", "load",
    "mapcar", "member", "nth", "princ", "prompt", "rtos", "ssget", "strcase", "strcat", "strlen",
    "substr", "vl-load-com",
];

/// AutoLISP.
pub const LISP: Syntax = Syntax {
    keywords: KeywordTable::insensitive(LISP_KEYWORDS),
    functions: KeywordTable::insensitive(LISP_FUNCTIONS),
    line_comments: &[";"],
    block_comments: LISP_COMMENTS,
    strings: &[StringRule::multiline("\"", "\"", Escape::Char('\\'))],
    ident_chars: "-:*",
    ..Syntax::DEFAULT
};

const SIOD_KEYWORDS: &[&str] = &[
    "and", "begin", "case", "cond", "define", "delay", "do", "else", "if", "lambda", "let", "let*",
    "letrec", "or", "quasiquote", "quote", "set!",
];

const SIOD_FUNCTIONS: &[&str] = &[
    "append", "apply", "assoc", "car", "cdr", "cons", "display", "eq?", "equal?", "eqv?", "length",
    "list", "map", "member", "newline", "null?", "pair?", "reverse", "vector", "write",
];

/// The SIOD Scheme dialect.
pub const SIOD: Syntax = Syntax {
    keywords: KeywordTable::insensitive(SIOD_KEYWORDS),
    functions: KeywordTable::insensitive(SIOD_FUNCTIONS),
    line_comments: &[";"],
    block_comments: LISP_COMMENTS,
    strings: &[StringRule::multiline("\"", "\"", Escape::Char('\\'))],
    ident_chars: "-*!?<>=/+",
    ..Syntax::DEFAULT
};

pub static BASIC_LEXER: GenericLexer = GenericLexer::new(&BASIC);
pub static VBSCRIPT_LEXER: GenericLexer = GenericLexer::new(&VBSCRIPT);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::highlight::keywords::assert_table_consistent;
    use crate::highlight::{ColorClass, ColorClass::*, Cookie, LineLexer, lex_line};

    fn classes(lexer: &dyn LineLexer, text: &str) -> Vec<(usize, ColorClass)> {
        let line: Vec<char> = text.chars().collect();
        let (spans, _) = lex_line(lexer, Cookie::default(), &line, line.len());
        spans.into_iter().map(|s| (s.start, s.class)).collect()
    }

    #[test]
    fn tables_are_sorted() {
        for (name, syntax) in [
            ("basic", &BASIC),
            ("sql", &SQL),
            ("pascal", &PASCAL),
            ("innosetup", &INNOSETUP),
            ("fortran", &FORTRAN),
            ("vhdl", &VHDL),
            ("lisp", &LISP),
            ("siod", &SIOD),
        ] {
            assert_table_consistent(name, &syntax.keywords);
            assert_table_consistent(name, &syntax.types);
            assert_table_consistent(name, &syntax.functions);
            assert_table_consistent(name, &syntax.comment_words);
        }
    }

    #[test]
    fn basic_comments_and_strings() {
        assert_eq!(classes(&BASIC_LEXER, "REM hi"), vec![(0, Comment)]);
        assert_eq!(
            classes(&BASIC_LEXER, "Dim remark ' x"),
            vec![(0, Keyword), (3, NormalText), (11, Comment)]
        );
        assert_eq!(classes(&BASIC_LEXER, "s = \"a\"\"b\" & Left(s)"), vec![
            (0, NormalText),
            (2, Operator),
            (3, NormalText),
            (4, String),
            (10, NormalText),
            (11, Operator),
            (12, NormalText),
            (13, User2),
            (17, Operator),
            (18, NormalText),
            (19, Operator),
        ]);
    }

    #[test]
    fn pascal_brace_comments_span_lines() {
        let lexer = GenericLexer::new(&PASCAL);
        let line: Vec<char> = "begin { note".chars().collect();
        let (_, cookie) = lex_line(&lexer, Cookie::default(), &line, line.len());
        let line: Vec<char> = "more } end".chars().collect();
        let (spans, _) = lex_line(&lexer, cookie, &line, line.len());
        assert_eq!(
            spans.iter().map(|s| (s.start, s.class)).collect::<Vec<_>>(),
            vec![(0, Comment), (6, NormalText), (7, Keyword)]
        );
    }

    #[test]
    fn vhdl_attributes_are_not_characters() {
        let lexer = GenericLexer::new(&VHDL);
        assert_eq!(
            classes(&lexer, "clk'event"),
            vec![(0, NormalText), (3, Operator), (4, NormalText)]
        );
        assert_eq!(classes(&lexer, "x <= '1';")[3], (5, String));
    }

    #[test]
    fn innosetup_sections_and_leading_comments() {
        let lexer = GenericLexer::new(&INNOSETUP);
        assert_eq!(classes(&lexer, "[Setup]"), vec![(0, Operator), (1, User1), (6, Operator)]);
        assert_eq!(classes(&lexer, "  ; note"), vec![(0, NormalText), (2, Comment)]);
    }
}
