// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Scripting languages: `#` comments, sigils and interpolating strings.

use super::generic::{BlockRule, Escape, GenericLexer, StringRule, Syntax};
use super::keywords::KeywordTable;

const HASH: &[&str] = &["#"];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "match", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

const PYTHON_TYPES: &[&str] = &[
    "bool", "bytearray", "bytes", "complex", "dict", "float", "frozenset", "list", "object", "set",
    "str", "tuple", "type",
];

const PYTHON_FUNCTIONS: &[&str] = &[
    "abs", "all", "any", "enumerate", "filter", "getattr", "hasattr", "isinstance", "iter", "len",
    "map", "max", "min", "next", "open", "print", "range", "repr", "reversed", "round", "setattr",
    "sorted", "sum", "super", "zip",
];

pub const PYTHON: Syntax = Syntax {
    keywords: KeywordTable::sensitive(PYTHON_KEYWORDS),
    types: KeywordTable::sensitive(PYTHON_TYPES),
    functions: KeywordTable::sensitive(PYTHON_FUNCTIONS),
    line_comments: HASH,
    strings: &[
        StringRule::multiline("\"\"\"", "\"\"\"", Escape::Char('\\')),
        StringRule::multiline("'''", "'''", Escape::Char('\\')),
        StringRule::new("\"", "\"", Escape::Char('\\')),
        StringRule::new("'", "'", Escape::Char('\\')),
    ],
    continuation: Some('\\'),
    ..Syntax::DEFAULT
};

const SHELL_KEYWORDS: &[&str] = &[
    "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if", "in",
    "local", "readonly", "return", "select", "then", "time", "until", "while",
];

const SHELL_FUNCTIONS: &[&str] = &[
    "alias", "bg", "cd", "command", "declare", "echo", "eval", "exec", "exit", "false", "fg",
    "getopts", "hash", "jobs", "kill", "printf", "pwd", "read", "set", "shift", "source", "test",
    "trap", "true", "type", "ulimit", "umask", "unalias", "unset", "wait",
];

pub const SHELL: Syntax = Syntax {
    keywords: KeywordTable::sensitive(SHELL_KEYWORDS),
    functions: KeywordTable::sensitive(SHELL_FUNCTIONS),
    line_comments: HASH,
    comment_after_space: true,
    strings: &[
        StringRule::multiline("\"", "\"", Escape::Char('\\')),
        StringRule::multiline("'", "'", Escape::None),
        StringRule::multiline("`", "`", Escape::Char('\\')),
    ],
    continuation: Some('\\'),
    sigils: "$",
    ..Syntax::DEFAULT
};

const PERL_KEYWORDS: &[&str] = &[
    "and", "cmp", "continue", "do", "else", "elsif", "eq", "for", "foreach", "ge", "goto", "gt",
    "if", "last", "le", "local", "lt", "my", "ne", "next", "no", "not", "or", "our", "package",
    "redo", "require", "return", "sub", "unless", "until", "use", "while", "xor",
];

const PERL_FUNCTIONS: &[&str] = &[
    "chomp", "chop", "close", "defined", "delete", "die", "each", "exists", "join", "keys", "lc",
    "length", "map", "open", "pop", "print", "printf", "push", "scalar", "shift", "sort", "splice",
    "split", "sprintf", "substr", "uc", "unshift", "values", "wantarray", "warn",
];

pub const PERL: Syntax = Syntax {
    keywords: KeywordTable::sensitive(PERL_KEYWORDS),
    functions: KeywordTable::sensitive(PERL_FUNCTIONS),
    line_comments: HASH,
    block_comments: &[
        BlockRule::at_line_start("=pod", "=cut"),
        BlockRule::at_line_start("=head", "=cut"),
        BlockRule::at_line_start("=begin", "=cut"),
        BlockRule::at_line_start("=over", "=cut"),
        BlockRule::at_line_start("=item", "=cut"),
    ],
    strings: &[
        StringRule::multiline("\"", "\"", Escape::Char('\\')),
        StringRule::multiline("'", "'", Escape::Char('\\')),
    ],
    sigils: "$@%",
    ..Syntax::DEFAULT
};

const RUBY_KEYWORDS: &[&str] = &[
    "BEGIN", "END", "__FILE__", "__LINE__", "alias", "and", "begin", "break", "case", "class",
    "def", "defined?", "do", "else", "elsif", "end", "ensure", "false", "for", "if", "in", "module",
    "next", "nil", "not", "or", "redo", "rescue", "retry", "return", "self", "super", "then",
    "true", "undef", "unless", "until", "when", "while", "yield",
];

const RUBY_FUNCTIONS: &[&str] = &[
    "attr_accessor", "attr_reader", "attr_writer", "extend", "include", "lambda", "loop", "p",
    "proc", "puts", "raise", "require", "require_relative",
];

pub const RUBY: Syntax = Syntax {
    keywords: KeywordTable::sensitive(RUBY_KEYWORDS),
    functions: KeywordTable::sensitive(RUBY_FUNCTIONS),
    line_comments: HASH,
    block_comments: &[BlockRule::at_line_start("=begin", "=end")],
    strings: &[
        StringRule::multiline("\"", "\"", Escape::Char('\\')),
        StringRule::multiline("'", "'", Escape::Char('\\')),
        StringRule::new("`", "`", Escape::Char('\\')),
    ],
    sigils: "@$:",
    ident_chars: "?!",
    ..Syntax::DEFAULT
};

const POWERSHELL_KEYWORDS: &[&str] = &[
    "begin", "break", "catch", "class", "continue", "data", "define", "do", "dynamicparam", "else",
    "elseif", "end", "enum", "exit", "filter", "finally", "for", "foreach", "from", "function",
    "hidden", "if", "in", "param", "process", "return", "static", "switch", "throw", "trap", "try",
    "until", "using", "var", "while",
];

const POWERSHELL_FUNCTIONS: &[&str] = &[
    "add-content", "copy-item", "foreach-object", "get-childitem", "get-content", "get-item",
    "new-item", "new-object", "out-file", "remove-item", "select-object", "set-content",
    "set-location", "sort-object", "where-object", "write-error", "write-host", "write-output",
    "write-verbose", "write-warning",
];

pub const POWERSHELL: Syntax = Syntax {
    keywords: KeywordTable::insensitive(POWERSHELL_KEYWORDS),
    functions: KeywordTable::insensitive(POWERSHELL_FUNCTIONS),
    line_comments: HASH,
    block_comments: &[BlockRule::new("<#", "#>")],
    strings: &[
        StringRule::multiline("@\"", "\"@", Escape::None),
        StringRule::multiline("@'", "'@", Escape::None),
        StringRule::multiline("\"", "\"", Escape::Char('`')),
        StringRule::multiline("'", "'", Escape::Doubled),
    ],
    sigils: "$",
    ident_chars: "-",
    ..Syntax::DEFAULT
};

const TCL_KEYWORDS: &[&str] = &[
    "after", "append", "array", "break", "catch", "close", "concat", "continue", "else", "elseif",
    "error", "eval", "exec", "expr", "for", "foreach", "format", "gets", "global", "if", "incr",
    "info", "join", "lappend", "lindex", "list", "llength", "lrange", "lsort", "namespace", "open",
    "proc", "puts", "regexp", "regsub", "return", "set", "source", "split", "string", "switch",
    "then", "unset", "upvar", "variable", "vwait", "while",
];

pub const TCL: Syntax = Syntax {
    keywords: KeywordTable::sensitive(TCL_KEYWORDS),
    leading_comments: HASH,
    strings: &[StringRule::multiline("\"", "\"", Escape::Char('\\'))],
    continuation: Some('\\'),
    sigils: "$",
    ident_chars: ":",
    ..Syntax::DEFAULT
};

const PO_KEYWORDS: &[&str] = &[
    "msgctxt", "msgid", "msgid_plural", "msgstr",
];

/// gettext message catalogs.
pub const PO: Syntax = Syntax {
    keywords: KeywordTable::sensitive(PO_KEYWORDS),
    leading_comments: HASH,
    strings: &[StringRule::new("\"", "\"", Escape::Char('\\'))],
    ..Syntax::DEFAULT
};

const AUTOIT_KEYWORDS: &[&str] = &[
    "and", "byref", "case", "const", "continuecase", "continueloop", "default", "dim", "do", "else",
    "elseif", "endfunc", "endif", "endselect", "endswitch", "endwith", "enum", "exit", "exitloop",
    "false", "for", "func", "global", "if", "in", "local", "next", "not", "null", "or", "redim",
    "return", "select", "static", "step", "switch", "then", "to", "true", "until", "volatile",
    "wend", "while", "with",
];

const AUTOIT_FUNCTIONS: &[&str] = &[
    "consolewrite", "fileopen", "fileread", "filewrite", "guicreate", "guictrlcreatebutton",
    "guisetstate", "msgbox", "run", "send", "sleep", "stringformat", "stringleft", "stringlen",
    "stringreplace", "stringright", "stringsplit", "winactivate", "winwaitactive",
];

pub const AUTOIT: Syntax = Syntax {
    keywords: KeywordTable::insensitive(AUTOIT_KEYWORDS),
    functions: KeywordTable::insensitive(AUTOIT_FUNCTIONS),
    line_comments: &[";"],
    block_comments: &[
        BlockRule::new("#comments-start", "#comments-end"),
        BlockRule::new("#cs", "#ce"),
    ],
    strings: &[
        StringRule::new("\"", "\"", Escape::Doubled),
        StringRule::new("'", "'", Escape::Doubled),
    ],
    markers_ignore_case: true,
    preprocessor: Some('#'),
    sigils: "$@",
    ..Syntax::DEFAULT
};

const NSIS_KEYWORDS: &[&str] = &[
    "!define", "!else", "!endif", "!ifdef", "!ifndef", "!include", "!insertmacro", "!macro",
    "!macroend", "call", "createdirectory", "createshortcut", "delete", "deleteregkey", "file",
    "function", "functionend", "goto", "iferrors", "installdir", "name", "outfile", "readregstr",
    "requestexecutionlevel", "return", "section", "sectionend", "setoutpath", "strcpy",
    "writeregstr", "writeuninstaller",
];

pub const NSIS: Syntax = Syntax {
    keywords: KeywordTable::insensitive(NSIS_KEYWORDS),
    line_comments: &[";", "#"],
    block_comments: &[BlockRule::new("/*", "*/")],
    strings: &[
        StringRule::new("\"", "\"", Escape::Char('$')),
        StringRule::new("'", "'", Escape::Char('$')),
        StringRule::new("`", "`", Escape::Char('$')),
    ],
    sigils: "$",
    ident_chars: "!.",
    ..Syntax::DEFAULT
};

const TEX_KEYWORDS: &[&str] = &[
    r"\begin",
    r"\chapter",
    r"\def",
    r"\documentclass",
    r"\else",
    r"\end",
    r"\fi",
    r"\if",
    r"\input",
    r"\item",
    r"\label",
    r"\newcommand",
    r"\paragraph",
    r"\ref",
    r"\renewcommand",
    r"\section",
    r"\subsection",
    r"\subsubsection",
    r"\usepackage",
];

pub const TEX: Syntax = Syntax {
    keywords: KeywordTable::sensitive(TEX_KEYWORDS),
    line_comments: &["%"],
    ident_chars: "\\",
    ..Syntax::DEFAULT
};

pub static PERL_LEXER: GenericLexer = GenericLexer::new(&PERL);
