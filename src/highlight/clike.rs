// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Curly-brace languages and their relatives.

use super::generic::{BlockRule, Escape, GenericLexer, StringRule, Syntax};
use super::keywords::KeywordTable;

const C_COMMENTS: &[BlockRule] = &[BlockRule::new("/*", "*/")];
const C_STRINGS: &[StringRule] = &[
    StringRule::new("\"", "\"", Escape::Char('\\')),
    StringRule::new("'", "'", Escape::Char('\\')),
];

const C_KEYWORDS: &[&str] = &[
    "_Atomic", "_Bool", "_Complex", "_Noreturn", "__asm", "__cdecl", "__declspec", "__except",
    "__fastcall", "__finally", "__forceinline", "__inline", "__int16", "__int32", "__int64",
    "__int8", "__leave", "__stdcall", "__try", "alignas", "alignof", "asm", "auto", "bool", "break",
    "case", "catch", "char", "char16_t", "char32_t", "char8_t", "class", "co_await", "co_return",
    "co_yield", "const", "const_cast", "consteval", "constexpr", "constinit", "continue",
    "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum", "explicit",
    "export", "extern", "false", "float", "for", "friend", "goto", "if", "inline", "int", "long",
    "mutable", "namespace", "new", "noexcept", "nullptr", "operator", "private", "protected",
    "public", "register", "reinterpret_cast", "restrict", "return", "short", "signed", "sizeof",
    "static", "static_assert", "static_cast", "struct", "switch", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned",
    "using", "virtual", "void", "volatile", "wchar_t", "while",
];

const C_TYPES: &[&str] = &[
    "BOOL", "BYTE", "DWORD", "FILE", "HANDLE", "HRESULT", "INT", "LONG", "LPARAM", "LPCSTR",
    "LPCTSTR", "LPCWSTR", "LPSTR", "LPTSTR", "LPVOID", "LPWSTR", "TCHAR", "UINT", "ULONG", "WCHAR",
    "WORD", "WPARAM", "int16_t", "int32_t", "int64_t", "int8_t", "intptr_t", "ptrdiff_t", "size_t",
    "ssize_t", "uint16_t", "uint32_t", "uint64_t", "uint8_t", "uintptr_t", "va_list",
];

const C_FUNCTIONS: &[&str] = &[
    "assert", "calloc", "fclose", "fopen", "fprintf", "free", "malloc", "memcmp", "memcpy",
    "memmove", "memset", "printf", "realloc", "snprintf", "sprintf", "strcat", "strchr", "strcmp",
    "strcpy", "strlen", "strncmp", "strncpy",
];

pub const C: Syntax = Syntax {
    keywords: KeywordTable::sensitive(C_KEYWORDS),
    types: KeywordTable::sensitive(C_TYPES),
    functions: KeywordTable::sensitive(C_FUNCTIONS),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: C_STRINGS,
    preprocessor: Some('#'),
    continuation: Some('\\'),
    ..Syntax::DEFAULT
};

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "add", "alias", "as", "ascending", "async", "await", "base", "bool", "break", "by",
    "byte", "case", "catch", "char", "checked", "class", "const", "continue", "decimal", "default",
    "delegate", "descending", "do", "double", "dynamic", "else", "enum", "equals", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "from", "get",
    "global", "goto", "group", "if", "implicit", "in", "init", "int", "interface", "internal",
    "into", "is", "join", "let", "lock", "long", "managed", "nameof", "namespace", "new", "nint",
    "not", "notnull", "nuint", "null", "object", "on", "operator", "or", "orderby", "out",
    "override", "params", "partial", "private", "protected", "public", "readonly", "record", "ref",
    "remove", "required", "return", "sbyte", "sealed", "select", "set", "short", "sizeof",
    "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof",
    "uint", "ulong", "unchecked", "unmanaged", "unsafe", "ushort", "using", "value", "var",
    "virtual", "void", "volatile", "when", "where", "while", "with", "yield",
];

const CSHARP_TYPES: &[&str] = &[
    "Boolean", "Byte", "Char", "DateTime", "Decimal", "Double", "Exception", "Guid", "IEnumerable",
    "IList", "Int16", "Int32", "Int64", "List", "Object", "SByte", "Single", "String", "Task",
    "UInt16", "UInt32", "UInt64", "Void",
];

pub const CSHARP: Syntax = Syntax {
    keywords: KeywordTable::sensitive(CSHARP_KEYWORDS),
    types: KeywordTable::sensitive(CSHARP_TYPES),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: &[
        StringRule::multiline("@\"", "\"", Escape::Doubled),
        StringRule::new("$\"", "\"", Escape::Char('\\')),
        StringRule::new("\"", "\"", Escape::Char('\\')),
        StringRule::new("'", "'", Escape::Char('\\')),
    ],
    preprocessor: Some('#'),
    ..Syntax::DEFAULT
};

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "permits", "private", "protected", "public", "record",
    "return", "sealed", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "var", "void", "volatile", "while", "yield",
];

const JAVA_TYPES: &[&str] = &[
    "Boolean", "Byte", "Character", "Double", "Float", "Integer", "List", "Long", "Map", "Object",
    "Set", "Short", "String", "StringBuilder", "System", "Thread",
];

pub const JAVA: Syntax = Syntax {
    keywords: KeywordTable::sensitive(JAVA_KEYWORDS),
    types: KeywordTable::sensitive(JAVA_TYPES),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: &[
        StringRule::multiline("\"\"\"", "\"\"\"", Escape::Char('\\')),
        C_STRINGS[0],
        C_STRINGS[1],
    ],
    ..Syntax::DEFAULT
};

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
    "from", "function", "get", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "of", "package", "private", "protected", "public", "return", "set", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
];

const JAVASCRIPT_TYPES: &[&str] = &[
    "Array", "ArrayBuffer", "BigInt", "Boolean", "Date", "Error", "Function", "JSON", "Map", "Math",
    "Number", "Object", "Promise", "Proxy", "Reflect", "RegExp", "Set", "String", "Symbol",
    "WeakMap", "WeakSet",
];

const JAVASCRIPT_FUNCTIONS: &[&str] = &[
    "alert", "decodeURI", "decodeURIComponent", "encodeURI", "encodeURIComponent", "eval",
    "isFinite", "isNaN", "parseFloat", "parseInt", "require", "setInterval", "setTimeout",
];

pub const JAVASCRIPT: Syntax = Syntax {
    keywords: KeywordTable::sensitive(JAVASCRIPT_KEYWORDS),
    types: KeywordTable::sensitive(JAVASCRIPT_TYPES),
    functions: KeywordTable::sensitive(JAVASCRIPT_FUNCTIONS),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: &[C_STRINGS[0], C_STRINGS[1], StringRule::multiline("`", "`", Escape::Char('\\'))],
    ident_chars: "$",
    regex_literals: true,
    ..Syntax::DEFAULT
};

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "false", "for", "func", "go", "goto", "if", "import", "interface", "iota", "map", "nil",
    "package", "range", "return", "select", "struct", "switch", "true", "type", "var",
];

const GO_TYPES: &[&str] = &[
    "any", "bool", "byte", "complex128", "complex64", "error", "float32", "float64", "int", "int16",
    "int32", "int64", "int8", "rune", "string", "uint", "uint16", "uint32", "uint64", "uint8",
    "uintptr",
];

const GO_FUNCTIONS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

pub const GO: Syntax = Syntax {
    keywords: KeywordTable::sensitive(GO_KEYWORDS),
    types: KeywordTable::sensitive(GO_TYPES),
    functions: KeywordTable::sensitive(GO_FUNCTIONS),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: &[C_STRINGS[0], C_STRINGS[1], StringRule::multiline("`", "`", Escape::None)],
    ..Syntax::DEFAULT
};

const INSTALLSHIELD_KEYWORDS: &[&str] = &[
    "abort", "begin", "bool", "byref", "call", "case", "char", "default", "downto", "else",
    "elseif", "end", "endfor", "endif", "endprogram", "endswitch", "endwhile", "exit", "for",
    "function", "goto", "hwnd", "if", "int", "list", "long", "number", "object", "pointer",
    "program", "prototype", "repeat", "return", "short", "step", "string", "switch", "then", "to",
    "typedef", "until", "void", "while",
];

const INSTALLSHIELD_FUNCTIONS: &[&str] = &[
    "askdestpath", "askoptions", "askpath", "askyesno", "disable", "enable", "exists",
    "getprofstring", "messagebox", "sprintf", "strlength", "strtoupper", "xcopyfile",
];

pub const INSTALLSHIELD: Syntax = Syntax {
    keywords: KeywordTable::insensitive(INSTALLSHIELD_KEYWORDS),
    functions: KeywordTable::insensitive(INSTALLSHIELD_FUNCTIONS),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: C_STRINGS,
    preprocessor: Some('#'),
    continuation: Some('\\'),
    ..Syntax::DEFAULT
};

const RC_KEYWORDS: &[&str] = &[
    "accelerators", "alt", "auto3state", "autocheckbox", "autoradiobutton", "begin", "bitmap",
    "block", "caption", "character", "checkbox", "class", "combobox", "control", "ctext", "cursor",
    "defpushbutton", "dialog", "dialogex", "discardable", "edittext", "end", "exstyle", "font",
    "groupbox", "icon", "listbox", "ltext", "menu", "menuex", "menuitem", "messagetable",
    "noinvert", "popup", "pushbox", "pushbutton", "radiobutton", "rcdata", "rtext", "scrollbar",
    "separator", "shift", "state3", "string", "stringtable", "style", "value", "version",
    "versioninfo", "virtkey",
];

pub const RESOURCES: Syntax = Syntax {
    keywords: KeywordTable::insensitive(RC_KEYWORDS),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: &[StringRule::new("\"", "\"", Escape::Doubled)],
    preprocessor: Some('#'),
    continuation: Some('\\'),
    ..Syntax::DEFAULT
};

const VERILOG_KEYWORDS: &[&str] = &[
    "always", "and", "assign", "automatic", "begin", "buf", "case", "casex", "casez", "cell",
    "config", "deassign", "default", "defparam", "design", "disable", "edge", "else", "end",
    "endcase", "endconfig", "endfunction", "endgenerate", "endmodule", "endprimitive", "endspecify",
    "endtable", "endtask", "event", "for", "force", "forever", "fork", "function", "generate",
    "genvar", "if", "ifnone", "initial", "inout", "input", "instance", "integer", "join",
    "localparam", "macromodule", "module", "nand", "negedge", "nor", "not", "or", "output",
    "parameter", "posedge", "primitive", "real", "realtime", "reg", "release", "repeat", "signed",
    "specify", "specparam", "supply0", "supply1", "table", "task", "time", "tri", "tri0", "tri1",
    "triand", "trior", "unsigned", "wait", "wand", "while", "wire", "wor", "xnor", "xor",
];

const VERILOG_FUNCTIONS: &[&str] = &[
    "$display", "$fclose", "$finish", "$fopen", "$fwrite", "$monitor", "$random", "$readmemb",
    "$readmemh", "$signed", "$stop", "$strobe", "$time", "$unsigned", "$write",
];

pub const VERILOG: Syntax = Syntax {
    keywords: KeywordTable::sensitive(VERILOG_KEYWORDS),
    functions: KeywordTable::sensitive(VERILOG_FUNCTIONS),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: &[C_STRINGS[0]],
    preprocessor: Some('`'),
    ident_chars: "$",
    ..Syntax::DEFAULT
};

const DCL_KEYWORDS: &[&str] = &[
    "action", "alignment", "allow_accept", "aspect_ratio", "big_increment", "boxed_column",
    "boxed_radio_column", "boxed_radio_row", "boxed_row", "button", "children_alignment",
    "children_fixed_height", "children_fixed_width", "color", "column", "dialog", "edit_box",
    "edit_limit", "edit_width", "errtile", "fixed_height", "fixed_width", "height", "image",
    "image_button", "initial_focus", "is_bold", "is_cancel", "is_default", "is_enabled",
    "is_tab_stop", "key", "label", "layout", "list", "list_box", "max_value", "min_value",
    "mnemonic", "multiple_select", "ok_cancel", "ok_cancel_help", "ok_cancel_help_errtile",
    "ok_only", "paragraph", "password_char", "popup_list", "radio_button", "radio_column",
    "radio_row", "row", "slider", "small_increment", "spacer", "spacer_0", "spacer_1",
    "tab_truncate", "tabs", "text", "text_part", "toggle", "value", "width",
];

pub const DCL: Syntax = Syntax {
    keywords: KeywordTable::sensitive(DCL_KEYWORDS),
    line_comments: &["//"],
    block_comments: C_COMMENTS,
    strings: &[C_STRINGS[0]],
    ..Syntax::DEFAULT
};

const REXX_KEYWORDS: &[&str] = &[
    "address", "arg", "by", "call", "do", "drop", "else", "end", "exit", "expose", "forever", "if",
    "interpret", "iterate", "leave", "nop", "numeric", "options", "otherwise", "parse", "procedure",
    "pull", "push", "queue", "return", "say", "select", "signal", "then", "to", "trace", "until",
    "upper", "value", "var", "when", "while", "with",
];

const REXX_FUNCTIONS: &[&str] = &[
    "abbrev", "abs", "center", "compare", "copies", "datatype", "date", "delstr", "delword",
    "format", "insert", "lastpos", "left", "length", "linein", "lineout", "lines", "max", "min",
    "overlay", "pos", "reverse", "right", "space", "strip", "substr", "subword", "time",
    "translate", "trunc", "verify", "word", "wordindex", "wordlength", "words",
];

pub const REXX: Syntax = Syntax {
    keywords: KeywordTable::insensitive(REXX_KEYWORDS),
    functions: KeywordTable::insensitive(REXX_FUNCTIONS),
    line_comments: &["--"],
    block_comments: C_COMMENTS,
    nested_comments: true,
    strings: &[
        StringRule::new("\"", "\"", Escape::Doubled),
        StringRule::new("'", "'", Escape::Doubled),
    ],
    ..Syntax::DEFAULT
};

const PHP_KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
    "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "empty",
    "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "eval", "exit",
    "extends", "false", "final", "finally", "fn", "for", "foreach", "function", "global", "goto",
    "if", "implements", "include", "include_once", "instanceof", "insteadof", "interface", "isset",
    "list", "match", "namespace", "new", "null", "or", "print", "private", "protected", "public",
    "readonly", "require", "require_once", "return", "static", "switch", "throw", "trait", "true",
    "try", "unset", "use", "var", "while", "xor", "yield",
];

const PHP_FUNCTIONS: &[&str] = &[
    "array_key_exists", "array_keys", "array_map", "array_merge", "array_push", "count", "explode",
    "implode", "in_array", "is_array", "isset", "json_decode", "json_encode", "preg_match",
    "preg_replace", "sprintf", "str_replace", "strlen", "strpos", "strtolower", "strtoupper",
    "substr", "trim",
];

/// PHP code between `<?php` and `?>`.
pub const PHP: Syntax = Syntax {
    keywords: KeywordTable::insensitive(PHP_KEYWORDS),
    functions: KeywordTable::insensitive(PHP_FUNCTIONS),
    line_comments: &["//", "#"],
    block_comments: C_COMMENTS,
    strings: &[
        StringRule::multiline("\"", "\"", Escape::Char('\\')),
        StringRule::multiline("'", "'", Escape::Char('\\')),
        StringRule::multiline("`", "`", Escape::Char('\\')),
    ],
    sigils: "$",
    ..Syntax::DEFAULT
};

pub static C_LEXER: GenericLexer = GenericLexer::new(&C);
pub static CSHARP_LEXER: GenericLexer = GenericLexer::new(&CSHARP);
pub static JAVA_LEXER: GenericLexer = GenericLexer::new(&JAVA);
pub static JAVASCRIPT_LEXER: GenericLexer = GenericLexer::new(&JAVASCRIPT);
pub static PHP_LEXER: GenericLexer = GenericLexer::new(&PHP);
