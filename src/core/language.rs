//! Per-language keyword and delimiter tables.
//!
//! The casing engine never guesses at a language: it needs the reserved
//! keywords (which are never renamed) and the delimiter characters (which
//! bound identifiers). A handful of common languages ship built in; settings
//! files may declare more, or override a built-in by name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Punctuation shared by the C family. `"` and `\` are deliberately absent:
/// they drive string-literal tracking.
const C_LIKE_DELIMITERS: &str = "(){}[];,.:=+-*/%<>!&|^~?#'";
const SCRIPT_DELIMITERS: &str = "(){}[];,.:=+-*/%<>!&|^~?#@'`";

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Bool", "_Complex", "_Imaginary",
    "NULL", "bool", "true", "false",
];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "constexpr", "const_cast", "continue", "decltype", "default", "delete",
    "do", "double", "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false",
    "float", "for", "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace",
    "new", "noexcept", "not", "nullptr", "operator", "or", "private", "protected", "public",
    "register", "reinterpret_cast", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "throw", "true",
    "try", "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual", "void",
    "volatile", "while", "xor", "NULL", "std",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "try", "void", "volatile", "while", "true", "false",
    "null", "var", "record", "String", "Object",
];

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
    "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var",
    "void", "while", "with", "yield", "console", "document", "window",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "self", "cls", "print", "__init__", "__name__",
    "__main__",
];

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var", "bool", "byte", "error", "int",
    "string", "nil", "true", "false", "iota",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "Some", "None", "Ok", "Err", "String", "Vec",
    "Option", "Result", "Box",
];

/// Keywords and delimiters for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageTable {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub keywords: BTreeSet<String>,
    pub delimiters: BTreeSet<char>,
}

impl LanguageTable {
    pub fn new(
        name: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
        delimiters: impl IntoIterator<Item = char>,
    ) -> Self {
        LanguageTable {
            name: name.into(),
            aliases: Vec::new(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            delimiters: delimiters.into_iter().collect(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Whether `name` refers to this table, by name or alias, ignoring ASCII case.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Lookup of language tables by name or alias.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    tables: Vec<LanguageTable>,
}

impl LanguageRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let c_like = C_LIKE_DELIMITERS.chars();
        let script = SCRIPT_DELIMITERS.chars();

        LanguageRegistry {
            tables: vec![
                LanguageTable::new("c", C_KEYWORDS.iter().copied(), c_like.clone())
                    .with_aliases(&["h"]),
                LanguageTable::new("cpp", CPP_KEYWORDS.iter().copied(), c_like.clone())
                    .with_aliases(&["c++", "cc", "cxx", "hpp"]),
                LanguageTable::new("java", JAVA_KEYWORDS.iter().copied(), c_like.clone()),
                LanguageTable::new("javascript", JAVASCRIPT_KEYWORDS.iter().copied(), script.clone())
                    .with_aliases(&["js", "jsx", "mjs"]),
                LanguageTable::new("python", PYTHON_KEYWORDS.iter().copied(), script.clone())
                    .with_aliases(&["py"]),
                LanguageTable::new("go", GO_KEYWORDS.iter().copied(), c_like.clone())
                    .with_aliases(&["golang"]),
                LanguageTable::new("rust", RUST_KEYWORDS.iter().copied(), c_like)
                    .with_aliases(&["rs"]),
            ],
        }
    }

    /// Add tables, replacing any existing table with the same name.
    pub fn with_tables(mut self, tables: impl IntoIterator<Item = LanguageTable>) -> Self {
        for table in tables {
            self.tables.retain(|existing| !existing.name.eq_ignore_ascii_case(&table.name));
            self.tables.push(table);
        }
        self
    }

    pub fn tables(&self) -> &[LanguageTable] {
        &self.tables
    }

    pub fn names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    /// Find the table for `name`. A missing table is reported as
    /// `language.not_found` so the caller can refuse to run.
    pub fn resolve(&self, name: &str) -> Result<&LanguageTable> {
        // Later tables win so that overrides added via `with_tables` take effect.
        self.tables
            .iter()
            .rev()
            .find(|t| t.matches(name))
            .ok_or_else(|| Error::language_not_found(name, self.names()))
    }
}
