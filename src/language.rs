use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Pattern used when a language has no comment query of its own.
pub const GENERIC_COMMENT_QUERY: &str = include_str!("../queries/comment.scm");

const LINE_BLOCK_COMMENT_QUERY: &str = include_str!("../queries/line_block_comment.scm");
const LINE_MULTILINE_COMMENT_QUERY: &str = include_str!("../queries/line_multiline_comment.scm");
const COMMENT_MULTILINE_QUERY: &str = include_str!("../queries/comment_multiline.scm");
const COMMENT_BLOCK_QUERY: &str = include_str!("../queries/comment_block.scm");
const PYTHON_DOCSTRING_QUERY: &str = include_str!("../queries/python_docstring.scm");
const JSDOC_QUERY: &str = include_str!("../queries/jsdoc.scm");
const JAVADOC_QUERY: &str = include_str!("../queries/javadoc.scm");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Tsx,
    Rust,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Bash,
    Php,
    Lua,
    Elixir,
    OCaml,
    OCamlInterface,
    Html,
    Css,
    Yaml,
    Toml,
    Hcl,
    Kotlin,
    Swift,
    Scala,
    Protobuf,
}

/// Static per-language configuration. Built once, never mutated.
#[derive(Debug)]
pub struct LanguageEntry {
    pub language: Language,
    pub name: &'static str,
    /// Lowercase extensions without the dot. Extensionless basenames live here too.
    pub extensions: &'static [&'static str],
    /// Comment patterns in preference order; the first that compiles against the
    /// grammar is used. Empty means the generic pattern.
    pub comment_queries: &'static [&'static str],
    pub docstring_query: Option<&'static str>,
}

static ENTRIES: &[LanguageEntry] = &[
    LanguageEntry {
        language: Language::Python,
        name: "python",
        extensions: &["py"],
        comment_queries: &[],
        docstring_query: Some(PYTHON_DOCSTRING_QUERY),
    },
    LanguageEntry {
        language: Language::JavaScript,
        name: "javascript",
        extensions: &["js", "jsx", "mjs", "cjs"],
        comment_queries: &[],
        docstring_query: Some(JSDOC_QUERY),
    },
    LanguageEntry {
        language: Language::TypeScript,
        name: "typescript",
        extensions: &["ts", "mts", "cts"],
        comment_queries: &[],
        docstring_query: Some(JSDOC_QUERY),
    },
    LanguageEntry {
        language: Language::Tsx,
        name: "tsx",
        extensions: &["tsx"],
        comment_queries: &[],
        docstring_query: Some(JSDOC_QUERY),
    },
    LanguageEntry {
        language: Language::Rust,
        name: "rust",
        extensions: &["rs"],
        comment_queries: &[LINE_BLOCK_COMMENT_QUERY],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Go,
        name: "go",
        extensions: &["go"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Java,
        name: "java",
        extensions: &["java"],
        comment_queries: &[LINE_BLOCK_COMMENT_QUERY],
        docstring_query: Some(JAVADOC_QUERY),
    },
    LanguageEntry {
        language: Language::C,
        name: "c",
        extensions: &["c", "h"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Cpp,
        name: "cpp",
        extensions: &["cpp", "cc", "cxx", "hpp", "hh"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::CSharp,
        name: "csharp",
        extensions: &["cs"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Ruby,
        name: "ruby",
        extensions: &["rb"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Bash,
        name: "bash",
        extensions: &["sh", "bash", "zsh", "pkgbuild"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Php,
        name: "php",
        extensions: &["php"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Lua,
        name: "lua",
        extensions: &["lua"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Elixir,
        name: "elixir",
        extensions: &["ex", "exs"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::OCaml,
        name: "ocaml",
        extensions: &["ml"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::OCamlInterface,
        name: "ocaml_interface",
        extensions: &["mli"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Html,
        name: "html",
        extensions: &["html", "htm"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Css,
        name: "css",
        extensions: &["css"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Yaml,
        name: "yaml",
        extensions: &["yaml", "yml"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Toml,
        name: "toml",
        extensions: &["toml"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Hcl,
        name: "hcl",
        extensions: &["hcl", "tf"],
        comment_queries: &[],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Kotlin,
        name: "kotlin",
        extensions: &["kt", "kts"],
        comment_queries: &[LINE_MULTILINE_COMMENT_QUERY, LINE_BLOCK_COMMENT_QUERY, GENERIC_COMMENT_QUERY],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Swift,
        name: "swift",
        extensions: &["swift"],
        comment_queries: &[COMMENT_MULTILINE_QUERY, GENERIC_COMMENT_QUERY],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Scala,
        name: "scala",
        extensions: &["scala", "sc"],
        comment_queries: &[COMMENT_BLOCK_QUERY, GENERIC_COMMENT_QUERY],
        docstring_query: None,
    },
    LanguageEntry {
        language: Language::Protobuf,
        name: "protobuf",
        extensions: &["proto"],
        comment_queries: &[],
        docstring_query: None,
    },
];

fn entry_index() -> &'static HashMap<Language, &'static LanguageEntry> {
    static IDX: OnceLock<HashMap<Language, &'static LanguageEntry>> = OnceLock::new();
    IDX.get_or_init(|| ENTRIES.iter().map(|e| (e.language, e)).collect())
}

fn extension_table() -> &'static HashMap<&'static str, Language> {
    static TABLE: OnceLock<HashMap<&'static str, Language>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        for entry in ENTRIES {
            for ext in entry.extensions {
                table.insert(*ext, entry.language);
            }
        }
        table
    })
}

impl Language {
    pub fn entry(self) -> &'static LanguageEntry {
        // Every variant has exactly one row in ENTRIES.
        entry_index()[&self]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn comment_queries(self) -> &'static [&'static str] {
        match self.entry().comment_queries {
            [] => &[GENERIC_COMMENT_QUERY],
            queries => queries,
        }
    }

    /// Preferred comment pattern.
    pub fn comment_query(self) -> &'static str {
        self.comment_queries()[0]
    }

    pub fn docstring_query(self) -> Option<&'static str> {
        self.entry().docstring_query
    }

    /// Grammar handle, or `None` when the grammar was compiled out via cargo features.
    pub fn grammar(self) -> Option<tree_sitter::Language> {
        match self {
            Language::Python => Some(tree_sitter_python::LANGUAGE.into()),
            Language::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Language::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
            Language::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
            #[cfg(feature = "lang-go")]
            Language::Go => Some(tree_sitter_go::LANGUAGE.into()),
            #[cfg(feature = "lang-java")]
            Language::Java => Some(tree_sitter_java::LANGUAGE.into()),
            #[cfg(feature = "lang-c")]
            Language::C => Some(tree_sitter_c::LANGUAGE.into()),
            #[cfg(feature = "lang-cpp")]
            Language::Cpp => Some(tree_sitter_cpp::LANGUAGE.into()),
            #[cfg(feature = "lang-csharp")]
            Language::CSharp => Some(tree_sitter_c_sharp::LANGUAGE.into()),
            #[cfg(feature = "lang-ruby")]
            Language::Ruby => Some(tree_sitter_ruby::LANGUAGE.into()),
            #[cfg(feature = "lang-bash")]
            Language::Bash => Some(tree_sitter_bash::LANGUAGE.into()),
            #[cfg(feature = "lang-php")]
            Language::Php => Some(tree_sitter_php::LANGUAGE_PHP.into()),
            #[cfg(feature = "lang-lua")]
            Language::Lua => Some(tree_sitter_lua::LANGUAGE.into()),
            #[cfg(feature = "lang-elixir")]
            Language::Elixir => Some(tree_sitter_elixir::LANGUAGE.into()),
            #[cfg(feature = "lang-ocaml")]
            Language::OCaml => Some(tree_sitter_ocaml::LANGUAGE_OCAML.into()),
            #[cfg(feature = "lang-ocaml")]
            Language::OCamlInterface => Some(tree_sitter_ocaml::LANGUAGE_OCAML_INTERFACE.into()),
            #[cfg(feature = "lang-html")]
            Language::Html => Some(tree_sitter_html::LANGUAGE.into()),
            #[cfg(feature = "lang-css")]
            Language::Css => Some(tree_sitter_css::LANGUAGE.into()),
            #[cfg(feature = "lang-yaml")]
            Language::Yaml => Some(tree_sitter_yaml::LANGUAGE.into()),
            #[cfg(feature = "lang-toml")]
            Language::Toml => Some(tree_sitter_toml_ng::LANGUAGE.into()),
            #[cfg(feature = "lang-hcl")]
            Language::Hcl => Some(tree_sitter_hcl::LANGUAGE.into()),
            #[cfg(feature = "lang-kotlin")]
            Language::Kotlin => Some(tree_sitter_kotlin_ng::LANGUAGE.into()),
            #[cfg(feature = "lang-swift")]
            Language::Swift => Some(tree_sitter_swift::LANGUAGE.into()),
            #[cfg(feature = "lang-scala")]
            Language::Scala => Some(tree_sitter_scala::LANGUAGE.into()),
            #[cfg(feature = "lang-proto")]
            Language::Protobuf => Some(tree_sitter_proto::LANGUAGE.into()),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    pub fn is_compiled_in(self) -> bool {
        self.grammar().is_some()
    }

    pub fn all() -> impl Iterator<Item = Language> {
        ENTRIES.iter().map(|e| e.language)
    }
}

fn file_name_lower(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Lookup key for a path: the lowercase text after the last `.` of the file name,
/// or the whole lowercase file name when there is no extension (`Dockerfile`, `PKGBUILD`).
pub fn lookup_key(path: &str) -> String {
    let name = file_name_lower(path);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_string(),
        _ => name,
    }
}

/// Map a path to a supported language. Content is never inspected.
pub fn resolve(path: &str) -> Option<Language> {
    let key = lookup_key(path);
    if key.is_empty() {
        return None;
    }
    extension_table()
        .get(key.as_str())
        .copied()
        .filter(|lang| lang.is_compiled_in())
}

/// Language identifier for a path, or `""` when unsupported.
pub fn language_name(path: &str) -> &'static str {
    resolve(path).map(Language::name).unwrap_or("")
}

pub fn is_supported(path: &str) -> bool {
    resolve(path).is_some()
}
