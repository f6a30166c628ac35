use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Language identifier attached to every segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Bash,
    C,
    Cpp,
    CSharp,
    Css,
    Cue,
    Dockerfile,
    Elixir,
    Elm,
    Go,
    Groovy,
    Hcl,
    Html,
    Java,
    JavaScript,
    Kotlin,
    Lua,
    Markdown,
    OCaml,
    Php,
    Protobuf,
    Python,
    Ruby,
    Rust,
    Scala,
    Sql,
    Svelte,
    Swift,
    Toml,
    TypeScript,
    Yaml,
    /// Plain text; always chunked line by line
    Generic,
}

impl Language {
    /// Every registered language, `Generic` last
    pub const ALL: [Language; 32] = [
        Language::Bash,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Css,
        Language::Cue,
        Language::Dockerfile,
        Language::Elixir,
        Language::Elm,
        Language::Go,
        Language::Groovy,
        Language::Hcl,
        Language::Html,
        Language::Java,
        Language::JavaScript,
        Language::Kotlin,
        Language::Lua,
        Language::Markdown,
        Language::OCaml,
        Language::Php,
        Language::Protobuf,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Scala,
        Language::Sql,
        Language::Svelte,
        Language::Swift,
        Language::Toml,
        Language::TypeScript,
        Language::Yaml,
        Language::Generic,
    ];

    /// Detect language from file extension (without the leading dot)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "sh" | "bash" => Language::Bash,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "cs" => Language::CSharp,
            "css" => Language::Css,
            "cue" => Language::Cue,
            "dockerfile" => Language::Dockerfile,
            "ex" | "exs" => Language::Elixir,
            "elm" => Language::Elm,
            "go" => Language::Go,
            "groovy" | "gradle" => Language::Groovy,
            "hcl" | "tf" => Language::Hcl,
            "html" | "htm" => Language::Html,
            "java" => Language::Java,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "kt" | "kts" => Language::Kotlin,
            "lua" => Language::Lua,
            "md" | "markdown" => Language::Markdown,
            "ml" | "mli" => Language::OCaml,
            "php" | "phtml" => Language::Php,
            "proto" => Language::Protobuf,
            "py" | "pyi" | "pyw" => Language::Python,
            "rb" | "rake" | "gemspec" => Language::Ruby,
            "rs" => Language::Rust,
            "scala" | "sc" => Language::Scala,
            "sql" => Language::Sql,
            "svelte" => Language::Svelte,
            "swift" => Language::Swift,
            "toml" => Language::Toml,
            "ts" | "tsx" => Language::TypeScript,
            "yaml" | "yml" => Language::Yaml,
            _ => Language::Generic,
        }
    }

    /// Detect language from file path.
    ///
    /// Exact file names (`Dockerfile`) win over extensions; anything
    /// unrecognised is `Generic`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.file_name().and_then(|name| name.to_str()) == Some("Dockerfile") {
            return Language::Dockerfile;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Generic)
    }

    /// Get language name as string
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::Bash => "bash",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Css => "css",
            Language::Cue => "cue",
            Language::Dockerfile => "dockerfile",
            Language::Elixir => "elixir",
            Language::Elm => "elm",
            Language::Go => "go",
            Language::Groovy => "groovy",
            Language::Hcl => "hcl",
            Language::Html => "html",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Kotlin => "kotlin",
            Language::Lua => "lua",
            Language::Markdown => "markdown",
            Language::OCaml => "ocaml",
            Language::Php => "php",
            Language::Protobuf => "protobuf",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Scala => "scala",
            Language::Sql => "sql",
            Language::Svelte => "svelte",
            Language::Swift => "swift",
            Language::Toml => "toml",
            Language::TypeScript => "typescript",
            Language::Yaml => "yaml",
            Language::Generic => "generic",
        }
    }

    /// Check if a tree-sitter grammar is bundled for this language
    pub const fn supports_ast(self) -> bool {
        !matches!(
            self,
            Language::Cue
                | Language::Dockerfile
                | Language::Elm
                | Language::Groovy
                | Language::Protobuf
                | Language::Sql
                | Language::Svelte
                | Language::Generic
        )
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        let language = match self {
            Language::Bash => tree_sitter_bash::LANGUAGE,
            Language::C => tree_sitter_c::LANGUAGE,
            Language::Cpp => tree_sitter_cpp::LANGUAGE,
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE,
            Language::Css => tree_sitter_css::LANGUAGE,
            Language::Elixir => tree_sitter_elixir::LANGUAGE,
            Language::Go => tree_sitter_go::LANGUAGE,
            Language::Hcl => tree_sitter_hcl::LANGUAGE,
            Language::Html => tree_sitter_html::LANGUAGE,
            Language::Java => tree_sitter_java::LANGUAGE,
            Language::JavaScript => tree_sitter_javascript::LANGUAGE,
            Language::Kotlin => tree_sitter_kotlin_ng::LANGUAGE,
            Language::Lua => tree_sitter_lua::LANGUAGE,
            // block grammar; inline content stays inside its `inline` nodes
            Language::Markdown => tree_sitter_md::LANGUAGE,
            Language::OCaml => tree_sitter_ocaml::LANGUAGE_OCAML,
            Language::Php => tree_sitter_php::LANGUAGE_PHP,
            Language::Python => tree_sitter_python::LANGUAGE,
            Language::Ruby => tree_sitter_ruby::LANGUAGE,
            Language::Rust => tree_sitter_rust::LANGUAGE,
            Language::Scala => tree_sitter_scala::LANGUAGE,
            Language::Swift => tree_sitter_swift::LANGUAGE,
            Language::Toml => tree_sitter_toml_ng::LANGUAGE,
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
            Language::Yaml => tree_sitter_yaml::LANGUAGE,
            Language::Cue
            | Language::Dockerfile
            | Language::Elm
            | Language::Groovy
            | Language::Protobuf
            | Language::Sql
            | Language::Svelte
            | Language::Generic => return Err(ChunkerError::NoAstSupport(self)),
        };
        Ok(language.into())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ChunkerError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        let alias = match name.as_str() {
            "sh" | "shell" => Some(Language::Bash),
            "c++" | "cxx" => Some(Language::Cpp),
            "c#" | "cs" => Some(Language::CSharp),
            "golang" => Some(Language::Go),
            "js" => Some(Language::JavaScript),
            "ts" => Some(Language::TypeScript),
            "py" => Some(Language::Python),
            "rs" => Some(Language::Rust),
            "md" => Some(Language::Markdown),
            "yml" => Some(Language::Yaml),
            "text" | "plain" => Some(Language::Generic),
            _ => None,
        };

        alias
            .or_else(|| Self::ALL.into_iter().find(|lang| lang.as_str() == name))
            .ok_or_else(|| ChunkerError::unsupported_language(s))
    }
}
