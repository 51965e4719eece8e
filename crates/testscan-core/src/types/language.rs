use serde::{Deserialize, Serialize};

/// Source languages the engine can detect frameworks and extract tests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    TypeScript,
    JavaScript,
    Go,
    Rust,
    Python,
    Ruby,
    Java,
    Kotlin,
    CSharp,
    Swift,
    Cpp,
    Php,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::TypeScript,
        Language::JavaScript,
        Language::Go,
        Language::Rust,
        Language::Python,
        Language::Ruby,
        Language::Java,
        Language::Kotlin,
        Language::CSharp,
        Language::Swift,
        Language::Cpp,
        Language::Php,
    ];

    /// Infer a language from a file extension (without the leading dot).
    ///
    /// Ambiguous extensions (`.h`, `.m`) are not resolved here — callers should fall
    /// back to a content probe or treat the file as unknown.
    pub fn from_extension(ext: &str) -> Option<Language> {
        Some(match ext {
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "py" | "pyi" => Language::Python,
            "rb" => Language::Ruby,
            "java" => Language::Java,
            "kt" | "kts" => Language::Kotlin,
            "cs" => Language::CSharp,
            "swift" => Language::Swift,
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "php" => Language::Php,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::CSharp => "csharp",
            Language::Swift => "swift",
            Language::Cpp => "cpp",
            Language::Php => "php",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
