//! Language detection from file extension.

use serde::{Deserialize, Serialize};

/// Script languages whose route declarations are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::TypeScript];

    /// Detect language from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<Language> {
        match ext? {
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Language::TypeScript),
            _ => None,
        }
    }

    /// Parse a config name (`javascript`, `js`, `typescript`, `ts`).
    pub fn from_name(name: &str) -> Option<Language> {
        match name.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Some(Language::JavaScript),
            "typescript" | "ts" => Some(Language::TypeScript),
            _ => None,
        }
    }

    /// Returns all file extensions associated with this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::TypeScript => &["ts", "tsx", "mts", "cts"],
        }
    }

    /// Returns the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the configured language names. Unset means every language;
/// unknown names are skipped with a warning.
pub fn resolve_languages(names: Option<&[String]>) -> Vec<Language> {
    let Some(names) = names else {
        return Language::ALL.to_vec();
    };
    let mut languages = Vec::new();
    for name in names {
        match Language::from_name(name) {
            Some(lang) if !languages.contains(&lang) => languages.push(lang),
            Some(_) => {}
            None => tracing::warn!(language = %name, "ignoring unknown language in config"),
        }
    }
    languages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension(Some("js")), Some(Language::JavaScript));
        assert_eq!(Language::from_extension(Some("mts")), Some(Language::TypeScript));
        assert_eq!(Language::from_extension(Some("py")), None);
        assert_eq!(Language::from_extension(None), None);
    }

    #[test]
    fn test_extensions_round_trip() {
        for lang in Language::ALL {
            for ext in lang.extensions() {
                assert_eq!(Language::from_extension(Some(*ext)), Some(lang));
            }
        }
    }

    #[test]
    fn test_resolve_languages() {
        assert_eq!(resolve_languages(None), Language::ALL.to_vec());
        let names = vec!["JS".to_string(), "cobol".to_string(), "javascript".to_string()];
        assert_eq!(resolve_languages(Some(&names)), vec![Language::JavaScript]);
    }
}
