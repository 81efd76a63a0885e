use super::relationship::Relationship;
use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Language tag for files no engine claims.
pub const LANGUAGE_UNKNOWN: &str = "unknown";

/// Everything extracted from a single file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub file_path: String,
    pub language: String,
    pub symbols: Vec<Symbol>,
    pub relationships: Vec<Relationship>,
    /// Raw import targets, in source order.
    pub imports: Vec<String>,
    /// Names this file explicitly exports, where the language has the notion.
    pub exports: Vec<String>,
    /// Root modules/packages this file depends on.
    pub dependencies: BTreeSet<String>,
    pub module_docstring: Option<String>,
    /// Wall-clock seconds for the `parse_file` call.
    pub parse_time: Option<f64>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ParseResult {
    pub fn empty(file_path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            language: language.into(),
            ..Default::default()
        }
    }

    /// Result for a file no registered engine supports.
    pub fn unknown(file_path: impl Into<String>) -> Self {
        Self::empty(file_path, LANGUAGE_UNKNOWN)
    }

    /// Empty result carrying a single failure description.
    pub fn failed(
        file_path: impl Into<String>,
        language: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let mut result = Self::empty(file_path, language);
        result.errors.push(error.into());
        result
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn is_failed(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_result_is_empty_with_error() {
        let result = ParseResult::failed("a.py", "python", "unreadable");
        assert!(result.symbols.is_empty());
        assert!(result.relationships.is_empty());
        assert_eq!(result.errors, vec!["unreadable".to_string()]);
        assert!(result.is_failed());
    }

    #[test]
    fn unknown_result_has_unknown_language() {
        let result = ParseResult::unknown("blob.bin");
        assert_eq!(result.language, LANGUAGE_UNKNOWN);
        assert!(!result.is_failed());
    }
}
