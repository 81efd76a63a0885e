//! The parser contract every language and document engine implements.

use crate::model::ParseResult;
use std::collections::HashSet;
use std::time::Instant;

pub mod pattern;
pub mod utils;

/// One language- or format-specific extraction strategy.
///
/// Engines implement `parse_source` only; reading from disk, timing, and
/// result validation are provided so no strategy can skip them. By contract
/// nothing here returns an error: every failure is captured as data in
/// `ParseResult.errors`.
pub trait ParseEngine: Send + Sync {
    /// Language identifier, e.g. `"python"`.
    fn language(&self) -> &str;

    /// File extensions this engine claims, lowercase, without the dot.
    fn extensions(&self) -> &[&str];

    /// Extracts symbols and relationships from already-loaded content.
    fn parse_source(&self, path: &str, content: &str) -> ParseResult;

    /// Parses a file, reading it from disk when `content` is `None`.
    fn parse_file(&self, path: &str, content: Option<&str>) -> ParseResult {
        let started = Instant::now();
        let owned;
        let text = match content {
            Some(c) => c,
            None => match std::fs::read_to_string(path) {
                Ok(c) => {
                    owned = c;
                    owned.as_str()
                }
                Err(e) => {
                    tracing::warn!(path, language = self.language(), error = %e, "file read failed");
                    return ParseResult::failed(
                        path,
                        self.language(),
                        format!("failed to read {path}: {e}"),
                    );
                }
            },
        };
        let mut result = self.parse_source(path, text);
        result.parse_time = Some(started.elapsed().as_secs_f64());
        validate_result(result)
    }

    /// Extension-based support check, case-insensitive.
    fn supports_file(&self, path: &str) -> bool {
        match utils::extension_of(path) {
            Some(ext) => self.extensions().contains(&ext.as_str()),
            None => false,
        }
    }
}

/// Enforces the per-file uniqueness invariants: no two symbols share
/// `(name, symbol_type, range)`, no two relationships share their key.
/// First occurrence wins; order is otherwise preserved.
pub fn validate_result(mut result: ParseResult) -> ParseResult {
    let mut seen_symbols = HashSet::new();
    result.symbols.retain(|s| seen_symbols.insert(s.dedup_key()));

    let mut seen_relationships = HashSet::new();
    result
        .relationships
        .retain(|r| seen_relationships.insert(r.key()));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Range, Relationship, RelationshipType, Scope, Symbol, SymbolType};

    struct FixedEngine;

    impl ParseEngine for FixedEngine {
        fn language(&self) -> &str {
            "fixed"
        }

        fn extensions(&self) -> &[&str] {
            &["fx"]
        }

        fn parse_source(&self, path: &str, _content: &str) -> ParseResult {
            let mut result = ParseResult::empty(path, "fixed");
            let sym = Symbol::new(
                "thing",
                SymbolType::Function,
                Scope::Global,
                Range::point(1, 0),
                path,
            );
            result.symbols.push(sym.clone());
            result.symbols.push(sym);
            result
        }
    }

    #[test]
    fn supports_file_is_case_insensitive() {
        let engine = FixedEngine;
        assert!(engine.supports_file("a/b/thing.FX"));
        assert!(!engine.supports_file("a/b/thing.py"));
        assert!(!engine.supports_file("no_extension"));
    }

    #[test]
    fn parse_file_validates_and_times() {
        let engine = FixedEngine;
        let result = engine.parse_file("x.fx", Some("content"));
        assert_eq!(result.symbols.len(), 1);
        assert!(result.parse_time.is_some());
    }

    #[test]
    fn parse_file_captures_io_failure() {
        let engine = FixedEngine;
        let result = engine.parse_file("/nonexistent/definitely/missing.fx", None);
        assert!(result.is_failed());
        assert!(result.symbols.is_empty());
    }

    #[test]
    fn validate_dedups_relationships_first_wins() {
        let mut result = ParseResult::empty("a.fx", "fixed");
        let mut first = Relationship::new("a", "b", RelationshipType::Calls, "a.fx", 0.9);
        first.context = Some("keep me".into());
        let second = Relationship::new("a", "b", RelationshipType::Calls, "a.fx", 0.8);
        result.relationships.push(first);
        result.relationships.push(second);
        let result = validate_result(result);
        assert_eq!(result.relationships.len(), 1);
        assert_eq!(result.relationships[0].context.as_deref(), Some("keep me"));
    }
}
