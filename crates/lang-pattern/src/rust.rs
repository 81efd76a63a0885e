//! Rust rule table (`.rs`).

use symgraph_core::model::{RelationshipType, SymbolType};
use symgraph_core::parser::pattern::{ExtractionRule, PatternEngine};

const EXCLUSIONS: &[&str] = &[
    "if", "for", "while", "loop", "match", "return", "self", "Self", "super", "crate",
    // macro noise
    "println", "print", "eprintln", "eprint", "format", "write", "writeln", "vec",
    "panic", "assert", "assert_eq", "assert_ne", "debug_assert", "todo", "unimplemented",
    "unreachable", "matches", "include_str", "include_bytes", "env", "cfg", "concat",
    "stringify", "dbg",
    // attribute noise
    "derive", "cfg", "cfg_attr", "allow", "warn", "deny", "inline", "doc", "test",
    "macro_use", "macro_export", "non_exhaustive", "must_use", "repr",
    // ubiquitous method names; `Type::new` is covered by the constructor rule
    "new", "default", "from", "into", "clone", "unwrap", "expect", "to_string",
    "to_owned", "as_ref", "as_str", "iter", "into_iter", "next", "collect", "len",
    "is_empty", "push", "insert", "get", "map", "and_then", "unwrap_or", "ok",
];

const DOC_PREFIXES: &[&str] = &["///", "//!"];

pub fn engine() -> PatternEngine {
    PatternEngine::new("rust", &["rs"], rules(), DOC_PREFIXES, EXCLUSIONS, "::")
}

fn rules() -> Vec<ExtractionRule> {
    use RelationshipType::*;
    use SymbolType::*;
    vec![
        ExtractionRule::symbol(
            "struct",
            r"(?m)^[ \t]*(?:(?P<vis>pub(?:\([\w:, ]*\))?)\s+)?struct\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "enum",
            r"(?m)^[ \t]*(?:(?P<vis>pub(?:\([\w:, ]*\))?)\s+)?enum\s+(?P<name>[A-Z]\w*)",
            Enum,
        ),
        ExtractionRule::symbol(
            "trait",
            r"(?m)^[ \t]*(?:(?P<vis>pub(?:\([\w:, ]*\))?)\s+)?(?:unsafe\s+)?trait\s+(?P<name>[A-Z]\w*)",
            Interface,
        ),
        ExtractionRule::symbol(
            "type_alias",
            r"(?m)^[ \t]*(?:(?P<vis>pub(?:\([\w:, ]*\))?)\s+)?type\s+(?P<name>[A-Z]\w*)",
            TypeAlias,
        ),
        ExtractionRule::symbol(
            "constant",
            r"(?m)^[ \t]*(?:(?P<vis>pub(?:\([\w:, ]*\))?)\s+)?const\s+(?P<name>[A-Z_][A-Z0-9_]*)\s*:",
            Constant,
        ),
        ExtractionRule::symbol(
            "static",
            r"(?m)^[ \t]*(?:(?P<vis>pub(?:\([\w:, ]*\))?)\s+)?static\s+(?:mut\s+)?(?P<name>[A-Z_][A-Z0-9_]*)\s*:",
            Constant,
        ),
        ExtractionRule::symbol(
            "module",
            r"(?m)^[ \t]*(?:(?P<vis>pub(?:\([\w:, ]*\))?)\s+)?mod\s+(?P<name>[a-z_]\w*)",
            Module,
        ),
        ExtractionRule::symbol(
            "function",
            r"(?m)^[ \t]*(?:(?P<vis>pub(?:\([\w:, ]*\))?)\s+)?(?:(?:const|async|unsafe|extern\s+\x22\w+\x22)\s+)*fn\s+(?P<name>[a-z_]\w*)",
            Function,
        ),
        // `impl Type` opens a member block; treated as a namespace so methods
        // inside attribute to the type. `impl Trait for Type` is handled by
        // the inherit rule below, guarded out here with `skip`.
        ExtractionRule::symbol(
            "impl_block",
            r"(?m)^[ \t]*impl(?:<[^>\n]*>)?\s+(?P<name>[A-Z]\w*)(?:<[^>\n]*>)?\s*(?:where\b[^{\n]*)?\{",
            Namespace,
        ),
        ExtractionRule::symbol(
            "trait_impl_block",
            r"(?m)^[ \t]*impl(?:<[^>\n]*>)?\s+[A-Z][\w:]*(?:<[^>\n]*>)?\s+for\s+(?P<name>[A-Z]\w*)",
            Namespace,
        ),
        ExtractionRule::import(
            "use",
            r"(?m)^[ \t]*(?:pub(?:\([\w:, ]*\))?\s+)?use\s+(?P<target>[\w:]+)",
            0.95,
        ),
        ExtractionRule::import(
            "extern_crate",
            r"(?m)^[ \t]*extern\s+crate\s+(?P<target>\w+)",
            0.95,
        ),
        ExtractionRule::inherit(
            "trait_impl",
            r"(?m)^[ \t]*impl(?:<[^>\n]*>)?\s+(?P<targets>[A-Z][\w:]*(?:<[^>\n]*>)?)\s+for\s+(?P<name>[A-Z]\w*)",
            Implementation,
            0.95,
        ),
        // `#[derive(Debug, Clone)]` reads as trait conformance of the type
        // declared right below; no `name` capture, the enclosing symbol wins.
        ExtractionRule::inherit(
            "derive",
            r"(?m)^[ \t]*#\[derive\((?P<targets>[^)\n]+)\)\]",
            Implementation,
            0.85,
        ),
        ExtractionRule::relation(
            "attribute",
            r"(?m)^[ \t]*#\[(?P<target>\w+)",
            Annotates,
            0.80,
        ),
        ExtractionRule::relation_ctx(
            "macro_invocation",
            r"(?:\b(?P<skip>macro_rules)\s*)?\b(?P<target>[a-z_]\w*)!\s*[(\[{]",
            Calls,
            0.85,
            "macro",
        ),
        ExtractionRule::relation_ctx(
            "associated_new",
            r"\b(?P<target>[A-Z]\w*)::(?:new|default|from|with_capacity)\b",
            Uses,
            0.85,
            "constructor",
        ),
        ExtractionRule::relation(
            "call",
            r"(?:\b(?P<skip>fn|impl|struct|enum|trait|mod|if|while|match|for|loop|move)\s+)?(?P<target>[a-z_]\w*)\s*\(",
            Calls,
            0.75,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use symgraph_core::ParseEngine;

    const SOURCE: &str = r#"
use std::collections::HashMap;
use serde::Serialize;

/// Maximum number of retries.
pub const MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct Cache {
    entries: HashMap<String, String>,
}

impl Cache {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    pub async fn refresh(&mut self) {
        self.reload();
    }
}

impl Default for Cache {
    fn default() -> Self {
        Cache::new()
    }
}

pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
}

mod internal {
    pub fn helper() {
        tracing::info!("helper");
    }
}
"#;

    #[test]
    fn structs_traits_and_constants() {
        let result = engine().parse_file("cache.rs", Some(SOURCE));

        let cache = result
            .symbols
            .iter()
            .find(|s| s.name == "Cache" && s.symbol_type == SymbolType::Class)
            .unwrap();
        assert_eq!(cache.visibility.as_deref(), Some("pub"));
        assert!(cache.is_exported);

        let max = result.symbols.iter().find(|s| s.name == "MAX_RETRIES").unwrap();
        assert_eq!(max.symbol_type, SymbolType::Constant);
        assert_eq!(max.docstring.as_deref(), Some("Maximum number of retries."));

        assert!(result.symbols.iter().any(|s| s.name == "Store" && s.symbol_type == SymbolType::Interface));
        assert!(result.symbols.iter().any(|s| s.name == "internal" && s.symbol_type == SymbolType::Module));
    }

    #[test]
    fn impl_block_attributes_methods_to_the_type() {
        let result = engine().parse_file("cache.rs", Some(SOURCE));
        let refresh = result.symbols.iter().find(|s| s.name == "refresh").unwrap();
        assert_eq!(refresh.symbol_type, SymbolType::Method);
        assert!(refresh.is_async);
        assert_eq!(refresh.parent_symbol.as_deref(), Some("Cache"));
        assert_eq!(refresh.full_name.as_deref(), Some("Cache::refresh"));
    }

    #[test]
    fn trait_impl_and_derive_become_implementation_edges() {
        let result = engine().parse_file("cache.rs", Some(SOURCE));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Implementation
                && r.source_symbol == "Cache"
                && r.target_symbol == "Default"
        }));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Implementation && r.target_symbol == "Debug"
        }));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Implementation && r.target_symbol == "Clone"
        }));
    }

    #[test]
    fn use_paths_and_roots() {
        let result = engine().parse_file("cache.rs", Some(SOURCE));
        assert!(result.imports.contains(&"std::collections::HashMap".to_string()));
        assert!(result.imports.contains(&"serde::Serialize".to_string()));
        assert!(result.dependencies.contains("std"));
        assert!(result.dependencies.contains("serde"));
    }

    #[test]
    fn macros_and_constructor_uses() {
        let result = engine().parse_file("cache.rs", Some(SOURCE));
        let info = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "info" && r.context.as_deref() == Some("macro"))
            .unwrap();
        assert_eq!(info.source_symbol, "helper");

        assert!(result.relationships.iter().any(|r| {
            r.target_symbol == "Cache" && r.context.as_deref() == Some("constructor")
        }));
        // println-class macros stay out.
        assert!(!result.relationships.iter().any(|r| r.target_symbol == "println"));
    }

    #[test]
    fn declaration_sites_do_not_read_as_calls() {
        let result = engine().parse_file("cache.rs", Some(SOURCE));
        assert!(!result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Calls && r.target_symbol == "new"
        }));
    }
}
