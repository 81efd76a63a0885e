//! Go rule table (`.go`).
//!
//! Go needs one step beyond the shared runner: methods carry their type in
//! a receiver clause (`func (d *Dog) Bark()`), not in lexical nesting, so a
//! wrapper re-attributes them after the rule pass.

use regex::Regex;
use symgraph_core::ParseEngine;
use symgraph_core::model::{ParseResult, RelationshipType, Scope, SymbolType};
use symgraph_core::parser::pattern::{ExtractionRule, PatternEngine};

const EXCLUSIONS: &[&str] = &[
    "if", "for", "switch", "select", "range", "return", "defer", "go",
    // builtins
    "make", "len", "cap", "append", "new", "delete", "copy", "close", "panic",
    "recover", "print", "println", "string", "int", "int64", "byte", "error", "float64",
    // fmt/errors noise
    "Sprintf", "Printf", "Println", "Errorf", "Fprintf", "Error", "New", "Wrap", "Wrapf",
];

const DOC_PREFIXES: &[&str] = &["//"];

pub struct GoEngine {
    inner: PatternEngine,
    receiver: Regex,
}

impl GoEngine {
    pub fn new() -> Self {
        // Static pattern; cannot fail.
        let receiver = Regex::new(r"^func\s*\(\s*\w+\s+\*?(?P<recv>[A-Z]\w*)\s*\)")
            .unwrap_or_else(|e| panic!("invalid receiver pattern: {e}"));
        Self {
            inner: PatternEngine::new("go", &["go"], rules(), DOC_PREFIXES, EXCLUSIONS, "."),
            receiver,
        }
    }

    /// Re-attributes receiver methods to their type and applies Go's
    /// capitalization-based export rule.
    fn fix_up(&self, result: &mut ParseResult) {
        for sym in &mut result.symbols {
            if sym.symbol_type == SymbolType::Function
                && let Some(sig) = &sym.signature
                && let Some(caps) = self.receiver.captures(sig)
                && let Some(recv) = caps.name("recv")
            {
                let recv = recv.as_str().to_string();
                sym.full_name = Some(format!("{recv}.{}", sym.name));
                sym.parent_symbol = Some(recv);
                sym.symbol_type = SymbolType::Method;
                sym.scope = Scope::Class;
            }
            sym.is_exported = sym.name.chars().next().is_some_and(|c| c.is_uppercase());
        }
        result.exports.clear();
        let mut seen = std::collections::HashSet::new();
        for sym in &result.symbols {
            if sym.is_exported && seen.insert(sym.name.clone()) {
                result.exports.push(sym.name.clone());
            }
        }
    }
}

impl Default for GoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseEngine for GoEngine {
    fn language(&self) -> &str {
        self.inner.language()
    }

    fn extensions(&self) -> &[&str] {
        self.inner.extensions()
    }

    fn parse_source(&self, path: &str, content: &str) -> ParseResult {
        let mut result = self.inner.parse_source(path, content);
        self.fix_up(&mut result);
        result
    }
}

fn rules() -> Vec<ExtractionRule> {
    use RelationshipType::*;
    use SymbolType::*;
    vec![
        ExtractionRule::symbol("package", r"(?m)^package\s+(?P<name>\w+)", Module),
        ExtractionRule::symbol(
            "struct_type",
            r"(?m)^type\s+(?P<name>\w+)\s+struct\b",
            Class,
        ),
        ExtractionRule::symbol(
            "interface_type",
            r"(?m)^type\s+(?P<name>\w+)\s+interface\b",
            Interface,
        ),
        // Any other `type X Y` is an alias or defined type.
        ExtractionRule::symbol(
            "type_alias",
            r"(?m)^type\s+(?P<name>\w+)\s*=?\s*(?:(?P<skip>struct|interface)\b|[\w\[\]*.]+)",
            TypeAlias,
        ),
        ExtractionRule::symbol(
            "function",
            r"(?m)^func\s+(?P<name>\w+)\s*[(\[]",
            Function,
        ),
        // Receiver methods start as functions; the wrapper re-attributes
        // them from the signature.
        ExtractionRule::symbol(
            "method",
            r"(?m)^func\s*\([^)\n]*\)\s+(?P<name>\w+)\s*\(",
            Function,
        ),
        ExtractionRule::symbol(
            "constant",
            r"(?m)^const\s+(?P<name>\w+)",
            Constant,
        ),
        ExtractionRule::symbol(
            "variable",
            r"(?m)^var\s+(?P<name>\w+)",
            Variable,
        ),
        ExtractionRule::import(
            "import_single",
            r#"(?m)^import\s+(?:\w+\s+)?"(?P<target>[^"\n]+)""#,
            0.95,
        ),
        // Entries inside an `import (...)` block: a line that is nothing but
        // an optionally-aliased quoted path.
        ExtractionRule::import(
            "import_block_entry",
            r#"(?m)^[ \t]+(?:[\w.]+\s+)?"(?P<target>[a-z0-9][\w./-]*)"\s*$"#,
            0.90,
        ),
        // Embedded field: a bare capitalized identifier alone on a line
        // inside a struct or interface body.
        ExtractionRule::relation_ctx(
            "embedding",
            r"(?m)^\t(?P<target>[A-Z]\w*)\s*$",
            Composition,
            0.75,
            "embedded",
        ),
        ExtractionRule::relation_ctx(
            "goroutine",
            r"\bgo\s+(?:[\w.]+\.)?(?P<target>\w+)\(",
            Calls,
            0.85,
            "goroutine",
        ),
        ExtractionRule::relation_ctx(
            "channel",
            r"make\(\s*chan\s+(?P<target>[\w.]+)",
            Uses,
            0.75,
            "channel",
        ),
        ExtractionRule::relation(
            "qualified_call",
            r"\.(?P<target>[A-Z]\w*)\s*\(",
            Calls,
            0.80,
        ),
        ExtractionRule::relation(
            "call",
            r"(?:\b(?P<skip>func|type|go)\s+)?(?P<target>[a-z]\w*)\s*\(",
            Calls,
            0.70,
        ),
    ]
}
