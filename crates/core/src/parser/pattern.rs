//! Pattern-discipline machinery: an ordered table of named regular
//! expressions per language, executed by a shared runner.
//!
//! Languages without a native AST parser are handled with high-precision
//! regex heuristics. Each language module supplies a rule table, a
//! doc-comment prefix list, and an exclusion set; everything else (offsets,
//! block ends, docstrings, parent attribution, source attribution) is done
//! here so the per-language code stays declarative.

use crate::model::{
    ParseResult, Position, Range, Relationship, RelationshipType, Scope, Symbol, SymbolType,
};
use crate::parser::utils::{
    block_end_line, file_stem, line_col_at, preceding_doc_comment, split_type_list, strip_generics,
};
use crate::parser::ParseEngine;
use regex::Regex;
use std::collections::HashSet;

/// What the runner does with each match of a rule.
///
/// `regex` has no lookbehind, so any rule that would over-match can
/// prepend an optional keyword-consuming group named `skip`; matches where
/// `skip` participated are dropped.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// Declares a symbol; the regex must have a `name` capture.
    Symbol { symbol_type: SymbolType, scope: Scope },
    /// Import/include edge; the regex must have a `target` capture.
    Import { confidence: f64 },
    /// Supertype list; the regex must capture `targets` (comma-separated)
    /// and usually `name` (the enclosing symbol is used when absent). With
    /// `split_supers` only a leading base-class-looking entry keeps the
    /// rule's type; the rest become `implementation` edges.
    Inherit {
        relationship_type: RelationshipType,
        split_supers: bool,
        confidence: f64,
    },
    /// Any other edge; the regex must have a `target` capture.
    ///
    /// `regex` has no lookbehind, so rules that would over-match
    /// declarations prepend an optional keyword-consuming group named
    /// `skip`; any match where `skip` participated is dropped.
    Relation {
        relationship_type: RelationshipType,
        confidence: f64,
        context: Option<&'static str>,
    },
}

/// One named extraction rule.
pub struct ExtractionRule {
    pub name: &'static str,
    pub regex: Regex,
    pub kind: RuleKind,
}

impl ExtractionRule {
    fn compile(name: &'static str, pattern: &str, kind: RuleKind) -> Self {
        // Rule patterns are static per-language constants; a failure here is
        // a programming error, not an input error.
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid extraction rule `{name}`: {e}"));
        Self { name, regex, kind }
    }

    pub fn symbol(name: &'static str, pattern: &str, symbol_type: SymbolType) -> Self {
        Self::compile(
            name,
            pattern,
            RuleKind::Symbol {
                symbol_type,
                scope: Scope::Global,
            },
        )
    }

    pub fn scoped_symbol(
        name: &'static str,
        pattern: &str,
        symbol_type: SymbolType,
        scope: Scope,
    ) -> Self {
        Self::compile(name, pattern, RuleKind::Symbol { symbol_type, scope })
    }

    pub fn import(name: &'static str, pattern: &str, confidence: f64) -> Self {
        Self::compile(name, pattern, RuleKind::Import { confidence })
    }

    pub fn inherit(
        name: &'static str,
        pattern: &str,
        relationship_type: RelationshipType,
        confidence: f64,
    ) -> Self {
        Self::compile(
            name,
            pattern,
            RuleKind::Inherit {
                relationship_type,
                split_supers: false,
                confidence,
            },
        )
    }

    /// Supertype rule for colon-list languages where the first entry is the
    /// base class and the rest are interface conformances.
    pub fn inherit_split(name: &'static str, pattern: &str, confidence: f64) -> Self {
        Self::compile(
            name,
            pattern,
            RuleKind::Inherit {
                relationship_type: RelationshipType::Inheritance,
                split_supers: true,
                confidence,
            },
        )
    }

    pub fn relation(
        name: &'static str,
        pattern: &str,
        relationship_type: RelationshipType,
        confidence: f64,
    ) -> Self {
        Self::compile(
            name,
            pattern,
            RuleKind::Relation {
                relationship_type,
                confidence,
                context: None,
            },
        )
    }

    pub fn relation_ctx(
        name: &'static str,
        pattern: &str,
        relationship_type: RelationshipType,
        confidence: f64,
        context: &'static str,
    ) -> Self {
        Self::compile(
            name,
            pattern,
            RuleKind::Relation {
                relationship_type,
                confidence,
                context: Some(context),
            },
        )
    }
}

/// A complete pattern-discipline engine for one language.
pub struct PatternEngine {
    language: &'static str,
    extensions: &'static [&'static str],
    rules: Vec<ExtractionRule>,
    doc_prefixes: &'static [&'static str],
    exclusions: HashSet<&'static str>,
    /// Separator used when building qualified names, e.g. `"."` or `"::"`.
    qualifier: &'static str,
}

impl PatternEngine {
    pub fn new(
        language: &'static str,
        extensions: &'static [&'static str],
        rules: Vec<ExtractionRule>,
        doc_prefixes: &'static [&'static str],
        exclusions: &[&'static str],
        qualifier: &'static str,
    ) -> Self {
        Self {
            language,
            extensions,
            rules,
            doc_prefixes,
            exclusions: exclusions.iter().copied().collect(),
            qualifier,
        }
    }

    fn excluded(&self, target: &str) -> bool {
        self.exclusions.contains(target)
    }

    fn extract_symbols(&self, path: &str, text: &str) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        for rule in &self.rules {
            let RuleKind::Symbol { symbol_type, scope } = rule.kind else {
                continue;
            };
            for caps in rule.regex.captures_iter(text) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
                    continue;
                };
                if caps.name("skip").is_some() {
                    continue;
                }
                let start = line_col_at(text, whole.start());
                let match_text = whole.as_str();
                // Some rules consume the body's own `{` (or a `;`
                // terminator); the block scan must start before it or it
                // would pair against the first member's brace instead.
                let body_scan = whole.start()
                    + match_text
                        .trim_end_matches(|c: char| c == '{' || c == ';' || c.is_whitespace())
                        .len();
                let end_line = block_end_line(text, body_scan).max(start.line);
                let range = Range::new(start, Position::new(end_line, 0));

                let mut sym = Symbol::new(name.as_str(), symbol_type, scope, range, path);
                sym.signature = match_text.lines().next().map(|l| l.trim().to_string());
                sym.is_async = has_word(match_text, "async") || has_word(match_text, "suspend");
                sym.is_static = has_word(match_text, "static");
                sym.is_exported = has_word(match_text, "export")
                    || has_word(match_text, "pub")
                    || has_word(match_text, "public");
                if let Some(vis) = caps.name("vis") {
                    let vis = vis.as_str().trim();
                    if !vis.is_empty() {
                        sym.visibility = Some(vis.to_string());
                    }
                }
                sym.docstring = preceding_doc_comment(text, start.line, self.doc_prefixes);
                symbols.push(sym);
            }
        }
        self.attribute_parents(&mut symbols);
        symbols
    }

    /// Assigns `parent_symbol`/`full_name` for members declared inside a
    /// container's block span, and promotes loose functions to methods.
    fn attribute_parents(&self, symbols: &mut [Symbol]) {
        let containers: Vec<(String, usize, usize)> = symbols
            .iter()
            .filter(|s| s.symbol_type.is_container())
            .map(|s| (s.name.clone(), s.range.start.line, s.range.end.line))
            .collect();

        for sym in symbols.iter_mut() {
            if sym.symbol_type.is_container() {
                continue;
            }
            let line = sym.range.start.line;
            // Innermost container: strictly encloses and starts latest.
            let parent = containers
                .iter()
                .filter(|(_, start, end)| *start < line && line <= *end)
                .max_by_key(|(_, start, _)| *start);
            if let Some((parent_name, _, _)) = parent {
                sym.parent_symbol = Some(parent_name.clone());
                sym.full_name = Some(format!("{parent_name}{}{}", self.qualifier, sym.name));
                if sym.scope == Scope::Global {
                    sym.scope = Scope::Class;
                }
                if sym.symbol_type == SymbolType::Function {
                    sym.symbol_type = SymbolType::Method;
                }
            }
        }
    }

    fn extract_relationships(&self, path: &str, text: &str, result: &mut ParseResult) {
        let stem = file_stem(path);
        let spans: Vec<(String, usize, usize)> = result
            .symbols
            .iter()
            .filter(|s| {
                matches!(
                    s.symbol_type,
                    SymbolType::Function | SymbolType::Method
                ) || s.symbol_type.is_container()
            })
            .map(|s| (s.name.clone(), s.range.start.line, s.range.end.line))
            .collect();
        let enclosing = |line: usize| -> String {
            spans
                .iter()
                .filter(|(_, start, end)| *start <= line && line <= *end)
                .max_by_key(|(_, start, _)| *start)
                .map(|(name, _, _)| name.clone())
                .unwrap_or_else(|| stem.clone())
        };

        for rule in &self.rules {
            match rule.kind {
                RuleKind::Symbol { .. } => {}
                RuleKind::Import { confidence } => {
                    for caps in rule.regex.captures_iter(text) {
                        let (Some(whole), Some(target)) = (caps.get(0), caps.name("target"))
                        else {
                            continue;
                        };
                        if caps.name("skip").is_some() {
                            continue;
                        }
                        let target = target
                            .as_str()
                            .trim_matches(['"', '\'', '`'])
                            .trim_end_matches([':', '.'])
                            .to_string();
                        if target.is_empty() {
                            continue;
                        }
                        let pos = line_col_at(text, whole.start());
                        result.relationships.push(
                            Relationship::new(
                                stem.clone(),
                                target.clone(),
                                RelationshipType::Imports,
                                path,
                                confidence,
                            )
                            .with_range(Range::point(pos.line, pos.column)),
                        );
                        if let Some(root) = target.split(['.', '/', ':']).find(|s| !s.is_empty())
                        {
                            result.dependencies.insert(root.to_string());
                        }
                        result.imports.push(target);
                    }
                }
                RuleKind::Inherit {
                    relationship_type,
                    split_supers,
                    confidence,
                } => {
                    for caps in rule.regex.captures_iter(text) {
                        let (Some(whole), Some(targets)) = (caps.get(0), caps.name("targets"))
                        else {
                            continue;
                        };
                        if caps.name("skip").is_some() {
                            continue;
                        }
                        let pos = line_col_at(text, whole.start());
                        let source = match caps.name("name") {
                            Some(name) => name.as_str().to_string(),
                            None => enclosing(pos.line),
                        };
                        for (i, raw) in split_type_list(targets.as_str()).iter().enumerate() {
                            // Drop generics and constructor-call parens
                            // (`Base<T>()` conformance entries).
                            let stripped = strip_generics(raw);
                            let target = stripped.split('(').next().unwrap_or("").trim();
                            if target.is_empty() || self.excluded(target) {
                                continue;
                            }
                            let rel_type = if split_supers && (i > 0 || looks_interface(target))
                            {
                                RelationshipType::Implementation
                            } else {
                                relationship_type
                            };
                            result.relationships.push(
                                Relationship::new(
                                    source.clone(),
                                    target,
                                    rel_type,
                                    path,
                                    confidence,
                                )
                                .with_range(Range::point(pos.line, pos.column)),
                            );
                        }
                    }
                }
                RuleKind::Relation {
                    relationship_type,
                    confidence,
                    context,
                } => {
                    for caps in rule.regex.captures_iter(text) {
                        let (Some(whole), Some(target)) = (caps.get(0), caps.name("target"))
                        else {
                            continue;
                        };
                        if caps.name("skip").is_some() {
                            continue;
                        }
                        let target = target.as_str().trim();
                        if target.is_empty() || self.excluded(target) {
                            continue;
                        }
                        let pos = line_col_at(text, whole.start());
                        let mut rel = Relationship::new(
                            enclosing(pos.line),
                            target,
                            relationship_type,
                            path,
                            confidence,
                        )
                        .with_range(Range::point(pos.line, pos.column));
                        if let Some(ctx) = context {
                            rel = rel.with_context(ctx);
                        }
                        result.relationships.push(rel);
                    }
                }
            }
        }
    }
}

impl ParseEngine for PatternEngine {
    fn language(&self) -> &str {
        self.language
    }

    fn extensions(&self) -> &[&str] {
        self.extensions
    }

    fn parse_source(&self, path: &str, content: &str) -> ParseResult {
        let mut result = ParseResult::empty(path, self.language);
        result.symbols = self.extract_symbols(path, content);

        let mut seen_exports = HashSet::new();
        for sym in &result.symbols {
            if sym.is_exported && seen_exports.insert(sym.name.clone()) {
                result.exports.push(sym.name.clone());
            }
        }

        self.extract_relationships(path, content, &mut result);
        result
    }
}

/// `IFoo`-style interface naming, used when splitting supertype lists in
/// languages whose base list does not distinguish classes from interfaces.
fn looks_interface(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Whole-word containment check used for modifier sniffing.
fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .any(|t| t == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_engine() -> PatternEngine {
        PatternEngine::new(
            "tiny",
            &["tiny"],
            vec![
                ExtractionRule::symbol(
                    "class",
                    r"(?m)^class\s+(?P<name>\w+)",
                    SymbolType::Class,
                ),
                ExtractionRule::symbol(
                    "function",
                    r"(?m)^[ \t]*fn\s+(?P<name>\w+)",
                    SymbolType::Function,
                ),
                ExtractionRule::relation(
                    "call",
                    r"(?:\b(?P<skip>fn)\s+)?(?P<target>\w+)\(\)",
                    RelationshipType::Calls,
                    0.8,
                ),
            ],
            &["///"],
            &["print"],
            ".",
        )
    }

    #[test]
    fn members_get_parent_and_method_promotion() {
        let text = "class Greeter {\n  fn hello() {\n  }\n}\nfn top() {\n}\n";
        let result = tiny_engine().parse_source("g.tiny", text);
        let hello = result.symbols.iter().find(|s| s.name == "hello").unwrap();
        assert_eq!(hello.symbol_type, SymbolType::Method);
        assert_eq!(hello.parent_symbol.as_deref(), Some("Greeter"));
        assert_eq!(hello.full_name.as_deref(), Some("Greeter.hello"));
        assert_eq!(hello.scope, Scope::Class);
        let top = result.symbols.iter().find(|s| s.name == "top").unwrap();
        assert_eq!(top.symbol_type, SymbolType::Function);
        assert!(top.parent_symbol.is_none());
    }

    #[test]
    fn blank_line_before_declaration_keeps_position_and_signature() {
        let text = "class A {\n}\n\nfn later() {\n}\n";
        let result = tiny_engine().parse_source("b.tiny", text);
        let later = result.symbols.iter().find(|s| s.name == "later").unwrap();
        assert_eq!(later.range.start.line, 4);
        assert_eq!(later.signature.as_deref(), Some("fn later"));
    }

    #[test]
    fn brace_consuming_rules_keep_the_whole_block_span() {
        let engine = PatternEngine::new(
            "curly",
            &["curly"],
            vec![
                ExtractionRule::symbol(
                    "class",
                    r"(?m)^class\s+(?P<name>\w+)",
                    SymbolType::Class,
                ),
                ExtractionRule::symbol(
                    "method",
                    r"(?m)^[ \t]*def\s+(?P<name>\w+)\(\)\s*\{",
                    SymbolType::Function,
                ),
                ExtractionRule::relation(
                    "call",
                    r"(?:\b(?P<skip>def)\s+)?(?P<target>\w+)\(\)",
                    RelationshipType::Calls,
                    0.8,
                ),
            ],
            &[],
            &[],
            ".",
        );
        let text = "class A {\n  def m() {\n    helper()\n  }\n}\n";
        let result = engine.parse_source("c.curly", text);
        let m = result.symbols.iter().find(|s| s.name == "m").unwrap();
        // The rule consumed the body's `{`; the span still covers the body.
        assert_eq!(m.range.end.line, 4);
        assert_eq!(m.symbol_type, SymbolType::Method);
        let call = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "helper")
            .unwrap();
        assert_eq!(call.source_symbol, "m");
    }

    #[test]
    fn calls_attributed_to_enclosing_symbol() {
        let text = "fn caller() {\n  work()\n}\n";
        let result = tiny_engine().parse_source("c.tiny", text);
        let call = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "work")
            .unwrap();
        assert_eq!(call.source_symbol, "caller");
        assert_eq!(call.relationship_type, RelationshipType::Calls);
        // The declaration site itself must not read as a call.
        assert!(
            !result
                .relationships
                .iter()
                .any(|r| r.target_symbol == "caller")
        );
    }

    #[test]
    fn excluded_targets_are_suppressed() {
        let text = "fn caller() {\n  print()\n}\n";
        let result = tiny_engine().parse_source("c.tiny", text);
        assert!(
            !result
                .relationships
                .iter()
                .any(|r| r.target_symbol == "print")
        );
    }

    #[test]
    fn docstring_attached_from_preceding_lines() {
        let text = "/// Says hello.\nfn hello() {\n}\n";
        let result = tiny_engine().parse_source("d.tiny", text);
        let hello = result.symbols.iter().find(|s| s.name == "hello").unwrap();
        assert_eq!(hello.docstring.as_deref(), Some("Says hello."));
    }

    #[test]
    fn deterministic_over_repeated_parses() {
        let text = "class A {\n  fn b() {\n    c()\n  }\n}\n";
        let engine = tiny_engine();
        let first = engine.parse_source("r.tiny", text);
        let second = engine.parse_source("r.tiny", text);
        assert_eq!(first.symbols, second.symbols);
        assert_eq!(first.relationships, second.relationships);
    }
}
