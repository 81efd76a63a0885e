//! Language-agnostic citation scanning.
//!
//! A registry of category-tagged patterns that works on raw text,
//! independent of any grammar: prose cross-references, ticket ids, issue
//! and commit references, URLs, emails, mentions. Decoupled from the
//! parser contract on purpose so it can be composed with any engine's
//! output or run standalone on unclassified text.

use crate::model::{Range, Relationship, RelationshipType};
use crate::parser::utils::{file_stem, line_col_at};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Import,
    Link,
    Citation,
    Inheritance,
    Annotation,
    TypeRef,
}

pub struct UniversalPattern {
    pub name: &'static str,
    pub category: PatternCategory,
    pub regex: Regex,
    pub confidence: f64,
    pub relation_type: RelationshipType,
}

impl UniversalPattern {
    fn new(
        name: &'static str,
        category: PatternCategory,
        pattern: &str,
        confidence: f64,
        relation_type: RelationshipType,
    ) -> Self {
        let regex =
            Regex::new(pattern).unwrap_or_else(|e| panic!("invalid universal pattern `{name}`: {e}"));
        Self {
            name,
            category,
            regex,
            confidence,
            relation_type,
        }
    }
}

/// One hit of a universal pattern in a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversalMatch {
    pub pattern: &'static str,
    pub target: String,
    pub line: usize,
    pub confidence: f64,
    pub relation_type: RelationshipType,
}

static PATTERNS: Lazy<Vec<UniversalPattern>> = Lazy::new(|| {
    // Categories stay fully qualified: `PatternCategory` and
    // `RelationshipType` share variant names (`Inheritance`).
    use PatternCategory as Cat;
    use RelationshipType::{Implementation, Imports, Inheritance, References, Uses};
    vec![
        UniversalPattern::new(
            "generic_import",
            Cat::Import,
            r"(?m)^[ \t]*(?:import|from|require|include|use)\s+(?P<target>[\w./:@-]+)",
            0.75,
            Imports,
        ),
        UniversalPattern::new(
            "url",
            Cat::Link,
            r#"(?P<target>https?://[^\s)>"'`]+)"#,
            0.95,
            References,
        ),
        UniversalPattern::new(
            "email",
            Cat::Link,
            r"(?P<target>[\w.+-]+@[\w-]+\.[\w.-]*\w)",
            0.90,
            References,
        ),
        UniversalPattern::new(
            "jira_ticket",
            Cat::Citation,
            r"\b(?P<target>[A-Z][A-Z0-9]{1,9}-\d+)\b",
            0.90,
            References,
        ),
        UniversalPattern::new(
            "github_repo_issue",
            Cat::Citation,
            r"\b(?P<target>[\w.-]+/[\w.-]+#\d+)\b",
            0.90,
            References,
        ),
        UniversalPattern::new(
            "github_issue",
            Cat::Citation,
            r"(?:^|[\s(])(?P<target>#\d+)\b",
            0.75,
            References,
        ),
        UniversalPattern::new(
            "commit_sha",
            Cat::Citation,
            r"\b(?P<target>[0-9a-f]{7,40})\b",
            0.65,
            References,
        ),
        UniversalPattern::new(
            "see_reference",
            Cat::Citation,
            r"(?i)\bsee\s+(?P<target>[A-Za-z_][\w./:-]{2,})",
            0.70,
            References,
        ),
        UniversalPattern::new(
            "refers_to",
            Cat::Citation,
            r"(?i)\brefers?\s+to\s+(?P<target>[A-Za-z_][\w./:-]{2,})",
            0.70,
            References,
        ),
        UniversalPattern::new(
            "based_on",
            Cat::Citation,
            r"(?i)\bbased\s+on\s+(?P<target>[A-Za-z_][\w./:-]{2,})",
            0.70,
            References,
        ),
        UniversalPattern::new(
            "depends_on",
            Cat::Citation,
            r"(?i)\bdepends?\s+on\s+(?P<target>[A-Za-z_][\w./:-]{2,})",
            0.75,
            Uses,
        ),
        UniversalPattern::new(
            "extends_mention",
            Cat::Inheritance,
            r"\bextends\s+(?P<target>[A-Z]\w*)",
            0.80,
            Inheritance,
        ),
        UniversalPattern::new(
            "implements_mention",
            Cat::Inheritance,
            r"\bimplements\s+(?P<target>[A-Z]\w*)",
            0.80,
            Implementation,
        ),
        UniversalPattern::new(
            "mention",
            Cat::Annotation,
            r"(?:^|\s)@(?P<target>[A-Za-z][\w-]+)\b",
            0.80,
            References,
        ),
        UniversalPattern::new(
            "code_span_ref",
            Cat::TypeRef,
            r"`(?P<target>[A-Za-z_][\w.:]*(?:\(\))?)`",
            0.75,
            References,
        ),
    ]
});

/// The full compiled pattern table.
pub fn patterns() -> &'static [UniversalPattern] {
    &PATTERNS
}

/// Scans text with every universal pattern. Matches are de-duplicated by
/// `(pattern, target)` within one invocation; the first hit's line wins.
pub fn match_text(text: &str) -> Vec<UniversalMatch> {
    let mut seen: HashSet<(&'static str, String)> = HashSet::new();
    let mut matches = Vec::new();
    for pattern in PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            let Some(target) = caps.name("target") else {
                continue;
            };
            let target_str = target.as_str().trim_end_matches(['.', ',', ';']).to_string();
            if target_str.is_empty() {
                continue;
            }
            if !seen.insert((pattern.name, target_str.clone())) {
                continue;
            }
            matches.push(UniversalMatch {
                pattern: pattern.name,
                target: target_str,
                line: line_col_at(text, target.start()).line,
                confidence: pattern.confidence,
                relation_type: pattern.relation_type,
            });
        }
    }
    matches
}

/// Adapts universal matches into model relationships sourced at the file
/// stem, for composition with an engine's `ParseResult`.
pub fn to_relationships(file_path: &str, matches: &[UniversalMatch]) -> Vec<Relationship> {
    let stem = file_stem(file_path);
    matches
        .iter()
        .map(|m| {
            Relationship::new(
                stem.clone(),
                m.target.clone(),
                m.relation_type,
                file_path,
                m.confidence,
            )
            .with_range(Range::point(m.line, 0))
            .with_context(m.pattern)
        })
        .collect()
}
