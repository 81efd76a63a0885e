//! Markdown/reStructuredText engine (`.md .markdown .mdx .rst`).
//!
//! Headings become lightweight module symbols nested by level; links,
//! images and RST directives become relationships.

use once_cell::sync::Lazy;
use regex::Regex;
use symgraph_core::model::{
    ParseResult, Position, Range, Relationship, RelationshipType, Scope, Symbol, SymbolType,
};
use symgraph_core::parser::ParseEngine;
use symgraph_core::parser::utils::file_stem;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?P<level>#{1,6})\s+(?P<title>.+?)\s*#*\s*$").unwrap());
// `![alt](src)` and `[text](target)` in one pass; the bang decides which.
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<bang>!)?\[(?P<text>[^\]\n]*)\]\((?P<target>[^)\s]+)[^)]*\)").unwrap());
static REF_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\[(?P<id>[^\]\n]+)\]:\s+(?P<target>\S+)").unwrap());
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^```(?P<lang>[\w+-]+)\s*$").unwrap());
static RST_INCLUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\.\.\s+include::\s+(?P<target>\S+)").unwrap());
static RST_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r":ref:`(?P<target>[^`\n]+)`").unwrap());

pub struct MarkdownEngine;

impl MarkdownEngine {
    fn extract_headings(&self, path: &str, text: &str, result: &mut ParseResult) {
        let total_lines = text.lines().count().max(1);
        let mut headings: Vec<(usize, usize)> = Vec::new(); // (symbol index, level)

        for caps in HEADING.captures_iter(text) {
            let (Some(whole), Some(level), Some(title)) =
                (caps.get(0), caps.name("level"), caps.name("title"))
            else {
                continue;
            };
            let line = line_of(text, whole.start());
            let level = level.as_str().len();
            let range = Range::new(Position::new(line, 0), Position::new(line, 0));
            let mut sym = Symbol::new(
                title.as_str().trim(),
                SymbolType::Module,
                Scope::Global,
                range,
                path,
            );
            sym.metadata
                .insert("level".to_string(), serde_json::json!(level));

            // Nest under the closest earlier heading with a smaller level.
            if let Some(&(parent_idx, _)) = headings
                .iter()
                .rev()
                .find(|(_, parent_level)| *parent_level < level)
            {
                let parent = &result.symbols[parent_idx];
                sym.parent_symbol = Some(parent.name.clone());
                sym.full_name = Some(format!("{}.{}", parent.qualified_name(), sym.name));
            }

            headings.push((result.symbols.len(), level));
            result.symbols.push(sym);
        }

        // Extend each heading's span to the line before the next heading at
        // the same or shallower level, so fence metadata lands correctly.
        for i in 0..headings.len() {
            let (idx, level) = headings[i];
            let start = result.symbols[idx].range.start.line;
            let end = headings[i + 1..]
                .iter()
                .find(|(_, l)| *l <= level)
                .map(|&(next_idx, _)| result.symbols[next_idx].range.start.line - 1)
                .unwrap_or(total_lines);
            result.symbols[idx].range.end = Position::new(end.max(start), 0);
        }

        // Fenced code block languages, recorded on the enclosing heading.
        for caps in FENCE.captures_iter(text) {
            let (Some(whole), Some(lang)) = (caps.get(0), caps.name("lang")) else {
                continue;
            };
            let line = line_of(text, whole.start());
            let Some(&(idx, _)) = headings
                .iter()
                .rev()
                .find(|&&(idx, _)| result.symbols[idx].range.contains_line(line))
            else {
                continue;
            };
            let entry = result.symbols[idx]
                .metadata
                .entry("code_languages".to_string())
                .or_insert_with(|| serde_json::json!([]));
            if let Some(list) = entry.as_array_mut() {
                let value = serde_json::json!(lang.as_str());
                if !list.contains(&value) {
                    list.push(value);
                }
            }
        }
    }

    fn extract_links(&self, path: &str, text: &str, result: &mut ParseResult) {
        let stem = file_stem(path);
        let mut push = |target: &str, rel_type: RelationshipType, confidence: f64, offset: usize| {
            let target = target.trim();
            if target.is_empty() || target.starts_with('#') {
                return;
            }
            let line = line_of(text, offset);
            result.relationships.push(
                Relationship::new(stem.clone(), target, rel_type, path, confidence)
                    .with_range(Range::point(line, 0)),
            );
        };

        for caps in LINK.captures_iter(text) {
            let Some(target) = caps.name("target") else {
                continue;
            };
            let confidence = if caps.name("bang").is_some() { 0.80 } else { 0.85 };
            push(
                target.as_str(),
                RelationshipType::References,
                confidence,
                target.start(),
            );
        }
        for caps in REF_LINK.captures_iter(text) {
            if let Some(target) = caps.name("target") {
                push(
                    target.as_str(),
                    RelationshipType::References,
                    0.85,
                    target.start(),
                );
            }
        }
        for caps in RST_REF.captures_iter(text) {
            if let Some(target) = caps.name("target") {
                push(
                    target.as_str(),
                    RelationshipType::References,
                    0.85,
                    target.start(),
                );
            }
        }
        for caps in RST_INCLUDE.captures_iter(text) {
            if let Some(target) = caps.name("target") {
                let line = line_of(text, target.start());
                let t = target.as_str().trim().to_string();
                result.relationships.push(
                    Relationship::new(
                        stem.clone(),
                        t.clone(),
                        RelationshipType::Imports,
                        path,
                        0.90,
                    )
                    .with_range(Range::point(line, 0)),
                );
                result.imports.push(t);
            }
        }
    }
}

impl ParseEngine for MarkdownEngine {
    fn language(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdx", "rst"]
    }

    fn parse_source(&self, path: &str, content: &str) -> ParseResult {
        let mut result = ParseResult::empty(path, "markdown");
        self.extract_headings(path, content, &mut result);
        self.extract_links(path, content, &mut result);
        result
    }
}

fn line_of(text: &str, offset: usize) -> usize {
    symgraph_core::parser::utils::line_col_at(text, offset).line
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "# Overview\n\nSee the [design doc](docs/design.md) and ![diagram](img/arch.png).\n\n## Setup\n\n```bash\ncargo install thing\n```\n\n## Usage\n";

    #[test]
    fn headings_nest_by_level() {
        let result = MarkdownEngine.parse_source("README.md", SOURCE);
        let overview = result.symbols.iter().find(|s| s.name == "Overview").unwrap();
        assert_eq!(overview.symbol_type, SymbolType::Module);
        assert_eq!(overview.metadata["level"], serde_json::json!(1));
        assert!(overview.parent_symbol.is_none());

        let setup = result.symbols.iter().find(|s| s.name == "Setup").unwrap();
        assert_eq!(setup.parent_symbol.as_deref(), Some("Overview"));
        assert_eq!(setup.full_name.as_deref(), Some("Overview.Setup"));
        assert_eq!(setup.metadata["level"], serde_json::json!(2));
    }

    #[test]
    fn links_and_images_become_references() {
        let result = MarkdownEngine.parse_source("README.md", SOURCE);
        let link = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "docs/design.md")
            .unwrap();
        assert_eq!(link.relationship_type, RelationshipType::References);
        assert_eq!(link.source_symbol, "README");
        assert!((link.confidence - 0.85).abs() < 1e-9);

        let image = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "img/arch.png")
            .unwrap();
        assert!((image.confidence - 0.80).abs() < 1e-9);
    }

    #[test]
    fn fence_language_recorded_on_enclosing_heading() {
        let result = MarkdownEngine.parse_source("README.md", SOURCE);
        let setup = result.symbols.iter().find(|s| s.name == "Setup").unwrap();
        assert_eq!(setup.metadata["code_languages"], serde_json::json!(["bash"]));
        let usage = result.symbols.iter().find(|s| s.name == "Usage").unwrap();
        assert!(!usage.metadata.contains_key("code_languages"));
    }

    #[test]
    fn rst_include_and_ref() {
        let source = ".. include:: shared/header.rst\n\nSee :ref:`install-guide` first.\n";
        let result = MarkdownEngine.parse_source("intro.rst", source);
        assert!(result.imports.contains(&"shared/header.rst".to_string()));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Imports
                && r.target_symbol == "shared/header.rst"
        }));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::References
                && r.target_symbol == "install-guide"
        }));
    }

    #[test]
    fn anchor_only_links_are_skipped() {
        let source = "# T\n\n[top](#t)\n";
        let result = MarkdownEngine.parse_source("t.md", source);
        assert!(result.relationships.is_empty());
    }
}
