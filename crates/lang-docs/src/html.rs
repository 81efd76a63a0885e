//! HTML engine (`.html .htm .xhtml`).
//!
//! Anchors become symbols, resource references become edges. Tag scanning
//! is regex-based; that is enough for ids, hrefs and srcs without pulling
//! in a DOM.

use once_cell::sync::Lazy;
use regex::Regex;
use symgraph_core::model::{
    ParseResult, Range, Relationship, RelationshipType, Scope, Symbol, SymbolType,
};
use symgraph_core::parser::ParseEngine;
use symgraph_core::parser::utils::{file_stem, line_col_at};

static ID_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<\w+[^>]*\bid\s*=\s*["'](?P<id>[^"']+)["']"#).unwrap());
static NAME_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a\s+[^>]*\bname\s*=\s*["'](?P<id>[^"']+)["']"#).unwrap());
static HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a\s+[^>]*\bhref\s*=\s*["'](?P<target>[^"']+)["']"#).unwrap());
static SCRIPT_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<script\s+[^>]*\bsrc\s*=\s*["'](?P<target>[^"']+)["']"#).unwrap());
static LINK_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<link\s+[^>]*\bhref\s*=\s*["'](?P<target>[^"']+)["']"#).unwrap());
static IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img\s+[^>]*\bsrc\s*=\s*["'](?P<target>[^"']+)["']"#).unwrap());
static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<title[^>]*>(?P<title>[^<]*)</title>").unwrap());

pub struct HtmlEngine;

impl ParseEngine for HtmlEngine {
    fn language(&self) -> &str {
        "html"
    }

    fn extensions(&self) -> &[&str] {
        &["html", "htm", "xhtml"]
    }

    fn parse_source(&self, path: &str, content: &str) -> ParseResult {
        let mut result = ParseResult::empty(path, "html");
        let stem = file_stem(path);

        if let Some(caps) = TITLE.captures(content)
            && let Some(title) = caps.name("title")
        {
            let title = title.as_str().trim();
            if !title.is_empty() {
                result.module_docstring = Some(title.to_string());
            }
        }

        for regex in [&*ID_ATTR, &*NAME_ANCHOR] {
            for caps in regex.captures_iter(content) {
                let (Some(whole), Some(id)) = (caps.get(0), caps.name("id")) else {
                    continue;
                };
                let pos = line_col_at(content, whole.start());
                result.symbols.push(Symbol::new(
                    id.as_str(),
                    SymbolType::Property,
                    Scope::Global,
                    Range::point(pos.line, pos.column),
                    path,
                ));
            }
        }

        let specs: [(&Regex, RelationshipType, f64, bool); 4] = [
            (&SCRIPT_SRC, RelationshipType::Imports, 0.95, true),
            (&LINK_HREF, RelationshipType::Imports, 0.95, true),
            (&HREF, RelationshipType::References, 0.90, false),
            (&IMG_SRC, RelationshipType::References, 0.80, false),
        ];
        for (regex, rel_type, confidence, is_import) in specs {
            for caps in regex.captures_iter(content) {
                let (Some(whole), Some(target)) = (caps.get(0), caps.name("target")) else {
                    continue;
                };
                let target = target.as_str().trim();
                if target.is_empty() || target.starts_with('#') {
                    continue;
                }
                let pos = line_col_at(content, whole.start());
                result.relationships.push(
                    Relationship::new(stem.clone(), target, rel_type, path, confidence)
                        .with_range(Range::point(pos.line, pos.column)),
                );
                if is_import {
                    result.imports.push(target.to_string());
                }
            }
        }

        result
    }
}
