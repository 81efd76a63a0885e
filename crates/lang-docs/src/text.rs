//! Plain-text engine (`.txt`): the universal pattern layer, as an engine.

use symgraph_core::model::ParseResult;
use symgraph_core::parser::ParseEngine;
use symgraph_core::universal;

pub struct TextEngine;

impl ParseEngine for TextEngine {
    fn language(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn parse_source(&self, path: &str, content: &str) -> ParseResult {
        let mut result = ParseResult::empty(path, "text");
        let matches = universal::match_text(content);
        result.relationships = universal::to_relationships(path, &matches);
        result
    }
}
