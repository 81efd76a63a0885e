//! Python engine: the one AST-discipline strategy, backed by
//! tree-sitter-python.
//!
//! A full syntax tree is walked with an explicit scope stack; one symbol is
//! emitted per declaration node and one relationship per import, call, base
//! class, and decorator edge. Qualified names join the scope stack with `.`.

mod walk;

use symgraph_core::model::ParseResult;
use symgraph_core::parser::ParseEngine;
use tree_sitter::Parser;

pub struct PythonEngine;

impl PythonEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseEngine for PythonEngine {
    fn language(&self) -> &str {
        "python"
    }

    fn extensions(&self) -> &[&str] {
        &["py", "pyi", "pyw"]
    }

    fn parse_source(&self, path: &str, content: &str) -> ParseResult {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_python::LANGUAGE.into()) {
            return ParseResult::failed(path, self.language(), format!("grammar load failed: {e}"));
        }

        let Some(tree) = parser.parse(content, None) else {
            return ParseResult::failed(path, self.language(), "tree-sitter produced no tree");
        };

        let mut result = ParseResult::empty(path, self.language());
        if tree.root_node().has_error() {
            // tree-sitter recovers around syntax errors; keep what parsed.
            tracing::debug!(path, "syntax errors in source, extraction may be partial");
            result.add_warning("source contains syntax errors; extraction may be partial");
        }

        walk::extract(tree.root_node(), content, path, &mut result);
        result
    }
}
