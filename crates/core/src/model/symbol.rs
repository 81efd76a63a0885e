use super::types::{Scope, SymbolType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A point in a source file. Lines are 1-based, columns 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A span in a source file. `end` may equal `start` when the true end of a
/// construct cannot be determined cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width range at a single position.
    pub fn point(line: usize, column: usize) -> Self {
        let p = Position::new(line, column);
        Self { start: p, end: p }
    }

    /// A range spanning whole lines.
    pub fn lines(start_line: usize, end_line: usize) -> Self {
        Self {
            start: Position::new(start_line, 0),
            end: Position::new(end_line, 0),
        }
    }

    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start.line && line <= self.end.line
    }
}

/// A declared program entity with a location and optional documentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub symbol_type: SymbolType,
    pub scope: Scope,
    pub range: Range,
    pub file_path: String,
    pub parent_symbol: Option<String>,
    /// Fully qualified name (module/package/namespace-prefixed).
    pub full_name: Option<String>,
    pub visibility: Option<String>,
    pub is_static: bool,
    pub is_async: bool,
    pub is_exported: bool,
    pub docstring: Option<String>,
    pub return_type: Option<String>,
    pub parameter_types: Vec<String>,
    pub source_text: Option<String>,
    pub signature: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Symbol {
    pub fn new(
        name: impl Into<String>,
        symbol_type: SymbolType,
        scope: Scope,
        range: Range,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol_type,
            scope,
            range,
            file_path: file_path.into(),
            parent_symbol: None,
            full_name: None,
            visibility: None,
            is_static: false,
            is_async: false,
            is_exported: false,
            docstring: None,
            return_type: None,
            parameter_types: Vec::new(),
            source_text: None,
            signature: None,
            metadata: HashMap::new(),
        }
    }

    /// The best available qualified name: `full_name` when set, otherwise
    /// derived from `parent_symbol`, otherwise the bare name.
    pub fn qualified_name(&self) -> String {
        if let Some(full) = &self.full_name {
            return full.clone();
        }
        match &self.parent_symbol {
            Some(parent) => format!("{parent}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Identity used for de-duplication within one file.
    pub fn dedup_key(&self) -> (String, SymbolType, Range) {
        (self.name.clone(), self.symbol_type, self.range)
    }
}
