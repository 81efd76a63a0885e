//! Corpus ingestion facade: the default registry, single- and multi-file
//! parsing, and gitignore-aware directory walks.
//!
//! This is the crate downstream consumers link against; everything here
//! delegates to the engines registered in the process-wide registry.

pub mod orchestrator;
pub mod resolver;

use ignore::WalkBuilder;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use symgraph_core::error::Result;
use symgraph_core::model::ParseResult;
use symgraph_core::parser::ParseEngine;
use symgraph_core::registry::ParserRegistry;
use tracing::info;

pub use orchestrator::CorpusStats;
pub use resolver::SymbolTable;

static REGISTRY: Lazy<ParserRegistry> = Lazy::new(|| {
    let mut registry = ParserRegistry::new();
    registry.register(Arc::new(symgraph_python::PythonEngine::new()));
    for engine in symgraph_pattern::all_engines() {
        registry.register(engine);
    }
    for engine in symgraph_docs::all_engines() {
        registry.register(engine);
    }
    registry
});

/// The process-wide registry with every built-in engine. Read-only after
/// first access.
pub fn default_registry() -> &'static ParserRegistry {
    &REGISTRY
}

/// Parses one file with the engine its extension selects. Unknown
/// extensions yield a `language: "unknown"` result; nothing returns an
/// error.
pub fn parse_file(path: &str, content: Option<&str>) -> ParseResult {
    match default_registry().get_for_file(path) {
        Some(engine) => engine.parse_file(path, content),
        None => ParseResult::unknown(path),
    }
}

/// Parses a corpus in parallel and resolves cross-file relationships.
/// The returned map has exactly one entry per distinct input path.
pub fn parse_files(
    paths: &[String],
    contents: Option<&HashMap<String, String>>,
    max_workers: Option<usize>,
) -> HashMap<String, ParseResult> {
    let results = orchestrator::parse_files(default_registry(), paths, contents, max_workers);
    let stats = CorpusStats::from_results(&results);
    info!(
        files = stats.files,
        symbols = stats.symbols,
        relationships = stats.relationships,
        cross_file = stats.cross_file,
        errors = stats.errors,
        "corpus parsed"
    );
    results
}

/// Walks `root` honoring gitignore rules, collects every file with a
/// supported extension, and feeds them to [`parse_files`].
pub fn parse_directory(
    root: &Path,
    max_workers: Option<usize>,
) -> Result<HashMap<String, ParseResult>> {
    let mut paths: Vec<String> = Vec::new();
    for entry in WalkBuilder::new(root).build() {
        let entry = entry.map_err(|e| symgraph_core::error::SymgraphError::Internal(e.to_string()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Some(path) = entry.path().to_str() else {
            continue;
        };
        if default_registry().language_for_file(path).is_some() {
            paths.push(path.to_string());
        }
    }
    paths.sort();
    Ok(parse_files(&paths, None, max_workers))
}

/// Engine lookup by file extension, for callers that need engine metadata.
pub fn get_parser_for_file(path: &str) -> Option<Arc<dyn ParseEngine>> {
    default_registry().get_for_file(path)
}

/// Sorted language identifiers of every registered engine.
pub fn get_supported_languages() -> Vec<String> {
    default_registry().languages()
}

/// Sorted extensions of every registered engine.
pub fn get_supported_extensions() -> Vec<String> {
    default_registry().extensions()
}
