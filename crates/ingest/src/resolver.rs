//! Cross-file resolution: the global second pass over per-file results.
//!
//! Parsing never resolves targets inline, because a target's defining file
//! may not have been parsed yet when the reference is seen. After every
//! file has a `ParseResult`, a per-run symbol table is built and each
//! relationship target is looked up against it.

use std::collections::HashMap;
use symgraph_core::model::ParseResult;
use tracing::debug;

/// Name-to-defining-file table, owned by one orchestrator run. Engines
/// never see it, so no symbol data leaks between runs.
#[derive(Debug, Default)]
pub struct SymbolTable {
    by_name: HashMap<String, String>,
    by_full_name: HashMap<String, String>,
}

impl SymbolTable {
    /// Scans every file's symbols. Registration is first-definition-wins;
    /// files are visited in sorted path order so ties break the same way
    /// on every run.
    pub fn build(results: &HashMap<String, ParseResult>) -> Self {
        let mut table = Self::default();
        let mut paths: Vec<&String> = results.keys().collect();
        paths.sort();

        for path in paths {
            let Some(result) = results.get(path) else {
                continue;
            };
            for symbol in &result.symbols {
                table
                    .by_name
                    .entry(symbol.name.clone())
                    .or_insert_with(|| path.clone());
                if let Some(full_name) = &symbol.full_name {
                    table
                        .by_full_name
                        .entry(full_name.clone())
                        .or_insert_with(|| path.clone());
                }
            }
        }
        debug!(
            names = table.by_name.len(),
            qualified = table.by_full_name.len(),
            "symbol table built"
        );
        table
    }

    /// Defining file for a target name. Qualified names take priority so a
    /// `full_name` reference never loses to a shadowing bare name; a target
    /// carrying qualifier separators falls back to its last segment.
    pub fn lookup(&self, target: &str) -> Option<&String> {
        if let Some(path) = self.by_full_name.get(target) {
            return Some(path);
        }
        if let Some(path) = self.by_name.get(target) {
            return Some(path);
        }
        let simple = target
            .rsplit(['.', ':', '/'])
            .next()
            .filter(|s| !s.is_empty() && *s != target)?;
        self.by_full_name
            .get(simple)
            .or_else(|| self.by_name.get(simple))
    }
}

/// Marks relationships whose target is defined in a different file.
/// Mutates `target_file`/`is_cross_file` in place; everything else stays
/// immutable after parse.
pub fn resolve(results: &mut HashMap<String, ParseResult>) {
    let table = SymbolTable::build(results);
    let mut resolved = 0usize;

    for (path, result) in results.iter_mut() {
        for rel in &mut result.relationships {
            let Some(defining) = table.lookup(&rel.target_symbol) else {
                continue;
            };
            if defining != path {
                rel.target_file = Some(defining.clone());
                rel.is_cross_file = true;
                resolved += 1;
            }
        }
    }
    debug!(resolved, "cross-file resolution complete");
}
