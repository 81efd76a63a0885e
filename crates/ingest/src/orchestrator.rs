//! Corpus orchestration: partition by language, parse in parallel, then
//! resolve cross-file targets.

use crate::resolver;
use rayon::prelude::*;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use symgraph_core::model::ParseResult;
use symgraph_core::parser::ParseEngine;
use symgraph_core::registry::ParserRegistry;
use tracing::{debug, warn};

/// Batch size for one parallel wave. Keeps peak memory bounded on large
/// corpora: at most one batch of contents-plus-results is in flight per
/// language at a time.
const BATCH_SIZE: usize = 200;

/// Default worker count when the caller does not specify one.
pub const DEFAULT_WORKERS: usize = 4;

/// Parses a corpus and resolves cross-file relationships.
///
/// Every input path gets exactly one entry in the returned map: unknown
/// extensions as `language: "unknown"` results, panicking or failing
/// parsers as results with a populated `errors` list. Nothing aborts the
/// batch.
pub fn parse_files(
    registry: &ParserRegistry,
    paths: &[String],
    contents: Option<&HashMap<String, String>>,
    max_workers: Option<usize>,
) -> HashMap<String, ParseResult> {
    let workers = max_workers.unwrap_or(DEFAULT_WORKERS).max(1);
    let mut results: HashMap<String, ParseResult> = HashMap::with_capacity(paths.len());

    // Partition by language; unknown extensions short-circuit here.
    let mut partitions: HashMap<String, (Arc<dyn ParseEngine>, Vec<&String>)> = HashMap::new();
    for path in paths {
        if results.contains_key(path.as_str()) {
            continue;
        }
        match registry.get_for_file(path) {
            Some(engine) => {
                partitions
                    .entry(engine.language().to_string())
                    .or_insert_with(|| (engine, Vec::new()))
                    .1
                    .push(path);
            }
            None => {
                results.insert(path.clone(), ParseResult::unknown(path));
            }
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| warn!(error = %e, "thread pool construction failed, parsing sequentially"))
        .ok();

    let mut languages: Vec<String> = partitions.keys().cloned().collect();
    languages.sort();
    for language in languages {
        let Some((engine, files)) = partitions.remove(&language) else {
            continue;
        };
        debug!(language, files = files.len(), "parsing partition");
        for batch in files.chunks(BATCH_SIZE) {
            let run = || -> Vec<(String, ParseResult)> {
                batch
                    .par_iter()
                    .map(|path| {
                        let content = contents.and_then(|m| m.get(*path)).map(String::as_str);
                        let result = parse_one(engine.as_ref(), path, content);
                        ((*path).clone(), result)
                    })
                    .collect()
            };
            let batch_results = match &pool {
                Some(pool) => pool.install(run),
                None => run(),
            };
            results.extend(batch_results);
        }
    }

    resolver::resolve(&mut results);
    results
}

/// One guarded parse. A panicking engine yields an errored result instead
/// of poisoning the batch.
fn parse_one(engine: &dyn ParseEngine, path: &str, content: Option<&str>) -> ParseResult {
    match catch_unwind(AssertUnwindSafe(|| engine.parse_file(path, content))) {
        Ok(result) => result,
        Err(_) => {
            warn!(path, language = engine.language(), "parser panicked");
            ParseResult::failed(path, engine.language(), "parser panicked")
        }
    }
}

/// Summary counters over one orchestrator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub files: usize,
    pub symbols: usize,
    pub relationships: usize,
    pub cross_file: usize,
    pub errors: usize,
}

impl CorpusStats {
    pub fn from_results(results: &HashMap<String, ParseResult>) -> Self {
        let mut stats = Self {
            files: results.len(),
            ..Self::default()
        };
        for result in results.values() {
            stats.symbols += result.symbols.len();
            stats.relationships += result.relationships.len();
            stats.cross_file += result
                .relationships
                .iter()
                .filter(|r| r.is_cross_file)
                .count();
            stats.errors += result.errors.len();
        }
        stats
    }
}
