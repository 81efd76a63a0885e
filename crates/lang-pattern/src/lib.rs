//! Pattern-discipline engines: one curated rule table per language.
//!
//! These languages are handled with high-precision regex heuristics rather
//! than a full grammar, trading completeness for zero external grammar
//! dependencies and predictable behavior on partially invalid code. The
//! shared runner lives in `symgraph_core::parser::pattern`; each module
//! here is mostly a declarative table plus a curated exclusion set.

pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod kotlin;
pub mod rust;
pub mod swift;

use std::sync::Arc;
use symgraph_core::ParseEngine;

/// All pattern-discipline code engines, one instance each.
pub fn all_engines() -> Vec<Arc<dyn ParseEngine>> {
    vec![
        Arc::new(javascript::engine()),
        Arc::new(java::engine()),
        Arc::new(kotlin::engine()),
        Arc::new(csharp::engine()),
        Arc::new(rust::engine()),
        Arc::new(swift::engine()),
        Arc::new(go::GoEngine::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engines_cover_their_extensions() {
        let engines = all_engines();
        let mut languages: Vec<String> =
            engines.iter().map(|e| e.language().to_string()).collect();
        languages.sort();
        assert_eq!(
            languages,
            vec!["csharp", "go", "java", "javascript", "kotlin", "rust", "swift"]
        );
        for engine in &engines {
            assert!(!engine.extensions().is_empty(), "{}", engine.language());
        }
    }
}
