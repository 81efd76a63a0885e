//! symgraph-core: the unified model, parser contract, pattern framework,
//! parser registry, and universal citation layer.
//!
//! Engines live in the `symgraph-*` language crates; orchestration and the
//! public facade live in `symgraph-ingest`. Everything in between reads and
//! writes only the types defined here.

pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod registry;
pub mod universal;

pub use error::{Result, SymgraphError};
pub use model::{
    LANGUAGE_UNKNOWN, ParseResult, Position, Range, Relationship, RelationshipType, Scope, Symbol,
    SymbolType,
};
pub use parser::{ParseEngine, validate_result};
pub use registry::ParserRegistry;
