//! The unified model every engine populates: symbols, relationships, and
//! the per-file `ParseResult` that carries them.

mod relationship;
mod result;
mod symbol;
mod types;

pub use relationship::Relationship;
pub use result::{LANGUAGE_UNKNOWN, ParseResult};
pub use symbol::{Position, Range, Symbol};
pub use types::{RelationshipType, Scope, SymbolType};
