use super::symbol::Range;
use super::types::RelationshipType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directed, typed edge between two symbol names.
///
/// `target_file` and `is_cross_file` stay unset until the orchestrator's
/// resolution pass runs; engines never fill them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub source_symbol: String,
    pub target_symbol: String,
    pub relationship_type: RelationshipType,
    pub source_file: String,
    pub target_file: Option<String>,
    pub source_range: Option<Range>,
    /// Heuristic certainty of the extraction rule that produced this edge.
    pub confidence: f64,
    pub is_cross_file: bool,
    pub context: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Relationship {
    pub fn new(
        source_symbol: impl Into<String>,
        target_symbol: impl Into<String>,
        relationship_type: RelationshipType,
        source_file: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            source_symbol: source_symbol.into(),
            target_symbol: target_symbol.into(),
            relationship_type,
            source_file: source_file.into(),
            target_file: None,
            source_range: None,
            confidence: confidence.clamp(0.0, 1.0),
            is_cross_file: false,
            context: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.source_range = Some(range);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// De-duplication key: `"{source}->{target}:{type}@{line}"`.
    pub fn key(&self) -> String {
        let line = self.source_range.map(|r| r.start.line).unwrap_or(0);
        format!(
            "{}->{}:{}@{}",
            self.source_symbol, self.target_symbol, self.relationship_type, line
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Range;

    #[test]
    fn key_includes_line() {
        let rel = Relationship::new("a", "b", RelationshipType::Calls, "f.py", 0.9)
            .with_range(Range::point(12, 4));
        assert_eq!(rel.key(), "a->b:calls@12");
    }

    #[test]
    fn key_defaults_to_line_zero() {
        let rel = Relationship::new("a", "b", RelationshipType::Uses, "f.py", 0.9);
        assert_eq!(rel.key(), "a->b:uses@0");
    }

    #[test]
    fn confidence_is_clamped() {
        let rel = Relationship::new("a", "b", RelationshipType::Calls, "f.py", 1.7);
        assert_eq!(rel.confidence, 1.0);
        let rel = Relationship::new("a", "b", RelationshipType::Calls, "f.py", -0.2);
        assert_eq!(rel.confidence, 0.0);
    }
}
