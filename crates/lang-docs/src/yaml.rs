//! YAML/JSON engine (`.yml .yaml .json`).
//!
//! Structured config files are scanned line-wise: a shared indentation
//! tracker handles both syntaxes, so `package.json` dependency tables and
//! CI yaml get the same treatment.

use once_cell::sync::Lazy;
use regex::Regex;
use symgraph_core::model::{
    ParseResult, Range, Relationship, RelationshipType, Scope, Symbol, SymbolType,
};
use symgraph_core::parser::ParseEngine;
use symgraph_core::parser::utils::file_stem;

/// Keys whose nested keys name external packages.
const DEPENDENCY_KEYS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
    "dev-dependencies",
    "build-dependencies",
    "requires",
    "depends_on",
];

static KEY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?P<indent>[ \t]*)["']?(?P<key>[@$\w][\w@./-]*)["']?\s*:"#).unwrap()
});
static REF_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']?\$ref["']?\s*:\s*["']?(?P<target>[^"',\s}]+)"#).unwrap()
});
static PATH_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["'](?P<target>\.?[\w.-]+(?:/[\w.-]+)+)["']"#).unwrap()
});

pub struct YamlEngine;

impl ParseEngine for YamlEngine {
    fn language(&self) -> &str {
        "yaml"
    }

    fn extensions(&self) -> &[&str] {
        &["yml", "yaml", "json"]
    }

    fn parse_source(&self, path: &str, content: &str) -> ParseResult {
        let mut result = ParseResult::empty(path, "yaml");
        let stem = file_stem(path);

        // (line number, indent, key)
        let mut keys: Vec<(usize, usize, String)> = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with('#') || trimmed.starts_with('-') {
                continue;
            }
            if let Some(caps) = KEY_LINE.captures(line)
                && let (Some(indent), Some(key)) = (caps.name("indent"), caps.name("key"))
            {
                keys.push((i + 1, indent.as_str().len(), key.as_str().to_string()));
            }
        }

        // Top level is the minimal indent seen; JSON bodies start one level in.
        let top_indent = keys.iter().map(|(_, indent, _)| *indent).min().unwrap_or(0);
        for (line, indent, key) in &keys {
            if *indent == top_indent {
                result.symbols.push(Symbol::new(
                    key,
                    SymbolType::Property,
                    Scope::Global,
                    Range::point(*line, *indent),
                    path,
                ));
            }
        }

        // Dependency tables: nested keys under a dependency section header.
        let mut section: Option<usize> = None; // indent of the open section
        for (line, indent, key) in &keys {
            if let Some(section_indent) = section {
                if *indent > section_indent {
                    result.relationships.push(
                        Relationship::new(
                            stem.clone(),
                            key,
                            RelationshipType::Imports,
                            path,
                            0.85,
                        )
                        .with_range(Range::point(*line, *indent)),
                    );
                    result.imports.push(key.clone());
                    if let Some(root) = key.split(['/', '.']).find(|s| !s.is_empty()) {
                        result.dependencies.insert(root.to_string());
                    }
                    continue;
                }
                section = None;
            }
            if DEPENDENCY_KEYS.contains(&key.as_str()) {
                section = Some(*indent);
            }
        }

        for (i, line) in content.lines().enumerate() {
            for caps in REF_VALUE.captures_iter(line) {
                if let Some(target) = caps.name("target") {
                    result.relationships.push(
                        Relationship::new(
                            stem.clone(),
                            target.as_str(),
                            RelationshipType::References,
                            path,
                            0.95,
                        )
                        .with_range(Range::point(i + 1, target.start())),
                    );
                }
            }
            // `$ref` lines are already covered above.
            if line.contains("$ref") {
                continue;
            }
            for caps in PATH_VALUE.captures_iter(line) {
                if let Some(target) = caps.name("target") {
                    let value = target.as_str();
                    if value.starts_with("http://") || value.starts_with("https://") {
                        continue;
                    }
                    result.relationships.push(
                        Relationship::new(
                            stem.clone(),
                            value,
                            RelationshipType::References,
                            path,
                            0.70,
                        )
                        .with_range(Range::point(i + 1, target.start())),
                    );
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGE_JSON: &str = r#"{
  "name": "petshop",
  "main": "src/index.js",
  "dependencies": {
    "react": "^18.0.0",
    "@scope/util": "1.2.3"
  },
  "devDependencies": {
    "jest": "^29.0.0"
  }
}
"#;

    #[test]
    fn top_level_keys_become_properties() {
        let result = YamlEngine.parse_source("package.json", PACKAGE_JSON);
        let names: Vec<&str> = result.symbols.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"name"));
        assert!(names.contains(&"dependencies"));
        assert!(!names.contains(&"react"));
        assert!(result.symbols.iter().all(|s| s.symbol_type == SymbolType::Property));
    }

    #[test]
    fn dependency_tables_become_imports() {
        let result = YamlEngine.parse_source("package.json", PACKAGE_JSON);
        assert!(result.imports.contains(&"react".to_string()));
        assert!(result.imports.contains(&"@scope/util".to_string()));
        assert!(result.imports.contains(&"jest".to_string()));
        let react = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "react")
            .unwrap();
        assert_eq!(react.relationship_type, RelationshipType::Imports);
        assert!((react.confidence - 0.85).abs() < 1e-9);
        assert!(!result.imports.contains(&"name".to_string()));
    }

    #[test]
    fn quoted_paths_become_weak_references() {
        let result = YamlEngine.parse_source("package.json", PACKAGE_JSON);
        let main = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "src/index.js")
            .unwrap();
        assert_eq!(main.relationship_type, RelationshipType::References);
        assert!((main.confidence - 0.70).abs() < 1e-9);
    }

    #[test]
    fn ref_pointers_in_yaml() {
        let source = "openapi: 3.0.0\ncomponents:\n  schema:\n    $ref: '#/components/schemas/Pet'\n";
        let result = YamlEngine.parse_source("api.yaml", source);
        let reference = result
            .relationships
            .iter()
            .find(|r| r.relationship_type == RelationshipType::References)
            .unwrap();
        assert_eq!(reference.target_symbol, "#/components/schemas/Pet");
        assert!((reference.confidence - 0.95).abs() < 1e-9);
        // yaml top-level keys sit at indent zero.
        assert!(result.symbols.iter().any(|s| s.name == "openapi"));
        assert!(!result.symbols.iter().any(|s| s.name == "schema"));
    }

    #[test]
    fn comments_and_list_items_are_ignored() {
        let source = "# pipeline\nstages:\n  - build\n  - test\n";
        let result = YamlEngine.parse_source("ci.yml", source);
        assert_eq!(result.symbols.len(), 1);
        assert_eq!(result.symbols[0].name, "stages");
    }
}
