//! Java rule table (`.java`).

use symgraph_core::model::{RelationshipType, Scope, SymbolType};
use symgraph_core::parser::pattern::{ExtractionRule, PatternEngine};

const EXCLUSIONS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "super", "this", "new", "assert",
    "synchronized",
    // annotation noise
    "Override", "Deprecated", "SuppressWarnings", "FunctionalInterface",
    // high-volume JDK calls
    "println", "print", "printf", "format", "valueOf", "toString", "equals", "hashCode",
    "get", "set", "add", "put", "remove", "size", "isEmpty", "contains", "of", "stream",
    "collect", "forEach", "length", "charAt", "substring", "append", "builder", "build",
];

const DOC_PREFIXES: &[&str] = &["/**", "*"];

pub fn engine() -> PatternEngine {
    PatternEngine::new("java", &["java"], rules(), DOC_PREFIXES, EXCLUSIONS, ".")
}

fn rules() -> Vec<ExtractionRule> {
    use RelationshipType::*;
    use SymbolType::*;
    vec![
        ExtractionRule::symbol(
            "package",
            r"(?m)^[ \t]*package\s+(?P<name>[\w.]+)\s*;",
            Namespace,
        ),
        ExtractionRule::symbol(
            "class",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)?(?:(?:static|final|abstract|sealed|non-sealed|strictfp)\s+)*class\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "record",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)?(?:(?:static|final)\s+)*record\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "interface",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)?(?:(?:static|sealed|non-sealed)\s+)*interface\s+(?P<name>[A-Z]\w*)",
            Interface,
        ),
        ExtractionRule::symbol(
            "enum",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)?(?:static\s+)?enum\s+(?P<name>[A-Z]\w*)",
            Enum,
        ),
        ExtractionRule::symbol(
            "annotation_type",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)?@interface\s+(?P<name>[A-Z]\w*)",
            Decorator,
        ),
        // A method needs a modifier or annotation prefix plus a return type;
        // this keeps `if (...)` and plain calls out.
        ExtractionRule::scoped_symbol(
            "method",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)(?:(?:static|final|abstract|synchronized|native|default)\s+)*(?:<[^>\n]+>\s+)?[\w<>\[\],.\s]+?\s+(?P<name>[a-z]\w*)\s*\([^)\n]*\)\s*(?:throws\s+[\w.,\s]+)?\s*[{;]",
            Method,
            Scope::Class,
        ),
        ExtractionRule::scoped_symbol(
            "constructor",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)(?P<name>[A-Z]\w*)\s*\([^)\n]*\)\s*(?:throws\s+[\w.,\s]+)?\s*\{",
            Method,
            Scope::Class,
        ),
        ExtractionRule::scoped_symbol(
            "constant_field",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)?static\s+final\s+[\w<>\[\],.\s]+?\s+(?P<name>[A-Z_][A-Z0-9_]+)\s*[=;]",
            Constant,
            Scope::Class,
        ),
        ExtractionRule::scoped_symbol(
            "field",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected)\s+)(?:(?:static|final|transient|volatile)\s+)*[\w<>\[\],.]+\s+(?P<name>[a-z]\w*)\s*[=;]",
            Field,
            Scope::Class,
        ),
        ExtractionRule::import(
            "import",
            r"(?m)^[ \t]*import\s+(?:static\s+)?(?P<target>[\w.]+(?:\.\*)?)\s*;",
            0.95,
        ),
        ExtractionRule::inherit(
            "extends",
            r"(?:class|interface)\s+(?P<name>[A-Z]\w*)(?:<[^>{\n]*>)?\s+extends\s+(?P<targets>[^{\n]+?)(?:\s+implements\b|\s*\{)",
            Inheritance,
            0.95,
        ),
        ExtractionRule::inherit(
            "implements",
            r"class\s+(?P<name>[A-Z]\w*)[^{\n]*?\bimplements\s+(?P<targets>[^{\n]+)",
            Implementation,
            0.95,
        ),
        ExtractionRule::relation(
            "annotation",
            r"(?m)^[ \t]*@(?P<target>[A-Z]\w*)",
            Annotates,
            0.85,
        ),
        ExtractionRule::relation_ctx(
            "instantiation",
            r"\bnew\s+(?P<target>[A-Z]\w*)\s*[(<]",
            Uses,
            0.85,
            "new",
        ),
        ExtractionRule::relation(
            "call",
            r"(?:\b(?P<skip>new|class|interface|enum|record|void|if|for|while|switch|catch)\s+)?(?P<target>[a-z]\w*)\s*\(",
            Calls,
            0.70,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use symgraph_core::ParseEngine;

    const SOURCE: &str = r#"
package com.example.zoo;

import java.util.List;
import com.example.base.Animal;

/**
 * A very good dog.
 */
public class Dog extends Animal implements Comparable {
    private static final int MAX_AGE = 20;
    private String name;

    public Dog(String name) {
        this.name = name;
    }

    @Override
    public void bark() {
        makeSound();
    }
}
"#;

    #[test]
    fn class_hierarchy_and_members() {
        let result = engine().parse_file("Dog.java", Some(SOURCE));

        let dog = result.symbols.iter().find(|s| s.name == "Dog" && s.symbol_type == SymbolType::Class).unwrap();
        assert_eq!(dog.visibility.as_deref(), Some("public"));
        assert_eq!(dog.docstring.as_deref(), Some("A very good dog."));

        let bark = result.symbols.iter().find(|s| s.name == "bark").unwrap();
        assert_eq!(bark.symbol_type, SymbolType::Method);
        assert_eq!(bark.parent_symbol.as_deref(), Some("Dog"));
        assert_eq!(bark.full_name.as_deref(), Some("Dog.bark"));

        let max_age = result.symbols.iter().find(|s| s.name == "MAX_AGE").unwrap();
        assert_eq!(max_age.symbol_type, SymbolType::Constant);
        assert!(max_age.is_static);

        assert!(result.symbols.iter().any(|s| s.name == "name" && s.symbol_type == SymbolType::Field));
        // Constructor counts as a method of the class.
        assert!(result.symbols.iter().any(|s| {
            s.symbol_type == SymbolType::Method && s.name == "Dog"
        }));
    }

    #[test]
    fn inheritance_and_implementation_edges() {
        let result = engine().parse_file("Dog.java", Some(SOURCE));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Inheritance
                && r.source_symbol == "Dog"
                && r.target_symbol == "Animal"
        }));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Implementation
                && r.target_symbol == "Comparable"
        }));
    }

    #[test]
    fn imports_and_dependencies() {
        let result = engine().parse_file("Dog.java", Some(SOURCE));
        assert!(result.imports.contains(&"java.util.List".to_string()));
        assert!(result.imports.contains(&"com.example.base.Animal".to_string()));
        assert!(result.dependencies.contains("java"));
        assert!(result.dependencies.contains("com"));
    }

    #[test]
    fn override_annotation_is_suppressed_but_calls_survive() {
        let result = engine().parse_file("Dog.java", Some(SOURCE));
        assert!(!result.relationships.iter().any(|r| r.target_symbol == "Override"));
        let call = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "makeSound")
            .unwrap();
        assert_eq!(call.relationship_type, RelationshipType::Calls);
        assert_eq!(call.source_symbol, "bark");
    }

    #[test]
    fn package_becomes_namespace() {
        let result = engine().parse_file("Dog.java", Some(SOURCE));
        let pkg = result
            .symbols
            .iter()
            .find(|s| s.symbol_type == SymbolType::Namespace)
            .unwrap();
        assert_eq!(pkg.name, "com.example.zoo");
    }
}
