//! Swift rule table (`.swift`).

use symgraph_core::model::{RelationshipType, Scope, SymbolType};
use symgraph_core::parser::pattern::{ExtractionRule, PatternEngine};

const EXCLUSIONS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "guard", "return", "defer", "self", "super",
    // stdlib noise
    "print", "debugPrint", "map", "filter", "reduce", "forEach", "append", "count",
    "contains", "first", "last", "sorted", "joined", "split", "hasPrefix", "hasSuffix",
    "String", "Int", "Double", "Bool", "Array", "Dictionary", "Set", "Optional",
    "fatalError", "precondition", "assert", "init",
    // attribute/wrapper noise
    "available", "objc", "escaping", "discardableResult", "MainActor",
];

const DOC_PREFIXES: &[&str] = &["///", "/**", "*"];

pub fn engine() -> PatternEngine {
    PatternEngine::new("swift", &["swift"], rules(), DOC_PREFIXES, EXCLUSIONS, ".")
}

fn rules() -> Vec<ExtractionRule> {
    use RelationshipType::*;
    use SymbolType::*;
    vec![
        ExtractionRule::symbol(
            "class",
            r"(?m)^[ \t]*(?:(?P<vis>open|public|internal|fileprivate|private)\s+)?(?:final\s+)?class\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "struct",
            r"(?m)^[ \t]*(?:(?P<vis>public|internal|fileprivate|private)\s+)?struct\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "enum",
            r"(?m)^[ \t]*(?:(?P<vis>public|internal|fileprivate|private)\s+)?(?:indirect\s+)?enum\s+(?P<name>[A-Z]\w*)",
            Enum,
        ),
        ExtractionRule::symbol(
            "protocol",
            r"(?m)^[ \t]*(?:(?P<vis>public|internal|fileprivate|private)\s+)?protocol\s+(?P<name>[A-Z]\w*)",
            Interface,
        ),
        ExtractionRule::symbol(
            "actor",
            r"(?m)^[ \t]*(?:(?P<vis>public|internal|fileprivate|private)\s+)?actor\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "extension",
            r"(?m)^[ \t]*(?:(?P<vis>public|internal|fileprivate|private)\s+)?extension\s+(?P<name>[A-Z]\w*)",
            Namespace,
        ),
        ExtractionRule::symbol(
            "type_alias",
            r"(?m)^[ \t]*(?:(?P<vis>public|internal|fileprivate|private)\s+)?typealias\s+(?P<name>[A-Z]\w*)",
            TypeAlias,
        ),
        ExtractionRule::symbol(
            "function",
            r"(?m)^[ \t]*(?:(?P<vis>open|public|internal|fileprivate|private)\s+)?(?:(?:static|class|final|override|mutating|nonisolated)\s+)*func\s+(?P<name>\w+)\s*(?:<[^>\n]*>)?\([^)\n]*\)(?:\s*(?:async|throws|rethrows))*",
            Function,
        ),
        ExtractionRule::scoped_symbol(
            "initializer",
            r"(?m)^[ \t]*(?:(?P<vis>public|internal|fileprivate|private)\s+)?(?:(?:convenience|required|override)\s+)*(?P<name>init)\s*[(?]",
            Method,
            Scope::Class,
        ),
        // `guard let` / `if let` bindings are control flow, not declarations.
        ExtractionRule::symbol(
            "property",
            r"(?m)^[ \t]*(?:\b(?P<skip>guard|if|while|case)\s+)?(?:(?P<vis>public|internal|fileprivate|private)\s+)?(?:(?:static|lazy|weak|unowned|final|override)\s+)*(?:let|var)\s+(?P<name>[a-z]\w*)\s*[:=]",
            Property,
        ),
        ExtractionRule::import(
            "import",
            r"(?m)^[ \t]*import\s+(?:(?:class|struct|enum|protocol|func|var|let)\s+)?(?P<target>[\w.]+)",
            0.95,
        ),
        // Colon conformance list; the first entry may be a superclass, the
        // rest are protocol conformances.
        ExtractionRule::inherit_split(
            "conformance",
            r"(?:class|struct|enum|actor|extension)\s+(?P<name>[A-Z]\w*)(?:<[^>\n]*>)?\s*:\s*(?P<targets>[^{\n]+)",
            0.90,
        ),
        ExtractionRule::inherit(
            "protocol_inheritance",
            r"protocol\s+(?P<name>[A-Z]\w*)\s*:\s*(?P<targets>[^{\n]+)",
            Inheritance,
            0.90,
        ),
        ExtractionRule::relation(
            "property_wrapper",
            r"(?m)^[ \t]*@(?P<target>[A-Z]\w*)",
            Annotates,
            0.85,
        ),
        ExtractionRule::relation_ctx(
            "instantiation",
            r"(?:\b(?P<skip>class|struct|enum|protocol|actor|extension|func|import)\s+)?\b(?P<target>[A-Z]\w*)\s*\(",
            Uses,
            0.80,
            "constructor",
        ),
        ExtractionRule::relation(
            "call",
            r"(?:\b(?P<skip>func|let|var|if|guard|while|switch|for)\s+)?(?P<target>[a-z]\w*)\s*\(",
            Calls,
            0.75,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use symgraph_core::ParseEngine;

    const SOURCE: &str = r#"
import Foundation
import Combine

/// A very good dog.
public class Dog: Animal, Barkable {
    static let maxAge = 20
    @Published var name: String = ""

    override init() {
        super.init()
    }

    public func bark() async {
        makeSound()
    }
}

protocol Barkable: AnyObject {
}

struct Leash {
    let length: Int
}

extension Dog: CustomStringConvertible {
    var description: String { name }
}
"#;

    #[test]
    fn classes_structs_and_protocols() {
        let result = engine().parse_file("Dog.swift", Some(SOURCE));

        let dog = result
            .symbols
            .iter()
            .find(|s| s.name == "Dog" && s.symbol_type == SymbolType::Class)
            .unwrap();
        assert_eq!(dog.visibility.as_deref(), Some("public"));
        assert_eq!(dog.docstring.as_deref(), Some("A very good dog."));

        assert!(result.symbols.iter().any(|s| s.name == "Barkable" && s.symbol_type == SymbolType::Interface));
        assert!(result.symbols.iter().any(|s| s.name == "Leash" && s.symbol_type == SymbolType::Class));
        assert!(result.symbols.iter().any(|s| s.name == "init" && s.symbol_type == SymbolType::Method));
    }

    #[test]
    fn conformance_list_splits() {
        let result = engine().parse_file("Dog.swift", Some(SOURCE));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Inheritance
                && r.source_symbol == "Dog"
                && r.target_symbol == "Animal"
        }));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Implementation
                && r.source_symbol == "Dog"
                && r.target_symbol == "Barkable"
        }));
        // Extensions add conformances too.
        assert!(result.relationships.iter().any(|r| {
            r.source_symbol == "Dog" && r.target_symbol == "CustomStringConvertible"
        }));
    }

    #[test]
    fn async_method_and_parent() {
        let result = engine().parse_file("Dog.swift", Some(SOURCE));
        let bark = result.symbols.iter().find(|s| s.name == "bark").unwrap();
        assert_eq!(bark.symbol_type, SymbolType::Method);
        assert!(bark.is_async);
        assert_eq!(bark.parent_symbol.as_deref(), Some("Dog"));

        let call = result
            .relationships
            .iter()
            .find(|r| r.target_symbol == "makeSound")
            .unwrap();
        assert_eq!(call.source_symbol, "bark");
    }

    #[test]
    fn property_wrapper_and_static_let() {
        let result = engine().parse_file("Dog.swift", Some(SOURCE));
        assert!(result.relationships.iter().any(|r| {
            r.relationship_type == RelationshipType::Annotates && r.target_symbol == "Published"
        }));
        let max_age = result.symbols.iter().find(|s| s.name == "maxAge").unwrap();
        assert_eq!(max_age.symbol_type, SymbolType::Property);
        assert!(max_age.is_static);
        assert_eq!(max_age.parent_symbol.as_deref(), Some("Dog"));
    }

    #[test]
    fn imports_are_module_names() {
        let result = engine().parse_file("Dog.swift", Some(SOURCE));
        assert!(result.imports.contains(&"Foundation".to_string()));
        assert!(result.imports.contains(&"Combine".to_string()));
        assert!(result.dependencies.contains("Combine"));
    }
}
