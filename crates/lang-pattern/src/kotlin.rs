//! Kotlin rule table (`.kt .kts`).

use symgraph_core::model::{RelationshipType, Scope, SymbolType};
use symgraph_core::parser::pattern::{ExtractionRule, PatternEngine};

const EXCLUSIONS: &[&str] = &[
    "if", "for", "while", "when", "catch", "return", "super", "this", "it",
    // stdlib noise
    "println", "print", "listOf", "mutableListOf", "mapOf", "mutableMapOf", "setOf",
    "arrayOf", "to", "let", "also", "apply", "run", "with", "takeIf", "takeUnless",
    "forEach", "map", "filter", "first", "last", "toString", "require", "check",
    "lazy", "error", "TODO",
    // annotation noise
    "Override", "JvmStatic", "JvmField", "Suppress", "Deprecated",
];

const DOC_PREFIXES: &[&str] = &["/**", "*"];

pub fn engine() -> PatternEngine {
    PatternEngine::new("kotlin", &["kt", "kts"], rules(), DOC_PREFIXES, EXCLUSIONS, ".")
}

fn rules() -> Vec<ExtractionRule> {
    use RelationshipType::*;
    use SymbolType::*;
    vec![
        ExtractionRule::symbol(
            "package",
            r"(?m)^[ \t]*package\s+(?P<name>[\w.]+)",
            Namespace,
        ),
        ExtractionRule::symbol(
            "class",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|internal|protected)\s+)?(?:(?:abstract|open|final|sealed|data|inner|annotation|value)\s+)*class\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "object",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|internal)\s+)?(?:companion\s+)?object\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "interface",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|internal)\s+)?(?:(?:sealed|fun)\s+)?interface\s+(?P<name>[A-Z]\w*)",
            Interface,
        ),
        ExtractionRule::symbol(
            "enum",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|internal)\s+)?enum\s+class\s+(?P<name>[A-Z]\w*)",
            Enum,
        ),
        ExtractionRule::symbol(
            "type_alias",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|internal)\s+)?typealias\s+(?P<name>[A-Z]\w*)",
            TypeAlias,
        ),
        // Optional extension receiver between `fun` and the name.
        ExtractionRule::symbol(
            "function",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|internal|protected)\s+)?(?:(?:suspend|inline|open|override|operator|infix|tailrec|external|actual|expect)\s+)*fun\s+(?:<[^>\n]+>\s+)?(?:[\w.<>?]+\.)?(?P<name>\w+)\s*\(",
            Function,
        ),
        ExtractionRule::scoped_symbol(
            "constant",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|internal)\s+)?const\s+val\s+(?P<name>\w+)",
            Constant,
            Scope::Global,
        ),
        ExtractionRule::scoped_symbol(
            "property",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|internal|protected)\s+)?(?:(?:open|override|lateinit|final)\s+)*va[lr]\s+(?P<name>[a-z]\w*)\s*[:=]",
            Property,
            Scope::Global,
        ),
        ExtractionRule::import(
            "import",
            r"(?m)^[ \t]*import\s+(?P<target>[\w.]+(?:\.\*)?)",
            0.95,
        ),
        // `class Foo(val x: Int) : Base(), Comparable<Foo>` — first entry is
        // the base class, the rest are conformances.
        ExtractionRule::inherit_split(
            "supertypes",
            r"(?:class|object|interface)\s+(?P<name>[A-Z]\w*)(?:<[^>\n]*>)?\s*(?:\([^)\n]*\)\s*)?:\s*(?P<targets>[^{\n]+)",
            0.90,
        ),
        ExtractionRule::relation(
            "annotation",
            r"(?m)^[ \t]*@(?P<target>[A-Z]\w*)",
            Annotates,
            0.85,
        ),
        ExtractionRule::relation_ctx(
            "coroutine_builder",
            r"\b(?:launch|async|runBlocking|withContext)\s*(?:\([^)\n]*\))?\s*\{[^\n]*\b(?P<target>\w+)\(",
            Calls,
            0.75,
            "coroutine",
        ),
        ExtractionRule::relation_ctx(
            "instantiation",
            r"(?:\b(?P<skip>class|object|interface|fun)\s+)?\b(?P<target>[A-Z]\w*)\s*\(",
            Uses,
            0.80,
            "constructor",
        ),
        ExtractionRule::relation(
            "call",
            r"(?:\b(?P<skip>fun|va[lr]|if|for|while|when|catch|class|object)\s+)?(?P<target>[a-z]\w*)\s*\(",
            Calls,
            0.75,
        ),
    ]
}
