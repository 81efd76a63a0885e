//! C# rule table (`.cs`).

use symgraph_core::model::{RelationshipType, Scope, SymbolType};
use symgraph_core::parser::pattern::{ExtractionRule, PatternEngine};

const EXCLUSIONS: &[&str] = &[
    "if", "for", "foreach", "while", "switch", "catch", "return", "using", "base", "this",
    "nameof", "typeof", "sizeof", "lock", "checked", "unchecked",
    // BCL noise
    "WriteLine", "Write", "ToString", "Equals", "GetHashCode", "GetType", "Add", "Remove",
    "Contains", "Count", "Select", "Where", "First", "FirstOrDefault", "Any", "All",
    "ToList", "ToArray", "Format", "Join", "Parse", "TryParse", "Dispose",
    // attribute noise
    "Obsolete", "Serializable", "Flags",
];

const DOC_PREFIXES: &[&str] = &["///"];

pub fn engine() -> PatternEngine {
    PatternEngine::new("csharp", &["cs"], rules(), DOC_PREFIXES, EXCLUSIONS, ".")
}

fn rules() -> Vec<ExtractionRule> {
    use RelationshipType::*;
    use SymbolType::*;
    vec![
        ExtractionRule::symbol(
            "namespace",
            r"(?m)^[ \t]*namespace\s+(?P<name>[\w.]+)",
            Namespace,
        ),
        ExtractionRule::symbol(
            "class",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)?(?:(?:static|abstract|sealed|partial)\s+)*class\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "record",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)?(?:(?:sealed|partial)\s+)*record\s+(?:class\s+|struct\s+)?(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "struct",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)?(?:(?:readonly|ref|partial)\s+)*struct\s+(?P<name>[A-Z]\w*)",
            Class,
        ),
        ExtractionRule::symbol(
            "interface",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)?(?:partial\s+)?interface\s+(?P<name>I[A-Z]\w*)",
            Interface,
        ),
        ExtractionRule::symbol(
            "enum",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)?enum\s+(?P<name>[A-Z]\w*)",
            Enum,
        ),
        ExtractionRule::symbol(
            "delegate",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)?delegate\s+[\w<>\[\],.\s]+?\s+(?P<name>[A-Z]\w*)\s*(?:<[^>\n]*>)?\s*\(",
            TypeAlias,
        ),
        ExtractionRule::scoped_symbol(
            "method",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)(?:(?:static|virtual|override|abstract|sealed|async|partial|extern|new|unsafe)\s+)*[\w<>\[\],.?]+\s+(?P<name>[A-Z]\w*)\s*(?:<[^>\n]*>)?\s*\([^)\n]*\)\s*(?:where\s[^{\n]+)?\s*[{=;]",
            Method,
            Scope::Class,
        ),
        ExtractionRule::scoped_symbol(
            "property",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)(?:(?:static|virtual|override|abstract|required)\s+)*[\w<>\[\],.?]+\s+(?P<name>[A-Z]\w*)\s*\{\s*(?:get|init|set)\b",
            Property,
            Scope::Class,
        ),
        ExtractionRule::scoped_symbol(
            "constant",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)?const\s+[\w<>\[\],.?]+\s+(?P<name>\w+)\s*=",
            Constant,
            Scope::Class,
        ),
        ExtractionRule::scoped_symbol(
            "field",
            r"(?m)^[ \t]*(?:(?P<vis>private|protected|internal)\s+)(?:(?:static|readonly|volatile)\s+)*[\w<>\[\],.?]+\s+(?P<name>_?[a-z]\w*)\s*[=;]",
            Field,
            Scope::Class,
        ),
        ExtractionRule::scoped_symbol(
            "event",
            r"(?m)^[ \t]*(?:(?P<vis>public|private|protected|internal)\s+)?event\s+[\w<>\[\],.?]+\s+(?P<name>\w+)",
            Field,
            Scope::Class,
        ),
        ExtractionRule::import(
            "using",
            r"(?m)^[ \t]*(?:global\s+)?using\s+(?:static\s+)?(?:\w+\s*=\s*)?(?P<target>[A-Z][\w.]*)\s*;",
            0.95,
        ),
        // Colon base list; the `IFoo` convention separates interfaces from
        // the base class.
        ExtractionRule::inherit_split(
            "base_list",
            r"(?:class|struct|record|interface)\s+(?P<name>I?[A-Z]\w*)(?:<[^>\n]*>)?\s*:\s*(?P<targets>[^{\n]+)",
            0.90,
        ),
        ExtractionRule::relation(
            "attribute",
            r"(?m)^[ \t]*\[(?P<target>[A-Z]\w*)",
            Annotates,
            0.85,
        ),
        ExtractionRule::relation_ctx(
            "instantiation",
            r"\bnew\s+(?P<target>[A-Z]\w*)\s*[(<{]",
            Uses,
            0.85,
            "new",
        ),
        // Member calls: dotted access keeps precision high.
        ExtractionRule::relation(
            "member_call",
            r"\.(?P<target>[A-Z]\w*)\s*\(",
            Calls,
            0.80,
        ),
        ExtractionRule::relation(
            "statement_call",
            r"(?m)^[ \t]*(?:await\s+)?(?P<target>[A-Z]\w*)\s*\(",
            Calls,
            0.70,
        ),
    ]
}
