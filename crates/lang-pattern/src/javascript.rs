//! JavaScript/TypeScript rule table (`.js .jsx .ts .tsx .mjs .cjs`).

use symgraph_core::model::{RelationshipType, SymbolType};
use symgraph_core::parser::pattern::{ExtractionRule, PatternEngine};

const EXCLUSIONS: &[&str] = &[
    // control flow that reads like a call
    "if", "for", "while", "switch", "catch", "return", "await", "typeof", "super",
    // ambient globals and high-volume builtins
    "console", "log", "warn", "error", "require", "parseInt", "parseFloat", "String",
    "Number", "Boolean", "Array", "Object", "JSON", "Promise", "Math", "Date", "Symbol",
    "setTimeout", "setInterval", "clearTimeout", "clearInterval", "fetch", "alert",
    // collection methods that dominate call noise
    "map", "filter", "reduce", "forEach", "push", "pop", "shift", "unshift", "slice",
    "splice", "join", "split", "concat", "indexOf", "includes", "find", "some", "every",
    "keys", "values", "entries", "then", "resolve", "reject", "stringify", "parse",
];

const DOC_PREFIXES: &[&str] = &["/**", "*", "//"];

pub fn engine() -> PatternEngine {
    PatternEngine::new(
        "javascript",
        &["js", "jsx", "ts", "tsx", "mjs", "cjs"],
        rules(),
        DOC_PREFIXES,
        EXCLUSIONS,
        ".",
    )
}

fn rules() -> Vec<ExtractionRule> {
    use RelationshipType::*;
    use SymbolType::*;
    vec![
        // declarations
        ExtractionRule::symbol(
            "class",
            r"(?m)^[ \t]*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+(?P<name>[A-Za-z_$][\w$]*)",
            Class,
        ),
        ExtractionRule::symbol(
            "interface",
            r"(?m)^[ \t]*(?:export\s+)?interface\s+(?P<name>[A-Za-z_$][\w$]*)",
            Interface,
        ),
        ExtractionRule::symbol(
            "type_alias",
            r"(?m)^[ \t]*(?:export\s+)?type\s+(?P<name>[A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*=",
            TypeAlias,
        ),
        ExtractionRule::symbol(
            "enum",
            r"(?m)^[ \t]*(?:export\s+)?(?:const\s+)?enum\s+(?P<name>[A-Za-z_$][\w$]*)",
            Enum,
        ),
        ExtractionRule::symbol(
            "function",
            r"(?m)^[ \t]*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)",
            Function,
        ),
        ExtractionRule::symbol(
            "arrow_function",
            r"(?m)^[ \t]*(?:export\s+)?const\s+(?P<name>[A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:\([^)\n]*\)|[A-Za-z_$][\w$]*)\s*=>",
            Function,
        ),
        ExtractionRule::symbol(
            "method",
            r"(?m)^[ \t]+(?:(?P<skip>if|for|while|switch|catch|do|else|return|new|typeof|await|function)|(?:(?:public|private|protected|static|readonly|async|get|set|override)\s+)*(?P<name>[A-Za-z_$][\w$]*))\s*\([^)\n]*\)\s*(?::[^{;\n=]+)?\s*\{",
            Method,
        ),
        ExtractionRule::symbol(
            "constant",
            r#"(?m)^[ \t]*(?:export\s+)?const\s+(?P<name>[A-Z_][A-Z0-9_]{2,})\s*=\s*(?:['"`\d\[{-]|null\b|true\b|false\b)"#,
            Constant,
        ),
        ExtractionRule::symbol(
            "variable",
            r"(?m)^[ \t]*(?:export\s+)?(?:let|var)\s+(?P<name>[A-Za-z_$][\w$]*)",
            Variable,
        ),
        // imports
        ExtractionRule::import(
            "es_import",
            r#"(?m)^[ \t]*import\s+(?:type\s+)?(?:[\w$*{},\s]+\s+from\s+)?['"](?P<target>[^'"\n]+)['"]"#,
            0.95,
        ),
        ExtractionRule::import(
            "require",
            r#"(?:const|let|var)\s+[\w${},:\s]+=\s*require\(\s*['"](?P<target>[^'"\n]+)['"]"#,
            0.95,
        ),
        ExtractionRule::import(
            "dynamic_import",
            r#"\bimport\(\s*['"](?P<target>[^'"\n]+)['"]"#,
            0.90,
        ),
        ExtractionRule::import(
            "reexport",
            r#"(?m)^[ \t]*export\s+(?:\*|\{[^}\n]*\})\s*from\s+['"](?P<target>[^'"\n]+)['"]"#,
            0.90,
        ),
        // supertypes
        ExtractionRule::inherit(
            "class_extends",
            r"class\s+(?P<name>[A-Za-z_$][\w$]*)\s+extends\s+(?P<targets>[A-Za-z_$][\w$.]*)",
            Inheritance,
            0.95,
        ),
        ExtractionRule::inherit(
            "class_implements",
            r"class\s+(?P<name>[A-Za-z_$][\w$]*)[^{\n]*?\bimplements\s+(?P<targets>[^{\n]+)",
            Implementation,
            0.90,
        ),
        ExtractionRule::inherit(
            "interface_extends",
            r"interface\s+(?P<name>[A-Za-z_$][\w$]*)(?:<[^>]*>)?\s+extends\s+(?P<targets>[^{\n]+)",
            Inheritance,
            0.90,
        ),
        // usages
        ExtractionRule::relation_ctx(
            "instantiation",
            r"\bnew\s+(?P<target>[A-Za-z_$][\w$.]*)",
            Uses,
            0.85,
            "new",
        ),
        ExtractionRule::relation(
            "decorator",
            r"(?m)^[ \t]*@(?P<target>[A-Za-z_$][\w$.]*)",
            Decorates,
            0.85,
        ),
        ExtractionRule::relation_ctx(
            "jsx_component",
            r"<(?P<target>[A-Z][\w$]+)[\s/>]",
            Uses,
            0.80,
            "jsx",
        ),
        ExtractionRule::relation(
            "call",
            r"(?:\b(?P<skip>function|class|new)\s+)?(?P<target>[A-Za-z_$][\w$]*)\s*\(",
            Calls,
            0.75,
        ),
    ]
}
