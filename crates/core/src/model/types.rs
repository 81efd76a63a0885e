use serde::{Deserialize, Serialize};

/// The kind of a declared program entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolType {
    Function,
    Method,
    Class,
    Interface,
    Variable,
    Constant,
    Property,
    Field,
    Parameter,
    Module,
    Namespace,
    Enum,
    TypeAlias,
    Decorator,
    Import,
}

impl SymbolType {
    /// Whether this kind can contain member symbols (methods, fields, ...).
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::Module | Self::Namespace
        )
    }
}

impl std::fmt::Display for SymbolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Variable => "variable",
            Self::Constant => "constant",
            Self::Property => "property",
            Self::Field => "field",
            Self::Parameter => "parameter",
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Enum => "enum",
            Self::TypeAlias => "type_alias",
            Self::Decorator => "decorator",
            Self::Import => "import",
        };
        f.write_str(s)
    }
}

/// The kind of a directed edge between two symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Imports,
    Exports,
    Calls,
    Returns,
    Inheritance,
    Implementation,
    Composition,
    Aggregation,
    Defines,
    Contains,
    Decorates,
    Annotates,
    References,
    Uses,
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Imports => "imports",
            Self::Exports => "exports",
            Self::Calls => "calls",
            Self::Returns => "returns",
            Self::Inheritance => "inheritance",
            Self::Implementation => "implementation",
            Self::Composition => "composition",
            Self::Aggregation => "aggregation",
            Self::Defines => "defines",
            Self::Contains => "contains",
            Self::Decorates => "decorates",
            Self::Annotates => "annotates",
            Self::References => "references",
            Self::Uses => "uses",
        };
        f.write_str(s)
    }
}

/// Lexical scope a symbol was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Global,
    Class,
    Function,
    Block,
    Local,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Global => "global",
            Self::Class => "class",
            Self::Function => "function",
            Self::Block => "block",
            Self::Local => "local",
        };
        f.write_str(s)
    }
}
