//! Scope-tracking walk over the tree-sitter-python syntax tree.

use symgraph_core::model::{
    ParseResult, Position, Range, Relationship, RelationshipType, Scope, Symbol, SymbolType,
};
use symgraph_core::parser::utils::file_stem;
use tree_sitter::Node;

/// Call targets that would flood the graph with noise.
const PY_BUILTINS: &[&str] = &[
    "print", "len", "range", "str", "int", "float", "bool", "list", "dict", "set", "tuple",
    "type", "isinstance", "issubclass", "super", "enumerate", "zip", "map", "filter", "sorted",
    "reversed", "sum", "min", "max", "abs", "round", "open", "getattr", "setattr", "hasattr",
    "repr", "format", "iter", "next", "vars", "id", "hash",
];

const TYPE_PLACEHOLDER: &str = "Any";

struct Walker<'a> {
    source: &'a str,
    path: &'a str,
    stem: String,
    scope: Vec<(String, bool)>, // (name, is_class)
}

pub(crate) fn extract(root: Node<'_>, source: &str, path: &str, result: &mut ParseResult) {
    result.module_docstring = body_docstring(root, source);
    let mut walker = Walker {
        source,
        path,
        stem: file_stem(path),
        scope: Vec::new(),
    };
    walker.walk(root, result);
}

impl<'a> Walker<'a> {
    fn walk(&mut self, node: Node<'a>, result: &mut ParseResult) {
        match node.kind() {
            "function_definition" => {
                self.handle_function(node, &[], result);
                return;
            }
            "class_definition" => {
                self.handle_class(node, &[], result);
                return;
            }
            "decorated_definition" => {
                self.handle_decorated(node, result);
                return;
            }
            "expression_statement" => {
                if self.scope.is_empty() {
                    self.handle_module_assignment(node, result);
                }
            }
            "import_statement" => {
                self.handle_import(node, result);
                return;
            }
            "import_from_statement" => {
                self.handle_import_from(node, result);
                return;
            }
            "call" => {
                self.handle_call(node, result);
                // keep walking: arguments may contain nested calls
            }
            _ => {}
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        for child in children {
            self.walk(child, result);
        }
    }

    fn handle_decorated(&mut self, node: Node<'a>, result: &mut ParseResult) {
        let mut decorators = Vec::new();
        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        for child in &children {
            if child.kind() == "decorator" {
                let text = self.text(*child);
                let name = text
                    .trim_start_matches('@')
                    .split('(')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string();
                if !name.is_empty() {
                    decorators.push(name);
                }
            }
        }
        for child in children {
            match child.kind() {
                "function_definition" => {
                    self.handle_function(child, &decorators, result);
                    return;
                }
                "class_definition" => {
                    self.handle_class(child, &decorators, result);
                    return;
                }
                _ => {}
            }
        }
    }

    fn handle_function(&mut self, node: Node<'a>, decorators: &[String], result: &mut ParseResult) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node);
        let in_class = self.scope.last().is_some_and(|(_, is_class)| *is_class);

        let symbol_type = if in_class {
            SymbolType::Method
        } else {
            SymbolType::Function
        };
        let scope = if in_class {
            Scope::Class
        } else if self.scope.is_empty() {
            Scope::Global
        } else {
            Scope::Function
        };

        let mut sym = Symbol::new(&name, symbol_type, scope, node_range(node), self.path);
        sym.is_async = node.child(0).is_some_and(|c| c.kind() == "async");
        sym.visibility = Some(python_visibility(&name).to_string());
        sym.is_exported = self.scope.is_empty() && !name.starts_with('_');
        sym.docstring = body_docstring(node, self.source);
        sym.signature = Some(def_signature(node, self.source));
        sym.parameter_types = self.parameter_types(node);
        sym.return_type = node
            .child_by_field_name("return_type")
            .map(|n| self.type_text(n));
        self.fill_qualified(&mut sym);
        self.emit_decorates(decorators, &name, node, result);

        if let Some(ret) = sym.return_type.clone() {
            // A named (non-builtin) return annotation is a usable edge.
            if ret
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase())
            {
                result.relationships.push(
                    Relationship::new(
                        sym.qualified_name(),
                        ret,
                        RelationshipType::Returns,
                        self.path,
                        0.9,
                    )
                    .with_range(node_point(node)),
                );
            }
        }

        result.symbols.push(sym);

        self.scope.push((name, false));
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            let children: Vec<Node<'a>> = body.children(&mut cursor).collect();
            for child in children {
                self.walk(child, result);
            }
        }
        self.scope.pop();
    }

    fn handle_class(&mut self, node: Node<'a>, decorators: &[String], result: &mut ParseResult) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node);

        let mut sym = Symbol::new(
            &name,
            SymbolType::Class,
            if self.scope.is_empty() {
                Scope::Global
            } else {
                Scope::Local
            },
            node_range(node),
            self.path,
        );
        sym.visibility = Some(python_visibility(&name).to_string());
        sym.is_exported = self.scope.is_empty() && !name.starts_with('_');
        sym.docstring = body_docstring(node, self.source);
        sym.signature = Some(def_signature(node, self.source));
        self.fill_qualified(&mut sym);
        self.emit_decorates(decorators, &name, node, result);

        if let Some(supers) = node.child_by_field_name("superclasses") {
            let mut cursor = supers.walk();
            let bases: Vec<Node<'a>> = supers.children(&mut cursor).collect();
            for base in bases {
                if matches!(base.kind(), "identifier" | "attribute") {
                    let target = self.text(base);
                    if target != "object" {
                        result.relationships.push(
                            Relationship::new(
                                &name,
                                target,
                                RelationshipType::Inheritance,
                                self.path,
                                1.0,
                            )
                            .with_range(node_point(base)),
                        );
                    }
                }
            }
        }

        result.symbols.push(sym);

        self.scope.push((name, true));
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            let children: Vec<Node<'a>> = body.children(&mut cursor).collect();
            for child in children {
                self.walk(child, result);
            }
        }
        self.scope.pop();
    }

    fn handle_module_assignment(&mut self, stmt: Node<'a>, result: &mut ParseResult) {
        let Some(assignment) = stmt.child(0).filter(|c| c.kind() == "assignment") else {
            return;
        };
        let Some(left) = assignment.child_by_field_name("left") else {
            return;
        };
        if left.kind() != "identifier" {
            return;
        }
        let name = self.text(left);
        let symbol_type = if is_constant_name(&name) {
            SymbolType::Constant
        } else {
            SymbolType::Variable
        };
        let mut sym = Symbol::new(&name, symbol_type, Scope::Global, node_range(stmt), self.path);
        sym.visibility = Some(python_visibility(&name).to_string());
        sym.is_exported = !name.starts_with('_');
        sym.signature = self.text(assignment).lines().next().map(str::to_string);
        if let Some(ty) = assignment.child_by_field_name("type") {
            sym.return_type = Some(self.type_text(ty));
        }
        result.symbols.push(sym);
    }

    fn handle_import(&mut self, node: Node<'a>, result: &mut ParseResult) {
        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        for child in children {
            let module = match child.kind() {
                "dotted_name" => self.text(child),
                "aliased_import" => child
                    .child_by_field_name("name")
                    .map(|n| self.text(n))
                    .unwrap_or_default(),
                _ => continue,
            };
            if !module.is_empty() {
                self.push_import(module, node, result);
            }
        }
    }

    fn handle_import_from(&mut self, node: Node<'a>, result: &mut ParseResult) {
        let Some(module_node) = node.child_by_field_name("module_name") else {
            return;
        };
        let module = self.text(module_node);

        let mut pushed_any = false;
        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        let mut past_import_kw = false;
        for child in children {
            if child.kind() == "import" {
                past_import_kw = true;
                continue;
            }
            if !past_import_kw {
                continue;
            }
            let imported = match child.kind() {
                "dotted_name" => self.text(child),
                "aliased_import" => child
                    .child_by_field_name("name")
                    .map(|n| self.text(n))
                    .unwrap_or_default(),
                "wildcard_import" => "*".to_string(),
                _ => continue,
            };
            if imported.is_empty() {
                continue;
            }
            let target = if imported == "*" {
                module.clone()
            } else {
                format!("{module}.{imported}")
            };
            self.push_import(target, node, result);
            pushed_any = true;
        }
        if !pushed_any {
            self.push_import(module, node, result);
        }
    }

    fn push_import(&mut self, target: String, node: Node<'a>, result: &mut ParseResult) {
        result.relationships.push(
            Relationship::new(
                self.source_name(),
                target.clone(),
                RelationshipType::Imports,
                self.path,
                1.0,
            )
            .with_range(node_point(node)),
        );
        if let Some(root) = target.split('.').find(|s| !s.is_empty()) {
            result.dependencies.insert(root.to_string());
        }
        result.imports.push(target);
    }

    fn handle_call(&mut self, node: Node<'a>, result: &mut ParseResult) {
        let Some(function) = node.child_by_field_name("function") else {
            return;
        };
        if !matches!(function.kind(), "identifier" | "attribute") {
            return;
        }
        let target = self.text(function);
        let bare = target.rsplit('.').next().unwrap_or(&target);
        if PY_BUILTINS.contains(&bare) || PY_BUILTINS.contains(&target.as_str()) {
            return;
        }
        result.relationships.push(
            Relationship::new(
                self.source_name(),
                target,
                RelationshipType::Calls,
                self.path,
                0.9,
            )
            .with_range(node_point(node)),
        );
    }

    fn emit_decorates(
        &mut self,
        decorators: &[String],
        target: &str,
        node: Node<'a>,
        result: &mut ParseResult,
    ) {
        for decorator in decorators {
            result.relationships.push(
                Relationship::new(
                    decorator,
                    target,
                    RelationshipType::Decorates,
                    self.path,
                    0.95,
                )
                .with_range(node_point(node)),
            );
        }
    }

    fn fill_qualified(&self, sym: &mut Symbol) {
        if let Some((parent, _)) = self.scope.last() {
            sym.parent_symbol = Some(parent.clone());
            let prefix: Vec<&str> = self.scope.iter().map(|(n, _)| n.as_str()).collect();
            sym.full_name = Some(format!("{}.{}", prefix.join("."), sym.name));
        }
    }

    /// Relationship source: the enclosing scope's qualified name, or the
    /// file stem at module level.
    fn source_name(&self) -> String {
        if self.scope.is_empty() {
            self.stem.clone()
        } else {
            self.scope
                .iter()
                .map(|(n, _)| n.as_str())
                .collect::<Vec<_>>()
                .join(".")
        }
    }

    fn parameter_types(&self, node: Node<'a>) -> Vec<String> {
        let Some(params) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut types = Vec::new();
        let mut cursor = params.walk();
        for param in params.children(&mut cursor) {
            match param.kind() {
                "typed_parameter" | "typed_default_parameter" => {
                    let ty = param
                        .child_by_field_name("type")
                        .map(|n| self.type_text(n))
                        .unwrap_or_else(|| TYPE_PLACEHOLDER.to_string());
                    types.push(ty);
                }
                _ => {}
            }
        }
        types
    }

    fn text(&self, node: Node<'a>) -> String {
        node.utf8_text(self.source.as_bytes())
            .unwrap_or("")
            .to_string()
    }

    /// Stringifies a type annotation, falling back to a placeholder on any
    /// unexpected node shape instead of raising.
    fn type_text(&self, node: Node<'a>) -> String {
        let text = self.text(node);
        let text = text.trim();
        if text.is_empty() {
            TYPE_PLACEHOLDER.to_string()
        } else {
            text.to_string()
        }
    }
}

fn node_range(node: Node<'_>) -> Range {
    let start = node.start_position();
    let end = node.end_position();
    Range::new(
        Position::new(start.row + 1, start.column),
        Position::new(end.row + 1, end.column),
    )
}

fn node_point(node: Node<'_>) -> Range {
    let start = node.start_position();
    Range::point(start.row + 1, start.column)
}

/// First statement of a body (or module) that is a bare string expression.
fn body_docstring(node: Node<'_>, source: &str) -> Option<String> {
    let body = if node.kind() == "module" {
        node
    } else {
        node.child_by_field_name("body")?
    };
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.child(0)?;
    if expr.kind() != "string" {
        return None;
    }
    let raw = expr.utf8_text(source.as_bytes()).unwrap_or("");
    let stripped = raw
        .trim_start_matches("\"\"\"")
        .trim_start_matches("'''")
        .trim_start_matches(['"', '\''])
        .trim_end_matches("\"\"\"")
        .trim_end_matches("'''")
        .trim_end_matches(['"', '\''])
        .trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Header of a `def`/`class`: everything up to the body, without the
/// trailing colon.
fn def_signature(node: Node<'_>, source: &str) -> String {
    let header = match node.child_by_field_name("body") {
        Some(body) => source.get(node.start_byte()..body.start_byte()).unwrap_or(""),
        None => source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or(""),
    };
    header.trim().trim_end_matches(':').trim_end().to_string()
}

fn python_visibility(name: &str) -> &'static str {
    if name.starts_with('_') { "private" } else { "public" }
}

fn is_constant_name(name: &str) -> bool {
    name.len() >= 2
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '_' || c.is_ascii_digit())
}
