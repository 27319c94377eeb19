//! Java source reader built on tree-sitter.
//!
//! Each top-level class, enum or record becomes an AST-backed [`TestClass`].
//! Interfaces and annotation types are skipped. The syntax tree is dropped
//! once the owned model is built.

mod expr;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tree_sitter::{Node, Parser};

use self::expr::{dotted_name, expr, invocations, line, named_children, string_value, text};
use crate::error::{Result, TestcopError};
use crate::model::{Characteristics, ClassScope, Field, Origin, TestCase, TestClass};

/// Annotations that make a method a test case.
pub const TEST_ANNOTATIONS: [&str; 5] = [
    "Test",
    "ParameterizedTest",
    "RepeatedTest",
    "TestFactory",
    "TestTemplate",
];

/// JUnit 5 extension interfaces; implementing one makes a class an extension.
pub const EXTENSION_INTERFACES: [&str; 17] = [
    "Extension",
    "BeforeAllCallback",
    "AfterAllCallback",
    "BeforeEachCallback",
    "AfterEachCallback",
    "BeforeTestExecutionCallback",
    "AfterTestExecutionCallback",
    "ExecutionCondition",
    "ParameterResolver",
    "TestInstanceFactory",
    "TestInstancePostProcessor",
    "TestInstancePreDestroyCallback",
    "TestExecutionExceptionHandler",
    "LifecycleMethodExecutionExceptionHandler",
    "TestTemplateInvocationContextProvider",
    "InvocationInterceptor",
    "TestWatcher",
];

const CLASS_KINDS: [&str; 3] = ["class_declaration", "enum_declaration", "record_declaration"];
const SUPPRESS_WARNINGS: &str = "SuppressWarnings";

/// Classes read from one source file.
#[derive(Debug)]
pub struct JavaFile {
    pub classes: Vec<TestClass>,
    /// The file has syntax errors; `classes` holds what could be recovered.
    pub has_errors: bool,
}

/// Whether `name` (simple or qualified) is a JUnit extension interface.
#[must_use]
pub fn is_extension_interface(name: &str) -> bool {
    let simple = name.rsplit(['.', '/', '$']).next().unwrap_or(name);
    EXTENSION_INTERFACES.contains(&simple)
}

/// Read and parse a `.java` file.
///
/// # Errors
/// Returns an error if the file cannot be read or the parser cannot run.
pub fn parse_file(path: &Path) -> Result<JavaFile> {
    let source = fs::read_to_string(path).map_err(|e| TestcopError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_source(&source, path)
}

/// Parse Java source text attributed to `path`.
///
/// # Errors
/// Returns [`TestcopError::Parse`] if the grammar cannot be loaded or the
/// parser produces no tree.
pub fn parse_source(source: &str, path: &Path) -> Result<JavaFile> {
    let parse_error = |reason: String| TestcopError::Parse {
        path: path.to_path_buf(),
        reason,
    };
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| parse_error(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| parse_error("parser produced no tree".to_string()))?;

    let root = tree.root_node();
    let unit = CompilationUnit::read(root, source.as_bytes());
    let classes = named_children(root)
        .into_iter()
        .filter(|node| CLASS_KINDS.contains(&node.kind()))
        .filter_map(|node| unit.class(node, path))
        .collect();

    Ok(JavaFile {
        classes,
        has_errors: root.has_error(),
    })
}

/// File-level context shared by the classes of one compilation unit.
struct CompilationUnit<'src> {
    src: &'src [u8],
    package: String,
    static_imports: Vec<String>,
}

impl<'src> CompilationUnit<'src> {
    fn read(root: Node<'_>, src: &'src [u8]) -> Self {
        let mut unit = Self {
            src,
            package: String::new(),
            static_imports: Vec::new(),
        };
        for node in named_children(root) {
            match node.kind() {
                "package_declaration" => {
                    if let Some(name) = first_name(node, src) {
                        unit.package = name;
                    }
                }
                "import_declaration" => unit.read_import(node),
                _ => {}
            }
        }
        unit
    }

    fn read_import(&mut self, node: Node<'_>) {
        let mut is_static = false;
        let mut wildcard = false;
        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "static" => is_static = true,
                "asterisk" => wildcard = true,
                _ => {}
            }
        }
        let Some(name) = first_name(node, self.src) else {
            return;
        };
        if is_static {
            let import = if wildcard { format!("{name}.*") } else { name };
            self.static_imports.push(import);
        }
    }

    fn class(&self, node: Node<'_>, path: &Path) -> Option<TestClass> {
        let name_node = node.child_by_field_name("name")?;
        let name = text(name_node, self.src).to_string();
        let annotations = annotations(node);
        let members = node
            .child_by_field_name("body")
            .map(members)
            .unwrap_or_default();

        let scope = Arc::new(self.scope(&name, &members));
        let fields = members
            .iter()
            .filter(|m| m.kind() == "field_declaration")
            .flat_map(|m| self.fields(*m));
        let cases: Vec<TestCase> = members
            .iter()
            .filter(|m| m.kind() == "method_declaration")
            .filter_map(|m| self.test_case(*m, &scope))
            .collect();

        Some(
            TestClass::new(name, path, Origin::Ast)
                .with_package(self.package.clone())
                .with_line(line(name_node))
                .with_suppressed(self.suppressions(&annotations))
                .with_fields(fields)
                .with_cases(cases)
                .with_characteristics(self.characteristics(node, &members)),
        )
    }

    fn scope(&self, class_name: &str, members: &[Node<'_>]) -> ClassScope {
        let mut scope = ClassScope::new(class_name);
        scope.static_imports.clone_from(&self.static_imports);
        for member in members.iter().filter(|m| m.kind() == "field_declaration") {
            if !has_modifier(*member, "final") {
                continue;
            }
            for declarator in declarators(*member) {
                let (Some(name), Some(value)) = (
                    declarator.child_by_field_name("name"),
                    declarator.child_by_field_name("value"),
                ) else {
                    continue;
                };
                scope
                    .constants
                    .insert(text(name, self.src).to_string(), expr(value, self.src));
            }
        }
        scope
    }

    fn fields(&self, node: Node<'_>) -> Vec<Field> {
        let type_name = node
            .child_by_field_name("type")
            .map(|ty| text(ty, self.src).to_string())
            .unwrap_or_default();
        let is_static = has_modifier(node, "static");
        let annotation_names: Vec<String> = annotations(node)
            .into_iter()
            .map(|a| self.annotation_name(a))
            .collect();
        declarators(node)
            .into_iter()
            .filter_map(|declarator| declarator.child_by_field_name("name"))
            .map(|name| {
                let mut field = Field::new(text(name, self.src), type_name.clone())
                    .static_field(is_static);
                field.annotations.clone_from(&annotation_names);
                field
            })
            .collect()
    }

    fn test_case(&self, method: Node<'_>, scope: &Arc<ClassScope>) -> Option<TestCase> {
        let annotations = annotations(method);
        let is_test = annotations
            .iter()
            .any(|a| TEST_ANNOTATIONS.contains(&self.annotation_name(*a).as_str()));
        if !is_test {
            return None;
        }
        let name_node = method.child_by_field_name("name")?;
        let body = method
            .child_by_field_name("body")
            .map(|body| invocations(body, self.src))
            .unwrap_or_default();
        Some(
            TestCase::new(text(name_node, self.src))
                .with_line(line(name_node))
                .with_suppressed(self.suppressions(&annotations))
                .with_body(body, Arc::clone(scope)),
        )
    }

    fn characteristics(&self, node: Node<'_>, members: &[Node<'_>]) -> Characteristics {
        let parent = node
            .child_by_field_name("superclass")
            .and_then(|superclass| named_children(superclass).into_iter().next())
            .map(|ty| strip_type_arguments(text(ty, self.src)))
            .unwrap_or_default();
        let interfaces: Vec<String> = node
            .child_by_field_name("interfaces")
            .map(|list| self.interface_names(list))
            .unwrap_or_default();
        Characteristics {
            is_junit_extension: interfaces.iter().any(|i| is_extension_interface(i)),
            parent,
            methods: members
                .iter()
                .filter(|m| m.kind() == "method_declaration")
                .count(),
            interfaces,
        }
    }

    fn interface_names(&self, node: Node<'_>) -> Vec<String> {
        named_children(node)
            .into_iter()
            .flat_map(|child| {
                if child.kind() == "type_list" {
                    named_children(child)
                } else {
                    vec![child]
                }
            })
            .map(|ty| strip_type_arguments(text(ty, self.src)))
            .collect()
    }

    fn annotation_name(&self, annotation: Node<'_>) -> String {
        annotation
            .child_by_field_name("name")
            .map(|name| text(name, self.src))
            .and_then(|name| name.rsplit('.').next())
            .unwrap_or_default()
            .to_string()
    }

    /// String values of `@SuppressWarnings` among `annotations`.
    fn suppressions(&self, annotations: &[Node<'_>]) -> Vec<String> {
        let mut values = Vec::new();
        for annotation in annotations {
            if self.annotation_name(*annotation) != SUPPRESS_WARNINGS {
                continue;
            }
            if let Some(arguments) = annotation.child_by_field_name("arguments") {
                for argument in named_children(arguments) {
                    self.collect_strings(argument, &mut values);
                }
            }
        }
        values
    }

    fn collect_strings(&self, node: Node<'_>, values: &mut Vec<String>) {
        match node.kind() {
            "string_literal" => values.extend(string_value(node, self.src)),
            "element_value_array_initializer" => {
                for element in named_children(node) {
                    self.collect_strings(element, values);
                }
            }
            "element_value_pair" => {
                let is_value = node
                    .child_by_field_name("key")
                    .is_some_and(|key| text(key, self.src) == "value");
                if let (true, Some(value)) = (is_value, node.child_by_field_name("value")) {
                    self.collect_strings(value, values);
                }
            }
            _ => {}
        }
    }
}

fn first_name(node: Node<'_>, src: &[u8]) -> Option<String> {
    named_children(node)
        .into_iter()
        .find(|child| matches!(child.kind(), "identifier" | "scoped_identifier"))
        .and_then(|child| dotted_name(child, src))
}

fn modifiers(node: Node<'_>) -> Option<Node<'_>> {
    node.children(&mut node.walk())
        .find(|child| child.kind() == "modifiers")
}

fn has_modifier(node: Node<'_>, keyword: &str) -> bool {
    modifiers(node).is_some_and(|modifiers| {
        modifiers
            .children(&mut modifiers.walk())
            .any(|child| child.kind() == keyword)
    })
}

fn annotations(node: Node<'_>) -> Vec<Node<'_>> {
    modifiers(node)
        .map(|modifiers| {
            named_children(modifiers)
                .into_iter()
                .filter(|child| matches!(child.kind(), "annotation" | "marker_annotation"))
                .collect()
        })
        .unwrap_or_default()
}

fn declarators(node: Node<'_>) -> Vec<Node<'_>> {
    named_children(node)
        .into_iter()
        .filter(|child| child.kind() == "variable_declarator")
        .collect()
}

/// Class members, looking through the declarations section of enum bodies.
fn members(body: Node<'_>) -> Vec<Node<'_>> {
    named_children(body)
        .into_iter()
        .flat_map(|child| {
            if child.kind() == "enum_body_declarations" {
                named_children(child)
            } else {
                vec![child]
            }
        })
        .collect()
}

fn strip_type_arguments(name: &str) -> String {
    name.split('<').next().unwrap_or(name).trim().to_string()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
