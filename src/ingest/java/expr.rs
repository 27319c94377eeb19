//! Syntax tree to [`Expr`] projection.

use tree_sitter::Node;

use crate::model::{Expr, Invocation, Receiver};

const NUMBER_KINDS: [&str; 6] = [
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
];

pub(super) fn text<'a>(node: Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or_default()
}

pub(super) fn line(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

pub(super) fn is_comment(node: Node<'_>) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

/// Named children with comments filtered out.
pub(super) fn named_children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    node.named_children(&mut node.walk())
        .filter(|child| !is_comment(*child))
        .collect()
}

/// Value of a string literal, unquoted and unescaped.
pub(super) fn string_value(node: Node<'_>, src: &[u8]) -> Option<String> {
    if node.kind() != "string_literal" {
        return None;
    }
    let raw = text(node, src);
    let inner = raw
        .strip_prefix("\"\"\"")
        .and_then(|s| s.strip_suffix("\"\"\""))
        .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(raw);
    Some(unescape(inner))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Dotted name for identifiers and field accesses (`Foo.BAR`, `this.x`).
pub(super) fn dotted_name(node: Node<'_>, src: &[u8]) -> Option<String> {
    match node.kind() {
        "identifier" | "type_identifier" | "this" => Some(text(node, src).to_string()),
        "scoped_identifier" | "scoped_type_identifier" => {
            Some(text(node, src).split_whitespace().collect())
        }
        "field_access" => {
            let object = dotted_name(node.child_by_field_name("object")?, src)?;
            let field = text(node.child_by_field_name("field")?, src);
            Some(format!("{object}.{field}"))
        }
        _ => None,
    }
}

pub(super) fn expr(node: Node<'_>, src: &[u8]) -> Expr {
    match node.kind() {
        "string_literal" => string_value(node, src).map_or(Expr::Other, Expr::Str),
        "true" => Expr::Bool(true),
        "false" => Expr::Bool(false),
        "null_literal" => Expr::Null,
        kind if NUMBER_KINDS.contains(&kind) => Expr::Number(text(node, src).to_string()),
        "identifier" | "field_access" | "this" => {
            dotted_name(node, src).map_or(Expr::Other, Expr::Name)
        }
        "method_invocation" => Expr::Call(invocation(node, src)),
        "lambda_expression" => Expr::Lambda(lambda_result(node, src).map(Box::new)),
        "binary_expression" => concat(node, src).unwrap_or(Expr::Other),
        "parenthesized_expression" => named_children(node)
            .first()
            .map_or(Expr::Other, |inner| expr(*inner, src)),
        "cast_expression" => node
            .child_by_field_name("value")
            .map_or(Expr::Other, |value| expr(value, src)),
        "object_creation_expression" => node
            .child_by_field_name("type")
            .map_or(Expr::Other, |ty| Expr::New(text(ty, src).to_string())),
        _ => Expr::Other,
    }
}

fn concat(node: Node<'_>, src: &[u8]) -> Option<Expr> {
    let operator = node.child_by_field_name("operator")?;
    if operator.kind() != "+" {
        return None;
    }
    let mut parts = Vec::new();
    for side in ["left", "right"] {
        match expr(node.child_by_field_name(side)?, src) {
            Expr::Concat(inner) => parts.extend(inner),
            other => parts.push(other),
        }
    }
    Some(Expr::Concat(parts))
}

/// Result expression of `() -> value` or `() -> { return value; }`.
fn lambda_result(node: Node<'_>, src: &[u8]) -> Option<Expr> {
    let body = node.child_by_field_name("body")?;
    if body.kind() != "block" {
        return Some(expr(body, src));
    }
    match named_children(body).as_slice() {
        [statement] if statement.kind() == "return_statement" => {
            named_children(*statement).first().map(|value| expr(*value, src))
        }
        _ => None,
    }
}

pub(super) fn invocation(node: Node<'_>, src: &[u8]) -> Invocation {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src))
        .unwrap_or_default();
    let receiver = node
        .child_by_field_name("object")
        .map_or(Receiver::Unqualified, |object| {
            dotted_name(object, src).map_or(Receiver::Computed, Receiver::Named)
        });
    let args = node
        .child_by_field_name("arguments")
        .map(|list| {
            named_children(list)
                .into_iter()
                .map(|arg| expr(arg, src))
                .collect()
        })
        .unwrap_or_default();
    Invocation::new(receiver, name, args).at_line(line(node))
}

/// Every method invocation under `node`, outer calls before their arguments.
pub(super) fn invocations(node: Node<'_>, src: &[u8]) -> Vec<Invocation> {
    let mut found = Vec::new();
    collect_invocations(node, src, &mut found);
    found
}

fn collect_invocations(node: Node<'_>, src: &[u8], found: &mut Vec<Invocation>) {
    if node.kind() == "method_invocation" {
        found.push(invocation(node, src));
    }
    for child in node.named_children(&mut node.walk()) {
        collect_invocations(child, src, found);
    }
}
