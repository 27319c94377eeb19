//! Owned expression tree for method bodies.
//!
//! The parser's syntax tree is dropped once a class is projected into the
//! model; the few expression shapes assertion and mockery analysis care
//! about are kept here.

use std::collections::HashMap;

/// Upper bound on constant indirections followed while folding.
const MAX_FOLD_DEPTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Str(String),
    Bool(bool),
    Number(String),
    Null,
    /// Simple or dotted name (`message`, `Foo.BAR`).
    Name(String),
    Call(Invocation),
    /// Lambda with its result expression; `None` for bodies that do not
    /// reduce to a single returned expression.
    Lambda(Option<Box<Expr>>),
    /// Operands of a `+` chain.
    Concat(Vec<Expr>),
    /// `new Type(...)`, keeping the type as written.
    New(String),
    Other,
}

/// Who a method is invoked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// `assertTrue(x)`, possibly statically imported.
    Unqualified,
    /// `Assertions.assertTrue(x)` or `org.junit.jupiter.api.Assertions.assertTrue(x)`.
    Named(String),
    /// `mock(List.class).get(0)` and other computed receivers.
    Computed,
}

impl Receiver {
    /// Last segment of a named receiver.
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => name.rsplit('.').next(),
            Self::Unqualified | Self::Computed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub receiver: Receiver,
    pub name: String,
    pub args: Vec<Expr>,
    pub line: usize,
}

impl Invocation {
    #[must_use]
    pub fn new(receiver: Receiver, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            receiver,
            name: name.into(),
            args,
            line: 0,
        }
    }

    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// What a class makes statically known to its method bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassScope {
    /// Simple name of the enclosing class, for `Owner.CONSTANT` references.
    pub class_name: String,
    /// Initializers of `final` fields by name.
    pub constants: HashMap<String, Expr>,
    /// Static imports as written (`org.junit.jupiter.api.Assertions.assertTrue`,
    /// `org.hamcrest.MatcherAssert.*`).
    pub static_imports: Vec<String>,
}

impl ClassScope {
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: Expr) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_static_import(mut self, import: impl Into<String>) -> Self {
        self.static_imports.push(import.into());
        self
    }

    /// Whether `method` is statically imported from a type whose simple name
    /// is `owner`, either by name or through a wildcard.
    #[must_use]
    pub fn imports_statically(&self, owner: &str, method: &str) -> bool {
        self.static_imports.iter().any(|import| {
            let Some((path, member)) = import.rsplit_once('.') else {
                return false;
            };
            let owner_matches = path.rsplit('.').next() == Some(owner);
            owner_matches && (member == "*" || member == method)
        })
    }

    /// Fold an expression to a string if it is known at compile time.
    ///
    /// Handles string literals, references to constant fields, zero-argument
    /// lambdas returning a foldable value, `String.format` with a foldable
    /// format and `+` concatenations of foldable operands.
    #[must_use]
    pub fn fold(&self, expr: &Expr) -> Option<String> {
        self.fold_at(expr, 0)
    }

    fn fold_at(&self, expr: &Expr, depth: usize) -> Option<String> {
        if depth > MAX_FOLD_DEPTH {
            return None;
        }
        match expr {
            Expr::Str(value) => Some(value.clone()),
            Expr::Bool(value) => Some(value.to_string()),
            Expr::Number(value) => Some(value.clone()),
            Expr::Name(name) => {
                let constant = self.resolve(name)?;
                self.fold_at(constant, depth + 1)
            }
            Expr::Lambda(Some(body)) => self.fold_at(body, depth + 1),
            Expr::Call(call) if is_string_format(call) => {
                self.fold_at(call.args.first()?, depth + 1)
            }
            Expr::Concat(parts) => parts
                .iter()
                .map(|part| self.fold_at(part, depth + 1))
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.concat()),
            Expr::Lambda(None)
            | Expr::Call(_)
            | Expr::New(_)
            | Expr::Null
            | Expr::Other => None,
        }
    }

    /// Initializer of the constant `name` refers to (`BAR`, `Owner.BAR` or
    /// `this.BAR`).
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Expr> {
        let field = match name.rsplit_once('.') {
            Some((owner, field)) if owner == self.class_name || owner == "this" => field,
            Some(_) => return None,
            None => name,
        };
        self.constants.get(field)
    }
}

fn is_string_format(call: &Invocation) -> bool {
    call.name == "format"
        && matches!(call.receiver.simple_name(), Some("String"))
        && !call.args.is_empty()
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
