use super::{explanation, is_called_on};
use crate::model::{Assertion, ClassScope, Expr, Invocation};

const OWNER: &str = "Assertions";

/// Number of arguments each assertion takes without a message.
fn base_arity(method: &str) -> Option<usize> {
    let arity = match method {
        "assertTrue" | "assertFalse" | "assertNull" | "assertNotNull" | "assertDoesNotThrow" => 1,
        "assertEquals" | "assertNotEquals" | "assertArrayEquals" | "assertIterableEquals"
        | "assertLinesMatch" | "assertSame" | "assertNotSame" | "assertInstanceOf"
        | "assertThrows" | "assertThrowsExactly" | "assertTimeout"
        | "assertTimeoutPreemptively" => 2,
        "fail" | "assertAll" => 0,
        _ => return None,
    };
    Some(arity)
}

pub(super) fn recognize(call: &Invocation, scope: &ClassScope) -> Option<Assertion> {
    let arity = base_arity(&call.name)?;
    if !is_called_on(call, OWNER, scope) {
        return None;
    }
    let message = match call.name.as_str() {
        "fail" => fail_message(&call.args),
        "assertAll" => heading(&call.args),
        _ => trailing_message(&call.args, arity, scope),
    };
    let assertion = Assertion::new(
        call.name.clone(),
        message.map(|expr| explanation(expr, scope)),
    );
    Some(assertion.line_hitter(is_line_hitter(call)))
}

fn trailing_message<'a>(args: &'a [Expr], arity: usize, scope: &ClassScope) -> Option<&'a Expr> {
    if args.len() <= arity {
        return None;
    }
    // `assertEquals(1.0, 2.0, 0.01)` and `assertEquals(1.0, 2.0, EPS)` carry a
    // delta, not a message.
    args.last().filter(|last| !is_number(last, scope))
}

fn is_number(expr: &Expr, scope: &ClassScope) -> bool {
    match expr {
        Expr::Number(_) => true,
        Expr::Name(name) => scope
            .resolve(name)
            .is_some_and(|value| matches!(value, Expr::Number(_))),
        _ => false,
    }
}

fn fail_message(args: &[Expr]) -> Option<&Expr> {
    args.first().filter(|first| !matches!(first, Expr::New(_)))
}

fn heading(args: &[Expr]) -> Option<&Expr> {
    if args.len() < 2 {
        return None;
    }
    args.first().filter(|first| !matches!(first, Expr::Lambda(_)))
}

fn is_line_hitter(call: &Invocation) -> bool {
    match (call.name.as_str(), call.args.as_slice()) {
        ("assertTrue", [Expr::Bool(true), ..]) | ("assertFalse", [Expr::Bool(false), ..]) => true,
        ("assertEquals" | "assertSame", [expected, actual, ..]) => {
            is_literal(expected) && expected == actual
        }
        _ => false,
    }
}

const fn is_literal(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Str(_) | Expr::Bool(_) | Expr::Number(_) | Expr::Null
    )
}
