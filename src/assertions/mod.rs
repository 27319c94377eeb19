//! Recognition of assertion call sites in test method bodies.
//!
//! Two families are understood: JUnit 5 `Assertions` and Hamcrest
//! `MatcherAssert.assertThat`. Every other invocation is ignored.

mod hamcrest;
mod junit;

use crate::model::{Assertion, ClassScope, Expr, Invocation, Receiver, UNKNOWN_EXPLANATION};

/// Assertions made by `invocations`, in source order.
#[must_use]
pub fn extract(invocations: &[Invocation], scope: &ClassScope) -> Vec<Assertion> {
    invocations
        .iter()
        .filter_map(|call| recognize(call, scope))
        .collect()
}

/// Assertion made by a single call, if it is one.
#[must_use]
pub fn recognize(call: &Invocation, scope: &ClassScope) -> Option<Assertion> {
    junit::recognize(call, scope)
        .or_else(|| hamcrest::recognize(call, scope))
        .map(|assertion| assertion.at_line(call.line))
}

/// Whether `call` targets a static method of the type named `owner`, either
/// through a qualified receiver or a static import.
pub(crate) fn is_called_on(call: &Invocation, owner: &str, scope: &ClassScope) -> bool {
    match &call.receiver {
        Receiver::Named(_) => call.receiver.simple_name() == Some(owner),
        Receiver::Unqualified => scope.imports_statically(owner, &call.name),
        Receiver::Computed => false,
    }
}

/// Message argument folded to its value, or the unknown sentinel.
fn explanation(message: &Expr, scope: &ClassScope) -> String {
    scope
        .fold(message)
        .unwrap_or_else(|| UNKNOWN_EXPLANATION.to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
