use super::{explanation, is_called_on};
use crate::model::{Assertion, ClassScope, Expr, Invocation, Receiver};

const OWNER: &str = "MatcherAssert";
const METHOD: &str = "assertThat";

/// Matchers that compare for equality, optionally nested (`is(equalTo(true))`).
const EQUALITY_MATCHERS: [&str; 2] = ["is", "equalTo"];

pub(super) fn recognize(call: &Invocation, scope: &ClassScope) -> Option<Assertion> {
    if call.name != METHOD || !is_called_on(call, OWNER, scope) {
        return None;
    }
    let (message, hitter) = match call.args.as_slice() {
        [reason, subject, matcher] => (Some(reason), is_tautology(subject, matcher)),
        // `assertThat(reason, boolean)`
        [reason, Expr::Bool(value)] => (Some(reason), *value),
        [reason, assertion] if is_text(reason, scope) && !is_matcher(assertion) => {
            (Some(reason), false)
        }
        [subject, matcher] => (None, is_tautology(subject, matcher)),
        _ => return None,
    };
    let assertion = Assertion::new(METHOD, message.map(|expr| explanation(expr, scope)));
    Some(assertion.line_hitter(hitter))
}

/// Matcher factories are called unqualified (statically imported) or on a
/// matcher class.
const MATCHER_OWNERS: [&str; 2] = ["Matchers", "CoreMatchers"];

fn is_matcher(expr: &Expr) -> bool {
    match expr {
        Expr::Call(call) => match &call.receiver {
            Receiver::Unqualified => true,
            Receiver::Named(_) => call
                .receiver
                .simple_name()
                .is_some_and(|owner| MATCHER_OWNERS.contains(&owner)),
            Receiver::Computed => false,
        },
        _ => false,
    }
}

/// String literal, concatenation, or a constant holding one.
fn is_text(expr: &Expr, scope: &ClassScope) -> bool {
    match expr {
        Expr::Str(_) | Expr::Concat(_) => true,
        Expr::Name(name) => scope
            .resolve(name)
            .is_some_and(|value| matches!(value, Expr::Str(_) | Expr::Concat(_))),
        _ => false,
    }
}

fn is_tautology(subject: &Expr, matcher: &Expr) -> bool {
    match subject {
        Expr::Bool(value) => expected_bool(matcher) == Some(*value),
        _ => false,
    }
}

fn expected_bool(matcher: &Expr) -> Option<bool> {
    match matcher {
        Expr::Bool(value) => Some(*value),
        Expr::Call(call) if EQUALITY_MATCHERS.contains(&call.name.as_str()) => {
            match call.args.as_slice() {
                [inner] => expected_bool(inner),
                _ => None,
            }
        }
        _ => None,
    }
}
