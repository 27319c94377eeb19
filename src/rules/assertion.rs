use super::Rule;
use crate::engine::Complaint;
use crate::model::{TestCase, TestClass};

/// Every assertion must explain itself, and a case must assert something.
pub struct RuleAssertionMessage<'a> {
    class: &'a TestClass,
    case: &'a TestCase,
}

impl<'a> RuleAssertionMessage<'a> {
    pub const ID: &'static str = "RuleAssertionMessage";

    #[must_use]
    pub const fn new(class: &'a TestClass, case: &'a TestCase) -> Self {
        Self { class, case }
    }
}

impl Rule for RuleAssertionMessage<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        let assertions = self.case.assertions();
        if assertions.is_empty() {
            return vec![Complaint::on_case(
                Self::ID,
                self.class,
                self.case,
                "no assertion messages",
            )];
        }
        assertions
            .iter()
            .filter(|assertion| assertion.is_assertion && assertion.explanation.is_none())
            .map(|assertion| {
                Complaint::on_case(
                    Self::ID,
                    self.class,
                    self.case,
                    format!("assertion without message at line {}", assertion.line),
                )
            })
            .collect()
    }
}

/// Assertions that cannot fail, such as `assertTrue(true)`.
pub struct RuleLineHitter<'a> {
    class: &'a TestClass,
    case: &'a TestCase,
}

impl<'a> RuleLineHitter<'a> {
    pub const ID: &'static str = "RuleLineHitter";

    #[must_use]
    pub const fn new(class: &'a TestClass, case: &'a TestCase) -> Self {
        Self { class, case }
    }
}

impl Rule for RuleLineHitter<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        self.case
            .assertions()
            .iter()
            .filter(|assertion| assertion.is_line_hitter)
            .map(|assertion| {
                Complaint::on_case(
                    Self::ID,
                    self.class,
                    self.case,
                    format!("line hitter assertion at line {}", assertion.line),
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "assertion_tests.rs"]
mod tests;
