use super::{Rule, RuleContext};
use crate::engine::Complaint;
use crate::model::{TestCase, TestClass};
use crate::naming::{is_camel_case, is_present_tense, words};
use crate::suppression;

const PRESENT_TENSE_MESSAGE: &str = "the test name has to be written using present tense";

/// Shortest run of one repeated character that counts as spam.
const SPAM_CHAR_RUN: usize = 4;

/// The case name must read as third-person present tense (`removesItem`).
pub struct RulePresentTense<'a> {
    class: &'a TestClass,
    case: &'a TestCase,
}

impl<'a> RulePresentTense<'a> {
    pub const ID: &'static str = "RulePresentTense";

    #[must_use]
    pub const fn new(class: &'a TestClass, case: &'a TestCase) -> Self {
        Self { class, case }
    }
}

impl Rule for RulePresentTense<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        if is_present_tense(self.case.name()) {
            Vec::new()
        } else {
            vec![Complaint::on_case(
                Self::ID,
                self.class,
                self.case,
                PRESENT_TENSE_MESSAGE,
            )]
        }
    }
}

/// Class-level present-tense check: one complaint per failing case.
///
/// Cases that suppress this rule or [`RulePresentTense`] themselves are
/// skipped.
pub struct RuleAllTestsInPresentSimple<'a> {
    class: &'a TestClass,
}

impl<'a> RuleAllTestsInPresentSimple<'a> {
    pub const ID: &'static str = "RuleAllTestsInPresentSimple";

    #[must_use]
    pub const fn new(class: &'a TestClass) -> Self {
        Self { class }
    }

    fn skips(case: &TestCase) -> bool {
        let own = case.own_suppressed();
        suppression::contains(own, Self::ID) || suppression::contains(own, RulePresentTense::ID)
    }
}

impl Rule for RuleAllTestsInPresentSimple<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        self.class
            .cases()
            .iter()
            .filter(|case| !Self::skips(case) && !is_present_tense(case.name()))
            .map(|case| Complaint::on_case(Self::ID, self.class, case, PRESENT_TENSE_MESSAGE))
            .collect()
    }
}

/// POS-backed present-simple check, accepting plural subjects
/// (`theyBuildModel`).
pub struct RulePresentSimpleMl<'a> {
    class: &'a TestClass,
    case: &'a TestCase,
    context: &'a RuleContext,
}

impl<'a> RulePresentSimpleMl<'a> {
    pub const ID: &'static str = "RulePresentSimpleMl";

    #[must_use]
    pub const fn new(class: &'a TestClass, case: &'a TestCase, context: &'a RuleContext) -> Self {
        Self {
            class,
            case,
            context,
        }
    }
}

impl Rule for RulePresentSimpleMl<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        let message = match self.context.model.classifier() {
            Ok(classifier) if classifier.is_present_simple(self.case.name()) => return Vec::new(),
            Ok(_) => "the test name has to be written using present simple".to_string(),
            Err(_) => format!("{} unavailable", Self::ID),
        };
        vec![Complaint::on_case(Self::ID, self.class, self.case, message)]
    }
}

pub struct RuleNotCamelCase<'a> {
    class: &'a TestClass,
    case: &'a TestCase,
}

impl<'a> RuleNotCamelCase<'a> {
    pub const ID: &'static str = "RuleNotCamelCase";

    #[must_use]
    pub const fn new(class: &'a TestClass, case: &'a TestCase) -> Self {
        Self { class, case }
    }
}

impl Rule for RuleNotCamelCase<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        if is_camel_case(self.case.name()) {
            Vec::new()
        } else {
            vec![Complaint::on_case(
                Self::ID,
                self.class,
                self.case,
                "the test name has to be written in camelCase",
            )]
        }
    }
}

/// Rejects names such as `removesRemovesItem` or `aaaa`.
pub struct RuleNotSpam<'a> {
    class: &'a TestClass,
    case: &'a TestCase,
}

impl<'a> RuleNotSpam<'a> {
    pub const ID: &'static str = "RuleNotSpam";

    #[must_use]
    pub const fn new(class: &'a TestClass, case: &'a TestCase) -> Self {
        Self { class, case }
    }
}

/// Whether a name repeats a word back to back or a character
/// [`SPAM_CHAR_RUN`] times in a row.
#[must_use]
pub fn is_spam(name: &str) -> bool {
    let lexed = words(name);
    if lexed.windows(2).any(|pair| pair[0] == pair[1]) {
        return true;
    }
    let mut run = 0;
    let mut prev = None;
    for ch in name.chars().map(|c| c.to_ascii_lowercase()) {
        run = if prev == Some(ch) { run + 1 } else { 1 };
        if run >= SPAM_CHAR_RUN {
            return true;
        }
        prev = Some(ch);
    }
    false
}

impl Rule for RuleNotSpam<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        if is_spam(self.case.name()) {
            vec![Complaint::on_case(
                Self::ID,
                self.class,
                self.case,
                "the test name has to be meaningful, not spam",
            )]
        } else {
            Vec::new()
        }
    }
}

pub struct RuleNotContainsTestWord<'a> {
    class: &'a TestClass,
    case: &'a TestCase,
}

impl<'a> RuleNotContainsTestWord<'a> {
    pub const ID: &'static str = "RuleNotContainsTestWord";

    #[must_use]
    pub const fn new(class: &'a TestClass, case: &'a TestCase) -> Self {
        Self { class, case }
    }
}

impl Rule for RuleNotContainsTestWord<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        if words(self.case.name()).iter().any(|word| word == "test") {
            vec![Complaint::on_case(
                Self::ID,
                self.class,
                self.case,
                "the test name doesn't have to contain the word 'test'",
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
