use std::sync::LazyLock;

use regex::Regex;

use super::{
    Rule, RuleAllTestsInPresentSimple, RuleAssertionMessage, RuleContext,
    RuleCorrectTestCaseDirectory, RuleInheritanceInTests, RuleLineHitter, RuleNotCamelCase,
    RuleNotContainsTestWord, RuleNotSpam, RuleNullableAnnotation, RulePresentSimpleMl,
    RulePresentTense, RuleTestCaseContainsMockery,
};
use crate::model::{TestCase, TestClass};

static RULE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Rule[A-Z][A-Za-z0-9]+$").expect("valid rule id pattern"));

type ClassFactory = for<'a> fn(&'a TestClass, &'a RuleContext) -> Box<dyn Rule + 'a>;
type CaseFactory =
    for<'a> fn(&'a TestClass, &'a TestCase, &'a RuleContext) -> Box<dyn Rule + 'a>;

/// What a rule is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Class,
    Case,
}

#[derive(Clone, Copy)]
enum Factory {
    Class(ClassFactory),
    Case(CaseFactory),
}

/// A registered rule: its identifier and how to bind it to a target.
#[derive(Clone, Copy)]
pub struct RuleDescriptor {
    pub id: &'static str,
    pub description: &'static str,
    factory: Factory,
}

impl RuleDescriptor {
    #[must_use]
    pub const fn scope(&self) -> Scope {
        match self.factory {
            Factory::Class(_) => Scope::Class,
            Factory::Case(_) => Scope::Case,
        }
    }

    /// Bind a class-scoped rule; `None` for case-scoped rules.
    #[must_use]
    pub fn for_class<'a>(
        &self,
        class: &'a TestClass,
        context: &'a RuleContext,
    ) -> Option<Box<dyn Rule + 'a>> {
        match self.factory {
            Factory::Class(make) => Some(make(class, context)),
            Factory::Case(_) => None,
        }
    }

    /// Bind a case-scoped rule; `None` for class-scoped rules.
    #[must_use]
    pub fn for_case<'a>(
        &self,
        class: &'a TestClass,
        case: &'a TestCase,
        context: &'a RuleContext,
    ) -> Option<Box<dyn Rule + 'a>> {
        match self.factory {
            Factory::Case(make) => Some(make(class, case, context)),
            Factory::Class(_) => None,
        }
    }
}

impl std::fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("id", &self.id)
            .field("scope", &self.scope())
            .finish_non_exhaustive()
    }
}

static REGISTRY: [RuleDescriptor; 12] = [
    RuleDescriptor {
        id: RulePresentTense::ID,
        description: "test names are written in third-person present tense",
        factory: Factory::Case(present_tense),
    },
    RuleDescriptor {
        id: RuleAllTestsInPresentSimple::ID,
        description: "every test name of a class is written in present tense",
        factory: Factory::Class(all_tests_in_present_simple),
    },
    RuleDescriptor {
        id: RulePresentSimpleMl::ID,
        description: "test names are present simple according to the POS model",
        factory: Factory::Case(present_simple_ml),
    },
    RuleDescriptor {
        id: RuleNotCamelCase::ID,
        description: "test names are camelCase words",
        factory: Factory::Case(not_camel_case),
    },
    RuleDescriptor {
        id: RuleNotSpam::ID,
        description: "test names do not repeat words or characters",
        factory: Factory::Case(not_spam),
    },
    RuleDescriptor {
        id: RuleNotContainsTestWord::ID,
        description: "test names do not contain the word 'test'",
        factory: Factory::Case(not_contains_test_word),
    },
    RuleDescriptor {
        id: RuleAssertionMessage::ID,
        description: "every assertion carries an explanation",
        factory: Factory::Case(assertion_message),
    },
    RuleDescriptor {
        id: RuleLineHitter::ID,
        description: "assertions are able to fail",
        factory: Factory::Case(line_hitter),
    },
    RuleDescriptor {
        id: RuleInheritanceInTests::ID,
        description: "test classes do not extend other classes",
        factory: Factory::Class(inheritance_in_tests),
    },
    RuleDescriptor {
        id: RuleTestCaseContainsMockery::ID,
        description: "test cases do not create or stub Mockito mocks",
        factory: Factory::Case(test_case_contains_mockery),
    },
    RuleDescriptor {
        id: RuleCorrectTestCaseDirectory::ID,
        description: "test sources live under src/test/java in their package directory",
        factory: Factory::Class(correct_test_case_directory),
    },
    RuleDescriptor {
        id: RuleNullableAnnotation::ID,
        description: "test class fields are not @Nullable",
        factory: Factory::Class(nullable_annotation),
    },
];

/// All registered rules in a stable order.
#[must_use]
pub fn registry() -> &'static [RuleDescriptor] {
    &REGISTRY
}

#[must_use]
pub fn find(id: &str) -> Option<&'static RuleDescriptor> {
    REGISTRY.iter().find(|descriptor| descriptor.id == id)
}

/// Whether `id` has the shape of a rule identifier (`RuleNotSpam`).
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    RULE_ID.is_match(id)
}

fn present_tense<'a>(
    class: &'a TestClass,
    case: &'a TestCase,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RulePresentTense::new(class, case))
}

fn all_tests_in_present_simple<'a>(
    class: &'a TestClass,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleAllTestsInPresentSimple::new(class))
}

fn present_simple_ml<'a>(
    class: &'a TestClass,
    case: &'a TestCase,
    context: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RulePresentSimpleMl::new(class, case, context))
}

fn not_camel_case<'a>(
    class: &'a TestClass,
    case: &'a TestCase,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleNotCamelCase::new(class, case))
}

fn not_spam<'a>(
    class: &'a TestClass,
    case: &'a TestCase,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleNotSpam::new(class, case))
}

fn not_contains_test_word<'a>(
    class: &'a TestClass,
    case: &'a TestCase,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleNotContainsTestWord::new(class, case))
}

fn assertion_message<'a>(
    class: &'a TestClass,
    case: &'a TestCase,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleAssertionMessage::new(class, case))
}

fn line_hitter<'a>(
    class: &'a TestClass,
    case: &'a TestCase,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleLineHitter::new(class, case))
}

fn inheritance_in_tests<'a>(
    class: &'a TestClass,
    context: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleInheritanceInTests::new(class, context))
}

fn test_case_contains_mockery<'a>(
    class: &'a TestClass,
    case: &'a TestCase,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleTestCaseContainsMockery::new(class, case))
}

fn correct_test_case_directory<'a>(
    class: &'a TestClass,
    _: &'a RuleContext,
) -> Box<dyn Rule + 'a> {
    Box::new(RuleCorrectTestCaseDirectory::new(class))
}

fn nullable_annotation<'a>(class: &'a TestClass, _: &'a RuleContext) -> Box<dyn Rule + 'a> {
    Box::new(RuleNullableAnnotation::new(class))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
