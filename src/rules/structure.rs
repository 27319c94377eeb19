use std::path::PathBuf;

use super::{Rule, RuleContext};
use crate::engine::Complaint;
use crate::model::{Invocation, Receiver, TestCase, TestClass};

const MOCKITO: &str = "Mockito";

/// Mockito entry points that create or stub a mock.
const MOCKERY_METHODS: [&str; 10] = [
    "mock",
    "spy",
    "when",
    "doReturn",
    "doThrow",
    "doAnswer",
    "doNothing",
    "doCallRealMethod",
    "mockStatic",
    "mockConstruction",
];

const TEST_SOURCE_ROOT: [&str; 3] = ["src", "test", "java"];

const NULLABLE: &str = "Nullable";

/// Test classes should not extend anything but an allowed base.
///
/// JUnit extensions are exempt.
pub struct RuleInheritanceInTests<'a> {
    class: &'a TestClass,
    context: &'a RuleContext,
}

impl<'a> RuleInheritanceInTests<'a> {
    pub const ID: &'static str = "RuleInheritanceInTests";

    #[must_use]
    pub const fn new(class: &'a TestClass, context: &'a RuleContext) -> Self {
        Self { class, context }
    }
}

impl Rule for RuleInheritanceInTests<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        let characteristics = self.class.characteristics();
        let parent = characteristics.parent.as_str();
        if characteristics.is_junit_extension
            || parent.is_empty()
            || self.context.allows_parent(parent)
        {
            return Vec::new();
        }
        vec![Complaint::on_class(
            Self::ID,
            self.class,
            format!("test class extends '{parent}'"),
        )]
    }
}

pub struct RuleTestCaseContainsMockery<'a> {
    class: &'a TestClass,
    case: &'a TestCase,
}

impl<'a> RuleTestCaseContainsMockery<'a> {
    pub const ID: &'static str = "RuleTestCaseContainsMockery";

    #[must_use]
    pub const fn new(class: &'a TestClass, case: &'a TestCase) -> Self {
        Self { class, case }
    }

    fn is_mockery(&self, call: &Invocation) -> bool {
        if !MOCKERY_METHODS.contains(&call.name.as_str()) {
            return false;
        }
        match &call.receiver {
            Receiver::Named(_) => call.receiver.simple_name() == Some(MOCKITO),
            Receiver::Unqualified => self.case_imports_mockito(&call.name),
            Receiver::Computed => false,
        }
    }

    fn case_imports_mockito(&self, method: &str) -> bool {
        self.case.scope().imports_statically(MOCKITO, method)
    }
}

impl Rule for RuleTestCaseContainsMockery<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        if self.case.invocations().iter().any(|call| self.is_mockery(call)) {
            vec![Complaint::on_case(
                Self::ID,
                self.class,
                self.case,
                "the test case contains mockery",
            )]
        } else {
            Vec::new()
        }
    }
}

/// A source-backed test class must live under `src/test/java` in the
/// directory of its package.
pub struct RuleCorrectTestCaseDirectory<'a> {
    class: &'a TestClass,
}

impl<'a> RuleCorrectTestCaseDirectory<'a> {
    pub const ID: &'static str = "RuleCorrectTestCaseDirectory";

    #[must_use]
    pub const fn new(class: &'a TestClass) -> Self {
        Self { class }
    }

    fn expected_dir(&self) -> PathBuf {
        let mut dir: PathBuf = TEST_SOURCE_ROOT.iter().collect();
        let package = self.class.package();
        if !package.is_empty() {
            dir.extend(package.split('.'));
        }
        dir
    }
}

impl Rule for RuleCorrectTestCaseDirectory<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        let path = self.class.path();
        if path.extension().is_none_or(|ext| ext != "java") {
            return Vec::new();
        }
        let dir = self.expected_dir();
        let expected = dir.join(format!("{}.java", self.class.name()));
        if path.ends_with(&expected) {
            return Vec::new();
        }
        let dir = dir.to_string_lossy().replace('\\', "/");
        vec![Complaint::on_class(
            Self::ID,
            self.class,
            format!("test class is not placed in {dir}"),
        )]
    }
}

pub struct RuleNullableAnnotation<'a> {
    class: &'a TestClass,
}

impl<'a> RuleNullableAnnotation<'a> {
    pub const ID: &'static str = "RuleNullableAnnotation";

    #[must_use]
    pub const fn new(class: &'a TestClass) -> Self {
        Self { class }
    }
}

impl Rule for RuleNullableAnnotation<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn complaints(&self) -> Vec<Complaint> {
        self.class
            .fields()
            .iter()
            .filter(|field| field.has_annotation(NULLABLE))
            .map(|field| {
                Complaint::on_class(
                    Self::ID,
                    self.class,
                    format!("field '{}' is annotated @Nullable", field.name),
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
