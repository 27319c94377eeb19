use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use super::{Characteristics, Field, Origin, TestCase};

const DEFAULT_FAKE_NAME: &str = "FakeClassTest";

/// A class holding test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestClass {
    name: String,
    package: String,
    path: PathBuf,
    line: Option<usize>,
    cases: Vec<TestCase>,
    fields: Vec<Field>,
    suppressed: IndexSet<String>,
    characteristics: Characteristics,
    origin: Origin,
}

impl TestClass {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, origin: Origin) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            path: path.into(),
            line: None,
            cases: Vec::new(),
            fields: Vec::new(),
            suppressed: IndexSet::new(),
            characteristics: Characteristics::default(),
            origin,
        }
    }

    /// Synthetic class named `FakeClassTest`, placed where a test source
    /// would live.
    #[must_use]
    pub fn fake() -> Self {
        Self::fake_named(DEFAULT_FAKE_NAME)
    }

    #[must_use]
    pub fn fake_named(name: &str) -> Self {
        let path = Path::new("src/test/java").join(format!("{name}.java"));
        Self::new(name, path, Origin::Synthetic)
    }

    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add cases; they inherit the class suppressions.
    #[must_use]
    pub fn with_cases(mut self, cases: impl IntoIterator<Item = TestCase>) -> Self {
        for mut case in cases {
            case.inherit_suppressed(&self.suppressed);
            self.cases.push(case);
        }
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Add class-level suppressions, propagating them to existing cases.
    #[must_use]
    pub fn with_suppressed<I, S>(mut self, suppressed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suppressed
            .extend(suppressed.into_iter().map(Into::into));
        for case in &mut self.cases {
            case.inherit_suppressed(&self.suppressed);
        }
        self
    }

    #[must_use]
    pub fn with_characteristics(mut self, characteristics: Characteristics) -> Self {
        self.characteristics = characteristics;
        self
    }

    #[must_use]
    pub const fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Fully qualified name (`com.example.FooTest`).
    #[must_use]
    pub fn fqn(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub const fn suppressed(&self) -> &IndexSet<String> {
        &self.suppressed
    }

    #[must_use]
    pub const fn characteristics(&self) -> &Characteristics {
        &self.characteristics
    }

    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// Replace everything the source view does not know about with the
    /// compiled view: fields and characteristics come from `compiled`.
    #[must_use]
    pub fn merge_compiled(mut self, compiled: Self) -> Self {
        if !compiled.fields.is_empty() {
            self.fields = compiled.fields;
        }
        self.characteristics = compiled.characteristics;
        self.origin = Origin::Merged;
        self
    }
}
