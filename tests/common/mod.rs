#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the testcop binary.
#[macro_export]
macro_rules! testcop {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("testcop"))
    };
}

pub const SOURCES: &str = "src/test/java";
pub const CLASSES: &str = "target/test-classes";

/// A test class every rule accepts.
pub const CLEAN_TEST: &str = r#"package com.example;

import org.junit.jupiter.api.Assertions;
import org.junit.jupiter.api.Test;

class CartTest {
    @Test
    void removesItem() {
        Assertions.assertEquals(0, new Cart().size(), "cart is empty");
    }
}
"#;

/// Imperative name, unexplained assertion and a line hitter.
pub const NOISY_TEST: &str = r#"package com.example;

import static org.junit.jupiter.api.Assertions.assertTrue;

import org.junit.jupiter.api.Test;

class OrderTest {
    @Test
    void createOrder() {
        assertTrue(true);
    }
}
"#;

/// Creates a temporary Maven-style project for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a fixture with empty source and class roots.
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.create_dir(SOURCES);
        fixture.create_dir(CLASSES);
        fixture
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Creates a Java test source under the source root.
    pub fn create_test_source(&self, relative_path: &str, content: &str) {
        self.create_file(&format!("{SOURCES}/{relative_path}"), content);
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates `.testcop.toml`.
    pub fn create_config(&self, content: &str) {
        self.create_file(".testcop.toml", content);
    }
}
