//! Testing utilities for the declarify workspace
//!
//! Shared fixtures and a throwaway project directory.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `setup.py` whose keywords are all literal
pub const SETUP_PY_LITERAL: &str = r#"from setuptools import setup

setup(
    name="demo",
    version="1.0",
    install_requires=["a", "b"],
)
"#;

/// `setup.py` with a computed `url`
pub const SETUP_PY_COMPUTED_URL: &str = r#"from setuptools import setup

setup(
    name="demo",
    url=get_url(),
)
"#;

/// `setup.py` with a keyword that has no `setup.cfg` field
pub const SETUP_PY_UNKNOWN_KEYWORD: &str = r#"from setuptools import setup

setup(
    name="demo",
    fooblat="x",
)
"#;

/// `setup.py` without any `setup()` call
pub const SETUP_PY_NO_CALL: &str = r#"import os

print(os.getcwd())
"#;

/// A realistic `setup.py` mixing every kind of keyword
pub const SETUP_PY_MIXED: &str = r#"#!/usr/bin/env python
from setuptools import find_packages, setup

with open("README.md") as f:
    readme = f.read()

setup(
    name="demo",  # distribution name
    version="1.0",
    description="A demo package",
    long_description=readme,
    long_description_content_type="text/markdown",
    author="Jane Doe", author_email="jane@example.com",
    url="https://example.com/" + "demo",
    license=None,
    classifiers=[
        "Programming Language :: Python :: 3",
        "License :: OSI Approved :: MIT License",
    ],
    project_urls={
        "Tracker": "https://example.com/issues",
    },
    packages=find_packages(exclude=["tests"]),
    python_requires=">=3.8",
    install_requires=("requests>=2",),
    include_package_data=True,
    zip_safe=False,
    test_suite="??",
)
"#;

/// `setup.cfg` with comments around an existing `name`
pub const SETUP_CFG_EXISTING: &str = "# Packaging metadata\n\
[metadata]\n\
# keep this comment\n\
name = old\n\
\n\
[bdist_wheel]\n\
universal = 1\n";

/// Project directory on disk, removed on drop
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Project containing `setup.py` and, if given, `setup.cfg`
    pub fn with_files(setup_py: &str, setup_cfg: Option<&str>) -> Self {
        let project = Self::new();
        project.write("setup.py", setup_py);
        if let Some(cfg) = setup_cfg {
            project.write("setup.cfg", cfg);
        }
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.file(name), contents).unwrap();
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.file(name).exists()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
