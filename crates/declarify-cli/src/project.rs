//! Project directory I/O

use anyhow::Context;
use declarify_core::MigrationConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The two files of a project that take part in a migration
#[derive(Debug, Clone)]
pub struct Project {
    source_path: PathBuf,
    document_path: PathBuf,
}

impl Project {
    /// Locate the files named by `config` inside `root`
    #[must_use]
    pub fn new(root: &Path, config: &MigrationConfig) -> Self {
        Self {
            source_path: root.join(&config.source_file),
            document_path: root.join(&config.document_file),
        }
    }

    /// Path of the source file
    #[inline]
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Path of the document file
    #[inline]
    #[must_use]
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Read the source file
    ///
    /// # Errors
    /// Returns an error if the file is missing or unreadable.
    pub fn read_source(&self) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.source_path)
            .with_context(|| format!("cannot read {}", self.source_path.display()))
    }

    /// Read the document file; a missing file reads as empty
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn read_document(&self) -> anyhow::Result<String> {
        match std::fs::read_to_string(&self.document_path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.document_path.display(), "no document yet");
                Ok(String::new())
            }
            Err(err) => Err(err)
                .with_context(|| format!("cannot read {}", self.document_path.display())),
        }
    }

    /// Write the document, then the source
    ///
    /// Both texts must be final before this is called; a file whose text is
    /// unchanged is not rewritten.
    ///
    /// # Errors
    /// Returns an error naming the file that failed to write.
    pub fn write(&self, changes: &Changes<'_>) -> anyhow::Result<()> {
        write_if_changed(&self.document_path, changes.old_document, changes.new_document)?;
        write_if_changed(&self.source_path, changes.old_source, changes.new_source)?;
        Ok(())
    }
}

/// Old and new texts of both files
#[derive(Debug, Clone, Copy)]
pub struct Changes<'a> {
    /// Source text before the migration
    pub old_source: &'a str,
    /// Source text after the migration
    pub new_source: &'a str,
    /// Document text before the migration (empty if the file is missing)
    pub old_document: &'a str,
    /// Document text after the migration
    pub new_document: &'a str,
}

impl Changes<'_> {
    /// Check if either file changes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.old_source == self.new_source && self.old_document == self.new_document
    }
}

fn write_if_changed(path: &Path, old: &str, new: &str) -> anyhow::Result<()> {
    if old == new {
        return Ok(());
    }
    std::fs::write(path, new).with_context(|| format!("cannot write {}", path.display()))?;
    tracing::info!(path = %path.display(), "written");
    Ok(())
}
