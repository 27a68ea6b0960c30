//! declarify command-line front end
//!
//! `declarify migrate <PROJECT_DIR>` prints the proposed `setup.cfg` and
//! `setup.py` changes as unified diffs; with `--apply` it writes them.

#![warn(unreachable_pub)]

pub mod cli;
pub mod diff;
pub mod logging;
pub mod project;

use anyhow::Context;
use declarify_core::{MigrationStatus, Migrator};
use project::{Changes, Project};
use std::io::Write;

pub use cli::MigrateArgs;

/// How a `migrate` run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The call holds nothing that can be migrated
    NoChanges,
    /// Changes were printed but not written
    Proposed,
    /// Changes were written
    Written,
    /// The source has no call to the target function
    CallNotFound,
    /// The source has several calls to the target function
    AmbiguousCall {
        /// Number of matching calls
        count: usize,
    },
}

/// Run `migrate`, printing diffs and messages to `out` and notices to `err`
///
/// Both new texts are computed before anything is written.
///
/// # Errors
/// Returns an error if a file cannot be read or written, or if the
/// migration fails (unparsable input, repeated keyword).
pub fn run_migrate<O: Write, E: Write>(
    args: &MigrateArgs,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<Outcome> {
    let config = &args.config;
    let project = Project::new(&args.project_dir, config);
    let old_source = project.read_source()?;
    let old_document = project.read_document()?;

    let migration = Migrator::new(config.clone()).migrate(&old_source, &old_document)?;

    match migration.status() {
        MigrationStatus::Migrated => {}
        MigrationStatus::CallNotFound => {
            writeln!(
                err,
                "Could not find {}() call in {}",
                config.target_function, config.source_file
            )?;
            return Ok(Outcome::CallNotFound);
        }
        MigrationStatus::AmbiguousCall { count } => {
            writeln!(
                err,
                "Found {count} {}() calls in {}; not guessing which one to migrate",
                config.target_function, config.source_file
            )?;
            return Ok(Outcome::AmbiguousCall { count });
        }
    }

    let changes = Changes {
        old_source: &old_source,
        new_source: migration.source(),
        old_document: &old_document,
        new_document: migration.document(),
    };
    write!(
        out,
        "{}",
        diff::unified(changes.old_document, changes.new_document, &config.document_file)
    )?;
    write!(
        out,
        "{}",
        diff::unified(changes.old_source, changes.new_source, &config.source_file)
    )?;
    if args.report {
        write!(out, "{}", migration.report())?;
    }

    let outcome = if migration.report().is_noop() || changes.is_empty() {
        writeln!(out, "No changes")?;
        Outcome::NoChanges
    } else if args.apply {
        project
            .write(&changes)
            .context("migration computed but not fully written")?;
        writeln!(out, "Written")?;
        Outcome::Written
    } else {
        writeln!(out, "Rerun with --apply to write these changes")?;
        Outcome::Proposed
    };
    Ok(outcome)
}
