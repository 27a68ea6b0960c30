//! declarify core
//!
//! Moves literal `setup()` keyword arguments from `setup.py` into
//! `setup.cfg`, leaving everything it cannot prove simple in place.
//!
//! # Core Operations
//!
//! - **Lookup**: [`fields::lookup`] maps a keyword to its `(section, key, encoding)`
//! - **Migrate**: [`Migrator::migrate`] runs one pure migration over two texts
//! - **Report**: [`MigrationReport`] partitions the call's keywords into
//!   migrated, opaque and unrecognized
//!
//! # Example
//!
//! ```rust
//! use declarify_core::{migrate, MigrationStatus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let migration = migrate("setup(name=\"demo\", url=get_url())\n", "")?;
//!
//! assert_eq!(migration.status(), MigrationStatus::Migrated);
//! assert_eq!(migration.source(), "setup(url=get_url())\n");
//! assert_eq!(migration.document(), "[metadata]\nname = demo\n");
//! assert!(migration.report().opaque().contains("url"));
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod fields;
pub mod orchestrator;
pub mod report;
pub mod state_machine;

// Re-exports for convenience
pub use config::MigrationConfig;
pub use error::{ConfigError, MigrateError};
pub use fields::{lookup, FieldRule, FIELD_RULES};
pub use orchestrator::{migrate, Migration, MigrationStatus, Migrator};
pub use report::MigrationReport;
pub use state_machine::MigrationState;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
