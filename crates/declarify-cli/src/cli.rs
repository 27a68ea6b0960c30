//! Command-line definition

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use declarify_core::MigrationConfig;
use std::path::PathBuf;

/// Build the `declarify` command
#[must_use]
pub fn build() -> Command {
    Command::new("declarify")
        .version(declarify_core::VERSION)
        .about("Move literal setup.py metadata into setup.cfg")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more (-v debug, -vv trace); RUST_LOG overrides"),
        )
        .subcommand(
            Command::new("migrate")
                .about("Show (or apply) the setup.py -> setup.cfg migration for a project")
                .arg(
                    Arg::new("project-dir")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory containing setup.py"),
                )
                .arg(
                    Arg::new("apply")
                        .short('a')
                        .long("apply")
                        .action(ArgAction::SetTrue)
                        .help("Write the changes instead of only showing them"),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .action(ArgAction::SetTrue)
                        .help("Print which keywords were migrated, left in place or not recognized"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .value_name("NAME")
                        .help("Name of the call to migrate [default: setup]"),
                )
                .arg(
                    Arg::new("source-file")
                        .long("source-file")
                        .value_name("NAME")
                        .help("Source file inside the project [default: setup.py]"),
                )
                .arg(
                    Arg::new("document-file")
                        .long("document-file")
                        .value_name("NAME")
                        .help("Document file inside the project [default: setup.cfg]"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("PATH")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML file with target_function, source_file and document_file"),
                ),
        )
}

/// Parsed `migrate` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateArgs {
    /// Project directory
    pub project_dir: PathBuf,
    /// Write files instead of printing the proposal only
    pub apply: bool,
    /// Print the keyword report
    pub report: bool,
    /// Effective run configuration
    pub config: MigrationConfig,
}

impl MigrateArgs {
    /// Read the `migrate` subcommand's matches
    ///
    /// Flags override values loaded with `--config`.
    ///
    /// # Errors
    /// Returns an error if the `--config` file cannot be loaded.
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(path) => MigrationConfig::from_file(path)?,
            None => MigrationConfig::new(),
        };
        if let Some(target) = matches.get_one::<String>("target") {
            config = config.with_target_function(target);
        }
        if let Some(name) = matches.get_one::<String>("source-file") {
            config = config.with_source_file(name);
        }
        if let Some(name) = matches.get_one::<String>("document-file") {
            config = config.with_document_file(name);
        }

        let project_dir = matches
            .get_one::<PathBuf>("project-dir")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing project directory"))?;

        Ok(Self {
            project_dir,
            apply: matches.get_flag("apply"),
            report: matches.get_flag("report"),
            config,
        })
    }
}
