//! `declarify` binary: moves `setup.py` metadata into `setup.cfg`

use declarify_cli::{cli, logging, run_migrate, MigrateArgs};
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = cli::build().get_matches();

    match matches.subcommand() {
        Some(("migrate", args)) => {
            logging::init(args.get_count("verbose"));

            let result = MigrateArgs::from_matches(args).and_then(|args| {
                run_migrate(&args, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())
            });
            match result {
                Ok(outcome) => {
                    tracing::debug!(?outcome, "done");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("error: {err:#}");
                    ExitCode::FAILURE
                }
            }
        }
        _ => ExitCode::FAILURE,
    }
}
