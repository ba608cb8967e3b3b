//! CLI module for gcs.
//!
//! The dispatcher runs early in main() so `--version` and `--help` exit
//! before the terminal is touched:
//!
//! ```ignore
//! use gcs::cli::{parse_args, run_cli_command};
//!
//! let options = run_cli_command(parse_args(std::env::args()));
//! // options carries --url / --device overrides for the dashboard
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions};
pub use version::{handle_help_command, handle_version_command, USAGE, VERSION};

/// Handle informational commands, returning run options otherwise.
///
/// `Version` and `Help` never return; they print and exit.
pub fn run_cli_command(command: CliCommand) -> RunOptions {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => handle_help_command(),
        CliCommand::RunTui(options) => options,
    }
}
