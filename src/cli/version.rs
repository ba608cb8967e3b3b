//! Version and usage output.

/// The current version of gcs, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text for `--help`.
pub const USAGE: &str = "\
Usage: gcs [OPTIONS]

Terminal dashboard for the UAV ground control station.

Options:
  --url <BASE>      Ground station base URL (env GCS_BASE_URL)
  --device <ID>     Field device for display control (env GCS_DEVICE_ID)
  -h, --help        Print help
  -V, --version     Print version

Environment:
  GCS_WS_URL, GCS_API_KEY, GCS_STATE_DIR, GCS_LOG";

/// Handle the --version command.
pub fn handle_version_command() -> ! {
    println!("gcs {}", VERSION);
    std::process::exit(0)
}

/// Handle the --help command.
pub fn handle_help_command() -> ! {
    println!("{}", USAGE);
    std::process::exit(0)
}
