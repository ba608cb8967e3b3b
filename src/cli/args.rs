//! Command-line argument parsing for the gcs dashboard.

/// Overrides taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// `--url <base>`
    pub base_url: Option<String>,
    /// `--device <id>`
    pub device_id: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the dashboard (default)
    RunTui(RunOptions),
}

/// Parse command-line arguments and return the appropriate command.
///
/// Unknown flags are ignored. A value flag without a value is ignored too.
///
/// # Examples
///
/// ```
/// use gcs::cli::args::{parse_args, CliCommand, RunOptions};
///
/// let args = vec!["gcs".to_string(), "--device".to_string(), "rpi-01".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()),
///     CliCommand::RunTui(RunOptions {
///         base_url: None,
///         device_id: Some("rpi-01".to_string()),
///     })
/// );
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" => options.base_url = args.next().filter(|v| !v.starts_with('-')),
            "--device" => options.device_id = args.next().filter(|v| !v.starts_with('-')),
            other => {
                if let Some(url) = other.strip_prefix("--url=") {
                    options.base_url = Some(url.to_string());
                } else if let Some(device) = other.strip_prefix("--device=") {
                    options.device_id = Some(device.to_string());
                }
            }
        }
    }
    CliCommand::RunTui(options)
}
