//! Command-line argument parsing.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage information
    Usage,
    /// View a JSON file in the TUI (default)
    View(PathBuf),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Returns
///
/// The `CliCommand` to execute based on the arguments. Flags win over
/// positional arguments; the first positional argument is the file to view.
///
/// # Examples
///
/// ```
/// use treeline::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["treeline".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut file: Option<PathBuf> = None;
    for arg in args.skip(1) {
        // Skip the program name
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Usage,
            _ => {
                if file.is_none() {
                    file = Some(PathBuf::from(arg));
                }
            }
        }
    }
    match file {
        Some(path) => CliCommand::View(path),
        None => CliCommand::Usage,
    }
}
