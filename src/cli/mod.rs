//! Command-line interface.

pub mod args;

pub use args::{parse_args, CliCommand};

/// Print version information.
pub fn print_version() {
    println!("treeline {}", env!("CARGO_PKG_VERSION"));
}

/// Print usage information.
pub fn print_usage() {
    println!("treeline - a streaming JSON viewer for the terminal");
    println!();
    println!("Usage: treeline <FILE>");
    println!();
    println!("Options:");
    println!("  -V, --version    Print version information");
    println!("  -h, --help       Print this message");
}
