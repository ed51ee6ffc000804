//! Process-level entry helpers and error handling.

/// Report a fatal error and exit.
///
/// Prints the error with its full cause chain to stderr and exits with
/// code 1.
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!("Error: {error:?}");
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse the command line.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    crate::core::cli::CliArgs::parse()
}
