//! Adds accented glyphs to the IBM Selectric TrueType font.

use selectric_accents::{core, logging};

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = logging::init(cli_args.verbose) {
        eprintln!("{error}");
    }
    if let Err(error) = core::runner::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
