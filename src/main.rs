//! veneer binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match veneer::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            veneer::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
