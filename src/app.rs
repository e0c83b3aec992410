//! Process entry shared by the binaries.

use std::fmt;
use std::process::ExitCode;

use tracing::error;

use crate::logging::init_logging;

/// Install logging, run `body` and turn its outcome into the process exit code.
pub fn run_main<E, F>(body: F) -> ExitCode
where
    E: fmt::Display,
    F: FnOnce() -> Result<(), E>,
{
    init_logging();
    exit_code(body())
}

/// `SUCCESS` for `Ok`; otherwise the error chain is logged and `FAILURE` returned.
pub fn exit_code<E: fmt::Display>(result: Result<(), E>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
