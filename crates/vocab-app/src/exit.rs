use std::process::ExitCode;

use vocab_core::error::EnrichError;

/// Process exit codes of the `vocab` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    Internal = 1,
    BadRequest = 2,
    /// The not-found record is still printed
    NotFound = 3,
    Interrupted = 130,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<&EnrichError> for CliExitCode {
    fn from(err: &EnrichError) -> Self {
        match err {
            EnrichError::BadRequest(_) => CliExitCode::BadRequest,
            EnrichError::NotFound(_) => CliExitCode::NotFound,
            EnrichError::Internal(_) => CliExitCode::Internal,
        }
    }
}
