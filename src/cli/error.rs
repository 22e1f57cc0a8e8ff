//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),

    #[error("catalog has {0} problem(s)")]
    CheckFailed(usize),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::CheckFailed(_) => crate::exitcode::DATAERR,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::NoCatalog => crate::exitcode::USAGE,
                InfraError::CatalogNotFound(_) => crate::exitcode::NOINPUT,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(DomainError::CyclicHierarchy { .. })
                    | ApplicationError::Domain(DomainError::DuplicateGroupId(_)) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::InvalidClick(_) => crate::exitcode::USAGE,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::DATAERR,
                },
            },
        }
    }
}
