//! Error types.
//!
//! - `CalcError`: typed failures of the pure calculation core
//! - `AppError`: process-level error carrying the exit code for `main`

use thiserror::Error;

/// Exit code for invalid inputs, usage, configuration, and file I/O.
pub const EXIT_INVALID: u8 = 2;
/// Exit code for terminal (TUI) failures.
pub const EXIT_TERMINAL: u8 = 4;

/// A calculation that cannot produce a finite, meaningful result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid sweep: {0}")]
    InvalidSweep(String),
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        AppError::new(EXIT_INVALID, err.to_string())
    }
}
