use skillcheck_skills::CheckReport;
use thiserror::Error;

/// Process exit status for the `skillcheck` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    ValidationFailure = 1,
    ParseFailure = 2,
    Usage = 64,
}

impl ExitCode {
    /// Pick the exit status for a finished batch.
    ///
    /// Parse failures outrank validation failures; warnings only count when
    /// `fail_on_warnings` is set.
    pub fn for_reports(reports: &[CheckReport], fail_on_warnings: bool) -> Self {
        if reports.iter().any(|r| r.parse_error().is_some()) {
            ExitCode::ParseFailure
        } else if reports
            .iter()
            .any(|r| r.has_failures() || (fail_on_warnings && r.has_warnings()))
        {
            ExitCode::ValidationFailure
        } else {
            ExitCode::Success
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Config(_) | CliError::Io(_) => ExitCode::ParseFailure,
        }
    }
}
