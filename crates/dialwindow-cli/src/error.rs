use anyhow::Error;
use dialwindow_config::ConfigError;
use dialwindow_core::time::TimeParseError;
use dialwindow_core::CoreError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("draft rejected with {0} validation error(s)")]
    Rejected(usize),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

/// A draft that failed validation. Details are already on stdout.
pub fn rejected(count: usize) -> Error {
    CliError::Rejected(count).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) | CliError::Rejected(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            });
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if cause.downcast_ref::<CoreError>().is_some()
            || cause.downcast_ref::<TimeParseError>().is_some()
            || cause.downcast_ref::<serde_json::Error>().is_some()
        {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir | ConfigError::Read { .. } => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidCallerIdField { .. }
        | ConfigError::DuplicateCallerId(_)
        | ConfigError::InvalidIvrProfile(_)
        | ConfigError::DuplicateIvrProfile(_)
        | ConfigError::InvalidTimezoneField { .. }
        | ConfigError::InvalidTimezoneOffset { .. }
        | ConfigError::DuplicateTimezone(_)
        | ConfigError::EmptyTimezones
        | ConfigError::UnknownDefaultTimezone(_)
        | ConfigError::InvalidScheduleTime(_)
        | ConfigError::InvalidScheduleWindow { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
