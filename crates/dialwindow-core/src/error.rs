use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid weekday: {0}")]
    InvalidWeekday(String),
    #[error("invalid step: {0}")]
    InvalidStep(String),
    #[error("invalid phone number status: {0}")]
    InvalidPhoneNumberStatus(String),
    #[error("invalid field: {0}")]
    InvalidField(String),
}
