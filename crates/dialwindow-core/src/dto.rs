use crate::domain::Weekday;
use crate::rules::{Step, ValidationErrors};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReportDto {
    pub valid: bool,
    /// `None` when every rule ran.
    pub step: Option<Step>,
    pub errors: ValidationErrors,
}

impl ValidationReportDto {
    pub fn new(step: Option<Step>, errors: ValidationErrors) -> Self {
        Self {
            valid: errors.is_empty(),
            step,
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedWeekdaysDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weekdays: Vec<Weekday>,
    pub indices: Vec<u8>,
}
