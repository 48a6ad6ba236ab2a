pub mod derivation;
pub mod validation;

pub use derivation::{sync_enabled_days, weekdays_in_range, WeekdaySet};
pub use validation::{
    is_valid_retry_interval, FieldKey, Step, ValidationErrors, Validator, MAX_ATTEMPTS,
    MAX_CONCURRENCY, MIN_ATTEMPTS, MIN_CONCURRENCY,
};
