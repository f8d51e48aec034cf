//! Checks shared by the config sections
//!
//! Sections report every problem they find so one run lists them all.

pub use crate::error::ValidationError;

/// A config table that can check its own values
pub trait ConfigSection: Default {
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Table name, for log messages
    fn section_name(&self) -> &'static str;
}

/// Field checks returning a single [`ValidationError`]
pub struct Validator;

impl Validator {
    /// Rejects port 0, which would bind a random port
    pub fn port(value: u16, field: &str) -> Result<(), ValidationError> {
        if value == 0 {
            return Err(ValidationError::with_value(field, "must not be zero", value));
        }
        Ok(())
    }

    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "must not be empty"));
        }
        Ok(())
    }

    /// Requires `value` to parse as `T`, e.g. an `IpAddr`
    pub fn parses_as<T: std::str::FromStr>(value: &str, field: &str) -> Result<(), ValidationError> {
        match value.trim().parse::<T>() {
            Ok(_) => Ok(()),
            Err(_) => Err(ValidationError::with_value(field, "could not be parsed", value)),
        }
    }

    /// Keeps the failures of `results`
    pub fn collect_errors(
        results: impl IntoIterator<Item = Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<_> = results.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Joins errors into one line for logs and `ConfigError::ValidationError`
pub fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
