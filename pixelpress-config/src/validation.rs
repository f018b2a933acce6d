//! Validation trait and field checks shared by the config domains

use crate::error::{ConfigError, ConfigResult};
use std::fmt::Display;

pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    /// Name used as the `domain` of validation errors
    fn domain_name(&self) -> &'static str;

    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::invalid(self.domain_name(), message)
    }
}

pub fn validate_required_string(value: &str, field: &str, domain: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(domain, format!("{field} must not be blank")));
    }
    Ok(())
}

pub fn validate_positive<T>(value: T, field: &str, domain: &str) -> ConfigResult<()>
where
    T: PartialOrd + Default + Display,
{
    if value > T::default() {
        Ok(())
    } else {
        Err(ConfigError::invalid(domain, format!("{field} must be positive (got {value})")))
    }
}

/// Inclusive on both ends.
pub fn validate_range<T>(value: T, min: T, max: T, field: &str, domain: &str) -> ConfigResult<()>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ConfigError::invalid(
            domain,
            format!("{field} must be within {min}..={max} (got {value})"),
        ));
    }
    Ok(())
}

/// Used for CORS origins, which must be absolute URLs unless they are `*`.
pub fn validate_url(url: &str, field: &str, domain: &str) -> ConfigResult<()> {
    validate_required_string(url, field, domain)?;
    url::Url::parse(url)
        .map(|_| ())
        .map_err(|e| ConfigError::invalid(domain, format!("{field} is not a URL: {e}")))
}

pub fn validate_enum_choice<T: AsRef<str>>(
    value: &str,
    choices: &[T],
    field: &str,
    domain: &str,
) -> ConfigResult<()> {
    if choices.iter().any(|c| c.as_ref().eq_ignore_ascii_case(value)) {
        return Ok(());
    }
    let allowed = choices.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ");
    Err(ConfigError::invalid(
        domain,
        format!("{field} '{value}' is not one of: {allowed}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1u32, "field", "test").is_ok());
        assert!(validate_positive(0u32, "field", "test").is_err());
    }

    #[test]
    fn test_validate_range_is_inclusive() {
        assert!(validate_range(5, 5, 60, "duration", "test").is_ok());
        assert!(validate_range(60, 5, 60, "duration", "test").is_ok());
        assert!(validate_range(4, 5, 60, "duration", "test").is_err());
        assert!(validate_range(61, 5, 60, "duration", "test").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://localhost:3000", "origin", "test").is_ok());
        assert!(validate_url("not a url", "origin", "test").is_err());
        assert!(validate_url("", "origin", "test").is_err());
    }

    #[test]
    fn test_validate_enum_choice_ignores_case() {
        assert!(validate_enum_choice("GET", &["GET", "POST"], "method", "test").is_ok());
        assert!(validate_enum_choice("get", &["GET", "POST"], "method", "test").is_ok());
        assert!(validate_enum_choice("TRACE", &["GET", "POST"], "method", "test").is_err());
    }

    #[test]
    fn test_errors_carry_domain() {
        let err = validate_positive(0, "queue_capacity", "processing").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref domain, .. } if domain == "processing"));
    }
}
