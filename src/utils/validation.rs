use crate::utils::error::{Result, ScanError};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScanError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number<T>(field_name: &str, value: T, min_value: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min_value {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Accepts GraphQL names (`[_A-Za-z][_0-9A-Za-z]*`), the only form that may
/// be spliced into query text as an enum value.
pub fn validate_graphql_name(field_name: &str, value: &str) -> Result<()> {
    let re = Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").map_err(|e| ScanError::ConfigError {
        message: format!("Invalid name pattern: {}", e),
    })?;

    if !re.is_match(value) {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a GraphQL name ([_A-Za-z][_0-9A-Za-z]*)".to_string(),
        });
    }
    Ok(())
}

pub fn validate_ordered_bounds<T>(field_name: &str, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if min > max {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{}..={}", min, max),
            reason: "Lower bound must not exceed upper bound".to_string(),
        });
    }
    Ok(())
}
