use crate::utils::error::{BookingError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BookingError::InvalidFieldValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BookingError::InvalidFieldValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BookingError::InvalidFieldValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BookingError::InvalidFieldValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BookingError::InvalidFieldValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 聯絡表單的必填欄位：空白字串視為未填
pub fn validate_required_text(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::MissingFieldError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidFieldValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(BookingError::InvalidFieldValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Allowed values: {}", allowed.join(", ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("relay.endpoint", "https://formsubmit.co/ajax/shop").is_ok());
        assert!(validate_url("relay.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("relay.endpoint", "").is_err());
        assert!(validate_url("relay.endpoint", "invalid-url").is_err());
        assert!(validate_url("relay.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("name", "Jane").is_ok());
        assert!(matches!(
            validate_required_text("phone", "   "),
            Err(BookingError::MissingFieldError { field }) if field == "phone"
        ));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("relay.template", "table", &["table", "basic", "box"]).is_ok());
        assert!(validate_one_of("relay.template", "fancy", &["table", "basic", "box"]).is_err());
    }
}
