//! Request DTOs for link creation and update.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(url(message = "invalid URL"))]
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(url(message = "invalid URL"))]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_request_validation() {
        let valid = ShortenRequest {
            url: "https://example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = ShortenRequest {
            url: "not a url".to_string(),
        };
        assert!(invalid.validate().is_err());
    }
}
