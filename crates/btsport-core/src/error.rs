//! Error types for the BT Sport resolver
//!
//! One error enum covers transport failures, site layout drift and
//! upstream stream errors. Serializes to its display string so it can
//! cross the Tauri command boundary.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all BT Sport operations
///
/// Note that a failed site login is not an error: [`crate::BtSportScraper::login`]
/// returns `Ok(None)` when the sign-in endpoint hands back no session cookie.
#[derive(Error, Debug)]
pub enum BtSportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse a page or an embedded literal
    #[error("Failed to parse: {0}")]
    ParseError(String),

    /// Failed to decode a JSON body
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Expected cookie was not set by the server
    #[error("Cookie not found: {0}")]
    CookieNotFound(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Caller supplied an argument the operation cannot work with
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The CDN refused to resolve a live stream
    ///
    /// Carries the upstream `errorDescription` and `message` untouched
    /// so they can be shown to the user.
    #[error("Stream unavailable: {description} ({message})")]
    StreamUnavailable { description: String, message: String },
}

impl Serialize for BtSportError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for BT Sport operations
pub type Result<T> = std::result::Result<T, BtSportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse_error() {
        let error = BtSportError::ParseError("pagedetails marker not found".to_string());
        assert_eq!(error.to_string(), "Failed to parse: pagedetails marker not found");
    }

    #[test]
    fn test_error_display_element_not_found() {
        let error = BtSportError::ElementNotFound("SAMLResponse".to_string());
        assert_eq!(error.to_string(), "Element not found: SAMLResponse");
    }

    #[test]
    fn test_error_display_cookie_not_found() {
        let error = BtSportError::CookieNotFound("avs_cookie".to_string());
        assert_eq!(error.to_string(), "Cookie not found: avs_cookie");
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let error = BtSportError::InvalidArgument("page must be at least 1".to_string());
        assert_eq!(error.to_string(), "Invalid argument: page must be at least 1");
    }

    #[test]
    fn test_error_display_stream_unavailable() {
        let error = BtSportError::StreamUnavailable {
            description: "OUT_OF_REGION".to_string(),
            message: "Not available in your region".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Stream unavailable: OUT_OF_REGION (Not available in your region)"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = BtSportError::from(json_err);
        assert!(matches!(error, BtSportError::Json(_)));
        assert!(error.to_string().starts_with("Invalid JSON:"));
    }

    #[test]
    fn test_error_serialize() {
        let error = BtSportError::InvalidUrl("not a url".to_string());
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Invalid URL: not a url\"");
    }

    #[test]
    fn test_error_serialize_stream_unavailable() {
        let error = BtSportError::StreamUnavailable {
            description: "d".to_string(),
            message: "m".to_string(),
        };
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Stream unavailable: d (m)\"");
    }
}
