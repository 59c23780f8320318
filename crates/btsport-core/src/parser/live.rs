//! Parsers for the live stream handshake
//!
//! Extracts the SAML assertion from the federation page and the stream
//! URL from the AVS CDN resolution response.

use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{BtSportError, Result};

/// Extracts the SAML assertion carried in the federation page's hidden form
///
/// # Arguments
/// * `html` - Body of the federation exchange page
///
/// # Errors
/// Returns `ElementNotFound` if there is no `SAMLResponse` input with a value
pub fn parse_saml_response(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"input[name="SAMLResponse"]"#)
        .map_err(|e| BtSportError::ParseError(format!("Invalid selector: {:?}", e)))?;

    document
        .select(&selector)
        .find_map(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or_else(|| BtSportError::ElementNotFound("SAMLResponse".to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdnResponse {
    #[serde(default)]
    result_obj: Value,
    #[serde(default)]
    error_description: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

/// Extracts the playable stream URL from an AVS `GetCDN` response
///
/// # Errors
/// - `StreamUnavailable` if `resultObj` is empty, carrying the upstream
///   `errorDescription` and `message`
/// - `ParseError` if `resultObj` has no `src`
/// - `Json` if the body is not JSON
pub fn parse_cdn_response(body: &str) -> Result<String> {
    let response: CdnResponse = serde_json::from_str(body)?;

    if !is_truthy(&response.result_obj) {
        return Err(BtSportError::StreamUnavailable {
            description: upstream_text(response.error_description),
            message: upstream_text(response.message),
        });
    }

    response
        .result_obj
        .get("src")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| BtSportError::ParseError("resultObj.src missing".to_string()))
}

/// Empty values (null, false, zero, empty string/list/map) count as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn upstream_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
