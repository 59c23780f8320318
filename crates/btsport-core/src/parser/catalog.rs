//! Category catalog parser
//!
//! The video hub pages carry their configuration as script assignments
//! such as `BTSPORT.cms.videohub.pagedetails = {...}` terminated by a tab.
//! This module finds those assignments and turns them into categories and
//! search query fragments.

use std::vec;

use regex::Regex;
use serde_json::Value;

use super::literal::parse_literal;
use crate::error::{BtSportError, Result};
use crate::types::Category;

/// Script variable holding the category list on the video hub page
pub const PAGEDETAILS_VARIABLE: &str = "BTSPORT.cms.videohub.pagedetails";

/// Script variable holding a category page's search properties
pub const PROPERTIES_VARIABLE: &str = "BTSPORT.cms.videohub.properties";

/// Lazy sequence of categories, default listing first
#[derive(Debug)]
pub struct Categories {
    default: Option<Category>,
    pages: vec::IntoIter<Category>,
}

impl Iterator for Categories {
    type Item = Category;

    fn next(&mut self) -> Option<Category> {
        self.default.take().or_else(|| self.pages.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.pages.len() + usize::from(self.default.is_some());
        (len, Some(len))
    }
}

impl ExactSizeIterator for Categories {}

/// Finds `<variable> = <literal>\t` in a page and parses the literal
///
/// # Errors
/// Returns `ParseError` if the assignment is missing (site layout changed)
/// or the literal does not parse
pub fn extract_embedded_literal(html: &str, variable: &str) -> Result<Value> {
    let pattern = format!(r"(?s){} = (.*?)\t", regex::escape(variable));
    let re = Regex::new(&pattern)
        .map_err(|e| BtSportError::ParseError(format!("Invalid marker pattern: {}", e)))?;

    let literal = re
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| BtSportError::ParseError(format!("{} not found in page", variable)))?;

    parse_literal(literal.as_str())
}

/// Parses the video hub page into its categories
///
/// Yields the default listing (no title) first, then every entry of
/// `pagedetails.pages` in page order.
///
/// # Errors
/// Returns `ParseError` if the page details are missing or malformed
pub fn parse_categories(html: &str) -> Result<Categories> {
    let pagedetails = extract_embedded_literal(html, PAGEDETAILS_VARIABLE)?;

    let default_path = pagedetails
        .get("defaultpage")
        .and_then(|page| page.get("pageurl"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            BtSportError::ParseError("pagedetails.defaultpage.pageurl missing".to_string())
        })?;

    let pages = match pagedetails.get("pages") {
        Some(Value::Array(pages)) => pages
            .iter()
            .enumerate()
            .map(|(i, page)| parse_category_page(i, page))
            .collect::<Result<Vec<_>>>()?,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(BtSportError::ParseError(
                "pagedetails.pages is not a list".to_string(),
            ));
        }
    };

    Ok(Categories {
        default: Some(Category {
            title: None,
            path: default_path.to_string(),
        }),
        pages: pages.into_iter(),
    })
}

fn parse_category_page(index: usize, page: &Value) -> Result<Category> {
    let field = |name: &str| {
        page.get(name).and_then(Value::as_str).ok_or_else(|| {
            BtSportError::ParseError(format!("pagedetails.pages[{}].{} missing", index, name))
        })
    };

    Ok(Category {
        title: Some(field("title")?.to_string()),
        path: field("pageurl")?.to_string(),
    })
}

/// Parses a category page into the search query fragment it stands for
///
/// # Returns
/// `None` when the page has no tags, meaning the unfiltered listing
///
/// # Errors
/// Returns `ParseError` if the properties are missing or malformed
pub fn parse_query_fragment(html: &str) -> Result<Option<String>> {
    let properties = extract_embedded_literal(html, PROPERTIES_VARIABLE)?;
    Ok(build_query_fragment(&properties))
}

/// Builds the search filter for a set of category properties
///
/// `tags` is a comma separated list; each tag is quoted and the list
/// becomes a `tags:(...)` clause. It is OR'd with `ccategory` alone, or
/// with `ccategory AND competition` when both are set.
///
/// # Example
/// ```
/// use btsport_core::parser::build_query_fragment;
/// use serde_json::json;
///
/// let properties = json!({"tags": "Boxing,BoxNation", "ccategory": "Boxing"});
/// let fragment = build_query_fragment(&properties);
/// assert_eq!(
///     fragment.as_deref(),
///     Some(r#"tags:("Boxing","BoxNation") OR ccategory:("Boxing")"#)
/// );
/// ```
pub fn build_query_fragment(properties: &Value) -> Option<String> {
    let tags = properties
        .get("tags")
        .and_then(property_text)
        .filter(|tags| !tags.is_empty())?;

    let quoted = tags
        .split(',')
        .map(|tag| format!("\"{}\"", tag))
        .collect::<Vec<_>>()
        .join(",");
    let mut fragment = format!("tags:({})", quoted);

    let ccategory = properties.get("ccategory").and_then(property_text);
    let competition = properties.get("competition").and_then(property_text);
    match (ccategory, competition) {
        (Some(ccategory), Some(competition)) => fragment.push_str(&format!(
            " OR (ccategory:(\"{}\") AND competition:(\"{}\"))",
            ccategory, competition
        )),
        (Some(ccategory), None) => {
            fragment.push_str(&format!(" OR ccategory:(\"{}\")", ccategory))
        }
        _ => {}
    }

    Some(fragment)
}

/// Text form of a scalar property; `None` for null and containers
fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
